//! depot_day: one planning day at a small depot.
//!
//! Loads two routes from an embedded CSV, plans each with all three
//! strategies (crew duties, fixed-assignment electric, pooled electric),
//! prints a summary of every view, and writes the CSV tables under
//! `output/depot_day/`.  Set `FLEET_LOG=debug` to watch the engines work.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use log::{LevelFilter, info, warn};

use ft_core::{DutyRules, Roster, Route};
use ft_duty::{ChargingPlanParams, charging_plan};
use ft_output::{ChargeLogObserver, CsvWriter, TimetableWriter};
use ft_sim::PoolSimBuilder;
use ft_store::{InMemoryRouteStore, RouteStore, load_routes_reader};
use ft_timeline::{LogSheet, PlanRequest, Planner, TimetableView, plan_many};

// ── Inputs ────────────────────────────────────────────────────────────────────

const OUTPUT_DIR: &str = "output/depot_day";

const ROUTES_CSV: &str = "\
routeNumber,routeName,from,to,upRegularKm,downRegularKm,timePerKm,turnoutFromDepot,upTurnoutKm,downTurnoutKm\n\
12,Cross Town,Depot Gate,City Center,10,10,3,false,,\n\
7A,Harbour Loop,Harbour,Market,8,9,2.5,true,2,3\n\
";

/// Partial override; every other rule keeps its default.
const RULES_JSON: &str = r#"{ "shiftHandover": 10 }"#;

/// One request per strategy, in the shape a planning form would post.
const REQUESTS_JSON: &str = r#"[
    { "strategy": "crew",
      "params": { "callingTime": "05:30", "numberOfBuses": 4, "breakLocation": "Depot Gate",
                  "peakHours": [ { "startTime": "07:00", "endTime": "09:00", "minutes": 5 } ] } },
    { "strategy": "electricFixed",
      "params": { "callingTime": "05:30", "numberOfBuses": 3, "batteryCapacity": 300,
                  "energyConsumption": 1.2, "frequency": 15 } },
    { "strategy": "electricPooled",
      "params": { "callingTime": "05:30", "fleetSize": 3, "totalBuses": 5,
                  "batteryRangeHours": 3, "chargingTimeHours": 1, "numberOfChargers": 2 } }
]"#;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn strategy_name(request: &PlanRequest) -> &'static str {
    match request {
        PlanRequest::Crew(_) => "crew",
        PlanRequest::ElectricFixed(_) => "electric-fixed",
        PlanRequest::ElectricPooled(_) => "electric-pooled",
    }
}

fn run_dir(route: &Route, request: &PlanRequest) -> PathBuf {
    Path::new(OUTPUT_DIR).join(format!("{}-{}", route.route_number, strategy_name(request)))
}

fn log_level() -> LevelFilter {
    std::env::var("FLEET_LOG")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    simple_logger::SimpleLogger::new().with_level(log_level()).init()?;

    println!("=== depot_day - rust_fleet timetable engine ===");
    println!();

    // 1. Routes.
    let store = InMemoryRouteStore::from_routes(load_routes_reader(Cursor::new(ROUTES_CSV))?)?;
    println!("Loaded {} routes", store.len());

    // 2. Rules and requests.
    let rules: DutyRules = serde_json::from_str(RULES_JSON)?;
    let requests: Vec<PlanRequest> = serde_json::from_str(REQUESTS_JSON)?;
    let planner = Planner::new(rules.clone());

    let jobs: Vec<(Route, PlanRequest)> = store
        .list()
        .into_iter()
        .flat_map(|(_, route)| requests.iter().map(move |req| (route.clone(), req.clone())))
        .collect();

    // 3. Plan everything.
    let t0 = Instant::now();
    let views = plan_many(&planner, &jobs);
    println!("Planned {} runs in {:.3} s", views.len(), t0.elapsed().as_secs_f64());
    println!();

    // 4. Summary table and CSV output.
    println!("{:<6} {:<16} {:>8} {:>6} {:>8}  {}", "Route", "Strategy", "Columns", "Rows", "Summary", "Diagnostic");
    println!("{}", "-".repeat(72));
    for ((route, request), view) in jobs.iter().zip(&views) {
        println!(
            "{:<6} {:<16} {:>8} {:>6} {:>8}  {}",
            route.route_number,
            strategy_name(request),
            view.columns().len(),
            view.rows.len(),
            view.summary.len(),
            view.diagnostic.as_deref().unwrap_or("")
        );

        let dir = run_dir(route, request);
        std::fs::create_dir_all(&dir)?;
        let mut writer = CsvWriter::new(&dir)?;
        writer.write_view(view)?;
        writer.finish()?;
    }
    println!();

    // 5. Pooled charging log, captured while the engine runs.
    for (route, request) in &jobs {
        let PlanRequest::ElectricPooled(params) = request else { continue };
        let sim = PoolSimBuilder::new(params.clone()).rules(rules.clone()).build()?;
        let dir = run_dir(route, request).join("charging");
        std::fs::create_dir_all(&dir)?;

        let mut obs = ChargeLogObserver::new(CsvWriter::new(&dir)?);
        match sim.run(route, &mut obs) {
            Ok(blocks) => {
                if let Some(e) = obs.take_error() {
                    eprintln!("output error: {e}");
                }
                let sessions = obs.sessions();
                let mut writer = obs.into_writer();
                writer.write_view(&TimetableView::from_roster(Roster::WorkBlocks(blocks), route))?;
                writer.finish()?;
                info!("route {}: {sessions} charging sessions", route.route_number);
            }
            Err(e) => warn!("route {}: {e}", route.route_number),
        }

        let plan = charging_plan(route, &ChargingPlanParams {
            fleet_size:          params.fleet_size,
            battery_range_hours: params.battery_range_hours,
            charging_time_hours: params.charging_time_hours,
            service_start_time:  params.calling_time.clone(),
        });
        match plan {
            Ok(entries) => {
                println!("Charging plan, route {}:", route.route_number);
                println!("  {:<8} {:>9} {:>6} {:>12} {:>10}", "Bus", "Departure", "Trips", "Charge from", "Charge to");
                for e in entries {
                    println!(
                        "  {:<8} {:>9} {:>6} {:>12} {:>10}",
                        e.bus.to_string(),
                        ft_core::minutes_to_time(e.departure),
                        e.trips_per_charge,
                        ft_core::minutes_to_time(e.charge_start),
                        ft_core::minutes_to_time(e.charge_end)
                    );
                }
                println!();
            }
            Err(e) => println!("Charging plan, route {}: {e}", route.route_number),
        }
    }

    // 6. One printable log sheet.
    let first_duty = jobs.iter().zip(&views).find_map(|((route, _), view)| {
        let roster = view.roster.as_ref()?;
        let duty = roster.all_duties().into_iter().next()?;
        Some(LogSheet::from_duty(route, duty))
    });
    if let Some(sheet) = first_duty {
        println!("{} - route {} {}", sheet.title, sheet.route_number, sheet.route_name);
        println!(
            "  calling {}  sign-off {}  {} km",
            sheet.calling_time.as_deref().unwrap_or("--"),
            sheet.sign_off.as_deref().unwrap_or("--"),
            sheet.total_km
        );
        println!("  {}", serde_json::to_string(&sheet.lines.first())?);
    }

    println!();
    println!("Output written to {OUTPUT_DIR}/");
    Ok(())
}
