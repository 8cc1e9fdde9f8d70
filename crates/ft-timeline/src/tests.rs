//! Unit tests for ft-timeline.

use ft_core::{
    BusId, CrewParams, Duty, Event, PoolParams, Roster, Route, Schedule, Shift, TripLeg,
};
use ft_duty::CrewDutyGenerator;
use ft_sim::{NoopObserver, PoolSimBuilder};

use crate::{
    DutySummaryRow, EVENT_HEADER, LogLine, LogSheet, PLACEHOLDER, PlanRequest, Planner, Summary,
    TimetableView, WorkBlockSummary, plan_many,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 30-minute trips each way, 60-minute round trip.
fn city_route() -> Route {
    let mut r = Route::between("Depot Gate", "City Center", 10.0, 3.0);
    r.route_number = "12".into();
    r.route_name = "Cross Town".into();
    r
}

fn crew_params(buses: u32, break_location: &str) -> CrewParams {
    CrewParams {
        calling_time:    "06:00".into(),
        number_of_buses: buses,
        break_location:  break_location.into(),
        ..CrewParams::default()
    }
}

fn crew_roster(buses: u32, break_location: &str) -> Roster {
    let schedule = CrewDutyGenerator::new(crew_params(buses, break_location))
        .schedule(&city_route())
        .unwrap();
    Roster::Duties(schedule)
}

fn pool_params(fleet: u32, buses: u32, range_h: f64) -> PoolParams {
    PoolParams {
        calling_time:        "06:00".into(),
        fleet_size:          fleet,
        total_buses:         buses,
        battery_range_hours: range_h,
        charging_time_hours: 1.0,
        number_of_chargers:  1,
        ..PoolParams::default()
    }
}

/// A hand-built duty: calling at `calling`, `trips` alternating 30-minute
/// trips, and an optional break after `break_after` trips.
fn manual(bus: u32, calling: f64, trips: u32, break_after: Option<u32>) -> Duty {
    let route = city_route();
    let mut d = Duty::new(BusId::from_ordinal(bus), Shift::First);
    d.push(Event::CallingTime { at: calling }).unwrap();
    let mut now = calling + 15.0;
    d.push(Event::Ready { at: now }).unwrap();
    for seq in 1..=trips {
        let (from, to) = if seq % 2 == 1 { (&route.from, &route.to) } else { (&route.to, &route.from) };
        d.push(Event::Trip(TripLeg {
            seq,
            from:        from.clone(),
            to:          to.clone(),
            start:       now,
            end:         now + 30.0,
            distance_km: 10.0,
        }))
        .unwrap();
        now += 30.0;
        if break_after == Some(seq) {
            d.push(Event::Break { start: now, end: now + 30.0, location: to.clone() }).unwrap();
            now += 30.0;
        }
    }
    d.push(Event::SignOff { at: now }).unwrap();
    d
}

fn view_of(duties: Vec<Duty>) -> TimetableView {
    let mut schedule = Schedule::new();
    for d in duties {
        schedule.push(d);
    }
    TimetableView::from_roster(Roster::Duties(schedule), &city_route())
}

// ── Formatter ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod formatter {
    use super::*;

    #[test]
    fn single_bus_cells() {
        let view = TimetableView::from_roster(crew_roster(1, ""), &city_route());
        assert_eq!(view.headers, [EVENT_HEADER, "Bus 1 - S1", "Bus 1 - S2"]);
        assert_eq!(view.cell("Calling Time", "Bus 1 - S1"), Some("06:00"));
        assert_eq!(view.cell("Ready", "Bus 1 - S1"), Some("06:15"));
        assert_eq!(view.cell("Trip 1: Depot Gate", "Bus 1 - S1"), Some("06.15 (30min)"));
        assert_eq!(view.cell("Trip 2: City Center", "Bus 1 - S1"), Some("06.45 (30min)"));
        // 15 trips fit under the 480-minute ceiling.
        assert_eq!(view.cell("Sign Off", "Bus 1 - S1"), Some("13:45"));
        assert_eq!(view.cell("Calling Time", "Bus 1 - S2"), Some("13:45"));
        assert!(view.diagnostic.is_none());
    }

    #[test]
    fn rows_run_calling_ready_body_sign_off() {
        let view = TimetableView::from_roster(crew_roster(1, ""), &city_route());
        let labels: Vec<&str> = view.row_labels().collect();
        assert_eq!(labels.len(), 18);
        assert_eq!(&labels[..4], ["Calling Time", "Ready", "Trip 1: Depot Gate", "Trip 2: City Center"]);
        assert_eq!(labels[16], "Trip 15: Depot Gate");
        assert_eq!(labels[17], "Sign Off");
    }

    #[test]
    fn missing_events_get_placeholder() {
        let view = view_of(vec![manual(1, 360.0, 4, None), manual(2, 380.0, 2, None)]);
        assert_eq!(view.cell("Trip 3: Depot Gate", "Bus 1 - S1"), Some("07.15 (30min)"));
        assert_eq!(view.cell("Trip 3: Depot Gate", "Bus 2 - S1"), Some(PLACEHOLDER));
        for row in &view.rows {
            assert_eq!(row.cells.len(), 2);
        }
    }

    #[test]
    fn breaks_share_one_row() {
        let view = view_of(vec![manual(1, 360.0, 4, Some(2)), manual(2, 380.0, 6, Some(4))]);
        let breaks: Vec<&str> = view.row_labels().filter(|l| l.starts_with("Break")).collect();
        assert_eq!(breaks, ["Break"]);
        assert_eq!(view.cell("Break", "Bus 1 - S1"), Some("07:15 - 07:45 (30 mins at Depot Gate)"));
        assert_eq!(view.cell("Break", "Bus 2 - S1"), Some("08:35 - 09:05 (30 mins at Depot Gate)"));
    }

    #[test]
    fn body_rows_follow_earliest_start() {
        let view = view_of(vec![manual(1, 360.0, 4, Some(2))]);
        let labels: Vec<&str> = view.row_labels().collect();
        assert_eq!(labels, [
            "Calling Time",
            "Ready",
            "Trip 1: Depot Gate",
            "Trip 2: City Center",
            "Break",
            "Trip 3: Depot Gate",
            "Trip 4: City Center",
            "Sign Off",
        ]);
    }

    #[test]
    fn pooled_rows_keyed_by_direction() {
        let route = city_route();
        let blocks = PoolSimBuilder::new(pool_params(1, 1, 10.0))
            .build()
            .unwrap()
            .run(&route, &mut NoopObserver)
            .unwrap();
        let view = TimetableView::from_roster(Roster::WorkBlocks(blocks), &route);

        assert_eq!(view.columns(), ["Work Block 1"]);
        assert_eq!(view.cell("Trip 1 (Depot Gate -> City Center)", "Work Block 1"), Some("06:15"));
        assert_eq!(view.cell("Trip 1 (City Center -> Depot Gate)", "Work Block 1"), Some("06:45"));
        assert_eq!(view.cell("Turnout", "Work Block 1"), Some("06:00 - 06:15 (Bus 1)"));
        assert!(view.cell("Break", "Work Block 1").unwrap().starts_with("10:15 - 10:45 (Bus 1)"));
        assert_eq!(view.cell("Return to Depot (Charging)", "Work Block 1"), Some("14:45 (Bus 1)"));
    }

    #[test]
    fn repeated_events_in_one_column_are_numbered() {
        let route = city_route();
        let blocks = PoolSimBuilder::new(pool_params(1, 1, 10.0))
            .build()
            .unwrap()
            .run(&route, &mut NoopObserver)
            .unwrap();
        let view = TimetableView::from_roster(Roster::WorkBlocks(blocks), &route);

        // The second segment starts once the charger frees the bus at 15:45.
        assert_eq!(view.cell("Turnout #2", "Work Block 1"), Some("15:45 - 16:00 (Bus 1)"));
        // Both segments break, and both land on the single Break row.
        assert!(view.row("Break #2").is_none());
        assert_eq!(
            view.cell("Break", "Work Block 1"),
            Some("10:15 - 10:45 (Bus 1) / 20:00 - 20:30 (Bus 1)")
        );
        assert!(view.row("Return to Depot (Charging) #2").is_some());
        // Departures keep counting across segments.
        assert_eq!(view.cell("Trip 9 (Depot Gate -> City Center)", "Work Block 1"), Some("16:00"));
    }

    #[test]
    fn failed_view_is_empty() {
        let view = TimetableView::failed("no route");
        assert!(view.is_empty());
        assert!(view.columns().is_empty());
        assert!(view.roster.is_none());
        assert_eq!(view.diagnostic.as_deref(), Some("no route"));
    }

    #[test]
    fn serializes_camel_case() {
        let view = view_of(vec![manual(1, 360.0, 2, None)]);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["headers"][1], "Bus 1 - S1");
        assert_eq!(json["summary"]["kind"], "duties");
        assert_eq!(json["summary"]["rows"][0]["callingTime"], "06:00");
        assert!(json["diagnostic"].is_null());
    }
}

// ── Summaries ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod summary {
    use super::*;

    #[test]
    fn duty_splits_around_break() {
        let rows = DutySummaryRow::for_duty(&manual(1, 360.0, 4, Some(2)));
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.bus_no, 1);
        assert_eq!(first.shift_no, 1);
        assert_eq!(first.calling_time, "06:00");
        assert_eq!(first.shift_start, "06:15");
        assert_eq!(first.work_start, "06:15");
        assert_eq!(first.work_end, "07:15");
        assert_eq!(first.total_hours, "02:45");
        assert!(!first.is_second_row);

        let second = &rows[1];
        assert_eq!(second.bus_no, 1);
        assert_eq!(second.calling_time, PLACEHOLDER);
        assert_eq!(second.shift_start, PLACEHOLDER);
        assert_eq!(second.work_start, "07:45");
        assert_eq!(second.work_end, "08:45");
        assert_eq!(second.total_hours, PLACEHOLDER);
        assert!(second.is_second_row);
    }

    #[test]
    fn unbroken_duty_has_one_row() {
        let rows = DutySummaryRow::for_duty(&manual(2, 380.0, 3, None));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].work_end, "08:05");
        assert_eq!(rows[0].total_hours, "01:45");
    }

    #[test]
    fn crew_roster_summary() {
        // One bus breaking at the origin: 8 trips, break, 6 trips.
        let summary = Summary::for_roster(&crew_roster(1, "Depot Gate"));
        let Summary::Duties(rows) = summary else {
            panic!("expected duty rows");
        };
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].work_end, "10:15");
        assert_eq!(rows[0].total_hours, "07:45");
        assert_eq!(rows[1].work_start, "10:45");
        assert_eq!(rows[1].work_end, "13:45");
        assert_eq!(rows[2].shift_no, 2);
        assert_eq!(rows[2].calling_time, "13:45");
    }

    #[test]
    fn work_block_totals() {
        let blocks = PoolSimBuilder::new(pool_params(1, 1, 10.0))
            .build()
            .unwrap()
            .run(&city_route(), &mut NoopObserver)
            .unwrap();
        let row = WorkBlockSummary::for_block(&blocks[0]);
        assert_eq!(row.duty, "Work Block 1");
        // Two segments of 525 minutes and 8 round trips each.
        assert_eq!(row.total_hours, "17.50");
        assert_eq!(row.total_km, "320.00");
        assert_eq!(row.buses, ["Bus 1"]);

        let summary = Summary::for_roster(&Roster::WorkBlocks(blocks));
        assert_eq!(summary.len(), 1);
    }

    #[test]
    fn default_is_empty_duty_summary() {
        assert!(Summary::default().is_empty());
        assert_eq!(Summary::default(), Summary::Duties(Vec::new()));
    }
}

// ── Log sheet ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod logsheet {
    use super::*;

    #[test]
    fn header_and_lines() {
        let route = city_route();
        let sheet = LogSheet::from_duty(&route, &manual(1, 360.0, 4, Some(2)));
        assert_eq!(sheet.title, "Bus 1 - S1 log sheet");
        assert_eq!(sheet.route_number, "12");
        assert_eq!(sheet.route_name, "Cross Town");
        assert_eq!(sheet.calling_time.as_deref(), Some("06:00"));
        assert_eq!(sheet.sign_off.as_deref(), Some("08:45"));
        assert_eq!(sheet.total_km, "40.00");
        assert_eq!(sheet.lines.len(), 5);
        assert_eq!(sheet.trip_count(), 4);

        assert_eq!(sheet.lines[0], LogLine::Leg {
            trip:  "1".into(),
            from:  "Depot Gate".into(),
            to:    "City Center".into(),
            start: "06:15".into(),
            end:   "06:45".into(),
            km:    "10.00".into(),
        });
        assert_eq!(sheet.lines[2], LogLine::Break { text: "07:15 - 07:45 (30 mins at Depot Gate)".into() });
    }

    #[test]
    fn depot_legs_are_labelled() {
        let mut route = city_route();
        route.turnout_from_depot = true;
        route.up_turnout_km = 2.0;
        route.down_turnout_km = 3.0;
        let schedule = CrewDutyGenerator::new(crew_params(1, "")).schedule(&route).unwrap();
        let sheet = LogSheet::from_duty(&route, &schedule.duties()[0]);

        let Some(LogLine::Leg { trip, from, km, .. }) = sheet.lines.first() else {
            panic!("first line is a leg");
        };
        assert_eq!(trip, "Turnout");
        assert_eq!(from, "Depot");
        assert_eq!(km, "2.00");
        assert!(matches!(sheet.lines.last(), Some(LogLine::Leg { trip, .. }) if trip == "Return"));
        assert!(!sheet.lines.iter().any(|l| matches!(l, LogLine::Leg { trip, .. } if trip == "Calling Time")));
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planner {
    use super::*;

    #[test]
    fn crew_plan_has_columns_and_summary() {
        let view = Planner::default().plan(&city_route(), &PlanRequest::Crew(crew_params(2, "Depot Gate")));
        assert!(view.diagnostic.is_none());
        assert_eq!(view.columns().len(), 4);
        assert_eq!(view.summary.len(), 8);
        assert!(view.roster.is_some());
    }

    #[test]
    fn short_battery_becomes_diagnostic() {
        // 2-hour round trip on a 1-hour battery.
        let long = Route::between("A", "B", 20.0, 3.0);
        let view = Planner::default().plan(&long, &PlanRequest::ElectricPooled(pool_params(2, 2, 1.0)));
        assert!(view.is_empty());
        assert!(view.roster.is_none());
        let message = view.diagnostic.expect("diagnostic");
        assert!(message.contains("battery range is too low for even one round trip"), "{message}");
    }

    #[test]
    fn zero_round_trip_becomes_diagnostic() {
        let view = Planner::default()
            .plan(&Route::between("A", "B", 0.0, 0.0), &PlanRequest::Crew(crew_params(1, "")));
        let message = view.diagnostic.expect("diagnostic");
        assert!(message.contains("round trip time must be greater than zero"), "{message}");
    }

    #[test]
    fn builder_rejection_becomes_diagnostic() {
        let mut params = pool_params(1, 1, 4.0);
        params.number_of_chargers = 70_000;
        let view = Planner::default().plan(&city_route(), &PlanRequest::ElectricPooled(params));
        assert!(view.diagnostic.expect("diagnostic").contains("configuration error"));
    }

    #[test]
    fn strategy_names() {
        let planner = Planner::default();
        let names: Vec<&str> = [
            PlanRequest::Crew(CrewParams::default()),
            PlanRequest::ElectricFixed(Default::default()),
            PlanRequest::ElectricPooled(PoolParams::default()),
        ]
        .iter()
        .map(|r| planner.strategy(r).unwrap().name())
        .collect();
        assert_eq!(names, ["crew", "electric-fixed", "electric-pooled"]);
    }

    #[test]
    fn plan_many_keeps_input_order() {
        let jobs = vec![
            (city_route(), PlanRequest::Crew(crew_params(1, ""))),
            (Route::between("A", "B", 0.0, 0.0), PlanRequest::Crew(crew_params(1, ""))),
            (city_route(), PlanRequest::Crew(crew_params(2, ""))),
        ];
        let views = plan_many(&Planner::default(), &jobs);
        assert_eq!(views.len(), 3);
        assert_eq!(views[0].columns().len(), 2);
        assert!(views[1].diagnostic.is_some());
        assert_eq!(views[2].columns().len(), 4);
    }

    #[test]
    fn request_decodes_leniently() {
        let json = r#"{
            "strategy": "crew",
            "params": { "callingTime": "06:00", "numberOfBuses": "3", "breakLocation": "Depot Gate" }
        }"#;
        let request: PlanRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request, PlanRequest::Crew(crew_params(3, "Depot Gate")));

        let pooled: PlanRequest =
            serde_json::from_str(r#"{"strategy": "electricPooled", "params": {"fleetSize": 4}}"#).unwrap();
        let PlanRequest::ElectricPooled(p) = pooled else {
            panic!("expected pooled request");
        };
        assert_eq!(p.fleet_size, 4);
        assert_eq!(p.total_buses, 0);
    }
}
