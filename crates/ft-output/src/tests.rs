//! Integration tests for ft-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use ft_core::{BusId, ChargerId, CrewParams, Minute, PoolParams, Roster, Route};
    use ft_duty::CrewDutyGenerator;
    use ft_sim::{ChargeSlot, PoolSimBuilder};
    use ft_timeline::{Planner, PlanRequest, TimetableView};

    use crate::csv::{CHARGE_SESSIONS_FILE, CsvWriter, DUTY_SUMMARY_FILE, TIMETABLE_FILE, WORK_BLOCKS_FILE};
    use crate::observer::ChargeLogObserver;
    use crate::row::ChargeSessionRow;
    use crate::writer::TimetableWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn city_route() -> Route {
        Route::between("Depot Gate", "City Center", 10.0, 3.0)
    }

    fn crew_view(buses: u32) -> TimetableView {
        let schedule = CrewDutyGenerator::new(CrewParams {
            calling_time:    "06:00".into(),
            number_of_buses: buses,
            break_location:  "Depot Gate".into(),
            ..CrewParams::default()
        })
        .schedule(&city_route())
        .unwrap();
        TimetableView::from_roster(Roster::Duties(schedule), &city_route())
    }

    fn pool_params() -> PoolParams {
        PoolParams {
            calling_time:        "06:00".into(),
            fleet_size:          2,
            total_buses:         2,
            battery_range_hours: 2.0,
            charging_time_hours: 1.0,
            number_of_chargers:  1,
            ..PoolParams::default()
        }
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(dir.path().join(file))
            .unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    fn headers(dir: &TempDir, file: &str) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        for file in [TIMETABLE_FILE, DUTY_SUMMARY_FILE, WORK_BLOCKS_FILE, CHARGE_SESSIONS_FILE] {
            assert!(dir.path().join(file).exists(), "{file} missing");
        }
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(headers(&dir, DUTY_SUMMARY_FILE), [
            "bus_no", "shift_no", "calling_time", "shift_start", "work_start", "work_end", "total_hours",
        ]);
        assert_eq!(headers(&dir, WORK_BLOCKS_FILE), ["duty", "total_hours", "total_km", "buses"]);
        assert_eq!(headers(&dir, CHARGE_SESSIONS_FILE), ["bus", "charger", "start", "end", "minutes"]);
    }

    #[test]
    fn timetable_header_follows_view() {
        let dir = tmp();
        let view = crew_view(2);
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_timetable(&view).unwrap();
        w.finish().unwrap();

        assert_eq!(headers(&dir, TIMETABLE_FILE), view.headers);
        let rows = records(&dir, TIMETABLE_FILE);
        assert_eq!(rows.len(), view.rows.len());
        assert_eq!(&rows[0][0], "Calling Time");
        assert_eq!(&rows[0][1], "06:00");
        assert_eq!(&rows[0][2], "06:30");
    }

    #[test]
    fn duty_summary_round_trip() {
        let dir = tmp();
        let view = crew_view(1);
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_view(&view).unwrap();
        w.finish().unwrap();

        // Two duties, each split around its break.
        let rows = records(&dir, DUTY_SUMMARY_FILE);
        assert_eq!(rows.len(), 4);
        assert_eq!(&rows[0][0], "1");
        assert_eq!(&rows[0][2], "06:00");
        assert_eq!(&rows[0][5], "10:15");
        assert_eq!(&rows[1][0], "");
        assert_eq!(&rows[1][2], "--");
        assert_eq!(&rows[1][4], "10:45");
        assert!(records(&dir, WORK_BLOCKS_FILE).is_empty());
    }

    #[test]
    fn failed_view_writes_no_timetable() {
        let dir = tmp();
        let view = Planner::default().plan(
            &Route::between("A", "B", 0.0, 0.0),
            &PlanRequest::Crew(CrewParams::default()),
        );
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_view(&view).unwrap();
        w.finish().unwrap();
        assert!(records(&dir, TIMETABLE_FILE).is_empty());
        assert!(records(&dir, DUTY_SUMMARY_FILE).is_empty());
    }

    #[test]
    fn charge_session_fields() {
        let row = ChargeSessionRow::new(BusId(1), ChargeSlot {
            charger: ChargerId(0),
            start:   Minute(495),
            end:     Minute(555),
        });
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_charge_sessions(&[row]).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, CHARGE_SESSIONS_FILE);
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "2"); // bus ordinal
        assert_eq!(&rows[0][1], "1"); // charger ordinal
        assert_eq!(&rows[0][2], "08:15");
        assert_eq!(&rows[0][3], "09:15");
        assert_eq!(&rows[0][4], "60");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }

    #[test]
    fn csv_empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_duty_summary(&[]).unwrap();
        w.write_work_blocks(&[]).unwrap();
        w.write_charge_sessions(&[]).unwrap();
    }

    #[test]
    fn integration_pooled_run() {
        let dir = tmp();
        let route = city_route();
        let sim = PoolSimBuilder::new(pool_params()).build().unwrap();

        let mut obs = ChargeLogObserver::new(CsvWriter::new(dir.path()).unwrap());
        let blocks = sim.run(&route, &mut obs).unwrap();
        assert!(obs.take_error().is_none());
        let sessions = obs.sessions();
        assert!(sessions > 0);

        let segments: usize = blocks.iter().map(|b| b.segments.len()).sum();
        let mut w = obs.into_writer();
        w.write_view(&TimetableView::from_roster(Roster::WorkBlocks(blocks), &route)).unwrap();
        w.finish().unwrap();

        // One charger booking per segment.
        assert_eq!(records(&dir, CHARGE_SESSIONS_FILE).len(), segments);
        assert_eq!(sessions, segments);
        let blocks = records(&dir, WORK_BLOCKS_FILE);
        assert_eq!(blocks.len(), 2);
        assert_eq!(&blocks[0][0], "Work Block 1");
        assert_eq!(headers(&dir, TIMETABLE_FILE), ["Event / Trip", "Work Block 1", "Work Block 2"]);
    }
}
