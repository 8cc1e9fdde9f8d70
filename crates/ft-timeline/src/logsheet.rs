//! Printable per-duty log sheet.

use serde::Serialize;

use ft_core::{Duty, Event, Route, minutes_to_time};

/// One line of a log sheet.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LogLine {
    Leg {
        /// Trip sequence number, `"Turnout"`, or `"Return"`.
        trip:  String,
        from:  String,
        to:    String,
        start: String,
        end:   String,
        km:    String,
    },
    Break { text: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSheet {
    pub title:        String,
    pub route_number: String,
    pub route_name:   String,
    pub calling_time: Option<String>,
    pub sign_off:     Option<String>,
    /// Trips and depot legs, two decimals.
    pub total_km:     String,
    pub lines:        Vec<LogLine>,
}

impl LogSheet {
    pub fn from_duty(route: &Route, duty: &Duty) -> Self {
        let lines = duty
            .events()
            .iter()
            .filter_map(|event| {
                let (trip, leg) = match event {
                    Event::Trip(leg) => (leg.seq.to_string(), leg),
                    Event::Turnout(leg) => ("Turnout".to_owned(), leg),
                    Event::ReturnToDepot { leg, .. } => ("Return".to_owned(), leg),
                    Event::Break { start, end, location } => {
                        return Some(LogLine::Break {
                            text: format!(
                                "{} - {} ({} mins at {location})",
                                minutes_to_time(*start),
                                minutes_to_time(*end),
                                (end - start).round()
                            ),
                        });
                    }
                    Event::CallingTime { .. } | Event::Ready { .. } | Event::SignOff { .. } => return None,
                };
                Some(LogLine::Leg {
                    trip,
                    from: leg.from.clone(),
                    to: leg.to.clone(),
                    start: minutes_to_time(leg.start),
                    end: minutes_to_time(leg.end),
                    km: format!("{:.2}", leg.distance_km),
                })
            })
            .collect();

        Self {
            title:        format!("{} log sheet", duty.label()),
            route_number: route.route_number.clone(),
            route_name:   route.route_name.clone(),
            calling_time: duty.calling_time().map(minutes_to_time),
            sign_off:     duty.sign_off().map(minutes_to_time),
            total_km:     format!("{:.2}", duty.distance_km()),
            lines,
        }
    }

    /// Number of revenue trips on the sheet.
    pub fn trip_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, LogLine::Leg { trip, .. } if trip.parse::<u32>().is_ok()))
            .count()
    }
}
