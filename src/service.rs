use crate::Gtfs;
use chrono::NaiveDate;
use std::collections::HashSet;

/// Services running at least once between `reference_date` and `lookahead_days` later
///
/// Both ends are included. Services only made of removed dates are never useful.
pub fn useful_service_ids(
    gtfs: &Gtfs,
    reference_date: NaiveDate,
    lookahead_days: u16,
) -> HashSet<String> {
    let useful: HashSet<String> = gtfs
        .service_ids()
        .into_iter()
        .filter(|service_id| {
            gtfs.trip_days(service_id, reference_date)
                .iter()
                .any(|offset| *offset <= lookahead_days)
        })
        .map(str::to_owned)
        .collect();
    log::info!(
        "{} useful services out of {} between {} and {} days later",
        useful.len(),
        gtfs.service_ids().len(),
        reference_date,
        lookahead_days
    );
    useful
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{Calendar, CalendarDate, Exception};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekdays(id: &str, start_date: NaiveDate, end_date: NaiveDate) -> Calendar {
        Calendar {
            id: id.to_owned(),
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: false,
            sunday: false,
            start_date,
            end_date,
        }
    }

    #[test]
    fn useful_services() {
        let mut gtfs = Gtfs::default();
        for calendar in [
            weekdays("current", date(2019, 1, 1), date(2019, 4, 30)),
            weekdays("expired", date(2018, 9, 1), date(2018, 12, 31)),
            weekdays("future", date(2019, 9, 1), date(2019, 12, 31)),
        ] {
            gtfs.calendar.insert(calendar.id.clone(), calendar);
        }
        gtfs.calendar_dates.insert(
            "holiday".to_owned(),
            vec![CalendarDate {
                service_id: "holiday".to_owned(),
                date: date(2019, 2, 18),
                exception_type: Exception::Added,
            }],
        );
        gtfs.calendar_dates.insert(
            "cancelled".to_owned(),
            vec![CalendarDate {
                service_id: "cancelled".to_owned(),
                date: date(2019, 2, 19),
                exception_type: Exception::Deleted,
            }],
        );

        let useful = useful_service_ids(&gtfs, date(2019, 2, 1), 30);
        let expected: HashSet<String> = ["current", "holiday"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(expected, useful);
    }
}
