//! Printable text of a table row.

use crate::core::pagination::Slot;
use crate::models::TaEntry;
use crate::utils::time::format_time;

/// Column 1..12 text of a filled row. Raw `kms`/`rate` text is kept as
/// typed; an unrecognised day/night value prints blank.
pub fn entry_cells(e: &TaEntry) -> [String; 12] {
    [
        e.printed_date(),
        e.train_no.clone(),
        format_time(e.departure_time),
        format_time(e.arrival_time),
        e.from_station.clone(),
        e.to_station.clone(),
        e.kms.clone(),
        e.day_night()
            .map(|d| d.label().to_string())
            .unwrap_or_default(),
        e.purpose.clone(),
        e.rate.clone(),
        e.conveyance_distance.clone(),
        e.reference.clone(),
    ]
}

/// `None` for an empty slot, which renders as a struck-through row.
pub fn slot_cells(slot: &Slot<'_>) -> Option<[String; 12]> {
    slot.entry().map(entry_cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn filled_row_prints_all_twelve_columns() {
        let mut e = TaEntry::new(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
        e.train_no = "11007".into();
        e.departure_time = NaiveTime::from_hms_opt(6, 40, 0);
        e.from_station = "PUNE".into();
        e.to_station = "CSMT".into();
        e.kms = "192".into();
        e.day_night_percent = "70%".into();
        e.purpose = "Inspection".into();
        e.rate = "abc".into();

        let cells = entry_cells(&e);
        assert_eq!(cells[0], "05-03-2025");
        assert_eq!(cells[2], "06:40");
        assert_eq!(cells[3], "");
        assert_eq!(cells[7], "70%");
        assert_eq!(cells[9], "abc");
        assert_eq!(cells[11], "");
    }

    #[test]
    fn unknown_day_night_prints_blank() {
        let mut e = TaEntry::new(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
        e.day_night_percent = "55%".into();
        assert_eq!(entry_cells(&e)[7], "");

        e.day_night_percent.clear();
        assert_eq!(entry_cells(&e)[7], "");
    }

    #[test]
    fn empty_slot_has_no_cells() {
        assert!(slot_cells(&Slot::Empty).is_none());
    }
}
