use super::day_night::DayNight;
use crate::utils::Amount;
use crate::utils::date::format_dmy;
use crate::utils::time::format_time;
use chrono::{NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};

/// One journey line of the journal.
///
/// `kms` and `rate` are kept as the raw text the user typed: the printed
/// form shows them verbatim and only totals interpret `rate` as a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaEntry {
    pub id: i64,                              // ⇔ entries.id (0 = not yet stored)
    pub date: NaiveDate,                      // ⇔ entries.date ("YYYY-MM-DD")
    pub train_no: String,                     // column 2
    #[serde(serialize_with = "serialize_hm")]
    pub departure_time: Option<NaiveTime>,    // column 3 ("HH:MM" or "")
    #[serde(serialize_with = "serialize_hm")]
    pub arrival_time: Option<NaiveTime>,      // column 4
    pub from_station: String,                 // column 5
    pub to_station: String,                   // column 6
    pub kms: String,                          // column 7
    pub day_night_percent: String,            // column 8 ("30%" | "70%" | "100%")
    pub purpose: String,                      // column 9
    pub rate: String,                         // column 10
    pub conveyance_distance: String,          // column 11
    pub reference: String,                    // column 12
}

fn serialize_hm<S: Serializer>(t: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_time(*t))
}

impl TaEntry {
    /// Blank entry for `date`, ready to be filled from the command line.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: 0,
            date,
            train_no: String::new(),
            departure_time: None,
            arrival_time: None,
            from_station: String::new(),
            to_station: String::new(),
            kms: String::new(),
            day_night_percent: DayNight::default().label().to_string(),
            purpose: String::new(),
            rate: String::new(),
            conveyance_distance: String::new(),
            reference: String::new(),
        }
    }

    /// Journal order: date, then departure time (no time sorts first).
    pub fn sort_key(&self) -> (NaiveDate, Option<NaiveTime>) {
        (self.date, self.departure_time)
    }

    pub fn day_night(&self) -> Option<DayNight> {
        DayNight::from_label(&self.day_night_percent)
    }

    /// Rate as used by totals: its leading number, or zero without one.
    pub fn rate_amount(&self) -> Amount {
        Amount::parse_lenient(&self.rate)
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn printed_date(&self) -> String {
        format_dmy(&self.date)
    }

    pub fn route(&self) -> String {
        match (self.from_station.trim(), self.to_station.trim()) {
            ("", "") => String::new(),
            (from, to) => format!("{} → {}", from, to),
        }
    }
}
