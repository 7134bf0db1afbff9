pub mod day_night;
pub mod entry;
pub mod month;
pub mod profile;

pub use day_night::DayNight;
pub use entry::TaEntry;
pub use month::MonthData;
pub use profile::UserProfile;
