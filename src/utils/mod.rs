pub mod amount;
pub mod colors;
pub mod date;
pub mod path;
pub mod time;

pub use amount::Amount;
