pub mod add;
pub mod config;
pub mod db;
pub mod del;
pub mod dup;
pub mod init;
pub mod list;
pub mod log;
pub mod open;
pub mod print;
pub mod profile;
