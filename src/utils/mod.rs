pub mod browser;
pub mod client;
pub mod env;
pub mod spinner;
pub mod table;
