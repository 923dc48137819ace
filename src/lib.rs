pub mod db;
pub mod quiz;
pub mod seed;
pub mod server;
pub mod settings;
pub mod telemetry;
