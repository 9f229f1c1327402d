// The binary in main.rs drives the terminal; everything else lives here so
// integration tests and criterion benches can reach it.

pub mod app;
pub mod config;
pub mod event;
pub mod gate;
pub mod messages;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod ui;
pub mod vocab;
