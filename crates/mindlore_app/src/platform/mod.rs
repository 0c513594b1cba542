//! Terminal front end: reads commands from stdin, renders the topic list to
//! stdout and runs suggestion requests through the engine.
mod app;
mod config;
mod effects;
mod ui;

pub use app::run_app;
