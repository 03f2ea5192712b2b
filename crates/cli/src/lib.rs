//! Console driver for the item manager.
//!
//! Owns the manager, feeds it steps (scripted or typed in), publishes the
//! resulting events and renders the collection after every step.

pub mod config;
pub mod driver;
pub mod render;
pub mod script;

pub use config::Config;
pub use driver::{Driver, Outcome};
pub use script::Step;
