//! Poll cycle and its periodic driver.
//!
//! `Collector` runs one cycle against every NiFi endpoint and writes the
//! registry; `Scheduler` repeats it on a fixed interval on its own task.

pub mod collector;
pub mod scheduler;

pub use collector::{Collector, CycleReport};
pub use scheduler::Scheduler;
