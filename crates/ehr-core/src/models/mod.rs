//! Domain models for patients and their lab results.

mod chart;
mod comparison;
mod lab;
mod patient;

pub use chart::*;
pub use comparison::*;
pub use lab::*;
pub use patient::*;
