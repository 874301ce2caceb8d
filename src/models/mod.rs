//! Domain models for orgchart.
//!
//! - [`Employee`]: one parsed row of an org chart file. The chief is the
//!   single employee who is their own manager.

mod employee;

pub use employee::*;
