//! View layer: the grid controller that drives a record source.

mod grid;

pub use grid::{DrawReport, GridController, GridState};
