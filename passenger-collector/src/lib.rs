pub mod collector;
pub mod grid;

pub use collector::{max_passengers, max_passengers_with, Sweep, DEFAULT_PARALLEL_THRESHOLD};
pub use grid::{Grid, OBSTACLE};
