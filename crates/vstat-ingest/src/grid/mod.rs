//! Raw CSV grid reading.

mod reader;

pub use reader::{RawGrid, read_raw_grid, read_raw_grid_from_reader};
