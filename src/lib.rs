// src/lib.rs

pub mod array2d;
pub mod config;
pub mod const_arrays;
pub mod derivative;
pub mod error;
pub mod field_computer;
pub mod fields;
pub mod grid;
pub mod logging;
pub mod solvers;
pub mod transform;

pub use array2d::Array2D;
pub use config::FieldSolverConfig;
pub use const_arrays::ConstArrays;
pub use error::{ConfigError, ConfigResult};
pub use field_computer::FieldComputer;
pub use fields::{Currents, Fields};
pub use grid::Grid2D;
