//! Utility modules

pub mod file_source;
pub mod memory_source;
pub mod validation;

pub use file_source::*;
pub use memory_source::*;
pub use validation::*;
