pub mod generator;
pub mod names;

pub use generator::*;
pub use names::WARD_NAMES;
