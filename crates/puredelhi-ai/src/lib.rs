pub mod gemini;
pub mod provider;

pub use gemini::*;
pub use provider::*;
