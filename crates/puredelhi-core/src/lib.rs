pub mod config;
pub mod error;
pub mod security;
pub mod types;

pub use config::*;
pub use error::*;
pub use security::*;
pub use types::*;
