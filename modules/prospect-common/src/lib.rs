pub mod config;
pub mod store;
pub mod types;
pub mod validate;

pub use config::Config;
pub use types::*;
pub use validate::*;
