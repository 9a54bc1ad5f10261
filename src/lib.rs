pub mod config;
pub mod driver;
pub mod error;
pub mod hist;
pub mod selector;
pub mod sink;
pub mod store;
// cmd and reports are binary modules (see main.rs).

pub use error::{SladError, SladResult};
