pub mod cli;
pub mod clock;
pub mod config;
pub mod due_date;
pub mod models;
pub mod processor;
pub mod server;
pub mod webhook;
pub mod workorders;

#[cfg(test)]
mod test_utils;

pub use models::*;

/// Default base URL of the work order API
pub const DEFAULT_API_URL: &str = "https://api.getmaintainx.com/v1";

/// Default port for the webhook receiver
pub const DEFAULT_PORT: u16 = 3000;
