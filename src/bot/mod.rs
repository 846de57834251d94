// bot/mod.rs

// Exported functions
pub use self::dispatcher::run_dispatcher;

// Exported structs and types
pub use self::api::{ApiError, PriceFetcher, FETCH_ERROR_MESSAGE};
pub use self::companies::{Companies, Company, CompanyError};
pub use self::config::{BotConfig, ConfigError};
pub use self::dispatcher::{BotError, Command, HandlerResult};

// Declare submodules
mod api;
mod companies;
mod config;
mod dispatcher;
mod handler;
mod processor;
#[cfg(test)]
mod test_utils;
