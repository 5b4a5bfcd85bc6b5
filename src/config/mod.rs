pub mod bootstrap_settings;
pub mod database;
pub mod env_provider;
pub mod errors;
pub mod logging;

pub use bootstrap_settings::BootstrapSettings;
pub use database::DatabaseProvider;
pub use env_provider::{EnvironmentProvider, SystemEnvironment};
pub use logging::init_logging;

#[cfg(test)]
pub use env_provider::MockEnvironment;
