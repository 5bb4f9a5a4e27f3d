pub mod agent_config;
#[cfg(feature = "cli")]
pub mod args;
pub mod cli;
pub mod prompt;

pub use agent_config::AgentConfig;
#[cfg(feature = "cli")]
pub use args::{CliConfig, SuggestConfig};
pub use cli::LocalStorage;
