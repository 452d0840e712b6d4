pub mod cli;
pub mod toml_config;

pub use cli::LocalFiles;
pub use toml_config::AdvisorConfig;
