//! CLI command implementations.

mod config;
mod diagnose;
mod init;
mod search;
mod seed;
mod videos;

pub use config::run_config;
pub use diagnose::run_diagnose;
pub use init::run_init;
pub use search::run_search;
pub use seed::run_seed;
pub use videos::run_videos;
