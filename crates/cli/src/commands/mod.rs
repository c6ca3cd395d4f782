//! CLI commands for the institutional signal pipeline.

pub mod process;
pub mod show_config;

pub use process::{run_process, ProcessArgs};
pub use show_config::{run_show_config, ShowConfigArgs};
