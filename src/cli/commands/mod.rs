//! CLI command implementations

pub mod add;
pub mod completions;
pub mod init;
pub mod rm;
pub mod show;
