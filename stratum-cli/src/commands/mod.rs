//! CLI command implementations.

pub mod db;
pub mod down;
pub mod init;
pub mod new;
pub mod remove;
pub mod stamp;
pub mod up;
pub mod version;
