//! Filesystem layer for the compose file tool
//!
//! Reads and writes compose files, loads the user configuration and decides
//! which compose file an invocation works on.

pub mod config;
pub mod error;
pub mod io;
pub mod resolve;

pub use config::{CONFIG_FILE_NAME, CftConfig};
pub use error::{Error, Result};
pub use resolve::{ComposeFile, ComposeFileSource, DEFAULT_COMPOSE_FILES, resolve_compose_file};
