//! crossforge - cross-compilation build orchestrator
//!
//! Declarative build recipes for CHERI software projects, plus the
//! single-recipe driver that fetches, configures, builds and installs
//! them for native or FreeBSD/CheriBSD compilation targets.

pub mod cli;
pub mod config;
pub mod error;
pub mod process;
pub mod recipes;
pub mod repository;
pub mod state;
pub mod target;
pub mod tools;
pub mod ui;

pub use error::{ForgeError, ForgeResult};
