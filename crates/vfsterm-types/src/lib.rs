//! Foundation types for vfsterm.
//!
//! This crate holds the pieces shared by every vfsterm crate: the error
//! taxonomy and the shell configuration.

pub mod config;
pub mod error;
