//! Infrastructure layer
//!
//! Handles all I/O with the outside world: git repositories, the build
//! tool subprocess, and the filesystem.

pub mod build_tool;
pub mod dirs;
pub mod filesystem;
pub mod git;
