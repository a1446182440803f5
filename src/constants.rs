//! Global constants used throughout the modlens codebase.
//!
//! This module centralizes the archive and Lua-source conventions that
//! several modules rely on, so they stay discoverable and consistent.

/// Conventional root entry file of a mod archive.
///
/// Dependency resolution starts here when the caller does not name an
/// entry file explicitly, and errors that the diagnostic transcript never
/// attributes to any file are attributed to this file. Overridable via
/// `modlens.toml` or the `--entry` CLI flag.
pub const DEFAULT_ENTRY_FILE: &str = "main.lua";

/// Name of the include directive recognized in Lua source.
///
/// Only statically-written calls to this function are resolved; computed
/// arguments are invisible to the parser.
pub const INCLUDE_FUNCTION: &str = "include";

/// Lua line-comment marker. Lines starting with this (after trimming)
/// are skipped entirely by the include parser.
pub const LINE_COMMENT_MARKER: &str = "--";

/// Name of the optional project-local configuration file.
pub const CONFIG_FILE_NAME: &str = "modlens.toml";
