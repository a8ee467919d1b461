//! Locsmith - i18n extraction and migration for React projects
//!
//! Locsmith finds hardcoded user-facing text in React/TypeScript sources,
//! assigns translation keys, keeps the locale JSON files of every language
//! in step, fills pending translations and rewrites the sources to call
//! `t("key")` from react-i18next.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Detection, key generation, locale files, translation, rewriting
//! - `issues`: Issue type definitions and reporting
//! - `mcp`: Model Context Protocol server implementation
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod mcp;
pub mod utils;
