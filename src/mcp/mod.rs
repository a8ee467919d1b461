//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the read-only project views and the locale maintenance tools
//! to AI coding agents over stdio.
//!
//! ## Module Structure
//!
//! - `server`: Tool definitions and the server entry point
//! - `types`: Tool parameter and result types

mod server;
pub mod types;

pub use server::{LocsmithMcpServer, run_server};
