/// MCP (Model Context Protocol) server implementation
///
/// This module contains the JSON-RPC message types and the stdio server
/// loop that exposes the tracker tools to MCP clients.

pub mod protocol;
pub mod server;

pub use server::McpServer;
