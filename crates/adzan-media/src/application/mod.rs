//! Application layer for the Media context.

pub mod command_handlers;
pub mod output;
pub mod query_handlers;
