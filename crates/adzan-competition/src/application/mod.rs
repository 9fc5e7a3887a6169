//! Application layer for the Competition context.

pub mod command_handlers;
pub mod notifications;
pub mod query_handlers;
