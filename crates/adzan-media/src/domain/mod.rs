//! Domain model for the Media context.

pub mod aggregates;
pub mod audio;
pub mod commands;
pub mod events;
