//! Domain model for the Competition context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod player;
pub mod question_bank;
pub mod settings;
pub mod shuffle;
pub mod timer;
pub mod track;
