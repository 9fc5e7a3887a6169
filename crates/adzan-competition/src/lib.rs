//! Adzan widget — Competition bounded context.
//!
//! Two players race through their own 20-question banks. Each track advances
//! independently after a short settle delay; the game ends only when both
//! tracks are exhausted, and the higher score wins.

pub mod application;
pub mod domain;
