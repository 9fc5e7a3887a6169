//! Adzan widget — Media bounded context.
//!
//! Responsible for the adzan and doa recitations, the looping backsound with
//! its persisted on/off preference, and the short click, success and wrong
//! cues. Actual sound output sits behind the `AudioOutput` port.

pub mod application;
pub mod domain;
