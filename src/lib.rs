//! Core logic for a hand-tracking arcade shooter: a fingertip is the aiming
//! reticle, a pinch gesture fires, and falling shapes are spawned, scored,
//! and destroyed.
//!
//! Camera capture and hand-landmark inference are external services consumed
//! through the traits in [`tracking`]; everything else is a pure per-frame
//! update over an explicit [`entities::GameState`] record.

pub mod compute;
pub mod config;
pub mod entities;
pub mod gesture;
pub mod tracking;
