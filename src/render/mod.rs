//! Render module - UI components for the sonifier window
//!
//! This module provides:
//! - Pointer HUD: pitch/pan grid, crosshair and parameter readout

mod hud;

pub use hud::{Hud, HudReadout, HudSettings};
