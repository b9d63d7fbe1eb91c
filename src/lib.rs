//! plasma-sweep: a full-screen moving bar for clearing image retention
//! on plasma and similar displays.
//!
//! The program is a thin GTK4 application:
//! - A light vertical bar sweeps across a fullscreen, cursor-hidden window
//! - The sweep speed adapts so one pass always takes ~4 seconds
//! - A periodic zero-motion pointer event keeps the screensaver away
//! - Any key or button press quits

pub mod animator;
pub mod gradient;
pub mod idle;

// Re-export commonly used types
pub use animator::{Animator, SweepState};
pub use idle::IdleSuppressor;
