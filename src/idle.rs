//! Screensaver and idle-lock suppression.
//!
//! The sweep animation alone does not reset the desktop's idle timers, so
//! a fixed-period timer synthesizes a pointer motion event with zero
//! displacement. XScreenSaverSuspend does not work with gnome-screensaver,
//! hence the warp-by-nothing approach: the cursor never visibly moves but
//! the X server resets its idle counter.
//!
//! Injection is best effort. On Wayland (or any session where the Xlib
//! display is unavailable) the timer keeps firing but each attempt is a
//! no-op; only idle suppression is impaired, never the sweep itself.

use gdk4::Display;
use gtk4::glib;
use gtk4::prelude::*;
use log::{trace, warn};
use std::time::Duration;

/// How often to simulate mouse movement to suppress the screensaver.
pub const SCREENSAVER_SUPPRESSION_PERIOD_MS: u64 = 1000;

/// Owns the suppression timer. Registered once at startup and cancelled
/// once at shutdown, independent of the render state.
pub struct IdleSuppressor {
    source: Option<glib::SourceId>,
}

impl IdleSuppressor {
    pub fn start() -> Self {
        let mut warned = false;
        let source = glib::timeout_add_local(
            Duration::from_millis(SCREENSAVER_SUPPRESSION_PERIOD_MS),
            move || {
                match inject_zero_motion_pointer_event() {
                    Ok(()) => trace!("Injected zero-motion pointer event"),
                    Err(e) => {
                        if !warned {
                            warn!("Pointer injection unavailable, screensaver may activate: {}", e);
                            warned = true;
                        }
                    }
                }
                glib::ControlFlow::Continue
            },
        );
        Self {
            source: Some(source),
        }
    }

    /// Cancel the timer. Idempotent; no firing is observed after return.
    pub fn stop(&mut self) {
        if let Some(id) = self.source.take() {
            id.remove();
        }
    }
}

impl Drop for IdleSuppressor {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Synthesize a relative pointer move of 0x0 pixels via XWarpPointer.
fn inject_zero_motion_pointer_event() -> anyhow::Result<()> {
    let display = Display::default().ok_or_else(|| anyhow::anyhow!("no default display"))?;
    let x11_display = display
        .downcast::<gdk4_x11::X11Display>()
        .map_err(|_| anyhow::anyhow!("not an X11 display (Wayland session?)"))?;

    let xdisplay = unsafe { x11_display.xdisplay() };
    if xdisplay.is_null() {
        anyhow::bail!("Xlib display handle is null");
    }

    // src_w/dest_w of 0 (None) makes this a relative warp; all-zero
    // coordinates leave the cursor exactly where it is.
    unsafe {
        x11::xlib::XWarpPointer(xdisplay, 0, 0, 0, 0, 0, 0, 0, 0);
        x11::xlib::XFlush(xdisplay);
    }
    Ok(())
}
