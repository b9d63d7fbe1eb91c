//! Render-state manager for the sweeping bar.
//!
//! The per-frame work is deliberately tiny: a repeating glib timeout
//! advances the bar origin by one pixel and queues a redraw. The timeout
//! interval is derived from the drawable width so that one full sweep
//! always takes about `PERIOD_MS` regardless of resolution. The gradient
//! pattern and the timer are rebuilt together whenever the draw func
//! observes a new width.

use cairo::{Context, LinearGradient};
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::DrawingArea;
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::gradient;

/// Number of milliseconds for the bar to move across the screen
/// (approximate).
pub const PERIOD_MS: u32 = 4000;

/// Interval between 1-pixel advances for the given width.
///
/// Integer truncation, so a whole sweep takes at most `PERIOD_MS`.
/// Clamped to 1ms since glib cannot schedule sub-millisecond timeouts;
/// displays wider than `PERIOD_MS` pixels just sweep a little slower.
pub fn repaint_interval_ms(width: i32) -> u32 {
    assert!(width > 0, "repaint interval requires a positive width");
    (PERIOD_MS / width as u32).max(1)
}

/// Pure sweep math: bar offset, drawable width and the derived repaint
/// interval. Kept free of GTK state so the wrap and rescale behaviour is
/// unit-testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepState {
    offset_px: u32,
    width: i32,
    interval_ms: u32,
}

impl SweepState {
    pub fn new() -> Self {
        Self {
            offset_px: 0,
            width: 0,
            interval_ms: 0,
        }
    }

    pub fn offset_px(&self) -> u32 {
        self.offset_px
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Advance the bar by one pixel, wrapping at the right edge.
    pub fn tick(&mut self) {
        assert!(self.width > 0, "sweep tick before first size allocation");
        self.offset_px = (self.offset_px + 1) % self.width as u32;
    }

    /// Record a newly observed drawable width.
    ///
    /// Returns `true` when the width actually changed, in which case the
    /// caller must rebuild the gradient pattern and repaint timer. A
    /// notification carrying the stored width is a complete no-op.
    ///
    /// On a real change the offset is rescaled proportionally so the bar
    /// keeps its relative screen position across a resize; on the first
    /// observation it starts at the left edge.
    pub fn observe_width(&mut self, new_width: i32) -> bool {
        assert!(new_width > 0, "drawable width must be positive");
        if new_width == self.width {
            return false;
        }
        if self.width > 0 {
            self.offset_px =
                (self.offset_px as u64 * new_width as u64 / self.width as u64) as u32;
        } else {
            self.offset_px = 0;
        }
        self.width = new_width;
        self.interval_ms = repaint_interval_ms(new_width);
        true
    }
}

impl Default for SweepState {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the sweep state, the cached gradient pattern and the repaint
/// timer. All access happens on the GTK main thread via `Rc<RefCell<_>>`.
pub struct Animator {
    area: DrawingArea,
    state: SweepState,
    pattern: Option<LinearGradient>,
    repaint_timer: Option<glib::SourceId>,
}

impl Animator {
    /// Create the animator and install it as the area's draw func.
    ///
    /// Nothing is scheduled yet; the first paint event initializes the
    /// width, the pattern and the repaint timer.
    pub fn attach(area: &DrawingArea) -> Rc<RefCell<Animator>> {
        let animator = Rc::new(RefCell::new(Animator {
            area: area.clone(),
            state: SweepState::new(),
            pattern: None,
            repaint_timer: None,
        }));

        let animator_for_draw = animator.clone();
        area.set_draw_func(move |_, cr, width, _height| {
            if width <= 0 {
                return;
            }
            Animator::on_draw(&animator_for_draw, cr, width);
        });

        animator
    }

    fn on_draw(this: &Rc<RefCell<Animator>>, cr: &Context, width: i32) {
        {
            let mut animator = this.borrow_mut();
            if animator.state.observe_width(width) {
                animator.rebuild(this);
            }
        }

        if let Err(e) = this.borrow().paint(cr) {
            warn!("Sweep paint failed: {}", e);
        }
    }

    /// Rebuild the cached pattern and repaint timer for the current
    /// width. The previous timer is removed first, so at most one repaint
    /// timer is ever live.
    fn rebuild(&mut self, this: &Rc<RefCell<Animator>>) {
        if let Some(id) = self.repaint_timer.take() {
            id.remove();
        }

        let interval = self.state.interval_ms();
        debug!(
            "Drawable is {}px wide, advancing every {}ms",
            self.state.width(),
            interval
        );

        let animator = this.clone();
        self.repaint_timer = Some(glib::timeout_add_local(
            Duration::from_millis(interval as u64),
            move || {
                let mut animator = animator.borrow_mut();
                animator.state.tick();
                animator.area.queue_draw();
                glib::ControlFlow::Continue
            },
        ));

        self.pattern = Some(gradient::bar_pattern(self.state.width()));
    }

    /// Paint one frame: translate by the current offset and fill with the
    /// repeating pattern. The pattern is pre-scaled to pixel width, so no
    /// scale transform is needed here.
    fn paint(&self, cr: &Context) -> Result<(), cairo::Error> {
        let Some(pattern) = self.pattern.as_ref() else {
            return Ok(());
        };
        cr.translate(self.state.offset_px() as f64, 0.0);
        cr.set_source(pattern)?;
        cr.paint()?;
        Ok(())
    }

    /// Cancel the repaint timer and drop the cached pattern. Idempotent;
    /// the window close path funnels through here.
    pub fn teardown(&mut self) {
        if let Some(id) = self.repaint_timer.take() {
            id.remove();
        }
        self.pattern = None;
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a state mid-sweep without going through a draw event.
    fn state_at(offset_px: u32, width: i32) -> SweepState {
        let mut state = SweepState::new();
        assert!(state.observe_width(width));
        for _ in 0..offset_px {
            state.tick();
        }
        assert_eq!(state.offset_px(), offset_px);
        state
    }

    #[test]
    fn test_tick_cycles_with_period_equal_to_width() {
        for width in [1, 2, 5, 800] {
            for start in [0, (width as u32).saturating_sub(1)] {
                let mut state = state_at(start, width);
                let mut seen = vec![false; width as usize];
                for _ in 0..width {
                    state.tick();
                    assert!(state.offset_px() < width as u32);
                    assert!(
                        !seen[state.offset_px() as usize],
                        "offset repeated before a full cycle"
                    );
                    seen[state.offset_px() as usize] = true;
                }
                assert_eq!(state.offset_px(), start);
            }
        }
    }

    #[test]
    fn test_interval_truncates_and_clamps() {
        assert_eq!(repaint_interval_ms(800), 5);
        assert_eq!(repaint_interval_ms(1366), 2); // 4000 / 1366 = 2.93 -> 2
        assert_eq!(repaint_interval_ms(4000), 1);
        assert_eq!(repaint_interval_ms(5120), 1); // clamped to glib's floor
    }

    #[test]
    fn test_first_observation_starts_at_left_edge() {
        let mut state = SweepState::new();
        assert_eq!(state.width(), 0);
        assert!(state.observe_width(800));
        assert_eq!(state.offset_px(), 0);
        assert_eq!(state.width(), 800);
        assert_eq!(state.interval_ms(), 5);
    }

    #[test]
    fn test_resize_rescales_offset_proportionally() {
        let mut state = state_at(400, 800);
        assert!(state.observe_width(1600));
        assert_eq!(state.offset_px(), 800);
        assert_eq!(state.interval_ms(), repaint_interval_ms(1600));
    }

    #[test]
    fn test_rescale_floors_and_stays_in_range() {
        let mut state = state_at(2, 3);
        assert!(state.observe_width(4));
        assert_eq!(state.offset_px(), 2); // floor(2 * 4 / 3)
        assert!(state.offset_px() < 4);

        // Shrinking keeps the offset inside the new width
        let mut state = state_at(799, 800);
        assert!(state.observe_width(100));
        assert!(state.offset_px() < 100);
        assert_eq!(state.offset_px(), 99);
    }

    #[test]
    fn test_same_width_notification_is_noop() {
        let mut state = state_at(123, 800);
        let before = state;
        assert!(!state.observe_width(800));
        assert_eq!(state, before);
    }

    #[test]
    fn test_full_sweep_returns_to_start() {
        // width=800, PERIOD_MS=4000 -> 5ms interval, 800 ticks per sweep
        let mut state = state_at(0, 800);
        assert_eq!(state.interval_ms(), 5);
        for _ in 0..800 {
            state.tick();
        }
        assert_eq!(state.offset_px(), 0);
    }

    #[test]
    fn test_rescale_does_not_overflow_wide_displays() {
        let mut state = state_at(7679, 7680);
        assert!(state.observe_width(1_000_000));
        assert!(state.offset_px() < 1_000_000);
    }
}
