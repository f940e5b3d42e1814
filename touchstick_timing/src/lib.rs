// Copyright 2026 the Touchstick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touchstick Timing: host-clock fades for release animations.
//!
//! Virtual controls keep animating after the touch that drove them is gone: a
//! joystick knob springs back to center, a dynamic joystick fades out. Those
//! animations are modelled here as plain data resumed once per host frame,
//! rather than as callbacks scheduled on a platform animation loop.
//!
//! - [`Fade`] describes a linear decay from a starting value down to zero over a
//!   fixed window. Progress is derived from the captured start time and the
//!   caller's clock, so variable frame rates do not stretch the animation.
//! - [`FadeSlot`] holds at most one in-flight [`Fade`] for its owner. Starting a
//!   new fade supersedes the old one, and [`FadeSlot::cancel`] drops it
//!   deterministically.
//!
//! Timestamps are host milliseconds (`u64`), the same unit hosts feed into the
//! touch update pass.
//!
//! ## Minimal example
//!
//! ```rust
//! use touchstick_timing::{Fade, FadeSlot};
//!
//! let mut slot = FadeSlot::new();
//! slot.start(Fade::new(1_000, 0.8, 200));
//!
//! // Halfway through the window the value has decayed by half.
//! let frame = slot.resume(1_100).unwrap();
//! assert!((frame.value - 0.4).abs() < 1e-9);
//! assert!(!frame.finished);
//!
//! // At the end of the window the value is exactly zero and the slot empties.
//! let frame = slot.resume(1_200).unwrap();
//! assert_eq!(frame.value, 0.0);
//! assert!(frame.finished);
//! assert!(slot.resume(1_216).is_none());
//! ```
//!
//! This crate is `no_std` and has no dependencies.

#![no_std]

/// Length of the release fades used by the built-in controls, in milliseconds.
pub const DEFAULT_FADE_MS: u64 = 200;

/// A linear decay of a value to zero over a fixed wall-clock window.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fade {
    start: u64,
    from: f64,
    duration: u64,
}

impl Fade {
    /// Creates a fade starting at `start` (host milliseconds) from `from` down to zero.
    ///
    /// A zero `duration` finishes on the first resumption.
    #[must_use]
    pub const fn new(start: u64, from: f64, duration: u64) -> Self {
        Self {
            start,
            from,
            duration,
        }
    }

    /// Host time at which the fade started.
    #[must_use]
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Value the fade started from.
    #[must_use]
    pub const fn initial(&self) -> f64 {
        self.from
    }

    /// Length of the fade window in milliseconds.
    #[must_use]
    pub const fn duration(&self) -> u64 {
        self.duration
    }

    /// Fraction of the window elapsed at `now`, clamped to `0.0..=1.0`.
    ///
    /// A clock reading earlier than the start time counts as no progress.
    #[must_use]
    pub fn progress(&self, now: u64) -> f64 {
        if self.duration == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed as f64 / self.duration as f64).min(1.0)
    }

    /// Samples the fade at `now`.
    #[must_use]
    pub fn sample(&self, now: u64) -> FadeFrame {
        let progress = self.progress(now);
        let finished = progress >= 1.0;
        // Pin the end value so callers can compare against exactly zero.
        let value = if finished {
            0.0
        } else {
            (0.0 - self.from) * progress + self.from
        };
        FadeFrame {
            value,
            progress,
            finished,
        }
    }
}

/// One resumption of a [`Fade`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FadeFrame {
    /// The faded value at this resumption.
    pub value: f64,
    /// Fraction of the fade window elapsed, `0.0..=1.0`.
    pub progress: f64,
    /// `true` once the window has elapsed; no further resumptions follow.
    pub finished: bool,
}

/// Holds at most one in-flight [`Fade`].
///
/// The owner calls [`FadeSlot::resume`] once per host frame while
/// [`FadeSlot::is_pending`] reports `true`. Once the fade finishes, or is
/// cancelled, the slot is empty and resumption yields `None`.
#[derive(Clone, Debug, Default)]
pub struct FadeSlot {
    pending: Option<Fade>,
}

impl FadeSlot {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Starts `fade`, superseding any fade already in flight.
    pub fn start(&mut self, fade: Fade) {
        self.pending = Some(fade);
    }

    /// Drops the in-flight fade, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Returns `true` while a fade is waiting for its next resumption.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The fade currently in flight.
    #[must_use]
    pub const fn pending(&self) -> Option<&Fade> {
        self.pending.as_ref()
    }

    /// Resumes the in-flight fade at `now`.
    ///
    /// Returns `None` when nothing is pending. The slot empties itself on the
    /// resumption that reports [`FadeFrame::finished`].
    pub fn resume(&mut self, now: u64) -> Option<FadeFrame> {
        let fade = self.pending?;
        let frame = fade.sample(now);
        if frame.finished {
            self.pending = None;
        }
        Some(frame)
    }
}
