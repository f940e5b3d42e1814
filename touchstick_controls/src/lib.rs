// Copyright 2026 the Touchstick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=touchstick_controls --heading-base-level=0

//! Touchstick Controls: on-screen buttons and joysticks driven by touches.
//!
//! Several virtual controls share one touch surface. Every frame the host hands
//! the full set of active touches to [`MobileControls::update_touches`], which
//! decides which control owns which finger:
//!
//! - A touch belongs to at most one control at a time.
//! - Once claimed, a touch stays with its control until the finger lifts, even
//!   if it slides across another control.
//! - Contested new touches go to the control registered first.
//! - When a finger lifts, its claim is dropped in the same frame.
//!
//! Three controls are provided:
//!
//! - [`Button`]: a down/up state with click events and an optional rectangular
//!   hit region.
//! - [`Joystick`]: a fixed dial reporting angle and force, with a timed knob
//!   return after release.
//! - [`DynamicJoystick`]: a joystick that appears under a new finger inside a
//!   claim area and fades out after release.
//!
//! Custom controls implement [`Control`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use touchstick_controls::{Button, Control, Joystick, MobileControls, Touch, TouchId};
//!
//! let mut controls = MobileControls::new();
//!
//! let mut stick = Joystick::new();
//! stick.set_position(Point::new(100.0, 300.0));
//! let stick = controls.add(stick).unwrap();
//!
//! let mut jump = Button::new();
//! jump.set_position(Point::new(700.0, 300.0));
//! let jump = controls.add(jump).unwrap();
//!
//! // Two fingers land: one on the stick, one on the button.
//! let mut touches = [
//!     Touch::new(TouchId(1), Point::new(125.0, 300.0)),
//!     Touch::new(TouchId(2), Point::new(700.0, 300.0)),
//! ];
//! controls.update_touches(&mut touches, 0);
//!
//! assert_eq!(touches[0].claimed_by, Some(stick.id()));
//! assert_eq!(touches[1].claimed_by, Some(jump.id()));
//! assert_eq!(controls.get(stick).unwrap().force(), 0.5);
//! assert!(controls.get(jump).unwrap().is_down());
//! ```
//!
//! ## Frames and animation
//!
//! Touchstick has no clock and no timers. `update_touches` takes the host time
//! in milliseconds, and release animations advance only when the host calls
//! [`MobileControls::animate`] from its frame loop; it returns `true` while more
//! frames are wanted. Rendering is equally external: each control describes
//! itself through [`Control::view`], and [`MobileControls::take_repaint`] says
//! whether anything changed since the last paint.
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo's `std` feature.
//! - `libm`: forwards to Kurbo's `libm` feature for `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod button;
mod control;
mod controls;
mod dynamic_joystick;
mod error;
mod joystick;
pub mod layout;
mod mouse;
mod touch;
mod view;

pub use button::{Button, ButtonConfig, DEFAULT_BUTTON_RADIUS};
pub use control::Control;
pub use controls::{ControlHandle, MobileControls};
pub use dynamic_joystick::{DynamicJoystick, DynamicJoystickConfig};
pub use error::{ConfigError, ControlsError};
pub use joystick::{
    CAPTURE_MARGIN, DEFAULT_JOYSTICK_RADIUS, Joystick, JoystickConfig, KNOB_RADIUS,
    RELEASE_FADE_MS,
};
pub use mouse::MouseTouches;
pub use touch::{ClaimMap, ControlId, Frame, Touch, TouchId, TouchList, TouchSet};
pub use view::{ButtonView, ControlView, IconId, JoystickView, Tint};
