// Copyright 2026 the Touchstick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-facing snapshots of control state.
//!
//! Touchstick does not draw. Each control describes itself as a small value
//! type that a rendering backend turns into shapes; the backend repaints when
//! the container's repaint flag is set.

use kurbo::{Point, Vec2};

/// Opaque handle to an application-provided icon texture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct IconId(pub u32);

/// Two-tone tint used by button parts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tint {
    /// White.
    Light,
    /// Black.
    Dark,
}

/// What to draw for a control.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ControlView {
    /// A round or rectangular push button.
    Button(ButtonView),
    /// A joystick dial with a movable knob.
    Joystick(JoystickView),
}

impl ControlView {
    /// Whether anything should be drawn at all.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        match self {
            Self::Button(view) => view.visible,
            Self::Joystick(view) => view.visible && view.alpha > 0.0,
        }
    }
}

/// Render state of a [`Button`](crate::Button).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ButtonView {
    /// Hidden while the button is disabled.
    pub visible: bool,
    /// Center of the button.
    pub position: Point,
    /// Radius of the button disc.
    pub radius: f64,
    /// Icon drawn over the disc.
    pub icon: Option<IconId>,
    /// Tint of the disc: light while down.
    pub shape_tint: Tint,
    /// Tint of the icon: dark while down.
    pub icon_tint: Tint,
    /// Whether the hover outline is shown.
    pub outline_visible: bool,
}

/// Render state of a [`Joystick`](crate::Joystick) or [`DynamicJoystick`](crate::DynamicJoystick).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JoystickView {
    /// Hidden while the joystick is disabled.
    pub visible: bool,
    /// Opacity of the whole joystick, `0.0..=1.0`.
    pub alpha: f64,
    /// Center of the dial.
    pub position: Point,
    /// Radius of the dial.
    pub radius: f64,
    /// Radius of the knob.
    pub knob_radius: f64,
    /// Knob offset from the dial center.
    pub stick_offset: Vec2,
}
