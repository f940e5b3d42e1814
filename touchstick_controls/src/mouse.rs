// Copyright 2026 the Touchstick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Desktop pointer adapter.
//!
//! Lets a mouse drive the same controls as fingers: a pressed button becomes a
//! single touch with the reserved [`MouseTouches::IDENTIFIER`]. The host is
//! responsible for mapping pointer coordinates into control space.

use kurbo::Point;
use smallvec::smallvec;

use crate::{Touch, TouchId, TouchList};

/// Converts pointer events into touch lists for
/// [`MobileControls::update_touches`](crate::MobileControls::update_touches).
///
/// ```
/// use kurbo::Point;
/// use touchstick_controls::MouseTouches;
///
/// let mut mouse = MouseTouches::new();
/// assert!(mouse.moved(Point::new(5.0, 5.0)).is_none());
///
/// let touches = mouse.press(Point::new(10.0, 20.0));
/// assert_eq!(touches[0].identifier, MouseTouches::IDENTIFIER);
/// assert!(mouse.moved(Point::new(12.0, 20.0)).is_some());
/// assert!(mouse.release().is_empty());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MouseTouches {
    pressed: bool,
}

impl MouseTouches {
    /// Identifier of the synthetic mouse touch. Negative, so it never collides
    /// with platform touch identifiers.
    pub const IDENTIFIER: TouchId = TouchId(-1);

    /// Creates an adapter with the button up.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the mouse button is held.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Button went down at `position`.
    pub fn press(&mut self, position: Point) -> TouchList {
        self.pressed = true;
        smallvec![Touch::new(Self::IDENTIFIER, position)]
    }

    /// Pointer moved to `position`. Returns `None` while the button is up,
    /// since there is nothing for the controls to update.
    pub fn moved(&mut self, position: Point) -> Option<TouchList> {
        self.pressed
            .then(|| smallvec![Touch::new(Self::IDENTIFIER, position)])
    }

    /// Button went up: the touch set is empty.
    pub fn release(&mut self) -> TouchList {
        self.pressed = false;
        TouchList::new()
    }
}
