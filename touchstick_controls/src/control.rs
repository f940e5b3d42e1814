// Copyright 2026 the Touchstick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability interface shared by every control.

use core::any::Any;
use core::fmt::Debug;

use kurbo::{Point, Size};
use touchstick_event::EventHub;

use crate::{ControlView, Frame, Touch, TouchId};

/// A virtual control that can claim touches.
///
/// Controls are registered on [`MobileControls`](crate::MobileControls), which
/// calls [`Control::update`] once per frame in registration order, and
/// [`Control::animate`] once per host animation frame.
///
/// Implementations must not claim a touch that is held by a different control
/// (see [`Frame::claimable`]), and must notify [`Control::on_change`] whenever
/// their rendered state changes and only then.
pub trait Control: Any + Debug {
    /// Whether the control takes part in arbitration and is shown.
    fn enabled(&self) -> bool;

    /// Enables or disables the control, notifying on change.
    fn set_enabled(&mut self, enabled: bool);

    /// Center of the control in control space.
    fn position(&self) -> Point;

    /// Moves the control. Layout moves do not notify; callers that lay out
    /// controls request a repaint themselves.
    fn set_position(&mut self, position: Point);

    /// Visual footprint of the control.
    fn size(&self) -> Size;

    /// Identifier of the touch currently driving the control, if any.
    fn touch_identifier(&self) -> Option<TouchId>;

    /// Runs one frame of touch processing.
    ///
    /// `touches` is the full touch set of the frame. A control claims a touch
    /// by writing its own id ([`Frame::control`]) into
    /// [`Touch::claimed_by`].
    fn update(&mut self, touches: &mut [Touch], frame: &Frame<'_>);

    /// Resumes any pending release animation at host time `now`.
    ///
    /// Returns `true` if the control wants to be resumed again next frame.
    fn animate(&mut self, now: u64) -> bool {
        let _ = now;
        false
    }

    /// Change notification hub. Fires whenever the rendered state changes.
    fn on_change(&mut self) -> &mut EventHub;

    /// Snapshot of what a renderer should draw for this control.
    fn view(&self) -> ControlView;

    /// Returns `true` if a hovering pointer at `point` targets this control.
    fn hover_contains(&self, point: Point) -> bool {
        let _ = point;
        false
    }

    /// Shows or hides the hover affordance. Controls without one ignore this.
    fn set_hovered(&mut self, hovered: bool) {
        let _ = hovered;
    }

    /// Cancels pending animations and stops the control from notifying.
    ///
    /// Called once when the owning container is destroyed.
    fn teardown(&mut self) {}
}
