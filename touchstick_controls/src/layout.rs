// Copyright 2026 the Touchstick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement helpers for groups of controls.
//!
//! These are plain geometry: they move the listed controls and request a
//! repaint, nothing more. Disabled controls are skipped and leave no gap.
//! Every id is checked before anything moves, so a failed call changes nothing.

use core::f64::consts::TAU;

use kurbo::{Point, Vec2};

use crate::{ControlId, ControlsError, MobileControls};

/// Places the enabled controls of `ids` on a line from `origin`, `step` apart.
pub fn linear(
    controls: &mut MobileControls,
    ids: &[ControlId],
    origin: Point,
    step: Vec2,
) -> Result<(), ControlsError> {
    place(controls, ids, |slot, _| origin + step * slot as f64)
}

/// Places the enabled controls of `ids` evenly around a full circle.
///
/// The first enabled control sits at `start_angle` (radians, measured like
/// `atan2`); the rest follow at equal steps.
pub fn radial(
    controls: &mut MobileControls,
    ids: &[ControlId],
    center: Point,
    radius: f64,
    start_angle: f64,
) -> Result<(), ControlsError> {
    place(controls, ids, |slot, count| {
        let angle = start_angle + TAU * slot as f64 / count as f64;
        center + Vec2::from_angle(angle) * radius
    })
}

/// Places the enabled controls of `ids` on a circle, `step_angle` radians apart.
pub fn radial_arc(
    controls: &mut MobileControls,
    ids: &[ControlId],
    center: Point,
    radius: f64,
    start_angle: f64,
    step_angle: f64,
) -> Result<(), ControlsError> {
    place(controls, ids, |slot, _| {
        center + Vec2::from_angle(start_angle + step_angle * slot as f64) * radius
    })
}

/// Moves the `slot`th of `count` enabled controls to `position(slot, count)`.
fn place(
    controls: &mut MobileControls,
    ids: &[ControlId],
    position: impl Fn(usize, usize) -> Point,
) -> Result<(), ControlsError> {
    if controls.is_destroyed() {
        return Err(ControlsError::Destroyed);
    }
    let mut count = 0;
    for &id in ids {
        let control = controls
            .control(id)
            .ok_or(ControlsError::UnknownControl(id))?;
        if control.enabled() {
            count += 1;
        }
    }

    let mut slot = 0;
    for &id in ids {
        let Some(control) = controls.control_mut(id) else {
            continue;
        };
        if !control.enabled() {
            continue;
        }
        control.set_position(position(slot, count));
        slot += 1;
    }
    controls.repaint_flag().mark();
    Ok(())
}
