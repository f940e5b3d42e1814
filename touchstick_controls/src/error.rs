// Copyright 2026 the Touchstick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for control configuration and the control registry.

use core::fmt;

use kurbo::Rect;

use crate::ControlId;

/// A control was configured with unusable geometry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A radius was zero, negative, or not finite.
    InvalidRadius(f64),
    /// An area had a non-finite coordinate.
    NonFiniteArea(Rect),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRadius(radius) => {
                write!(f, "radius must be finite and positive, got {radius}")
            }
            Self::NonFiniteArea(area) => write!(f, "area {area:?} has non-finite coordinates"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// An operation on [`MobileControls`](crate::MobileControls) could not be performed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlsError {
    /// The container has been torn down.
    Destroyed,
    /// No control is registered under this id.
    UnknownControl(ControlId),
}

impl fmt::Display for ControlsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Destroyed => f.write_str("controls have been destroyed"),
            Self::UnknownControl(id) => write!(f, "no control registered at index {}", id.index()),
        }
    }
}

impl core::error::Error for ControlsError {}

pub(crate) fn check_radius(radius: f64) -> Result<f64, ConfigError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(ConfigError::InvalidRadius(radius))
    }
}

/// Validates `area` and normalizes it so `x0 <= x1` and `y0 <= y1`.
pub(crate) fn check_area(area: Rect) -> Result<Rect, ConfigError> {
    if area.is_finite() {
        Ok(area.abs())
    } else {
        Err(ConfigError::NonFiniteArea(area))
    }
}
