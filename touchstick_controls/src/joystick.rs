// Copyright 2026 the Touchstick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static joystick: continuous angle/force from the owning touch.

use kurbo::{Point, Size, Vec2};
use log::{debug, trace};
use touchstick_event::EventHub;
use touchstick_timing::{DEFAULT_FADE_MS, Fade, FadeSlot};

use crate::error::check_radius;
use crate::{ConfigError, Control, ControlView, Frame, JoystickView, Touch, TouchId};

/// Dial radius of a joystick created with [`Joystick::new`].
pub const DEFAULT_JOYSTICK_RADIUS: f64 = 50.0;

/// How far beyond the dial a touch can land and still grab the joystick.
pub const CAPTURE_MARGIN: f64 = 30.0;

/// Radius of the knob drawn inside the dial.
pub const KNOB_RADIUS: f64 = 20.0;

/// How long the knob takes to spring back after release, in milliseconds.
pub const RELEASE_FADE_MS: u64 = DEFAULT_FADE_MS;

/// Construction parameters for a [`Joystick`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JoystickConfig {
    /// Radius of the dial; a touch this far from the center is full force.
    pub radius: f64,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_JOYSTICK_RADIUS,
        }
    }
}

impl JoystickConfig {
    /// Sets the dial radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Checks that the geometry is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_radius(self.radius).map(|_| ())
    }
}

/// An analog stick fixed in place.
///
/// While a touch owns the joystick, [`Joystick::angle`] is the direction from
/// the center to the touch and [`Joystick::force`] the distance in dial radii,
/// clamped to `1.0`. On release the force drops to zero at once, while
/// [`Joystick::displayed_force`] (what the knob shows) decays to zero over
/// [`RELEASE_FADE_MS`], resumed through [`Control::animate`].
#[derive(Debug)]
pub struct Joystick {
    position: Point,
    radius: f64,
    enabled: bool,
    angle: f64,
    force: f64,
    displayed_force: f64,
    touch_identifier: Option<TouchId>,
    release: FadeSlot,
    destroyed: bool,
    on_change: EventHub,
}

impl Joystick {
    /// Creates a joystick with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid(JoystickConfig::default())
    }

    /// Creates a joystick from `config`.
    pub fn with_config(config: JoystickConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: JoystickConfig) -> Self {
        Self {
            position: Point::ZERO,
            radius: config.radius,
            enabled: true,
            angle: 0.0,
            force: 0.0,
            displayed_force: 0.0,
            touch_identifier: None,
            release: FadeSlot::new(),
            destroyed: false,
            on_change: EventHub::new(),
        }
    }

    /// Direction of the stick in radians, as `atan2(dy, dx)`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Deflection of the stick, `0.0..=1.0`.
    #[must_use]
    pub fn force(&self) -> f64 {
        self.force
    }

    /// Deflection shown by the knob; trails [`Joystick::force`] during the release fade.
    #[must_use]
    pub fn displayed_force(&self) -> f64 {
        self.displayed_force
    }

    /// Stick deflection as a vector of length [`Joystick::force`].
    #[must_use]
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle) * self.force
    }

    /// Dial radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance from the center within which a touch grabs the joystick.
    #[must_use]
    pub fn capture_radius(&self) -> f64 {
        self.radius + CAPTURE_MARGIN
    }

    /// Whether a touch currently owns the joystick.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.touch_identifier.is_some()
    }

    /// Whether the release fade is still running.
    #[must_use]
    pub fn is_releasing(&self) -> bool {
        self.release.is_pending()
    }

    pub(crate) fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub(crate) fn notify(&mut self) {
        self.on_change.notify();
    }

    /// Render state of the joystick.
    #[must_use]
    pub fn joystick_view(&self) -> JoystickView {
        JoystickView {
            visible: self.enabled,
            alpha: 1.0,
            position: self.position,
            radius: self.radius,
            knob_radius: KNOB_RADIUS,
            stick_offset: Vec2::from_angle(self.angle) * (self.displayed_force * self.radius),
        }
    }

    fn release(&mut self, now: u64) {
        self.force = 0.0;
        self.touch_identifier = None;
        if self.displayed_force == 0.0 {
            debug!("joystick released at rest");
            return;
        }
        debug!("joystick released, fading from {}", self.displayed_force);
        self.release
            .start(Fade::new(now, self.displayed_force, RELEASE_FADE_MS));
        self.step_release(now);
    }

    fn step_release(&mut self, now: u64) -> bool {
        if self.destroyed {
            self.release.cancel();
            return false;
        }
        let Some(frame) = self.release.resume(now) else {
            return false;
        };
        if frame.value != self.displayed_force {
            self.displayed_force = frame.value;
            self.on_change.notify();
        }
        if frame.finished {
            trace!("joystick release fade done");
        }
        !frame.finished
    }
}

impl Default for Joystick {
    fn default() -> Self {
        Self::new()
    }
}

impl Control for Joystick {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.on_change.notify();
        }
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn size(&self) -> Size {
        Size::new(self.radius * 2.0, self.radius * 2.0)
    }

    fn touch_identifier(&self) -> Option<TouchId> {
        self.touch_identifier
    }

    fn update(&mut self, touches: &mut [Touch], frame: &Frame<'_>) {
        if self.destroyed {
            return;
        }

        let was_active = self.is_active();
        let old_angle = self.angle;
        let old_force = self.force;
        let mut touching = false;

        if self.enabled {
            // Every eligible touch is claimed; the last one iterated drives the stick.
            for touch in touches.iter_mut() {
                if !frame.claimable(touch) {
                    continue;
                }

                let offset = touch.position - self.position;
                let distance = offset.hypot();
                if Some(touch.identifier) == self.touch_identifier
                    || distance < self.capture_radius()
                {
                    touching = true;
                    self.touch_identifier = Some(touch.identifier);
                    touch.claimed_by = Some(frame.control());
                    self.angle = offset.atan2();
                    self.force = (distance / self.radius).min(1.0);
                }
            }
        }

        if !touching {
            self.touch_identifier = None;
        }

        if was_active && !self.is_active() {
            self.release(frame.now());
        }

        if touching {
            self.displayed_force = self.force;
            if self.release.cancel() {
                trace!("joystick release fade interrupted by new claim");
            }
        }

        if self.angle != old_angle || self.force != old_force {
            self.on_change.notify();
        }
    }

    fn animate(&mut self, now: u64) -> bool {
        self.step_release(now)
    }

    fn on_change(&mut self) -> &mut EventHub {
        &mut self.on_change
    }

    fn view(&self) -> ControlView {
        ControlView::Joystick(self.joystick_view())
    }

    fn teardown(&mut self) {
        self.destroyed = true;
        self.release.cancel();
        self.touch_identifier = None;
    }
}
