// Copyright 2026 the Touchstick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamic joystick: appears under a finger that lands inside its claim area.
//!
//! The joystick is invisible and inert until a touch that is unclaimed, new
//! this frame, and inside the claim area shows up. It then jumps to that touch
//! and behaves like a [`Joystick`] until the touch lifts, after which it fades
//! out over [`RELEASE_FADE_MS`].
//!
//! Only a *new* touch can summon it: a finger that was already down elsewhere
//! and drifts into the claim area is ignored.

use kurbo::{Point, Rect, Size};
use log::{debug, trace};
use touchstick_event::EventHub;
use touchstick_timing::{Fade, FadeSlot};

use crate::error::check_area;
use crate::joystick::{DEFAULT_JOYSTICK_RADIUS, RELEASE_FADE_MS};
use crate::{
    ConfigError, Control, ControlView, Frame, Joystick, JoystickConfig, JoystickView, Touch,
    TouchId,
};

/// Construction parameters for a [`DynamicJoystick`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DynamicJoystickConfig {
    /// Dial radius of the joystick once summoned.
    pub radius: f64,
    /// Region in which a new touch summons the joystick.
    pub claim_area: Rect,
}

impl DynamicJoystickConfig {
    /// Creates a configuration with the default dial radius.
    #[must_use]
    pub fn new(claim_area: Rect) -> Self {
        Self {
            radius: DEFAULT_JOYSTICK_RADIUS,
            claim_area,
        }
    }

    /// Sets the dial radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Checks that the geometry is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        JoystickConfig::default()
            .with_radius(self.radius)
            .validate()?;
        check_area(self.claim_area).map(|_| ())
    }
}

/// A joystick summoned by touches inside a claim area.
#[derive(Debug)]
pub struct DynamicJoystick {
    joystick: Joystick,
    claim_area: Rect,
    alpha: f64,
    fade: FadeSlot,
}

impl DynamicJoystick {
    /// Creates a dynamic joystick with the default dial radius.
    pub fn new(claim_area: Rect) -> Result<Self, ConfigError> {
        Self::with_config(DynamicJoystickConfig::new(claim_area))
    }

    /// Creates a dynamic joystick from `config`.
    pub fn with_config(config: DynamicJoystickConfig) -> Result<Self, ConfigError> {
        let claim_area = check_area(config.claim_area)?;
        let joystick = Joystick::with_config(JoystickConfig {
            radius: config.radius,
        })?;
        Ok(Self {
            joystick,
            claim_area,
            alpha: 0.0,
            fade: FadeSlot::new(),
        })
    }

    /// Region in which a new touch summons the joystick.
    #[must_use]
    pub fn claim_area(&self) -> Rect {
        self.claim_area
    }

    /// Moves the claim area, typically after a resize.
    pub fn set_claim_area(&mut self, claim_area: Rect) -> Result<(), ConfigError> {
        self.claim_area = check_area(claim_area)?;
        Ok(())
    }

    /// Current opacity, `0.0..=1.0`.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Whether a touch currently drives the joystick.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.joystick.is_active()
    }

    /// Whether the fade-out is still running.
    #[must_use]
    pub fn is_fading(&self) -> bool {
        self.fade.is_pending()
    }

    /// The wrapped joystick, for angle and force.
    #[must_use]
    pub fn joystick(&self) -> &Joystick {
        &self.joystick
    }

    /// Render state: the joystick's, with visibility driven by the fade.
    #[must_use]
    pub fn joystick_view(&self) -> JoystickView {
        JoystickView {
            alpha: self.alpha,
            ..self.joystick.joystick_view()
        }
    }

    /// Index of the first unclaimed new touch inside the claim area.
    fn summon(&self, touches: &[Touch], frame: &Frame<'_>) -> Option<usize> {
        touches.iter().position(|touch| {
            frame.claimable(touch)
                && frame.is_new(touch.identifier)
                && self.claim_area.contains(touch.position)
        })
    }

    fn step_fade(&mut self, now: u64) -> bool {
        if self.joystick.is_destroyed() {
            self.fade.cancel();
            return false;
        }
        let Some(frame) = self.fade.resume(now) else {
            return false;
        };
        if frame.value != self.alpha {
            self.alpha = frame.value;
            self.joystick.notify();
        }
        if frame.finished {
            trace!("dynamic joystick hidden");
        }
        !frame.finished
    }
}

impl Control for DynamicJoystick {
    fn enabled(&self) -> bool {
        self.joystick.enabled()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.joystick.set_enabled(enabled);
    }

    fn position(&self) -> Point {
        self.joystick.position()
    }

    fn set_position(&mut self, position: Point) {
        self.joystick.set_position(position);
    }

    fn size(&self) -> Size {
        self.joystick.size()
    }

    fn touch_identifier(&self) -> Option<TouchId> {
        self.joystick.touch_identifier()
    }

    fn update(&mut self, touches: &mut [Touch], frame: &Frame<'_>) {
        if self.joystick.is_destroyed() {
            return;
        }

        let was_active = self.joystick.is_active();
        // The stick follows one touch only: the summoning touch, then its owner.
        let driver = if was_active {
            let owned = self.joystick.touch_identifier();
            touches
                .iter()
                .position(|touch| Some(touch.identifier) == owned)
        } else if self.joystick.enabled() {
            self.summon(touches, frame)
        } else {
            None
        };

        if !was_active && let Some(index) = driver {
            let position = touches[index].position;
            debug!("dynamic joystick summoned at {position:?}");
            self.joystick.set_position(position);
        }

        // Inert unless driven by an owned touch or summoned this frame.
        if was_active || driver.is_some() {
            let driving: &mut [Touch] = match driver {
                Some(index) => core::slice::from_mut(&mut touches[index]),
                None => &mut [],
            };
            self.joystick.update(driving, frame);
        }

        let active = self.joystick.is_active();
        if active && !was_active {
            self.fade.cancel();
            if self.alpha != 1.0 {
                self.alpha = 1.0;
                self.joystick.notify();
            }
        } else if was_active && !active {
            self.fade
                .start(Fade::new(frame.now(), self.alpha, RELEASE_FADE_MS));
            self.step_fade(frame.now());
        }
    }

    fn animate(&mut self, now: u64) -> bool {
        let stick = self.joystick.animate(now);
        let fade = self.step_fade(now);
        stick || fade
    }

    fn on_change(&mut self) -> &mut EventHub {
        self.joystick.on_change()
    }

    fn view(&self) -> ControlView {
        ControlView::Joystick(self.joystick_view())
    }

    fn teardown(&mut self) {
        self.joystick.teardown();
        self.fade.cancel();
    }
}
