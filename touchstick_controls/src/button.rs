// Copyright 2026 the Touchstick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Push button: a binary up/down state machine over a hit region.
//!
//! ## Claim rule
//!
//! Each frame, for every touch not held by another control:
//!
//! - the touch that is already pressing the button keeps it pressed while it
//!   stays inside the hit region, or anywhere if [`Button::retains_touches`];
//! - any other touch presses the button only if it is inside the hit region
//!   *and* new this frame, so a finger sliding in from elsewhere does not press.
//!
//! With no qualifying touch the button is up.
//!
//! ## Clicks
//!
//! A click fires when the finger that pressed the button lifts. With retention
//! on, that is the down → up edge caused by the identifier vanishing from the
//! touch set; dragging out never releases. With retention off, dragging out
//! raises the button without a click but keeps the press armed: dragging back
//! in presses again, and lifting anywhere clicks once.

use kurbo::{Point, Rect, Size};
use log::debug;
use touchstick_event::EventHub;

use crate::error::{check_area, check_radius};
use crate::{
    ButtonView, ConfigError, Control, ControlView, Frame, IconId, Tint, Touch, TouchId,
};

/// Radius of a button created with [`Button::new`].
pub const DEFAULT_BUTTON_RADIUS: f64 = 35.0;

/// Construction parameters for a [`Button`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ButtonConfig {
    /// Icon drawn over the button.
    pub icon: Option<IconId>,
    /// Radius of the button disc, also the hit radius without a touch area.
    pub radius: f64,
    /// Whether a pressing touch keeps the button down after leaving it.
    pub retains_touches: bool,
    /// Explicit rectangular hit region, replacing the disc.
    pub touch_area: Option<Rect>,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            icon: None,
            radius: DEFAULT_BUTTON_RADIUS,
            retains_touches: true,
            touch_area: None,
        }
    }
}

impl ButtonConfig {
    /// Sets the icon.
    #[must_use]
    pub fn with_icon(mut self, icon: IconId) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Sets the radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets touch retention.
    #[must_use]
    pub fn with_retains_touches(mut self, retains_touches: bool) -> Self {
        self.retains_touches = retains_touches;
        self
    }

    /// Sets an explicit rectangular hit region.
    #[must_use]
    pub fn with_touch_area(mut self, touch_area: Rect) -> Self {
        self.touch_area = Some(touch_area);
        self
    }

    /// Checks that the geometry is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_radius(self.radius)?;
        if let Some(area) = self.touch_area {
            check_area(area)?;
        }
        Ok(())
    }
}

/// A push button.
#[derive(Debug)]
pub struct Button {
    position: Point,
    radius: f64,
    icon: Option<IconId>,
    retains_touches: bool,
    touch_area: Option<Rect>,
    enabled: bool,
    hovered: bool,
    is_down: bool,
    touch_identifier: Option<TouchId>,
    /// Touch that started the current press; outlives `touch_identifier` when
    /// a non-retaining button is dragged off.
    pressed: Option<TouchId>,
    on_down_state_changed: EventHub<bool>,
    on_click: EventHub,
    on_change: EventHub,
}

impl Button {
    /// Creates a button with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid(ButtonConfig::default())
    }

    /// Creates a button from `config`.
    pub fn with_config(config: ButtonConfig) -> Result<Self, ConfigError> {
        check_radius(config.radius)?;
        let touch_area = config.touch_area.map(check_area).transpose()?;
        Ok(Self::from_valid(ButtonConfig {
            touch_area,
            ..config
        }))
    }

    fn from_valid(config: ButtonConfig) -> Self {
        Self {
            position: Point::ZERO,
            radius: config.radius,
            icon: config.icon,
            retains_touches: config.retains_touches,
            touch_area: config.touch_area,
            enabled: true,
            hovered: false,
            is_down: false,
            touch_identifier: None,
            pressed: None,
            on_down_state_changed: EventHub::new(),
            on_click: EventHub::new(),
            on_change: EventHub::new(),
        }
    }

    /// Whether the button is currently pressed.
    #[must_use]
    pub fn is_down(&self) -> bool {
        self.is_down
    }

    /// Whether the hover outline is shown.
    #[must_use]
    pub fn hovered(&self) -> bool {
        self.hovered
    }

    /// Radius of the button disc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Icon drawn over the button.
    #[must_use]
    pub fn icon(&self) -> Option<IconId> {
        self.icon
    }

    /// Whether a pressing touch keeps the button down after leaving it.
    #[must_use]
    pub fn retains_touches(&self) -> bool {
        self.retains_touches
    }

    /// Sets touch retention. Takes effect on the next update.
    pub fn set_retains_touches(&mut self, retains_touches: bool) {
        self.retains_touches = retains_touches;
    }

    /// Explicit rectangular hit region, if set.
    #[must_use]
    pub fn touch_area(&self) -> Option<Rect> {
        self.touch_area
    }

    /// Replaces the hit region; `None` falls back to the disc.
    pub fn set_touch_area(&mut self, touch_area: Option<Rect>) -> Result<(), ConfigError> {
        self.touch_area = touch_area.map(check_area).transpose()?;
        Ok(())
    }

    /// Fires with the new down state on every down/up edge.
    pub fn on_down_state_changed(&mut self) -> &mut EventHub<bool> {
        &mut self.on_down_state_changed
    }

    /// Fires when the finger that pressed the button lifts.
    pub fn on_click(&mut self) -> &mut EventHub {
        &mut self.on_click
    }

    /// Signals that the icon texture changed and the button must repaint.
    pub fn icon_updated(&mut self) {
        self.on_change.notify();
    }

    /// Returns `true` if `point` is inside the hit region.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        match self.touch_area {
            Some(area) => area.contains(point),
            None => self.position.distance(point) < self.radius,
        }
    }

    /// Render state of the button.
    #[must_use]
    pub fn button_view(&self) -> ButtonView {
        ButtonView {
            visible: self.enabled,
            position: self.position,
            radius: self.radius,
            icon: self.icon,
            shape_tint: if self.is_down { Tint::Light } else { Tint::Dark },
            icon_tint: if self.is_down { Tint::Dark } else { Tint::Light },
            outline_visible: self.hovered,
        }
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}

impl Control for Button {
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
        let was_down = self.is_down;
        let pressed = self.pressed;
        let owned = self.touch_identifier.or(pressed);
        let pressed_present = pressed.is_some_and(|id| touches.iter().any(|t| t.identifier == id));
        let mut touched = None;

        if self.enabled {
            for touch in touches.iter_mut() {
                if !frame.claimable(touch) {
                    continue;
                }

                let contained = self.contains(touch.position);
                let claim = if Some(touch.identifier) == owned {
                    self.retains_touches || contained
                } else {
                    contained && frame.is_new(touch.identifier)
                };

                if claim || Some(touch.identifier) == pressed {
                    // An armed press keeps its claim even while up.
                    touch.claimed_by = Some(frame.control());
                }
                if claim {
                    touched = Some(touch.identifier);
                }
            }
        }

        self.touch_identifier = touched;
        self.is_down = touched.is_some();

        // A lifted finger clicks; disabling cancels the press instead.
        let lifted = self.enabled && pressed.is_some() && !pressed_present;
        self.pressed = match touched {
            Some(id) if self.enabled => Some(id),
            None if self.enabled && pressed_present => pressed,
            _ => None,
        };

        if self.is_down != was_down {
            debug!(
                "button {:?} {}",
                frame.control(),
                if self.is_down { "down" } else { "up" }
            );
            self.on_down_state_changed.emit(&self.is_down);
            if lifted && !self.is_down {
                self.on_click.notify();
            }
            self.on_change.notify();
        } else if lifted && !self.is_down {
            debug!("button {:?} clicked after drag-off", frame.control());
            self.on_click.notify();
        }
    }

    fn on_change(&mut self) -> &mut EventHub {
        &mut self.on_change
    }

    fn view(&self) -> ControlView {
        ControlView::Button(self.button_view())
    }

    fn hover_contains(&self, point: Point) -> bool {
        self.contains(point)
    }

    fn set_hovered(&mut self, hovered: bool) {
        if self.hovered != hovered {
            self.hovered = hovered;
            self.on_change.notify();
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::Cell;

    use super::*;
    use crate::{ControlHandle, MobileControls, TouchList};

    fn counter() -> (Rc<Cell<u32>>, impl FnMut(&()) + 'static) {
        let count = Rc::new(Cell::new(0));
        let sink = {
            let count = count.clone();
            move |_: &()| count.set(count.get() + 1)
        };
        (count, sink)
    }

    fn touch(id: i64, x: f64, y: f64) -> Touch {
        Touch::new(TouchId(id), Point::new(x, y))
    }

    fn setup(config: ButtonConfig) -> (MobileControls, ControlHandle<Button>, Rc<Cell<u32>>) {
        let mut controls = MobileControls::new();
        let mut button = Button::with_config(config).unwrap();
        button.set_position(Point::new(100.0, 100.0));
        let (clicks, sink) = counter();
        button.on_click().listen(sink);
        let handle = controls.add(button).unwrap();
        (controls, handle, clicks)
    }

    fn frame(controls: &mut MobileControls, touches: &[Touch], now: u64) -> TouchList {
        let mut touches: TouchList = touches.iter().copied().collect();
        controls.update_touches(&mut touches, now);
        touches
    }

    #[test]
    fn press_and_release_inside_clicks_once() {
        let (mut controls, handle, clicks) = setup(ButtonConfig::default());

        let touches = frame(&mut controls, &[touch(1, 100.0, 100.0)], 0);
        assert!(controls.get(handle).unwrap().is_down());
        assert_eq!(touches[0].claimed_by, Some(handle.id()));

        frame(&mut controls, &[], 16);
        assert!(!controls.get(handle).unwrap().is_down());
        assert_eq!(clicks.get(), 1);

        frame(&mut controls, &[], 32);
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn touch_sliding_in_does_not_press() {
        let (mut controls, handle, _) = setup(ButtonConfig::default());

        frame(&mut controls, &[touch(1, 300.0, 300.0)], 0);
        frame(&mut controls, &[touch(1, 100.0, 100.0)], 16);

        assert!(!controls.get(handle).unwrap().is_down());
    }

    #[test]
    fn retained_touch_stays_down_outside() {
        let (mut controls, handle, clicks) = setup(ButtonConfig::default());

        frame(&mut controls, &[touch(1, 100.0, 100.0)], 0);
        frame(&mut controls, &[touch(1, 400.0, 100.0)], 16);
        assert!(controls.get(handle).unwrap().is_down());
        assert_eq!(clicks.get(), 0);

        frame(&mut controls, &[], 32);
        assert!(!controls.get(handle).unwrap().is_down());
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn non_retaining_button_goes_up_when_dragged_off() {
        let (mut controls, handle, clicks) =
            setup(ButtonConfig::default().with_retains_touches(false));
        let downs = Rc::new(Cell::new(0));
        let ups = Rc::new(Cell::new(0));
        controls.get_mut(handle).unwrap().on_down_state_changed().listen({
            let (downs, ups) = (downs.clone(), ups.clone());
            move |down| {
                if *down {
                    downs.set(downs.get() + 1);
                } else {
                    ups.set(ups.get() + 1);
                }
            }
        });

        frame(&mut controls, &[touch(1, 100.0, 100.0)], 0);
        let touches = frame(&mut controls, &[touch(1, 400.0, 100.0)], 16);
        assert!(!controls.get(handle).unwrap().is_down());
        // The press stays armed and keeps its claim.
        assert_eq!(touches[0].claimed_by, Some(handle.id()));
        assert_eq!(clicks.get(), 0);

        // Dragging back in presses again.
        frame(&mut controls, &[touch(1, 100.0, 100.0)], 32);
        assert!(controls.get(handle).unwrap().is_down());
        assert_eq!((downs.get(), ups.get()), (2, 1));

        frame(&mut controls, &[touch(1, 400.0, 100.0)], 48);
        frame(&mut controls, &[], 64);
        assert_eq!(clicks.get(), 1);
        assert_eq!((downs.get(), ups.get()), (2, 2));
    }

    #[test]
    fn touch_area_replaces_disc() {
        let area = Rect::new(0.0, 0.0, 50.0, 50.0);
        let (mut controls, handle, _) = setup(ButtonConfig::default().with_touch_area(area));

        // Inside the disc, outside the area.
        frame(&mut controls, &[touch(1, 100.0, 100.0)], 0);
        assert!(!controls.get(handle).unwrap().is_down());

        frame(&mut controls, &[touch(2, 10.0, 10.0)], 16);
        assert!(controls.get(handle).unwrap().is_down());
    }

    #[test]
    fn disabling_cancels_press_without_click() {
        let (mut controls, handle, clicks) = setup(ButtonConfig::default());

        frame(&mut controls, &[touch(1, 100.0, 100.0)], 0);
        controls.get_mut(handle).unwrap().set_enabled(false);
        frame(&mut controls, &[touch(1, 100.0, 100.0)], 16);
        assert!(!controls.get(handle).unwrap().is_down());

        controls.get_mut(handle).unwrap().set_enabled(true);
        frame(&mut controls, &[], 32);
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn change_fires_only_on_edges() {
        let (mut controls, handle, _) = setup(ButtonConfig::default());
        let (changes, sink) = counter();
        controls.get_mut(handle).unwrap().on_change().listen(sink);

        frame(&mut controls, &[], 0);
        frame(&mut controls, &[touch(5, 500.0, 500.0)], 16);
        assert_eq!(changes.get(), 0);

        frame(&mut controls, &[touch(1, 100.0, 100.0)], 32);
        frame(&mut controls, &[touch(1, 101.0, 100.0)], 48);
        assert_eq!(changes.get(), 1);

        frame(&mut controls, &[], 64);
        assert_eq!(changes.get(), 2);
    }

    #[test]
    fn hover_and_enable_toggles_notify() {
        let mut button = Button::new();
        let (changes, sink) = counter();
        button.on_change().listen(sink);

        button.set_hovered(true);
        button.set_hovered(true);
        assert!(button.button_view().outline_visible);
        button.set_enabled(false);
        button.set_enabled(false);
        assert!(!button.button_view().visible);
        button.icon_updated();

        assert_eq!(changes.get(), 3);
    }

    #[test]
    fn view_tints_follow_down_state() {
        let (mut controls, handle, _) = setup(ButtonConfig::default().with_icon(IconId(9)));
        let view = controls.get(handle).unwrap().button_view();
        assert_eq!((view.shape_tint, view.icon_tint), (Tint::Dark, Tint::Light));
        assert_eq!(view.icon, Some(IconId(9)));

        frame(&mut controls, &[touch(1, 100.0, 100.0)], 0);
        let view = controls.get(handle).unwrap().button_view();
        assert_eq!((view.shape_tint, view.icon_tint), (Tint::Light, Tint::Dark));
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert_eq!(
            Button::with_config(ButtonConfig::default().with_radius(0.0)).unwrap_err(),
            ConfigError::InvalidRadius(0.0)
        );
        let mut button = Button::new();
        assert!(
            button
                .set_touch_area(Some(Rect::new(0.0, 0.0, f64::INFINITY, 1.0)))
                .is_err()
        );
        assert_eq!(button.size(), Size::new(70.0, 70.0));
    }

    #[test]
    fn configured_touch_area_is_normalized() {
        let config = ButtonConfig::default().with_touch_area(Rect::new(50.0, 40.0, 0.0, 0.0));
        let button = Button::with_config(config).unwrap();
        assert_eq!(button.touch_area(), Some(Rect::new(0.0, 0.0, 50.0, 40.0)));
        assert!(button.contains(Point::new(10.0, 10.0)));

        let config = ButtonConfig::default().with_touch_area(Rect::new(0.0, 0.0, f64::NAN, 1.0));
        assert!(matches!(
            Button::with_config(config),
            Err(ConfigError::NonFiniteArea(_))
        ));
    }
}
