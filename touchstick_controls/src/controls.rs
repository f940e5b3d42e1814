// Copyright 2026 the Touchstick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The control container and its touch-claim arbitration pass.
//!
//! ## Frame contract
//!
//! [`MobileControls::update_touches`] runs four steps:
//!
//! 1. Every incoming touch is pre-attributed to the control that held it at the
//!    end of the previous frame, so holders see their touch and competitors see
//!    it as taken.
//! 2. Every control runs [`Control::update`] in registration order. Earlier
//!    controls win newly contested touches. If a callback requests teardown,
//!    the remaining controls are skipped.
//! 3. The claim map is rebuilt from the final [`Touch::claimed_by`] values.
//!    Identifiers absent from this frame have no entry: a lifted finger frees
//!    its slot immediately.
//! 4. The identifiers of this frame become the "previous" set for the next.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;
use core::marker::PhantomData;

use kurbo::{Point, Size};
use log::{debug, trace};
use touchstick_event::{RepaintFlag, Teardown};

use crate::{ClaimMap, Control, ControlId, ControlsError, Frame, Touch, TouchId, TouchSet};

/// Typed reference to a control registered on [`MobileControls`].
pub struct ControlHandle<C> {
    id: ControlId,
    marker: PhantomData<fn() -> C>,
}

impl<C> ControlHandle<C> {
    /// Untyped id of the control.
    #[must_use]
    pub const fn id(self) -> ControlId {
        self.id
    }
}

impl<C> Clone for ControlHandle<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for ControlHandle<C> {}

impl<C> PartialEq for ControlHandle<C> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<C> Eq for ControlHandle<C> {}

impl<C> fmt::Debug for ControlHandle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ControlHandle").field(&self.id).finish()
    }
}

impl<C> From<ControlHandle<C>> for ControlId {
    fn from(handle: ControlHandle<C>) -> Self {
        handle.id
    }
}

/// An ordered set of controls sharing one touch surface.
///
/// Registration order is claim priority. The container owns the durable claim
/// map and the previous-frame identifier set, and coalesces every control's
/// change notifications into one [`RepaintFlag`].
#[derive(Debug)]
pub struct MobileControls {
    size: Size,
    controls: Vec<Box<dyn Control>>,
    claims: ClaimMap,
    previous: TouchSet,
    teardown: Teardown,
    torn_down: bool,
    repaint: RepaintFlag,
}

impl MobileControls {
    /// Creates an empty container. The first frame always needs a paint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            size: Size::ZERO,
            controls: Vec::new(),
            claims: ClaimMap::new(),
            previous: TouchSet::new(),
            teardown: Teardown::new(),
            torn_down: false,
            repaint: RepaintFlag::marked(),
        }
    }

    /// Registers `control` with the lowest claim priority so far.
    ///
    /// The control's change hub is wired into the container's repaint flag.
    pub fn add<C: Control>(&mut self, mut control: C) -> Result<ControlHandle<C>, ControlsError> {
        if self.sync_teardown() {
            return Err(ControlsError::Destroyed);
        }
        control.on_change().listen(self.repaint.listener());
        let id = ControlId::new(self.controls.len());
        self.controls.push(Box::new(control));
        self.repaint.mark();
        debug!("registered control {id:?}");
        Ok(ControlHandle {
            id,
            marker: PhantomData,
        })
    }

    /// The control behind `handle`.
    #[must_use]
    pub fn get<C: Control>(&self, handle: ControlHandle<C>) -> Option<&C> {
        let control: &dyn Any = &**self.controls.get(handle.id.index())?;
        control.downcast_ref()
    }

    /// Mutable access to the control behind `handle`.
    pub fn get_mut<C: Control>(&mut self, handle: ControlHandle<C>) -> Option<&mut C> {
        let control: &mut dyn Any = &mut **self.controls.get_mut(handle.id.index())?;
        control.downcast_mut()
    }

    /// The control registered under `id`.
    #[must_use]
    pub fn control(&self, id: ControlId) -> Option<&dyn Control> {
        self.controls.get(id.index()).map(|control| &**control)
    }

    /// Mutable access to the control registered under `id`.
    pub fn control_mut(&mut self, id: ControlId) -> Option<&mut (dyn Control + 'static)> {
        self.controls.get_mut(id.index()).map(|control| &mut **control)
    }

    /// Controls in registration order.
    pub fn controls(&self) -> impl Iterator<Item = (ControlId, &dyn Control)> {
        self.controls
            .iter()
            .enumerate()
            .map(|(index, control)| (ControlId::new(index), &**control))
    }

    /// Number of registered controls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Returns `true` if no control is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Size of the control surface.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Records a new surface size and requests a repaint.
    ///
    /// Repositioning controls is up to the caller, usually through
    /// [`layout`](crate::layout).
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.repaint.mark();
    }

    /// Runs one frame of claim arbitration over `touches`.
    ///
    /// `now` is the host clock in milliseconds; controls use it to start release
    /// animations. On return each touch's [`Touch::claimed_by`] names its owner.
    pub fn update_touches(&mut self, touches: &mut [Touch], now: u64) {
        if self.sync_teardown() {
            return;
        }

        let mut seen = TouchSet::with_capacity(touches.len());
        for touch in touches.iter_mut() {
            touch.claimed_by = self.claims.get(&touch.identifier).copied();
            seen.insert(touch.identifier);
        }

        for (index, control) in self.controls.iter_mut().enumerate() {
            let frame = Frame::new(ControlId::new(index), &self.previous, now);
            control.update(touches, &frame);
            // A callback may have torn everything down.
            if self.teardown.is_destroyed() {
                break;
            }
        }
        if self.sync_teardown() {
            return;
        }

        self.claims.clear();
        for touch in touches.iter() {
            if let Some(owner) = touch.claimed_by {
                self.claims.insert(touch.identifier, owner);
            }
        }
        trace!("{} of {} touches claimed", self.claims.len(), seen.len());

        self.previous = seen;
    }

    /// Resumes every control's pending animations for one host frame.
    ///
    /// Returns `true` while any control wants another frame. Always `false`
    /// once destroyed.
    pub fn animate(&mut self, now: u64) -> bool {
        if self.sync_teardown() {
            return false;
        }
        let mut running = false;
        for control in &mut self.controls {
            running |= control.animate(now);
            if self.teardown.is_destroyed() {
                break;
            }
        }
        !self.sync_teardown() && running
    }

    /// Updates the hover affordance for a pointer at `point`.
    ///
    /// The first enabled control whose hover region contains the pointer
    /// becomes hovered; every other control is un-hovered. Returns the hovered
    /// control, which hosts typically use to pick a pointer cursor.
    pub fn update_hover(&mut self, point: Point) -> Option<ControlId> {
        if self.sync_teardown() {
            return None;
        }
        let target = self
            .controls
            .iter()
            .position(|control| control.enabled() && control.hover_contains(point))
            .map(ControlId::new);
        for (index, control) in self.controls.iter_mut().enumerate() {
            control.set_hovered(target == Some(ControlId::new(index)));
        }
        target
    }

    /// The control that held `identifier` at the end of the last frame.
    #[must_use]
    pub fn claim_of(&self, identifier: TouchId) -> Option<ControlId> {
        self.claims.get(&identifier).copied()
    }

    /// Claims held at the end of the last frame.
    #[must_use]
    pub fn claims(&self) -> &ClaimMap {
        &self.claims
    }

    /// Identifiers present in the last frame.
    #[must_use]
    pub fn previous_touches(&self) -> &TouchSet {
        &self.previous
    }

    /// Returns `true` if any control changed since the last [`MobileControls::take_repaint`].
    #[must_use]
    pub fn needs_repaint(&self) -> bool {
        self.repaint.is_marked()
    }

    /// Clears the repaint request, returning whether there was one.
    pub fn take_repaint(&mut self) -> bool {
        self.repaint.take()
    }

    /// Shared handle to the repaint flag.
    #[must_use]
    pub fn repaint_flag(&self) -> RepaintFlag {
        self.repaint.clone()
    }

    /// Token that application callbacks can use to destroy the container.
    ///
    /// Destruction requested from inside a control callback takes effect as
    /// soon as that callback returns.
    #[must_use]
    pub fn teardown_handle(&self) -> Teardown {
        self.teardown.clone()
    }

    /// Destroys the container: pending animations are cancelled, claims are
    /// dropped, and every later update is a no-op.
    pub fn destroy(&mut self) {
        self.teardown.destroy();
        self.sync_teardown();
    }

    /// Returns `true` once destruction has been requested.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.teardown.is_destroyed()
    }

    /// Finishes a requested teardown exactly once. Returns whether destroyed.
    fn sync_teardown(&mut self) -> bool {
        if !self.teardown.is_destroyed() {
            return false;
        }
        if !self.torn_down {
            self.torn_down = true;
            for control in &mut self.controls {
                control.teardown();
            }
            self.claims.clear();
            self.previous.clear();
            debug!("controls destroyed");
        }
        true
    }
}

impl Default for MobileControls {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::Cell;

    use super::*;
    use crate::{Button, Joystick, TouchList};

    fn touch(id: i64, x: f64, y: f64) -> Touch {
        Touch::new(TouchId(id), Point::new(x, y))
    }

    fn button_at(x: f64, y: f64) -> Button {
        let mut button = Button::new();
        button.set_position(Point::new(x, y));
        button
    }

    fn frame(controls: &mut MobileControls, touches: &[Touch], now: u64) -> TouchList {
        let mut touches: TouchList = touches.iter().copied().collect();
        controls.update_touches(&mut touches, now);
        touches
    }

    #[test]
    fn registration_order_breaks_ties() {
        let mut controls = MobileControls::new();
        let first = controls.add(button_at(100.0, 100.0)).unwrap();
        let second = controls.add(button_at(110.0, 100.0)).unwrap();

        let touches = frame(&mut controls, &[touch(1, 105.0, 100.0)], 0);

        assert_eq!(touches[0].claimed_by, Some(first.id()));
        assert!(controls.get(first).unwrap().is_down());
        assert!(!controls.get(second).unwrap().is_down());
        assert_eq!(controls.claim_of(TouchId(1)), Some(first.id()));
    }

    #[test]
    fn claims_persist_against_later_contenders() {
        let mut controls = MobileControls::new();
        let joystick = controls.add(Joystick::new()).unwrap();
        controls.get_mut(joystick).unwrap().set_position(Point::new(300.0, 100.0));
        let button = controls.add(button_at(100.0, 100.0)).unwrap();

        frame(&mut controls, &[touch(1, 300.0, 100.0)], 0);
        // Dragged over the button: the joystick keeps it.
        let touches = frame(&mut controls, &[touch(1, 100.0, 100.0)], 16);

        assert_eq!(touches[0].claimed_by, Some(joystick.id()));
        assert!(!controls.get(button).unwrap().is_down());
    }

    #[test]
    fn lifted_touches_are_purged() {
        let mut controls = MobileControls::new();
        controls.add(button_at(100.0, 100.0)).unwrap();

        frame(&mut controls, &[touch(1, 100.0, 100.0), touch(2, 900.0, 900.0)], 0);
        assert_eq!(controls.claims().len(), 1);
        assert_eq!(controls.previous_touches().len(), 2);

        frame(&mut controls, &[touch(2, 900.0, 900.0)], 16);
        assert!(controls.claims().is_empty());
        assert!(controls.previous_touches().contains(&TouchId(2)));
        assert!(!controls.previous_touches().contains(&TouchId(1)));
    }

    #[test]
    fn unknown_touches_are_left_unclaimed() {
        let mut controls = MobileControls::new();
        controls.add(button_at(100.0, 100.0)).unwrap();

        let touches = frame(&mut controls, &[touch(42, -50.0, 1e9)], 0);
        assert_eq!(touches[0].claimed_by, None);
        assert!(controls.claims().is_empty());
    }

    #[test]
    fn stale_claim_markers_are_overwritten() {
        let mut controls = MobileControls::new();
        let button = controls.add(button_at(100.0, 100.0)).unwrap();

        let mut touches = [touch(1, 100.0, 100.0)];
        touches[0].claimed_by = Some(ControlId::new(99));
        controls.update_touches(&mut touches, 0);

        assert_eq!(touches[0].claimed_by, Some(button.id()));
    }

    #[test]
    fn click_handler_can_destroy_mid_pass() {
        let mut controls = MobileControls::new();
        let mut first = button_at(100.0, 100.0);
        first.on_click().listen({
            let teardown = controls.teardown_handle();
            move |()| teardown.destroy()
        });
        controls.add(first).unwrap();

        let later_updates = Rc::new(Cell::new(0));
        let mut second = button_at(300.0, 100.0);
        second.on_down_state_changed().listen({
            let later_updates = later_updates.clone();
            move |_| later_updates.set(later_updates.get() + 1)
        });
        let second = controls.add(second).unwrap();

        frame(&mut controls, &[touch(1, 100.0, 100.0), touch(2, 300.0, 100.0)], 0);
        assert_eq!(later_updates.get(), 1);

        // Both lift: the first button's click destroys the container before the
        // second button sees the frame.
        frame(&mut controls, &[], 16);
        assert!(controls.is_destroyed());
        assert_eq!(later_updates.get(), 1);
        assert!(controls.get(second).unwrap().is_down());
        assert!(controls.claims().is_empty());

        // Everything after teardown is inert.
        frame(&mut controls, &[touch(3, 300.0, 100.0)], 32);
        assert_eq!(later_updates.get(), 1);
        assert!(!controls.animate(48));
        assert_eq!(controls.add(Button::new()), Err(ControlsError::Destroyed));
    }

    #[test]
    fn destroy_stops_fades_and_notifications() {
        let mut controls = MobileControls::new();
        let joystick = controls.add(Joystick::new()).unwrap();
        let changes = Rc::new(Cell::new(0));
        controls.get_mut(joystick).unwrap().on_change().listen({
            let changes = changes.clone();
            move |()| changes.set(changes.get() + 1)
        });

        frame(&mut controls, &[touch(1, 40.0, 0.0)], 0);
        frame(&mut controls, &[], 16);
        assert!(controls.animate(32));

        controls.destroy();
        let settled = changes.get();
        assert!(!controls.animate(48));
        assert!(!controls.animate(400));
        assert_eq!(changes.get(), settled);
        assert!(!controls.get(joystick).unwrap().is_releasing());
    }

    #[test]
    fn repaint_coalesces_changes() {
        let mut controls = MobileControls::new();
        let button = controls.add(button_at(100.0, 100.0)).unwrap();
        assert!(controls.take_repaint());
        assert!(!controls.needs_repaint());

        frame(&mut controls, &[touch(5, 900.0, 900.0)], 0);
        assert!(!controls.needs_repaint());

        frame(&mut controls, &[touch(1, 100.0, 100.0)], 16);
        controls.get_mut(button).unwrap().set_hovered(true);
        assert!(controls.take_repaint());
        assert!(!controls.take_repaint());

        controls.resize(Size::new(800.0, 600.0));
        assert_eq!(controls.size(), Size::new(800.0, 600.0));
        assert!(controls.take_repaint());
    }

    #[test]
    fn hover_targets_first_enabled_button() {
        let mut controls = MobileControls::new();
        let a = controls.add(button_at(100.0, 100.0)).unwrap();
        let b = controls.add(button_at(110.0, 100.0)).unwrap();

        assert_eq!(controls.update_hover(Point::new(105.0, 100.0)), Some(a.id()));
        assert!(controls.get(a).unwrap().hovered());
        assert!(!controls.get(b).unwrap().hovered());

        controls.get_mut(a).unwrap().set_enabled(false);
        assert_eq!(controls.update_hover(Point::new(105.0, 100.0)), Some(b.id()));
        assert!(!controls.get(a).unwrap().hovered());

        assert_eq!(controls.update_hover(Point::new(900.0, 900.0)), None);
        assert!(!controls.get(b).unwrap().hovered());
    }

    #[test]
    fn handles_are_typed() {
        let mut controls = MobileControls::new();
        let button = controls.add(Button::new()).unwrap();
        let joystick = controls.add(Joystick::new()).unwrap();

        assert_eq!(controls.len(), 2);
        assert!(controls.get(button).is_some());
        let mistyped: ControlHandle<Joystick> = ControlHandle {
            id: button.id(),
            marker: PhantomData,
        };
        assert!(controls.get(mistyped).is_none());
        assert_eq!(ControlId::from(joystick), ControlId::new(1));

        let ids: Vec<_> = controls.controls().map(|(id, _)| id).collect();
        assert_eq!(ids, [ControlId::new(0), ControlId::new(1)]);
        assert!(controls.control(ControlId::new(2)).is_none());
    }
}
