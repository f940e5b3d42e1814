// Copyright 2026 the Touchstick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch samples and the per-frame context handed to controls.

use hashbrown::{HashMap, HashSet};
use kurbo::Point;
use smallvec::SmallVec;

/// Platform-assigned identifier of one continuous physical contact.
///
/// Stable from the moment the finger lands until it lifts. Touchstick never
/// invents identifiers for real touches; negative values are reserved for
/// synthetic sources such as [`MouseTouches`](crate::MouseTouches).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub i64);

impl From<i64> for TouchId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Identifies a control registered on [`MobileControls`](crate::MobileControls).
///
/// The index is the control's registration position, which is also its claim
/// priority: lower indices see contested touches first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(usize);

impl ControlId {
    /// Creates an id for the control registered at `index`.
    ///
    /// Normally ids are handed out by [`MobileControls::add`](crate::MobileControls::add);
    /// constructing one by hand is useful when driving a single control directly.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Registration index of the control.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One frame's sample of a physical contact point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Touch {
    /// Identifier of the contact.
    pub identifier: TouchId,
    /// Position in control space.
    pub position: Point,
    /// The control holding this touch, if any.
    ///
    /// Arbitration fills this in from the previous frame's claims before any
    /// control runs; controls then overwrite it with their own id when they
    /// claim the touch.
    pub claimed_by: Option<ControlId>,
}

impl Touch {
    /// Creates an unclaimed touch sample.
    #[must_use]
    pub const fn new(identifier: TouchId, position: Point) -> Self {
        Self {
            identifier,
            position,
            claimed_by: None,
        }
    }
}

/// Set of touch identifiers, used for "seen last frame" bookkeeping.
pub type TouchSet = HashSet<TouchId>;

/// Durable touch → control ownership carried between frames.
pub type ClaimMap = HashMap<TouchId, ControlId>;

/// Inline-allocated touch list, sized for the common handful of fingers.
pub type TouchList = SmallVec<[Touch; 4]>;

/// Context for one control's update within a frame.
#[derive(Copy, Clone, Debug)]
pub struct Frame<'a> {
    control: ControlId,
    previous: &'a TouchSet,
    now: u64,
}

impl<'a> Frame<'a> {
    /// Creates the context for `control`, given the identifiers seen in the
    /// previous frame and the host clock in milliseconds.
    #[must_use]
    pub const fn new(control: ControlId, previous: &'a TouchSet, now: u64) -> Self {
        Self {
            control,
            previous,
            now,
        }
    }

    /// The control being updated.
    #[must_use]
    pub const fn control(&self) -> ControlId {
        self.control
    }

    /// Host clock reading for this frame, in milliseconds.
    #[must_use]
    pub const fn now(&self) -> u64 {
        self.now
    }

    /// Identifiers that were present in the previous frame.
    #[must_use]
    pub const fn previous(&self) -> &'a TouchSet {
        self.previous
    }

    /// Returns `true` if `identifier` was not present in the previous frame.
    #[must_use]
    pub fn is_new(&self, identifier: TouchId) -> bool {
        !self.previous.contains(&identifier)
    }

    /// Returns `true` unless `touch` is held by a different control.
    #[must_use]
    pub fn claimable(&self, touch: &Touch) -> bool {
        touch.claimed_by.is_none_or(|owner| owner == self.control)
    }
}
