// Copyright 2026 the Touchstick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared flags: repaint coalescing and re-entrant teardown.

use alloc::rc::Rc;
use core::cell::Cell;

/// A shared "something changed since the last paint" bit.
///
/// Clones share the same bit. Controls mark it through their change hubs; the
/// host checks it once per frame with [`RepaintFlag::take`].
#[derive(Clone, Debug, Default)]
pub struct RepaintFlag(Rc<Cell<bool>>);

impl RepaintFlag {
    /// Creates a clean flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a flag that starts marked, so the first frame always paints.
    #[must_use]
    pub fn marked() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    /// Requests a repaint.
    pub fn mark(&self) {
        self.0.set(true);
    }

    /// Returns `true` if a repaint has been requested and not yet taken.
    #[must_use]
    pub fn is_marked(&self) -> bool {
        self.0.get()
    }

    /// Clears the flag, returning whether it was marked.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }

    /// A listener that marks this flag, for use with [`EventHub::listen`](crate::EventHub::listen).
    pub fn listener<P: ?Sized + 'static>(&self) -> impl FnMut(&P) + 'static {
        let flag = self.clone();
        move |_| flag.mark()
    }
}

/// A shared destruction token.
///
/// The owner of a set of controls hands clones of its token to application
/// callbacks. Calling [`Teardown::destroy`] from inside a callback does not
/// free anything immediately; the owner notices the request after the callback
/// returns and stops dispatching.
#[derive(Clone, Debug, Default)]
pub struct Teardown(Rc<Cell<bool>>);

impl Teardown {
    /// Creates a live token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests destruction. Idempotent.
    pub fn destroy(&self) {
        self.0.set(true);
    }

    /// Returns `true` once destruction has been requested through any clone.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.0.get()
    }
}
