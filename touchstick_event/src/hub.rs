// Copyright 2026 the Touchstick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observer hub with explicit subscription handles.

use alloc::boxed::Box;
use core::fmt;

use smallvec::SmallVec;

/// Identifies one listener registered on an [`EventHub`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener<P> = Box<dyn FnMut(&P)>;

/// A broadcast point for one kind of event.
///
/// Listeners run in registration order. A listener removed with
/// [`EventHub::ignore`] is never called again.
///
/// ```
/// use core::cell::Cell;
/// use std::rc::Rc;
/// use touchstick_event::EventHub;
///
/// let downs = Rc::new(Cell::new(0));
/// let mut on_down = EventHub::<bool>::new();
/// let id = on_down.listen({
///     let downs = downs.clone();
///     move |down| {
///         if *down {
///             downs.set(downs.get() + 1);
///         }
///     }
/// });
///
/// on_down.emit(&true);
/// on_down.emit(&false);
/// assert_eq!(downs.get(), 1);
///
/// assert!(on_down.ignore(id));
/// on_down.emit(&true);
/// assert_eq!(downs.get(), 1);
/// ```
pub struct EventHub<P: ?Sized = ()> {
    listeners: SmallVec<[(ListenerId, Listener<P>); 2]>,
    next_id: u64,
}

impl<P: ?Sized> EventHub<P> {
    /// Creates a hub with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: SmallVec::new(),
            next_id: 0,
        }
    }

    /// Registers `listener` and returns a handle for [`EventHub::ignore`].
    pub fn listen(&mut self, listener: impl FnMut(&P) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes the listener registered under `id`.
    ///
    /// Returns `false` if no such listener is registered.
    pub fn ignore(&mut self, id: ListenerId) -> bool {
        let Some(index) = self.listeners.iter().position(|(lid, _)| *lid == id) else {
            return false;
        };
        self.listeners.remove(index);
        true
    }

    /// Calls every listener with `param`.
    pub fn emit(&mut self, param: &P) {
        for (_, listener) in &mut self.listeners {
            listener(param);
        }
    }

    /// Removes every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if nothing is listening.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl EventHub<()> {
    /// Emits a payload-free notification.
    pub fn notify(&mut self) {
        self.emit(&());
    }
}

impl<P: ?Sized> Default for EventHub<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized> fmt::Debug for EventHub<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
