// Copyright 2026 the Touchstick Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touchstick Event: change notification for virtual touch controls.
//!
//! Controls report observable changes (a button going down, a joystick moving,
//! a fade stepping) through broadcast hubs. A renderer does not care *what*
//! changed, only *whether* anything did since it last painted. This crate
//! provides the pieces for that protocol:
//!
//! - [`EventHub`]: an observer set with explicit [`EventHub::listen`] and
//!   [`EventHub::ignore`], broadcasting a borrowed payload to every listener.
//! - [`RepaintFlag`]: a shared dirty bit. Any number of marks between two paints
//!   collapse into a single [`RepaintFlag::take`] returning `true`.
//! - [`Teardown`]: a shared destruction token. A listener can request teardown
//!   of the structure that is currently dispatching to it; the dispatcher checks
//!   the token after every callback and stops cleanly.
//!
//! Everything here is single-threaded (`Rc`/`Cell` based): controls are updated
//! from one host-driven frame tick.
//!
//! ## Minimal example
//!
//! ```rust
//! use touchstick_event::{EventHub, RepaintFlag};
//!
//! let repaint = RepaintFlag::new();
//! let mut on_change = EventHub::<()>::new();
//! on_change.listen(repaint.listener());
//!
//! on_change.notify();
//! on_change.notify();
//!
//! // Two notifications, one repaint.
//! assert!(repaint.take());
//! assert!(!repaint.take());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod flag;
mod hub;

pub use flag::{RepaintFlag, Teardown};
pub use hub::{EventHub, ListenerId};
