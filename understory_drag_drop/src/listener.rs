// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag and drop listener sets.
//!
//! Every listener is optional; an absent listener is a no-op. Listener sets are
//! cheap to clone and clones share the same callbacks, so one declaration can
//! hand the same set to every session it creates.
//!
//! Listeners are normally attached with the builder methods:
//!
//! ```
//! use kurbo::Point;
//! use understory_drag_drop::listener::DragListeners;
//!
//! let listeners = DragListeners::<Point>::new()
//!     .on_start(|current, press| {
//!         let _moved = *current - *press;
//!     })
//!     .on_end(|_, _| {});
//! assert!(listeners.has_start());
//! assert!(!listeners.has_move());
//! ```
//!
//! Name-keyed configuration is validated once, up front. An unknown or repeated
//! name fails the whole construction:
//!
//! ```
//! use std::rc::Rc;
//! use kurbo::Point;
//! use understory_drag_drop::ConfigError;
//! use understory_drag_drop::listener::{DragCallback, DragListeners};
//!
//! let noop: DragCallback<Point> = Rc::new(|_: &Point, _: &Point| {});
//! let err = DragListeners::from_named([("on_start", noop.clone()), ("on_hover", noop)])
//!     .unwrap_err();
//! assert_eq!(err, ConfigError::UnknownListener { name: "on_hover".into() });
//! ```

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use crate::error::ConfigError;

/// Drag lifecycle callback: `(current event, press event)`.
pub type DragCallback<E> = Rc<dyn Fn(&E, &E)>;

/// Drop zone callback: `(current event, dragged node, zone node)`.
pub type DropCallback<N, E> = Rc<dyn Fn(&E, &N, &N)>;

/// Names accepted by [`DragListeners::from_named`].
pub const DRAG_LISTENER_NAMES: [&str; 3] = ["on_start", "on_move", "on_end"];

/// Names accepted by [`DropListeners::from_named`].
pub const DROP_LISTENER_NAMES: [&str; 3] = ["on_enter", "on_leave", "on_drop"];

fn fill<T>(slot: &mut Option<T>, name: &str, value: T) -> Result<(), ConfigError> {
    if slot.is_some() {
        return Err(ConfigError::DuplicateListener {
            name: String::from(name),
        });
    }
    *slot = Some(value);
    Ok(())
}

/// Callbacks for a draggable element's lifecycle.
pub struct DragListeners<E> {
    on_start: Option<DragCallback<E>>,
    on_move: Option<DragCallback<E>>,
    on_end: Option<DragCallback<E>>,
}

impl<E> DragListeners<E> {
    /// An empty listener set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            on_start: None,
            on_move: None,
            on_end: None,
        }
    }

    /// Build from `(name, callback)` pairs; see [`DRAG_LISTENER_NAMES`].
    pub fn from_named<'a, I>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, DragCallback<E>)>,
    {
        let mut listeners = Self::new();
        for (name, callback) in entries {
            let target = match name {
                "on_start" => &mut listeners.on_start,
                "on_move" => &mut listeners.on_move,
                "on_end" => &mut listeners.on_end,
                _ => {
                    return Err(ConfigError::UnknownListener {
                        name: String::from(name),
                    });
                }
            };
            fill(target, name, callback)?;
        }
        Ok(listeners)
    }

    /// Called once when a press is confirmed as a drag.
    #[must_use]
    pub fn on_start(mut self, f: impl Fn(&E, &E) + 'static) -> Self {
        self.on_start = Some(Rc::new(f));
        self
    }

    /// Called on every active move, after rendering and collision updates.
    #[must_use]
    pub fn on_move(mut self, f: impl Fn(&E, &E) + 'static) -> Self {
        self.on_move = Some(Rc::new(f));
        self
    }

    /// Called when an active drag is released, before drops resolve.
    #[must_use]
    pub fn on_end(mut self, f: impl Fn(&E, &E) + 'static) -> Self {
        self.on_end = Some(Rc::new(f));
        self
    }

    /// Returns `true` if a start listener is set.
    #[must_use]
    pub fn has_start(&self) -> bool {
        self.on_start.is_some()
    }

    /// Returns `true` if a move listener is set.
    #[must_use]
    pub fn has_move(&self) -> bool {
        self.on_move.is_some()
    }

    /// Returns `true` if an end listener is set.
    #[must_use]
    pub fn has_end(&self) -> bool {
        self.on_end.is_some()
    }

    pub(crate) fn started(&self, current: &E, press: &E) {
        if let Some(f) = &self.on_start {
            f(current, press);
        }
    }

    pub(crate) fn moved(&self, current: &E, press: &E) {
        if let Some(f) = &self.on_move {
            f(current, press);
        }
    }

    pub(crate) fn ended(&self, current: &E, press: &E) {
        if let Some(f) = &self.on_end {
            f(current, press);
        }
    }
}

impl<E> Default for DragListeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for DragListeners<E> {
    fn clone(&self) -> Self {
        Self {
            on_start: self.on_start.clone(),
            on_move: self.on_move.clone(),
            on_end: self.on_end.clone(),
        }
    }
}

impl<E> fmt::Debug for DragListeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragListeners")
            .field("on_start", &self.has_start())
            .field("on_move", &self.has_move())
            .field("on_end", &self.has_end())
            .finish()
    }
}

/// Callbacks for a set of drop zones.
pub struct DropListeners<N, E> {
    on_enter: Option<DropCallback<N, E>>,
    on_leave: Option<DropCallback<N, E>>,
    on_drop: Option<DropCallback<N, E>>,
}

impl<N, E> DropListeners<N, E> {
    /// An empty listener set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            on_enter: None,
            on_leave: None,
            on_drop: None,
        }
    }

    /// Build from `(name, callback)` pairs; see [`DROP_LISTENER_NAMES`].
    pub fn from_named<'a, I>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, DropCallback<N, E>)>,
    {
        let mut listeners = Self::new();
        for (name, callback) in entries {
            let target = match name {
                "on_enter" => &mut listeners.on_enter,
                "on_leave" => &mut listeners.on_leave,
                "on_drop" => &mut listeners.on_drop,
                _ => {
                    return Err(ConfigError::UnknownListener {
                        name: String::from(name),
                    });
                }
            };
            fill(target, name, callback)?;
        }
        Ok(listeners)
    }

    /// Called when the pointer starts overlapping a zone.
    #[must_use]
    pub fn on_enter(mut self, f: impl Fn(&E, &N, &N) + 'static) -> Self {
        self.on_enter = Some(Rc::new(f));
        self
    }

    /// Called when the pointer stops overlapping a zone.
    #[must_use]
    pub fn on_leave(mut self, f: impl Fn(&E, &N, &N) + 'static) -> Self {
        self.on_leave = Some(Rc::new(f));
        self
    }

    /// Called for each overlapped zone when the drag is released.
    #[must_use]
    pub fn on_drop(mut self, f: impl Fn(&E, &N, &N) + 'static) -> Self {
        self.on_drop = Some(Rc::new(f));
        self
    }

    /// Returns `true` if an enter listener is set.
    #[must_use]
    pub fn has_enter(&self) -> bool {
        self.on_enter.is_some()
    }

    /// Returns `true` if a leave listener is set.
    #[must_use]
    pub fn has_leave(&self) -> bool {
        self.on_leave.is_some()
    }

    /// Returns `true` if a drop listener is set.
    #[must_use]
    pub fn has_drop(&self) -> bool {
        self.on_drop.is_some()
    }

    pub(crate) fn entered(&self, current: &E, dragged: &N, zone: &N) {
        if let Some(f) = &self.on_enter {
            f(current, dragged, zone);
        }
    }

    pub(crate) fn left(&self, current: &E, dragged: &N, zone: &N) {
        if let Some(f) = &self.on_leave {
            f(current, dragged, zone);
        }
    }

    pub(crate) fn dropped(&self, current: &E, dragged: &N, zone: &N) {
        if let Some(f) = &self.on_drop {
            f(current, dragged, zone);
        }
    }
}

impl<N, E> Default for DropListeners<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Clone for DropListeners<N, E> {
    fn clone(&self) -> Self {
        Self {
            on_enter: self.on_enter.clone(),
            on_leave: self.on_leave.clone(),
            on_drop: self.on_drop.clone(),
        }
    }
}

impl<N, E> fmt::Debug for DropListeners<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropListeners")
            .field("on_enter", &self.has_enter())
            .field("on_leave", &self.has_leave())
            .field("on_drop", &self.has_drop())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[test]
    fn named_drag_listeners_fill_their_slots() {
        let noop: DragCallback<u8> = Rc::new(|_: &u8, _: &u8| {});
        let listeners =
            DragListeners::from_named([("on_move", noop.clone()), ("on_end", noop)]).unwrap();
        assert!(!listeners.has_start());
        assert!(listeners.has_move());
        assert!(listeners.has_end());
    }

    #[test]
    fn unknown_drop_listener_fails_construction() {
        let noop: DropCallback<u8, u8> = Rc::new(|_: &u8, _: &u8, _: &u8| {});
        let err =
            DropListeners::from_named([("on_enter", noop.clone()), ("onDropZoneEntered", noop)])
                .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownListener {
                name: String::from("onDropZoneEntered")
            }
        );
    }

    #[test]
    fn duplicate_listener_fails_construction() {
        let noop: DragCallback<u8> = Rc::new(|_: &u8, _: &u8| {});
        let err = DragListeners::from_named([("on_start", noop.clone()), ("on_start", noop)])
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateListener {
                name: String::from("on_start")
            }
        );
    }

    #[test]
    fn clones_share_callbacks() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let listeners = DropListeners::<u8, u8>::new().on_drop(move |e, d, z| {
            sink.borrow_mut().push((*e, *d, *z));
        });
        let copy = listeners.clone();
        listeners.dropped(&1, &2, &3);
        copy.dropped(&4, &5, &6);
        assert_eq!(*seen.borrow(), [(1, 2, 3), (4, 5, 6)]);
    }

    #[test]
    fn absent_listeners_are_noops() {
        let listeners = DragListeners::<u8>::default();
        listeners.started(&0, &0);
        listeners.moved(&0, &0);
        listeners.ended(&0, &0);
        let drops = DropListeners::<u8, u8>::default();
        drops.entered(&0, &0, &0);
        drops.left(&0, &0, &0);
        drops.dropped(&0, &0, &0);
    }
}
