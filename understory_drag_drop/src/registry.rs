// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide collection of drag sessions and global pointer dispatch.
//!
//! The application owns one [`SessionRegistry`], creates it at startup, and
//! routes its input into it:
//!
//! - a press on a draggable element goes to [`SessionRegistry::pointer_down`]
//!   (or [`SessionRegistry::press`] when the session is already known),
//! - every document-wide move goes to [`SessionRegistry::pointer_move`],
//! - every document-wide release goes to [`SessionRegistry::pointer_up`].
//!
//! Sessions are evaluated in registration order and are never removed.
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Rect};
//! use understory_drag_drop::{
//!     DragMode, DragOptions, DropListeners, DropOptions, ElementSource,
//!     SessionRegistry, Surface,
//! };
//!
//! // Node 0 is draggable at (0, 0)-(50, 50); node 1 is a zone at (100, 100)-(200, 200).
//! struct Page;
//! impl Surface for Page {
//!     type Node = u32;
//!     fn offset_origin(&self, _: &u32) -> Option<Point> { Some(Point::ORIGIN) }
//!     fn bounding_rect(&self, node: &u32) -> Option<Rect> {
//!         (*node == 1).then(|| Rect::new(100.0, 100.0, 200.0, 200.0))
//!     }
//!     fn query(&self, selector: &str) -> Vec<u32> {
//!         if selector == ".zone" { vec![1] } else { vec![0] }
//!     }
//!     fn set_position(&mut self, _: &u32, _: Point) {}
//!     fn spawn_floating(&mut self, _: &u32, _: Point) -> Option<u32> { None }
//!     fn remove_floating(&mut self, _: u32) {}
//! }
//!
//! let dropped = Rc::new(Cell::new(false));
//! let flag = dropped.clone();
//!
//! let mut page = Page;
//! let mut registry = SessionRegistry::<u32, Point>::new();
//! let boxes = registry.declare(
//!     &page,
//!     ElementSource::selector(".box"),
//!     DragOptions::new().with_mode(DragMode::Move),
//! );
//! registry.attach_drop(
//!     &boxes,
//!     ElementSource::selector(".zone"),
//!     DropOptions::new(DropListeners::new().on_drop(move |_, _, _| flag.set(true))),
//! );
//!
//! registry.pointer_down(&page, &0, Point::new(10.0, 10.0));
//! registry.pointer_move(&mut page, &Point::new(150.0, 150.0));
//! registry.pointer_up(&mut page, &Point::new(150.0, 150.0));
//! assert!(dropped.get());
//! ```

use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use crate::PointerEvent;
use crate::session::{DragOptions, DragSession};
use crate::surface::{ElementSource, Surface};
use crate::zone::{DropOptions, DropZoneSet};

/// Stable index of a session within its registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(usize);

impl SessionId {
    /// Position of the session in registration order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// The sessions created by one [`SessionRegistry::declare`] call.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Declaration {
    sessions: Range<usize>,
}

impl Declaration {
    /// Sessions of this declaration, in registration order.
    pub fn sessions(&self) -> impl Iterator<Item = SessionId> + '_ {
        self.sessions.clone().map(SessionId)
    }

    /// Number of sessions created.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if the declaration matched no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Ordered, append-only collection of drag sessions.
pub struct SessionRegistry<N, E> {
    sessions: Vec<DragSession<N, E>>,
}

impl<N, E> SessionRegistry<N, E>
where
    N: Clone + PartialEq + fmt::Debug + 'static,
    E: PointerEvent + Clone + 'static,
{
    /// An empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sessions: Vec::new(),
        }
    }

    /// Number of registered sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if no sessions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Append a session.
    pub fn register(&mut self, session: DragSession<N, E>) -> SessionId {
        let id = SessionId(self.sessions.len());
        self.sessions.push(session);
        id
    }

    /// Create one session per element of `source`, all sharing `options`.
    ///
    /// Selectors are resolved immediately against `surface`; elements added
    /// later are not draggable.
    pub fn declare<S>(
        &mut self,
        surface: &S,
        source: ElementSource<N>,
        options: DragOptions<E>,
    ) -> Declaration
    where
        S: Surface<Node = N>,
    {
        let start = self.sessions.len();
        for element in source.resolve(surface) {
            self.register(DragSession::new(element, options.clone()));
        }
        let sessions = start..self.sessions.len();
        log::debug!("declared {} draggable element(s)", sessions.len());
        Declaration { sessions }
    }

    /// Give every session of `declaration` its own zone set resolved from `source`.
    ///
    /// Listeners are shared between the sessions. Attaching again replaces
    /// the previous zones.
    pub fn attach_drop(
        &mut self,
        declaration: &Declaration,
        source: ElementSource<N>,
        options: DropOptions<N, E>,
    ) {
        for id in declaration.sessions() {
            if let Some(session) = self.sessions.get_mut(id.0) {
                session.set_drop_target(DropZoneSet::new(source.clone(), options.clone()));
            }
        }
    }

    /// The session with `id`.
    #[must_use]
    pub fn get(&self, id: SessionId) -> Option<&DragSession<N, E>> {
        self.sessions.get(id.0)
    }

    /// The session with `id`, mutably.
    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut DragSession<N, E>> {
        self.sessions.get_mut(id.0)
    }

    /// All sessions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (SessionId, &DragSession<N, E>)> + '_ {
        self.sessions
            .iter()
            .enumerate()
            .map(|(index, session)| (SessionId(index), session))
    }

    /// Route a press to one session. Returns `true` if it armed.
    pub fn press<S>(&mut self, id: SessionId, surface: &S, event: E) -> bool
    where
        S: Surface<Node = N>,
    {
        self.sessions
            .get_mut(id.0)
            .is_some_and(|session| session.press(surface, event))
    }

    /// Route a press on `target` to every session whose origin it is.
    ///
    /// Returns `true` if any session armed.
    pub fn pointer_down<S>(&mut self, surface: &S, target: &N, event: E) -> bool
    where
        S: Surface<Node = N>,
    {
        let mut armed = false;
        for session in self
            .sessions
            .iter_mut()
            .filter(|session| session.origin() == target)
        {
            armed |= session.press(surface, event.clone());
        }
        armed
    }

    /// Dispatch a document-wide move to every session.
    pub fn pointer_move<S>(&mut self, surface: &mut S, event: &E)
    where
        S: Surface<Node = N>,
    {
        for session in &mut self.sessions {
            session.pointer_move(surface, event);
        }
    }

    /// Dispatch a document-wide release to every session with the pointer down.
    pub fn pointer_up<S>(&mut self, surface: &mut S, event: &E)
    where
        S: Surface<Node = N>,
    {
        for session in self
            .sessions
            .iter_mut()
            .filter(|session| session.is_pointer_down())
        {
            session.release(surface, event);
        }
    }

    /// Silently return one session to idle.
    pub fn reset<S>(&mut self, id: SessionId, surface: &mut S)
    where
        S: Surface<Node = N>,
    {
        if let Some(session) = self.sessions.get_mut(id.0) {
            session.reset(surface);
        }
    }
}

impl<N, E> Default for SessionRegistry<N, E>
where
    N: Clone + PartialEq + fmt::Debug + 'static,
    E: PointerEvent + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N: fmt::Debug, E> fmt::Debug for SessionRegistry<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.sessions)
            .finish()
    }
}
