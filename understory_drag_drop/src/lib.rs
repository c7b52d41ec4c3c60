// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drag_drop --heading-base-level=0

//! Understory Drag Drop: press, drag and drop state machines for pointer-driven UI.
//!
//! This crate implements click-and-drag interaction for arbitrary UI nodes:
//! pressing on a draggable node, moving the pointer to reposition it (or a
//! floating clone of it), detecting overlap with drop zones, and firing
//! lifecycle listeners in a fixed order.
//!
//! The crate does not create, measure or style nodes. A host implements
//! [`Surface`] over its own node handles (DOM elements, scene IDs, test
//! fixtures) and routes its pointer input into a [`SessionRegistry`].
//!
//! - [`probe`]: inclusive pointer-in-rectangle collision tests.
//! - [`drag`]: the pure press → threshold → drag → release state machine.
//! - [`surface`]: host capabilities and per-frame render commands.
//! - [`listener`]: optional typed callbacks for drag and drop events.
//! - [`zone`]: drop zone snapshots and enter/leave/drop resolution.
//! - [`session`]: one draggable node, tying the pieces together.
//! - [`registry`]: all sessions, plus global move/release dispatch.
//!
//! ## Event order
//!
//! For one gesture on a session with drop zones attached:
//!
//! 1. Press arms the session and captures the grab offset. Nothing fires.
//! 2. Moves inside the threshold do nothing.
//! 3. The move that crosses the threshold snapshots the drop zones, fires
//!    `on_start`, and is then handled like any active move.
//! 4. Each active move renders, fires `on_leave`/`on_enter` for changed zones,
//!    then fires `on_move`.
//! 5. Release fires `on_end`, then `on_drop` for every zone still under the
//!    pointer, then removes the floating clone.
//!
//! A release before the threshold was crossed fires nothing.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Rect};
//! use understory_drag_drop::{
//!     DragListeners, DragOptions, DragSession, DropListeners, DropOptions, DropZoneSet,
//!     ElementSource, Surface,
//! };
//!
//! #[derive(Default)]
//! struct Scene {
//!     placed: Vec<Point>,
//! }
//!
//! impl Surface for Scene {
//!     type Node = &'static str;
//!     fn offset_origin(&self, _: &&'static str) -> Option<Point> {
//!         Some(Point::ORIGIN)
//!     }
//!     fn bounding_rect(&self, node: &&'static str) -> Option<Rect> {
//!         (*node == "bin").then(|| Rect::new(100.0, 100.0, 200.0, 200.0))
//!     }
//!     fn query(&self, _: &str) -> Vec<&'static str> {
//!         vec!["bin"]
//!     }
//!     fn set_position(&mut self, _: &&'static str, at: Point) {
//!         self.placed.push(at);
//!     }
//!     fn spawn_floating(&mut self, _: &&'static str, _: Point) -> Option<&'static str> {
//!         None
//!     }
//!     fn remove_floating(&mut self, _: &'static str) {}
//! }
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let (a, b, c) = (log.clone(), log.clone(), log.clone());
//!
//! let mut scene = Scene::default();
//! let mut card = DragSession::new(
//!     "card",
//!     DragOptions::new().with_listeners(
//!         DragListeners::new()
//!             .on_start(move |_, _| a.borrow_mut().push("start"))
//!             .on_end(move |_, _| b.borrow_mut().push("end")),
//!     ),
//! );
//! card.set_drop_target(DropZoneSet::new(
//!     ElementSource::selector(".bin"),
//!     DropOptions::new(DropListeners::new().on_drop(move |_, _, zone| {
//!         c.borrow_mut().push(*zone);
//!     })),
//! ));
//!
//! card.press(&scene, Point::new(10.0, 10.0));
//! card.pointer_move(&mut scene, &Point::new(150.0, 150.0));
//! card.release(&mut scene, &Point::new(150.0, 150.0));
//!
//! assert_eq!(*log.borrow(), ["start", "end", "bin"]);
//! assert_eq!(scene.placed, [Point::new(140.0, 140.0)]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): build Kurbo and `log` against the standard library.
//! - `libm`: use `libm` for Kurbo's float math in `no_std` builds.
//!
//! This crate is `no_std` compatible (with `alloc`) for all modules.

#![no_std]

extern crate alloc;

use kurbo::Point;

pub mod drag;
pub mod error;
pub mod listener;
pub mod probe;
pub mod registry;
pub mod session;
pub mod surface;
pub mod zone;

pub use drag::{DragMode, DragPhase, DragThreshold};
pub use error::ConfigError;
pub use listener::{DragListeners, DropListeners};
pub use registry::{Declaration, SessionId, SessionRegistry};
pub use session::{DragOptions, DragSession};
pub use surface::{ElementSource, Render, Surface};
pub use zone::{DropOptions, DropTarget, DropZoneSet, NoDropZones};

/// A pointer event as seen by the drag/drop core.
///
/// Positions of press, move and release events, offsets from
/// [`Surface::offset_origin`] and rectangles from [`Surface::bounding_rect`]
/// must all share one coordinate space.
pub trait PointerEvent {
    /// Pointer position.
    fn position(&self) -> Point;
}

impl PointerEvent for Point {
    fn position(&self) -> Point {
        *self
    }
}
