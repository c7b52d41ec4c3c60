// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One draggable element: state machine, rendering, zones and listeners.
//!
//! A [`DragSession`] lives as long as its element and runs any number of
//! gestures. Each pointer event is handled synchronously:
//!
//! - press: arm and capture the grab offset.
//! - move: once the threshold is crossed, snapshot the drop zones and fire
//!   `on_start`; then, for that move and every later one, render, recompute
//!   collisions, and fire `on_move`, in that order.
//! - release: for an active drag fire `on_end`, resolve drops, remove the
//!   floating clone. A press that never became a drag resets silently.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Vec2};

use crate::PointerEvent;
use crate::drag::{DragMode, DragPhase, DragRelease, DragState, DragThreshold, DragUpdate};
use crate::listener::DragListeners;
use crate::surface::{Render, Surface};
use crate::zone::{DropTarget, NoDropZones};

/// Options for declaring draggable elements.
pub struct DragOptions<E> {
    /// How the dragged element is rendered.
    pub mode: DragMode,
    /// Displacement required before a press becomes a drag.
    pub threshold: DragThreshold,
    /// Lifecycle callbacks.
    pub listeners: DragListeners<E>,
}

impl<E> DragOptions<E> {
    /// Move mode, default threshold, no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: DragMode::Move,
            threshold: DragThreshold::default(),
            listeners: DragListeners::new(),
        }
    }

    /// Replace the mode.
    #[must_use]
    pub fn with_mode(mut self, mode: DragMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the threshold policy.
    #[must_use]
    pub fn with_threshold(mut self, threshold: DragThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replace the listeners.
    #[must_use]
    pub fn with_listeners(mut self, listeners: DragListeners<E>) -> Self {
        self.listeners = listeners;
        self
    }
}

impl<E> Default for DragOptions<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for DragOptions<E> {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode.clone(),
            threshold: self.threshold,
            listeners: self.listeners.clone(),
        }
    }
}

impl<E> fmt::Debug for DragOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragOptions")
            .field("mode", &self.mode)
            .field("threshold", &self.threshold)
            .field("listeners", &self.listeners)
            .finish()
    }
}

/// Drag/drop state for a single draggable element.
///
/// A floating clone exists only while a copy-mode drag is active.
pub struct DragSession<N, E> {
    origin: N,
    mode: DragMode,
    state: DragState,
    press: Option<E>,
    floating: Option<N>,
    listeners: DragListeners<E>,
    zones: Box<dyn DropTarget<N, E>>,
}

impl<N, E> DragSession<N, E>
where
    N: Clone + PartialEq + fmt::Debug + 'static,
    E: PointerEvent + Clone + 'static,
{
    /// An idle session for `origin` with no drop zones.
    #[must_use]
    pub fn new(origin: N, options: DragOptions<E>) -> Self {
        Self {
            origin,
            mode: options.mode,
            state: DragState::new(options.threshold),
            press: None,
            floating: None,
            listeners: options.listeners,
            zones: Box::new(NoDropZones),
        }
    }

    /// Replace the session's drop target.
    ///
    /// Takes effect from the next drag start.
    pub fn set_drop_target(&mut self, zones: impl DropTarget<N, E> + 'static) {
        self.zones = Box::new(zones);
    }

    /// The draggable element.
    #[must_use]
    pub fn origin(&self) -> &N {
        &self.origin
    }

    /// The render mode.
    #[must_use]
    pub fn mode(&self) -> &DragMode {
        &self.mode
    }

    /// The threshold policy that confirms a drag.
    #[must_use]
    pub fn threshold(&self) -> DragThreshold {
        self.state.threshold()
    }

    /// Current phase of the gesture.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.state.phase()
    }

    /// Returns `true` while the pointer is down on this element.
    #[must_use]
    pub fn is_pointer_down(&self) -> bool {
        self.state.is_pointer_down()
    }

    /// Returns `true` while a drag is confirmed.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// Grab offset captured at press.
    #[must_use]
    pub fn offset(&self) -> Option<Vec2> {
        self.state.offset()
    }

    /// The event that armed the current gesture.
    #[must_use]
    pub fn press_event(&self) -> Option<&E> {
        self.press.as_ref()
    }

    /// The floating clone of a copy-mode drag.
    #[must_use]
    pub fn floating(&self) -> Option<&N> {
        self.floating.as_ref()
    }

    /// Zones currently under the pointer.
    #[must_use]
    pub fn colliding(&self) -> &[N] {
        self.zones.colliding()
    }

    /// Returns `true` if the drop target holds at least one zone.
    #[must_use]
    pub fn can_drop(&self) -> bool {
        self.zones.can_drop()
    }

    /// Handle a press on the origin element.
    ///
    /// Returns `false` if a drag is already active; the press is ignored.
    pub fn press<S>(&mut self, surface: &S, event: E) -> bool
    where
        S: Surface<Node = N>,
    {
        if self.state.is_dragging() {
            return false;
        }
        let pointer = event.position();
        let origin = surface.offset_origin(&self.origin).unwrap_or_else(|| {
            log::warn!(
                "press on {:?}, which has no measurable position; dragging without a grab offset",
                self.origin
            );
            pointer
        });
        self.state.press(pointer, origin);
        self.press = Some(event);
        true
    }

    /// Handle a document-wide pointer move.
    pub fn pointer_move<S>(&mut self, surface: &mut S, event: &E)
    where
        S: Surface<Node = N>,
    {
        match self.state.update(event.position()) {
            DragUpdate::Ignored | DragUpdate::Pending => {}
            DragUpdate::Started { target } => {
                log::debug!("drag of {:?} started", self.origin);
                self.zones.activate(&*surface);
                if let Some(press) = &self.press {
                    self.listeners.started(event, press);
                }
                self.frame(surface, event, target);
            }
            DragUpdate::Moved { target } => self.frame(surface, event, target),
        }
    }

    /// Handle a document-wide pointer release.
    pub fn release<S>(&mut self, surface: &mut S, event: &E)
    where
        S: Surface<Node = N>,
    {
        match self.state.release() {
            DragRelease::Ignored => {}
            DragRelease::Cancelled => {
                self.press = None;
            }
            DragRelease::Ended => {
                log::debug!("drag of {:?} ended", self.origin);
                if let Some(press) = &self.press {
                    self.listeners.ended(event, press);
                }
                self.zones.resolve_drop(event, &self.origin);
                self.zones.close();
                self.remove_floating(surface);
                self.press = None;
            }
        }
    }

    /// Return to idle without firing listeners, removing any floating clone.
    pub fn reset<S>(&mut self, surface: &mut S)
    where
        S: Surface<Node = N>,
    {
        self.state.reset();
        self.zones.close();
        self.remove_floating(surface);
        self.press = None;
    }

    fn frame<S>(&mut self, surface: &mut S, event: &E, target: Point)
    where
        S: Surface<Node = N>,
    {
        match Render::for_mode(&self.mode, target) {
            Render::Place(position) => surface.set_position(&self.origin, position),
            Render::Float(position) => {
                self.remove_floating(surface);
                self.floating = surface.spawn_floating(&self.origin, position);
            }
            Render::Skip => {
                log::warn!("{} is not a supported dragging mode", self.mode);
            }
        }
        self.zones.recompute(&*surface, event, &self.origin);
        if let Some(press) = &self.press {
            self.listeners.moved(event, press);
        }
    }

    fn remove_floating<S>(&mut self, surface: &mut S)
    where
        S: Surface<Node = N>,
    {
        if let Some(floating) = self.floating.take() {
            surface.remove_floating(floating);
        }
    }
}

impl<N: fmt::Debug, E> fmt::Debug for DragSession<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSession")
            .field("origin", &self.origin)
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("pressed", &self.press.is_some())
            .field("floating", &self.floating)
            .field("listeners", &self.listeners)
            .field("zones", &self.zones)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use kurbo::Rect;

    use crate::listener::DropListeners;
    use crate::surface::ElementSource;
    use crate::zone::{DropOptions, DropZoneSet};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Place(u32, Point),
        Spawn(u32, Point),
        Remove(u32),
    }

    /// Node 0 is the draggable at (0, 0)-(50, 50); node 1 a zone at
    /// (100, 100)-(200, 200). Floating clones get IDs from 1000.
    #[derive(Default)]
    struct Canvas {
        ops: Vec<Op>,
        next_floating: u32,
        unmeasured: bool,
    }

    impl Surface for Canvas {
        type Node = u32;

        fn offset_origin(&self, node: &u32) -> Option<Point> {
            (*node == 0 && !self.unmeasured).then_some(Point::ORIGIN)
        }

        fn bounding_rect(&self, node: &u32) -> Option<Rect> {
            match node {
                0 => Some(Rect::new(0.0, 0.0, 50.0, 50.0)),
                1 => Some(Rect::new(100.0, 100.0, 200.0, 200.0)),
                _ => None,
            }
        }

        fn query(&self, _selector: &str) -> Vec<u32> {
            alloc::vec![1]
        }

        fn set_position(&mut self, node: &u32, position: Point) {
            self.ops.push(Op::Place(*node, position));
        }

        fn spawn_floating(&mut self, node: &u32, position: Point) -> Option<u32> {
            let id = 1000 + self.next_floating;
            self.next_floating += 1;
            self.ops.push(Op::Spawn(*node, position));
            Some(id)
        }

        fn remove_floating(&mut self, floating: u32) {
            self.ops.push(Op::Remove(floating));
        }
    }

    type Calls = Rc<RefCell<Vec<&'static str>>>;

    fn session(mode: DragMode) -> (DragSession<u32, Point>, Calls) {
        let calls: Calls = Rc::default();
        let (start, moved, end) = (calls.clone(), calls.clone(), calls.clone());
        let listeners = DragListeners::new()
            .on_start(move |_, _| start.borrow_mut().push("start"))
            .on_move(move |_, _| moved.borrow_mut().push("move"))
            .on_end(move |_, _| end.borrow_mut().push("end"));
        let options = DragOptions::new()
            .with_mode(mode)
            .with_listeners(listeners);
        (DragSession::new(0, options), calls)
    }

    fn with_zone(session: &mut DragSession<u32, Point>, calls: &Calls) {
        let (enter, leave, drop) = (calls.clone(), calls.clone(), calls.clone());
        let listeners = DropListeners::new()
            .on_enter(move |_, _, _| enter.borrow_mut().push("enter"))
            .on_leave(move |_, _, _| leave.borrow_mut().push("leave"))
            .on_drop(move |_, _, _| drop.borrow_mut().push("drop"));
        session.set_drop_target(DropZoneSet::new(
            ElementSource::selector(".zone"),
            DropOptions::new(listeners),
        ));
    }

    #[test]
    fn moves_below_threshold_do_nothing() {
        let mut canvas = Canvas::default();
        let (mut drag, calls) = session(DragMode::Move);
        assert!(drag.press(&canvas, Point::new(10.0, 10.0)));
        drag.pointer_move(&mut canvas, &Point::new(12.0, 11.0));
        drag.pointer_move(&mut canvas, &Point::new(9.0, 8.0));
        assert_eq!(drag.phase(), DragPhase::Armed);
        assert!(calls.borrow().is_empty());
        assert!(canvas.ops.is_empty());

        drag.release(&mut canvas, &Point::new(9.0, 8.0));
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert!(calls.borrow().is_empty());
        assert!(drag.press_event().is_none());
    }

    #[test]
    fn move_mode_places_origin_and_fires_in_order() {
        let mut canvas = Canvas::default();
        let (mut drag, calls) = session(DragMode::Move);
        drag.press(&canvas, Point::new(10.0, 10.0));
        drag.pointer_move(&mut canvas, &Point::new(40.0, 30.0));
        drag.pointer_move(&mut canvas, &Point::new(60.0, 70.0));
        drag.release(&mut canvas, &Point::new(60.0, 70.0));

        assert_eq!(*calls.borrow(), ["start", "move", "move", "end"]);
        assert_eq!(
            canvas.ops,
            [
                Op::Place(0, Point::new(30.0, 20.0)),
                Op::Place(0, Point::new(50.0, 60.0)),
            ]
        );
        assert!(drag.offset().is_none());
    }

    #[test]
    fn copy_mode_replaces_clone_every_frame() {
        let mut canvas = Canvas::default();
        let (mut drag, _calls) = session(DragMode::Copy);
        drag.press(&canvas, Point::new(10.0, 10.0));
        drag.pointer_move(&mut canvas, &Point::new(150.0, 150.0));
        assert_eq!(drag.floating(), Some(&1000));
        drag.pointer_move(&mut canvas, &Point::new(160.0, 150.0));
        assert_eq!(drag.floating(), Some(&1001));
        drag.release(&mut canvas, &Point::new(160.0, 150.0));
        assert_eq!(drag.floating(), None);

        assert_eq!(
            canvas.ops,
            [
                Op::Spawn(0, Point::new(140.0, 140.0)),
                Op::Remove(1000),
                Op::Spawn(0, Point::new(150.0, 140.0)),
                Op::Remove(1001),
            ]
        );
    }

    #[test]
    fn unsupported_mode_skips_rendering_but_keeps_going() {
        let mut canvas = Canvas::default();
        let (mut drag, calls) = session(DragMode::parse("fling"));
        with_zone(&mut drag, &calls);
        drag.press(&canvas, Point::new(10.0, 10.0));
        drag.pointer_move(&mut canvas, &Point::new(150.0, 150.0));
        drag.release(&mut canvas, &Point::new(150.0, 150.0));
        assert!(canvas.ops.is_empty());
        assert_eq!(*calls.borrow(), ["start", "enter", "move", "end", "drop"]);
    }

    #[test]
    fn press_during_drag_is_rejected() {
        let mut canvas = Canvas::default();
        let (mut drag, _calls) = session(DragMode::Move);
        drag.press(&canvas, Point::new(10.0, 10.0));
        drag.pointer_move(&mut canvas, &Point::new(40.0, 40.0));
        assert!(!drag.press(&canvas, Point::new(45.0, 45.0)));
        assert_eq!(drag.press_event(), Some(&Point::new(10.0, 10.0)));
        assert_eq!(drag.offset(), Some(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn unmeasured_press_does_not_panic() {
        let mut canvas = Canvas {
            unmeasured: true,
            ..Canvas::default()
        };
        let (mut drag, calls) = session(DragMode::Move);
        drag.press(&canvas, Point::new(10.0, 10.0));
        assert_eq!(drag.offset(), Some(Vec2::ZERO));
        drag.pointer_move(&mut canvas, &Point::new(30.0, 30.0));
        assert_eq!(canvas.ops, [Op::Place(0, Point::new(30.0, 30.0))]);
        assert_eq!(*calls.borrow(), ["start", "move"]);
    }

    #[test]
    fn reset_is_silent_and_cleans_up() {
        let mut canvas = Canvas::default();
        let (mut drag, calls) = session(DragMode::Copy);
        with_zone(&mut drag, &calls);
        drag.press(&canvas, Point::new(10.0, 10.0));
        drag.pointer_move(&mut canvas, &Point::new(150.0, 150.0));
        calls.borrow_mut().clear();

        drag.reset(&mut canvas);
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert!(drag.floating().is_none());
        assert!(drag.colliding().is_empty());
        assert!(calls.borrow().is_empty());
        assert_eq!(canvas.ops.last(), Some(&Op::Remove(1000)));

        // A release after a reset is a no-op.
        drag.release(&mut canvas, &Point::new(150.0, 150.0));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn per_axis_threshold_from_options_governs_start() {
        let mut canvas = Canvas::default();
        let options = DragOptions::new().with_threshold(DragThreshold::PerAxis(5.0));
        let mut drag: DragSession<u32, Point> = DragSession::new(0, options);
        assert_eq!(drag.threshold(), DragThreshold::PerAxis(5.0));

        drag.press(&canvas, Point::new(10.0, 10.0));
        drag.pointer_move(&mut canvas, &Point::new(40.0, 10.0));
        assert_eq!(drag.phase(), DragPhase::Armed);
        assert!(canvas.ops.is_empty());

        drag.pointer_move(&mut canvas, &Point::new(40.0, 15.0));
        assert!(drag.is_dragging());
        assert_eq!(canvas.ops, [Op::Place(0, Point::new(30.0, 5.0))]);
    }
}
