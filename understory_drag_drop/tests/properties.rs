// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for thresholds, start uniqueness and collision sets.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use proptest::prelude::*;
use understory_drag_drop::drag::{DragState, DragUpdate};
use understory_drag_drop::probe::intersects;
use understory_drag_drop::{
    DragListeners, DragOptions, DragSession, DropOptions, DropTarget, DropZoneSet, ElementSource,
    Surface,
};

/// Zone `i` is `rects[i]`; node `usize::MAX` is the draggable at the origin.
struct Grid {
    rects: Vec<Rect>,
}

impl Surface for Grid {
    type Node = usize;

    fn offset_origin(&self, _node: &usize) -> Option<Point> {
        Some(Point::ORIGIN)
    }

    fn bounding_rect(&self, node: &usize) -> Option<Rect> {
        self.rects.get(*node).copied()
    }

    fn query(&self, _selector: &str) -> Vec<usize> {
        (0..self.rects.len()).collect()
    }

    fn set_position(&mut self, _node: &usize, _position: Point) {}

    fn spawn_floating(&mut self, _node: &usize, _position: Point) -> Option<usize> {
        None
    }

    fn remove_floating(&mut self, _floating: usize) {}
}

fn coord() -> impl Strategy<Value = f64> {
    (-500_i32..500).prop_map(f64::from)
}

fn point() -> impl Strategy<Value = Point> {
    (coord(), coord()).prop_map(|(x, y)| Point::new(x, y))
}

fn rect() -> impl Strategy<Value = Rect> {
    (point(), 0_i32..300, 0_i32..300)
        .prop_map(|(p, w, h)| Rect::new(p.x, p.y, p.x + f64::from(w), p.y + f64::from(h)))
}

proptest! {
    #[test]
    fn sub_threshold_wiggles_never_start(
        press in point(),
        wiggles in prop::collection::vec((-2_i32..=2, -2_i32..=2), 0..50),
    ) {
        let mut drag = DragState::default();
        drag.press(press, Point::ORIGIN);
        for (dx, dy) in wiggles {
            let at = Point::new(press.x + f64::from(dx), press.y + f64::from(dy));
            prop_assert_eq!(drag.update(at), DragUpdate::Pending);
        }
        prop_assert!(!drag.is_dragging());
    }

    #[test]
    fn start_fires_exactly_once_per_gesture(
        moves in prop::collection::vec(point(), 1..40),
        gestures in 1_usize..4,
    ) {
        let starts = Rc::new(RefCell::new(0_usize));
        let counter = starts.clone();
        let mut grid = Grid { rects: Vec::new() };
        let mut session = DragSession::new(
            usize::MAX,
            DragOptions::new().with_listeners(
                DragListeners::new()
                    .on_start(move |_: &Point, _: &Point| *counter.borrow_mut() += 1),
            ),
        );

        let mut expected = 0;
        for _ in 0..gestures {
            session.press(&grid, Point::ORIGIN);
            let mut crossed = false;
            for at in &moves {
                session.pointer_move(&mut grid, at);
                crossed |= at.x.abs() + at.y.abs() >= 5.0;
            }
            if crossed {
                expected += 1;
            }
            prop_assert_eq!(session.is_dragging(), crossed);
            session.release(&mut grid, moves.last().unwrap());
        }
        prop_assert_eq!(*starts.borrow(), expected);
    }

    #[test]
    fn colliding_is_exactly_the_containing_zones(
        rects in prop::collection::vec(rect(), 0..12),
        path in prop::collection::vec(point(), 1..20),
    ) {
        let grid = Grid { rects };
        let mut zones: DropZoneSet<usize, Point> =
            DropZoneSet::new(ElementSource::selector(".zone"), DropOptions::default());
        zones.activate(&grid);

        for at in path {
            zones.recompute(&grid, &at, &usize::MAX);
            let expected: Vec<usize> = grid
                .rects
                .iter()
                .enumerate()
                .filter(|(_, r)| intersects(at, **r))
                .map(|(i, _)| i)
                .collect();
            prop_assert_eq!(zones.colliding(), expected.as_slice());
        }
    }

    #[test]
    fn every_enter_is_matched_by_at_most_one_leave(
        path in prop::collection::vec(point(), 1..40),
    ) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (enter, leave) = (log.clone(), log.clone());
        let grid = Grid { rects: vec![Rect::new(-100.0, -100.0, 100.0, 100.0)] };
        let listeners = understory_drag_drop::DropListeners::new()
            .on_enter(move |_: &Point, _: &usize, _: &usize| enter.borrow_mut().push(true))
            .on_leave(move |_: &Point, _: &usize, _: &usize| leave.borrow_mut().push(false));
        let mut zones =
            DropZoneSet::new(ElementSource::selector(".zone"), DropOptions::new(listeners));
        zones.activate(&grid);
        for at in &path {
            zones.recompute(&grid, at, &usize::MAX);
        }

        // Enters and leaves strictly alternate, starting with an enter.
        for (i, entered) in log.borrow().iter().enumerate() {
            prop_assert_eq!(*entered, i % 2 == 0);
        }
    }
}
