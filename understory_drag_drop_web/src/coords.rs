// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between the two spaces the DOM adapter writes into.
//!
//! Grab origins come from `offsetLeft`/`offsetTop`, so drag targets are in the
//! element's offset-parent space, which is where its `left`/`top` resolve.
//! Floating clones live under `<body>` and need page coordinates.

use kurbo::{Point, Rect};

/// Page position for a clone of an element whose layout target is `target`.
///
/// `layout_origin` is the element's `offsetLeft`/`offsetTop` and `page_rect`
/// its border box in page coordinates, both measured now.
pub(crate) fn page_position(target: Point, layout_origin: Point, page_rect: Rect) -> Point {
    target + (page_rect.origin() - layout_origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_drag_drop::drag::{DragState, DragUpdate};

    // Container positioned at page (200, 200); element at (30, 40) inside it.
    const LAYOUT: Point = Point::new(30.0, 40.0);
    const PAGE: Rect = Rect::new(230.0, 240.0, 280.0, 290.0);

    #[test]
    fn element_in_positioned_container_follows_pointer() {
        let mut drag = DragState::default();
        let press = Point::new(235.0, 245.0);
        drag.press(press, LAYOUT);

        let update = drag.update(Point::new(255.0, 255.0));
        let DragUpdate::Started { target } = update else {
            panic!("expected a start, got {update:?}");
        };
        // `left`/`top` move by the pointer delta, not by the container's page origin.
        assert_eq!(target, Point::new(50.0, 50.0));
    }

    #[test]
    fn clone_lands_under_the_pointer_in_page_space() {
        let mut drag = DragState::default();
        let press = Point::new(235.0, 245.0);
        drag.press(press, LAYOUT);
        let pointer = Point::new(255.0, 255.0);
        let target = drag.update(pointer).target().unwrap();

        let at = page_position(target, LAYOUT, PAGE);
        assert_eq!(at, Point::new(250.0, 250.0));
        assert_eq!(pointer - at, press - PAGE.origin());
    }

    #[test]
    fn unpositioned_parent_is_identity() {
        let rect = Rect::new(30.0, 40.0, 80.0, 90.0);
        let target = Point::new(12.0, 7.0);
        assert_eq!(page_position(target, rect.origin(), rect), target);
    }
}
