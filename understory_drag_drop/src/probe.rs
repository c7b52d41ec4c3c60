// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-in-rectangle collision tests.
//!
//! Bounds are inclusive: a pointer lying exactly on an edge of the rectangle
//! collides with it. This differs from [`Rect::contains`], which treats the
//! right and bottom edges as exclusive.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_drag_drop::probe::intersects;
//!
//! let zone = Rect::new(100.0, 100.0, 200.0, 200.0);
//! assert!(intersects(Point::new(150.0, 150.0), zone));
//! assert!(intersects(Point::new(200.0, 100.0), zone));
//! assert!(!intersects(Point::new(200.5, 150.0), zone));
//! ```

use kurbo::{Point, Rect};

/// Returns `true` if `pointer` lies within `rect`, edges included.
///
/// `rect` is read as `(left, top, right, bottom)`. A rectangle whose right edge
/// is left of its left edge (or bottom above top) contains nothing.
#[must_use]
pub fn intersects(pointer: Point, rect: Rect) -> bool {
    rect.x0 <= pointer.x && pointer.x <= rect.x1 && rect.y0 <= pointer.y && pointer.y <= rect.y1
}

/// Iterate the `targets` whose rectangle contains `pointer`, in input order.
///
/// `rect_of` returns `None` for targets that currently have no layout; those
/// never collide.
pub fn colliding<'a, N, F>(
    pointer: Point,
    targets: &'a [N],
    mut rect_of: F,
) -> impl Iterator<Item = &'a N> + 'a
where
    F: FnMut(&N) -> Option<Rect> + 'a,
{
    targets
        .iter()
        .filter(move |target| rect_of(*target).is_some_and(|rect| intersects(pointer, rect)))
}
