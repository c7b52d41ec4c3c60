// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capabilities and the render commands a drag frame produces.
//!
//! The drag state machine never creates, measures or styles nodes itself. It
//! asks a [`Surface`] for what it needs and hands it a [`Render`] command for
//! each active frame. A DOM adapter implements [`Surface`] over real elements;
//! tests implement it over plain IDs and rectangles.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::drag::DragMode;

/// Node-level capabilities the drag/drop core calls into.
///
/// `Node` is a cheap handle (an element reference, an ID). Equality must mean
/// "same node", not structural equality.
pub trait Surface {
    /// Handle type for nodes on this surface.
    type Node: Clone + PartialEq;

    /// Top-left position of `node` in the coordinate space of pointer events.
    ///
    /// `None` if the node has no layout.
    fn offset_origin(&self, node: &Self::Node) -> Option<Point>;

    /// Bounding rectangle of `node` as `(left, top, right, bottom)`.
    ///
    /// `None` if the node has no layout.
    fn bounding_rect(&self, node: &Self::Node) -> Option<Rect>;

    /// All nodes currently matching `selector`, in document order.
    fn query(&self, selector: &str) -> Vec<Self::Node>;

    /// Position `node` absolutely with its top-left at `position`.
    fn set_position(&mut self, node: &Self::Node, position: Point);

    /// Create a translucent visual duplicate of `node` at `position`, attached to
    /// the surface root, and return its handle.
    fn spawn_floating(&mut self, node: &Self::Node, position: Point) -> Option<Self::Node>;

    /// Detach and discard a node previously returned by [`Surface::spawn_floating`].
    fn remove_floating(&mut self, floating: Self::Node);
}

/// A set of nodes named either by selector or by explicit handles.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementSource<N> {
    /// Resolved with [`Surface::query`] every time it is needed.
    Selector(String),
    /// A fixed list of handles.
    Nodes(Vec<N>),
}

impl<N> ElementSource<N> {
    /// Source matching `selector`.
    #[must_use]
    pub fn selector(selector: impl Into<String>) -> Self {
        Self::Selector(selector.into())
    }

    /// Source consisting of exactly `nodes`.
    #[must_use]
    pub fn nodes(nodes: impl IntoIterator<Item = N>) -> Self {
        Self::Nodes(nodes.into_iter().collect())
    }
}

impl<N: Clone + PartialEq> ElementSource<N> {
    /// Resolve against the current state of `surface`.
    pub fn resolve(&self, surface: &dyn Surface<Node = N>) -> Vec<N> {
        match self {
            Self::Selector(selector) => surface.query(selector),
            Self::Nodes(nodes) => nodes.clone(),
        }
    }
}

/// How one active drag frame should be drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Render {
    /// Move the origin element's top-left to this position.
    Place(Point),
    /// Replace the floating clone with a fresh one at this position.
    Float(Point),
    /// No positional update this frame.
    Skip,
}

impl Render {
    /// The command for a frame of `mode` whose offset-adjusted top-left is `target`.
    #[must_use]
    pub fn for_mode(mode: &DragMode, target: Point) -> Self {
        match mode {
            DragMode::Move => Self::Place(target),
            DragMode::Copy => Self::Float(target),
            DragMode::Unsupported(_) => Self::Skip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_selects_render_command() {
        let at = Point::new(3.0, 4.0);
        assert_eq!(Render::for_mode(&DragMode::Move, at), Render::Place(at));
        assert_eq!(Render::for_mode(&DragMode::Copy, at), Render::Float(at));
        assert_eq!(Render::for_mode(&DragMode::parse("fling"), at), Render::Skip);
    }

    /// Answers every query with the nodes whose label starts with the selector.
    struct Labels(Vec<&'static str>);

    impl Surface for Labels {
        type Node = &'static str;

        fn offset_origin(&self, _node: &&'static str) -> Option<Point> {
            None
        }

        fn bounding_rect(&self, _node: &&'static str) -> Option<Rect> {
            None
        }

        fn query(&self, selector: &str) -> Vec<&'static str> {
            self.0
                .iter()
                .copied()
                .filter(|label| label.starts_with(selector))
                .collect()
        }

        fn set_position(&mut self, _node: &&'static str, _position: Point) {}

        fn spawn_floating(
            &mut self,
            _node: &&'static str,
            _position: Point,
        ) -> Option<&'static str> {
            None
        }

        fn remove_floating(&mut self, _floating: &'static str) {}
    }

    fn resolve_all<N: Clone + PartialEq>(
        sources: &[ElementSource<N>],
        surface: &dyn Surface<Node = N>,
    ) -> Vec<Vec<N>> {
        sources.iter().map(|source| source.resolve(surface)).collect()
    }

    #[test]
    fn sources_resolve_through_any_surface() {
        let mut labels = Labels(alloc::vec!["zone-a", "box", "zone-b"]);
        let sources = [ElementSource::selector("zone"), ElementSource::nodes(["box", "gone"])];
        assert_eq!(
            resolve_all(&sources, &labels),
            [alloc::vec!["zone-a", "zone-b"], alloc::vec!["box", "gone"]]
        );

        // Selectors see the surface as it is now; explicit nodes do not change.
        labels.0.push("zone-c");
        assert_eq!(sources[0].resolve(&labels), ["zone-a", "zone-b", "zone-c"]);
        assert_eq!(sources[1].resolve(&labels), ["box", "gone"]);
    }
}
