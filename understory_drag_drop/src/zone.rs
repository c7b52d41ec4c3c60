// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop zones: target snapshots, enter/leave transitions, and drop resolution.
//!
//! A [`DropZoneSet`] resolves its target nodes once, when a drag starts
//! ([`DropTarget::activate`]). Zones inserted after that are invisible to the
//! gesture. On every active move the colliding subset is recomputed from
//! scratch and compared with the previous one; the difference becomes leave
//! and enter notifications. On release every zone still colliding receives a
//! drop.
//!
//! Sessions without zones use [`NoDropZones`], for which every operation is a
//! no-op.
//!
//! ## Transition diff
//!
//! The diff itself is a pure function, [`transitions`]:
//!
//! ```
//! use understory_drag_drop::zone::{ZoneEvent, transitions};
//!
//! let events = transitions(&[1, 2], &[2, 3]);
//! assert_eq!(events, vec![ZoneEvent::Leave(1), ZoneEvent::Enter(3)]);
//! ```

use alloc::vec::Vec;
use core::fmt;

use crate::PointerEvent;
use crate::listener::DropListeners;
use crate::probe;
use crate::surface::{ElementSource, Surface};

/// A change in which zones the pointer overlaps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ZoneEvent<N> {
    /// The pointer started overlapping this zone.
    Enter(N),
    /// The pointer stopped overlapping this zone.
    Leave(N),
}

/// Compute the transitions from `previous` to `current` colliding zones.
///
/// All leaves come first, in `previous` order, followed by all enters, in
/// `current` order. Zones present in both produce nothing.
#[must_use]
pub fn transitions<N: Clone + PartialEq>(previous: &[N], current: &[N]) -> Vec<ZoneEvent<N>> {
    let leaves = previous
        .iter()
        .filter(|zone| !current.contains(zone))
        .cloned()
        .map(ZoneEvent::Leave);
    let enters = current
        .iter()
        .filter(|zone| !previous.contains(zone))
        .cloned()
        .map(ZoneEvent::Enter);
    leaves.chain(enters).collect()
}

/// Drop behavior attached to a drag session.
pub trait DropTarget<N, E>: fmt::Debug {
    /// Snapshot the target nodes from the live surface. Called once per drag,
    /// when the drag is confirmed.
    fn activate(&mut self, surface: &dyn Surface<Node = N>);

    /// Recompute the colliding zones for `event` and notify changes.
    fn recompute(&mut self, surface: &dyn Surface<Node = N>, event: &E, dragged: &N);

    /// Notify a drop on every colliding zone, then forget them.
    fn resolve_drop(&mut self, event: &E, dragged: &N);

    /// Discard the target snapshot.
    fn close(&mut self);

    /// Returns `true` if a snapshot is held and it contains at least one zone.
    fn can_drop(&self) -> bool;

    /// Zones the pointer currently overlaps, in target order.
    fn colliding(&self) -> &[N];
}

/// The drop target of a session that has no zones.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoDropZones;

impl<N, E> DropTarget<N, E> for NoDropZones {
    fn activate(&mut self, _surface: &dyn Surface<Node = N>) {}

    fn recompute(&mut self, _surface: &dyn Surface<Node = N>, _event: &E, _dragged: &N) {}

    fn resolve_drop(&mut self, _event: &E, _dragged: &N) {}

    fn close(&mut self) {}

    fn can_drop(&self) -> bool {
        false
    }

    fn colliding(&self) -> &[N] {
        &[]
    }
}

/// Options for attaching drop zones to a drag declaration.
pub struct DropOptions<N, E> {
    /// Zone callbacks.
    pub listeners: DropListeners<N, E>,
}

impl<N, E> DropOptions<N, E> {
    /// Options with the given listeners.
    #[must_use]
    pub fn new(listeners: DropListeners<N, E>) -> Self {
        Self { listeners }
    }
}

impl<N, E> Default for DropOptions<N, E> {
    fn default() -> Self {
        Self {
            listeners: DropListeners::new(),
        }
    }
}

impl<N, E> Clone for DropOptions<N, E> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
        }
    }
}

impl<N, E> fmt::Debug for DropOptions<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropOptions")
            .field("listeners", &self.listeners)
            .finish()
    }
}

/// Candidate drop zones for one drag session and the subset currently overlapped.
///
/// The colliding zones are always a subset of the snapshot taken at
/// activation.
pub struct DropZoneSet<N, E> {
    source: ElementSource<N>,
    targets: Option<Vec<N>>,
    colliding: Vec<N>,
    listeners: DropListeners<N, E>,
}

impl<N: Clone, E> DropZoneSet<N, E> {
    /// Zones resolved from `source`, notifying `options.listeners`.
    ///
    /// Nothing is resolved until [`DropTarget::activate`].
    #[must_use]
    pub fn new(source: ElementSource<N>, options: DropOptions<N, E>) -> Self {
        Self {
            source,
            targets: None,
            colliding: Vec::new(),
            listeners: options.listeners,
        }
    }

    /// Where targets are resolved from.
    #[must_use]
    pub fn source(&self) -> &ElementSource<N> {
        &self.source
    }

    /// The current target snapshot, if activated.
    #[must_use]
    pub fn targets(&self) -> Option<&[N]> {
        self.targets.as_deref()
    }
}

impl<N: Clone, E> Clone for DropZoneSet<N, E> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            targets: self.targets.clone(),
            colliding: self.colliding.clone(),
            listeners: self.listeners.clone(),
        }
    }
}

impl<N: fmt::Debug, E> fmt::Debug for DropZoneSet<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropZoneSet")
            .field("source", &self.source)
            .field("targets", &self.targets)
            .field("colliding", &self.colliding)
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl<N, E> DropTarget<N, E> for DropZoneSet<N, E>
where
    N: Clone + PartialEq + fmt::Debug,
    E: PointerEvent,
{
    fn activate(&mut self, surface: &dyn Surface<Node = N>) {
        let targets = self.source.resolve(surface);
        log::debug!("drop zones activated with {} target(s)", targets.len());
        self.targets = Some(targets);
        self.colliding.clear();
    }

    fn recompute(&mut self, surface: &dyn Surface<Node = N>, event: &E, dragged: &N) {
        let Some(targets) = &self.targets else {
            return;
        };
        let pointer = event.position();
        let current: Vec<N> = probe::colliding(pointer, targets, |zone| surface.bounding_rect(zone))
            .cloned()
            .collect();
        for change in transitions(&self.colliding, &current) {
            log::trace!("drop zone {change:?} at {pointer:?}");
            match change {
                ZoneEvent::Leave(zone) => self.listeners.left(event, dragged, &zone),
                ZoneEvent::Enter(zone) => self.listeners.entered(event, dragged, &zone),
            }
        }
        self.colliding = current;
    }

    fn resolve_drop(&mut self, event: &E, dragged: &N) {
        for zone in core::mem::take(&mut self.colliding) {
            self.listeners.dropped(event, dragged, &zone);
        }
    }

    fn close(&mut self) {
        self.targets = None;
        self.colliding.clear();
    }

    fn can_drop(&self) -> bool {
        self.targets.as_ref().is_some_and(|targets| !targets.is_empty())
    }

    fn colliding(&self) -> &[N] {
        &self.colliding
    }
}
