// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state machine: press, threshold confirmation, active drag, release.
//!
//! [`DragState`] is the pure decision half of a drag session. It never touches
//! a surface or calls a listener; it only reports what a pointer event means
//! for the gesture so the caller can render and notify.
//!
//! ## Usage
//!
//! 1) Call [`DragState::press`] with the pointer position and the element's
//!    top-left corner. The pointer-to-element offset is captured here.
//! 2) On each pointer move, call [`DragState::update`]. It reports
//!    [`DragUpdate::Pending`] until the displacement from the press reaches the
//!    [`DragThreshold`], then [`DragUpdate::Started`] once, then
//!    [`DragUpdate::Moved`] for every later move.
//! 3) On pointer up, call [`DragState::release`] to learn whether a drag ended
//!    or a press was merely cancelled.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_drag_drop::drag::{DragPhase, DragRelease, DragState, DragUpdate};
//!
//! let mut drag = DragState::default();
//!
//! // Element's top-left is at (0, 0); grab it at (10, 10).
//! assert!(drag.press(Point::new(10.0, 10.0), Point::ORIGIN));
//! assert_eq!(drag.phase(), DragPhase::Armed);
//!
//! // A 2 px wiggle does not start a drag.
//! assert_eq!(drag.update(Point::new(11.0, 11.0)), DragUpdate::Pending);
//!
//! // Far enough: the element's new top-left keeps the grab offset.
//! assert_eq!(
//!     drag.update(Point::new(105.0, 105.0)),
//!     DragUpdate::Started { target: Point::new(95.0, 95.0) }
//! );
//!
//! assert_eq!(drag.release(), DragRelease::Ended);
//! assert_eq!(drag.phase(), DragPhase::Idle);
//! ```

use alloc::string::String;
use core::fmt;

use kurbo::{Point, Vec2};

/// Displacement used by [`DragThreshold::default`], in pixels.
pub const DEFAULT_THRESHOLD: f64 = 5.0;

/// How a drag session renders the dragged element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragMode {
    /// Reposition the element itself.
    #[default]
    Move,
    /// Leave the element in place and drag a translucent floating clone.
    Copy,
    /// A mode name that is not understood.
    ///
    /// Sessions in this mode still track the gesture and fire listeners, but
    /// skip positional updates and emit a warning every frame.
    Unsupported(String),
}

impl DragMode {
    /// Parse a mode name: `"move"` or `"copy"`.
    ///
    /// Any other name becomes [`DragMode::Unsupported`]; it is not rejected.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "move" => Self::Move,
            "copy" => Self::Copy,
            other => Self::Unsupported(String::from(other)),
        }
    }

    /// The mode's name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Move => "move",
            Self::Copy => "copy",
            Self::Unsupported(name) => name,
        }
    }
}

impl fmt::Display for DragMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum displacement from the press position before a press becomes a drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DragThreshold {
    /// `|dx| + |dy| >= distance`.
    Manhattan(f64),
    /// `|dx| >= distance && |dy| >= distance`.
    ///
    /// Purely horizontal or vertical movement never starts a drag under this
    /// policy.
    PerAxis(f64),
}

impl Default for DragThreshold {
    fn default() -> Self {
        Self::Manhattan(DEFAULT_THRESHOLD)
    }
}

impl DragThreshold {
    /// Returns `true` if a displacement of `delta` confirms a drag.
    #[must_use]
    pub fn is_reached(self, delta: Vec2) -> bool {
        let dx = delta.x.abs();
        let dy = delta.y.abs();
        match self {
            Self::Manhattan(distance) => dx + dy >= distance,
            Self::PerAxis(distance) => dx >= distance && dy >= distance,
        }
    }
}

/// Where a [`DragState`] is in its gesture.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// No pointer is down on the element.
    #[default]
    Idle,
    /// Pointer is down but has not moved past the threshold.
    Armed,
    /// Drag confirmed.
    Active,
}

/// What a pointer move means for the gesture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DragUpdate {
    /// The state is idle; the move is not ours.
    Ignored,
    /// Pointer is down but still inside the threshold.
    Pending,
    /// This move confirmed the drag. `target` is where the element's top-left
    /// belongs for this same move.
    Started {
        /// Offset-adjusted top-left position.
        target: Point,
    },
    /// The drag was already active.
    Moved {
        /// Offset-adjusted top-left position.
        target: Point,
    },
}

impl DragUpdate {
    /// The offset-adjusted position, if this move is part of an active drag.
    #[must_use]
    pub fn target(self) -> Option<Point> {
        match self {
            Self::Started { target } | Self::Moved { target } => Some(target),
            Self::Ignored | Self::Pending => None,
        }
    }
}

/// What a pointer release means for the gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragRelease {
    /// Nothing was pressed.
    Ignored,
    /// The press never crossed the threshold; no drag happened.
    Cancelled,
    /// An active drag ended.
    Ended,
}

/// Tracks one element's press/drag gesture.
///
/// The offset is defined exactly while the phase is [`DragPhase::Armed`] or
/// [`DragPhase::Active`].
#[derive(Clone, Debug, Default)]
pub struct DragState {
    threshold: DragThreshold,
    phase: DragPhase,
    press_pos: Option<Point>,
    offset: Option<Vec2>,
}

impl DragState {
    /// Create an idle state that confirms drags with `threshold`.
    #[must_use]
    pub const fn new(threshold: DragThreshold) -> Self {
        Self {
            threshold,
            phase: DragPhase::Idle,
            press_pos: None,
            offset: None,
        }
    }

    /// The threshold policy in use.
    #[must_use]
    pub fn threshold(&self) -> DragThreshold {
        self.threshold
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Returns `true` while the pointer is down (armed or active).
    #[must_use]
    pub fn is_pointer_down(&self) -> bool {
        self.phase != DragPhase::Idle
    }

    /// Returns `true` while a drag is confirmed.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Active
    }

    /// Pointer position recorded at press.
    #[must_use]
    pub fn press_position(&self) -> Option<Point> {
        self.press_pos
    }

    /// Pointer position minus the element's top-left corner at press.
    #[must_use]
    pub fn offset(&self) -> Option<Vec2> {
        self.offset
    }

    /// Arm the state with a press at `pointer` on an element whose top-left is `origin`.
    ///
    /// A press while already armed re-arms with the new position. A press while
    /// active is rejected and returns `false`.
    pub fn press(&mut self, pointer: Point, origin: Point) -> bool {
        if self.phase == DragPhase::Active {
            return false;
        }
        self.phase = DragPhase::Armed;
        self.press_pos = Some(pointer);
        self.offset = Some(pointer - origin);
        true
    }

    /// Feed a pointer move.
    pub fn update(&mut self, pointer: Point) -> DragUpdate {
        let (Some(moved), Some(offset)) = (self.total_offset(pointer), self.offset) else {
            return DragUpdate::Ignored;
        };
        let target = pointer - offset;
        match self.phase {
            DragPhase::Idle => DragUpdate::Ignored,
            DragPhase::Active => DragUpdate::Moved { target },
            DragPhase::Armed => {
                if self.threshold.is_reached(moved) {
                    self.phase = DragPhase::Active;
                    DragUpdate::Started { target }
                } else {
                    DragUpdate::Pending
                }
            }
        }
    }

    /// Total displacement of `pointer` from the press position.
    #[must_use]
    pub fn total_offset(&self, pointer: Point) -> Option<Vec2> {
        self.press_pos.map(|press| pointer - press)
    }

    /// Feed a pointer release and return to idle.
    pub fn release(&mut self) -> DragRelease {
        let outcome = match self.phase {
            DragPhase::Idle => DragRelease::Ignored,
            DragPhase::Armed => DragRelease::Cancelled,
            DragPhase::Active => DragRelease::Ended,
        };
        self.reset();
        outcome
    }

    /// Return to idle without reporting anything.
    pub fn reset(&mut self) {
        self.phase = DragPhase::Idle;
        self.press_pos = None;
        self.offset = None;
    }
}
