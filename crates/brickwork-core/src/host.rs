//! Capabilities consumed from the host rendering environment.
//!
//! Brickwork never renders anything itself. A grid reads geometry from, and
//! writes positions to, whatever environment owns the actual elements through
//! the narrow [`Host`] trait. The headless [`Scene`](crate::scene::Scene) is one
//! implementation; a browser or a native widget tree would be another.

use std::{fmt, hash::Hash};

use crate::geometry::{Point, Size};

/// Identifies the grid container, either directly or by selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerRef<H> {
    /// A handle the host already resolved.
    Handle(H),
    /// A selector string the host resolves on every lookup.
    Selector(String),
}

impl<H> ContainerRef<H> {
    /// Creates a selector reference.
    pub fn selector(selector: impl Into<String>) -> Self {
        Self::Selector(selector.into())
    }

    /// Returns the selector string, if this reference is a selector.
    pub fn as_selector(&self) -> Option<&str> {
        match self {
            Self::Selector(selector) => Some(selector),
            Self::Handle(_) => None,
        }
    }
}

impl<H: fmt::Debug> fmt::Display for ContainerRef<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handle(handle) => write!(f, "{handle:?}"),
            Self::Selector(selector) => write!(f, "`{selector}`"),
        }
    }
}

/// How an element participates in positioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionMode {
    /// Left in normal flow (host default).
    #[default]
    Static,
    /// Establishes the coordinate space for absolutely positioned children.
    Relative,
    /// Placed at explicit coordinates within the containing element.
    Absolute,
}

/// Technique used to move an item to its computed position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Positioning {
    /// Set the `top` and `left` offsets.
    #[default]
    Offset,
    /// Apply a 2D translate transform.
    Transform,
}

/// Transition applied to items so that position changes animate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    positioning: Positioning,
    duration_secs: f32,
}

impl Transition {
    /// Duration of the position transition, in seconds.
    pub const DEFAULT_DURATION_SECS: f32 = 0.2;

    /// Creates the default eased transition for the given positioning technique.
    pub fn ease(positioning: Positioning) -> Self {
        Self {
            positioning,
            duration_secs: Self::DEFAULT_DURATION_SECS,
        }
    }

    /// Returns the positioning technique the transition animates.
    pub fn positioning(self) -> Positioning {
        self.positioning
    }

    /// Returns the transition duration in seconds.
    pub fn duration_secs(self) -> f32 {
        self.duration_secs
    }

    /// Returns the animated style properties, e.g. `"top, left"`.
    pub fn properties(self) -> &'static str {
        match self.positioning {
            Positioning::Offset => "top, left",
            Positioning::Transform => "transform",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}s ease",
            self.properties(),
            self.duration_secs
        )
    }
}

/// The narrow surface a grid needs from its rendering environment.
///
/// All methods are infallible: an element that disappeared between a query
/// and a mutation is simply ignored by the host, and the next layout pass
/// re-queries everything anyway.
pub trait Host {
    /// Opaque element handle. Identity (`Eq`/`Hash`) is used to remember
    /// which items were already styled.
    type Handle: Clone + Eq + Hash + fmt::Debug;

    /// Resolves a container reference, or `None` if it is not (yet) present.
    fn resolve(&self, target: &ContainerRef<Self::Handle>) -> Option<Self::Handle>;

    /// Returns the live, ordered children of a container.
    fn children(&self, container: &Self::Handle) -> Vec<Self::Handle>;

    /// Measures the bounding rectangle of an element.
    fn measure(&self, handle: &Self::Handle) -> Size;

    fn set_position_mode(&mut self, handle: &Self::Handle, mode: PositionMode);

    fn set_transition(&mut self, handle: &Self::Handle, transition: Transition);

    /// Moves an item to `position`, relative to its container's top-left corner.
    fn set_position(&mut self, item: &Self::Handle, position: Point, positioning: Positioning);

    fn set_container_height(&mut self, container: &Self::Handle, height: f32);

    /// Subscribes to viewport resize notifications.
    ///
    /// After this call the host's event loop is expected to forward every
    /// resize to the grid.
    fn watch_resize(&mut self);
}
