use crate::graph::{BodyHandle, Contact};
use crate::math::{Isometry, Real};

/// The index of an edge inside a [`ContactGraph`](crate::graph::ContactGraph).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct EdgeHandle(pub u32);

impl EdgeHandle {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The contact state of a body pair, set once per tick by the
/// post-narrow-phase pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ContactState {
    /// The pair has not been classified this tick.
    Undefined,
    /// All contacts lie farther apart than the collision envelope.
    Separating,
    /// At least one contact lies within the collision envelope.
    Touching,
    /// At least one contact penetrates deeper than the collision envelope.
    Penetrating,
}

/// The traversal color of an edge during one group-building pass.
///
/// Transitions are monotonic within a pass: white (eligible) → grey (on the
/// traversal stack) → black (fully explored, never revisited).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum EdgeColor {
    /// Eligible for traversal.
    White,
    /// Currently on the traversal stack.
    Grey,
    /// Fully explored; excluded edges are also colored black directly.
    Black,
}

/// A contact-graph edge: the persistent record of one broad-phase-reported
/// body pair.
///
/// Edges persist across ticks; the cached relative transform, timestamp,
/// and state tags below are what the coherence analysis reads and writes.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Edge {
    /// The first body of the pair.
    pub body1: BodyHandle,
    /// The second body of the pair.
    pub body2: BodyHandle,
    /// The contact points of this pair, written by the narrow-phase
    /// collaborator after the post-broad-phase pass.
    pub contacts: Vec<Contact>,
    /// The relative transform from `body1` to `body2` computed this tick.
    pub(crate) xform: Isometry<Real>,
    /// The relative transform cached the last tick the pair moved.
    pub(crate) prev_xform: Isometry<Real>,
    /// The inverse transform, from `body2` to `body1`, refreshed whenever
    /// the cache is overwritten.
    pub(crate) inv_xform: Isometry<Real>,
    /// The last tick the broad phase reported this pair.
    pub(crate) timestamp: u32,
    /// `true` if the pair was excluded from further processing this tick.
    pub(crate) pruned: bool,
    /// `true` if the relative transform was unchanged since the last tick.
    pub(crate) relative_resting: bool,
    /// The contact state assigned by the post-narrow-phase pass.
    pub(crate) contact_state: ContactState,
    /// The traversal color of the current group-building pass.
    pub(crate) color: EdgeColor,
}

impl Edge {
    pub(crate) fn new(body1: BodyHandle, body2: BodyHandle) -> Self {
        Self {
            body1,
            body2,
            contacts: Vec::new(),
            xform: Isometry::identity(),
            prev_xform: Isometry::identity(),
            inv_xform: Isometry::identity(),
            timestamp: 0,
            pruned: false,
            relative_resting: false,
            contact_state: ContactState::Undefined,
            color: EdgeColor::White,
        }
    }

    /// The relative transform from `body1` to `body2` computed the last
    /// tick this pair moved.
    #[inline]
    pub fn xform(&self) -> &Isometry<Real> {
        &self.xform
    }

    /// The inverse relative transform, from `body2` to `body1`.
    #[inline]
    pub fn inv_xform(&self) -> &Isometry<Real> {
        &self.inv_xform
    }

    /// The last tick the broad phase reported this pair.
    #[inline]
    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    /// `true` if the pair was excluded from narrow-phase re-examination or
    /// grouping this tick.
    #[inline]
    pub fn is_pruned(&self) -> bool {
        self.pruned
    }

    /// `true` if the pair's relative transform was unchanged since the
    /// previous tick, so prior narrow-phase results can be reused.
    #[inline]
    pub fn is_relative_resting(&self) -> bool {
        self.relative_resting
    }

    /// The contact state assigned by the post-narrow-phase pass this tick.
    #[inline]
    pub fn contact_state(&self) -> ContactState {
        self.contact_state
    }

    /// The traversal color left by the last group-building pass.
    #[inline]
    pub fn color(&self) -> EdgeColor {
        self.color
    }

    /// The body of this edge that isn't `body`, if `body` is an endpoint.
    #[inline]
    pub fn other_body(&self, body: BodyHandle) -> Option<BodyHandle> {
        if self.body1 == body {
            Some(self.body2)
        } else if self.body2 == body {
            Some(self.body1)
        } else {
            None
        }
    }
}
