use crate::math::{Point, Real};

/// A contact point between two bodies, produced by the narrow-phase
/// collaborator.
///
/// Read-only to the analysis passes: they take the minimum `dist` across an
/// edge's contacts to classify the pair, and copy surviving contacts into
/// the output groups.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Contact {
    /// The signed separation distance. Negative if the bodies penetrate.
    pub dist: Real,
    /// The world-space contact position.
    pub position: Point<Real>,
}

impl Contact {
    /// Creates a contact from its separation distance and position.
    pub fn new(dist: Real, position: Point<Real>) -> Self {
        Self { dist, position }
    }
}
