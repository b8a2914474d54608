use crate::math::Real;

/// Indicates an invalid analyzer configuration.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum InvalidParams {
    /// The collision envelope must be finite and positive.
    #[error("the collision envelope must be finite and positive (found {0}).")]
    CollisionEnvelope(Real),
}

/// The scene-wide configuration bound to a
/// [`CoherenceAnalyzer`](crate::analysis::CoherenceAnalyzer).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct AnalyzerParams {
    collision_envelope: Real,
}

impl AnalyzerParams {
    /// Creates a configuration from the collision envelope: the distance
    /// threshold separating "touching" from fully separated pairs.
    pub fn new(collision_envelope: Real) -> Result<Self, InvalidParams> {
        if !collision_envelope.is_finite() || collision_envelope <= 0.0 {
            return Err(InvalidParams::CollisionEnvelope(collision_envelope));
        }

        Ok(Self { collision_envelope })
    }

    /// The collision envelope bound to this configuration.
    #[inline]
    pub fn collision_envelope(&self) -> Real {
        self.collision_envelope
    }
}
