use crate::graph::{EdgeHandle, JointHandle};
use crate::math::{Isometry, Real};
use smallvec::SmallVec;

/// The index of a body inside a [`ContactGraph`](crate::graph::ContactGraph).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BodyHandle(pub u32);

impl BodyHandle {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// Flags describing how a body participates in the simulation.
pub struct BodyFlags(u8);

bitflags::bitflags! {
    impl BodyFlags: u8 {
        /// The body takes part in the simulation. Inactive bodies are
        /// excluded from coherence analysis and grouping.
        const ACTIVE = 1;
        /// The body never moves (static environment geometry).
        const FIXED = 1 << 1;
        /// The body's motion is animated externally instead of being
        /// produced by the constraint solver.
        const SCRIPTED = 1 << 2;
        /// The body is a candidate for deactivation.
        const SLEEPY = 1 << 3;
    }
}

/// A rigid body vertex of the contact graph.
///
/// The pose and flags are owned by the caller. The previous-pose cache, the
/// absolute-rest flag, and the group tag are analyzer bookkeeping and are
/// only mutated by the analysis passes.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Body {
    /// The current pose of this body.
    pub pose: Isometry<Real>,
    /// The participation flags of this body.
    pub flags: BodyFlags,
    /// The pose cached the last tick this body was seen moving.
    pub(crate) prev_pose: Isometry<Real>,
    /// `true` if the pose was within tolerance of the cache at the last
    /// rest-state update.
    pub(crate) absolute_resting: bool,
    /// The simulation group this body was assigned to (0 = ungrouped).
    pub(crate) group_tag: u32,
    /// Edges incident to this body.
    pub(crate) edges: SmallVec<[EdgeHandle; 8]>,
    /// Joints attached to this body.
    pub(crate) joints: SmallVec<[JointHandle; 4]>,
}

impl Body {
    /// Creates a body with the given pose and flags.
    ///
    /// The previous-pose cache starts equal to the pose, so a body that
    /// never moves reports absolute rest from the first tick on.
    pub fn new(pose: Isometry<Real>, flags: BodyFlags) -> Self {
        Self {
            pose,
            flags,
            prev_pose: pose,
            absolute_resting: false,
            group_tag: 0,
            edges: SmallVec::new(),
            joints: SmallVec::new(),
        }
    }

    /// Is this body taking part in the simulation?
    #[inline]
    pub fn is_active(&self) -> bool {
        self.flags.contains(BodyFlags::ACTIVE)
    }

    /// Is this body static environment geometry?
    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.flags.contains(BodyFlags::FIXED)
    }

    /// Is this body animated externally?
    #[inline]
    pub fn is_scripted(&self) -> bool {
        self.flags.contains(BodyFlags::SCRIPTED)
    }

    /// Is this body a candidate for deactivation?
    #[inline]
    pub fn is_sleepy(&self) -> bool {
        self.flags.contains(BodyFlags::SLEEPY)
    }

    /// `true` if this body's pose was unchanged (within tolerance) since the
    /// previous tick's rest-state update.
    #[inline]
    pub fn is_absolute_resting(&self) -> bool {
        self.absolute_resting
    }

    /// The simulation group this body was assigned to by the last
    /// group-building pass (0 = ungrouped).
    #[inline]
    pub fn group_tag(&self) -> u32 {
        self.group_tag
    }

    /// The edges incident to this body.
    #[inline]
    pub fn incident_edges(&self) -> &[EdgeHandle] {
        &self.edges
    }

    /// The joints attached to this body.
    #[inline]
    pub fn attached_joints(&self) -> &[JointHandle] {
        &self.joints
    }
}
