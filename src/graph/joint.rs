use crate::graph::BodyHandle;

/// The index of a joint inside a [`ContactGraph`](crate::graph::ContactGraph).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct JointHandle(pub u32);

impl JointHandle {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A constraint linking two bodies.
///
/// Read-only to the analysis passes, except for being appended to the
/// constraint list of the group its pair belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Joint {
    /// The first connected body.
    pub body1: BodyHandle,
    /// The second connected body.
    pub body2: BodyHandle,
}

impl Joint {
    /// Does this joint connect `body1` and `body2` (in either order)?
    #[inline]
    pub fn connects(&self, body1: BodyHandle, body2: BodyHandle) -> bool {
        (self.body1 == body1 && self.body2 == body2)
            || (self.body1 == body2 && self.body2 == body1)
    }

    /// The body of this joint that isn't `body`, if `body` is connected.
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
