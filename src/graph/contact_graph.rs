use crate::graph::{Body, BodyHandle, Edge, EdgeHandle, Joint, JointHandle};
use crate::utils::SortedPair;
use slab::Slab;
use std::collections::HashMap;

/// Indicates an inconsistency while editing a [`ContactGraph`].
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum GraphError {
    /// Both endpoints of a pair are the same body.
    #[error("both endpoints of the pair are the same body {0:?}.")]
    SelfPair(BodyHandle),
    /// A body handle does not designate a live body.
    #[error("the body handle {0:?} does not designate a live body.")]
    UnknownBody(BodyHandle),
    /// An edge handle does not designate a live edge.
    #[error("the edge handle {0:?} does not designate a live edge.")]
    UnknownEdge(EdgeHandle),
    /// A joint handle does not designate a live joint.
    #[error("the joint handle {0:?} does not designate a live joint.")]
    UnknownJoint(JointHandle),
    /// An edge between the two bodies already exists.
    #[error("an edge between {0:?} and {1:?} already exists.")]
    DuplicatePair(BodyHandle, BodyHandle),
    /// A body cannot be removed while edges or joints are attached to it.
    #[error("the body {0:?} still has incident edges or attached joints.")]
    BodyStillConnected(BodyHandle),
}

/// The persistent contact graph of a simulation: bodies, pair edges, and
/// joints, with the adjacency needed by the analysis passes.
///
/// Bodies, edges, and joints are stored in arenas with stable indices, so
/// the handles held by edges and adjacency lists stay valid across
/// insertions and removals. At most one edge exists per unordered body
/// pair.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ContactGraph {
    pub(crate) bodies: Slab<Body>,
    pub(crate) edges: Slab<Edge>,
    pub(crate) joints: Slab<Joint>,
    pair_map: HashMap<SortedPair<BodyHandle>, EdgeHandle>,
}

impl ContactGraph {
    /// Creates an empty contact graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of live bodies.
    #[inline]
    pub fn num_bodies(&self) -> usize {
        self.bodies.len()
    }

    /// The number of live edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// The number of live joints.
    #[inline]
    pub fn num_joints(&self) -> usize {
        self.joints.len()
    }

    /// Inserts a body and returns its handle.
    pub fn insert_body(&mut self, body: Body) -> BodyHandle {
        BodyHandle(self.bodies.insert(body) as u32)
    }

    /// Removes a body with no incident edges and no attached joints.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<Body, GraphError> {
        let body = self
            .bodies
            .get(handle.index())
            .ok_or(GraphError::UnknownBody(handle))?;
        if !body.edges.is_empty() || !body.joints.is_empty() {
            return Err(GraphError::BodyStillConnected(handle));
        }
        Ok(self.bodies.remove(handle.index()))
    }

    /// Reads a body.
    #[inline]
    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.index())
    }

    /// Mutably accesses a body, e.g. to move it or change its flags.
    #[inline]
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle.index())
    }

    /// Iterates over all live bodies.
    pub fn iter_bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies.iter().map(|(i, b)| (BodyHandle(i as u32), b))
    }

    /// Inserts an edge between two distinct, live bodies.
    ///
    /// This is normally invoked when the broad phase reports an overlap for
    /// a pair it never reported before. The new edge starts with identity
    /// cached transforms, a zero timestamp, and an undefined contact state.
    pub fn insert_edge(
        &mut self,
        body1: BodyHandle,
        body2: BodyHandle,
    ) -> Result<EdgeHandle, GraphError> {
        if body1 == body2 {
            return Err(GraphError::SelfPair(body1));
        }
        if !self.bodies.contains(body1.index()) {
            return Err(GraphError::UnknownBody(body1));
        }
        if !self.bodies.contains(body2.index()) {
            return Err(GraphError::UnknownBody(body2));
        }

        let pair = SortedPair::new(body1, body2);
        if self.pair_map.contains_key(&pair) {
            return Err(GraphError::DuplicatePair(body1, body2));
        }

        let handle = EdgeHandle(self.edges.insert(Edge::new(body1, body2)) as u32);
        let _ = self.pair_map.insert(pair, handle);
        self.bodies[body1.index()].edges.push(handle);
        self.bodies[body2.index()].edges.push(handle);
        Ok(handle)
    }

    /// Removes an edge, e.g. once the broad phase stops reporting its pair.
    pub fn remove_edge(&mut self, handle: EdgeHandle) -> Result<Edge, GraphError> {
        if !self.edges.contains(handle.index()) {
            return Err(GraphError::UnknownEdge(handle));
        }

        let edge = self.edges.remove(handle.index());
        let _ = self
            .pair_map
            .remove(&SortedPair::new(edge.body1, edge.body2));
        self.bodies[edge.body1.index()].edges.retain(|e| *e != handle);
        self.bodies[edge.body2.index()].edges.retain(|e| *e != handle);
        Ok(edge)
    }

    /// Reads an edge.
    #[inline]
    pub fn edge(&self, handle: EdgeHandle) -> Option<&Edge> {
        self.edges.get(handle.index())
    }

    /// Mutably accesses an edge, e.g. so the narrow-phase collaborator can
    /// write its contact points.
    #[inline]
    pub fn edge_mut(&mut self, handle: EdgeHandle) -> Option<&mut Edge> {
        self.edges.get_mut(handle.index())
    }

    /// Iterates over all live edges.
    pub fn iter_edges(&self) -> impl Iterator<Item = (EdgeHandle, &Edge)> {
        self.edges.iter().map(|(i, e)| (EdgeHandle(i as u32), e))
    }

    /// The edge between `body1` and `body2`, if any.
    #[inline]
    pub fn edge_between(&self, body1: BodyHandle, body2: BodyHandle) -> Option<EdgeHandle> {
        self.pair_map.get(&SortedPair::new(body1, body2)).copied()
    }

    /// Inserts a joint between two distinct, live bodies.
    ///
    /// If the pair has no contact-graph edge yet, one is inserted as well:
    /// jointed pairs must always be traversable by the group builder, even
    /// when the broad phase never reports them.
    pub fn insert_joint(
        &mut self,
        body1: BodyHandle,
        body2: BodyHandle,
    ) -> Result<JointHandle, GraphError> {
        if body1 == body2 {
            return Err(GraphError::SelfPair(body1));
        }
        if !self.bodies.contains(body1.index()) {
            return Err(GraphError::UnknownBody(body1));
        }
        if !self.bodies.contains(body2.index()) {
            return Err(GraphError::UnknownBody(body2));
        }

        if self.edge_between(body1, body2).is_none() {
            let _ = self.insert_edge(body1, body2)?;
        }

        let handle = JointHandle(self.joints.insert(Joint { body1, body2 }) as u32);
        self.bodies[body1.index()].joints.push(handle);
        self.bodies[body2.index()].joints.push(handle);
        Ok(handle)
    }

    /// Removes a joint. The edge backing its pair is left in place.
    pub fn remove_joint(&mut self, handle: JointHandle) -> Result<Joint, GraphError> {
        if !self.joints.contains(handle.index()) {
            return Err(GraphError::UnknownJoint(handle));
        }

        let joint = self.joints.remove(handle.index());
        self.bodies[joint.body1.index()]
            .joints
            .retain(|j| *j != handle);
        self.bodies[joint.body2.index()]
            .joints
            .retain(|j| *j != handle);
        Ok(joint)
    }

    /// Reads a joint.
    #[inline]
    pub fn joint(&self, handle: JointHandle) -> Option<&Joint> {
        self.joints.get(handle.index())
    }

    /// Iterates over all live joints.
    pub fn iter_joints(&self) -> impl Iterator<Item = (JointHandle, &Joint)> {
        self.joints.iter().map(|(i, j)| (JointHandle(i as u32), j))
    }

    /// Are the two bodies linked by at least one joint?
    pub fn is_joint_connected(&self, body1: BodyHandle, body2: BodyHandle) -> bool {
        self.joints_between(body1, body2).next().is_some()
    }

    /// Iterates over the joints linking `body1` to `body2`.
    pub fn joints_between(
        &self,
        body1: BodyHandle,
        body2: BodyHandle,
    ) -> impl Iterator<Item = JointHandle> + '_ {
        self.bodies
            .get(body1.index())
            .into_iter()
            .flat_map(|b| b.joints.iter().copied())
            .filter(move |j| self.joints[j.index()].connects(body1, body2))
    }
}
