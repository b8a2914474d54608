use crate::analysis::CoherenceAnalyzer;
use crate::graph::{
    BodyHandle, Contact, ContactGraph, ContactState, EdgeColor, EdgeHandle, JointHandle,
};
use log::warn;

/// One contact copied into a [`ContactGroup`], together with the edge it
/// came from.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GroupContact {
    /// The edge carrying this contact.
    pub edge: EdgeHandle,
    /// The contact itself.
    pub contact: Contact,
}

/// An independent simulation group (island): a maximal set of bodies
/// connected through non-excluded contacts or joints, which must be
/// constraint-solved together.
///
/// Groups are rebuilt from scratch every tick and entirely owned by the
/// return value of [`CoherenceAnalyzer::build_groups()`].
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ContactGroup {
    /// The tick-unique identifier of this group; also the `group_tag` of
    /// its member bodies.
    pub id: u32,
    /// The bodies of this group, in discovery order.
    pub bodies: Vec<BodyHandle>,
    /// The contacts of this group, in discovery order.
    pub contacts: Vec<GroupContact>,
    /// The joints of this group, in discovery order.
    pub constraints: Vec<JointHandle>,
}

impl ContactGroup {
    fn new(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

impl CoherenceAnalyzer {
    /// The group-building pass.
    ///
    /// Partitions the bodies touched by a surviving edge or joint into
    /// independent simulation groups, plus one synthetic group gathering
    /// the dynamically-active bodies left unconnected this tick (free
    /// flight). The caller owns the previous tick's groups and is expected
    /// to have dropped them before rebuilding.
    ///
    /// `reported` must be the same edge list that was passed to
    /// [`Self::analyze()`] this tick: edges stamped with an older tick are
    /// never traversed, even when an adjacency list still references them.
    pub fn build_groups(
        &mut self,
        graph: &mut ContactGraph,
        reported: &[EdgeHandle],
    ) -> Vec<ContactGroup> {
        let _ = self.expect_params();

        for (_, body) in graph.bodies.iter_mut() {
            body.group_tag = 0;
        }

        // Color pass: exclude the pairs the solver can never act on, then
        // force jointed pairs back in regardless, since a constraint
        // propagates mechanical influence even without geometric contact.
        for &handle in reported {
            let (h1, h2, state) = {
                let edge = &graph.edges[handle.index()];
                (edge.body1, edge.body2, edge.contact_state)
            };
            let body1 = &graph.bodies[h1.index()];
            let body2 = &graph.bodies[h2.index()];

            let excluded = state == ContactState::Separating
                || !body1.is_active()
                || !body2.is_active()
                || (body1.is_fixed() && body2.is_fixed())
                || (body1.is_scripted() && body2.is_scripted())
                || (body1.is_fixed() && body2.is_scripted())
                || (body1.is_scripted() && body2.is_fixed());

            let color = if excluded && !graph.is_joint_connected(h1, h2) {
                EdgeColor::Black
            } else {
                EdgeColor::White
            };
            graph.edges[handle.index()].color = color;
        }

        // Traversal pass: iterative connected components over the white
        // edges stamped with the current tick, expanding through bodies
        // that are neither fixed nor scripted.
        let mut groups = Vec::new();
        let mut next_group_id = 1u32;
        let tick = self.tick();

        for &root in reported {
            {
                let edge = &graph.edges[root.index()];
                if edge.color != EdgeColor::White || edge.timestamp != tick {
                    continue;
                }
            }

            let mut group = ContactGroup::new(next_group_id);
            next_group_id += 1;

            graph.edges[root.index()].color = EdgeColor::Grey;
            self.stack.push(root);

            while let Some(handle) = self.stack.pop() {
                let (h1, h2) = {
                    let edge = &graph.edges[handle.index()];
                    (edge.body1, edge.body2)
                };

                for h in [h1, h2] {
                    let body = &mut graph.bodies[h.index()];
                    if body.group_tag != group.id {
                        body.group_tag = group.id;
                        group.bodies.push(h);
                    }
                }

                let jointed = graph.is_joint_connected(h1, h2);
                {
                    let edge = &graph.edges[handle.index()];
                    if jointed && !edge.contacts.is_empty() {
                        // Upstream is expected to keep jointed pairs
                        // contact-free; merge both into the group anyway.
                        warn!(
                            "jointed pair ({:?}, {:?}) carries {} contact(s): \
                             merging contacts and joints into group {}",
                            h1,
                            h2,
                            edge.contacts.len(),
                            group.id
                        );
                    }
                    for contact in &edge.contacts {
                        group.contacts.push(GroupContact {
                            edge: handle,
                            contact: *contact,
                        });
                    }
                }

                if jointed {
                    let body1 = &graph.bodies[h1.index()];
                    for &joint in body1.joints.iter() {
                        if graph.joints[joint.index()].connects(h1, h2) {
                            group.constraints.push(joint);
                        }
                    }
                }

                for h in [h1, h2] {
                    let body = &graph.bodies[h.index()];
                    if body.is_fixed() || body.is_scripted() {
                        // Fixed and scripted bodies terminate the
                        // traversal: they transmit no motion.
                        continue;
                    }

                    for &other in body.edges.iter() {
                        let edge = &mut graph.edges[other.index()];
                        if edge.color == EdgeColor::White && edge.timestamp == tick {
                            edge.color = EdgeColor::Grey;
                            self.stack.push(other);
                        }
                    }
                }

                graph.edges[handle.index()].color = EdgeColor::Black;
            }

            groups.push(group);
        }

        // Isolated-bodies pass: dynamically-active bodies nothing connected
        // to this tick still need to be integrated.
        let mut strays = ContactGroup::new(next_group_id);
        for (index, body) in graph.bodies.iter_mut() {
            if body.is_active()
                && body.group_tag == 0
                && !body.is_fixed()
                && !body.is_scripted()
                && !body.is_sleepy()
            {
                body.group_tag = strays.id;
                strays.bodies.push(BodyHandle(index as u32));
            }
        }
        if !strays.bodies.is_empty() {
            groups.push(strays);
        }

        groups
    }
}
