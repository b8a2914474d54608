use crate::analysis::CoherenceAnalyzer;
use crate::graph::{ContactGraph, ContactState, EdgeHandle};
use crate::math::Real;

impl CoherenceAnalyzer {
    /// The post-narrow-phase pass.
    ///
    /// Classifies each reported, non-pruned edge from the minimum signed
    /// separation across its contact points (written by the narrow-phase
    /// collaborator) against the collision envelope:
    ///
    /// * farther than the envelope (or no contacts at all) →
    ///   [`ContactState::Separating`], and the edge is pruned from
    ///   grouping/solving;
    /// * deeper than the envelope → [`ContactState::Penetrating`];
    /// * anything in between → [`ContactState::Touching`].
    ///
    /// The contact state of every reported edge is reset to
    /// [`ContactState::Undefined`] first and then assigned at most once.
    ///
    /// No relative-rest shortcut is taken here: an unchanged relative
    /// transform does not make the classification reusable, because a
    /// shared local contact frame can still be invalidated by an
    /// absolute-rotation change of the pair.
    pub fn classify(&self, graph: &mut ContactGraph, reported: &[EdgeHandle]) {
        let envelope = self.expect_params().collision_envelope();

        for &handle in reported {
            graph.edges[handle.index()].contact_state = ContactState::Undefined;
        }

        for &handle in reported {
            let edge = &mut graph.edges[handle.index()];
            if edge.pruned {
                continue;
            }

            let min_dist = edge
                .contacts
                .iter()
                .fold(Real::MAX, |min, contact| min.min(contact.dist));

            edge.contact_state = if min_dist > envelope {
                edge.pruned = true;
                ContactState::Separating
            } else if min_dist < -envelope {
                ContactState::Penetrating
            } else {
                ContactState::Touching
            };
        }
    }
}
