use crate::analysis::AnalyzerParams;
use crate::graph::{BodyHandle, ContactGraph, EdgeHandle};
use crate::math::Real;
use log::trace;

/// Pose-change tolerance below which a body is considered at absolute rest.
///
/// Deliberately much looser than
/// [`DEFAULT_EPSILON`](crate::math::DEFAULT_EPSILON): the rest test exists
/// to short-circuit per-pair transform comparisons, so it tolerates the
/// jitter a solver leaves on a stationary body.
pub const ABSOLUTE_REST_TOLERANCE: Real = 1.0e-3;

/// The temporal-coherence analysis session.
///
/// Owns the tick counter, the bound [`AnalyzerParams`], and the reusable
/// traversal workspace of the group builder. One analyzer drives one
/// [`ContactGraph`]; all its passes are synchronous and single-threaded.
///
/// [`AnalyzerParams`] must be bound with [`Self::init()`] before any pass
/// runs: calling a pass on an unbound analyzer is a programmer error and
/// panics.
#[derive(Clone, Debug, Default)]
pub struct CoherenceAnalyzer {
    params: Option<AnalyzerParams>,
    tick: u32,
    pub(crate) stack: Vec<EdgeHandle>,
}

impl CoherenceAnalyzer {
    /// Whether [`Self::analyze()`] actually computes its "penetration
    /// detected" return value.
    ///
    /// The boolean return of `analyze` is reserved: it is always `false`
    /// until early-penetration detection is implemented, and this constant
    /// lets callers see that without relying on the observed behavior.
    pub const PENETRATION_SIGNAL_IMPLEMENTED: bool = false;

    /// Creates an analyzer with no bound configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the scene-wide configuration to this analyzer.
    pub fn init(&mut self, params: AnalyzerParams) {
        self.params = Some(params);
    }

    /// Returns this analyzer to its freshly-created state, unbinding the
    /// configuration and resetting the tick counter.
    pub fn clear(&mut self) {
        self.params = None;
        self.tick = 0;
        self.stack.clear();
    }

    /// Notifies the analyzer that a body joined the graph.
    ///
    /// Currently a no-op, reserved for incremental bookkeeping.
    pub fn add(&mut self, _body: BodyHandle) {}

    /// Notifies the analyzer that a body left the graph.
    ///
    /// Currently a no-op, reserved for incremental bookkeeping.
    pub fn remove(&mut self, _body: BodyHandle) {}

    /// The bound configuration, if any.
    #[inline]
    pub fn params(&self) -> Option<&AnalyzerParams> {
        self.params.as_ref()
    }

    /// The current tick, i.e. the number of times [`Self::analyze()`] ran.
    #[inline]
    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub(crate) fn expect_params(&self) -> &AnalyzerParams {
        self.params
            .as_ref()
            .expect("no configuration bound: call `CoherenceAnalyzer::init` before analysis")
    }

    /// Updates the absolute-rest flag of every active body.
    ///
    /// A body whose pose stayed within [`ABSOLUTE_REST_TOLERANCE`] of its
    /// cached previous pose (both translation norm and rotation angle) is
    /// flagged as resting and its cache is left untouched. Otherwise the
    /// flag is cleared and the cache is overwritten with the current pose.
    ///
    /// This is invoked by [`Self::analyze()`]; it is exposed separately for
    /// pipelines that need the rest flags outside of a full analysis tick.
    pub fn update_rest_state(&self, graph: &mut ContactGraph) {
        for (_, body) in graph.bodies.iter_mut() {
            if !body.is_active() {
                continue;
            }

            let lin = (body.pose.translation.vector - body.prev_pose.translation.vector).norm();
            let ang = body.pose.rotation.angle_to(&body.prev_pose.rotation);

            if lin <= ABSOLUTE_REST_TOLERANCE && ang <= ABSOLUTE_REST_TOLERANCE {
                body.absolute_resting = true;
            } else {
                body.absolute_resting = false;
                body.prev_pose = body.pose;
            }
        }
    }

    /// The post-broad-phase pass.
    ///
    /// `reported` is the tick's ordered broad-phase overlap list; it must
    /// also contain the edge of every jointed pair (see
    /// [`ContactGraph::insert_joint`]). Each reported edge is stamped with
    /// the new tick and either pruned (pairs the solver can never act on),
    /// flagged as relative-resting (prior narrow-phase results can be
    /// reused), or left for narrow-phase re-examination with its cached
    /// relative transform refreshed.
    ///
    /// The boolean return is the reserved "penetration detected" signal;
    /// see [`Self::PENETRATION_SIGNAL_IMPLEMENTED`].
    pub fn analyze(&mut self, graph: &mut ContactGraph, reported: &[EdgeHandle]) -> bool {
        let _ = self.expect_params();
        self.tick = self.tick.wrapping_add(1);
        trace!(
            "coherence analysis tick {}: {} reported pair(s)",
            self.tick,
            reported.len()
        );

        self.update_rest_state(graph);

        for &handle in reported {
            let (h1, h2) = {
                let edge = &mut graph.edges[handle.index()];
                edge.timestamp = self.tick;
                edge.pruned = false;
                edge.relative_resting = false;
                (edge.body1, edge.body2)
            };

            // Jointed pairs bypass every pruning rule: the joint must reach
            // the group builder even when the pair never touches.
            if graph.is_joint_connected(h1, h2) {
                continue;
            }

            let body1 = &graph.bodies[h1.index()];
            let body2 = &graph.bodies[h2.index()];

            let unsolvable = (body1.is_fixed() && body2.is_fixed())
                || (body1.is_scripted() && body2.is_scripted())
                || (body1.is_fixed() && body2.is_scripted())
                || (body1.is_scripted() && body2.is_fixed())
                || !body1.is_active()
                || !body2.is_active();

            if unsolvable {
                graph.edges[handle.index()].pruned = true;
                continue;
            }

            if body1.absolute_resting && body2.absolute_resting {
                // Cheap cache hit: neither body moved, so the relative
                // transform cannot have changed.
                graph.edges[handle.index()].relative_resting = true;
                continue;
            }

            let delta = body1.pose.inv_mul(&body2.pose);
            let edge = &mut graph.edges[handle.index()];
            edge.xform = delta;

            if relative_eq!(delta, edge.prev_xform) {
                edge.relative_resting = true;
            } else {
                edge.prev_xform = delta;
                edge.inv_xform = delta.inverse();
            }
        }

        Self::PENETRATION_SIGNAL_IMPLEMENTED
    }
}
