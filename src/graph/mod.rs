//! The persistent contact graph: bodies, pair edges, contacts, and joints.
//!
//! The graph is owned by the simulation and survives across ticks. Edge
//! identity continuity is what makes the temporal-coherence caches of
//! [`crate::analysis`] meaningful: an edge is inserted when the broad phase
//! first reports an overlap for a body pair and removed when the overlap
//! stops being reported.

pub use self::body::{Body, BodyFlags, BodyHandle};
pub use self::contact::Contact;
pub use self::contact_graph::{ContactGraph, GraphError};
pub use self::edge::{ContactState, Edge, EdgeColor, EdgeHandle};
pub use self::joint::{Joint, JointHandle};

mod body;
mod contact;
mod contact_graph;
mod edge;
mod joint;
