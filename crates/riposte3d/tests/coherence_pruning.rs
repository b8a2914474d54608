use riposte3d::analysis::{AnalyzerParams, CoherenceAnalyzer};
use riposte3d::graph::{Body, BodyFlags, ContactGraph};
use riposte3d::math::Isometry;

fn analyzer() -> CoherenceAnalyzer {
    let mut analyzer = CoherenceAnalyzer::new();
    analyzer.init(AnalyzerParams::new(0.1).unwrap());
    analyzer
}

fn body_at(graph: &mut ContactGraph, x: f32, flags: BodyFlags) -> riposte3d::graph::BodyHandle {
    graph.insert_body(Body::new(Isometry::translation(x, 0.0, 0.0), flags))
}

#[test]
fn unsolvable_pairs_are_pruned() {
    let mut graph = ContactGraph::new();
    let mut analyzer = analyzer();

    let fixed1 = body_at(&mut graph, 0.0, BodyFlags::ACTIVE | BodyFlags::FIXED);
    let fixed2 = body_at(&mut graph, 1.0, BodyFlags::ACTIVE | BodyFlags::FIXED);
    let scripted1 = body_at(&mut graph, 2.0, BodyFlags::ACTIVE | BodyFlags::SCRIPTED);
    let scripted2 = body_at(&mut graph, 3.0, BodyFlags::ACTIVE | BodyFlags::SCRIPTED);
    let inactive = body_at(&mut graph, 4.0, BodyFlags::empty());
    let free = body_at(&mut graph, 5.0, BodyFlags::ACTIVE);

    let fixed_fixed = graph.insert_edge(fixed1, fixed2).unwrap();
    let scripted_scripted = graph.insert_edge(scripted1, scripted2).unwrap();
    let fixed_scripted = graph.insert_edge(fixed1, scripted1).unwrap();
    let scripted_fixed = graph.insert_edge(scripted2, fixed2).unwrap();
    let inactive_free = graph.insert_edge(inactive, free).unwrap();

    let reported = [
        fixed_fixed,
        scripted_scripted,
        fixed_scripted,
        scripted_fixed,
        inactive_free,
    ];
    assert!(!analyzer.analyze(&mut graph, &reported));

    for handle in reported {
        let edge = graph.edge(handle).unwrap();
        assert!(edge.is_pruned(), "{handle:?} should have been pruned");
        assert_eq!(edge.timestamp(), analyzer.tick());
    }
}

#[test]
fn jointed_pairs_bypass_every_pruning_rule() {
    let mut graph = ContactGraph::new();
    let mut analyzer = analyzer();

    // Fixed + scripted would normally be pruned.
    let fixed = body_at(&mut graph, 0.0, BodyFlags::ACTIVE | BodyFlags::FIXED);
    let scripted = body_at(&mut graph, 1.0, BodyFlags::ACTIVE | BodyFlags::SCRIPTED);
    let _ = graph.insert_joint(fixed, scripted).unwrap();
    let edge = graph.edge_between(fixed, scripted).unwrap();

    let _ = analyzer.analyze(&mut graph, &[edge]);
    assert!(!graph.edge(edge).unwrap().is_pruned());
    assert_eq!(graph.edge(edge).unwrap().timestamp(), analyzer.tick());
}

#[test]
fn unchanged_relative_transform_is_a_cache_hit() {
    let mut graph = ContactGraph::new();
    let mut analyzer = analyzer();

    let b1 = body_at(&mut graph, 0.0, BodyFlags::ACTIVE);
    let b2 = body_at(&mut graph, 1.0, BodyFlags::ACTIVE);
    let edge = graph.insert_edge(b1, b2).unwrap();

    // Tick 1: `b2` just moved into overlap range, so the pair cannot be at
    // rest and the cached identity seed is replaced by the real transform.
    graph.body_mut(b2).unwrap().pose = Isometry::translation(1.5, 0.0, 0.0);
    let _ = analyzer.analyze(&mut graph, &[edge]);
    assert!(!graph.edge(edge).unwrap().is_relative_resting());

    // Tick 2: nothing moved. Both bodies are at absolute rest, so the pair
    // is a cache hit without any transform math.
    let _ = analyzer.analyze(&mut graph, &[edge]);
    assert!(graph.edge(edge).unwrap().is_relative_resting());

    // Tick 3: both bodies translate by the same amount. Neither is at
    // absolute rest, but the relative transform is unchanged.
    graph.body_mut(b1).unwrap().pose = Isometry::translation(2.0, 0.0, 0.0);
    graph.body_mut(b2).unwrap().pose = Isometry::translation(3.5, 0.0, 0.0);
    let _ = analyzer.analyze(&mut graph, &[edge]);
    assert!(!graph.body(b1).unwrap().is_absolute_resting());
    assert!(graph.edge(edge).unwrap().is_relative_resting());

    // Tick 4: only one body moves. The cache is refreshed and the pair
    // needs narrow-phase work again.
    graph.body_mut(b2).unwrap().pose = Isometry::translation(4.0, 0.0, 0.0);
    let _ = analyzer.analyze(&mut graph, &[edge]);
    let edge_ref = graph.edge(edge).unwrap();
    assert!(!edge_ref.is_relative_resting());
    assert!(!edge_ref.is_pruned());
}

#[test]
fn refreshed_cache_keeps_the_inverse_transform_in_sync() {
    let mut graph = ContactGraph::new();
    let mut analyzer = analyzer();

    let b1 = body_at(&mut graph, 0.0, BodyFlags::ACTIVE);
    let b2 = body_at(&mut graph, 2.0, BodyFlags::ACTIVE);
    let edge = graph.insert_edge(b1, b2).unwrap();

    // Move one body so the transform-compare path runs and refreshes both
    // the cache and its inverse.
    graph.body_mut(b2).unwrap().pose = Isometry::new(
        riposte3d::math::Vector::new(2.5, 0.0, 0.0),
        riposte3d::math::Vector::new(0.0, 0.3, 0.0),
    );
    let _ = analyzer.analyze(&mut graph, &[edge]);

    let edge_ref = graph.edge(edge).unwrap();
    let roundtrip = edge_ref.xform() * edge_ref.inv_xform();
    approx::assert_relative_eq!(roundtrip, Isometry::identity(), epsilon = 1.0e-5);
}

#[test]
fn analyze_reports_the_reserved_penetration_signal() {
    assert!(!CoherenceAnalyzer::PENETRATION_SIGNAL_IMPLEMENTED);

    let mut graph = ContactGraph::new();
    let mut analyzer = analyzer();
    let b1 = body_at(&mut graph, 0.0, BodyFlags::ACTIVE);
    let b2 = body_at(&mut graph, 0.01, BodyFlags::ACTIVE);
    let edge = graph.insert_edge(b1, b2).unwrap();

    // Even an obviously overlapping pair reports `false`.
    assert!(!analyzer.analyze(&mut graph, &[edge]));
}
