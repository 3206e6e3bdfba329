mod common;

use plexus::anatomy::NodeKind;
use plexus::engine::PathwayTracer;

fn ids<'a, T: AsRef<str> + 'a>(items: impl IntoIterator<Item = &'a T>) -> Vec<&'a str> {
    items.into_iter().map(|t| t.as_ref()).collect()
}

#[test]
fn median_uses_declared_roots() {
    let tracer = PathwayTracer::new(common::catalog());
    let h = tracer.trace("median");
    assert_eq!(ids(&h.roots), ["C6", "C7", "C8", "T1"]);
    assert_eq!(ids(&h.nerves), ["median"]);
}

#[test]
fn median_runs_through_both_anterior_cords() {
    let h = PathwayTracer::new(common::catalog()).trace("median");
    for segment in [
        "lateral-cord-median",
        "medial-cord-median",
        "upper-anterior-division",
        "lower-anterior-division",
        "median-arm",
        "median-forearm",
    ] {
        assert!(h.segments.contains(segment), "missing {segment}");
    }
    assert!(!h.segments.contains("posterior-cord-radial"));
    assert!(!h.segments.contains("medial-cord-ulnar"));
}

#[test]
fn every_traced_segment_carries_the_nerve() {
    let catalog = common::catalog();
    let tracer = PathwayTracer::new(catalog.clone());
    for nerve in catalog.graph().nodes_of_kind(NodeKind::TerminalNerve) {
        let h = tracer.trace(nerve.id.as_str());
        assert!(!h.segments.is_empty(), "{} has no segments", nerve.id);
        for id in &h.segments {
            let segment = catalog.graph().segment(id.as_str()).unwrap();
            assert!(segment.carries(nerve.id.as_str()), "{id} does not carry {}", nerve.id);
        }
        let expected = catalog.segments_carrying(nerve.id.as_str()).len();
        assert_eq!(h.segments.len(), expected);
    }
}

#[test]
fn dorsal_scapular_is_a_single_root_branch() {
    let h = PathwayTracer::new(common::catalog()).trace("dorsal-scapular");
    assert_eq!(ids(&h.roots), ["C5"]);
    assert_eq!(ids(&h.segments), ["c5-dorsal-scapular", "dorsal-scapular-course"]);
}

#[test]
fn trace_is_idempotent() {
    let tracer = PathwayTracer::new(common::catalog());
    assert_eq!(tracer.trace("radial"), tracer.trace("radial"));
}

#[test]
fn unknown_or_non_terminal_ids_give_empty_sets() {
    let tracer = PathwayTracer::new(common::catalog());
    assert!(tracer.trace("").is_empty());
    assert!(tracer.trace("femoral").is_empty());
    assert!(tracer.trace("C5").is_empty());
    assert!(tracer.trace("posterior-cord").is_empty());
}
