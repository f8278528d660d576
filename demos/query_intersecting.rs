//! Find boxes that intersect a query box, a segment and a triangle.
use aabb_tree::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let tree = AabbTree::new(&[
        Aabb::new([0.0, 0.0], [1.0, 1.0]), // Box 0
        Aabb::new([2.0, 2.0], [3.0, 3.0]), // Box 1 (outside query)
        Aabb::new([0.5, 0.5], [1.5, 1.5]), // Box 2
    ]);

    let mut results = Vec::new();
    tree.query_intersecting_into(&Aabb::new([0.7, 0.7], [1.3, 1.3]), &mut results);
    println!("Intersecting: {results:?}");

    // Query box (0.7, 0.7)-(1.3, 1.3) intersects boxes 0 and 2, but not box 1
    assert_eq!(results.len(), 2, "Expected 2 intersecting boxes");
    assert!(results.contains(&0), "Box 0 should intersect");
    assert!(results.contains(&2), "Box 2 should intersect");
    assert!(!results.contains(&1), "Box 1 should not intersect");

    results.clear();
    tree.query_intersecting_into(&Segment::new([0.0, 2.5], [4.0, 2.5]), &mut results);
    println!("Crossed by segment: {results:?}");
    assert_eq!(results, vec![1], "Only box 1 spans y = 2.5");

    // Stop at the first hit.
    let mut first = None;
    let stopped = tree.query_intersecting(&Triangle::new([0.0, 0.0], [4.0, 0.0], [0.0, 4.0]), |i| {
        first = Some(i);
        true
    });
    println!("Triangle stopped early: {stopped}, first hit: {first:?}");
}
