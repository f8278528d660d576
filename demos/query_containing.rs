//! Find boxes that contain a query point.
use aabb_tree::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let tree = AabbTree::new(&[
        Aabb::new([0.0, 0.0], [3.0, 3.0]),
        Aabb::new([1.0, 1.0], [2.0, 2.0]),
        Aabb::new([5.0, 5.0], [6.0, 6.0]),
    ]);

    let mut results = tree.containing_boxes(&[1.5, 1.5]);
    results.sort_unstable();
    println!("Boxes that contain (1.5, 1.5): {results:?}");
    assert_eq!(results, vec![0, 1], "The outer and inner boxes contain the point");
}
