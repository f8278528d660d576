//! Report overlapping boxes within one set and across two sets.
use aabb_tree::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let boxes = [
        Aabb::new([0.0, 0.0], [2.0, 2.0]),
        Aabb::new([1.0, 1.0], [3.0, 3.0]),
        Aabb::new([5.0, 5.0], [6.0, 6.0]),
        Aabb::new([6.05, 5.0], [7.0, 6.0]),
    ];
    let tree = AabbTree::new(&boxes);
    println!("Overlapping pairs: {:?}", tree.self_pairs());

    // A small tolerance also reports boxes separated by a thin gap.
    let loose = AabbTree::new_with_tolerance(&boxes, 0.1);
    let mut pairs: Vec<_> = loose.self_pairs().into_iter().map(|(i, j)| (i.min(j), i.max(j))).collect();
    pairs.sort_unstable();
    println!("Pairs within 0.1: {pairs:?}");
    assert_eq!(pairs, vec![(0, 1), (2, 3)], "The 0.05 gap is bridged");

    let window = AabbTree::new(&[Aabb::new([2.5, 2.5], [5.5, 5.5])]);
    println!("Boxes touching the window: {:?}", tree.pairs_with(&window));
}
