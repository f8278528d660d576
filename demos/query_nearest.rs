//! Find the element nearest to a point.
use aabb_tree::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let points: [Point<2>; 3] = [[0.5, 0.5], [3.5, 3.5], [5.5, 5.5]];
    let mut builder = AabbTreeBuilder::with_capacity(points.len());
    for (index, point) in points.into_iter().enumerate() {
        assert_eq!(builder.add_point(point), index, "Indices follow insertion order");
    }
    let tree = builder.build();

    let query = [2.0, 2.5];
    let distance = |q: &Point<2>, i: usize| ((q[0] - points[i][0]).powi(2) + (q[1] - points[i][1]).powi(2)).sqrt();
    if let Some((idx, d)) = tree.closest_element_box(&query, distance) {
        println!("Nearest point: {idx} at distance {d:.3}");
        assert_eq!(idx, 1, "Point 1 is the closest to (2, 2.5)");
    }

    // Without an element distance the box itself is used.
    if let Some((idx, d)) = tree.closest_box(&query) {
        println!("Nearest box: {idx} at distance {d:.3}");
    }
}
