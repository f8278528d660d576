//! Comparison tests between `AabbTree` queries and brute force scans over random boxes

#[cfg(test)]
mod tests {
    use crate::{Aabb, AabbTree, Intersects, Line, Point, Ray, Segment, Triangle};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Random boxes in `[0, extent)^D` with sides below `max_side`.
    fn random_boxes<const D: usize>(rng: &mut StdRng, count: usize, extent: f64, max_side: f64) -> Vec<Aabb<D>> {
        (0..count)
            .map(|_| {
                let min: Point<D> = core::array::from_fn(|_| rng.random_range(0.0..extent));
                let side: Point<D> = core::array::from_fn(|_| rng.random_range(0.0..max_side));
                Aabb::new(min, core::array::from_fn(|axis| min[axis] + side[axis]))
            })
            .collect()
    }

    fn random_point<const D: usize>(rng: &mut StdRng, low: f64, high: f64) -> Point<D> {
        core::array::from_fn(|_| rng.random_range(low..high))
    }

    fn brute_intersecting<const D: usize, S: Intersects<D>>(boxes: &[Aabb<D>], shape: &S, tolerance: f64) -> Vec<usize> {
        (0..boxes.len())
            .filter(|&i| shape.intersects_aabb(&boxes[i], tolerance))
            .collect()
    }

    fn tree_intersecting<const D: usize, S: Intersects<D>>(tree: &AabbTree<D>, shape: &S) -> Vec<usize> {
        let mut results = Vec::new();
        tree.query_intersecting_into(shape, &mut results);
        results.sort_unstable();
        results
    }

    fn brute_self_pairs<const D: usize>(boxes: &[Aabb<D>], tolerance: f64) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for i in 0..boxes.len() {
            for j in i + 1..boxes.len() {
                if boxes[i].intersects_with_tolerance(&boxes[j], tolerance) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    fn normalized(pairs: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
        let mut pairs: Vec<_> = pairs.into_iter().map(|(i, j)| (i.min(j), i.max(j))).collect();
        pairs.sort_unstable();
        pairs
    }

    fn euclidean<const D: usize>(a: &Point<D>, b: &Point<D>) -> f64 {
        (0..D).map(|axis| (a[axis] - b[axis]).powi(2)).sum::<f64>().sqrt()
    }

    #[test]
    fn test_nearest_center_matches_brute_force_2d() {
        let mut rng = StdRng::seed_from_u64(42);
        let boxes = random_boxes::<2>(&mut rng, 500, 100.0, 3.0);
        let centers: Vec<Point<2>> = boxes.iter().map(Aabb::center).collect();
        let tree = AabbTree::new(&boxes);
        let eval = |q: &Point<2>, i: usize| euclidean(q, &centers[i]);

        for _ in 0..200 {
            let q = random_point::<2>(&mut rng, -20.0, 120.0);
            let (index, distance) = tree.closest_element_box(&q, eval).unwrap();
            let best = (0..boxes.len()).map(|i| eval(&q, i)).fold(f64::INFINITY, f64::min);
            assert_eq!(distance, best, "Nearest distance mismatch at {q:?}");
            assert_eq!(eval(&q, index), distance, "Reported element must realise the distance");
        }
    }

    #[test]
    fn test_closest_box_matches_brute_force_3d() {
        let mut rng = StdRng::seed_from_u64(7);
        let boxes = random_boxes::<3>(&mut rng, 400, 50.0, 5.0);
        let tree = AabbTree::new(&boxes);

        for _ in 0..200 {
            let q = random_point::<3>(&mut rng, -10.0, 60.0);
            let (index, distance) = tree.closest_box(&q).unwrap();
            let best = boxes.iter().map(|b| b.signed_distance(&q)).fold(f64::INFINITY, f64::min);
            assert_eq!(distance, best, "Closest box distance mismatch at {q:?}");
            assert_eq!(boxes[index].signed_distance(&q), distance);
        }
    }

    #[test]
    fn test_box_queries_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        let boxes = random_boxes::<2>(&mut rng, 1000, 100.0, 2.0);
        for tolerance in [0.0, 0.5] {
            let tree = AabbTree::new_with_tolerance(&boxes, tolerance);
            for _ in 0..100 {
                let query = random_boxes::<2>(&mut rng, 1, 100.0, 15.0)[0];
                assert_eq!(
                    tree_intersecting(&tree, &query),
                    brute_intersecting(&boxes, &query, tolerance),
                    "Box query mismatch for {query:?} with tolerance {tolerance}"
                );
            }
        }
    }

    #[test]
    fn test_point_queries_match_brute_force_3d() {
        let mut rng = StdRng::seed_from_u64(3);
        let boxes = random_boxes::<3>(&mut rng, 800, 20.0, 4.0);
        let tree = AabbTree::new(&boxes);
        for _ in 0..200 {
            let q = random_point::<3>(&mut rng, 0.0, 24.0);
            assert_eq!(tree_intersecting(&tree, &q), brute_intersecting(&boxes, &q, 0.0));

            let mut containing = tree.containing_boxes(&q);
            containing.sort_unstable();
            let expected: Vec<usize> = (0..boxes.len()).filter(|&i| boxes[i].contains(&q)).collect();
            assert_eq!(containing, expected, "Containment mismatch at {q:?}");
        }
    }

    #[test]
    fn test_linear_queries_match_brute_force_3d() {
        let mut rng = StdRng::seed_from_u64(11);
        let boxes = random_boxes::<3>(&mut rng, 800, 50.0, 3.0);
        for tolerance in [0.0, 0.3] {
            let tree = AabbTree::new_with_tolerance(&boxes, tolerance);
            for _ in 0..100 {
                let a = random_point::<3>(&mut rng, -10.0, 60.0);
                let b = random_point::<3>(&mut rng, -10.0, 60.0);
                let direction: Point<3> = core::array::from_fn(|axis| b[axis] - a[axis]);

                let ray = Ray::new(a, direction);
                assert_eq!(
                    tree_intersecting(&tree, &ray),
                    brute_intersecting(&boxes, &ray, tolerance),
                    "Ray mismatch with tolerance {tolerance}"
                );
                let segment = Segment::new(a, b);
                let hits = tree_intersecting(&tree, &segment);
                assert_eq!(
                    hits,
                    brute_intersecting(&boxes, &segment, tolerance),
                    "Segment mismatch with tolerance {tolerance}"
                );
                let line = Line::new(a, direction);
                assert_eq!(tree_intersecting(&tree, &line), brute_intersecting(&boxes, &line, tolerance));
                assert!(
                    tree_intersecting(&tree, &line).len() >= hits.len(),
                    "A line hits everything its segments hit"
                );
            }
        }
    }

    #[test]
    fn test_triangle_queries_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(5);
        let boxes2 = random_boxes::<2>(&mut rng, 600, 50.0, 3.0);
        let boxes3 = random_boxes::<3>(&mut rng, 600, 50.0, 6.0);
        for tolerance in [0.0, 0.3] {
            let tree2 = AabbTree::new_with_tolerance(&boxes2, tolerance);
            let tree3 = AabbTree::new_with_tolerance(&boxes3, tolerance);
            for _ in 0..100 {
                let triangle2 = Triangle::new(
                    random_point::<2>(&mut rng, 0.0, 50.0),
                    random_point::<2>(&mut rng, 0.0, 50.0),
                    random_point::<2>(&mut rng, 0.0, 50.0),
                );
                assert_eq!(
                    tree_intersecting(&tree2, &triangle2),
                    brute_intersecting(&boxes2, &triangle2, tolerance),
                    "2D triangle mismatch with tolerance {tolerance}"
                );

                let triangle3 = Triangle::new(
                    random_point::<3>(&mut rng, 0.0, 50.0),
                    random_point::<3>(&mut rng, 0.0, 50.0),
                    random_point::<3>(&mut rng, 0.0, 50.0),
                );
                assert_eq!(
                    tree_intersecting(&tree3, &triangle3),
                    brute_intersecting(&boxes3, &triangle3, tolerance),
                    "3D triangle mismatch with tolerance {tolerance}"
                );
            }
        }
    }

    #[test]
    fn test_self_pairs_match_brute_force_2d() {
        let mut rng = StdRng::seed_from_u64(42);
        for (count, tolerance) in [(2, 0.0), (3, 0.0), (17, 0.0), (600, 0.0), (600, 0.3)] {
            let boxes = random_boxes::<2>(&mut rng, count, 40.0, 2.0);
            let tree = AabbTree::new_with_tolerance(&boxes, tolerance);
            let pairs = normalized(tree.self_pairs());
            let mut deduplicated = pairs.clone();
            deduplicated.dedup();
            assert_eq!(pairs.len(), deduplicated.len(), "Pairs reported twice for {count} boxes");
            assert_eq!(
                pairs,
                brute_self_pairs(&boxes, tolerance),
                "Self pair mismatch for {count} boxes with tolerance {tolerance}"
            );
        }
    }

    #[test]
    fn test_self_pairs_match_brute_force_3d() {
        let mut rng = StdRng::seed_from_u64(9);
        let boxes = random_boxes::<3>(&mut rng, 700, 20.0, 2.5);
        let tree = AabbTree::new(&boxes);
        assert_eq!(normalized(tree.self_pairs()), brute_self_pairs(&boxes, 0.0));
    }

    #[test]
    fn test_self_pairs_with_duplicates() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut boxes = random_boxes::<2>(&mut rng, 50, 10.0, 1.0);
        boxes.extend_from_slice(&boxes.clone());
        let tree = AabbTree::new(&boxes);
        let pairs = normalized(tree.self_pairs());
        assert_eq!(pairs, brute_self_pairs(&boxes, 0.0));
        for i in 0..50 {
            assert!(pairs.binary_search(&(i, i + 50)).is_ok(), "Box {i} must pair with its copy");
        }
    }

    #[test]
    fn test_cross_pairs_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(21);
        let left = random_boxes::<2>(&mut rng, 300, 50.0, 3.0);
        let right = random_boxes::<2>(&mut rng, 200, 50.0, 3.0);
        let left_tree = AabbTree::new(&left);
        let right_tree = AabbTree::new(&right);

        let mut expected = Vec::new();
        for (i, a) in left.iter().enumerate() {
            for (j, b) in right.iter().enumerate() {
                if a.intersects(b) {
                    expected.push((i, j));
                }
            }
        }

        let mut pairs = left_tree.pairs_with(&right_tree);
        pairs.sort_unstable();
        assert_eq!(pairs, expected, "Cross pair mismatch");

        let mut swapped: Vec<_> = right_tree.pairs_with(&left_tree).into_iter().map(|(j, i)| (i, j)).collect();
        swapped.sort_unstable();
        assert_eq!(swapped, expected, "Cross pairs must be symmetric");
    }
}
