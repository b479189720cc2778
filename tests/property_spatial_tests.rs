use proptest::prelude::*;
use scatter_rs::spatial::{IndexedItem, QuadTree, Rect, resolve_hover};

fn items_strategy() -> impl Strategy<Value = Vec<IndexedItem>> {
    prop::collection::vec(
        (-20.0f64..220.0, -20.0f64..220.0, 0.5f64..12.0, 0usize..3),
        0..300,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(data_index, (cx, cy, radius, series_id))| IndexedItem {
                bbox: Rect::centered(cx, cy, radius),
                series_id,
                data_index,
            })
            .collect()
    })
}

fn build_tree(items: &[IndexedItem]) -> QuadTree {
    let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 200.0, 200.0));
    for item in items {
        tree.insert(*item);
    }
    tree
}

proptest! {
    #[test]
    fn region_query_matches_brute_force(
        items in items_strategy(),
        x in -30.0f64..230.0,
        y in -30.0f64..230.0,
        w in 0.0f64..80.0,
        h in 0.0f64..80.0
    ) {
        let tree = build_tree(&items);
        let region = Rect::new(x, y, w, h);

        let mut found = Vec::new();
        tree.query(region, |item| found.push(item.data_index));
        found.sort_unstable();

        let expected: Vec<usize> = items
            .iter()
            .filter(|item| item.bbox.intersects(region))
            .map(|item| item.data_index)
            .collect();

        prop_assert_eq!(tree.len(), items.len());
        prop_assert!(tree.depth() <= scatter_rs::spatial::MAX_DEPTH);
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn point_query_visits_exactly_containing_boxes(
        items in items_strategy(),
        x in -30.0f64..230.0,
        y in -30.0f64..230.0
    ) {
        let tree = build_tree(&items);

        let mut found = Vec::new();
        tree.query_point(x, y, |item| found.push(item.data_index));
        found.sort_unstable();

        let expected: Vec<usize> = items
            .iter()
            .filter(|item| item.bbox.contains_point(x, y))
            .map(|item| item.data_index)
            .collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn hover_picks_minimum_accepted_distance(
        items in items_strategy(),
        x in 0.0f64..200.0,
        y in 0.0f64..200.0
    ) {
        let tree = build_tree(&items);
        let distance = |bbox: Rect| {
            let (cx, cy) = bbox.center();
            (x - cx).hypot(y - cy)
        };

        let best = items
            .iter()
            .filter(|item| item.bbox.contains_point(x, y))
            .map(|item| distance(item.bbox))
            .zip(items.iter().filter(|item| item.bbox.contains_point(x, y)))
            .filter(|(d, item)| *d <= item.bbox.w / 2.0)
            .map(|(d, _)| d)
            .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |current| current.min(d))));

        match (resolve_hover(&tree, x, y), best) {
            (Some(hover), Some(best)) => {
                prop_assert!((distance(hover.bbox) - best).abs() <= 1e-12);
                prop_assert!(hover.bbox.contains_point(x, y));
            }
            (None, None) => {}
            (hover, best) => prop_assert!(false, "hover {:?} vs brute force {:?}", hover, best),
        }
    }
}
