use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::quadtree::{QuadTree, Rect};

/// Marker currently under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverPoint {
    pub series_id: usize,
    pub data_index: usize,
    pub bbox: Rect,
}

/// Finds the marker closest to the cursor among those whose box contains it.
///
/// A candidate is accepted when its center lies within half its box width of
/// the cursor. Equal distances resolve to the first item visited by the tree.
#[must_use]
pub fn resolve_hover(tree: &QuadTree, cursor_x: f64, cursor_y: f64) -> Option<HoverPoint> {
    if !cursor_x.is_finite() || !cursor_y.is_finite() {
        return None;
    }

    let mut candidates: SmallVec<[(OrderedFloat<f64>, HoverPoint); 8]> = SmallVec::new();
    tree.query(Rect::new(cursor_x, cursor_y, 1.0, 1.0), |item| {
        if !item.bbox.contains_point(cursor_x, cursor_y) {
            return;
        }
        let (center_x, center_y) = item.bbox.center();
        let distance = (cursor_x - center_x).hypot(cursor_y - center_y);
        if distance <= item.bbox.w / 2.0 {
            candidates.push((
                OrderedFloat(distance),
                HoverPoint {
                    series_id: item.series_id,
                    data_index: item.data_index,
                    bbox: item.bbox,
                },
            ));
        }
    });

    // `min_by_key` keeps the first of several equal minima.
    candidates
        .into_iter()
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, hover)| hover)
}

#[cfg(test)]
mod tests {
    use super::resolve_hover;
    use crate::spatial::quadtree::{IndexedItem, QuadTree, Rect};

    fn tree_with(items: &[(f64, f64, f64, usize, usize)]) -> QuadTree {
        let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 200.0, 200.0));
        for &(cx, cy, radius, series_id, data_index) in items {
            tree.insert(IndexedItem {
                bbox: Rect::centered(cx, cy, radius),
                series_id,
                data_index,
            });
        }
        tree
    }

    #[test]
    fn picks_closest_center() {
        let tree = tree_with(&[(50.0, 50.0, 6.0, 0, 0), (54.0, 50.0, 6.0, 1, 7)]);
        let hover = resolve_hover(&tree, 53.0, 50.0).expect("hit");
        assert_eq!((hover.series_id, hover.data_index), (1, 7));
    }

    #[test]
    fn box_corner_outside_radius_is_rejected() {
        let tree = tree_with(&[(50.0, 50.0, 4.0, 0, 0)]);
        assert!(resolve_hover(&tree, 53.9, 53.9).is_none());
        assert!(resolve_hover(&tree, 52.0, 52.0).is_some());
    }

    #[test]
    fn ties_keep_first_inserted() {
        let tree = tree_with(&[(50.0, 50.0, 5.0, 2, 1), (50.0, 50.0, 5.0, 0, 9)]);
        let hover = resolve_hover(&tree, 51.0, 50.0).expect("hit");
        assert_eq!((hover.series_id, hover.data_index), (2, 1));
    }

    #[test]
    fn empty_tree_or_non_finite_cursor_has_no_hover() {
        let tree = tree_with(&[]);
        assert!(resolve_hover(&tree, 10.0, 10.0).is_none());

        let tree = tree_with(&[(10.0, 10.0, 5.0, 0, 0)]);
        assert!(resolve_hover(&tree, f64::NAN, 10.0).is_none());
    }
}
