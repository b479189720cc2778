use serde::{Deserialize, Serialize};

/// Leaf count above which a node subdivides.
pub const DEFAULT_NODE_CAPACITY: usize = 4;
/// Nodes at this depth never subdivide.
pub const MAX_DEPTH: u32 = 12;

/// Axis-aligned box in device pixels. Edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Square box of side `2 * radius` centered on `(cx, cy)`.
    #[must_use]
    pub fn centered(cx: f64, cy: f64, radius: f64) -> Self {
        Self::new(cx - radius, cy - radius, radius * 2.0, radius * 2.0)
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.w
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.h
    }

    #[must_use]
    pub fn center(self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[must_use]
    pub fn contains_point(self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    #[must_use]
    pub fn contains_rect(self, other: Rect) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }

    #[must_use]
    pub fn intersects(self, other: Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }
}

/// One rendered marker registered for hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexedItem {
    pub bbox: Rect,
    pub series_id: usize,
    pub data_index: usize,
}

#[derive(Debug, Clone)]
struct QuadNode {
    bounds: Rect,
    depth: u32,
    items: Vec<IndexedItem>,
    // NW, NE, SW, SE
    children: Option<Box<[QuadNode; 4]>>,
}

impl QuadNode {
    fn new(bounds: Rect, depth: u32) -> Self {
        Self {
            bounds,
            depth,
            items: Vec::new(),
            children: None,
        }
    }

    fn insert(&mut self, item: IndexedItem, capacity: usize, max_depth: u32) {
        if let Some(children) = self.children.as_mut() {
            match children
                .iter_mut()
                .find(|child| child.bounds.contains_rect(item.bbox))
            {
                Some(child) => child.insert(item, capacity, max_depth),
                None => self.items.push(item),
            }
            return;
        }

        self.items.push(item);
        if self.items.len() > capacity && self.depth < max_depth {
            self.subdivide(capacity, max_depth);
        }
    }

    fn subdivide(&mut self, capacity: usize, max_depth: u32) {
        let half_w = self.bounds.w / 2.0;
        let half_h = self.bounds.h / 2.0;
        let (x, y) = (self.bounds.x, self.bounds.y);
        let depth = self.depth + 1;

        self.children = Some(Box::new([
            QuadNode::new(Rect::new(x, y, half_w, half_h), depth),
            QuadNode::new(Rect::new(x + half_w, y, half_w, half_h), depth),
            QuadNode::new(Rect::new(x, y + half_h, half_w, half_h), depth),
            QuadNode::new(Rect::new(x + half_w, y + half_h, half_w, half_h), depth),
        ]));

        // Items spanning a quadrant boundary stay here; the rest move down.
        for item in std::mem::take(&mut self.items) {
            self.insert(item, capacity, max_depth);
        }
    }

    fn query<F: FnMut(&IndexedItem)>(&self, region: Rect, visitor: &mut F) {
        for item in &self.items {
            if item.bbox.intersects(region) {
                visitor(item);
            }
        }

        if let Some(children) = &self.children {
            for child in children.iter() {
                if child.bounds.intersects(region) {
                    child.query(region, visitor);
                }
            }
        }
    }

    fn max_depth(&self) -> u32 {
        self.children.as_ref().map_or(self.depth, |children| {
            children
                .iter()
                .map(QuadNode::max_depth)
                .max()
                .unwrap_or(self.depth)
        })
    }
}

/// Loose region quadtree over marker bounding boxes.
///
/// Items that fit entirely inside one quadrant live in that quadrant; items
/// crossing a quadrant boundary (or lying outside the root bounds) stay at
/// the deepest node that fully holds them, so every item is stored once.
#[derive(Debug, Clone)]
pub struct QuadTree {
    root: QuadNode,
    capacity: usize,
    max_depth: u32,
    len: usize,
}

impl QuadTree {
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self::with_capacity(bounds, DEFAULT_NODE_CAPACITY)
    }

    /// Creates a tree whose nodes split once they hold more than `capacity` items.
    #[must_use]
    pub fn with_capacity(bounds: Rect, capacity: usize) -> Self {
        Self {
            root: QuadNode::new(bounds, 0),
            capacity: capacity.max(1),
            max_depth: MAX_DEPTH,
            len: 0,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.root.bounds
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Deepest subdivision level currently in use (root is `0`).
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.root.max_depth()
    }

    pub fn insert(&mut self, item: IndexedItem) {
        self.root.insert(item, self.capacity, self.max_depth);
        self.len += 1;
    }

    /// Visits every item whose box overlaps `region` (edges inclusive).
    ///
    /// Items are visited node by node, parents before children, in insertion
    /// order within a node.
    pub fn query<F: FnMut(&IndexedItem)>(&self, region: Rect, mut visitor: F) {
        self.root.query(region, &mut visitor);
    }

    /// Visits every item whose box contains `(x, y)` (edges inclusive).
    pub fn query_point<F: FnMut(&IndexedItem)>(&self, x: f64, y: f64, visitor: F) {
        self.query(Rect::new(x, y, 0.0, 0.0), visitor);
    }

    /// Drops every item and subdivision, keeping the root bounds.
    pub fn clear(&mut self) {
        self.root = QuadNode::new(self.root.bounds, 0);
        self.len = 0;
    }

    /// Clears the tree and moves the root to `bounds`.
    pub fn reset(&mut self, bounds: Rect) {
        self.root = QuadNode::new(bounds, 0);
        self.len = 0;
    }
}
