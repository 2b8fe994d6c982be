//! Open layer state used while packing.

use ghoststack_core::{Extent, LayerStats, Position};

/// Slack for accumulated floating-point error in cursor comparisons.
pub(crate) const EPSILON: f64 = 1e-9;

/// Transient shelf cursors. Discarded when the layer closes.
#[derive(Debug, Clone, Copy, Default)]
struct RowCursor {
    /// Next free x in the current row.
    x: f64,
    /// Start of the current row along z.
    z: f64,
    /// Deepest box in the current row.
    row_depth: f64,
}

/// A layer that is still accepting boxes.
#[derive(Debug, Clone)]
pub(crate) struct OpenLayer {
    index: usize,
    level: f64,
    top: f64,
    entries: Vec<usize>,
    covered_area: f64,
    cursor: RowCursor,
}

impl OpenLayer {
    /// Opens an empty layer whose base sits at `level`.
    pub(crate) fn new(index: usize, level: f64) -> Self {
        Self {
            index,
            level,
            top: level,
            entries: Vec::new(),
            covered_area: 0.0,
            cursor: RowCursor::default(),
        }
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    /// Maximum occupied height so far.
    pub(crate) fn top(&self) -> f64 {
        self.top
    }

    /// Starts a new row if `extent` would run past `width` in the current one.
    pub(crate) fn wrap_if_needed(&mut self, extent: &Extent, width: f64) {
        if self.cursor.x + extent.width > width + EPSILON {
            self.cursor.z += self.cursor.row_depth;
            self.cursor.x = 0.0;
            self.cursor.row_depth = 0.0;
        }
    }

    /// Returns true if `extent` fits in the current row without passing `depth`.
    pub(crate) fn fits_depth(&self, extent: &Extent, depth: f64) -> bool {
        self.cursor.z + extent.depth <= depth + EPSILON
    }

    /// Places a box at the cursor and advances it.
    pub(crate) fn place(&mut self, entry: usize, extent: &Extent) -> Position {
        let position = Position::new(self.cursor.x, self.level, self.cursor.z);
        self.cursor.x += extent.width;
        self.cursor.row_depth = self.cursor.row_depth.max(extent.depth);
        self.top = self.top.max(self.level + extent.height);
        self.covered_area += extent.footprint_area();
        self.entries.push(entry);
        position
    }

    /// Closes the layer, dropping its cursors.
    pub(crate) fn close(self) -> LayerStats {
        LayerStats {
            layer_index: self.index,
            level: self.level,
            top: self.top,
            entries: self.entries,
            covered_area: self.covered_area,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_wrap() {
        let mut layer = OpenLayer::new(0, 0.0);
        let e = Extent::new(20.0, 14.0, 10.0);

        for i in 0..2 {
            layer.wrap_if_needed(&e, 48.0);
            layer.place(i, &e);
        }
        layer.wrap_if_needed(&e, 48.0);
        assert!(layer.fits_depth(&e, 40.0));
        let p = layer.place(2, &e);
        assert_eq!(p, Position::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn test_close_reports_top() {
        let mut layer = OpenLayer::new(1, 12.0);
        layer.place(0, &Extent::new(10.0, 5.0, 10.0));
        layer.place(1, &Extent::new(10.0, 9.0, 10.0));
        let stats = layer.close();
        assert_eq!(stats.layer_index, 1);
        assert_eq!(stats.top, 21.0);
        assert_eq!(stats.entries, vec![0, 1]);
        assert_eq!(stats.covered_area, 200.0);
    }

    #[test]
    fn test_empty_layer_top_is_level() {
        let stats = OpenLayer::new(2, 30.0).close();
        assert!(stats.is_empty());
        assert_eq!(stats.top, 30.0);
    }
}
