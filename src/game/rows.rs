use crate::game::lane::LaneDescriptor;

/// Generated lanes ahead of the start line. Row 1 is the first stored lane;
/// rows 0 and below are plain grass and never stored.
#[derive(Default, Debug, Clone)]
pub struct RowStore {
    rows: Vec<LaneDescriptor>,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends lanes after the current tail and returns the row index of the
    /// first one.
    pub fn append(&mut self, lanes: Vec<LaneDescriptor>) -> i32 {
        let first = self.len() + 1;
        self.rows.extend(lanes);
        first
    }

    pub fn get(&self, row: i32) -> Option<&LaneDescriptor> {
        if row < 1 {
            return None;
        }
        self.rows.get((row - 1) as usize)
    }

    pub fn reset(&mut self) {
        self.rows.clear();
    }

    pub fn len(&self) -> i32 {
        self.rows.len() as i32
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True once `row` is within `watermark` rows of the tail.
    pub fn needs_growth(&self, row: i32, watermark: i32) -> bool {
        row > self.len() - watermark
    }

    /// Blocking check for a cell: only forest trees block, missing rows never do.
    pub fn is_blocked(&self, row: i32, tile: i32) -> bool {
        self.get(row).map_or(false, |lane| lane.blocks(tile))
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, &LaneDescriptor)> + '_ {
        self.rows.iter().enumerate().map(|(i, lane)| (i as i32 + 1, lane))
    }
}
