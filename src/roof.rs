use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::Serialize;

use crate::error::{PackError, Result};
use crate::types::{Panel, Position, Rect};

/// Cell value of an available cell.
pub const EMPTY: i64 = 0;
/// Cell value of a cell outside the roof silhouette.
pub const EXCLUDED: i64 = -1;

/// Source of panel identifiers.
///
/// Clones share one counter: every successful placement on any roof holding
/// a clone takes the next value. The counter starts at zero, so the first id
/// handed out is 1, and it is never reset.
#[derive(Debug, Clone, Default)]
pub struct PanelIds(Arc<AtomicU32>);

impl PanelIds {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&self) -> u32 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Excluded,
    Panel(u32),
}

impl From<i64> for CellState {
    fn from(value: i64) -> Self {
        match value {
            EMPTY => CellState::Empty,
            v if v > 0 => CellState::Panel(v as u32),
            _ => CellState::Excluded,
        }
    }
}

/// Occupancy grid of a roof plus the panels placed on it.
#[derive(Debug, Clone, Serialize)]
pub struct Roof {
    size: Rect,
    grid: Vec<Vec<i64>>,
    panels: Vec<Panel>,
    #[serde(skip)]
    ids: PanelIds,
}

impl Roof {
    pub fn new(rows: u32, cols: u32, ids: PanelIds) -> Result<Self> {
        let size = Rect::new(rows, cols);
        if size.is_empty() {
            return Err(PackError::InvalidRoof(size));
        }
        Ok(Self {
            size,
            grid: vec![vec![EMPTY; cols as usize]; rows as usize],
            panels: Vec::new(),
            ids,
        })
    }

    pub fn rows(&self) -> u32 {
        self.size.rows
    }

    pub fn cols(&self) -> u32 {
        self.size.cols
    }

    pub fn size(&self) -> Rect {
        self.size
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Placed panels in placement order.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Raw occupancy grid, one `Vec` per row.
    pub fn grid(&self) -> &[Vec<i64>] {
        &self.grid
    }

    pub fn cell(&self, pos: Position) -> Option<CellState> {
        self.grid
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
            .map(|&v| CellState::from(v))
    }

    pub fn excluded_count(&self) -> usize {
        self.grid.iter().flatten().filter(|&&v| v == EXCLUDED).count()
    }

    /// Cuts a triangular silhouette out of the grid.
    ///
    /// With `tangent = 2 * height / base`, row `x` excludes column `y` of the
    /// left half when `(x + 1) / (y + 1) > tangent` and column `y` of the right
    /// half when `(x + 1) / (base - y) > tangent`. Every visited cell is
    /// overwritten with [`EXCLUDED`] or [`EMPTY`]. The halves share column
    /// `base / 2 - 1`; the right half is written last and decides it.
    pub fn apply_triangle_mask(&mut self, height: u32, base: u32) -> Result<()> {
        if height == 0 || base == 0 {
            return Err(PackError::InvalidTriangle { height, base });
        }
        if height > self.size.rows || base > self.size.cols {
            return Err(PackError::MaskOutOfBounds {
                height,
                base,
                grid: self.size,
            });
        }
        if !self.panels.is_empty() {
            return Err(PackError::MaskAfterPlacement {
                placed: self.panels.len(),
            });
        }

        // (x + 1) / d > 2h / b  <=>  (x + 1) * b > 2h * d, all terms positive
        let steeper = |x: u32, d: u32| (x as u64 + 1) * base as u64 > 2 * height as u64 * d as u64;
        let half = base / 2;

        for x in 0..height {
            let row = &mut self.grid[x as usize];
            for y in 0..half {
                row[y as usize] = if steeper(x, y + 1) { EXCLUDED } else { EMPTY };
            }
            for y in half.saturating_sub(1)..base {
                row[y as usize] = if steeper(x, base - y) { EXCLUDED } else { EMPTY };
            }
        }

        tracing::debug!(
            height,
            base,
            excluded = self.excluded_count(),
            "applied triangle mask"
        );
        Ok(())
    }

    /// Whether a `size` panel fits at `pos`: in bounds and every cell empty.
    pub fn is_space_available(&self, pos: Position, size: Rect) -> bool {
        let row_end = pos.row as u64 + size.rows as u64;
        let col_end = pos.col as u64 + size.cols as u64;
        if row_end > self.size.rows as u64 || col_end > self.size.cols as u64 {
            return false;
        }
        self.grid[pos.row as usize..row_end as usize]
            .iter()
            .all(|row| {
                row[pos.col as usize..col_end as usize]
                    .iter()
                    .all(|&v| v == EMPTY)
            })
    }

    /// Places a `size` panel at `pos` if the space is free.
    ///
    /// Returns `false` and leaves the roof untouched otherwise; a rejected
    /// attempt is the normal outcome for most cells of a sweep.
    pub fn add_panel(&mut self, pos: Position, size: Rect) -> bool {
        if size.is_empty() || !self.is_space_available(pos, size) {
            return false;
        }

        let panel = Panel {
            id: self.ids.next(),
            position: pos,
            size,
        };
        let stamp = i64::from(panel.id);
        for row in &mut self.grid[pos.row as usize..(pos.row + size.rows) as usize] {
            row[pos.col as usize..(pos.col + size.cols) as usize].fill(stamp);
        }
        tracing::trace!(id = panel.id, row = pos.row, col = pos.col, %size, "placed panel");
        self.panels.push(panel);
        true
    }
}
