use serde::Serialize;

use crate::error::{PackError, Result};
use crate::roof::{PanelIds, Roof};
use crate::types::{Panel, Position, Rect, RoofShape, Strategy};

/// Largest grid, in cells, a packer accepts.
pub const MAX_GRID_CELLS: u64 = 4_000_000;

/// Greedy panel packer for a single roof and panel shape.
///
/// Each [`Strategy`] gets its own roof. All roofs are swept together in
/// row-major order; at every cell each roof attempts both panel orientations
/// in its strategy's order. Nothing is ever undone.
pub struct Packer {
    shape: RoofShape,
    panel: Rect,
    ids: Option<PanelIds>,
}

impl Packer {
    pub fn new(shape: RoofShape, panel: Rect) -> Result<Self> {
        match shape {
            RoofShape::Rectangle { rows, cols } if rows == 0 || cols == 0 => {
                return Err(PackError::InvalidRoof(Rect::new(rows, cols)));
            }
            RoofShape::Triangle { height, base } if height == 0 || base == 0 => {
                return Err(PackError::InvalidTriangle { height, base });
            }
            _ => {}
        }
        if panel.is_empty() {
            return Err(PackError::InvalidPanel(panel));
        }
        let grid = shape.grid_size();
        if grid.area() > MAX_GRID_CELLS {
            return Err(PackError::GridTooLarge {
                grid,
                limit: MAX_GRID_CELLS,
            });
        }
        Ok(Self {
            shape,
            panel,
            ids: None,
        })
    }

    /// Draw panel ids from `ids` instead of a fresh counter per [`pack`](Self::pack).
    pub fn with_ids(mut self, ids: PanelIds) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn pack(&self) -> Result<Packing> {
        let ids = self.ids.clone().unwrap_or_default();
        let mut surfaces = Strategy::ALL
            .iter()
            .map(|&strategy| self.build_roof(ids.clone()).map(|roof| (strategy, roof)))
            .collect::<Result<Vec<_>>>()?;

        let grid = self.shape.grid_size();
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let pos = Position::new(row, col);
                for (strategy, roof) in surfaces.iter_mut() {
                    for size in strategy.orientations(self.panel) {
                        roof.add_panel(pos, size);
                    }
                }
            }
        }

        for (strategy, roof) in &surfaces {
            tracing::debug!(
                shape = %self.shape,
                panel = %self.panel,
                %strategy,
                panels = roof.panel_count(),
                "sweep finished"
            );
        }

        Ok(Packing { surfaces })
    }

    fn build_roof(&self, ids: PanelIds) -> Result<Roof> {
        let grid = self.shape.grid_size();
        let mut roof = Roof::new(grid.rows, grid.cols, ids)?;
        if let RoofShape::Triangle { height, base } = self.shape {
            roof.apply_triangle_mask(height, base)?;
        }
        Ok(roof)
    }
}

/// Outcome of one [`Packer::pack`] call: one swept roof per strategy.
#[derive(Debug, Clone)]
pub struct Packing {
    surfaces: Vec<(Strategy, Roof)>,
}

impl Packing {
    /// Swept roofs in [`Strategy::ALL`] order.
    pub fn surfaces(&self) -> &[(Strategy, Roof)] {
        &self.surfaces
    }

    pub fn surface(&self, strategy: Strategy) -> Option<&Roof> {
        self.surfaces
            .iter()
            .find(|(s, _)| *s == strategy)
            .map(|(_, roof)| roof)
    }

    /// Roof with the most panels; ties go to the earlier strategy.
    pub fn best(&self) -> (Strategy, &Roof) {
        let mut best = &self.surfaces[0];
        for surface in &self.surfaces[1..] {
            if surface.1.panel_count() > best.1.panel_count() {
                best = surface;
            }
        }
        (best.0, &best.1)
    }

    pub fn panel_count(&self) -> usize {
        self.best().1.panel_count()
    }

    /// Serializable summary; grids are only copied when `include_grid` is set.
    pub fn report(&self, include_grid: bool) -> PackingReport {
        PackingReport {
            panel_count: self.panel_count(),
            best_strategy: self.best().0,
            surfaces: self
                .surfaces
                .iter()
                .map(|(strategy, roof)| SurfaceReport {
                    strategy: *strategy,
                    panel_count: roof.panel_count(),
                    panels: roof.panels().to_vec(),
                    grid: include_grid.then(|| roof.grid().to_vec()),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PackingReport {
    pub panel_count: usize,
    pub best_strategy: Strategy,
    pub surfaces: Vec<SurfaceReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SurfaceReport {
    pub strategy: Strategy,
    pub panel_count: usize,
    pub panels: Vec<Panel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Vec<Vec<i64>>>,
}

/// Number of `panel_width x panel_height` panels packed onto a
/// `roof_rows x roof_cols` roof.
pub fn pack_rectangular(
    roof_rows: u32,
    roof_cols: u32,
    panel_width: u32,
    panel_height: u32,
) -> Result<usize> {
    let shape = RoofShape::Rectangle {
        rows: roof_rows,
        cols: roof_cols,
    };
    let packing = Packer::new(shape, Rect::new(panel_width, panel_height))?.pack()?;
    Ok(packing.panel_count())
}

/// Number of `panel_width x panel_height` panels packed onto a triangular
/// roof of the given height and base.
pub fn pack_triangular(
    panel_width: u32,
    panel_height: u32,
    triangle_height: u32,
    triangle_base: u32,
) -> Result<usize> {
    let shape = RoofShape::Triangle {
        height: triangle_height,
        base: triangle_base,
    };
    let packing = Packer::new(shape, Rect::new(panel_width, panel_height))?.pack()?;
    Ok(packing.panel_count())
}
