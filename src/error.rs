use thiserror::Error;

use crate::types::Rect;

/// Rejected inputs. Placement failures are not errors; see [`crate::roof::Roof::add_panel`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("roof dimensions must be non-zero, got {0}")]
    InvalidRoof(Rect),

    #[error("panel dimensions must be non-zero, got {0}")]
    InvalidPanel(Rect),

    #[error("triangle height and base must be non-zero, got height {height} base {base}")]
    InvalidTriangle { height: u32, base: u32 },

    #[error("triangle height {height} base {base} does not fit in a {grid} grid")]
    MaskOutOfBounds { height: u32, base: u32, grid: Rect },

    #[error("a {grid} grid exceeds the limit of {limit} cells")]
    GridTooLarge { grid: Rect, limit: u64 },

    #[error("triangle mask applied after {placed} panel(s) were placed")]
    MaskAfterPlacement { placed: usize },
}

pub type Result<T> = std::result::Result<T, PackError>;
