use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Extent of a panel or roof in grid cells.
///
/// `rows` runs down the grid, `cols` across it. A panel given as `WxH` on the
/// command line covers `W` rows and `H` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub rows: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub cols: u32,
}

impl Rect {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    pub fn area(&self) -> u64 {
        self.rows as u64 * self.cols as u64
    }

    pub fn rotated(&self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Position {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// A panel committed to a roof. Only successful placements produce one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub id: u32,
    pub position: Position,
    pub size: Rect,
}

impl Panel {
    /// Whether `pos` lies inside this panel's footprint.
    pub fn covers(&self, pos: Position) -> bool {
        pos.row >= self.position.row
            && pos.row < self.position.row + self.size.rows
            && pos.col >= self.position.col
            && pos.col < self.position.col + self.size.cols
    }
}

/// Silhouette of the roof being packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoofShape {
    Rectangle {
        #[serde(deserialize_with = "deserialize_u32_from_number")]
        rows: u32,
        #[serde(deserialize_with = "deserialize_u32_from_number")]
        cols: u32,
    },
    /// Triangle of the given height sitting on a base of `base` columns,
    /// laid out on a `height x base` grid.
    Triangle {
        #[serde(deserialize_with = "deserialize_u32_from_number")]
        height: u32,
        #[serde(deserialize_with = "deserialize_u32_from_number")]
        base: u32,
    },
}

impl RoofShape {
    /// Dimensions of the grid that holds this shape.
    pub fn grid_size(&self) -> Rect {
        match *self {
            RoofShape::Rectangle { rows, cols } => Rect::new(rows, cols),
            RoofShape::Triangle { height, base } => Rect::new(height, base),
        }
    }
}

impl std::fmt::Display for RoofShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoofShape::Rectangle { rows, cols } => write!(f, "rectangle {rows}x{cols}"),
            RoofShape::Triangle { height, base } => {
                write!(f, "triangle height {height} base {base}")
            }
        }
    }
}

/// Orientation priority used by one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Panel as given, then rotated.
    HorizontalFirst,
    /// Rotated panel, then as given.
    VerticalFirst,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::HorizontalFirst, Strategy::VerticalFirst];

    /// Sizes to attempt at each cell, in order.
    pub fn orientations(self, panel: Rect) -> [Rect; 2] {
        match self {
            Strategy::HorizontalFirst => [panel, panel.rotated()],
            Strategy::VerticalFirst => [panel.rotated(), panel],
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::HorizontalFirst => f.write_str("horizontal-first"),
            Strategy::VerticalFirst => f.write_str("vertical-first"),
        }
    }
}

/// Accepts `4` as well as `4.0`; JSON clients often send integers as floats.
pub fn deserialize_u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_u64() {
        return u32::try_from(n).map_err(|_| D::Error::custom(format!("{n} is out of range")));
    }
    if let Some(f) = number.as_f64()
        && f.fract() == 0.0
        && (0.0..=u32::MAX as f64).contains(&f)
    {
        return Ok(f as u32);
    }
    Err(D::Error::custom(format!(
        "expected a non-negative integer, got {number}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotated_swaps_extents() {
        let r = Rect::new(2, 3);
        assert_eq!(r.rotated(), Rect::new(3, 2));
        assert_eq!(r.rotated().rotated(), r);
        assert_eq!(r.area(), 6);
    }

    #[test]
    fn test_strategy_orientations() {
        let panel = Rect::new(1, 2);
        assert_eq!(
            Strategy::HorizontalFirst.orientations(panel),
            [Rect::new(1, 2), Rect::new(2, 1)]
        );
        assert_eq!(
            Strategy::VerticalFirst.orientations(panel),
            [Rect::new(2, 1), Rect::new(1, 2)]
        );
    }

    #[test]
    fn test_panel_covers() {
        let panel = Panel {
            id: 1,
            position: Position::new(1, 2),
            size: Rect::new(2, 3),
        };
        assert!(panel.covers(Position::new(1, 2)));
        assert!(panel.covers(Position::new(2, 4)));
        assert!(!panel.covers(Position::new(3, 2)));
        assert!(!panel.covers(Position::new(1, 5)));
        assert!(!panel.covers(Position::new(0, 2)));
    }

    #[test]
    fn test_shape_deserialize_accepts_float_dimensions() {
        let shape: RoofShape =
            serde_json::from_str(r#"{"kind": "triangle", "height": 4.0, "base": 8}"#).unwrap();
        assert_eq!(shape, RoofShape::Triangle { height: 4, base: 8 });
        assert_eq!(shape.grid_size(), Rect::new(4, 8));
    }

    #[test]
    fn test_rect_deserialize_rejects_fractions() {
        let res: Result<Rect, _> = serde_json::from_str(r#"{"rows": 1.5, "cols": 2}"#);
        assert!(res.is_err());
        let res: Result<Rect, _> = serde_json::from_str(r#"{"rows": -1, "cols": 2}"#);
        assert!(res.is_err());
    }
}
