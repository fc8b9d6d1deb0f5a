use crate::packer::Packing;
use crate::roof::{CellState, Roof};
use crate::types::Position;

const EMPTY_MARK: &str = ".";
const EXCLUDED_MARK: &str = "#";

/// Renders the occupancy grid, one line per row.
///
/// Cells are right-aligned to the width of the largest panel id so panel
/// boundaries stay readable: `.` is free, `#` is outside the roof.
pub fn render_roof(roof: &Roof) -> String {
    let width = roof
        .panels()
        .iter()
        .map(|p| p.id.to_string().len())
        .max()
        .unwrap_or(1);

    let mut result = String::new();
    for row in 0..roof.rows() {
        let line: Vec<String> = (0..roof.cols())
            .map(|col| {
                let label = match roof.cell(Position::new(row, col)) {
                    Some(CellState::Panel(id)) => id.to_string(),
                    Some(CellState::Excluded) => EXCLUDED_MARK.to_string(),
                    Some(CellState::Empty) | None => EMPTY_MARK.to_string(),
                };
                format!("{label:>width$}")
            })
            .collect();
        result.push_str(&line.join(" "));
        result.push('\n');
    }
    result
}

/// Renders every surface of a packing under a header line.
pub fn render_packing(packing: &Packing) -> String {
    let mut result = String::new();
    for (strategy, roof) in packing.surfaces() {
        let n = roof.panel_count();
        result.push_str(&format!(
            "{strategy}: {n} panel{}\n",
            if n == 1 { "" } else { "s" }
        ));
        result.push_str(&render_roof(roof));
        result.push('\n');
    }
    result
}
