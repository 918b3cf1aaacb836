//! Selection resolver: turns a parsed `[ ... ]` expression into a `Selection`
//! and grows the table so the result is always addressable.

use sps_core::Selection;

use super::command::SelectExpr;
use super::error::EditError;
use super::table::Table;

/// Resolve `expr` against the current state.
///
/// `current` is the active selection; `saved` is the slot used by `[set]` / `[_]`.
/// Returns the new active selection after growing `table` to cover it.
pub fn resolve(
    expr: &SelectExpr,
    table: &mut Table,
    current: Selection,
    saved: &mut Selection,
) -> Result<Selection, EditError> {
    let selection = match expr {
        SelectExpr::Max => extremum(table, current, |candidate, best| candidate > best),
        SelectExpr::Min => extremum(table, current, |candidate, best| candidate < best),
        SelectExpr::Find(text) => find(table, text).unwrap_or(current),
        SelectExpr::Save => {
            *saved = current;
            current
        }
        SelectExpr::Restore => *saved,
        SelectExpr::Point(r, c) => {
            let row = r.resolve(table.row_count());
            let col = c.resolve(table.max_row_length());
            Selection::single(row, col).ok_or_else(|| {
                EditError::SelectionSyntax(format!("[{},{}] does not name a cell", row, col))
            })?
        }
        SelectExpr::Range(r1, c1, r2, c2) => {
            let (last_row, last_col) = (table.row_count(), table.max_row_length());
            let (r1, c1) = (r1.resolve(last_row), c1.resolve(last_col));
            let (r2, c2) = (r2.resolve(last_row), c2.resolve(last_col));
            Selection::new(r1, c1, r2, c2).ok_or_else(|| {
                EditError::SelectionSyntax(format!(
                    "[{},{},{},{}] needs 0 < R1 <= R2 and 0 < C1 <= C2",
                    r1, c1, r2, c2
                ))
            })?
        }
    };

    cover(table, &selection);
    Ok(selection)
}

/// Grow the table so every cell of `selection` exists.
pub fn cover(table: &mut Table, selection: &Selection) {
    if selection.end_row() > table.row_count() || selection.end_col() > table.max_row_length() {
        table.expand(selection.end_row(), selection.end_col());
    }
}

/// Collapse to the numeric extremum inside `current`; the first one wins ties.
/// Leaves the selection unchanged when no cell holds a number.
fn extremum(
    table: &Table,
    current: Selection,
    better: impl Fn(f64, f64) -> bool,
) -> Selection {
    let mut best: Option<(f64, usize, usize)> = None;
    for (r, c) in current.cells() {
        let Some(value) = table.cell(r, c).and_then(|cell| cell.as_number()) else {
            continue;
        };
        match best {
            Some((b, _, _)) if !better(value, b) => {}
            _ => best = Some((value, r, c)),
        }
    }
    best.and_then(|(_, r, c)| Selection::single(r + 1, c + 1))
        .unwrap_or(current)
}

/// First cell in row-major order whose text equals `text`.
fn find(table: &Table, text: &str) -> Option<Selection> {
    table.rows().enumerate().find_map(|(r, row)| {
        row.cells()
            .position(|cell| cell.text() == text)
            .and_then(|c| Selection::single(r + 1, c + 1))
    })
}
