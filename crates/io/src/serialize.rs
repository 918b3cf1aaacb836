use sps_core::Delimiters;
use sps_engine::Table;

/// Render the table as delimited text.
///
/// Cells are joined by the canonical delimiter and wrapped in `"` when flagged
/// for quoting. Each row ends with a newline and the output ends with a blank line.
pub fn serialize(table: &Table, delimiters: &Delimiters) -> String {
    let delimiter = delimiters.canonical();
    let mut out = String::new();

    for row in table.rows() {
        for (i, cell) in row.cells().enumerate() {
            if i > 0 {
                out.push(delimiter);
            }
            if cell.needs_quoting() {
                out.push('"');
                out.push_str(cell.text());
                out.push('"');
            } else {
                out.push_str(cell.text());
            }
        }
        out.push('\n');
    }
    out.push('\n');
    out
}
