use super::cell::Cell;
use super::error::EditError;
use super::seq::Seq;

/// An ordered row of cells. Insertion order is column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Seq<Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// A row of `width` empty cells.
    pub fn with_width(width: usize) -> Self {
        let mut row = Self::new();
        row.pad_to(width);
        row
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    pub fn cell_mut(&mut self, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut(col)
    }

    pub fn cells(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Pad with empty cells up to `width`. Never truncates.
    pub fn pad_to(&mut self, width: usize) {
        self.cells.grow_with(width, Cell::new);
    }
}

/// The table: an ordered sequence of rows.
///
/// All index-based methods are zero-based. Rows may be jagged while the table is
/// being built; `fill_rectangular` restores equal row lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Seq<Row>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    pub fn rows(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.cell(col))
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row).and_then(|r| r.cell_mut(col))
    }

    /// Length of row `row`, 0 if it does not exist.
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Row::len)
    }

    // =========================================================================
    // Structural edits
    // =========================================================================

    /// Append an empty row (no cells) and return it.
    pub fn append_row(&mut self) -> &mut Row {
        self.rows.append(Row::new());
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    /// Append an empty cell to `row`. Returns `None` if the row does not exist.
    pub fn append_cell(&mut self, row: usize) -> Option<&mut Cell> {
        let r = self.rows.get_mut(row)?;
        r.cells.append(Cell::new());
        r.cells.last_mut()
    }

    /// Insert an empty row before `index`, as wide as the widest row.
    /// An index past the end appends.
    pub fn insert_row(&mut self, index: usize) {
        let width = self.max_row_length();
        self.rows.insert_at(index, Row::with_width(width));
    }

    /// Insert an empty cell before `index` in `row`. Returns false if the row does not exist.
    pub fn insert_cell(&mut self, row: usize, index: usize) -> bool {
        match self.rows.get_mut(row) {
            Some(r) => {
                r.cells.insert_at(index, Cell::new());
                true
            }
            None => false,
        }
    }

    /// Delete row `index`, shifting later rows up.
    pub fn delete_row(&mut self, index: usize) -> Option<Row> {
        self.rows.remove_at(index)
    }

    /// Delete cell `index` in `row`, shifting later cells left.
    pub fn delete_cell(&mut self, row: usize, index: usize) -> Option<Cell> {
        self.rows.get_mut(row)?.cells.remove_at(index)
    }

    /// Exchange the contents of two cells.
    pub fn swap_cell(&mut self, r1: usize, c1: usize, r2: usize, c2: usize) -> Result<(), EditError> {
        for (r, c) in [(r1, c1), (r2, c2)] {
            if self.cell(r, c).is_none() {
                return Err(EditError::Reference { row: r + 1, col: c + 1 });
            }
        }
        if r1 == r2 {
            self.rows[r1].cells.swap(c1, c2);
        } else {
            let first = std::mem::take(&mut self.rows[r1].cells[c1]);
            let second = std::mem::replace(&mut self.rows[r2].cells[c2], first);
            self.rows[r1].cells[c1] = second;
        }
        Ok(())
    }

    // =========================================================================
    // Shape
    // =========================================================================

    pub fn max_row_length(&self) -> usize {
        self.rows.iter().map(Row::len).max().unwrap_or(0)
    }

    /// Pad every row with empty cells up to `max_row_length()`.
    pub fn fill_rectangular(&mut self) {
        let width = self.max_row_length();
        for row in self.rows.iter_mut() {
            row.pad_to(width);
        }
    }

    pub fn is_rectangular(&self) -> bool {
        let width = self.max_row_length();
        self.rows.iter().all(|r| r.len() == width)
    }

    /// Grow to at least `row_count` rows and `col_count` columns. Never shrinks.
    ///
    /// Every new row is created at full width, so the table stays rectangular
    /// throughout the growth. Returns true if anything was added.
    pub fn expand(&mut self, row_count: usize, col_count: usize) -> bool {
        let (old_rows, old_cols) = (self.row_count(), self.max_row_length());
        let width = old_cols.max(col_count);

        for row in self.rows.iter_mut() {
            row.pad_to(width);
        }
        while self.rows.len() < row_count {
            self.rows.append(Row::with_width(width));
        }

        let grew = self.row_count() > old_rows || width > old_cols;
        if grew {
            log::debug!(
                "table grew from {}x{} to {}x{}",
                old_rows, old_cols, self.row_count(), width
            );
        }
        grew
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sps_core::Delimiters;

    fn table_from(rows: &[&[&str]]) -> Table {
        let delims = Delimiters::default();
        let mut table = Table::new();
        for (r, cells) in rows.iter().enumerate() {
            table.append_row();
            for text in cells.iter() {
                if let Some(cell) = table.append_cell(r) {
                    cell.set(text, &delims);
                }
            }
        }
        table
    }

    fn texts(table: &Table) -> Vec<Vec<String>> {
        table
            .rows()
            .map(|r| r.cells().map(|c| c.text().to_string()).collect())
            .collect()
    }

    #[test]
    fn test_fill_rectangular_pads_short_rows() {
        let mut table = table_from(&[&["a"], &["b", "c", "d"], &[]]);
        assert!(!table.is_rectangular());
        table.fill_rectangular();
        assert!(table.is_rectangular());
        assert_eq!(table.max_row_length(), 3);
        assert_eq!(texts(&table)[0], vec!["a", "", ""]);
    }

    #[test]
    fn test_insert_row_is_full_width() {
        let mut table = table_from(&[&["1", "2"], &["3", "4"]]);
        table.insert_row(1);
        assert_eq!(table.row_count(), 3);
        assert_eq!(texts(&table)[1], vec!["", ""]);
        assert_eq!(texts(&table)[2], vec!["3", "4"]);
    }

    #[test]
    fn test_insert_and_delete_cell_shift() {
        let mut table = table_from(&[&["a", "b", "c"]]);
        assert!(table.insert_cell(0, 1));
        assert_eq!(texts(&table)[0], vec!["a", "", "b", "c"]);
        let removed = table.delete_cell(0, 2).unwrap();
        assert_eq!(removed.text(), "b");
        assert_eq!(texts(&table)[0], vec!["a", "", "c"]);
        assert!(!table.insert_cell(5, 0));
        assert!(table.delete_cell(0, 9).is_none());
    }

    #[test]
    fn test_delete_row() {
        let mut table = table_from(&[&["a"], &["b"], &["c"]]);
        let removed = table.delete_row(1).unwrap();
        assert_eq!(removed.cell(0).unwrap().text(), "b");
        assert_eq!(texts(&table), vec![vec!["a"], vec!["c"]]);
        assert!(table.delete_row(5).is_none());
    }

    #[test]
    fn test_swap_cell_across_rows_and_within_row() {
        let mut table = table_from(&[&["a", "b"], &["c", "d"]]);
        table.swap_cell(0, 0, 1, 1).unwrap();
        assert_eq!(texts(&table), vec![vec!["d", "b"], vec!["c", "a"]]);
        table.swap_cell(0, 0, 0, 1).unwrap();
        assert_eq!(texts(&table)[0], vec!["b", "d"]);
        table.swap_cell(1, 1, 1, 1).unwrap();
        assert_eq!(texts(&table)[1], vec!["c", "a"]);
    }

    #[test]
    fn test_swap_cell_keeps_quoting_flag_with_text() {
        let delims = Delimiters::new(",").unwrap();
        let mut table = table_from(&[&["x", "y"]]);
        table.cell_mut(0, 0).unwrap().set("a,b", &delims);
        table.swap_cell(0, 0, 0, 1).unwrap();
        assert!(table.cell(0, 1).unwrap().needs_quoting());
        assert!(!table.cell(0, 0).unwrap().needs_quoting());
    }

    #[test]
    fn test_swap_cell_out_of_range() {
        let mut table = table_from(&[&["a"]]);
        assert_eq!(
            table.swap_cell(0, 0, 2, 0),
            Err(EditError::Reference { row: 3, col: 1 })
        );
    }

    #[test]
    fn test_expand_grows_both_dimensions() {
        let mut table = table_from(&[&["1", "2"]]);
        assert!(table.expand(3, 4));
        assert_eq!(table.row_count(), 3);
        assert!(table.is_rectangular());
        assert_eq!(table.max_row_length(), 4);
        assert_eq!(texts(&table)[0], vec!["1", "2", "", ""]);
    }

    #[test]
    fn test_expand_never_shrinks() {
        let mut table = table_from(&[&["1", "2"], &["3", "4"]]);
        assert!(!table.expand(1, 1));
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.max_row_length(), 2);
    }

    #[test]
    fn test_expand_empty_table() {
        let mut table = Table::new();
        table.expand(2, 1);
        assert_eq!(texts(&table), vec![vec![""], vec![""]]);
    }
}
