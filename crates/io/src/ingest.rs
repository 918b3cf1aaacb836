//! Single-pass scanner that builds a `Table` from delimited text.
//!
//! Rules, in priority order for each character:
//! 1. `\n` outside quotes ends the row (`\r\n` counts as one newline).
//! 2. `"` toggles quoting and is never stored.
//! 3. `\` escapes the next character: a delimiter is stored bare and marks the
//!    cell for quoting; anything else keeps both characters.
//! 4. A delimiter outside quotes ends the cell and is never stored.
//! 5. Everything else is appended. A delimiter stored this way marks the cell for quoting.

use sps_core::Delimiters;
use sps_engine::{Cell, Table};

pub fn parse(input: &str, delimiters: &Delimiters) -> Table {
    let mut table = Table::new();
    let mut quote_active = false;
    let (mut row, mut col) = (0usize, 0usize);
    // Whether anything follows the last newline; a bare trailing newline adds no row.
    let mut row_has_content = false;

    table.append_row();
    table.append_cell(row);

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if !quote_active && (c == '\n' || (c == '\r' && chars.peek() == Some(&'\n'))) {
            if c == '\r' {
                chars.next();
            }
            row += 1;
            col = 0;
            table.append_row();
            table.append_cell(row);
            row_has_content = false;
            continue;
        }
        row_has_content = true;

        if c == '"' {
            quote_active = !quote_active;
            continue;
        }

        if !quote_active && c != '\\' && delimiters.contains(c) {
            table.append_cell(row);
            col += 1;
            continue;
        }

        let Some(cell) = table.cell_mut(row, col) else {
            continue;
        };
        if c == '\\' {
            escape(cell, chars.next(), delimiters);
        } else {
            if delimiters.contains(c) {
                cell.mark_quoted();
            }
            cell.push(c);
        }
    }

    if !row_has_content {
        table.delete_row(row);
    }
    table.fill_rectangular();

    log::debug!(
        "ingested {} rows x {} cols",
        table.row_count(),
        table.max_row_length()
    );
    table
}

fn escape(cell: &mut Cell, next: Option<char>, delimiters: &Delimiters) {
    match next {
        Some(n) if delimiters.contains(n) => {
            cell.mark_quoted();
            cell.push(n);
        }
        Some(n) => {
            cell.push('\\');
            cell.push(n);
        }
        None => cell.push('\\'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(table: &Table) -> Vec<Vec<String>> {
        table
            .rows()
            .map(|r| r.cells().map(|c| c.text().to_string()).collect())
            .collect()
    }

    fn space() -> Delimiters {
        Delimiters::default()
    }

    #[test]
    fn test_basic_rows_and_cells() {
        let table = parse("1 2\n3 4\n", &space());
        assert_eq!(texts(&table), vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn test_no_trailing_newline() {
        let table = parse("a b\nc d", &space());
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_only_final_newline_is_dropped() {
        let table = parse("a\n\n", &space());
        assert_eq!(texts(&table), vec![vec!["a"], vec![""]]);
    }

    #[test]
    fn test_empty_input_has_no_rows() {
        let table = parse("", &space());
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_jagged_rows_are_filled() {
        let table = parse("a\nb c d\ne f\n", &space());
        assert!(table.is_rectangular());
        assert_eq!(texts(&table), vec![
            vec!["a", "", ""],
            vec!["b", "c", "d"],
            vec!["e", "f", ""],
        ]);
    }

    #[test]
    fn test_quoted_delimiter_is_kept_and_flagged() {
        let delims = Delimiters::new(",").unwrap();
        let table = parse("\"a,b\",c\n", &delims);
        assert_eq!(texts(&table), vec![vec!["a,b", "c"]]);
        assert!(table.cell(0, 0).unwrap().needs_quoting());
        assert!(!table.cell(0, 1).unwrap().needs_quoting());
    }

    #[test]
    fn test_quotes_without_delimiter_are_not_flagged() {
        let delims = Delimiters::new(",").unwrap();
        let table = parse("\"ab\",c\n", &delims);
        assert_eq!(table.cell(0, 0).unwrap().text(), "ab");
        assert!(!table.cell(0, 0).unwrap().needs_quoting());
    }

    #[test]
    fn test_newline_inside_quotes_stays_in_cell() {
        let delims = Delimiters::new(",").unwrap();
        let table = parse("\"a\nb\",c\n", &delims);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.cell(0, 0).unwrap().text(), "a\nb");
    }

    #[test]
    fn test_escaped_delimiter() {
        let delims = Delimiters::new(",").unwrap();
        let table = parse("a\\,b,c\n", &delims);
        assert_eq!(texts(&table), vec![vec!["a,b", "c"]]);
        assert!(table.cell(0, 0).unwrap().needs_quoting());
    }

    #[test]
    fn test_escaped_other_char_keeps_backslash() {
        let table = parse("a\\tb c\n", &space());
        assert_eq!(texts(&table), vec![vec!["a\\tb", "c"]]);
        assert!(!table.cell(0, 0).unwrap().needs_quoting());
    }

    #[test]
    fn test_trailing_backslash() {
        let table = parse("a\\", &space());
        assert_eq!(texts(&table), vec![vec!["a\\"]]);
    }

    #[test]
    fn test_multiple_delimiters() {
        let delims = Delimiters::new(":;").unwrap();
        let table = parse("a:b;c\n", &delims);
        assert_eq!(texts(&table), vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let table = parse("1 2\r\n3 4\r\n", &space());
        assert_eq!(texts(&table), vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn test_consecutive_delimiters_make_empty_cells() {
        let delims = Delimiters::new(",").unwrap();
        let table = parse(",d\n", &delims);
        assert_eq!(texts(&table), vec![vec!["", "d"]]);
    }
}
