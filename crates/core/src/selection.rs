use std::fmt;

/// A rectangular region of the table, 1-based and inclusive on both ends.
///
/// Invariant: `1 <= start_row <= end_row` and `1 <= start_col <= end_col`.
/// The only constructors enforce it, so a `Selection` in hand is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    start_row: usize,
    start_col: usize,
    end_row: usize,
    end_col: usize,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            start_row: 1,
            start_col: 1,
            end_row: 1,
            end_col: 1,
        }
    }
}

impl Selection {
    /// Create a range selection. Returns `None` unless `1 <= r1 <= r2` and `1 <= c1 <= c2`.
    pub fn new(r1: usize, c1: usize, r2: usize, c2: usize) -> Option<Self> {
        if r1 == 0 || c1 == 0 || r1 > r2 || c1 > c2 {
            return None;
        }
        Some(Self {
            start_row: r1,
            start_col: c1,
            end_row: r2,
            end_col: c2,
        })
    }

    /// Create a single-cell selection.
    pub fn single(row: usize, col: usize) -> Option<Self> {
        Self::new(row, col, row, col)
    }

    pub fn start_row(&self) -> usize {
        self.start_row
    }

    pub fn start_col(&self) -> usize {
        self.start_col
    }

    pub fn end_row(&self) -> usize {
        self.end_row
    }

    pub fn end_col(&self) -> usize {
        self.end_col
    }

    /// Check if this selection contains a cell (1-based).
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.start_row && row <= self.end_row &&
        col >= self.start_col && col <= self.end_col
    }

    /// Number of cells in this selection.
    pub fn cell_count(&self) -> usize {
        (self.end_row - self.start_row + 1) * (self.end_col - self.start_col + 1)
    }

    /// Check if this is a single cell.
    pub fn is_single(&self) -> bool {
        self.start_row == self.end_row && self.start_col == self.end_col
    }

    /// Zero-based row indices covered by the selection.
    pub fn rows(&self) -> std::ops::Range<usize> {
        self.start_row - 1..self.end_row
    }

    /// Zero-based column indices covered by the selection.
    pub fn cols(&self) -> std::ops::Range<usize> {
        self.start_col - 1..self.end_col
    }

    /// Iterate over all cells as zero-based `(row, col)` pairs (row-major order).
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let cols = self.cols();
        self.rows().flat_map(move |r| cols.clone().map(move |c| (r, c)))
    }

    /// Zero-based `(row, col)` of the bottom-right corner.
    pub fn end_corner(&self) -> (usize, usize) {
        (self.end_row - 1, self.end_col - 1)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "[{},{}]", self.start_row, self.start_col)
        } else {
            write!(
                f,
                "[{},{},{},{}]",
                self.start_row, self.start_col, self.end_row, self.end_col
            )
        }
    }
}

/// One coordinate of a selection expression: a 1-based index or `_` ("last").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coord {
    Wildcard,
    Literal(usize),
}

impl Coord {
    /// Parse a single coordinate token. Leading/trailing spaces are ignored.
    ///
    /// Only `_` and positive decimal integers are accepted.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token == "_" {
            return Some(Coord::Wildcard);
        }
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match token.parse::<usize>() {
            Ok(0) | Err(_) => None,
            Ok(n) => Some(Coord::Literal(n)),
        }
    }

    /// Resolve against the current extent (`last` is the last row or column, 1-based).
    pub fn resolve(self, last: usize) -> usize {
        match self {
            Coord::Wildcard => last,
            Coord::Literal(n) => n,
        }
    }
}

/// Split the body of a bracketed expression into coordinates, left to right.
///
/// Returns `None` if any coordinate is malformed.
pub fn parse_coords(body: &str) -> Option<Vec<Coord>> {
    body.split(',').map(Coord::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_inverted_and_zero() {
        assert!(Selection::new(1, 1, 2, 2).is_some());
        assert!(Selection::new(2, 1, 1, 1).is_none());
        assert!(Selection::new(1, 3, 1, 2).is_none());
        assert!(Selection::new(0, 1, 1, 1).is_none());
        assert!(Selection::single(1, 0).is_none());
    }

    #[test]
    fn test_cells_are_row_major_and_zero_based() {
        let sel = Selection::new(1, 2, 2, 3).unwrap();
        let cells: Vec<_> = sel.cells().collect();
        assert_eq!(cells, vec![(0, 1), (0, 2), (1, 1), (1, 2)]);
        assert_eq!(sel.cell_count(), 4);
        assert_eq!(sel.end_corner(), (1, 2));
    }

    #[test]
    fn test_contains_is_one_based() {
        let sel = Selection::new(2, 2, 3, 3).unwrap();
        assert!(sel.contains(2, 2));
        assert!(sel.contains(3, 3));
        assert!(!sel.contains(1, 2));
        assert!(!sel.contains(3, 4));
    }

    #[test]
    fn test_display() {
        assert_eq!(Selection::single(4, 1).unwrap().to_string(), "[4,1]");
        assert_eq!(Selection::new(1, 1, 3, 2).unwrap().to_string(), "[1,1,3,2]");
    }

    #[test]
    fn test_coord_parse() {
        assert_eq!(Coord::parse("_"), Some(Coord::Wildcard));
        assert_eq!(Coord::parse(" 12 "), Some(Coord::Literal(12)));
        assert_eq!(Coord::parse("0"), None);
        assert_eq!(Coord::parse("-1"), None);
        assert_eq!(Coord::parse("1.5"), None);
        assert_eq!(Coord::parse(""), None);
        assert_eq!(Coord::parse("__"), None);
    }

    #[test]
    fn test_parse_coords() {
        assert_eq!(
            parse_coords("1,_"),
            Some(vec![Coord::Literal(1), Coord::Wildcard])
        );
        assert_eq!(parse_coords("1,,2"), None);
        assert_eq!(Coord::Wildcard.resolve(7), 7);
        assert_eq!(Coord::Literal(3).resolve(7), 3);
    }
}
