//! Tokenizer for the command string.
//!
//! A script is a `;`-separated list of segments. Each segment holds zero or more
//! bracketed selection expressions followed by at most one command:
//!
//! ```text
//! [1,1];set 9
//! [1,1,_,1] sum [4,1]
//! [2,2] [find a] set x
//! ```

use sps_core::selection::{parse_coords, Coord};

use super::error::EditError;
use super::vars::Variables;

/// A bracketed selection expression.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectExpr {
    /// `[max]`: collapse to the cell with the largest number.
    Max,
    /// `[min]`: collapse to the cell with the smallest number.
    Min,
    /// `[find TEXT]`: collapse to the first cell whose text equals TEXT.
    Find(String),
    /// `[set]`: remember the current selection.
    Save,
    /// `[_]`: go back to the remembered selection.
    Restore,
    /// `[R,C]`
    Point(Coord, Coord),
    /// `[R1,C1,R2,C2]`
    Range(Coord, Coord, Coord, Coord),
}

impl SelectExpr {
    /// Parse the text between `[` and `]`.
    pub fn parse(body: &str) -> Result<Self, EditError> {
        let trimmed = body.trim();
        match trimmed {
            "max" => return Ok(SelectExpr::Max),
            "min" => return Ok(SelectExpr::Min),
            "set" => return Ok(SelectExpr::Save),
            "_" => return Ok(SelectExpr::Restore),
            _ => {}
        }
        if let Some(text) = body.trim_start().strip_prefix("find ") {
            return Ok(SelectExpr::Find(text.to_string()));
        }

        let bad_coords = || EditError::SelectionSyntax(format!("[{}]", body));
        match trimmed.matches(',').count() {
            1 => {
                let c = parse_coords(trimmed).ok_or_else(bad_coords)?;
                Ok(SelectExpr::Point(c[0], c[1]))
            }
            3 => {
                let c = parse_coords(trimmed).ok_or_else(bad_coords)?;
                Ok(SelectExpr::Range(c[0], c[1], c[2], c[3]))
            }
            _ => Err(EditError::SelectionSyntax(format!(
                "[{}] is not a keyword, [R,C] or [R1,C1,R2,C2]",
                body
            ))),
        }
    }
}

/// A `[R,C]` target cell argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRef {
    pub row: Coord,
    pub col: Coord,
}

impl CellRef {
    pub fn parse(arg: &str) -> Result<Self, EditError> {
        let body = arg
            .trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| EditError::CommandSyntax(format!("expected [R,C], got {:?}", arg)))?;
        if body.matches(',').count() != 1 {
            return Err(EditError::CommandSyntax(format!("expected [R,C], got {:?}", arg)));
        }
        let coords = parse_coords(body).ok_or_else(|| {
            EditError::Conversion(format!("[{}] does not hold positive integers or _", body))
        })?;
        Ok(CellRef { row: coords[0], col: coords[1] })
    }
}

/// One command, already validated.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    InsertRowBefore,
    InsertRowAfter,
    InsertColBefore,
    InsertColAfter,
    DeleteCol,
    DeleteRow,
    Clear,
    Set(String),
    Swap(CellRef),
    Sum(CellRef),
    Avg(CellRef),
    Count(CellRef),
    Len(CellRef),
    Def(usize),
    Use(usize),
    Inc(usize),
}

impl Command {
    /// Parse `name [argument]`.
    pub fn parse(text: &str) -> Result<Self, EditError> {
        let text = text.trim();
        let (name, arg) = match text.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (text, ""),
        };

        let no_arg = |cmd: Command| {
            if arg.is_empty() {
                Ok(cmd)
            } else {
                Err(EditError::CommandSyntax(format!("{} takes no argument", name)))
            }
        };
        let need_arg = || {
            if arg.is_empty() {
                Err(EditError::CommandSyntax(format!("{} requires an argument", name)))
            } else {
                Ok(arg)
            }
        };

        match name {
            "irow" => no_arg(Command::InsertRowBefore),
            "arow" => no_arg(Command::InsertRowAfter),
            "icol" => no_arg(Command::InsertColBefore),
            "acol" => no_arg(Command::InsertColAfter),
            "dcol" => no_arg(Command::DeleteCol),
            "drow" => no_arg(Command::DeleteRow),
            "clear" => no_arg(Command::Clear),
            "set" => Ok(Command::Set(need_arg()?.to_string())),
            "swap" => Ok(Command::Swap(CellRef::parse(need_arg()?)?)),
            "sum" => Ok(Command::Sum(CellRef::parse(need_arg()?)?)),
            "avg" => Ok(Command::Avg(CellRef::parse(need_arg()?)?)),
            "count" => Ok(Command::Count(CellRef::parse(need_arg()?)?)),
            "len" => Ok(Command::Len(CellRef::parse(need_arg()?)?)),
            "def" => Ok(Command::Def(Variables::parse_index(need_arg()?)?)),
            "use" => Ok(Command::Use(Variables::parse_index(need_arg()?)?)),
            "inc" => Ok(Command::Inc(Variables::parse_index(need_arg()?)?)),
            _ => Err(EditError::CommandSyntax(format!("unknown command {:?}", name))),
        }
    }

    /// True for commands that change the table's shape.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Command::InsertRowBefore
                | Command::InsertRowAfter
                | Command::InsertColBefore
                | Command::InsertColAfter
                | Command::DeleteCol
                | Command::DeleteRow
        )
    }
}

/// A parsed `;`-separated segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub selections: Vec<SelectExpr>,
    pub command: Option<Command>,
}

impl Segment {
    pub fn parse(text: &str) -> Result<Self, EditError> {
        let mut rest = text.trim_start();
        let mut selections = Vec::new();

        while let Some(after) = rest.strip_prefix('[') {
            let end = after.find(']').ok_or_else(|| {
                EditError::SelectionSyntax(format!("missing ']' in {:?}", text.trim()))
            })?;
            selections.push(SelectExpr::parse(&after[..end])?);
            rest = after[end + 1..].trim_start();
        }

        let command = if rest.trim().is_empty() {
            None
        } else {
            Some(Command::parse(rest)?)
        };

        Ok(Segment { selections, command })
    }
}

/// Split a script into its segments.
pub fn split_script(script: &str) -> impl Iterator<Item = &str> {
    script.split(';')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_keywords() {
        assert_eq!(SelectExpr::parse("max"), Ok(SelectExpr::Max));
        assert_eq!(SelectExpr::parse("min"), Ok(SelectExpr::Min));
        assert_eq!(SelectExpr::parse("set"), Ok(SelectExpr::Save));
        assert_eq!(SelectExpr::parse("_"), Ok(SelectExpr::Restore));
        assert_eq!(SelectExpr::parse("find a b"), Ok(SelectExpr::Find("a b".into())));
        assert_eq!(SelectExpr::parse("find x,y"), Ok(SelectExpr::Find("x,y".into())));
    }

    #[test]
    fn test_select_point_and_range() {
        assert_eq!(
            SelectExpr::parse("2,_"),
            Ok(SelectExpr::Point(Coord::Literal(2), Coord::Wildcard))
        );
        assert_eq!(
            SelectExpr::parse("1,1,_,3"),
            Ok(SelectExpr::Range(
                Coord::Literal(1),
                Coord::Literal(1),
                Coord::Wildcard,
                Coord::Literal(3)
            ))
        );
    }

    #[test]
    fn test_select_rejects_bad_forms() {
        for body in ["", "foo", "1", "1,2,3", "1,2,3,4,5", "0,1", "a,1", "1,-2", "1.5,1"] {
            assert!(
                matches!(SelectExpr::parse(body), Err(EditError::SelectionSyntax(_))),
                "{:?} should be rejected",
                body
            );
        }
    }

    #[test]
    fn test_command_names() {
        assert_eq!(Command::parse("irow"), Ok(Command::InsertRowBefore));
        assert_eq!(Command::parse("drow"), Ok(Command::DeleteRow));
        assert_eq!(Command::parse("set  hello world "), Ok(Command::Set("hello world".into())));
        assert_eq!(Command::parse("def 3"), Ok(Command::Def(3)));
        assert_eq!(
            Command::parse("sum [4,1]"),
            Ok(Command::Sum(CellRef { row: Coord::Literal(4), col: Coord::Literal(1) }))
        );
        assert!(!Command::parse("clear").unwrap().is_structural());
        assert!(Command::parse("dcol").unwrap().is_structural());
    }

    #[test]
    fn test_command_errors() {
        assert!(matches!(Command::parse("frobnicate"), Err(EditError::CommandSyntax(_))));
        assert!(matches!(Command::parse("irow 2"), Err(EditError::CommandSyntax(_))));
        assert!(matches!(Command::parse("set"), Err(EditError::CommandSyntax(_))));
        assert!(matches!(Command::parse("sum 4,1"), Err(EditError::CommandSyntax(_))));
        assert!(matches!(Command::parse("swap [1,2,3,4]"), Err(EditError::CommandSyntax(_))));
        assert!(matches!(Command::parse("swap [x,1]"), Err(EditError::Conversion(_))));
        assert!(matches!(Command::parse("use 10"), Err(EditError::Conversion(_))));
        assert!(matches!(Command::parse("inc a"), Err(EditError::Conversion(_))));
    }

    #[test]
    fn test_segment_with_selections_and_command() {
        let seg = Segment::parse(" [2,2] [find a] set x").unwrap();
        assert_eq!(seg.selections.len(), 2);
        assert_eq!(seg.selections[1], SelectExpr::Find("a".into()));
        assert_eq!(seg.command, Some(Command::Set("x".into())));
    }

    #[test]
    fn test_segment_only_selection_or_empty() {
        let seg = Segment::parse("[1,1]").unwrap();
        assert_eq!(seg.selections.len(), 1);
        assert!(seg.command.is_none());

        let seg = Segment::parse("   ").unwrap();
        assert!(seg.selections.is_empty());
        assert!(seg.command.is_none());
    }

    #[test]
    fn test_segment_unterminated_bracket() {
        assert!(matches!(Segment::parse("[1,1 set 3"), Err(EditError::SelectionSyntax(_))));
    }

    #[test]
    fn test_split_script() {
        let parts: Vec<_> = split_script("[1,1];set 9;").collect();
        assert_eq!(parts, vec!["[1,1]", "set 9", ""]);
    }
}
