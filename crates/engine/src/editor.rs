//! Command executor.
//!
//! `Editor` owns the table, the active and saved selections, and the temporary
//! variables, and applies scripts to them segment by segment.

use sps_core::{Delimiters, Selection};

use super::cell::Cell;
use super::command::{split_script, CellRef, Command, Segment};
use super::error::{EditError, ScriptError};
use super::number::format_general;
use super::resolve::{self, cover};
use super::table::Table;
use super::vars::Variables;

#[derive(Debug)]
pub struct Editor {
    table: Table,
    delimiters: Delimiters,
    selection: Selection,
    saved: Selection,
    vars: Variables,
}

impl Editor {
    pub fn new(table: Table, delimiters: Delimiters) -> Self {
        Self {
            table,
            delimiters,
            selection: Selection::default(),
            saved: Selection::default(),
            vars: Variables::new(),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn variables(&self) -> &Variables {
        &self.vars
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Run a `;`-separated script. Stops at the first failing segment.
    pub fn run(&mut self, script: &str) -> Result<(), ScriptError> {
        for (index, segment) in split_script(script).enumerate() {
            log::debug!("segment {}: {:?}", index + 1, segment.trim());
            self.run_segment(segment).map_err(|error| ScriptError {
                index,
                segment: segment.to_string(),
                error,
            })?;
        }
        Ok(())
    }

    /// Parse and apply one segment: its selections in order, then its command.
    pub fn run_segment(&mut self, text: &str) -> Result<(), EditError> {
        let segment = Segment::parse(text)?;
        for expr in &segment.selections {
            self.selection = resolve::resolve(expr, &mut self.table, self.selection, &mut self.saved)?;
            log::debug!("selection is now {}", self.selection);
        }
        if let Some(command) = &segment.command {
            self.execute(command)?;
        }
        Ok(())
    }

    /// Apply a single command over the active selection.
    pub fn execute(&mut self, command: &Command) -> Result<(), EditError> {
        match command {
            Command::InsertRowBefore => self.insert_rows(0),
            Command::InsertRowAfter => self.insert_rows(1),
            Command::DeleteRow => self.delete_rows(),
            Command::InsertColBefore => self.insert_cells(0),
            Command::InsertColAfter => self.insert_cells(1),
            Command::DeleteCol => self.delete_cells(),
            Command::Clear => {
                for (r, c) in self.selection.cells() {
                    if let Some(cell) = self.table.cell_mut(r, c) {
                        cell.clear();
                    }
                }
            }
            Command::Set(text) => self.fill_selection(text),
            Command::Swap(target) => self.swap(*target)?,
            Command::Sum(target) => {
                let (total, _) = self.accumulate();
                self.write_target(*target, &format_general(total))?;
            }
            Command::Avg(target) => {
                let (total, count) = self.accumulate();
                let avg = if count == 0 { 0.0 } else { total / count as f64 };
                self.write_target(*target, &format_general(avg))?;
            }
            Command::Count(target) => {
                let count = self
                    .selection
                    .cells()
                    .filter(|&(r, c)| self.table.cell(r, c).is_some_and(|cell| !cell.is_empty()))
                    .count();
                self.write_target(*target, &count.to_string())?;
            }
            Command::Len(target) => {
                let mut len = 0;
                for (r, c) in self.selection.cells() {
                    if let Some(cell) = self.table.cell(r, c) {
                        len = cell.char_len();
                    }
                }
                self.write_target(*target, &len.to_string())?;
            }
            Command::Def(n) => {
                let (r, c) = self.selection.end_corner();
                let cell = self
                    .table
                    .cell(r, c)
                    .cloned()
                    .ok_or(EditError::Reference { row: r + 1, col: c + 1 })?;
                self.vars.set(*n, cell)?;
            }
            Command::Use(n) => {
                let text = self.vars.get(*n)?.text().to_string();
                self.fill_selection(&text);
            }
            Command::Inc(n) => {
                let value = self.vars.get(*n)?.as_number().unwrap_or(0.0) + 1.0;
                let cell = Cell::from_text(&format_general(value), &self.delimiters);
                self.vars.set(*n, cell)?;
            }
        }

        if command.is_structural() {
            self.table.fill_rectangular();
        }
        Ok(())
    }

    // =========================================================================
    // Structural commands
    // =========================================================================

    /// Insert one empty row per selected row, before (`offset` 0) or after (`offset` 1) it.
    fn insert_rows(&mut self, offset: usize) {
        let mut inserted = 0;
        for row in self.selection.rows() {
            let at = row + inserted;
            if at >= self.table.row_count() {
                break;
            }
            self.table.insert_row(at + offset);
            inserted += 1;
        }
    }

    fn delete_rows(&mut self) {
        let mut deleted = 0;
        for row in self.selection.rows() {
            if self.table.delete_row(row - deleted).is_none() {
                break;
            }
            deleted += 1;
        }
    }

    /// Insert one empty cell per selected cell, before (`offset` 0) or after (`offset` 1) it.
    fn insert_cells(&mut self, offset: usize) {
        for row in self.selection.rows() {
            let mut inserted = 0;
            for col in self.selection.cols() {
                let at = col + inserted;
                if at >= self.table.row_len(row) {
                    break;
                }
                self.table.insert_cell(row, at + offset);
                inserted += 1;
            }
        }
    }

    fn delete_cells(&mut self) {
        for row in self.selection.rows() {
            let mut deleted = 0;
            for col in self.selection.cols() {
                if self.table.delete_cell(row, col - deleted).is_none() {
                    break;
                }
                deleted += 1;
            }
        }
    }

    // =========================================================================
    // Data commands
    // =========================================================================

    fn fill_selection(&mut self, text: &str) {
        for (r, c) in self.selection.cells() {
            if let Some(cell) = self.table.cell_mut(r, c) {
                cell.set(text, &self.delimiters);
            }
        }
    }

    fn swap(&mut self, target: CellRef) -> Result<(), EditError> {
        let (tr, tc) = self.locate(target)?;
        if self.table.cell(tr, tc).is_none() {
            return Err(EditError::Reference { row: tr + 1, col: tc + 1 });
        }
        for (r, c) in self.selection.cells() {
            if self.table.cell(r, c).is_some() {
                self.table.swap_cell(r, c, tr, tc)?;
            }
        }
        Ok(())
    }

    /// Sum and count of the numeric cells in the selection.
    fn accumulate(&self) -> (f64, usize) {
        self.selection
            .cells()
            .filter_map(|(r, c)| self.table.cell(r, c).and_then(Cell::as_number))
            .fold((0.0, 0), |(total, count), n| (total + n, count + 1))
    }

    /// Write an aggregate result into its target, growing the table if needed.
    fn write_target(&mut self, target: CellRef, text: &str) -> Result<(), EditError> {
        let (r, c) = self.locate(target)?;
        if let Some(single) = Selection::single(r + 1, c + 1) {
            cover(&mut self.table, &single);
        }
        let cell = self
            .table
            .cell_mut(r, c)
            .ok_or(EditError::Reference { row: r + 1, col: c + 1 })?;
        cell.set(text, &self.delimiters);
        Ok(())
    }

    /// Zero-based position of a `[R,C]` argument. `_` resolves against the current extent.
    fn locate(&self, target: CellRef) -> Result<(usize, usize), EditError> {
        let row = target.row.resolve(self.table.row_count());
        let col = target.col.resolve(self.table.max_row_length());
        if row == 0 || col == 0 {
            return Err(EditError::Reference { row, col });
        }
        Ok((row - 1, col - 1))
    }
}
