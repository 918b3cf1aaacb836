use super::cell::Cell;
use super::error::EditError;

/// Number of temporary variable slots.
pub const VAR_SLOTS: usize = 10;

/// Scratch cells addressable by index, living as long as the editor.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    slots: [Cell; VAR_SLOTS],
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a slot index argument (`0..VAR_SLOTS`).
    pub fn parse_index(arg: &str) -> Result<usize, EditError> {
        let arg = arg.trim();
        let index: usize = arg
            .parse()
            .map_err(|_| EditError::Conversion(format!("variable index {:?} is not an integer", arg)))?;
        if index >= VAR_SLOTS {
            return Err(EditError::Conversion(format!(
                "variable index {} is out of range 0..{}",
                index, VAR_SLOTS
            )));
        }
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Result<&Cell, EditError> {
        self.slots.get(index).ok_or_else(|| out_of_range(index))
    }

    pub fn set(&mut self, index: usize, cell: Cell) -> Result<(), EditError> {
        let slot = self.slots.get_mut(index).ok_or_else(|| out_of_range(index))?;
        *slot = cell;
        Ok(())
    }
}

fn out_of_range(index: usize) -> EditError {
    EditError::Conversion(format!("variable index {} is out of range 0..{}", index, VAR_SLOTS))
}
