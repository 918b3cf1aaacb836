/// Why a selection or command could not be applied.
#[derive(Debug, Clone, PartialEq)]
pub enum EditError {
    /// The bracketed expression matches no selection form, or its bounds are invalid.
    SelectionSyntax(String),
    /// Unknown command name or malformed argument.
    CommandSyntax(String),
    /// A `[R,C]` target outside the table (1-based).
    Reference { row: usize, col: usize },
    /// An argument that must be numeric is not.
    Conversion(String),
}

impl EditError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            EditError::SelectionSyntax(_) => "selection_syntax",
            EditError::CommandSyntax(_) => "command_syntax",
            EditError::Reference { .. } => "reference",
            EditError::Conversion(_) => "conversion",
        }
    }
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::SelectionSyntax(msg) => write!(f, "Invalid selection: {}", msg),
            EditError::CommandSyntax(msg) => write!(f, "Invalid command: {}", msg),
            EditError::Reference { row, col } => {
                write!(f, "Reference [{},{}] is outside the table", row, col)
            }
            EditError::Conversion(msg) => write!(f, "Conversion error: {}", msg),
        }
    }
}

impl std::error::Error for EditError {}

/// An `EditError` tagged with the `;`-separated segment that raised it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptError {
    /// Zero-based segment index.
    pub index: usize,
    /// Segment text as written.
    pub segment: String,
    pub error: EditError,
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "command {} ({:?}): {}",
            self.index + 1,
            self.segment.trim(),
            self.error
        )
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
