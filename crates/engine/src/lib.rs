pub mod cell;
pub mod command;
pub mod editor;
pub mod error;
pub mod number;
pub mod resolve;
pub mod seq;
pub mod table;
pub mod vars;

pub use cell::Cell;
pub use editor::Editor;
pub use error::{EditError, ScriptError};
pub use table::{Row, Table};
