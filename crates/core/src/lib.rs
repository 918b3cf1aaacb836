// Core types shared by the engine, io and cli crates

pub mod delimiters;
pub mod selection;

pub use delimiters::Delimiters;
pub use selection::{Coord, Selection};
