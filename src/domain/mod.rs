//! Domain layer: the response tree and its payload
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arena;
pub mod cursor;
pub mod error;
pub mod note;
pub mod query;
pub mod render;

pub use arena::{Ancestors, Descendants, NoteId, NoteNode, ResponseTree};
pub use cursor::{ChildCursor, Children};
pub use error::{DomainError, DomainResult};
pub use note::Note;
pub use query::{expanded_rows, TreeQueryable, NOT_FOUND};
pub use render::{RenderSettings, ThreadConvert};
