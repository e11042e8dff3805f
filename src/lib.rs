//! Threaded discussion notes.
//!
//! A discussion note and every response to it live in a [`ResponseTree`]:
//! an arena of nodes linked left-child/right-sibling, where each note points
//! at its first response and each response at the next response to the same
//! note.
//!
//! ```
//! use rsnote::{Note, ResponseTree};
//!
//! let mut thread = ResponseTree::new(Note::new("ann", "Arenas?", ""));
//! let root = thread.root();
//! let reply = thread.respond(root, Note::new("bob", "Re: Arenas?", "")).unwrap();
//!
//! assert_eq!(thread.child_at(root, 0).unwrap(), reply);
//! assert_eq!(thread.response_count(root).unwrap(), 1);
//! ```

pub mod config;
pub mod domain;
pub mod util;

pub use config::{Settings, SettingsError};
pub use domain::{
    expanded_rows, ChildCursor, DomainError, DomainResult, Note, NoteId, RenderSettings,
    ResponseTree, ThreadConvert, TreeQueryable, NOT_FOUND,
};
