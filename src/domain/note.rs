//! Discussion note payload carried by every node of a response tree.

use std::fmt;

/// A single discussion note: the original post or one of its responses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Note {
    /// Who wrote the note
    pub author: String,
    /// One-line subject
    pub subject: String,
    /// Free-form note text, may span lines
    pub body: String,
}

impl Note {
    pub fn new(
        author: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Renders as `subject (author)` followed by the body on the next line.
/// An empty body renders the header line only.
impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.subject, self.author)?;
        if !self.body.is_empty() {
            write!(f, "\n{}", self.body)?;
        }
        Ok(())
    }
}
