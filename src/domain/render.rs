//! Human-readable dumps of a response tree.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::{NoteId, ResponseTree};
use crate::domain::error::DomainResult;

/// Labels of the separator line written before each response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderSettings {
    /// Leading marker of the separator line (default: `---`)
    pub marker: String,
    /// Word between marker and response number (default: `RESPONSE`)
    pub label: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            marker: "---".into(),
            label: "RESPONSE".into(),
        }
    }
}

impl<T: fmt::Display> ResponseTree<T> {
    /// Flat dump of `id` and all responses below it.
    ///
    /// Each response is introduced by `--- RESPONSE <number>` where the number
    /// is the dot-joined path of sibling positions: `0`, `1`, then `0.0`,
    /// `0.1` for responses to the first response, and so on.
    pub fn deep_copy_string(&self, id: NoteId) -> DomainResult<String> {
        self.deep_copy_string_with(id, &RenderSettings::default())
    }

    #[instrument(level = "debug", skip(self, settings))]
    pub fn deep_copy_string_with(&self, id: NoteId, settings: &RenderSettings) -> DomainResult<String> {
        let mut out = String::new();
        let mut path = Vec::new();
        self.write_deep_copy(id, &mut path, settings, &mut out)?;
        Ok(out)
    }

    fn write_deep_copy(
        &self,
        id: NoteId,
        path: &mut Vec<usize>,
        settings: &RenderSettings,
        out: &mut String,
    ) -> DomainResult<()> {
        out.push_str(&self.note(id)?.to_string());
        for (position, child) in self.children(id)?.enumerate() {
            path.push(position);
            out.push_str(&format!(
                "\n{} {} {}\n",
                settings.marker,
                settings.label,
                path.iter().join(".")
            ));
            self.write_deep_copy(child, path, settings, out)?;
            path.pop();
        }
        Ok(())
    }
}

pub trait ThreadConvert {
    fn to_tree_string(&self, id: NoteId) -> DomainResult<Tree<String>>;
}

impl<T: fmt::Display> ThreadConvert for ResponseTree<T> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, id: NoteId) -> DomainResult<Tree<String>> {
        let leaves = self
            .children(id)?
            .map(|child| self.to_tree_string(child))
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Tree::new(self.note(id)?.to_string()).with_leaves(leaves))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_dump_is_just_the_note() {
        let tree = ResponseTree::new("lonely");
        assert_eq!(tree.deep_copy_string(tree.root()).unwrap(), "lonely");
    }

    #[test]
    fn custom_labels_replace_separator_words() {
        let mut tree = ResponseTree::new("q");
        let root = tree.root();
        tree.respond(root, "a").unwrap();
        let settings = RenderSettings {
            marker: "==".into(),
            label: "REPLY".into(),
        };
        assert_eq!(tree.deep_copy_string_with(root, &settings).unwrap(), "q\n== REPLY 0\na");
    }

    #[test]
    fn tree_string_nests_responses() {
        let mut tree = ResponseTree::new("root");
        let root = tree.root();
        let a = tree.respond(root, "a").unwrap();
        tree.respond(a, "c").unwrap();
        tree.respond(root, "b").unwrap();

        let rendered = tree.to_tree_string(root).unwrap();
        assert_eq!(rendered.root, "root");
        assert_eq!(rendered.leaves.len(), 2);
        assert_eq!(rendered.leaves[0].root, "a");
        assert_eq!(rendered.leaves[0].leaves[0].root, "c");
        assert_eq!(rendered.leaves[1].root, "b");
    }
}
