//! List blocks.

use serde::{Deserialize, Serialize};

/// Whether a list is numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// `1.` / `1)` markers, rendered as `<ol>`
    Ordered,
    /// `-`, `*`, `•` markers, rendered as `<ul>`
    Unordered,
}

impl ListKind {
    /// HTML container element for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

/// A run of list items of the same kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBlock {
    /// List kind
    pub kind: ListKind,

    /// Item texts in source order
    pub items: Vec<String>,
}

impl ListBlock {
    /// Create an empty list of the given kind.
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    /// Append an item.
    pub fn push(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_block() {
        let mut list = ListBlock::new(ListKind::Ordered);
        assert!(list.is_empty());
        list.push("first");
        list.push("second");
        assert_eq!(list.len(), 2);
        assert_eq!(list.kind.tag(), "ol");
        assert_eq!(ListKind::Unordered.tag(), "ul");
    }
}
