use crate::app::state::{NodeUpdate, TreeNode};

const INDENT: &str = "  ";

/// A flattened tree entry. Rows come out in display order: a parent, then its
/// children one level deeper, then the parent's next sibling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: usize,
    pub id: String,
    pub checked: bool,
}

impl TreeRow {
    /// The update a click on this row asks for. Wired the same way at every
    /// depth; whether it lands is up to the selection state.
    pub fn toggle(&self) -> NodeUpdate {
        NodeUpdate {
            id: self.id.clone(),
            checked: !self.checked,
        }
    }

    pub fn text(&self) -> String {
        let check = if self.checked { "[x]" } else { "[ ]" };
        format!("{}{check} {}", INDENT.repeat(self.depth), self.id)
    }
}

pub fn build_tree_rows(options: &[TreeNode]) -> Vec<TreeRow> {
    let mut rows = Vec::with_capacity(options.len());
    push_rows(&mut rows, options, 0);
    rows
}

fn push_rows(rows: &mut Vec<TreeRow>, nodes: &[TreeNode], depth: usize) {
    for node in nodes {
        rows.push(TreeRow {
            depth,
            id: node.id.clone(),
            checked: node.checked,
        });
        if let Some(children) = node.children.as_deref() {
            push_rows(rows, children, depth + 1);
        }
    }
}
