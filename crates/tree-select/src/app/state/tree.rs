use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One selectable entry of the option forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn leaf(id: impl Into<String>, checked: bool) -> Self {
        Self {
            id: id.into(),
            checked,
            children: None,
        }
    }

    pub fn branch(id: impl Into<String>, checked: bool, children: Vec<TreeNode>) -> Self {
        Self {
            id: id.into(),
            checked,
            children: Some(children),
        }
    }

    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeUpdate {
    pub id: String,
    pub checked: bool,
}

/// Current option forest of one dialog presentation.
///
/// Every mutation swaps in a fresh `Arc`, so a snapshot handed out earlier keeps
/// showing the state it was taken from. Only root nodes are addressable by id.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    options: Arc<Vec<TreeNode>>,
    version: u64,
}

impl SelectionState {
    pub fn new(options: Vec<TreeNode>) -> Self {
        Self {
            options: Arc::new(options),
            version: 0,
        }
    }

    pub fn options(&self) -> &[TreeNode] {
        &self.options
    }

    pub fn snapshot(&self) -> Arc<Vec<TreeNode>> {
        Arc::clone(&self.options)
    }

    /// Bumped on every replacement of the forest; used to decide on redraws.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns `false` when no root node carries `update.id`.
    pub fn update_node(&mut self, update: &NodeUpdate) -> bool {
        let Some(index) = self
            .options
            .iter()
            .position(|option| option.id == update.id)
        else {
            return false;
        };
        let mut next = self.options.as_ref().clone();
        next[index] = TreeNode {
            checked: update.checked,
            ..next[index].clone()
        };
        self.replace(next);
        true
    }

    pub fn set_all(&mut self, checked: bool) {
        let next = self
            .options
            .iter()
            .map(|option| TreeNode {
                checked,
                ..option.clone()
            })
            .collect();
        self.replace(next);
    }

    pub fn checked_root_ids(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|option| option.checked)
            .map(|option| option.id.clone())
            .collect()
    }

    fn replace(&mut self, options: Vec<TreeNode>) {
        self.options = Arc::new(options);
        self.version = self.version.wrapping_add(1);
    }
}
