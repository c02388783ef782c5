use super::tree::TreeNode;
use std::fmt;

pub type ActionResult = Result<(), Box<dyn std::error::Error>>;
pub type DoneCallback = Box<dyn FnOnce(Vec<String>) -> ActionResult>;
pub type CancelCallback = Box<dyn FnOnce() -> ActionResult>;

/// A caller-supplied button: its label and what runs when it is pressed.
pub struct DialogAction<F> {
    pub label: String,
    pub action: F,
}

pub type DoneAction = DialogAction<DoneCallback>;
pub type CancelAction = DialogAction<CancelCallback>;

impl DoneAction {
    pub fn done(
        label: impl Into<String>,
        action: impl FnOnce(Vec<String>) -> ActionResult + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            action: Box::new(action),
        }
    }
}

impl CancelAction {
    pub fn cancel(
        label: impl Into<String>,
        action: impl FnOnce() -> ActionResult + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            action: Box::new(action),
        }
    }
}

impl<F> fmt::Debug for DialogAction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Everything `show` needs for one presentation. `Default` is the empty dialog.
#[derive(Debug, Default)]
pub struct DialogRequest {
    pub title: Option<String>,
    /// Kept with the session state; the layout does not render it.
    pub message: Option<String>,
    pub options: Vec<TreeNode>,
    pub on_cancel: Option<CancelAction>,
    pub on_done: Option<DoneAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogPhase {
    #[default]
    Hidden,
    Shown,
}

/// Interactive controls of the dialog, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    SelectAll,
    SelectNone,
    Row(usize),
    Cancel,
    Done,
}

impl FocusTarget {
    /// All targets for a tree with `row_count` visible rows.
    pub fn ordered(row_count: usize) -> Vec<FocusTarget> {
        let mut targets = Vec::with_capacity(row_count + 4);
        targets.push(FocusTarget::SelectAll);
        targets.push(FocusTarget::SelectNone);
        targets.extend((0..row_count).map(FocusTarget::Row));
        targets.push(FocusTarget::Cancel);
        targets.push(FocusTarget::Done);
        targets
    }
}

pub const DEFAULT_TITLE: &str = "Confirm?";
pub const DEFAULT_CANCEL_LABEL: &str = "Cancel";
pub const DEFAULT_DONE_LABEL: &str = "Done";
