mod dialog;
mod tree;

pub use dialog::{
    ActionResult, CancelAction, DialogAction, DialogPhase, DialogRequest, DoneAction,
    FocusTarget, DEFAULT_CANCEL_LABEL, DEFAULT_DONE_LABEL, DEFAULT_TITLE,
};
pub use tree::{NodeUpdate, SelectionState, TreeNode};
