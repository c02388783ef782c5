pub mod app;

pub use app::{
    build_tree_rows, desired_height, draw_dialog, handle_dialog_click, handle_dialog_key,
    hit_test, layout_dialog, load_request_document, parse_request_document, ActionResult,
    CancelAction, DialogAction, DialogController, DialogLayout, DialogPhase, DialogRequest,
    DialogResult, DoneAction, FocusTarget, KeyOutcome, NodeUpdate, RequestDocument,
    RequestError, SelectionState, TreeNode, TreeRow, FOCUS_DELAY,
};
