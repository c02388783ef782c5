pub(crate) mod handlers;
pub(crate) mod runtime;
pub(crate) mod state;
pub(crate) mod util;
pub(crate) mod view;

pub use crate::app::handlers::{handle_dialog_click, handle_dialog_key, KeyOutcome};
pub use crate::app::runtime::{
    load_request_document, parse_request_document, RequestDocument, RequestError,
};
pub use crate::app::state::{
    ActionResult, CancelAction, DialogAction, DialogPhase, DialogRequest, DoneAction,
    FocusTarget, NodeUpdate, SelectionState, TreeNode, DEFAULT_CANCEL_LABEL, DEFAULT_DONE_LABEL,
    DEFAULT_TITLE,
};
pub use crate::app::view::tree::{build_tree_rows, TreeRow};
pub use crate::app::view::ui::{
    desired_height, draw_dialog, hit_test, layout_dialog, DialogLayout,
};

use std::io::Write;
use std::time::{Duration, Instant};

/// How long after `show` the Done button takes focus.
pub const FOCUS_DELAY: Duration = Duration::from_millis(100);

/// How a presentation ended, carrying whatever the caller's action returned.
#[derive(Debug)]
pub enum DialogResult {
    Done(ActionResult),
    Cancelled(ActionResult),
}

impl DialogResult {
    pub fn is_done(&self) -> bool {
        matches!(self, DialogResult::Done(_))
    }

    pub fn into_action_result(self) -> ActionResult {
        match self {
            DialogResult::Done(result) | DialogResult::Cancelled(result) => result,
        }
    }
}

/// Owns the session state of one tree-select dialog. Callers keep the
/// controller and call [`DialogController::show`] on it directly.
pub struct DialogController {
    title: Option<String>,
    message: Option<String>,
    selection: SelectionState,
    on_cancel: Option<CancelAction>,
    on_done: Option<DoneAction>,
    phase: DialogPhase,
    focus: FocusTarget,
    pending_focus: Option<Instant>,
    pub debug_print: bool,
}

impl Default for DialogController {
    fn default() -> Self {
        Self {
            title: None,
            message: None,
            selection: SelectionState::default(),
            on_cancel: None,
            on_done: None,
            phase: DialogPhase::Hidden,
            focus: FocusTarget::SelectAll,
            pending_focus: None,
            debug_print: false,
        }
    }
}

impl DialogController {
    pub fn show(&mut self, request: DialogRequest) {
        self.show_at(request, Instant::now());
    }

    pub fn show_default(&mut self) {
        self.show(DialogRequest::default());
    }

    pub fn show_at(&mut self, request: DialogRequest, now: Instant) {
        let DialogRequest {
            title,
            message,
            options,
            on_cancel,
            on_done,
        } = request;
        self.debug_log(format!("show: {} root option(s)", options.len()));
        self.title = title;
        self.message = message;
        self.selection = SelectionState::new(options);
        self.on_cancel = on_cancel;
        self.on_done = on_done;
        self.phase = DialogPhase::Shown;
        self.focus = FocusTarget::SelectAll;
        self.pending_focus = Some(now + FOCUS_DELAY);
    }

    /// Moves focus to Done once the delay after `show` has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.pending_focus else {
            return false;
        };
        if now < deadline {
            return false;
        }
        self.pending_focus = None;
        self.focus = FocusTarget::Done;
        true
    }

    pub fn on_done(&mut self) -> ActionResult {
        self.hide();
        let ids = self.selection.checked_root_ids();
        self.debug_log(format!("done: {} checked root(s)", ids.len()));
        match self.on_done.take() {
            Some(done) => (done.action)(ids),
            None => Ok(()),
        }
    }

    pub fn on_cancel(&mut self) -> ActionResult {
        self.hide();
        self.debug_log("cancel");
        match self.on_cancel.take() {
            Some(cancel) => (cancel.action)(),
            None => Ok(()),
        }
    }

    /// Binds a bulk update of every root node's `checked` flag.
    pub fn set_all(checked: bool) -> impl Fn(&mut DialogController) {
        move |dialog| dialog.selection.set_all(checked)
    }

    pub fn select_all(&mut self) {
        Self::set_all(true)(self);
    }

    pub fn select_none(&mut self) {
        Self::set_all(false)(self);
    }

    pub fn update_node(&mut self, update: NodeUpdate) -> bool {
        let applied = self.selection.update_node(&update);
        if !applied {
            self.debug_log(format!("update ignored: no root option {:?}", update.id));
        }
        applied
    }

    pub fn rows(&self) -> Vec<TreeRow> {
        build_tree_rows(self.selection.options())
    }

    pub fn options(&self) -> &[TreeNode] {
        self.selection.options()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn title_text(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.is_empty())
            .unwrap_or(DEFAULT_TITLE)
    }

    pub fn cancel_label(&self) -> &str {
        self.on_cancel
            .as_ref()
            .map(|cancel| cancel.label.as_str())
            .unwrap_or(DEFAULT_CANCEL_LABEL)
    }

    pub fn done_label(&self) -> &str {
        self.on_done
            .as_ref()
            .map(|done| done.label.as_str())
            .unwrap_or(DEFAULT_DONE_LABEL)
    }

    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.phase == DialogPhase::Shown
    }

    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    pub fn set_focus(&mut self, target: FocusTarget) {
        let targets = FocusTarget::ordered(self.rows().len());
        if targets.contains(&target) {
            self.focus = target;
        }
    }

    /// Steps focus through the tab order; `wrap` decides whether the ends meet.
    pub fn move_focus(&mut self, delta: isize, wrap: bool) -> bool {
        let targets = FocusTarget::ordered(self.rows().len());
        let current = targets
            .iter()
            .position(|target| *target == self.focus)
            .unwrap_or(0);
        let len = targets.len() as isize;
        let mut next = current as isize + delta;
        if wrap {
            next = next.rem_euclid(len);
        } else {
            next = next.clamp(0, len - 1);
        }
        let next = targets[next as usize];
        if next == self.focus {
            return false;
        }
        self.focus = next;
        true
    }

    fn hide(&mut self) {
        self.phase = DialogPhase::Hidden;
        self.pending_focus = None;
    }

    fn debug_log(&self, message: impl AsRef<str>) {
        if self.debug_print && !cfg!(test) {
            let _ = writeln!(std::io::stderr(), "[tree-select] {}", message.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CancelAction, DialogController, DialogPhase, DialogRequest, DoneAction, FocusTarget,
        NodeUpdate, TreeNode, FOCUS_DELAY,
    };
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    fn abc_options() -> Vec<TreeNode> {
        vec![
            TreeNode::leaf("a", true),
            TreeNode::leaf("b", false),
            TreeNode::leaf("c", true),
        ]
    }

    fn recording_request(
        options: Vec<TreeNode>,
    ) -> (DialogRequest, Rc<RefCell<Option<Vec<String>>>>, Rc<RefCell<u32>>) {
        let done_ids = Rc::new(RefCell::new(None));
        let cancel_calls = Rc::new(RefCell::new(0));
        let done_sink = Rc::clone(&done_ids);
        let cancel_sink = Rc::clone(&cancel_calls);
        let request = DialogRequest {
            title: Some("Export".to_string()),
            message: Some("Pick what to export".to_string()),
            options,
            on_cancel: Some(CancelAction::cancel("Back", move || {
                *cancel_sink.borrow_mut() += 1;
                Ok(())
            })),
            on_done: Some(DoneAction::done("Export", move |ids| {
                *done_sink.borrow_mut() = Some(ids);
                Ok(())
            })),
        };
        (request, done_ids, cancel_calls)
    }

    #[test]
    fn on_done_passes_checked_root_ids_in_order() {
        let (request, done_ids, cancel_calls) = recording_request(abc_options());
        let mut dialog = DialogController::default();
        dialog.show(request);
        assert!(dialog.on_done().is_ok());
        assert_eq!(
            done_ids.borrow().clone(),
            Some(vec!["a".to_string(), "c".to_string()])
        );
        assert_eq!(*cancel_calls.borrow(), 0);
        assert_eq!(dialog.phase(), DialogPhase::Hidden);
    }

    #[test]
    fn on_done_without_callback_still_hides() {
        let mut dialog = DialogController::default();
        dialog.show(DialogRequest {
            options: abc_options(),
            ..DialogRequest::default()
        });
        assert!(dialog.is_visible());
        assert!(dialog.on_done().is_ok());
        assert!(!dialog.is_visible());
    }

    #[test]
    fn on_cancel_runs_cancel_action_regardless_of_selection() {
        let (request, done_ids, cancel_calls) = recording_request(abc_options());
        let mut dialog = DialogController::default();
        dialog.show(request);
        dialog.select_all();
        assert!(dialog.on_cancel().is_ok());
        assert_eq!(*cancel_calls.borrow(), 1);
        assert!(done_ids.borrow().is_none());
        assert!(!dialog.is_visible());
    }

    #[test]
    fn on_cancel_without_callback_is_a_noop_after_hide() {
        let mut dialog = DialogController::default();
        dialog.show_default();
        assert!(dialog.on_cancel().is_ok());
        assert_eq!(dialog.phase(), DialogPhase::Hidden);
    }

    #[test]
    fn action_errors_reach_the_caller() {
        let mut dialog = DialogController::default();
        dialog.show(DialogRequest {
            on_done: Some(DoneAction::done("Save", |_| Err("disk full".into()))),
            ..DialogRequest::default()
        });
        let error = dialog.on_done().expect_err("action error should propagate");
        assert_eq!(error.to_string(), "disk full");
        assert!(!dialog.is_visible());
    }

    #[test]
    fn show_default_resets_previous_state() {
        let (request, _, _) = recording_request(abc_options());
        let mut dialog = DialogController::default();
        dialog.show(request);
        dialog.show_default();
        assert_eq!(dialog.title(), None);
        assert_eq!(dialog.message(), None);
        assert!(dialog.options().is_empty());
        assert_eq!(dialog.title_text(), "Confirm?");
        assert_eq!(dialog.cancel_label(), "Cancel");
        assert_eq!(dialog.done_label(), "Done");
    }

    #[test]
    fn show_stores_labels_and_message() {
        let (request, _, _) = recording_request(abc_options());
        let mut dialog = DialogController::default();
        dialog.show(request);
        assert_eq!(dialog.title_text(), "Export");
        assert_eq!(dialog.message(), Some("Pick what to export"));
        assert_eq!(dialog.cancel_label(), "Back");
        assert_eq!(dialog.done_label(), "Export");
    }

    #[test]
    fn set_all_binds_a_reusable_bulk_update() {
        let mut dialog = DialogController::default();
        dialog.show(DialogRequest {
            options: vec![
                TreeNode::branch("a", false, vec![TreeNode::leaf("a1", false)]),
                TreeNode::leaf("b", false),
            ],
            ..DialogRequest::default()
        });
        let check_all = DialogController::set_all(true);
        check_all(&mut dialog);
        assert!(dialog.options().iter().all(|option| option.checked));
        assert!(!dialog.options()[0].children()[0].checked);
        dialog.select_none();
        assert!(dialog.options().iter().all(|option| !option.checked));
    }

    #[test]
    fn toggling_a_nested_row_leaves_state_unchanged() {
        let mut dialog = DialogController::default();
        dialog.show(DialogRequest {
            options: vec![TreeNode::branch(
                "a",
                false,
                vec![TreeNode::leaf("a1", false)],
            )],
            ..DialogRequest::default()
        });
        let before = dialog.options().to_vec();
        let nested = dialog.rows()[1].toggle();
        assert!(!dialog.update_node(nested));
        assert_eq!(dialog.options(), before.as_slice());
        assert!(dialog.update_node(NodeUpdate {
            id: "a".to_string(),
            checked: true,
        }));
        assert!(dialog.options()[0].checked);
    }

    #[test]
    fn done_focus_waits_for_delay() {
        let mut dialog = DialogController::default();
        let shown_at = Instant::now();
        dialog.show_at(DialogRequest::default(), shown_at);
        assert_eq!(dialog.focus(), FocusTarget::SelectAll);
        assert!(!dialog.tick(shown_at + Duration::from_millis(10)));
        assert_eq!(dialog.focus(), FocusTarget::SelectAll);
        assert!(dialog.tick(shown_at + FOCUS_DELAY));
        assert_eq!(dialog.focus(), FocusTarget::Done);
        assert!(!dialog.tick(shown_at + FOCUS_DELAY * 2));
    }

    #[test]
    fn hiding_before_delay_drops_pending_focus() {
        let mut dialog = DialogController::default();
        let shown_at = Instant::now();
        dialog.show_at(DialogRequest::default(), shown_at);
        dialog.on_cancel().expect("no cancel action");
        assert!(!dialog.tick(shown_at + FOCUS_DELAY));
        assert_eq!(dialog.focus(), FocusTarget::SelectAll);
    }

    #[test]
    fn move_focus_walks_buttons_and_rows() {
        let mut dialog = DialogController::default();
        dialog.show(DialogRequest {
            options: abc_options(),
            ..DialogRequest::default()
        });
        assert!(!dialog.move_focus(-1, false));
        assert!(dialog.move_focus(2, false));
        assert_eq!(dialog.focus(), FocusTarget::Row(0));
        assert!(dialog.move_focus(10, false));
        assert_eq!(dialog.focus(), FocusTarget::Done);
        assert!(dialog.move_focus(1, true));
        assert_eq!(dialog.focus(), FocusTarget::SelectAll);
        assert!(dialog.move_focus(-1, true));
        assert_eq!(dialog.focus(), FocusTarget::Done);
    }
}
