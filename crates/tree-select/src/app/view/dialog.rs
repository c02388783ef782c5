use crate::app::{DialogController, FocusTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SegmentKind {
    Text,
    Hint,
    Button,
    Row,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DialogSegment {
    pub(crate) text: String,
    pub(crate) kind: SegmentKind,
    pub(crate) target: Option<FocusTarget>,
}

impl DialogSegment {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SegmentKind::Text,
            target: None,
        }
    }

    fn hint(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SegmentKind::Hint,
            target: None,
        }
    }

    fn button(label: &str, target: FocusTarget) -> Self {
        Self {
            text: format!("[ {label} ]"),
            kind: SegmentKind::Button,
            target: Some(target),
        }
    }
}

pub(crate) type DialogLine = Vec<DialogSegment>;

/// Text model of the dialog: a fixed header, a scrollable tree, a fixed footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DialogView {
    pub(crate) title: String,
    pub(crate) header: Vec<DialogLine>,
    pub(crate) tree: Vec<DialogLine>,
    pub(crate) footer: Vec<DialogLine>,
    pub(crate) focus: FocusTarget,
}

impl DialogView {
    /// Index of the focused tree line, if focus is inside the tree.
    pub(crate) fn focused_tree_line(&self) -> Option<usize> {
        match self.focus {
            FocusTarget::Row(index) if index < self.tree.len() => Some(index),
            _ => None,
        }
    }
}

pub(crate) fn build_dialog_view(dialog: &DialogController) -> DialogView {
    let header = vec![
        vec![
            DialogSegment::button("Select All", FocusTarget::SelectAll),
            DialogSegment::text("  "),
            DialogSegment::button("Select None", FocusTarget::SelectNone),
        ],
        Vec::new(),
    ];

    let rows = dialog.rows();
    let tree = if rows.is_empty() {
        vec![vec![DialogSegment::hint("(no options)")]]
    } else {
        rows.iter()
            .enumerate()
            .map(|(index, row)| {
                vec![DialogSegment {
                    text: row.text(),
                    kind: SegmentKind::Row,
                    target: Some(FocusTarget::Row(index)),
                }]
            })
            .collect()
    };

    let footer = vec![
        Vec::new(),
        vec![
            DialogSegment::button(dialog.cancel_label(), FocusTarget::Cancel),
            DialogSegment::text("  "),
            DialogSegment::button(dialog.done_label(), FocusTarget::Done),
        ],
        vec![DialogSegment::hint(
            "Space toggle · a all · n none · Enter activate · Esc cancel",
        )],
    ];

    DialogView {
        title: dialog.title_text().to_string(),
        header,
        tree,
        footer,
        focus: dialog.focus(),
    }
}

#[cfg(test)]
mod tests {
    use super::{build_dialog_view, SegmentKind};
    use crate::app::{CancelAction, DialogController, DialogRequest, FocusTarget, TreeNode};

    fn line_text(line: &[super::DialogSegment]) -> String {
        line.iter().map(|segment| segment.text.as_str()).collect()
    }

    #[test]
    fn default_dialog_uses_fallback_labels() {
        let mut dialog = DialogController::default();
        dialog.show_default();
        let view = build_dialog_view(&dialog);
        assert_eq!(view.title, "Confirm?");
        assert_eq!(line_text(&view.header[0]), "[ Select All ]  [ Select None ]");
        assert_eq!(line_text(&view.footer[1]), "[ Cancel ]  [ Done ]");
        assert_eq!(view.tree.len(), 1);
        assert_eq!(view.tree[0][0].kind, SegmentKind::Hint);
    }

    #[test]
    fn tree_lines_follow_rows_and_custom_labels() {
        let mut dialog = DialogController::default();
        dialog.show(DialogRequest {
            title: Some(String::new()),
            options: vec![TreeNode::branch(
                "workspace",
                true,
                vec![TreeNode::leaf("request", false)],
            )],
            on_cancel: Some(CancelAction::cancel("Skip", || Ok(()))),
            ..DialogRequest::default()
        });
        dialog.set_focus(FocusTarget::Row(1));
        let view = build_dialog_view(&dialog);
        assert_eq!(view.title, "Confirm?");
        assert_eq!(line_text(&view.tree[0]), "[x] workspace");
        assert_eq!(line_text(&view.tree[1]), "  [ ] request");
        assert_eq!(view.tree[1][0].target, Some(FocusTarget::Row(1)));
        assert_eq!(view.focused_tree_line(), Some(1));
        assert_eq!(line_text(&view.footer[1]), "[ Skip ]  [ Done ]");
    }
}
