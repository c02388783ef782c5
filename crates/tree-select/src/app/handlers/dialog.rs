use crate::app::{DialogController, DialogResult, FocusTarget};
use crossterm::event::{KeyCode, KeyModifiers};

#[derive(Debug)]
pub enum KeyOutcome {
    Ignored,
    Redraw,
    Closed(DialogResult),
}

fn activate(dialog: &mut DialogController, target: FocusTarget) -> KeyOutcome {
    match target {
        FocusTarget::SelectAll => {
            dialog.select_all();
            KeyOutcome::Redraw
        }
        FocusTarget::SelectNone => {
            dialog.select_none();
            KeyOutcome::Redraw
        }
        FocusTarget::Row(index) => {
            let Some(update) = dialog.rows().get(index).map(|row| row.toggle()) else {
                return KeyOutcome::Ignored;
            };
            if dialog.update_node(update) {
                KeyOutcome::Redraw
            } else {
                KeyOutcome::Ignored
            }
        }
        FocusTarget::Cancel => KeyOutcome::Closed(DialogResult::Cancelled(dialog.on_cancel())),
        FocusTarget::Done => KeyOutcome::Closed(DialogResult::Done(dialog.on_done())),
    }
}

fn redraw_if(changed: bool) -> KeyOutcome {
    if changed {
        KeyOutcome::Redraw
    } else {
        KeyOutcome::Ignored
    }
}

pub fn handle_dialog_key(
    dialog: &mut DialogController,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> KeyOutcome {
    if !dialog.is_visible() {
        return KeyOutcome::Ignored;
    }
    if modifiers.contains(KeyModifiers::CONTROL) || modifiers.contains(KeyModifiers::ALT) {
        return KeyOutcome::Ignored;
    }

    match key {
        KeyCode::Esc => KeyOutcome::Closed(DialogResult::Cancelled(dialog.on_cancel())),
        KeyCode::Up | KeyCode::Char('k') => redraw_if(dialog.move_focus(-1, false)),
        KeyCode::Down | KeyCode::Char('j') => redraw_if(dialog.move_focus(1, false)),
        KeyCode::Tab => redraw_if(dialog.move_focus(1, true)),
        KeyCode::BackTab => redraw_if(dialog.move_focus(-1, true)),
        KeyCode::Home => {
            dialog.set_focus(FocusTarget::SelectAll);
            KeyOutcome::Redraw
        }
        KeyCode::End => {
            dialog.set_focus(FocusTarget::Done);
            KeyOutcome::Redraw
        }
        KeyCode::Char(' ') => match dialog.focus() {
            target @ FocusTarget::Row(_) => activate(dialog, target),
            _ => KeyOutcome::Ignored,
        },
        KeyCode::Char('a') => activate(dialog, FocusTarget::SelectAll),
        KeyCode::Char('n') => activate(dialog, FocusTarget::SelectNone),
        KeyCode::Enter => {
            let target = dialog.focus();
            activate(dialog, target)
        }
        _ => KeyOutcome::Ignored,
    }
}

/// A click anywhere on a control acts like activating it; for tree rows that
/// is the checkbox toggle.
pub fn handle_dialog_click(dialog: &mut DialogController, target: FocusTarget) -> KeyOutcome {
    if !dialog.is_visible() {
        return KeyOutcome::Ignored;
    }
    dialog.set_focus(target);
    match activate(dialog, target) {
        KeyOutcome::Ignored => KeyOutcome::Redraw,
        outcome => outcome,
    }
}
