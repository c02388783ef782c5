mod dialog;

pub use dialog::{handle_dialog_click, handle_dialog_key, KeyOutcome};
