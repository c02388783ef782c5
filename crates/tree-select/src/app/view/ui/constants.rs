use ratatui::style::Color;

pub(super) const DIALOG_MAX_WIDTH: u16 = 72;
pub(super) const DIALOG_MIN_WIDTH: u16 = 24;
pub(super) const DIALOG_BORDER: u16 = 1;
pub(super) const DIALOG_PADDING_X: u16 = 1;
pub(super) const DIALOG_BG: Color = Color::Rgb(40, 40, 40);
pub(super) const HINT_FG: Color = Color::DarkGray;
pub(super) const ROW_MARKER: &str = "> ";
pub(super) const ROW_GUTTER: &str = "  ";
