mod constants;

use crate::app::util::text::{display_width, truncate_to_width};
use crate::app::view::dialog::{build_dialog_view, DialogLine, DialogView, SegmentKind};
use crate::app::{DialogController, FocusTarget};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use constants::{
    DIALOG_BG, DIALOG_BORDER, DIALOG_MAX_WIDTH, DIALOG_MIN_WIDTH, DIALOG_PADDING_X, HINT_FG,
    ROW_GUTTER, ROW_MARKER,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlacedSegment {
    pub(crate) area: Rect,
    pub(crate) text: String,
    pub(crate) style: Style,
    pub(crate) target: Option<FocusTarget>,
}

/// Where every piece of the dialog landed on screen for the last frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogLayout {
    pub area: Rect,
    pub(crate) title: String,
    pub(crate) segments: Vec<PlacedSegment>,
    pub(crate) tree_window: (usize, usize),
}

fn chrome_width() -> u16 {
    (DIALOG_BORDER + DIALOG_PADDING_X) * 2
}

fn line_width(line: &DialogLine) -> usize {
    line.iter().map(|segment| display_width(&segment.text)).sum()
}

fn content_width(view: &DialogView) -> usize {
    let tree = view
        .tree
        .iter()
        .map(|line| line_width(line) + ROW_GUTTER.len())
        .max()
        .unwrap_or(0);
    view.header
        .iter()
        .chain(view.footer.iter())
        .map(line_width)
        .chain(std::iter::once(tree))
        .chain(std::iter::once(display_width(&view.title) + 2))
        .max()
        .unwrap_or(0)
}

fn content_height(view: &DialogView) -> usize {
    view.header.len() + view.tree.len() + view.footer.len()
}

/// Rows the dialog wants, capped at the screen height.
pub fn desired_height(dialog: &DialogController, screen_height: u16) -> u16 {
    let view = build_dialog_view(dialog);
    let wanted = content_height(&view).saturating_add((DIALOG_BORDER * 2) as usize);
    u16::try_from(wanted)
        .unwrap_or(u16::MAX)
        .min(screen_height)
        .max(1)
}

fn dialog_rect(screen: Rect, view: &DialogView) -> Rect {
    let wanted_width = u16::try_from(content_width(view))
        .unwrap_or(u16::MAX)
        .saturating_add(chrome_width())
        .clamp(DIALOG_MIN_WIDTH, DIALOG_MAX_WIDTH);
    let width = wanted_width.min(screen.width);
    let wanted_height = u16::try_from(content_height(view))
        .unwrap_or(u16::MAX)
        .saturating_add(DIALOG_BORDER * 2);
    let height = wanted_height.min(screen.height);
    Rect {
        x: screen.x + (screen.width - width) / 2,
        y: screen.y + (screen.height - height) / 2,
        width,
        height,
    }
}

fn inner_rect(area: Rect) -> Rect {
    Rect {
        x: area.x + DIALOG_BORDER + DIALOG_PADDING_X,
        y: area.y + DIALOG_BORDER,
        width: area.width.saturating_sub(chrome_width()),
        height: area.height.saturating_sub(DIALOG_BORDER * 2),
    }
}

/// Keeps the focused line inside a window of `visible` lines.
fn tree_window(total: usize, visible: usize, focused: Option<usize>) -> (usize, usize) {
    if visible == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }
    let focused = focused.unwrap_or(0).min(total - 1);
    let start = focused.saturating_add(1).saturating_sub(visible);
    (start, start + visible)
}

fn segment_style(kind: SegmentKind, focused: bool) -> Style {
    let style = match kind {
        SegmentKind::Hint => Style::default().fg(HINT_FG),
        _ => Style::default(),
    };
    if !focused {
        return style;
    }
    match kind {
        SegmentKind::Button => style.add_modifier(Modifier::BOLD | Modifier::REVERSED),
        _ => style.add_modifier(Modifier::BOLD),
    }
}

fn place_line(
    segments: &mut Vec<PlacedSegment>,
    line: &DialogLine,
    inner: Rect,
    y: u16,
    focus: FocusTarget,
) {
    let mut x = inner.x;
    let right = inner.x + inner.width;
    for segment in line {
        if x >= right {
            break;
        }
        let available = usize::from(right - x);
        let focused = segment.target == Some(focus);
        let (text, width) = if segment.kind == SegmentKind::Row {
            let gutter = if focused { ROW_MARKER } else { ROW_GUTTER };
            let body = truncate_to_width(&segment.text, available.saturating_sub(gutter.len()));
            (format!("{gutter}{body}"), right - x)
        } else {
            let text = truncate_to_width(&segment.text, available);
            let width = u16::try_from(display_width(&text)).unwrap_or(u16::MAX);
            (text, width.min(right - x))
        };
        if width > 0 {
            segments.push(PlacedSegment {
                area: Rect {
                    x,
                    y,
                    width,
                    height: 1,
                },
                text,
                style: segment_style(segment.kind, focused),
                target: segment.target,
            });
        }
        x = x.saturating_add(width);
    }
}

pub(crate) fn layout_view(screen: Rect, view: &DialogView) -> DialogLayout {
    let area = dialog_rect(screen, view);
    let inner = inner_rect(area);
    let mut layout = DialogLayout {
        area,
        title: view.title.clone(),
        segments: Vec::new(),
        tree_window: (0, 0),
    };
    if inner.width == 0 || inner.height == 0 {
        return layout;
    }

    let height = usize::from(inner.height);
    let header_len = view.header.len().min(height);
    let footer_len = view.footer.len().min(height - header_len);
    let tree_visible = height - header_len - footer_len;
    layout.tree_window = tree_window(view.tree.len(), tree_visible, view.focused_tree_line());

    let mut y = inner.y;
    for line in view.header.iter().take(header_len) {
        place_line(&mut layout.segments, line, inner, y, view.focus);
        y += 1;
    }
    let (start, end) = layout.tree_window;
    for line in &view.tree[start..end] {
        place_line(&mut layout.segments, line, inner, y, view.focus);
        y += 1;
    }
    let footer_y = inner.y + inner.height - footer_len as u16;
    for (offset, line) in view.footer.iter().take(footer_len).enumerate() {
        place_line(
            &mut layout.segments,
            line,
            inner,
            footer_y + offset as u16,
            view.focus,
        );
    }
    layout
}

pub fn layout_dialog(screen: Rect, dialog: &DialogController) -> DialogLayout {
    layout_view(screen, &build_dialog_view(dialog))
}

pub fn draw_dialog(f: &mut Frame, dialog: &DialogController) -> DialogLayout {
    if !dialog.is_visible() {
        return DialogLayout::default();
    }
    let layout = layout_dialog(f.area(), dialog);
    if layout.area.width == 0 || layout.area.height == 0 {
        return layout;
    }

    f.render_widget(Clear, layout.area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", layout.title),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(DIALOG_BG));
    f.render_widget(block, layout.area);

    for segment in &layout.segments {
        let line = Line::from(Span::styled(segment.text.clone(), segment.style));
        f.render_widget(Paragraph::new(line), segment.area);
    }
    layout
}

/// The control under a mouse position, if any.
pub fn hit_test(layout: &DialogLayout, column: u16, row: u16) -> Option<FocusTarget> {
    layout.segments.iter().find_map(|segment| {
        let area = segment.area;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        if inside {
            segment.target
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{desired_height, draw_dialog, hit_test, layout_dialog, tree_window};
    use crate::app::{DialogController, DialogRequest, FocusTarget, TreeNode};
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::Terminal;

    fn sample_dialog(root_count: usize) -> DialogController {
        let mut options = vec![TreeNode::branch(
            "workspace",
            true,
            vec![TreeNode::leaf("get-users", false)],
        )];
        options.extend((1..root_count).map(|index| TreeNode::leaf(format!("env-{index}"), false)));
        let mut dialog = DialogController::default();
        dialog.show(DialogRequest {
            title: Some("Export data".to_string()),
            options,
            ..DialogRequest::default()
        });
        dialog
    }

    fn screen_lines(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn tree_window_follows_focus() {
        assert_eq!(tree_window(3, 5, None), (0, 3));
        assert_eq!(tree_window(10, 4, Some(1)), (0, 4));
        assert_eq!(tree_window(10, 4, Some(6)), (3, 7));
        assert_eq!(tree_window(10, 4, Some(42)), (6, 10));
        assert_eq!(tree_window(10, 0, Some(3)), (0, 0));
    }

    #[test]
    fn draw_renders_title_tree_and_buttons() {
        let dialog = sample_dialog(2);
        let mut terminal = Terminal::new(TestBackend::new(60, 14)).expect("test terminal");
        terminal
            .draw(|f| {
                draw_dialog(f, &dialog);
            })
            .expect("draw");
        let screen = screen_lines(&terminal).join("\n");
        assert!(screen.contains("Export data"));
        assert!(screen.contains("[ Select All ]  [ Select None ]"));
        assert!(screen.contains("[x] workspace"));
        assert!(screen.contains("    [ ] get-users"));
        assert!(screen.contains("[ ] env-1"));
        assert!(screen.contains("[ Cancel ]  [ Done ]"));
    }

    #[test]
    fn hidden_dialog_draws_nothing() {
        let mut dialog = sample_dialog(1);
        dialog.on_cancel().expect("no cancel action");
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).expect("test terminal");
        let mut layout = None;
        terminal
            .draw(|f| {
                layout = Some(draw_dialog(f, &dialog));
            })
            .expect("draw");
        assert!(screen_lines(&terminal)
            .iter()
            .all(|line| line.trim().is_empty()));
        assert_eq!(layout.map(|layout| layout.segments.len()), Some(0));
    }

    #[test]
    fn hit_test_maps_clicks_to_rows_and_buttons() {
        let dialog = sample_dialog(2);
        let layout = layout_dialog(Rect::new(0, 0, 60, 14), &dialog);
        let row = layout
            .segments
            .iter()
            .find(|segment| segment.target == Some(FocusTarget::Row(1)))
            .expect("nested row placed");
        let right_edge = row.area.x + row.area.width - 1;
        assert_eq!(
            hit_test(&layout, right_edge, row.area.y),
            Some(FocusTarget::Row(1))
        );
        let done = layout
            .segments
            .iter()
            .find(|segment| segment.target == Some(FocusTarget::Done))
            .expect("done button placed");
        assert_eq!(
            hit_test(&layout, done.area.x, done.area.y),
            Some(FocusTarget::Done)
        );
        assert_eq!(hit_test(&layout, 0, 0), None);
    }

    #[test]
    fn small_screen_scrolls_tree_to_focused_row() {
        let mut dialog = sample_dialog(20);
        dialog.set_focus(FocusTarget::Row(15));
        let layout = layout_dialog(Rect::new(0, 0, 40, 12), &dialog);
        let (start, end) = layout.tree_window;
        assert!(start <= 15 && 15 < end);
        assert!(layout
            .segments
            .iter()
            .any(|segment| segment.target == Some(FocusTarget::Cancel)));
        assert!(layout
            .segments
            .iter()
            .any(|segment| segment.text.starts_with("> ")));
    }

    #[test]
    fn desired_height_is_capped_by_screen() {
        let dialog = sample_dialog(2);
        assert_eq!(desired_height(&dialog, 40), 2 + 2 + 3 + 3);
        assert_eq!(desired_height(&dialog, 6), 6);
    }
}
