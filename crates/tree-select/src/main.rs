use crossterm::cursor::Show;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::{Terminal, TerminalOptions, Viewport};
use std::env;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};
use tree_select::{
    desired_height, draw_dialog, handle_dialog_click, handle_dialog_key, hit_test,
    load_request_document, DialogController, DialogLayout, DialogResult, KeyOutcome,
    RequestDocument, RequestError, TreeNode,
};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn env_truthy(key: &str) -> bool {
    std::env::var(key)
        .ok()
        .as_deref()
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

#[derive(Clone, Copy, Debug)]
struct KeyDebugLog {
    code: KeyCode,
    modifiers: KeyModifiers,
    kind: KeyEventKind,
}

impl KeyDebugLog {
    fn from_event(event: &crossterm::event::KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
            kind: event.kind,
        }
    }
}

impl fmt::Display for KeyDebugLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "code={:?} mods={:?} kind={:?}",
            self.code, self.modifiers, self.kind
        )
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct CliOptions {
    request_path: Option<PathBuf>,
    title: Option<String>,
    demo: bool,
}

fn parse_cli_options_from_args(args: impl IntoIterator<Item = impl AsRef<str>>) -> CliOptions {
    let mut args = args
        .into_iter()
        .map(|arg| arg.as_ref().to_string())
        .peekable();
    let mut options = CliOptions::default();
    while let Some(arg) = args.next() {
        if let Some(value) = arg.strip_prefix("--request=") {
            options.request_path = (!value.is_empty()).then(|| PathBuf::from(value));
            continue;
        }
        if let Some(value) = arg.strip_prefix("--title=") {
            options.title = Some(value.to_string());
            continue;
        }
        match arg.as_str() {
            "--demo" => options.demo = true,
            "-r" | "--request" | "-t" | "--title" => {
                let Some(value) = args.next_if(|next| !next.starts_with('-')) else {
                    continue;
                };
                if arg.ends_with("title") || arg == "-t" {
                    options.title = Some(value);
                } else {
                    options.request_path = Some(PathBuf::from(value));
                }
            }
            _ => {}
        }
    }
    options
}

fn demo_document() -> RequestDocument {
    RequestDocument {
        title: Some("Export data".to_string()),
        message: None,
        options: vec![
            TreeNode::branch(
                "Workspace: Billing API",
                true,
                vec![
                    TreeNode::leaf("GET /invoices", true),
                    TreeNode::leaf("POST /invoices", false),
                ],
            ),
            TreeNode::branch(
                "Workspace: Auth",
                false,
                vec![TreeNode::branch(
                    "Folder: OAuth",
                    false,
                    vec![TreeNode::leaf("POST /token", false)],
                )],
            ),
            TreeNode::leaf("Environments", false),
            TreeNode::leaf("Cookie jars", true),
        ],
        done_label: Some("Export".to_string()),
        cancel_label: None,
    }
}

fn load_document(options: &CliOptions) -> Result<RequestDocument, RequestError> {
    let mut document = if options.demo {
        demo_document()
    } else {
        let path = options
            .request_path
            .as_deref()
            .ok_or(RequestError::MissingPath)?;
        load_request_document(path)?
    };
    if let Some(title) = options.title.clone() {
        document.title = Some(title);
    }
    Ok(document)
}

struct TerminalRestoreGuard {
    use_alt_screen: bool,
}

impl TerminalRestoreGuard {
    fn new(use_alt_screen: bool) -> Self {
        Self { use_alt_screen }
    }
}

impl Drop for TerminalRestoreGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = std::io::stdout();
        if self.use_alt_screen {
            let _ = stdout.execute(DisableMouseCapture);
            let _ = stdout.execute(LeaveAlternateScreen);
        }
        let _ = stdout.execute(Show);
    }
}

fn handle_mouse(
    dialog: &mut DialogController,
    layout: &DialogLayout,
    kind: MouseEventKind,
    column: u16,
    row: u16,
) -> KeyOutcome {
    if kind != MouseEventKind::Down(MouseButton::Left) {
        return KeyOutcome::Ignored;
    }
    match hit_test(layout, column, row) {
        Some(target) => handle_dialog_click(dialog, target),
        None => KeyOutcome::Ignored,
    }
}

fn run_dialog(
    dialog: &mut DialogController,
    use_alt_screen: bool,
    key_debug: bool,
) -> Result<Option<DialogResult>, Box<dyn std::error::Error>> {
    let mut stdout = std::io::stdout();
    let _restore_guard = TerminalRestoreGuard::new(use_alt_screen);
    if use_alt_screen {
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
    }
    enable_raw_mode()?;

    let viewport = if use_alt_screen {
        Viewport::Fullscreen
    } else {
        let (_, screen_height) = crossterm::terminal::size()?;
        Viewport::Inline(desired_height(dialog, screen_height))
    };
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::with_options(backend, TerminalOptions { viewport })?;

    let mut layout = DialogLayout::default();
    let mut needs_redraw = true;
    let mut result = None;

    while dialog.is_visible() {
        if needs_redraw {
            terminal.draw(|f| layout = draw_dialog(f, dialog))?;
            needs_redraw = false;
        }

        if event::poll(POLL_INTERVAL)? {
            let outcome = match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if key_debug {
                        eprintln!("key: {}", KeyDebugLog::from_event(&key));
                    }
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        KeyOutcome::Closed(DialogResult::Cancelled(dialog.on_cancel()))
                    } else {
                        handle_dialog_key(dialog, key.code, key.modifiers)
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse(dialog, &layout, mouse.kind, mouse.column, mouse.row)
                }
                Event::Resize(_, _) => {
                    terminal.autoresize()?;
                    KeyOutcome::Redraw
                }
                _ => KeyOutcome::Ignored,
            };
            match outcome {
                KeyOutcome::Ignored => {}
                KeyOutcome::Redraw => needs_redraw = true,
                KeyOutcome::Closed(closed) => result = Some(closed),
            }
        }

        if dialog.tick(Instant::now()) {
            needs_redraw = true;
        }
    }

    terminal.clear()?;
    terminal.show_cursor()?;
    Ok(result)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_cli_options_from_args(env::args().skip(1));
    let document = load_document(&cli)?;
    let use_alt_screen = env_truthy("TREE_SELECT_ALT_SCREEN");
    let key_debug = env_truthy("TREE_SELECT_KEY_DEBUG");

    let (tx, rx) = mpsc::channel::<Vec<String>>();
    let request = document.into_request(
        move |ids| {
            tx.send(ids)?;
            Ok(())
        },
        || Ok(()),
    );

    let mut dialog = DialogController::default();
    dialog.debug_print = env_truthy("TREE_SELECT_DEBUG");
    dialog.show(request);

    let result = run_dialog(&mut dialog, use_alt_screen, key_debug)?;
    if let Some(result) = result {
        result.into_action_result()?;
    }

    match rx.try_recv() {
        Ok(ids) => {
            let mut stdout = std::io::stdout();
            writeln!(stdout, "{}", serde_json::to_string(&ids)?)?;
            Ok(())
        }
        Err(_) => std::process::exit(1),
    }
}
