//! Keepsake: a local-only memory wall in the terminal.
//!
//! The page controller lives here: startup dispatches to the submission
//! screen or the wall, and the event loop routes input, ticks, and
//! submission outcomes into the application state.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use keepsake_core::validate;
use keepsake_store::{FileSlotStore, MemoryStore, default_slot_path};
use keepsake_tui::app::{App, Dialog, FormField, Page};
use keepsake_tui::event::{AppEvent, SubmissionOutcome};
use keepsake_tui::submit::submit_memory;
use keepsake_tui::ui;
use log::{debug, info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Screen to open on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StartPage {
    Home,
    Submit,
    Wall,
}

impl From<StartPage> for Page {
    fn from(page: StartPage) -> Self {
        match page {
            StartPage::Home => Page::Home,
            StartPage::Submit => Page::Submit,
            StartPage::Wall => Page::Wall,
        }
    }
}

/// Command-line options for the Keepsake TUI.
#[derive(Parser)]
#[command(name = "keepsake", version)]
struct Cli {
    /// Path of the storage slot file
    #[arg(long, env = "KEEPSAKE_STORE")]
    store: Option<PathBuf>,
    /// Screen to open on startup
    #[arg(long, value_enum, default_value_t = StartPage::Home)]
    page: StartPage,
}

/// Entry point for the Keepsake TUI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    let slot_path = cli.store.unwrap_or_else(default_slot_path);
    info!(
        "starting keepsake (page={:?}, slot={})",
        cli.page,
        slot_path.display()
    );
    let store =
        Arc::new(FileSlotStore::new(&slot_path).context("failed to open the storage slot")?);

    let mut app = App::new(cli.page.into(), slot_path.display().to_string());
    // Startup dispatch: only the wall needs data loaded up front.
    if app.page == Page::Wall {
        reload_wall(store.as_ref(), &mut app).await;
    }

    let mut terminal = setup_terminal()?;
    let (tx, mut rx) = mpsc::channel(256);
    spawn_input_handler(tx.clone());
    spawn_tick(tx.clone());

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        let Some(event) = rx.recv().await else { break };
        if handle_app_event(event, &store, &mut app, tx.clone()).await {
            break;
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}

/// Dispatch a UI event and return true when the app should exit.
async fn handle_app_event(
    event: AppEvent,
    store: &Arc<FileSlotStore>,
    app: &mut App,
    sender: mpsc::Sender<AppEvent>,
) -> bool {
    match event {
        AppEvent::Input(key) => handle_input(key, store, app, sender).await,
        AppEvent::Submission(outcome) => {
            apply_submission_outcome(outcome, app);
            false
        }
        AppEvent::Tick => false,
    }
}

/// Fold a submission outcome back into the application state.
fn apply_submission_outcome(outcome: SubmissionOutcome, app: &mut App) {
    app.submitting = false;
    match outcome {
        SubmissionOutcome::Saved(record) => {
            info!("submission saved (id={})", record.id);
            app.form.reset();
            app.dialog = Some(Dialog::Saved);
            app.push_status("memory saved");
        }
        SubmissionOutcome::Failed(message) => {
            warn!("submission failed: {message}");
            // Form contents are kept so the user can fix and retry.
            app.dialog = Some(Dialog::SubmitError(message));
            app.push_status("idle");
        }
    }
}

/// Handle keyboard input and dispatch actions.
async fn handle_input(
    key: KeyEvent,
    store: &Arc<FileSlotStore>,
    app: &mut App,
    sender: mpsc::Sender<AppEvent>,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    // A visible dialog captures all input.
    if let Some(dialog) = app.dialog.clone() {
        handle_dialog_input(key, dialog, store, app).await;
        return false;
    }

    // While a submission is in flight the form accepts nothing; the
    // outcome event re-enables input.
    if app.submitting {
        return false;
    }

    match app.page {
        Page::Home => handle_home_input(key, store, app).await,
        Page::Submit => {
            handle_submit_input(key, store, app, sender);
            false
        }
        Page::Wall => {
            handle_wall_input(key, store, app).await;
            false
        }
    }
}

/// Handle input while a blocking dialog is shown.
async fn handle_dialog_input(
    key: KeyEvent,
    dialog: Dialog,
    store: &Arc<FileSlotStore>,
    app: &mut App,
) {
    match dialog {
        Dialog::ValidationErrors(_) | Dialog::SubmitError(_) => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                app.dialog = None;
            }
        }
        Dialog::Saved => {
            // Success notice first, then the yes/no wall offer.
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                app.dialog = Some(Dialog::ConfirmWall);
            }
        }
        Dialog::ConfirmWall => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.dialog = None;
                app.goto(Page::Wall);
                reload_wall(store.as_ref(), app).await;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.dialog = None;
            }
            _ => {}
        },
    }
}

/// Handle input on the home screen.
async fn handle_home_input(key: KeyEvent, store: &Arc<FileSlotStore>, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('s') => {
            app.goto(Page::Submit);
            false
        }
        KeyCode::Char('w') => {
            app.goto(Page::Wall);
            reload_wall(store.as_ref(), app).await;
            false
        }
        KeyCode::Char('q') | KeyCode::Esc => true,
        _ => false,
    }
}

/// Handle input on the submission form.
fn handle_submit_input(
    key: KeyEvent,
    store: &Arc<FileSlotStore>,
    app: &mut App,
    sender: mpsc::Sender<AppEvent>,
) {
    match key.code {
        KeyCode::Esc => app.goto(Page::Home),
        KeyCode::Up | KeyCode::BackTab => app.form.focus_prev(),
        KeyCode::Down | KeyCode::Tab => app.form.focus_next(),
        KeyCode::Left if app.form.focus == Some(FormField::Year) => app.form.cycle_year(false),
        KeyCode::Right if app.form.focus == Some(FormField::Year) => app.form.cycle_year(true),
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            start_submission(store, app, sender);
        }
        KeyCode::Enter => {
            if app.form.focus.is_some_and(|field| field.is_last()) {
                start_submission(store, app, sender);
            } else {
                app.form.focus_next();
            }
        }
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form.push_char(ch);
        }
        _ => {}
    }
}

/// Handle input on the wall.
async fn handle_wall_input(key: KeyEvent, store: &Arc<FileSlotStore>, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.goto(Page::Home),
        KeyCode::Char('s') => app.goto(Page::Submit),
        KeyCode::Char('r') => reload_wall(store.as_ref(), app).await,
        KeyCode::Up => app.wall.select_prev(),
        KeyCode::Down => app.wall.select_next(),
        KeyCode::Enter => app.wall.toggle_selected(),
        _ => {}
    }
}

/// Validate the form and, if it passes, run the submission asynchronously.
///
/// The flow suspends on the image read: the record is only built once the
/// payload (or its absence) is known, and nothing is appended on failure.
fn start_submission(store: &Arc<FileSlotStore>, app: &mut App, sender: mpsc::Sender<AppEvent>) {
    let form = app.form.to_form();
    let validation = validate(&form);
    if !validation.is_valid {
        debug!("submission blocked ({} errors)", validation.errors.len());
        app.dialog = Some(Dialog::ValidationErrors(validation.errors));
        return;
    }

    app.submitting = true;
    app.push_status("saving");
    let store = store.clone();
    tokio::spawn(async move {
        let outcome = match submit_memory(store.as_ref(), &form).await {
            Ok(record) => SubmissionOutcome::Saved(record),
            Err(err) => SubmissionOutcome::Failed(err.to_string()),
        };
        let _ = sender.send(AppEvent::Submission(outcome)).await;
    });
}

/// Reload the wall working set from the store.
async fn reload_wall(store: &dyn MemoryStore, app: &mut App) {
    match store.load_all().await {
        Ok(records) => {
            debug!("wall reloaded (count={})", records.len());
            app.wall.load(records);
            app.push_status("idle");
        }
        Err(err) => {
            warn!("failed to load the wall: {err}");
            app.wall.load(Vec::new());
            app.push_status("failed to load memories");
        }
    }
}

/// Spawn a task to poll for input events.
fn spawn_input_handler(sender: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = crossterm::event::poll(Duration::from_millis(30)) {
                while let Ok(true) = crossterm::event::poll(Duration::from_millis(0)) {
                    let event = match crossterm::event::read() {
                        Ok(event) => event,
                        Err(_) => break,
                    };
                    if let CrosstermEvent::Key(key) = event {
                        let _ = sender.send(AppEvent::Input(key)).await;
                    }
                }
            }
        }
    });
}

/// Spawn a periodic tick event generator.
fn spawn_tick(sender: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(250));
        loop {
            interval.tick().await;
            let _ = sender.send(AppEvent::Tick).await;
        }
    });
}

/// Configure terminal in raw mode with alternate screen.
fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    debug!("setting up terminal");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal state on exit.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    debug!("restoring terminal");
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
