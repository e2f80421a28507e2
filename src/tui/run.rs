//! TUI effects boundary: terminal lifecycle, key mapping, event loop.
//!
//! The only module that touches the real terminal. Discovery, dispatch
//! and rendering are delegated to the pure layers; this file wires them
//! to crossterm and ratatui.
//!
//! Single-threaded: the loop blocks on one terminal event at a time and
//! git calls run synchronously inside dispatch.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::discovery::PathSource;
use crate::model::SelectionModel;
use crate::vcs::VcsGateway;

use super::state::{Action, App, Transition};
use super::update::update;
use super::view::{layout, render, render_empty};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Set once the terminal has been handed back, so the panic hook and the
/// guard's drop do not both leave the alternate screen.
static RESTORED: AtomicBool = AtomicBool::new(true);

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Raw mode swallows SIGINT, so Ctrl+C has to be handled here.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Tab => Some(Action::SwitchTab),
        KeyCode::Enter => Some(Action::Toggle),
        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Owns the terminal in raw mode; restores it when dropped.
struct TerminalGuard {
    terminal: Term,
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen.
    ///
    /// If entering the alternate screen fails, raw mode is undone before
    /// the error is returned.
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        RESTORED.store(false, Ordering::SeqCst);
        let setup = io::stdout()
            .execute(EnterAlternateScreen)
            .and_then(|_| Terminal::new(CrosstermBackend::new(io::stdout())));
        match setup {
            Ok(terminal) => Ok(TerminalGuard { terminal }),
            Err(e) => {
                let _ = restore_terminal();
                Err(e)
            }
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal() {
            log::warn!("failed to restore terminal: {}", e);
        }
    }
}

/// Restore the terminal to normal mode. Later calls are no-ops.
fn restore_terminal() -> io::Result<()> {
    if RESTORED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// DISCOVERY
// ============================================================================

/// Build the initial model. Discovery failures degrade to empty lists.
pub fn discover<P, G>(source: &P, gateway: &G) -> SelectionModel
where
    P: PathSource + ?Sized,
    G: VcsGateway + ?Sized,
{
    let discovered = source.list_files().unwrap_or_else(|e| {
        log::warn!("{}", e);
        Vec::new()
    });
    let flagged = gateway.list_flagged().unwrap_or_else(|e| {
        log::warn!("could not read assume-unchanged list: {}", e);
        Vec::new()
    });
    SelectionModel::from_discovery(discovered, flagged)
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI until the user quits.
///
/// The terminal is restored on every return path, including errors.
pub fn run<P, G>(source: &P, gateway: &mut G) -> io::Result<()>
where
    P: PathSource + ?Sized,
    G: VcsGateway + ?Sized,
{
    install_panic_hook();
    let mut guard = TerminalGuard::enter()?;

    let model = discover(source, &*gateway);
    if model.is_empty() {
        log::info!("nothing to manage, waiting for a key before exiting");
        guard.terminal.draw(render_empty)?;
        wait_for_key()?;
        return Ok(());
    }

    log::info!(
        "starting with {} available, {} assumed unchanged",
        model.available().len(),
        model.flagged().len()
    );
    event_loop(&mut guard.terminal, App::new(model), gateway)
}

fn event_loop<G>(terminal: &mut Term, mut app: App, gateway: &mut G) -> io::Result<()>
where
    G: VcsGateway + ?Sized,
{
    loop {
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        let viewport_height = layout(area).viewport_height();
        app.model.fit_viewport(viewport_height);

        terminal.draw(|frame| render(&app, frame))?;

        if app.should_quit {
            break;
        }

        // Resize and other non-key events only need a redraw.
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if let Some(action) = map_key(key) {
            if update(&mut app, action, gateway, viewport_height) == Transition::Quit {
                break;
            }
        }
    }

    Ok(())
}

/// Block until a key is pressed.
fn wait_for_key() -> io::Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
