pub mod app;
pub mod event;
pub mod ui;

use crate::core::error::BankbotError;
use crate::core::session::ChatSession;
use crate::providers::ChatProvider;
use app::{DashboardAction, DashboardApp, Status};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use event::{AppEvent, EventHandler};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stderr};
use std::sync::Arc;

pub type Tui = Terminal<CrosstermBackend<Stderr>>;

fn init() -> Result<Tui, BankbotError> {
    enable_raw_mode()?;
    execute!(io::stderr(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(io::stderr());
    Ok(Terminal::new(backend)?)
}

fn restore() -> Result<(), BankbotError> {
    execute!(io::stderr(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Restore the terminal before the default panic output runs.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}

/// Run the dashboard front end until the user quits.
pub async fn run(provider: Arc<dyn ChatProvider>) -> Result<(), BankbotError> {
    install_panic_hook();
    let mut terminal = init()?;

    let app = DashboardApp::new(ChatSession::new(provider));
    let result = main_loop(&mut terminal, app).await;

    restore()?;
    result
}

async fn main_loop(terminal: &mut Tui, mut app: DashboardApp) -> Result<(), BankbotError> {
    let mut events = EventHandler::new();

    loop {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        let Some(event) = events.next().await else {
            break;
        };

        match event {
            AppEvent::Key(key) => match app.handle_key(key) {
                Some(DashboardAction::Quit) => break,
                Some(DashboardAction::Clear) => {
                    app.session.clear();
                    app.last_error = None;
                    app.stick_to_bottom = true;
                }
                Some(DashboardAction::Submit(message)) => {
                    app.status = Status::Thinking;
                    app.last_error = None;
                    // Show the spinner frame before the blocking call; the
                    // send holds the loop until the service answers.
                    terminal.draw(|frame| ui::render(&mut app, frame))?;

                    if let Err(err) = app.session.send(&message).await {
                        log::error!("completion failed: {}", err);
                        app.last_error = Some(err.to_string());
                    }

                    app.status = Status::Idle;
                    app.stick_to_bottom = true;
                }
                None => {}
            },
            AppEvent::Tick => app.tick(),
            AppEvent::Resize(_, _) => {}
        }
    }

    Ok(())
}
