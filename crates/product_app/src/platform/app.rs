use std::io::{self, Stdout};
use std::sync::{mpsc, Arc};
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use product_client::{ProductApi, ReqwestApiClient};
use product_core::{update, AppState, AppViewModel, Msg, Notification};
use product_logging::{client_error, client_info, client_warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::effects::EffectRunner;
use super::settings::{self, AppSettings};
use super::ui::constants::TICK;
use super::ui::input::{map_key, UiAction};
use super::ui::{render, UiState};
use super::logging;

type Backend = CrosstermBackend<Stdout>;

pub fn run_app() -> Result<()> {
    let cwd = std::env::current_dir().context("resolve working directory")?;
    let (settings, settings_error) = match settings::load_settings(&cwd) {
        Ok(found) => (found.unwrap_or_default(), None),
        Err(err) => (AppSettings::default(), Some(err)),
    };

    logging::initialize(settings.log_destination, settings.log_level());
    client_info!("Starting product scraper against {}", settings.base_url);

    let api: Arc<dyn ProductApi> = Arc::new(
        ReqwestApiClient::new(settings.api_config())
            .with_context(|| format!("invalid backend address {:?}", settings.base_url))?,
    );

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let (notify_tx, notify_rx) = mpsc::channel::<Notification>();
    let runner = EffectRunner::new(api, msg_tx.clone(), notify_tx.clone());

    if let Some(err) = settings_error {
        client_warn!("Using default settings: {}", err);
        let _ = notify_tx.send(Notification::error(format!("Settings ignored: {err}")));
    }

    let mut terminal = setup_terminal().context("set up terminal")?;
    let _cleanup = TerminalCleanup;

    let _ = msg_tx.send(Msg::Started);
    let mut app = App::new(runner, msg_rx, notify_rx);
    let result = app.run(&mut terminal);
    if let Err(err) = &result {
        client_error!("UI loop failed: {:#}", err);
    }
    client_info!("Shutting down");
    result
}

fn setup_terminal() -> Result<Terminal<Backend>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

struct TerminalCleanup;

impl Drop for TerminalCleanup {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

struct App {
    state: AppState,
    view: AppViewModel,
    ui: UiState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    notify_rx: mpsc::Receiver<Notification>,
    needs_redraw: bool,
}

impl App {
    fn new(
        runner: EffectRunner,
        msg_rx: mpsc::Receiver<Msg>,
        notify_rx: mpsc::Receiver<Notification>,
    ) -> Self {
        let state = AppState::new();
        let view = state.view();
        Self {
            state,
            view,
            ui: UiState::default(),
            runner,
            msg_rx,
            notify_rx,
            needs_redraw: true,
        }
    }

    fn run(&mut self, terminal: &mut Terminal<Backend>) -> Result<()> {
        loop {
            self.process_pending_messages();
            self.drain_notifications();
            if self.ui.expire_toast(Instant::now()) {
                self.needs_redraw = true;
            }

            if self.needs_redraw {
                terminal.draw(|frame| render::render(frame, &self.view, &self.ui))?;
                self.needs_redraw = false;
            }

            if !event::poll(TICK)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match map_key(key, self.ui.focus, &self.view) {
                        Some(UiAction::Quit) => return Ok(()),
                        Some(UiAction::FocusNext) => {
                            self.ui.focus = self.ui.focus.next();
                            self.needs_redraw = true;
                        }
                        Some(UiAction::FocusPrevious) => {
                            self.ui.focus = self.ui.focus.previous();
                            self.needs_redraw = true;
                        }
                        Some(UiAction::Dispatch(msg)) => self.dispatch_msg(msg),
                        None => {}
                    }
                }
                Event::Resize(_, _) => self.needs_redraw = true,
                _ => {}
            }
        }
    }

    fn process_pending_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
            self.needs_redraw = true;
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn drain_notifications(&mut self) {
        while let Ok(notification) = self.notify_rx.try_recv() {
            self.ui.show(notification);
            self.needs_redraw = true;
        }
    }
}
