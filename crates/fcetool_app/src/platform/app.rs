use std::io::{self, BufRead};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use fcetool_core::{update, AppState, Msg, ServiceConfig, UiState};
use fcetool_engine::EngineError;
use fcetool_logging::{fce_debug, fce_error, fce_info, fce_warn, LogDestination};
use log::LevelFilter;
use thiserror::Error;

use super::config::{self, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::ui::constants::{HELP_LINES, HINT_BUSY, HINT_RESULT_SHOWN};
use super::ui::input::{parse_line, Command};
use super::ui::terminal::TerminalUi;
use super::ui::ExtractorUi;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("could not start input reader: {0}")]
    Input(#[from] io::Error),
}

/// Everything the controller loop reacts to.
#[derive(Debug, PartialEq)]
pub enum AppEvent {
    Engine(Msg),
    Input(String),
    InputClosed,
}

pub fn run_app() -> Result<(), AppError> {
    fcetool_logging::initialize(&LogDestination::default(), LevelFilter::Info);

    let config = config::load_or_default(Path::new(CONFIG_FILENAME));
    fce_info!(
        "Starting with endpoint {} and {} partition images",
        config.extract_endpoint(),
        config.images.len()
    );

    let (app_tx, app_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(&config, app_tx.clone()).map_err(|err| {
        fce_error!("Engine startup failed: {}", err);
        err
    })?;
    spawn_input_reader(app_tx)?;

    let mut controller = Controller::new(&config, TerminalUi::new(io::stdout()), runner);
    controller.start();
    controller.run(&app_rx);

    fce_info!("Shutting down");
    Ok(())
}

fn spawn_input_reader(app_tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("fcetool-input".to_string())
        .spawn(move || forward_lines(io::stdin().lock(), &app_tx))?;
    Ok(())
}

/// Sends one event per input line, then `InputClosed` at end of input.
///
/// Bytes that are not UTF-8 are replaced rather than ending the session.
fn forward_lines<R: BufRead>(mut reader: R, app_tx: &mpsc::Sender<AppEvent>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']).to_string();
                if app_tx.send(AppEvent::Input(line)).is_err() {
                    return;
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                fce_warn!("Stopped reading input: {}", err);
                break;
            }
        }
    }
    let _ = app_tx.send(AppEvent::InputClosed);
}

fn help_lines() -> Vec<String> {
    HELP_LINES.iter().map(|line| line.to_string()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Single owner of the state; every mutation goes through [`Controller::dispatch`].
pub struct Controller<U: ExtractorUi> {
    state: AppState,
    ui: U,
    runner: EffectRunner,
}

impl<U: ExtractorUi> Controller<U> {
    pub fn new(config: &ServiceConfig, ui: U, runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(config),
            ui,
            runner,
        }
    }

    pub fn start(&mut self) {
        self.dispatch(Msg::Started);
        self.ui.notice(&help_lines());
    }

    /// Consumes events until `quit`, or until input has closed and no
    /// extraction is in flight.
    pub fn run(&mut self, events: &mpsc::Receiver<AppEvent>) {
        let mut input_open = true;
        for event in events.iter() {
            match event {
                AppEvent::Engine(msg) => self.dispatch(msg),
                AppEvent::Input(line) => {
                    if self.handle_line(&line) == Flow::Quit {
                        return;
                    }
                }
                AppEvent::InputClosed => {
                    input_open = false;
                    if self.state.is_loading() {
                        fce_info!("Input closed; waiting for the running extraction");
                    }
                }
            }
            if !input_open && !self.state.is_loading() {
                return;
            }
        }
    }

    pub fn dispatch(&mut self, msg: Msg) {
        fce_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        self.runner.run(effects);
        if was_dirty {
            self.ui.render(&view);
        }
    }

    pub fn handle_line(&mut self, line: &str) -> Flow {
        let command = match parse_line(line, self.state.partitions()) {
            Ok(Some(command)) => command,
            Ok(None) => return Flow::Continue,
            Err(err) => {
                self.ui.notice(&[err.to_string()]);
                return Flow::Continue;
            }
        };

        match command {
            Command::Quit => return Flow::Quit,
            Command::Help => self.ui.notice(&help_lines()),
            Command::List => {
                let lines = super::ui::render::render_partitions(&self.state.view());
                self.ui.notice(&lines);
            }
            command => {
                if let Some(hint) = self.ignored_hint(&command) {
                    self.ui.notice(&[hint.to_string()]);
                    return Flow::Continue;
                }
                for msg in command.into_msgs() {
                    self.dispatch(msg);
                }
            }
        }
        Flow::Continue
    }

    /// Why the state machine would drop `command` in the current state, if it would.
    fn ignored_hint(&self, command: &Command) -> Option<&'static str> {
        match self.state.ui() {
            UiState::Loading { .. } => Some(HINT_BUSY),
            UiState::Success { .. } if *command != Command::NewExtraction => {
                Some(HINT_RESULT_SHOWN)
            }
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
