use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use engine_logging::{engine_info, engine_warn};
use lookup_core::{update, Msg, SearchState};
use lookup_engine::{EngineHandle, FilePreferenceStore, ReqwestSource};

use super::config::{AppConfig, Cli};
use super::effects::EffectRunner;
use super::input::{parse_line, Command, HELP};
use super::preferences::Theme;
use super::ui;

/// Render tick; engine events are drained at least this often.
const TICK: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(&cli)?;
    engine_logging::initialize(&config.log_destination(), config.level_filter()?);
    engine_info!("Starting lookup against {}", config.base_url);

    let source = ReqwestSource::new(config.fetch_settings()).context("invalid fetch settings")?;
    let engine = EngineHandle::new(Arc::new(source)).context("failed to start engine")?;
    let mut prefs = FilePreferenceStore::open(&config.preferences_path);

    let (line_tx, line_rx) = mpsc::channel::<String>();
    spawn_stdin_reader(line_tx);

    let mut app = App {
        state: SearchState::with_settings(config.pipeline_settings()),
        runner: EffectRunner::new(engine),
        theme: Theme::load(&prefs),
        out: io::stdout(),
    };
    app.print(HELP)?;

    let mut input_closed = false;
    loop {
        if input_closed {
            // Piped input: finish outstanding work, then exit.
            if app.is_idle() {
                break;
            }
            thread::sleep(TICK);
        } else {
            match line_rx.recv_timeout(TICK) {
                Ok(line) => match parse_line(&line) {
                    Command::Dispatch(msg) => app.dispatch(msg),
                    Command::SetTheme(theme) => {
                        theme.store(&mut prefs);
                        app.theme = theme;
                        app.print(&format!("Theme: {theme}"))?;
                    }
                    Command::Help => app.print(HELP)?,
                    Command::Quit => break,
                    Command::Invalid(message) => app.print(&message)?,
                },
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => input_closed = true,
            }
        }

        for msg in app.runner.drain() {
            app.dispatch(msg);
        }
        app.dispatch(Msg::Tick);
        app.render_if_dirty()?;
    }

    engine_info!("Exiting with {} cached queries", app.state.cache().len());
    Ok(())
}

struct App {
    state: SearchState,
    runner: EffectRunner,
    theme: Theme,
    out: io::Stdout,
}

impl App {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    fn is_idle(&self) -> bool {
        !self.state.is_debounce_pending()
            && !self.state.is_retry_pending()
            && !self.state.is_loading()
    }

    fn render_if_dirty(&mut self) -> io::Result<()> {
        if self.state.consume_dirty() {
            let frame = ui::render::render(&self.state.view(), self.theme);
            self.print(&frame)?;
        }
        Ok(())
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        let mut out = self.out.lock();
        writeln!(out, "{text}")?;
        writeln!(out)?;
        out.flush()
    }
}

fn spawn_stdin_reader(line_tx: mpsc::Sender<String>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    engine_warn!("Failed to read stdin: {}", err);
                    break;
                }
            }
        }
    });
}
