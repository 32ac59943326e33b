//! The installer as a [`Model`]: routes input and step completions to the
//! engine and turns the engine's effects into runtime commands.

use std::sync::Arc;

use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::Frame;
use ticman_core::{terminal_events, Command, Component, Model, Subscription, TerminalEvent};
use ticman_widgets::spinner::{self, Spinner};
use ticman_widgets::viewport::{self, Viewport, ViewportStyle};

use crate::engine::{Effect, Engine};
use crate::keys::KeyMap;
use crate::plan::StepPlanner;
use crate::runner::{execute_step, StepReport, StepRunner};
use crate::theme::Theme;
use crate::view::{self, Branding, Screen};

/// Startup data for [`App`].
pub struct AppFlags {
    pub planner: Arc<dyn StepPlanner>,
    pub runner: Arc<dyn StepRunner>,
    pub theme: Theme,
    pub branding: Branding,
}

#[derive(Debug)]
pub enum Msg {
    Key(KeyEvent),
    Resize(u16, u16),
    Spinner(spinner::Message),
    Log(viewport::Message),
    StepFinished { index: usize, report: StepReport },
    /// The terminal input stream failed; the UI cannot continue.
    InputLost(String),
}

pub struct App {
    engine: Engine,
    runner: Arc<dyn StepRunner>,
    keys: KeyMap,
    theme: Theme,
    branding: Branding,
    spinner: Spinner,
    log: Viewport,
    show_log: bool,
    fatal: Option<String>,
}

impl App {
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn show_log(&self) -> bool {
        self.show_log
    }

    pub fn log(&self) -> &Viewport {
        &self.log
    }

    /// Set when the program quit because terminal input was lost.
    pub fn fatal(&self) -> Option<&str> {
        self.fatal.as_deref()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Msg> {
        if key.kind != KeyEventKind::Press {
            return Command::none();
        }
        let keys = &self.keys;

        if keys.quit.matches(&key) {
            tracing::info!("quit requested");
            return Command::quit();
        }
        if keys.toggle_log.matches(&key) {
            self.show_log = !self.show_log;
            return Command::none();
        }
        if keys.confirm.matches(&key) {
            let effect = self.engine.confirm();
            return self.apply(effect);
        }
        if keys.back.matches(&key) {
            if self.engine.back_to_menu() {
                self.sync();
            }
            return Command::none();
        }

        if self.engine.is_menu() {
            if keys.up.matches(&key) {
                self.engine.move_up();
            } else if keys.down.matches(&key) {
                self.engine.move_down();
            }
            return Command::none();
        }

        if !self.show_log {
            return Command::none();
        }
        let scroll = if keys.up.matches(&key) {
            viewport::Message::ScrollUp(1)
        } else if keys.down.matches(&key) {
            viewport::Message::ScrollDown(1)
        } else if keys.page_up.matches(&key) {
            viewport::Message::PageUp
        } else if keys.page_down.matches(&key) {
            viewport::Message::PageDown
        } else if keys.top.matches(&key) {
            viewport::Message::GotoTop
        } else if keys.bottom.matches(&key) {
            viewport::Message::GotoBottom
        } else {
            return Command::none();
        };
        self.log.update(scroll).map(Msg::Log)
    }

    /// Carry out what the engine asked for and bring the widgets in line.
    fn apply(&mut self, effect: Effect) -> Command<Msg> {
        self.sync();
        match effect {
            Effect::None => Command::none(),
            Effect::Quit => Command::quit(),
            Effect::Execute { index, step } => Command::perform(
                execute_step(Arc::clone(&self.runner), step),
                move |report| Msg::StepFinished { index, report },
            ),
        }
    }

    /// Spinner runs exactly while a step runs; the log shows the transcript
    /// and follows new output.
    fn sync(&mut self) {
        match (self.engine.is_running(), self.spinner.is_spinning()) {
            (true, false) => self.spinner.start(),
            (false, true) => self.spinner.stop(),
            _ => {}
        }

        let text = self.engine.transcript().text();
        if self.log.content() != text {
            self.log.set_content(text);
            self.log.goto_bottom();
        }
    }
}

impl Model for App {
    type Message = Msg;
    type Flags = AppFlags;

    fn init(flags: AppFlags) -> (Self, Command<Msg>) {
        let theme = flags.theme;
        let spinner = Spinner::new("step-spinner").with_style(theme.spinner);
        let log = Viewport::new().with_style(ViewportStyle {
            border: theme.log_border,
            text: theme.log_text,
            scrollbar: theme.log_border,
        });

        let app = App {
            engine: Engine::new(flags.planner),
            runner: flags.runner,
            keys: KeyMap::default(),
            theme,
            branding: flags.branding,
            spinner,
            log,
            show_log: false,
            fatal: None,
        };
        (app, Command::none())
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Key(key) => self.handle_key(key),
            // Layout is taken from the frame on every draw; the message only
            // schedules a redraw at the new size.
            Msg::Resize(width, height) => {
                tracing::debug!(width, height, "terminal resized");
                Command::none()
            }
            Msg::Spinner(tick) => self.spinner.update(tick).map(Msg::Spinner),
            Msg::Log(scroll) => self.log.update(scroll).map(Msg::Log),
            Msg::StepFinished { index, report } => {
                let effect = self.engine.complete(index, report);
                self.apply(effect)
            }
            Msg::InputLost(reason) => {
                tracing::error!(%reason, "terminal input lost");
                self.fatal = Some(reason);
                Command::quit()
            }
        }
    }

    fn view(&self, frame: &mut Frame) {
        let screen = Screen {
            engine: &self.engine,
            theme: &self.theme,
            branding: &self.branding,
            keys: &self.keys,
            spinner: &self.spinner,
            log: &self.log,
            show_log: self.show_log,
        };
        view::render(&screen, frame);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![terminal_events(|event| match event {
            TerminalEvent::Key(key) => Some(Msg::Key(key)),
            TerminalEvent::Resize(width, height) => Some(Msg::Resize(width, height)),
            TerminalEvent::InputLost(reason) => Some(Msg::InputLost(reason)),
            TerminalEvent::Other => None,
        })];
        subs.extend(
            self.spinner
                .subscriptions()
                .into_iter()
                .map(|sub| sub.map(Msg::Spinner)),
        );
        subs
    }
}
