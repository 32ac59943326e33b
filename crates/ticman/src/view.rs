//! Drawing the installer screen.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use ticman_core::Component;
use ticman_widgets::spinner::Spinner;
use ticman_widgets::viewport::Viewport;

use crate::engine::{Engine, Outcome, Phase};
use crate::keys::KeyMap;
use crate::theme::Theme;

/// Names shown in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub product: String,
    pub platform: String,
}

impl Branding {
    pub fn title(&self) -> String {
        format!("{} MANAGER", self.product.to_uppercase())
    }

    pub fn version_line(&self) -> String {
        format!("version {} ({})", env!("CARGO_PKG_VERSION"), self.platform)
    }
}

/// Everything the screen shows, borrowed from the application model.
pub struct Screen<'a> {
    pub engine: &'a Engine,
    pub theme: &'a Theme,
    pub branding: &'a Branding,
    pub keys: &'a KeyMap,
    pub spinner: &'a Spinner,
    pub log: &'a Viewport,
    pub show_log: bool,
}

/// Draw `screen` over the whole frame.
pub fn render(screen: &Screen<'_>, frame: &mut Frame) {
    let area = frame.area();
    let theme = screen.theme;
    frame.render_widget(Block::default().style(theme.app), area);

    let (body, log_area) = split(area, screen.show_log);

    let mut lines = header(screen);
    match screen.engine.phase() {
        Phase::Menu => menu(screen, &mut lines),
        Phase::Running { .. } => running(screen, &mut lines),
        Phase::Done { outcome, .. } => done(screen, outcome, &mut lines),
    }
    frame.render_widget(Paragraph::new(lines).style(theme.app), body);

    if let Some(log_area) = log_area {
        screen.log.view(frame, log_area);
    }
}

/// Body on top, log box of a third of the height below it.
fn split(area: Rect, show_log: bool) -> (Rect, Option<Rect>) {
    if !show_log || area.height < 3 {
        return (area, None);
    }
    let [body, log] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(area.height / 3)]).areas(area);
    let log = Rect {
        x: log.x + 1,
        width: log.width.saturating_sub(4),
        ..log
    };
    (body, Some(log))
}

fn header(screen: &Screen<'_>) -> Vec<Line<'static>> {
    let theme = screen.theme;
    let mut title = vec![Span::raw(" ")];
    title.extend(theme.rainbow(&screen.branding.title()));

    vec![
        Line::default(),
        Line::from(title),
        Line::from(Span::styled(
            format!(" {}", screen.branding.version_line()),
            theme.version,
        )),
        Line::default(),
    ]
}

fn hint(screen: &Screen<'_>, text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(format!(" {}", text.into()), screen.theme.hint))
}

fn toggle_hint(screen: &Screen<'_>) -> Line<'static> {
    hint(
        screen,
        format!(
            "Press {} to {}",
            screen.keys.toggle_log.help_key, screen.keys.toggle_log.description
        ),
    )
}

fn menu(screen: &Screen<'_>, lines: &mut Vec<Line<'static>>) {
    let theme = screen.theme;
    for (i, label) in screen.engine.labels().into_iter().enumerate() {
        let line = if i == screen.engine.cursor() {
            Line::from(vec![
                Span::raw(" "),
                Span::styled(">█ ", theme.cursor),
                Span::styled(format!(" {label} "), theme.selected),
            ])
        } else {
            Line::from(vec![
                Span::raw("    "),
                Span::styled(format!(" {label} "), theme.normal),
            ])
        };
        lines.push(line);
    }
    lines.push(Line::default());
    lines.push(hint(screen, "Use arrow keys to select..."));
    lines.push(toggle_hint(screen));
}

fn running(screen: &Screen<'_>, lines: &mut Vec<Line<'static>>) {
    let engine = screen.engine;
    let description = engine
        .running_step()
        .map(|step| step.description.clone())
        .unwrap_or_default();

    lines.push(Line::from(vec![
        Span::raw(" "),
        screen.spinner.span(),
        Span::raw(" "),
        Span::styled(format!(" {description} "), screen.theme.normal),
    ]));
    lines.push(Line::default());
    lines.push(hint(
        screen,
        format!("Step {} of {}", engine.current_step() + 1, engine.steps().len()),
    ));
    lines.push(toggle_hint(screen));
}

fn done(screen: &Screen<'_>, outcome: &Outcome, lines: &mut Vec<Line<'static>>) {
    let theme = screen.theme;
    match outcome {
        Outcome::Success => {
            lines.push(Line::from(vec![
                Span::raw(" "),
                Span::styled("SUCCESS", theme.success),
            ]));
            lines.push(hint(screen, "Process Completed."));
        }
        Outcome::Failure { diagnostic } => {
            lines.push(Line::from(vec![
                Span::raw(" "),
                Span::styled("FAILED", theme.error),
            ]));
            lines.extend(diagnostic.lines().map(|line| hint(screen, line)));
        }
    }
    lines.push(Line::default());
    lines.push(hint(screen, "Press Enter to Exit."));
    lines.push(hint(
        screen,
        format!(
            "Press {} to {}",
            screen.keys.back.help_key, screen.keys.back.description
        ),
    ));
}
