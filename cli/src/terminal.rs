//! Terminal implementations of the controller seams.
//!
//! Navigation and notices go to stderr, results to stdout, so the output of
//! `plan` and `chat` can be piped.

#[cfg(test)]
#[path = "terminal_test.rs"]
mod terminal_test;

use std::cell::RefCell;
use std::fmt::Write as _;
use std::time::{SystemTime, UNIX_EPOCH};

use studymate::controller::{ChatView, Page, RoadmapView, Shell, SubmitControl};
use studymate::plan::{MonthCard, PlanDisplay};
use studymate::transcript::{Role, Transcript};

/// Shell that reports navigation and alerts on stderr and remembers alerts.
#[derive(Debug, Default)]
pub struct TerminalShell {
    alerts: RefCell<Vec<String>>,
    navigations: RefCell<Vec<Page>>,
}

impl TerminalShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent alert, if the command raised any.
    pub fn last_alert(&self) -> Option<String> {
        self.alerts.borrow().last().cloned()
    }

    pub fn last_navigation(&self) -> Option<Page> {
        self.navigations.borrow().last().copied()
    }
}

impl Shell for TerminalShell {
    fn navigate(&self, page: Page) {
        eprintln!("→ {}", page.path());
        self.navigations.borrow_mut().push(page);
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
        self.alerts.borrow_mut().push(message.to_owned());
    }

    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

/// Submit "button" whose busy label is echoed on stderr.
#[derive(Debug)]
pub struct TerminalControl {
    idle: String,
    label: RefCell<String>,
}

impl TerminalControl {
    pub fn new(idle: &str) -> Self {
        Self { idle: idle.to_owned(), label: RefCell::new(idle.to_owned()) }
    }
}

impl SubmitControl for TerminalControl {
    fn label(&self) -> String {
        self.label.borrow().clone()
    }

    fn set_label(&self, label: &str) {
        if label != self.idle {
            eprintln!("{label}");
        }
        *self.label.borrow_mut() = label.to_owned();
    }
}

/// Plan display that prints cards to stdout as soon as they arrive.
#[derive(Debug, Default)]
pub struct TerminalRoadmap {
    display: RefCell<PlanDisplay>,
}

impl TerminalRoadmap {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn current(&self) -> PlanDisplay {
        self.display.borrow().clone()
    }
}

impl RoadmapView for TerminalRoadmap {
    fn set_trigger(&self, busy: bool, label: &str) {
        tracing::debug!(busy, label, "roadmap trigger");
    }

    fn show(&self, display: PlanDisplay) {
        match &display {
            PlanDisplay::Empty => {}
            PlanDisplay::Loading => eprintln!("{}", studymate::controller::roadmap::LOADING_TEXT),
            PlanDisplay::Cards(cards) => print!("{}", format_cards(cards)),
            PlanDisplay::Error(text) => eprintln!("{text}"),
        }
        *self.display.borrow_mut() = display;
    }
}

/// Plain-text rendering of month cards, one block per month.
pub fn format_cards(cards: &[MonthCard]) -> String {
    let mut out = String::new();
    for card in cards {
        let _ = writeln!(out, "{}: {}", card.header(), card.goal);
        for task in &card.tasks {
            let _ = writeln!(out, "  - {task}");
        }
        out.push('\n');
    }
    out
}

/// Transcript holder for one chat session. Input clearing and scrolling have
/// no terminal counterpart.
#[derive(Debug, Default)]
pub struct TerminalChat {
    transcript: RefCell<Transcript>,
}

impl TerminalChat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the latest bot entry, reply or error.
    pub fn last_bot_text(&self) -> Option<String> {
        self.transcript
            .borrow()
            .entries()
            .iter()
            .rev()
            .find(|e| e.role == Role::Bot)
            .map(|e| e.text.clone())
    }
}

impl ChatView for TerminalChat {
    fn clear_input(&self) {}

    fn edit<R>(&self, f: impl FnOnce(&mut Transcript) -> R) -> Option<R> {
        Some(f(&mut self.transcript.borrow_mut()))
    }

    fn scroll_to_bottom(&self) {}
}
