//! I/O boundary traits for testability
//!
//! These traits abstract the host surface (data, pickers, prompts, progress),
//! allowing services to be tested with mock implementations.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::{Experiment, ProgressEvent};

/// Source of competitions and their experiments.
pub trait DataSource: Send + Sync {
    /// Competition names, in display order.
    fn list_competitions(&self) -> Vec<String>;

    /// Experiments of a competition in insertion order.
    /// Unknown competitions yield an empty list.
    fn list_experiments(&self, competition: &str) -> Vec<Experiment>;
}

/// Item for FZF-style selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionItem {
    /// Display text shown in selector
    pub display: String,
    /// Actual value (e.g., experiment name)
    pub value: String,
}

impl SelectionItem {
    pub fn new(display: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            value: value.into(),
        }
    }
}

/// Interactive FZF-style selector abstraction.
pub trait Selector: Send + Sync {
    /// Present items to user and return selected one.
    /// Returns None if user cancels (Esc/Ctrl-C).
    fn select_one(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Option<SelectionItem>, String>;
}

/// Free-text input request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRequest {
    pub prompt: String,
    pub placeholder: String,
}

/// Free-text input with validation.
pub trait Prompter: Send + Sync {
    /// Ask for a line of text.
    ///
    /// `validate` returns a message for rejected input; the prompter shows it
    /// and asks again. Returns None if the user cancels (EOF).
    fn input(
        &self,
        request: &InputRequest,
        validate: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Option<String>, String>;
}

/// Progress display surface for a running task.
pub trait ProgressSink: Send + Sync {
    /// One progress step: increment plus message.
    fn report(&self, event: &ProgressEvent);

    /// Fired exactly once when a run finishes all its steps.
    fn completed(&self, label: &str);
}

/// Toast-style notifications.
pub trait Notifier: Send + Sync {
    fn info(&self, msg: &str);
    fn warning(&self, msg: &str);
    fn error(&self, msg: &str);
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real selector implementation using skim (FZF-like).
#[derive(Debug, Default)]
pub struct SkimSelector;

impl Selector for SkimSelector {
    fn select_one(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Option<SelectionItem>, String> {
        use skim::prelude::*;
        use std::io::Cursor;

        if items.is_empty() {
            return Ok(None);
        }

        // Build input as newline-separated display strings
        let input = items
            .iter()
            .map(|i| i.display.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let options = SkimOptionsBuilder::default()
            .prompt(Some(prompt))
            .height(Some("50%"))
            .multi(false)
            .build()
            .map_err(|e| format!("failed to build skim options: {e}"))?;

        let item_reader = SkimItemReader::default();
        let items_arc = item_reader.of_bufread(Cursor::new(input));

        let output = Skim::run_with(&options, Some(items_arc));

        match output {
            Some(out) if out.is_abort => Ok(None),
            Some(out) => {
                if let Some(selected) = out.selected_items.first() {
                    let display = selected.output().to_string();
                    let item = items.iter().find(|i| i.display == display).cloned();
                    Ok(item)
                } else {
                    Ok(None)
                }
            }
            None => Ok(None),
        }
    }
}

/// Line prompt on stdin.
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn input(
        &self,
        request: &InputRequest,
        validate: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Option<String>, String> {
        let stdin = io::stdin();
        let mut handle = stdin.lock();
        loop {
            print!(
                "{} {} ",
                request.prompt.cyan(),
                format!("({})", request.placeholder).dimmed()
            );
            io::stdout().flush().map_err(|e| e.to_string())?;

            let mut line = String::new();
            let n = handle.read_line(&mut line).map_err(|e| e.to_string())?;
            if n == 0 {
                return Ok(None);
            }
            // Only strip the line terminator, whitespace is validated
            let value = line.trim_end_matches(['\n', '\r']);
            match validate(value) {
                Some(msg) => eprintln!("  {} {}", "✗".red(), msg),
                None => return Ok(Some(value.to_string())),
            }
        }
    }
}

/// Terminal progress bar (indicatif), scaled to 100 %.
pub struct IndicatifProgress {
    bar: ProgressBar,
}

impl IndicatifProgress {
    pub fn new(title: &str) -> Self {
        let bar = ProgressBar::new(100);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold} [{bar:30.cyan/blue}] {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
        bar.set_style(style);
        bar.set_prefix(title.to_string());
        Self { bar }
    }

    /// Leave the bar where it stopped (cancelled run).
    pub fn abandon(&self, msg: &str) {
        self.bar.abandon_with_message(msg.to_string());
    }
}

impl ProgressSink for IndicatifProgress {
    fn report(&self, event: &ProgressEvent) {
        let len = self.bar.length().unwrap_or(100);
        let next = (self.bar.position() + u64::from(event.increment)).min(len);
        self.bar.set_position(next);
        self.bar.set_message(event.message.clone());
    }

    fn completed(&self, label: &str) {
        self.bar
            .finish_with_message(format!("{} {label} finished", "✓".green()));
    }
}
