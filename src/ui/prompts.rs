//! ui::prompts
//!
//! Multi-select prompts and the selection provider contract.
//!
//! # Design
//!
//! The engine never talks to a terminal directly; it hands a [`MultiSelect`]
//! to a [`SelectionProvider`] and gets back the chosen labels. Prompts are
//! only shown by the interactive provider. In non-interactive mode the
//! defaults provider accepts each prompt's pre-checked choices, so no
//! operation ever blocks without a terminal.
//!
//! A disabled choice is displayed but cannot be toggled; it is returned as
//! selected exactly when it was checked.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};

use thiserror::Error;

/// Synthetic "select every field" label some presentation layers add.
///
/// It is not a real breadcrumb and is filtered out before chosen labels are
/// translated back.
pub const SELECT_ALL_LABEL: &str = "Select All";

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("no interactive terminal available")]
    NotInteractive,

    #[error("IO error: {0}")]
    Io(String),
}

/// One togglable entry in a multi-select prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Label shown to the user and returned on selection.
    pub label: String,
    /// Initial checked state.
    pub checked: bool,
    /// Lock reason; a locked choice is displayed but cannot be toggled.
    pub disabled: Option<&'static str>,
}

/// A multi-select prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSelect {
    /// Message shown above the choices.
    pub message: String,
    /// Machine name of the answer set.
    pub name: String,
    /// Choices, in display order.
    pub choices: Vec<Choice>,
}

/// Source of multi-select answers.
///
/// The interactive implementation blocks awaiting a human; tests substitute
/// [`ScriptedProvider`] for deterministic answers.
pub trait SelectionProvider {
    /// Present the prompt and return the labels of the selected choices.
    fn multi_select(&mut self, prompt: &MultiSelect) -> Result<Vec<String>, PromptError>;
}

/// Interactive provider: a line-oriented toggle loop on the terminal.
///
/// Reads from stdin when stdin is a terminal; when the catalog document was
/// piped in on stdin, answers are read from the controlling TTY instead.
/// Prompt rendering goes to stderr so it never mixes with piped data.
pub struct TerminalProvider {
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl TerminalProvider {
    /// Open the terminal for prompting.
    ///
    /// Fails with [`PromptError::NotInteractive`] when neither stdin nor the
    /// controlling TTY is available.
    pub fn new() -> Result<Self, PromptError> {
        let stdin = io::stdin();
        let input: Box<dyn BufRead> = if stdin.is_terminal() {
            Box::new(stdin.lock())
        } else {
            let tty = File::open("/dev/tty").map_err(|_| PromptError::NotInteractive)?;
            Box::new(BufReader::new(tty))
        };
        Ok(Self {
            input,
            output: Box::new(io::stderr()),
        })
    }

    #[cfg(test)]
    fn with_streams(input: Box<dyn BufRead>, output: Box<dyn Write>) -> Self {
        Self { input, output }
    }

    fn render(&mut self, prompt: &MultiSelect, checked: &[bool]) -> io::Result<()> {
        writeln!(self.output, "{}", prompt.message)?;
        for (i, choice) in prompt.choices.iter().enumerate() {
            let mark = if checked[i] { "x" } else { " " };
            match choice.disabled {
                Some(reason) => writeln!(
                    self.output,
                    "  {:>3}) [{}] {} ({})",
                    i + 1,
                    mark,
                    choice.label,
                    reason
                )?,
                None => writeln!(self.output, "  {:>3}) [{}] {}", i + 1, mark, choice.label)?,
            }
        }
        writeln!(
            self.output,
            "  toggle by number, 'a' = all, 'n' = none; empty line accepts"
        )
    }
}

impl SelectionProvider for TerminalProvider {
    fn multi_select(&mut self, prompt: &MultiSelect) -> Result<Vec<String>, PromptError> {
        let mut checked: Vec<bool> = prompt.choices.iter().map(|c| c.checked).collect();
        self.render(prompt, &checked).map_err(io_error)?;

        loop {
            write!(self.output, "> ").map_err(io_error)?;
            self.output.flush().map_err(io_error)?;

            let mut line = String::new();
            let read = self.input.read_line(&mut line).map_err(io_error)?;
            if read == 0 {
                return Err(PromptError::Cancelled);
            }
            let line = line.trim();
            if line.is_empty() {
                break;
            }

            for token in line.split_whitespace() {
                match token {
                    "a" | "all" => set_all(prompt, &mut checked, true),
                    "n" | "none" => set_all(prompt, &mut checked, false),
                    _ => match token.parse::<usize>() {
                        Ok(n) if n >= 1 && n <= prompt.choices.len() => {
                            let i = n - 1;
                            match prompt.choices[i].disabled {
                                Some(reason) => writeln!(
                                    self.output,
                                    "  {} is locked ({})",
                                    prompt.choices[i].label, reason
                                )
                                .map_err(io_error)?,
                                None => checked[i] = !checked[i],
                            }
                        }
                        _ => {
                            writeln!(self.output, "  unrecognized: {token}").map_err(io_error)?
                        }
                    },
                }
            }
            self.render(prompt, &checked).map_err(io_error)?;
        }

        Ok(selected_labels(prompt, &checked))
    }
}

/// Non-interactive provider: accepts each prompt's pre-checked defaults.
pub struct DefaultsProvider;

impl SelectionProvider for DefaultsProvider {
    fn multi_select(&mut self, prompt: &MultiSelect) -> Result<Vec<String>, PromptError> {
        let checked: Vec<bool> = prompt.choices.iter().map(|c| c.checked).collect();
        Ok(selected_labels(prompt, &checked))
    }
}

/// Deterministic provider for tests: returns pre-supplied answer sets in
/// order and records every prompt it was shown.
pub struct ScriptedProvider {
    answers: VecDeque<Vec<String>>,
    /// Prompts presented so far, in order.
    pub seen: Vec<MultiSelect>,
}

impl ScriptedProvider {
    /// Queue one answer set per expected prompt.
    pub fn new<I, A, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers
                .into_iter()
                .map(|set| set.into_iter().map(Into::into).collect())
                .collect(),
            seen: Vec::new(),
        }
    }
}

impl SelectionProvider for ScriptedProvider {
    fn multi_select(&mut self, prompt: &MultiSelect) -> Result<Vec<String>, PromptError> {
        self.seen.push(prompt.clone());
        self.answers
            .pop_front()
            .ok_or_else(|| PromptError::Io("scripted answers exhausted".to_string()))
    }
}

fn set_all(prompt: &MultiSelect, checked: &mut [bool], value: bool) {
    for (i, choice) in prompt.choices.iter().enumerate() {
        if choice.disabled.is_none() {
            checked[i] = value;
        }
    }
}

fn selected_labels(prompt: &MultiSelect, checked: &[bool]) -> Vec<String> {
    prompt
        .choices
        .iter()
        .zip(checked)
        .filter(|(_, checked)| **checked)
        .map(|(choice, _)| choice.label.clone())
        .collect()
}

fn io_error(err: io::Error) -> PromptError {
    PromptError::Io(err.to_string())
}
