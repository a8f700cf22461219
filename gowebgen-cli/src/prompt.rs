//! Answer collection for the wizards
//!
//! Each answer comes from, in order: a command-line flag, the prompt (with
//! the settings value as its default), or the default alone when prompting
//! is off.

use anyhow::{Context, Result};
use dialoguer::Input;
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::VecDeque;

/// Source of answers for questions that have no flag
pub trait Prompt {
    /// Ask `question`, falling back to `default` on empty input
    fn ask(&self, question: &str, default: &str) -> Result<String>;

    /// Whether this prompt talks to a user
    fn is_interactive(&self) -> bool {
        true
    }
}

/// Interactive terminal prompt
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&self, question: &str, default: &str) -> Result<String> {
        let mut input = Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }

        let answer = input
            .interact_text()
            .with_context(|| format!("Failed to read answer for '{question}'"))?;
        let answer = answer.trim();
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer.to_string()
        })
    }
}

/// Accepts every default without asking (`--yes`)
#[derive(Debug, Default)]
pub struct AcceptDefaults;

impl Prompt for AcceptDefaults {
    fn ask(&self, _question: &str, default: &str) -> Result<String> {
        Ok(default.to_string())
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Replays canned answers; an empty answer takes the default
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<String>>,
    asked: RefCell<Vec<String>>,
}

#[cfg(test)]
impl ScriptedPrompt {
    /// Prompt answering with `answers` in order
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Questions asked so far
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

#[cfg(test)]
impl Prompt for ScriptedPrompt {
    fn ask(&self, question: &str, default: &str) -> Result<String> {
        self.asked.borrow_mut().push(question.to_string());
        let answer = self
            .answers
            .borrow_mut()
            .pop_front()
            .with_context(|| format!("No scripted answer for '{question}'"))?;
        Ok(if answer.trim().is_empty() {
            default.to_string()
        } else {
            answer.trim().to_string()
        })
    }
}

/// Use the flag if given, otherwise ask
pub fn resolve(
    prompt: &dyn Prompt,
    flag: Option<&str>,
    question: &str,
    default: &str,
) -> Result<String> {
    match flag {
        Some(value) => Ok(value.to_string()),
        None => prompt.ask(question, default),
    }
}
