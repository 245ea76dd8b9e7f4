//! Scripted terminal.
//!
//! Feeds `stream_input` a fixed list of lines and records the prompts it
//! was shown.

use async_trait::async_trait;
use slirc_client::input::Terminal;
use std::collections::VecDeque;

/// Terminal fed from a fixed script.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    script: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedTerminal {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

#[async_trait]
impl Terminal for ScriptedTerminal {
    async fn input(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.script.pop_front()
    }

    fn println(&self, _line: &str) {}
}
