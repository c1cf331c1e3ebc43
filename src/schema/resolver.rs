//! Resolution of questions the matchers cannot answer alone.
//!
//! The normalizer asks a [`TypeResolver`] for a type when neither matcher
//! recognises a field, and for confirmation before marking a label-like field
//! translatable. Both calls block until answered and never fail.

use super::meta::{DataType, RawValue};
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Answers the normalizer's open questions.
pub trait TypeResolver {
    /// Choose a type for a field neither matcher recognised.
    fn prompt_for_type(&mut self, key: &str, sample: &RawValue) -> DataType;

    /// Yes/no question.
    fn confirm(&mut self, question: &str) -> bool;
}

/// Non-interactive answers: `string` for unknown types, "no" to every question.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResolver;

impl TypeResolver for DefaultResolver {
    fn prompt_for_type(&mut self, key: &str, sample: &RawValue) -> DataType {
        warn!(field = key, sample = %sample, "could not detect type, defaulting to string");
        DataType::String
    }

    fn confirm(&mut self, _question: &str) -> bool {
        false
    }
}

/// Line-oriented prompts over any reader/writer pair.
///
/// An empty answer, end of input or an I/O error selects the default
/// (`string`, "no"). Unrecognised type names are asked again a few times.
pub struct TerminalResolver<R, W> {
    input: R,
    output: W,
    max_attempts: usize,
}

impl TerminalResolver<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's stdin/stdout.
    pub fn stdio() -> Self {
        TerminalResolver::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TerminalResolver {
            input,
            output,
            max_attempts: 3,
        }
    }

    /// Consume the resolver, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn say(&mut self, text: &str) {
        // Prompt output is best-effort; a closed terminal falls back to defaults.
        if write!(self.output, "{text}").and_then(|_| self.output.flush()).is_err() {
            warn!("failed to write prompt");
        }
    }
}

impl<R: BufRead, W: Write> TypeResolver for TerminalResolver<R, W> {
    fn prompt_for_type(&mut self, key: &str, sample: &RawValue) -> DataType {
        let choices = DataType::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        self.say(&format!(
            "\n⚠️  Couldn't detect type for '{key}' (value: {sample})\n"
        ));
        for _ in 0..self.max_attempts {
            self.say(&format!(
                "Please specify data type for '{key}' [{choices}] (default: string): "
            ));
            let Some(answer) = self.read_answer() else {
                return DataType::String;
            };
            if answer.is_empty() {
                return DataType::String;
            }
            if let Some(ty) = DataType::from_literal(&answer) {
                return ty;
            }
            self.say(&format!("Unknown type '{answer}'.\n"));
        }
        DataType::String
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.say(&format!("{question} [y/N]: "));
        matches!(
            self.read_answer().map(|a| a.to_lowercase()).as_deref(),
            Some("y" | "yes")
        )
    }
}
