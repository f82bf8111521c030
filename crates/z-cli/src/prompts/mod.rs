//! Interactive prompts for CLI user input.

use std::io::{self, BufRead, Write};

/// Result type for prompts
pub type PromptResult<T> = Result<T, PromptError>;

/// Errors that can occur during prompts
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("rejected: {0}")]
    Rejected(String),

    #[error("unknown response '{0}' to prompt")]
    UnknownResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Interpret a `[Y/n]` answer. An empty answer accepts.
pub fn parse_answer(answer: &str) -> PromptResult<bool> {
    match answer.trim_end_matches(['\r', '\n']) {
        "" | "y" | "Y" | "yes" => Ok(true),
        "n" | "N" | "no" => Ok(false),
        other => Err(PromptError::UnknownResponse(other.to_string())),
    }
}

/// Ask a `[Y/n]` question on `output` and read one line from `input`.
///
/// A "no" is returned as [`PromptError::Rejected`] naming the question.
pub fn confirm<R: BufRead, W: Write>(question: &str, input: &mut R, output: &mut W) -> PromptResult<()> {
    write!(output, "{question} [Y/n] ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    if parse_answer(&line)? {
        Ok(())
    } else {
        Err(PromptError::Rejected(question.to_string()))
    }
}

/// [`confirm`] on the terminal.
pub fn confirm_stdin(question: &str) -> PromptResult<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    confirm(question, &mut input, &mut io::stdout())
}
