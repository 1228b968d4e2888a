//! Operator prompt: Enter records a command, `q` quits.

use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "Press Enter to record a voice command, or type 'q' to quit: ";

/// What the operator asked for at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorInput {
    Record,
    Quit,
    Other(String),
}

/// Classify one line typed at the prompt.
pub fn classify_input(line: &str) -> OperatorInput {
    let line = line.trim();
    if line.is_empty() {
        OperatorInput::Record
    } else if line.eq_ignore_ascii_case("q") {
        OperatorInput::Quit
    } else {
        OperatorInput::Other(line.to_string())
    }
}

pub trait Console {
    /// Block until the operator answers the prompt.
    fn prompt(&mut self) -> io::Result<OperatorInput>;
    /// Show a status line to the operator.
    fn report(&mut self, message: &str);
}

/// Line-oriented console over any reader and writer.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl LineConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn prompt(&mut self) -> io::Result<OperatorInput> {
        write!(self.output, "\n{PROMPT}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            // closed stdin
            return Ok(OperatorInput::Quit);
        }
        Ok(classify_input(&line))
    }

    fn report(&mut self, message: &str) {
        let _ = writeln!(self.output, "{message}");
    }
}
