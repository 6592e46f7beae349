//! Input/output abstractions
//!
//! The console loop talks to the player through these traits so it can be
//! driven by scripted input in tests.

use std::collections::VecDeque;
use std::io::{self, Write};

pub trait InputReader {
    /// Prompt and read one line, trailing newline included
    fn read_line(&mut self, prompt: &str) -> Result<String, io::Error>;
}

pub trait OutputWriter {
    fn write(&mut self, message: &str);
    fn writeln(&mut self, message: &str);
}

/// stdin/stdout
pub struct TerminalIO;

impl InputReader for TerminalIO {
    fn read_line(&mut self, prompt: &str) -> Result<String, io::Error> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        Ok(input)
    }
}

impl OutputWriter for TerminalIO {
    fn write(&mut self, message: &str) {
        print!("{}", message);
    }

    fn writeln(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Replays canned responses, then reports end of input.
pub struct ScriptedInput {
    responses: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: responses.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl InputReader for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> Result<String, io::Error> {
        self.responses
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted input"))
    }
}

/// Captures everything written.
#[derive(Debug, Default)]
pub struct CapturedOutput {
    pub messages: Vec<String>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}

impl OutputWriter for CapturedOutput {
    fn write(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn writeln(&mut self, message: &str) {
        self.messages.push(format!("{}\n", message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_runs_dry() {
        let mut input = ScriptedInput::new(&["r", "0"]);
        assert_eq!(input.read_line(">").unwrap(), "r");
        assert_eq!(input.read_line(">").unwrap(), "0");
        let err = input.read_line(">").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn captured_output_search() {
        let mut out = CapturedOutput::new();
        out.write("MOVEMENT ");
        out.writeln("LEFT 30");
        assert!(out.contains("LEFT 30"));
        assert!(!out.contains("VICTORY"));
    }
}
