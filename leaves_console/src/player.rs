use std::io::BufRead;

use tracing::trace;

/// What the person at the console asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Anything that is not a keyword, to be parsed as a move.
    Move(String),
    Reset,
    Quit,
}

/// Reads commands line by line.
pub struct ConsolePlayer<R> {
    input: R,
    // A re-usable buffer for IO.
    // Should always be empty before and after read_command().
    buf: String,
}

impl<R: BufRead> ConsolePlayer<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            buf: String::new(),
        }
    }

    /// Blocks until a non-empty line is read. The end of the input counts as [`Command::Quit`].
    pub fn read_command(&mut self) -> anyhow::Result<Command> {
        loop {
            self.buf.clear();
            let num_bytes_read = self.input.read_line(&mut self.buf)?;
            if num_bytes_read == 0 {
                return Ok(Command::Quit);
            }
            let line = self.buf.trim();
            trace!(line, "Received input");
            if line.is_empty() {
                continue;
            }
            let command = match line.to_lowercase().as_str() {
                "quit" | "exit" => Command::Quit,
                "reset" => Command::Reset,
                _ => Command::Move(String::from(line)),
            };
            self.buf.clear();
            return Ok(command);
        }
    }
}
