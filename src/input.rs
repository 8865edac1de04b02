use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{BufRead, Write};

/// The prompt printed before each read.
pub const PROMPT: &str = "$";

/// Somewhere the shell gets its lines from.
pub trait LineSource {
    /// Reads the next line without its terminator, or `None` at end of input.
    fn next_line(&mut self) -> Result<Option<String>>;
}

/// Reads lines from any buffered reader, printing the prompt to `prompt_out`.
pub struct BufferedLines<R, W> {
    reader: R,
    prompt_out: W,
    emit_prompt: bool,
}

impl<R: BufRead, W: Write> BufferedLines<R, W> {
    pub fn new(reader: R, prompt_out: W, emit_prompt: bool) -> Self {
        BufferedLines {
            reader,
            prompt_out,
            emit_prompt,
        }
    }
}

impl<R: BufRead, W: Write> LineSource for BufferedLines<R, W> {
    fn next_line(&mut self) -> Result<Option<String>> {
        if self.emit_prompt {
            write!(self.prompt_out, "{}", PROMPT).context("failed to print prompt")?;
            self.prompt_out.flush().context("failed to print prompt")?;
        }

        let mut buf = Vec::new();
        let n = self
            .reader
            .read_until(b'\n', &mut buf)
            .context("failed to read input")?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(strip_terminator(String::from_utf8_lossy(&buf).into_owned())))
    }
}

/// Interactive line editing on a terminal. Lines are never added to history.
pub struct EditorLines {
    editor: DefaultEditor,
    prompt: &'static str,
}

impl EditorLines {
    pub fn new(emit_prompt: bool) -> Result<Self> {
        let editor = DefaultEditor::new().context("failed to initialise line editor")?;
        Ok(EditorLines {
            editor,
            prompt: if emit_prompt { PROMPT } else { "" },
        })
    }
}

impl LineSource for EditorLines {
    fn next_line(&mut self) -> Result<Option<String>> {
        match self.editor.readline(self.prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) => Ok(None),
            // Ctrl-C abandons the current line only.
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(e) => Err(e).context("failed to read input"),
        }
    }
}

fn strip_terminator(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
