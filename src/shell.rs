use crate::builtins::handle_builtin;
use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::exec::execute_command;
use crate::input::{BufferedLines, EditorLines, LineSource};
use crate::parser::tokenize;
use crate::utils::{report_debug, report_error};
use anyhow::Result;
use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use tracing::debug;

/// What the read-eval loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopSignal {
    Continue,
    Terminate(i32),
}

/// One interpreter session: its configuration and the sink that receives
/// `error:` and `{DEBUG}` lines.
pub struct Shell<W: Write> {
    config: ShellConfig,
    diag: W,
}

impl<W: Write> Shell<W> {
    pub fn new(config: ShellConfig, diag: W) -> Self {
        Shell { config, diag }
    }

    /// Runs the loop until `exit` or end of input and returns the exit code.
    ///
    /// Per-line failures are reported and skipped; only a failure of the line
    /// source itself ends the loop with an error.
    pub fn run(&mut self, source: &mut dyn LineSource) -> Result<i32> {
        while let Some(line) = source.next_line()? {
            if let LoopSignal::Terminate(code) = self.eval_line(&line) {
                return Ok(code);
            }
        }
        debug!("end of input");
        Ok(0)
    }

    /// Checks, tokenizes and dispatches one raw line.
    pub fn eval_line(&mut self, line: &str) -> LoopSignal {
        let max = self.config.max_input_len;
        if line.chars().count() > max {
            report_error(&mut self.diag, ShellError::InputTooLong { max });
            return LoopSignal::Continue;
        }

        match tokenize(line) {
            Ok(args) => self.dispatch(&args),
            Err(e) => {
                report_error(&mut self.diag, ShellError::from(e));
                LoopSignal::Continue
            }
        }
    }

    /// Acts on a parsed argument vector: nothing for an empty one, a built-in
    /// when `args[0]` names one, an external program otherwise.
    pub fn dispatch(&mut self, args: &[String]) -> LoopSignal {
        if args.is_empty() {
            self.trace("No args");
            return LoopSignal::Continue;
        }
        self.trace(format_args!("args: {:?}", args));

        if let Some(signal) = handle_builtin(args, &mut self.diag) {
            return signal;
        }

        match execute_command(args) {
            Ok(status) => {
                if let Some(msg) = status.failure_message() {
                    report_error(&mut self.diag, msg);
                }
            }
            Err(e) => report_error(&mut self.diag, e),
        }
        LoopSignal::Continue
    }

    fn trace(&mut self, msg: impl Display) {
        if self.config.debug {
            report_debug(&mut self.diag, msg);
        }
    }
}

/// Runs the main shell loop on stdin with diagnostics on stderr.
///
/// Line editing is used only when asked for and stdin is a terminal.
pub fn run_shell(config: ShellConfig) -> Result<i32> {
    let mut source: Box<dyn LineSource> = if config.edit && io::stdin().is_terminal() {
        Box::new(EditorLines::new(config.emit_prompt)?)
    } else {
        Box::new(BufferedLines::new(
            io::stdin().lock(),
            io::stderr(),
            config.emit_prompt,
        ))
    };
    debug!(?config, "starting shell");
    Shell::new(config, io::stderr()).run(source.as_mut())
}
