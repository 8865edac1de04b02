use nix::errno::Errno;
use thiserror::Error;

/// Failure while splitting a line into arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A quote was still open when the line ended.
    #[error("mismatched quotes")]
    MismatchedQuotes,
}

/// Everything that can go wrong while handling one input line.
///
/// None of these end the read-eval loop: each one is reported as a single
/// `error: <message>` line and the shell moves on to the next line.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Input exceeds maximum allowed length of {max} characters")]
    InputTooLong { max: usize },

    #[error("{command} requires exactly one argument")]
    WrongArity { command: &'static str },

    /// `chdir` failed; the working directory is unchanged.
    #[error("cd failed: {}", .0.desc())]
    Filesystem(Errno),

    /// `fork` failed; no child exists.
    #[error("fork failed: {}", .0.desc())]
    Spawn(Errno),

    /// `execvp` failed inside the child.
    #[error("command execution failed: {}", .0.desc())]
    Exec(Errno),

    #[error("argument contains an interior nul byte")]
    NulByte,

    #[error("failed to wait for child: {}", .0.desc())]
    Wait(Errno),
}
