use crate::error::ShellError;
use crate::shell::LoopSignal;
use crate::utils::report_error;
use nix::unistd::chdir;
use std::io::Write;
use tracing::debug;

/// Serialises tests that read or change the process working directory.
#[cfg(test)]
pub(crate) static CWD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Checks if the command is a built-in and, if so, runs it in-process.
/// Supported built-ins are "exit" and "cd".
///
/// Returns `None` when `args` does not name a built-in, so the caller should
/// launch it as an external program instead.
pub fn handle_builtin<W: Write + ?Sized>(args: &[String], out: &mut W) -> Option<LoopSignal> {
    match args.first()?.as_str() {
        // Extra arguments to exit are ignored.
        "exit" => Some(LoopSignal::Terminate(0)),
        "cd" => {
            if let Err(e) = handle_cd(args) {
                report_error(out, e);
            }
            Some(LoopSignal::Continue)
        }
        _ => None,
    }
}

/// Changes the working directory of this process.
///
/// Requires exactly one path argument. On any failure the working directory is
/// left as it was.
pub fn handle_cd(args: &[String]) -> Result<(), ShellError> {
    let [_, path] = args else {
        return Err(ShellError::WrongArity { command: "cd" });
    };
    chdir(path.as_str()).map_err(ShellError::Filesystem)?;
    debug!(path = %path, "changed directory");
    Ok(())
}
