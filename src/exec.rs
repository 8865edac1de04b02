use crate::error::ShellError;
use crate::utils::ERROR_PREFIX;
use nix::errno::Errno;
use nix::libc;
use nix::sys::signal::Signal;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{execvp, fork, write, ForkResult, Pid};
use std::ffi::{CStr, CString};
use std::io::{Cursor, Write};
use tracing::debug;

/// How an external command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStatus {
    /// Normal exit with the given status code.
    Exited(i32),
    /// Killed by a signal.
    Signaled(Signal),
}

impl ChildStatus {
    /// The line to report for this outcome, or `None` for a clean exit.
    pub fn failure_message(&self) -> Option<String> {
        match self {
            ChildStatus::Exited(0) => None,
            ChildStatus::Exited(code) => Some(format!("command exited with code {}", code)),
            ChildStatus::Signaled(sig) => {
                Some(format!("command terminated by signal {}", sig.as_str()))
            }
        }
    }
}

/// An argument vector converted to C strings, ready to launch.
#[derive(Debug)]
pub struct PreparedCommand {
    program: CString,
    argv: Vec<CString>,
}

impl PreparedCommand {
    /// Converts `args` (program name first) into owned C strings.
    pub fn new(args: &[String]) -> Result<Self, ShellError> {
        let argv = args
            .iter()
            .map(|arg| CString::new(arg.as_str()).map_err(|_| ShellError::NulByte))
            .collect::<Result<Vec<_>, _>>()?;
        let program = argv.first().cloned().unwrap_or_default();
        Ok(PreparedCommand { program, argv })
    }

    /// Forks a child that replaces itself with the program.
    ///
    /// The borrowed argv view exists only for the duration of this call.
    /// In the child this never returns: either the image is replaced or the
    /// child exits with the errno of the failed `execvp`.
    pub fn launch(self) -> Result<LaunchedCommand, ShellError> {
        let argv: Vec<&CStr> = self.argv.iter().map(CString::as_c_str).collect();

        // SAFETY: the child only calls execvp, write and _exit.
        match unsafe { fork() } {
            Ok(ForkResult::Child) => replace_image(&self.program, &argv),
            Ok(ForkResult::Parent { child }) => {
                debug!(pid = child.as_raw(), program = ?self.program, "spawned child");
                Ok(LaunchedCommand { pid: child })
            }
            Err(errno) => Err(ShellError::Spawn(errno)),
        }
    }
}

/// Child side of `launch`. Terminal in every case.
///
/// The failure line is rendered into a stack buffer: nothing here may touch
/// the heap or the parent's stdio locks.
fn replace_image(program: &CStr, argv: &[&CStr]) -> ! {
    let errno = match execvp(program, argv) {
        Ok(never) => match never {},
        Err(errno) => errno,
    };
    let mut buf = [0u8; 256];
    let mut cursor = Cursor::new(&mut buf[..]);
    let _ = writeln!(cursor, "{}{}", ERROR_PREFIX, ShellError::Exec(errno));
    let len = cursor.position() as usize;
    let _ = write(libc::STDERR_FILENO, &buf[..len]);
    // SAFETY: _exit skips atexit handlers and stdio flushing inherited from
    // the parent, which is what a failed fork child needs.
    unsafe { libc::_exit(errno as i32) }
}

/// A running child that has not been reaped yet.
#[derive(Debug)]
#[must_use = "the child must be waited for"]
pub struct LaunchedCommand {
    pid: Pid,
}

impl LaunchedCommand {
    /// Blocks until the child exits or is killed.
    pub fn wait(self) -> Result<ChildStatus, ShellError> {
        loop {
            match waitpid(self.pid, None) {
                Ok(WaitStatus::Exited(_, code)) => {
                    debug!(pid = self.pid.as_raw(), code, "child exited");
                    return Ok(ChildStatus::Exited(code));
                }
                Ok(WaitStatus::Signaled(_, sig, _)) => {
                    debug!(pid = self.pid.as_raw(), signal = sig.as_str(), "child killed");
                    return Ok(ChildStatus::Signaled(sig));
                }
                Ok(status) => debug!(?status, "child changed state"),
                Err(Errno::EINTR) => continue,
                Err(errno) => return Err(ShellError::Wait(errno)),
            }
        }
    }
}

/// Runs an external command to completion.
///
/// The caller's working directory and descriptors are left untouched; the
/// child is always reaped before this returns.
pub fn execute_command(args: &[String]) -> Result<ChildStatus, ShellError> {
    PreparedCommand::new(args)?.launch()?.wait()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_clean_exit() {
        assert_eq!(execute_command(&args(&["true"])).unwrap(), ChildStatus::Exited(0));
        assert_eq!(ChildStatus::Exited(0).failure_message(), None);
    }

    #[test]
    fn test_nonzero_exit() {
        let status = execute_command(&args(&["false"])).unwrap();
        assert_eq!(status, ChildStatus::Exited(1));
        assert_eq!(
            status.failure_message().as_deref(),
            Some("command exited with code 1")
        );
    }

    #[test]
    fn test_arguments_reach_child() {
        let status = execute_command(&args(&["sh", "-c", "exit $0", "7"])).unwrap();
        assert_eq!(status, ChildStatus::Exited(7));
    }

    #[test]
    fn test_signal_termination() {
        let status = execute_command(&args(&["sh", "-c", "kill -TERM $$"])).unwrap();
        assert_eq!(status, ChildStatus::Signaled(Signal::SIGTERM));
        assert_eq!(
            status.failure_message().as_deref(),
            Some("command terminated by signal SIGTERM")
        );
    }

    #[test]
    fn test_missing_program_exits_with_errno() {
        let status = execute_command(&args(&["minsh-no-such-program-xyz"])).unwrap();
        assert_eq!(status, ChildStatus::Exited(Errno::ENOENT as i32));
    }

    #[test]
    fn test_interior_nul_rejected() {
        let err = PreparedCommand::new(&args(&["echo", "a\0b"])).unwrap_err();
        assert!(matches!(err, ShellError::NulByte));
    }
}
