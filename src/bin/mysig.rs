/*
 * mysig.rs - Another handy routine for testing the shell
 *
 * usage: mysig <SIGNAME>
 * Sends the named signal (e.g. SIGTERM) to itself.
 */

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <SIGNAME>", args[0]);
        process::exit(0);
    }

    let sig = args[1].parse::<Signal>().unwrap_or_else(|_| {
        eprintln!("Error: unknown signal {}", args[1]);
        process::exit(1);
    });

    let pid = Pid::from_raw(process::id() as i32);

    if let Err(err) = signal::kill(pid, sig) {
        eprintln!("kill error: {}", err);
    }

    // Only reached if the signal was ignored or blocked.
    process::exit(0);
}
