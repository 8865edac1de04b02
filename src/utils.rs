use std::fmt::Display;
use std::io::Write;

/// Prefix for every user-visible error line.
pub const ERROR_PREFIX: &str = "error: ";
/// Prefix for every `{DEBUG}` trace line.
pub const DEBUG_PREFIX: &str = "{DEBUG}";

/// Writes `error: <msg>` to the diagnostics sink.
///
/// A failing diagnostics stream is not something the loop can act on, so write
/// errors are logged and dropped.
pub fn report_error<W: Write + ?Sized>(out: &mut W, msg: impl Display) {
    if let Err(e) = writeln!(out, "{}{}", ERROR_PREFIX, msg) {
        tracing::warn!("unable to write diagnostic: {}", e);
    }
}

/// Writes `{DEBUG}<msg>` to the diagnostics sink.
pub fn report_debug<W: Write + ?Sized>(out: &mut W, msg: impl Display) {
    if let Err(e) = writeln!(out, "{}{}", DEBUG_PREFIX, msg) {
        tracing::warn!("unable to write debug trace: {}", e);
    }
}

/// Installs the internal tracing subscriber on stderr.
///
/// Filtered by `RUST_LOG`; defaults to `off` so that internal events never mix
/// with the shell's own diagnostic lines unless asked for.
pub fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "off".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();
}
