use argh::FromArgs;

/// Lines strictly longer than this many characters are rejected.
pub const MAX_INPUT_LEN: usize = 1000;

#[derive(FromArgs, Debug)]
/// A minimal interactive command interpreter.
pub struct Options {
    /// print DEBUG trace lines to stderr
    #[argh(switch, short = 'v')]
    pub verbose: bool,

    /// do not print the `$` prompt
    #[argh(switch, short = 'p')]
    pub no_prompt: bool,

    /// use line editing when stdin is a terminal
    #[argh(switch, short = 'e')]
    pub edit: bool,

    /// maximum accepted line length in characters (default 1000)
    #[argh(option, default = "MAX_INPUT_LEN")]
    pub max_len: usize,
}

/// Settings handed to the shell at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub emit_prompt: bool,
    pub debug: bool,
    pub max_input_len: usize,
    pub edit: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            emit_prompt: true,
            debug: false,
            max_input_len: MAX_INPUT_LEN,
            edit: false,
        }
    }
}

impl From<Options> for ShellConfig {
    fn from(opts: Options) -> Self {
        ShellConfig {
            emit_prompt: !opts.no_prompt,
            debug: opts.verbose,
            max_input_len: opts.max_len,
            edit: opts.edit,
        }
    }
}
