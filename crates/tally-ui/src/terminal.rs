//! Terminal capability detection.
//!
//! Color and emoji decisions are made once per process from the
//! environment and TTY state; the render helpers in [`styles`](crate::styles)
//! consult these rather than taking flags.

use std::env;

/// Whether stdout is a terminal.
pub fn is_tty() -> bool {
    crossterm::tty::IsTty::is_tty(&std::io::stdout())
}

/// Whether ANSI color should be emitted, per the usual conventions:
/// `NO_COLOR` and `TERM=dumb` win over everything, `CLICOLOR=0` opts out,
/// `CLICOLOR_FORCE` opts in even when piped, and otherwise color follows
/// the TTY. See <https://no-color.org/> and <https://bixense.com/clicolors/>.
pub fn supports_color() -> bool {
    if env::var_os("NO_COLOR").is_some() || env::var("TERM").as_deref() == Ok("dumb") {
        return false;
    }
    match env::var("CLICOLOR").as_deref() {
        Ok("0") => false,
        _ if env::var_os("CLICOLOR_FORCE").is_some() => true,
        _ => is_tty(),
    }
}

/// Whether habit emoji should be printed next to names.
///
/// Off when piped so output stays machine-readable; `TALLY_NO_EMOJI`
/// forces it off everywhere.
pub fn should_use_emoji() -> bool {
    env::var_os("TALLY_NO_EMOJI").is_none() && is_tty()
}
