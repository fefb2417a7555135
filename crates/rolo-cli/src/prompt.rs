//! Interactive prompts

use std::io::{self, Write};

use anyhow::Result;

/// Ask a yes/no question, defaulting to no
///
/// Non-interactive sessions (no TTY on stdin) answer no.
pub fn confirm(question: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let answer = input.trim().to_lowercase();

    Ok(answer == "y" || answer == "yes")
}
