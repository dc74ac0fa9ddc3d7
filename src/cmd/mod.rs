use std::io::{self, BufRead, Write};

pub mod check;
pub mod list;

pub use anyhow::bail;
pub use anyhow::Context;
pub use anyhow::Result;

/// App default request timeout
pub const TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Take the username from the command line, or ask for it on stdin.
pub fn username(arg: Option<String>) -> Result<String> {
    match arg {
        Some(name) if !name.is_empty() => Ok(name),
        _ => prompt_username(io::stdin().lock(), io::stdout()),
    }
}

fn prompt_username(mut input: impl BufRead, mut out: impl Write) -> Result<String> {
    write!(out, "Enter your GitHub username: ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("read username")?;
    let name = line.trim_end_matches(['\n', '\r']);
    if name.is_empty() {
        bail!("Username is required!");
    }
    Ok(name.to_string())
}
