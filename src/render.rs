use std::io::{self, Write};
use std::sync::Mutex;
use std::sync::PoisonError;

use log::debug;

use crate::NonFollowers;

/// Shown when everyone follows back.
pub const EMPTY_STATE: &str = "Everyone follows you back!";

/// Receives the state changes of a check.
pub trait Render {
    /// A check started (`true`) or finished (`false`).
    fn loading(&self, on: bool);
    /// Error text of a failed check. An empty message clears the previous one.
    fn error(&self, message: &str);
    /// Result of a successful check.
    fn results(&self, result: &NonFollowers);
}

/// Plain text renderer. Results go to `out`, loading and error text to `err`.
///
/// The first failed write is kept and can be taken with [`Terminal::take_error`].
#[derive(Debug)]
pub struct Terminal<O, E> {
    out: Mutex<O>,
    err: Mutex<E>,
    failed: Mutex<Option<io::Error>>,
}

impl Terminal<io::Stdout, io::Stderr> {
    /// Render to stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Terminal<O, E> {
    /// Render to the given writers.
    pub fn new(out: O, err: E) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
            failed: Mutex::new(None),
        }
    }

    /// Take back the writers.
    pub fn into_inner(self) -> (O, E) {
        (
            self.out.into_inner().unwrap_or_else(PoisonError::into_inner),
            self.err.into_inner().unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// The first write error since the last call, if any.
    pub fn take_error(&self) -> Option<io::Error> {
        self.failed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn write<W: Write>(&self, to: &Mutex<W>, text: &str) {
        let mut w = to.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = w.write_all(text.as_bytes()).and_then(|_| w.flush()) {
            debug!("render failed: {e}");
            let mut failed = self.failed.lock().unwrap_or_else(PoisonError::into_inner);
            if failed.is_none() {
                *failed = Some(e);
            }
        }
    }
}

impl<O: Write, E: Write> Render for Terminal<O, E> {
    fn loading(&self, on: bool) {
        if on {
            self.write(&self.err, "Loading...\n");
        }
    }

    fn error(&self, message: &str) {
        if !message.is_empty() {
            self.write(&self.err, &format!("{message}\n"));
        }
    }

    fn results(&self, result: &NonFollowers) {
        let mut text = String::new();
        if result.is_empty() {
            text.push_str(EMPTY_STATE);
            text.push('\n');
        }
        for entry in result.entries() {
            text.push_str(&format!("@{}  {}\n", entry.login, entry.profile_url()));
        }
        text.push_str(&format!("Non-followers: {}\n", result.count()));
        self.write(&self.out, &text);
    }
}
