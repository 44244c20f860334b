//! Line-oriented driver for a [`Session`].

use crate::adapters::{Reply, Session};
use std::io::{BufRead, Write};
use tracing::{debug, instrument, warn};

/// Runs `session` until it quits or `input` is exhausted.
///
/// Rejected lines print their error and the loop continues.
///
/// # Errors
///
/// Only I/O failures on `input` or `output`.
#[instrument(skip_all)]
pub fn run<S, R, W>(session: &mut S, input: R, output: &mut W) -> std::io::Result<()>
where
    S: Session,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", session.banner())?;

    let mut lines = input.lines();
    loop {
        write!(output, "{}", session.prompt())?;
        output.flush()?;

        let Some(line) = lines.next() else {
            debug!("Input closed");
            writeln!(output)?;
            return Ok(());
        };
        let line = line?;

        match session.handle(&line) {
            Ok(Reply::Continue(text)) => writeln!(output, "{text}")?,
            Ok(Reply::Quit(text)) => {
                writeln!(output, "{text}")?;
                return Ok(());
            }
            Err(e) => {
                warn!(error = %e, line = %line, "Command rejected");
                writeln!(output, "Error: {e}")?;
            }
        }
    }
}
