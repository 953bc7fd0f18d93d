//! Session setup and the read-eval-print loop.

use std::io::{self, BufRead, Write};

use hbnb_store::{FileStorage, RecordStore, StoreError};
use tracing::{info, warn};

use crate::config::{ConsoleConfig, CorruptSnapshotPolicy};
use crate::interpreter::{Interpreter, Reply};

/// Open the snapshot-backed store named by `config`, applying the
/// corrupt-snapshot policy.
pub fn open_storage(config: &ConsoleConfig) -> Result<FileStorage, StoreError> {
    let mut storage = FileStorage::new(&config.snapshot_path);
    match storage.reload() {
        Ok(()) => Ok(storage),
        Err(err @ StoreError::CorruptSnapshot { .. }) => match config.on_corrupt_snapshot {
            CorruptSnapshotPolicy::Abort => Err(err),
            CorruptSnapshotPolicy::StartEmpty => {
                warn!(error = %err, "starting with an empty store");
                storage.quarantine()?;
                Ok(storage)
            }
        },
        Err(err) => Err(err),
    }
}

/// Read commands from `input` until `quit` or end of input.
///
/// The prompt is written before every read. In interactive mode a newline
/// is written at end of input so the shell prompt starts on a fresh line.
/// Lines that are not valid UTF-8 are decoded lossily and interpreted like
/// any other line.
pub fn run<S, R, W>(
    interpreter: &mut Interpreter<S>,
    mut input: R,
    out: &mut W,
    prompt: &str,
    interactive: bool,
) -> io::Result<()>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    let mut buf = Vec::new();
    loop {
        write!(out, "{prompt}")?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            if interactive {
                writeln!(out)?;
            }
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        match interpreter.execute(line.trim_end_matches(['\n', '\r'])) {
            Reply::Output(text) => writeln!(out, "{text}")?,
            Reply::Silent => {}
            Reply::Quit => break,
        }
    }
    info!(records = interpreter.store().len(), "session ended");
    Ok(())
}
