//! Capture loop: Run the utility and merge its streams into the buffer.

use super::messages::{CaptureEvent, StreamId, Streams};
use super::reader::StreamReader;
use super::CHUNK_SIZE;
use crate::buffer::InputBuffer;
use crate::error::{Error, Result};
use crossbeam_channel::{bounded, Receiver, Select};
use std::io::{self, ErrorKind, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use tracing::{debug, info, trace, warn};

/// Chunks a reader may queue before it blocks.
const CHANNEL_DEPTH: usize = 64;

/// Run `argv` and capture both of its output streams.
///
/// Every chunk is echoed to `echo` as it arrives and fed to `buffer` with
/// the terminal `width`. Returns the utility's exit status once both streams
/// are closed and the process has been reaped.
pub fn run_command(
    argv: &[String],
    buffer: &mut InputBuffer,
    width: usize,
    echo: &mut dyn Write,
) -> Result<ExitStatus> {
    let Some((program, args)) = argv.split_first() else {
        return Err(Error::Spawn {
            program: String::new(),
            source: io::Error::new(ErrorKind::InvalidInput, "empty command"),
        });
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| Error::Spawn {
            program: program.clone(),
            source,
        })?;
    debug!(program = program.as_str(), pid = child.id(), "utility started");

    let captured = capture_child(&mut child, buffer, width, echo);
    if captured.is_err() {
        let _ = child.kill();
    }
    let status = child.wait();
    captured?;

    let status = status?;
    info!(%status, bytes = buffer.len(), rows = buffer.line_count(), "utility finished");
    Ok(status)
}

fn capture_child(
    child: &mut Child,
    buffer: &mut InputBuffer,
    width: usize,
    echo: &mut dyn Write,
) -> io::Result<()> {
    let (out_tx, out_rx) = bounded(CHANNEL_DEPTH);
    let (err_tx, err_rx) = bounded(CHANNEL_DEPTH);

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other("stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| io::Error::other("stderr was not piped"))?;

    let readers = [
        StreamReader::spawn(StreamId::Stdout, stdout, out_tx)?,
        StreamReader::spawn(StreamId::Stderr, stderr, err_tx)?,
    ];

    let sources = [(StreamId::Stdout, out_rx), (StreamId::Stderr, err_rx)];
    let result = multiplex(&sources, buffer, width, echo);

    // Dropping the receivers unblocks any reader still sending.
    drop(sources);
    for reader in readers {
        reader.join();
    }

    result
}

/// Service `sources` until every one of them has closed.
///
/// Waits until any open stream has an event, echoes and feeds its data, and
/// drops a stream from the wait set once it reports end-of-file or an error.
/// A failing stream does not affect the others.
pub fn multiplex(
    sources: &[(StreamId, Receiver<CaptureEvent>)],
    buffer: &mut InputBuffer,
    width: usize,
    echo: &mut dyn Write,
) -> io::Result<()> {
    let mut select = Select::new();
    let mut open = Streams::empty();
    for (stream, receiver) in sources {
        select.recv(receiver);
        open |= stream.flag();
    }

    while !open.is_empty() {
        let operation = select.select();
        let index = operation.index();
        let (stream, receiver) = &sources[index];

        // A reader that went away without a final event counts as closed.
        let event = operation.recv(receiver).unwrap_or(CaptureEvent::Eof);

        match event {
            CaptureEvent::Data(bytes) => {
                echo.write_all(&bytes)?;
                echo.flush()?;
                let rows = buffer.feed(&bytes, width);
                trace!(stream = stream.name(), bytes = bytes.len(), rows, "chunk captured");
            }
            CaptureEvent::Eof => {
                debug!(stream = stream.name(), "stream closed");
                open.remove(stream.flag());
                select.remove(index);
            }
            CaptureEvent::Error(message) => {
                warn!(stream = stream.name(), error = %message, "read failed, closing stream");
                open.remove(stream.flag());
                select.remove(index);
            }
        }
    }

    Ok(())
}

/// Feed `source` into `buffer` until end-of-file, echoing as it goes.
///
/// Used when no utility is given and output is piped in. A read error ends
/// the input like end-of-file would.
pub fn read_to_buffer<R: Read>(
    mut source: R,
    buffer: &mut InputBuffer,
    width: usize,
    echo: &mut dyn Write,
) -> io::Result<()> {
    let mut chunk = vec![0u8; CHUNK_SIZE];

    loop {
        match source.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                echo.write_all(&chunk[..n])?;
                echo.flush()?;
                buffer.feed(&chunk[..n], width);
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => {
                warn!(error = %e, "reading input failed, treating as end of input");
                break;
            }
        }
    }

    debug!(bytes = buffer.len(), rows = buffer.line_count(), "input finished");
    Ok(())
}
