//! Stream reader: Dedicated thread draining one pipe.
//!
//! The reader blocks on its pipe and forwards every chunk over a bounded
//! channel, so a utility that floods one stream cannot starve the other and
//! the capture loop never blocks on a read itself.

use super::messages::{CaptureEvent, StreamId};
use super::CHUNK_SIZE;
use crossbeam_channel::Sender;
use std::io::{self, ErrorKind, Read};
use std::thread::{self, JoinHandle};
use tracing::warn;

/// Handle to a reader thread.
pub struct StreamReader {
    /// Handle to the reader thread.
    handle: Option<JoinHandle<()>>,
    /// Which stream it drains.
    stream: StreamId,
}

impl StreamReader {
    /// Spawn a thread draining `source` into `sender`.
    ///
    /// The thread ends after sending [`CaptureEvent::Eof`] or
    /// [`CaptureEvent::Error`], or as soon as the receiver is gone.
    pub fn spawn<R>(stream: StreamId, source: R, sender: Sender<CaptureEvent>) -> io::Result<Self>
    where
        R: Read + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name(format!("pls-{}", stream.name()))
            .spawn(move || Self::run_loop(source, &sender))?;

        Ok(Self {
            handle: Some(handle),
            stream,
        })
    }

    /// Wait for the reader thread to finish.
    ///
    /// A reader that panicked is reported; whatever it had not yet sent is
    /// lost.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!(stream = self.stream.name(), "reader thread panicked, output may be incomplete");
            }
        }
    }

    /// Main read loop.
    fn run_loop<R: Read>(mut source: R, sender: &Sender<CaptureEvent>) {
        let mut chunk = vec![0u8; CHUNK_SIZE];

        loop {
            match source.read(&mut chunk) {
                Ok(0) => {
                    let _ = sender.send(CaptureEvent::Eof);
                    break;
                }
                Ok(n) => {
                    if sender.send(CaptureEvent::Data(chunk[..n].to_vec())).is_err() {
                        // Receiver dropped, exit
                        break;
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    let _ = sender.send(CaptureEvent::Error(e.to_string()));
                    break;
                }
            }
        }
    }
}
