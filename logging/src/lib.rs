#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Asynchronous event logging for the Outpost Defence runtime.
//!
//! [`EventLog`] decouples gameplay threads from log I/O latency: callers
//! enqueue timestamped lines and return immediately, while a dedicated
//! worker thread drains the queue into an append-only text file. The
//! worker is the only code that ever touches the file handle.
//!
//! The log is an explicitly constructed service, created once at process
//! start and passed by reference to whatever component needs to record
//! events. Shutting it down (explicitly via [`EventLog::shutdown`], or
//! implicitly on drop) drains every pending entry before the file closes;
//! nothing is ever lost to teardown.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

pub mod timestamp;

/// Work items travelling from producers to the writer thread.
///
/// The two request kinds keep the two wake conditions distinct: the
/// channel itself wakes the worker for new entries, and each flush
/// carries its own acknowledgement channel to wake exactly its caller
/// once the preceding entries are on disk.
enum WorkerRequest {
    /// One pre-timestamped line to append to the file.
    Record(String),
    /// Drain marker: flush the file, then acknowledge.
    Flush(Sender<()>),
}

/// Handle to the asynchronous log writer service.
///
/// A log that failed to open its file (or to start its worker) degrades
/// to a permanent no-op rather than surfacing an error; diagnostics must
/// never take gameplay down with them.
#[derive(Debug)]
pub struct EventLog {
    sender: Option<Sender<WorkerRequest>>,
    worker: Option<JoinHandle<()>>,
}

impl EventLog {
    /// Opens `path` for writing, truncating prior contents, and starts
    /// the writer thread.
    ///
    /// Failure to open the file or spawn the worker yields a disabled
    /// instance whose operations are silent no-ops.
    #[must_use]
    pub fn create(path: &Path) -> Self {
        let Ok(file) = File::create(path) else {
            return Self::disabled();
        };

        let (sender, receiver) = unbounded();
        let spawned = thread::Builder::new()
            .name("event-log".into())
            .spawn(move || drain(receiver, file));
        match spawned {
            Ok(worker) => Self {
                sender: Some(sender),
                worker: Some(worker),
            },
            Err(_) => Self::disabled(),
        }
    }

    /// Creates an inert log whose operations are silent no-ops.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            sender: None,
            worker: None,
        }
    }

    /// Whether this instance writes anywhere at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Enqueues `message`, prefixed with the current local timestamp, and
    /// returns immediately.
    ///
    /// Never blocks on I/O. Safe to call from any thread; lines from one
    /// caller reach the file in that caller's call order, while
    /// interleaving across callers follows whatever order their calls
    /// reached the queue. No-op when the log is disabled.
    pub fn log(&self, message: &str) {
        let Some(sender) = &self.sender else {
            return;
        };
        let line = format!("{} {}", timestamp::now(), message);
        let _ = sender.send(WorkerRequest::Record(line));
    }

    /// Blocks until every entry enqueued before this call has been
    /// written and the file flushed to the operating system.
    ///
    /// The drain marker travels through the same queue as the entries, so
    /// the boundary is exact: entries enqueued by other threads after
    /// this call starts are not waited for. No-op when the log is
    /// disabled.
    pub fn flush(&self) {
        let Some(sender) = &self.sender else {
            return;
        };
        let (ack_sender, ack_receiver) = bounded(1);
        if sender.send(WorkerRequest::Flush(ack_sender)).is_ok() {
            let _ = ack_receiver.recv();
        }
    }

    /// Stops the writer after draining every pending entry, then closes
    /// the file.
    ///
    /// Dropping the log performs the same teardown; this method only
    /// makes the point of release explicit in the caller's control flow.
    pub fn shutdown(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        // Disconnecting the channel is the exit request: the worker keeps
        // draining until the queue is empty, then observes the
        // disconnect, flushes, and exits.
        drop(self.sender.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for EventLog {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Writer-thread loop: pop requests one at a time and apply them.
///
/// Producers are never blocked by a slow write; they only ever touch the
/// channel. Write and flush errors are swallowed so one bad entry cannot
/// stop the drain. The file is flushed whenever the queue goes empty,
/// and once more after the channel disconnects.
fn drain(receiver: Receiver<WorkerRequest>, file: File) {
    let mut writer = BufWriter::new(file);
    while let Ok(request) = receiver.recv() {
        match request {
            WorkerRequest::Record(line) => {
                let _ = writeln!(writer, "{line}");
                if receiver.is_empty() {
                    let _ = writer.flush();
                }
            }
            WorkerRequest::Flush(ack) => {
                let _ = writer.flush();
                let _ = ack.send(());
            }
        }
    }
    let _ = writer.flush();
}
