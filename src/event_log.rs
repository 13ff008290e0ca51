//! Line-delimited JSON log of board events.
//!
//! Records are serialized on a background thread fed by a channel, so the
//! game loop never blocks on disk. Each line is one [`EventRecord`].

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::{BoardEvent, EventRecord};

pub const ENV_EVENT_LOG: &str = "MATCH3_EVENT_LOG";

pub struct EventLog {
    tx: Option<mpsc::Sender<EventRecord>>,
    writer: Option<JoinHandle<()>>,
    seq: u64,
}

impl EventLog {
    /// A log that drops everything.
    pub fn disabled() -> Self {
        Self {
            tx: None,
            writer: None,
            seq: 0,
        }
    }

    /// Open the file named by `MATCH3_EVENT_LOG`, or a disabled log when the
    /// variable is unset or the file cannot be opened.
    pub fn from_env() -> Self {
        let path = std::env::var(ENV_EVENT_LOG)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        match path {
            None => Self::disabled(),
            Some(path) => match Self::open(&path) {
                Ok(log) => log,
                Err(e) => {
                    eprintln!("[EventLog] cannot open {}: {}", path, e);
                    Self::disabled()
                }
            },
        }
    }

    /// Append to `path`, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::to_writer(BufWriter::new(file)))
    }

    pub fn to_writer<W: Write + Send + 'static>(mut out: W) -> Self {
        let (tx, rx) = mpsc::channel::<EventRecord>();
        let writer = thread::spawn(move || {
            let mut line: Vec<u8> = Vec::with_capacity(256);
            while let Ok(first) = rx.recv() {
                // Write everything already queued, then flush once.
                for rec in std::iter::once(first).chain(rx.try_iter()) {
                    line.clear();
                    if let Err(e) = serde_json::to_writer(&mut line, &rec) {
                        eprintln!("[EventLog] encode failed: {}", e);
                        continue;
                    }
                    line.push(b'\n');
                    if let Err(e) = out.write_all(&line) {
                        eprintln!("[EventLog] write failed: {}", e);
                        return;
                    }
                }
                if let Err(e) = out.flush() {
                    eprintln!("[EventLog] flush failed: {}", e);
                    return;
                }
            }
        });
        Self {
            tx: Some(tx),
            writer: Some(writer),
            seq: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    /// Records queued so far.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn record(&mut self, episode: u32, event: &BoardEvent) {
        let Some(tx) = self.tx.as_ref() else {
            return;
        };
        self.seq += 1;
        let rec = EventRecord {
            seq: self.seq,
            ts: now_ms(),
            episode,
            event: event.payload(),
        };
        if tx.send(rec).is_err() {
            // Writer thread is gone; stop queueing.
            self.tx = None;
        }
    }

    pub fn record_all(&mut self, episode: u32, events: &[BoardEvent]) {
        for event in events {
            self.record(episode, event);
        }
    }

    /// Flush pending records and stop the writer.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.tx = None;
        if let Some(writer) = self.writer.take() {
            if writer.join().is_err() {
                eprintln!("[EventLog] writer thread panicked");
            }
        }
    }
}

impl Drop for EventLog {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
