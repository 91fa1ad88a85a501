//! Progress reporting. Downloads send immutable events over a channel to a
//! single task that owns the observer, so observers never see concurrent
//! calls.
use crate::error::DownloaderError;
use colored::*;
use indicatif::{HumanBytes, MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Resolution of percentage bars.
const BAR_STEPS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Percentage,
    Spinner,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskUpdate {
    /// Fraction of the expected size, in `[0, 1]`.
    Percentage(f64),
    /// Bytes received so far when the size is unknown.
    Bytes(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Added { id: String, kind: TaskKind },
    Updated { id: String, update: TaskUpdate },
    Done { id: String, message: String },
    Failed { id: String, message: String },
}

/// Receives task lifecycle events, keyed by task id.
pub trait ProgressObserver: Send + 'static {
    fn add_task(&mut self, id: &str, kind: TaskKind);

    fn update_task(&mut self, id: &str, update: TaskUpdate);

    fn done(&mut self, id: &str, message: &str);

    fn fail(&mut self, id: &str, message: &str);

    /// Called once after the last event has been delivered.
    fn settled(&mut self) {}

    fn apply(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::Added { id, kind } => self.add_task(&id, kind),
            ProgressEvent::Updated { id, update } => self.update_task(&id, update),
            ProgressEvent::Done { id, message } => self.done(&id, &message),
            ProgressEvent::Failed { id, message } => self.fail(&id, &message),
        }
    }
}

/// Cloneable sending half handed to every download.
#[derive(Debug, Clone)]
pub struct ProgressSink {
    tx: mpsc::UnboundedSender<ProgressEvent>,
}

impl ProgressSink {
    // A closed channel only means nobody is watching anymore.
    fn send(&self, event: ProgressEvent) {
        let _ = self.tx.send(event);
    }

    pub fn add_task(&self, id: &str, kind: TaskKind) {
        self.send(ProgressEvent::Added {
            id: id.to_string(),
            kind,
        });
    }

    pub fn update_task(&self, id: &str, update: TaskUpdate) {
        self.send(ProgressEvent::Updated {
            id: id.to_string(),
            update,
        });
    }

    pub fn done(&self, id: &str, message: &str) {
        self.send(ProgressEvent::Done {
            id: id.to_string(),
            message: message.to_string(),
        });
    }

    pub fn fail(&self, id: &str, message: &str) {
        self.send(ProgressEvent::Failed {
            id: id.to_string(),
            message: message.to_string(),
        });
    }
}

/// Owns the consumer task for one observer.
pub struct ProgressHub<O> {
    sink: ProgressSink,
    handle: JoinHandle<O>,
}

impl<O: ProgressObserver> ProgressHub<O> {
    pub fn spawn(mut observer: O) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                observer.apply(event);
            }
            observer.settled();
            observer
        });

        Self {
            sink: ProgressSink { tx },
            handle,
        }
    }

    pub fn sink(&self) -> ProgressSink {
        self.sink.clone()
    }

    /// Resolves once every sink has been dropped and all events are
    /// delivered, handing the observer back.
    pub async fn await_all_settled(self) -> Result<O, DownloaderError> {
        drop(self.sink);
        self.handle
            .await
            .map_err(|e| DownloaderError::ObserverStopped(e.to_string()))
    }
}

/// Terminal rendering with one indicatif bar per task.
pub struct IndicatifObserver {
    multi: MultiProgress,
    bars: HashMap<String, ProgressBar>,
}

impl IndicatifObserver {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: HashMap::new(),
        }
    }

    fn style(template: &str, fallback: ProgressStyle) -> ProgressStyle {
        ProgressStyle::with_template(template)
            .map(|s| s.progress_chars("#>-"))
            .unwrap_or(fallback)
    }
}

impl Default for IndicatifObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for IndicatifObserver {
    fn add_task(&mut self, id: &str, kind: TaskKind) {
        let pb = match kind {
            TaskKind::Percentage => {
                let pb = ProgressBar::new(BAR_STEPS);
                pb.set_style(Self::style(
                    "{spinner:.yellow} [{elapsed_precise}] {prefix} [{bar:40.yellow/blue}] {percent:>3}% {msg}",
                    ProgressStyle::default_bar(),
                ));
                pb
            }
            TaskKind::Spinner => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::style(
                    "{spinner:.green} [{elapsed_precise}] {prefix} {msg}",
                    ProgressStyle::default_spinner(),
                ));
                pb.enable_steady_tick(Duration::from_millis(100));
                pb
            }
        };
        pb.set_prefix(id.to_string());
        let pb = self.multi.add(pb);
        self.bars.insert(id.to_string(), pb);
    }

    fn update_task(&mut self, id: &str, update: TaskUpdate) {
        let Some(pb) = self.bars.get(id) else {
            return;
        };
        match update {
            TaskUpdate::Percentage(p) => {
                pb.set_position((p.clamp(0.0, 1.0) * BAR_STEPS as f64).round() as u64)
            }
            TaskUpdate::Bytes(b) => {
                pb.set_message(format!("{}", HumanBytes(b)));
                pb.tick();
            }
        }
    }

    fn done(&mut self, id: &str, message: &str) {
        if let Some(pb) = self.bars.get(id) {
            pb.finish_with_message(message.green().to_string());
        }
    }

    fn fail(&mut self, id: &str, message: &str) {
        if let Some(pb) = self.bars.get(id) {
            pb.abandon_with_message(message.red().to_string());
        }
    }

    fn settled(&mut self) {
        for pb in self.bars.values().filter(|pb| !pb.is_finished()) {
            pb.abandon_with_message("interrupted".red().to_string());
        }
    }
}

/// Keeps every event it receives, in delivery order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub events: Vec<ProgressEvent>,
    pub settled: bool,
}

#[cfg(test)]
impl RecordingObserver {
    pub fn events_for(&self, id: &str) -> Vec<&ProgressEvent> {
        self.events
            .iter()
            .filter(|e| match e {
                ProgressEvent::Added { id: i, .. }
                | ProgressEvent::Updated { id: i, .. }
                | ProgressEvent::Done { id: i, .. }
                | ProgressEvent::Failed { id: i, .. } => i == id,
            })
            .collect()
    }

    pub fn added_ids(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::Added { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl ProgressObserver for RecordingObserver {
    fn add_task(&mut self, id: &str, kind: TaskKind) {
        self.events.push(ProgressEvent::Added {
            id: id.to_string(),
            kind,
        });
    }

    fn update_task(&mut self, id: &str, update: TaskUpdate) {
        self.events.push(ProgressEvent::Updated {
            id: id.to_string(),
            update,
        });
    }

    fn done(&mut self, id: &str, message: &str) {
        self.events.push(ProgressEvent::Done {
            id: id.to_string(),
            message: message.to_string(),
        });
    }

    fn fail(&mut self, id: &str, message: &str) {
        self.events.push(ProgressEvent::Failed {
            id: id.to_string(),
            message: message.to_string(),
        });
    }

    fn settled(&mut self) {
        self.settled = true;
    }
}
