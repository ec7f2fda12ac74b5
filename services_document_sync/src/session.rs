//! Session pump wiring the controller to its sinks.
//!
//! Inbound messages, mount reports, and user edits from any source are
//! posted to the mailbox and drained by a single consumer, so the
//! controller sees one event at a time, each processed to completion.

use std::io::Write;

use channel_types::HostMessage;
use surface_types::DisplayFrame;
use thiserror::Error;

use crate::controller::{SyncController, SyncOutcome};
use crate::mailbox::{EventQueue, SyncEvent};

/// Default mailbox capacity for a session.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Errors for session processing and sink delivery.
#[derive(Debug, Error)]
pub enum SyncServiceError {
    #[error("Event queue full (capacity {capacity})")]
    QueueFull { capacity: usize },

    #[error("Serialization error: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Display sink abstraction.
///
/// Receives the frames a mounted surface should show.
pub trait DisplaySink {
    fn display(&mut self, frame: DisplayFrame) -> Result<(), SyncServiceError>;
}

/// Edit report sink abstraction.
///
/// Receives outbound envelopes describing user edits.
pub trait EditReportSink {
    fn report(&mut self, message: HostMessage) -> Result<(), SyncServiceError>;
}

/// Single-consumer session around one controller.
///
/// Sinks are optional: a session without an edit report sink simply does
/// not report edits, and display requests without a display sink are
/// decided but not delivered.
pub struct SyncSession {
    controller: SyncController,
    queue: EventQueue,
    display_sink: Option<Box<dyn DisplaySink>>,
    edit_report_sink: Option<Box<dyn EditReportSink>>,
}

impl SyncSession {
    /// Creates a session with the default mailbox capacity
    pub fn new() -> Self {
        Self {
            controller: SyncController::new(),
            queue: EventQueue::with_capacity(DEFAULT_EVENT_CAPACITY),
            display_sink: None,
            edit_report_sink: None,
        }
    }

    /// Sets the initial document text, keeping revision zero
    pub fn with_initial_text(mut self, text: impl Into<String>) -> Self {
        self.controller.set_initial_text(text.into());
        self
    }

    /// Overrides the mailbox capacity
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue = EventQueue::with_capacity(capacity);
        self
    }

    pub fn attach_display_sink(&mut self, sink: Box<dyn DisplaySink>) {
        self.display_sink = Some(sink);
    }

    pub fn attach_edit_report_sink(&mut self, sink: Box<dyn EditReportSink>) {
        self.edit_report_sink = Some(sink);
    }

    pub fn controller(&self) -> &SyncController {
        &self.controller
    }

    /// Number of events waiting in the mailbox
    pub fn queued_events(&self) -> usize {
        self.queue.len()
    }

    /// Enqueues an event for later processing
    pub fn post(&mut self, event: SyncEvent) -> Result<(), SyncServiceError> {
        let capacity = self.queue.capacity();
        self.queue
            .push(event)
            .map_err(|_| SyncServiceError::QueueFull { capacity })
    }

    /// Processes the next queued event to completion
    ///
    /// Side effects are delivered to the attached sinks before this
    /// returns. Returns `None` when the mailbox is empty.
    pub fn process_next(&mut self) -> Result<Option<SyncOutcome>, SyncServiceError> {
        let event = match self.queue.pop() {
            Some(event) => event,
            None => return Ok(None),
        };

        let outcome = match event {
            SyncEvent::RemoteMessage(payload) => self.controller.on_remote_message(&payload),
            SyncEvent::SurfaceMounted => self.controller.on_surface_mounted(),
            SyncEvent::LocalEdit(text) => self.controller.on_local_edit(text),
        };

        self.deliver(&outcome)?;
        Ok(Some(outcome))
    }

    /// Drains the mailbox, returning how many events were processed
    pub fn run_until_idle(&mut self) -> Result<usize, SyncServiceError> {
        let mut processed = 0;
        while self.process_next()?.is_some() {
            processed += 1;
        }
        Ok(processed)
    }

    fn deliver(&mut self, outcome: &SyncOutcome) -> Result<(), SyncServiceError> {
        match outcome {
            SyncOutcome::RequestDisplay(frame) => {
                if let Some(sink) = self.display_sink.as_mut() {
                    sink.display(frame.clone())?;
                }
            }
            SyncOutcome::RequestEditReport(text) => {
                if let Some(sink) = self.edit_report_sink.as_mut() {
                    let message = HostMessage::edit_report(text)
                        .map_err(|err| SyncServiceError::Encode(err.to_string()))?;
                    sink.report(message)?;
                }
            }
            SyncOutcome::Ignored | SyncOutcome::Buffered | SyncOutcome::Mounted => {}
        }
        Ok(())
    }
}

impl Default for SyncSession {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory display sink for tests.
#[derive(Default)]
pub struct InMemoryDisplaySink {
    pub frames: Vec<DisplayFrame>,
}

impl DisplaySink for InMemoryDisplaySink {
    fn display(&mut self, frame: DisplayFrame) -> Result<(), SyncServiceError> {
        self.frames.push(frame);
        Ok(())
    }
}

/// In-memory edit report sink for tests.
#[derive(Default)]
pub struct InMemoryEditReportSink {
    pub messages: Vec<HostMessage>,
}

impl EditReportSink for InMemoryEditReportSink {
    fn report(&mut self, message: HostMessage) -> Result<(), SyncServiceError> {
        self.messages.push(message);
        Ok(())
    }
}

/// JSON-line edit report sink for stream transports.
pub struct JsonLineReportSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLineReportSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> EditReportSink for JsonLineReportSink<W> {
    fn report(&mut self, message: HostMessage) -> Result<(), SyncServiceError> {
        serde_json::to_writer(&mut self.writer, &message)
            .map_err(|err| SyncServiceError::Encode(err.to_string()))?;
        self.writer
            .write_all(b"\n")
            .map_err(|err| SyncServiceError::Io(err.to_string()))?;
        Ok(())
    }
}
