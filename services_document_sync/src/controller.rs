//! Synchronization controller state machine.
//!
//! All decisions are synchronous and produce an outcome plus an audit
//! event; delivery of side effects belongs to the session.

use channel_types::MessagePayload;
use serde::{Deserialize, Serialize};
use surface_types::{DisplayFrame, SurfaceReadiness};

use crate::document::{Document, PendingRemote, TextOrigin};

/// Synchronization event for the audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncAuditEvent {
    /// A host push was applied to the mounted surface
    RemoteApplied { revision: u64, sequence: u64 },
    /// A host push was buffered because the surface was not mounted
    RemoteBuffered { sequence: u64 },
    /// A buffered push was displaced by a newer one
    PendingSuperseded { sequence: u64 },
    /// The buffered push was applied at mount time
    PendingApplied { revision: u64, sequence: u64 },
    /// A host message payload was not text and was dropped
    PayloadIgnored { sequence: u64 },
    /// The surface reported mounted for the first time
    Mounted { sequence: u64 },
    /// A repeated mount report was ignored
    MountIgnored { sequence: u64 },
    /// A user edit was applied
    LocalApplied { revision: u64, sequence: u64 },
}

/// What the caller should do after an operation
///
/// The controller decides state transitions; the caller owns side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing to do
    Ignored,
    /// Text parked in the pending slot until mount
    Buffered,
    /// Surface is now mounted with nothing pending
    Mounted,
    /// Push this frame to the surface
    RequestDisplay(DisplayFrame),
    /// Report this edited text on the outbound channel
    RequestEditReport(String),
}

/// Document synchronization controller
///
/// One document, one surface. Host pushes that arrive before the surface
/// mounts are buffered latest-wins; the first mount report applies the
/// buffered text and later reports are ignored. User edits update the
/// document without producing a display frame, since the surface already
/// shows them.
pub struct SyncController {
    document: Document,
    pending: PendingRemote,
    readiness: SurfaceReadiness,
    /// Audit trail of synchronization events
    audit_trail: Vec<SyncAuditEvent>,
    /// Next sequence number (one per operation)
    next_sequence: u64,
}

impl SyncController {
    /// Creates a controller with an empty document and unmounted surface
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            pending: PendingRemote::Empty,
            readiness: SurfaceReadiness::new(),
            audit_trail: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Sets the initial document text, keeping revision zero
    pub fn with_initial_text(mut self, text: impl Into<String>) -> Self {
        self.set_initial_text(text.into());
        self
    }

    pub(crate) fn set_initial_text(&mut self, text: String) {
        self.document = Document::with_text(text);
    }

    /// Handles a message arriving on the inbound host channel
    ///
    /// Payloads that do not decode as text are dropped without touching the
    /// document. Text is applied immediately when the surface is mounted,
    /// otherwise buffered in the single pending slot.
    pub fn on_remote_message(&mut self, payload: &MessagePayload) -> SyncOutcome {
        let sequence = self.next_sequence();

        let text = match payload.as_text() {
            Some(text) => text,
            None => {
                self.audit_trail
                    .push(SyncAuditEvent::PayloadIgnored { sequence });
                return SyncOutcome::Ignored;
            }
        };

        if self.readiness.is_mounted() {
            let revision = self.document.apply(text, TextOrigin::Remote);
            self.audit_trail
                .push(SyncAuditEvent::RemoteApplied { revision, sequence });
            SyncOutcome::RequestDisplay(DisplayFrame::new(revision, self.document.text()))
        } else {
            if self.pending.replace(text).is_some() {
                self.audit_trail
                    .push(SyncAuditEvent::PendingSuperseded { sequence });
            }
            self.audit_trail
                .push(SyncAuditEvent::RemoteBuffered { sequence });
            SyncOutcome::Buffered
        }
    }

    /// Handles the surface reporting that it is mounted
    ///
    /// The first report flips readiness and applies any buffered push;
    /// repeated reports are ignored.
    pub fn on_surface_mounted(&mut self) -> SyncOutcome {
        let sequence = self.next_sequence();

        if self.readiness.is_mounted() {
            self.audit_trail
                .push(SyncAuditEvent::MountIgnored { sequence });
            return SyncOutcome::Ignored;
        }

        self.readiness.mark_mounted();
        self.audit_trail.push(SyncAuditEvent::Mounted { sequence });

        match self.pending.take() {
            Some(text) => {
                let revision = self.document.apply(text, TextOrigin::Remote);
                self.audit_trail
                    .push(SyncAuditEvent::PendingApplied { revision, sequence });
                SyncOutcome::RequestDisplay(DisplayFrame::new(revision, self.document.text()))
            }
            None => SyncOutcome::Mounted,
        }
    }

    /// Handles an edit made by the user on the surface
    ///
    /// The surface already shows the edited text, so no display frame is
    /// produced; the outcome asks for an outbound report instead. Edits are
    /// accepted even before the surface reports mounted.
    pub fn on_local_edit(&mut self, text: impl Into<String>) -> SyncOutcome {
        let sequence = self.next_sequence();
        let text = text.into();
        let revision = self.document.apply(text.clone(), TextOrigin::Local);
        self.audit_trail
            .push(SyncAuditEvent::LocalApplied { revision, sequence });
        SyncOutcome::RequestEditReport(text)
    }

    /// Current document text
    pub fn current_text(&self) -> &str {
        self.document.text()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn readiness(&self) -> SurfaceReadiness {
        self.readiness
    }

    pub fn has_pending_remote(&self) -> bool {
        self.pending.is_pending()
    }

    /// Audit trail of every operation, in arrival order
    pub fn audit_trail(&self) -> &[SyncAuditEvent] {
        &self.audit_trail
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }
}

impl Default for SyncController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_payload(text: &str) -> MessagePayload {
        MessagePayload::text(text).unwrap()
    }

    #[test]
    fn test_remote_before_mount_buffers() {
        let mut controller = SyncController::new();
        let outcome = controller.on_remote_message(&text_payload("early"));

        assert_eq!(outcome, SyncOutcome::Buffered);
        assert!(controller.has_pending_remote());
        assert_eq!(controller.current_text(), "");
        assert_eq!(controller.document().revision(), 0);
    }

    #[test]
    fn test_mount_applies_buffered_push_once() {
        let mut controller = SyncController::new();
        controller.on_remote_message(&text_payload("early"));

        let outcome = controller.on_surface_mounted();
        match outcome {
            SyncOutcome::RequestDisplay(frame) => {
                assert_eq!(frame.revision, 1);
                assert_eq!(frame.text, "early");
            }
            other => panic!("expected display request, got {:?}", other),
        }
        assert!(!controller.has_pending_remote());
        assert_eq!(controller.current_text(), "early");
    }

    #[test]
    fn test_latest_push_wins_before_mount() {
        let mut controller = SyncController::new();
        controller.on_remote_message(&text_payload("first"));
        controller.on_remote_message(&text_payload("second"));

        let outcome = controller.on_surface_mounted();
        match outcome {
            SyncOutcome::RequestDisplay(frame) => {
                assert_eq!(frame.text, "second");
                assert_eq!(frame.revision, 1);
            }
            other => panic!("expected display request, got {:?}", other),
        }
        assert!(controller
            .audit_trail()
            .iter()
            .any(|event| matches!(event, SyncAuditEvent::PendingSuperseded { .. })));
    }

    #[test]
    fn test_repeated_mount_is_ignored() {
        let mut controller = SyncController::new();
        controller.on_remote_message(&text_payload("early"));

        let first = controller.on_surface_mounted();
        assert!(matches!(first, SyncOutcome::RequestDisplay(_)));

        let second = controller.on_surface_mounted();
        assert_eq!(second, SyncOutcome::Ignored);
        assert_eq!(controller.document().revision(), 1);

        let mounted: Vec<_> = controller
            .audit_trail()
            .iter()
            .filter(|event| matches!(event, SyncAuditEvent::Mounted { .. }))
            .collect();
        assert_eq!(mounted.len(), 1);
    }

    #[test]
    fn test_mount_with_nothing_pending() {
        let mut controller = SyncController::new();
        let outcome = controller.on_surface_mounted();
        assert_eq!(outcome, SyncOutcome::Mounted);
        assert_eq!(controller.document().revision(), 0);
    }

    #[test]
    fn test_remote_after_mount_applies_immediately() {
        let mut controller = SyncController::new();
        controller.on_surface_mounted();

        let outcome = controller.on_remote_message(&text_payload("pushed"));
        match outcome {
            SyncOutcome::RequestDisplay(frame) => {
                assert_eq!(frame.revision, 1);
                assert_eq!(frame.text, "pushed");
            }
            other => panic!("expected display request, got {:?}", other),
        }
        assert_eq!(controller.document().origin(), TextOrigin::Remote);
    }

    #[test]
    fn test_non_text_payload_is_dropped() {
        let mut controller = SyncController::new();
        controller.on_surface_mounted();

        let number = MessagePayload::new(&42u32).unwrap();
        assert_eq!(controller.on_remote_message(&number), SyncOutcome::Ignored);

        let structured = MessagePayload::new(&vec!["a", "b"]).unwrap();
        assert_eq!(
            controller.on_remote_message(&structured),
            SyncOutcome::Ignored
        );

        assert_eq!(controller.document().revision(), 0);
        assert!(controller
            .audit_trail()
            .iter()
            .any(|event| matches!(event, SyncAuditEvent::PayloadIgnored { .. })));
    }

    #[test]
    fn test_empty_text_is_a_valid_push() {
        let mut controller = SyncController::new().with_initial_text("something");
        controller.on_surface_mounted();

        let outcome = controller.on_remote_message(&text_payload(""));
        match outcome {
            SyncOutcome::RequestDisplay(frame) => {
                assert_eq!(frame.revision, 1);
                assert_eq!(frame.text, "");
            }
            other => panic!("expected display request, got {:?}", other),
        }
        assert_eq!(controller.current_text(), "");
    }

    #[test]
    fn test_local_edit_reports_without_display() {
        let mut controller = SyncController::new();
        controller.on_surface_mounted();

        let outcome = controller.on_local_edit("typed by user");
        assert_eq!(
            outcome,
            SyncOutcome::RequestEditReport("typed by user".to_string())
        );
        assert_eq!(controller.current_text(), "typed by user");
        assert_eq!(controller.document().origin(), TextOrigin::Local);
    }

    #[test]
    fn test_local_edit_before_mount_still_applies() {
        let mut controller = SyncController::new();
        let outcome = controller.on_local_edit("early edit");
        assert!(matches!(outcome, SyncOutcome::RequestEditReport(_)));
        assert_eq!(controller.current_text(), "early edit");
        assert!(!controller.readiness().is_mounted());
    }

    #[test]
    fn test_remote_overwrites_local_when_mounted() {
        let mut controller = SyncController::new();
        controller.on_surface_mounted();
        controller.on_local_edit("local version");

        controller.on_remote_message(&text_payload("host version"));
        assert_eq!(controller.current_text(), "host version");
        assert_eq!(controller.document().origin(), TextOrigin::Remote);
        assert_eq!(controller.document().revision(), 2);
    }

    #[test]
    fn test_revisions_strictly_increase() {
        let mut controller = SyncController::new();
        controller.on_surface_mounted();
        controller.on_remote_message(&text_payload("a"));
        controller.on_local_edit("b");
        controller.on_remote_message(&text_payload("c"));

        let revisions: Vec<u64> = controller
            .audit_trail()
            .iter()
            .filter_map(|event| match event {
                SyncAuditEvent::RemoteApplied { revision, .. }
                | SyncAuditEvent::PendingApplied { revision, .. }
                | SyncAuditEvent::LocalApplied { revision, .. } => Some(*revision),
                _ => None,
            })
            .collect();
        assert_eq!(revisions, vec![1, 2, 3]);
    }

    #[test]
    fn test_audit_sequences_are_monotonic() {
        let mut controller = SyncController::new();
        controller.on_remote_message(&text_payload("a"));
        controller.on_remote_message(&text_payload("b"));
        controller.on_surface_mounted();
        controller.on_local_edit("c");
        controller.on_surface_mounted();

        let sequences: Vec<u64> = controller
            .audit_trail()
            .iter()
            .map(|event| match event {
                SyncAuditEvent::RemoteApplied { sequence, .. }
                | SyncAuditEvent::RemoteBuffered { sequence }
                | SyncAuditEvent::PendingSuperseded { sequence }
                | SyncAuditEvent::PendingApplied { sequence, .. }
                | SyncAuditEvent::PayloadIgnored { sequence }
                | SyncAuditEvent::Mounted { sequence }
                | SyncAuditEvent::MountIgnored { sequence }
                | SyncAuditEvent::LocalApplied { sequence, .. } => *sequence,
            })
            .collect();

        for window in sequences.windows(2) {
            assert!(window[0] <= window[1], "sequence went backwards");
        }
        assert_eq!(sequences.first(), Some(&0));
    }

    #[test]
    fn test_initial_text_keeps_revision_zero() {
        let controller = SyncController::new().with_initial_text("seed");
        assert_eq!(controller.current_text(), "seed");
        assert_eq!(controller.document().revision(), 0);
    }

    #[test]
    fn test_audit_event_serialization_roundtrip() {
        let event = SyncAuditEvent::RemoteApplied {
            revision: 3,
            sequence: 7,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: SyncAuditEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
