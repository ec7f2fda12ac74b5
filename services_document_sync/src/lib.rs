//! # Document Synchronization Service
//!
//! This crate keeps one text document consistent between a host that
//! pushes content and an editor surface that displays it and reports
//! user edits.
//!
//! ## Philosophy
//!
//! - **Single slot**: Content pushed before the surface is ready is
//!   buffered latest-wins; there is no backlog to replay
//! - **Set-once readiness**: The surface goes from not-mounted to mounted
//!   exactly once; repeated mount reports are no-ops
//! - **Mechanism, not policy**: The controller returns outcomes; sinks
//!   chosen by the embedder perform the side effects
//! - **Serialized events**: One consumer drains the mailbox, so every
//!   operation runs to completion before the next begins
//! - **Auditable**: Every operation appends to an audit trail
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A collaborative editor (no merging, no operational transforms)
//! - A persistence layer (nothing survives the session)
//! - A renderer (display frames are handed to a sink, not drawn)

mod controller;
mod document;
mod mailbox;
mod session;

pub use controller::{SyncAuditEvent, SyncController, SyncOutcome};
pub use document::{Document, PendingRemote, TextOrigin};
pub use mailbox::{EventQueue, QueueError, SyncEvent};
pub use session::{
    DisplaySink, EditReportSink, InMemoryDisplaySink, InMemoryEditReportSink, JsonLineReportSink,
    SyncServiceError, SyncSession, DEFAULT_EVENT_CAPACITY,
};
