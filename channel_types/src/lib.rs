#![cfg_attr(not(test), no_std)]

//! # Channel Types
//!
//! This crate defines CodePane's host-boundary message primitives.
//!
//! ## Philosophy
//!
//! - **Messages, not callbacks**: The host boundary is explicit message passing
//! - **Permissive inbound**: The host channel cannot be negotiated with; payloads
//!   that don't parse as text are expected noise, not errors
//! - **Traceable**: Every message carries an ID and a schema version
//! - **Directional**: Content pushes and edit reports travel on distinct channels
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A transport (no sockets, no browser bindings)
//! - An RPC layer (no request/response matching)
//! - A validation gate (non-text payloads are dropped, never rejected)

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Content push message schema version (v1.0).
pub const CHANNEL_SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(1, 0);

/// Envelope action for host-to-editor content pushes.
pub const CONTENT_PUSH_ACTION: &str = "host.push_content";

/// Envelope action for editor-to-host edit reports.
pub const EDIT_REPORT_ACTION: &str = "editor.report_edit";

/// Unique identifier for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Creates a new random message ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a message ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Msg({})", self.0)
    }
}

/// Direction of a host-boundary channel
///
/// Content pushes and edit reports must never share a channel; a host that
/// echoed reports back as pushes would loop the document through itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelDirection {
    /// Host to editor (content pushes)
    Inbound,
    /// Editor to host (edit reports)
    Outbound,
}

impl ChannelDirection {
    /// Checks if this is the inbound direction
    pub fn is_inbound(&self) -> bool {
        matches!(self, ChannelDirection::Inbound)
    }

    /// Checks if this is the outbound direction
    pub fn is_outbound(&self) -> bool {
        matches!(self, ChannelDirection::Outbound)
    }
}

impl fmt::Display for ChannelDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelDirection::Inbound => write!(f, "Inbound"),
            ChannelDirection::Outbound => write!(f, "Outbound"),
        }
    }
}

/// Schema version for message payload
///
/// This enables backward-compatible evolution of the host contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version (breaking changes)
    pub major: u32,
    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl SchemaVersion {
    /// Creates a new schema version
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Checks if this version is compatible with another
    ///
    /// Same major version = compatible.
    pub fn is_compatible_with(&self, other: &SchemaVersion) -> bool {
        self.major == other.major
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}

/// Type-erased message payload
///
/// The host boundary carries JSON. A payload "is text" exactly when it
/// decodes as a JSON string; everything else on the inbound channel is
/// ignored by the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    /// Serialized data (JSON)
    data: Vec<u8>,
}

impl MessagePayload {
    /// Creates a new payload from serializable data
    pub fn new<T: Serialize>(data: &T) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_vec(data)?;
        Ok(Self { data: json })
    }

    /// Creates a payload directly from text
    pub fn text(text: impl AsRef<str>) -> Result<Self, serde_json::Error> {
        Self::new(&text.as_ref())
    }

    /// Deserializes the payload into a specific type
    pub fn deserialize<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.data)
    }

    /// Returns the payload text, if the payload is a JSON string
    ///
    /// Returns `None` for any other JSON value and for malformed bytes.
    pub fn as_text(&self) -> Option<String> {
        self.deserialize::<String>().ok()
    }

    /// Returns the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Message envelope for the host boundary
///
/// The payload is type-erased to allow generic handling; the receiver
/// decides what it accepts. Inbound handling does not dispatch on `action`:
/// the action exists for tracing and for keeping the outbound direction
/// distinct from the inbound one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostMessage {
    /// Unique identifier for this message
    pub id: MessageId,
    /// Direction this message travels
    pub direction: ChannelDirection,
    /// Action identifier
    pub action: String,
    /// Schema version of the payload
    pub schema_version: SchemaVersion,
    /// Serialized payload (type-erased)
    pub payload: MessagePayload,
}

impl HostMessage {
    /// Creates a new host message
    pub fn new(
        direction: ChannelDirection,
        action: String,
        schema_version: SchemaVersion,
        payload: MessagePayload,
    ) -> Self {
        Self {
            id: MessageId::new(),
            direction,
            action,
            schema_version,
            payload,
        }
    }

    /// Builds an inbound content push carrying replacement text
    pub fn content_push(text: impl AsRef<str>) -> Result<Self, serde_json::Error> {
        let payload = MessagePayload::text(text)?;
        Ok(Self::new(
            ChannelDirection::Inbound,
            CONTENT_PUSH_ACTION.to_string(),
            CHANNEL_SCHEMA_VERSION,
            payload,
        ))
    }

    /// Builds an outbound edit report carrying the edited text
    pub fn edit_report(text: impl AsRef<str>) -> Result<Self, serde_json::Error> {
        let payload = MessagePayload::text(text)?;
        Ok(Self::new(
            ChannelDirection::Outbound,
            EDIT_REPORT_ACTION.to_string(),
            CHANNEL_SCHEMA_VERSION,
            payload,
        ))
    }
}
