//! Host channel contract tests
//!
//! These tests define the stable contract for the two directions of the
//! host boundary: content pushes in, edit reports out.

use channel_types::SchemaVersion;
use serde::{Deserialize, Serialize};

// ===== Host Channel Contract Version =====
const HOST_SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(1, 0);

// ===== Action Identifiers =====
const ACTION_CONTENT_PUSH: &str = "host.push_content";
const ACTION_EDIT_REPORT: &str = "editor.report_edit";

// ===== Canonical Wire Shape =====

/// Envelope fields exactly as they appear on the wire
///
/// Declared independently of `channel_types` so that a field rename or
/// retype there fails these tests instead of silently changing the wire
/// format the host was built against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WireEnvelope {
    pub id: String,
    pub direction: String,
    pub action: String,
    pub schema_version: WireSchemaVersion,
    pub payload: WirePayload,
}

/// Schema version as serialized inside the envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WireSchemaVersion {
    pub major: u32,
    pub minor: u32,
}

/// Type-erased payload as serialized inside the envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WirePayload {
    pub data: Vec<u8>,
}

// ===== Contract Tests =====
