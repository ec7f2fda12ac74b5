//! # Service Contract Tests
//!
//! This crate provides "golden" tests for the host channel and the
//! synchronization flow to ensure they don't drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Channel contracts are written as code
//! - **Testability first**: Contract tests fail when interfaces change
//! - **Mechanism not policy**: Define what must be stable, not how to use it
//!
//! ## Structure
//!
//! Each boundary has a module with contract tests that verify:
//! - Message envelope structure
//! - Action identifiers and directions
//! - Schema versions
//! - End-to-end flow guarantees

pub mod host_channel;
pub mod sync_flow;

/// Common test helpers for contract validation
pub mod test_helpers {
    use channel_types::{ChannelDirection, HostMessage, SchemaVersion};

    /// Verifies a message has the expected action, version, and direction
    pub fn verify_message_contract(
        message: &HostMessage,
        expected_action: &str,
        expected_version: SchemaVersion,
        expected_direction: ChannelDirection,
    ) {
        assert_eq!(
            message.action, expected_action,
            "Action identifier changed: expected '{}', got '{}'",
            expected_action, message.action
        );
        assert_eq!(
            message.schema_version, expected_version,
            "Schema version changed: expected {}, got {}",
            expected_version, message.schema_version
        );
        assert_eq!(
            message.direction, expected_direction,
            "Channel direction changed: expected {}, got {}",
            expected_direction, message.direction
        );
    }

    /// Verifies schema version stays within major version
    pub fn verify_major_version(message: &HostMessage, expected_major: u32) {
        assert_eq!(
            message.schema_version.major, expected_major,
            "Major version changed (breaking change): expected {}, got {}",
            expected_major, message.schema_version.major
        );
    }
}
