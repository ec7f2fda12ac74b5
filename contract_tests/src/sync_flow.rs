//! Synchronization flow contract tests
//!
//! These tests pin the end-to-end guarantees of the push/mount/edit flow,
//! including what a highlighting surface sees after each display frame.

// ===== Flow Contracts =====
