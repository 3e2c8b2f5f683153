//! Shared test utilities and fixtures
//!
//! Common helpers to reduce duplication and keep tests robust against
//! payload shape changes.
