//! Integration and property tests for the Evidentia workspace.
//!
//! All tests live under `tests/`; this crate intentionally exports nothing.
