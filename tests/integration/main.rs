//! Host-side integration test suite.
//!
//! Drives the control service synchronously through mock adapters, so
//! every scenario is deterministic: one `tick()` call stands in for one
//! timer period of the real control loop.

mod control_tests;
