//! Shared helpers for the afix backend test suites.
//!
//! Holds the logging bootstrap used by both unit and integration tests, the
//! Problem Details assertions for error responses, and unique test data
//! generators.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
