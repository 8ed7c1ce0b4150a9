//! Backend test support utilities
//!
//! Shared helpers for the backend's unit and integration tests: idempotent
//! logging initialization, Problem Details assertions and unique test data.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;

pub use problem_details::{assert_problem_details, ProblemDetailsLike};
pub use unique_helpers::{unique_password, unique_user_name};
