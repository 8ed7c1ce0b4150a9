//! Test helpers for generating unique test data
//!
//! ULID suffixes keep concurrently running tests from colliding on user names.

use ulid::Ulid;

/// Generate a unique user name with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_user_name;
///
/// let a = unique_user_name("alice");
/// let b = unique_user_name("alice");
/// assert_ne!(a, b);
/// assert!(a.starts_with("alice-"));
/// ```
pub fn unique_user_name(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new().to_string().to_lowercase())
}

/// Generate a unique password
pub fn unique_password() -> String {
    format!("pw-{}", Ulid::new())
}
