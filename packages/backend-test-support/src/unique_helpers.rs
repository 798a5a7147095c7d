//! Unique player data so tests sharing a store never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}` for display names.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("player");
/// assert!(a.starts_with("player-"));
/// assert_ne!(a, unique_str("player"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Lowercase `{prefix}-{ulid}@example.test`, already in the stored form.
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("ada");
/// assert!(email.ends_with("@example.test"));
/// assert_eq!(email, email.to_lowercase());
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new()).to_lowercase()
}
