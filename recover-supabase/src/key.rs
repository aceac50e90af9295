//! API key selection.
//!
//! Supabase issues two credentials: a service-role key that bypasses
//! row-level security and an anonymous key that is subject to it. The
//! service key wins whenever it is set and non-empty; choosing it is a
//! deliberate privilege escalation for trusted server-side use.

/// Which credential category a client handle was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// Service-role key: row-level security is bypassed.
    Service,
    /// Anonymous key: row-level security applies.
    Anon,
}

impl KeyRole {
    /// Short lowercase label for log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyRole::Service => "service",
            KeyRole::Anon => "anon",
        }
    }
}

/// Select the effective API key.
///
/// Prefers the service key whenever it is present and non-empty, regardless
/// of the anon key's value. Otherwise falls back to the anon key, even when
/// that value is itself absent or empty; any failure from an unusable
/// selection is deferred to client construction.
///
/// Pure function of its two inputs, performs no I/O and no validation.
pub fn select_key<'a>(
    service_key: Option<&'a str>,
    anon_key: Option<&'a str>,
) -> (Option<&'a str>, KeyRole) {
    match service_key {
        Some(key) if !key.is_empty() => (Some(key), KeyRole::Service),
        _ => (anon_key, KeyRole::Anon),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_key_wins_when_set() {
        let (key, role) = select_key(Some("svc123"), Some("anon456"));
        assert_eq!(key, Some("svc123"));
        assert_eq!(role, KeyRole::Service);
    }

    #[test]
    fn test_service_key_wins_without_anon_key() {
        let (key, role) = select_key(Some("svc123"), None);
        assert_eq!(key, Some("svc123"));
        assert_eq!(role, KeyRole::Service);
    }

    #[test]
    fn test_empty_service_key_falls_back_to_anon() {
        let (key, role) = select_key(Some(""), Some("anon456"));
        assert_eq!(key, Some("anon456"));
        assert_eq!(role, KeyRole::Anon);
    }

    #[test]
    fn test_absent_service_key_falls_back_to_anon() {
        let (key, role) = select_key(None, Some("anon456"));
        assert_eq!(key, Some("anon456"));
        assert_eq!(role, KeyRole::Anon);
    }

    #[test]
    fn test_both_absent_selects_nothing() {
        let (key, role) = select_key(None, None);
        assert_eq!(key, None);
        assert_eq!(role, KeyRole::Anon);
    }

    #[test]
    fn test_fallback_keeps_empty_anon_key() {
        let (key, role) = select_key(None, Some(""));
        assert_eq!(key, Some(""));
        assert_eq!(role, KeyRole::Anon);
    }

    #[test]
    fn test_selection_is_idempotent() {
        let first = select_key(Some("svc123"), Some("anon456"));
        let second = select_key(Some("svc123"), Some("anon456"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_key_role_labels() {
        assert_eq!(KeyRole::Service.as_str(), "service");
        assert_eq!(KeyRole::Anon.as_str(), "anon");
    }
}
