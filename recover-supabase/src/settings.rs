//! Supabase connection settings.

/// Connection settings read from the process environment.
///
/// All three values are optional at this stage; presence is only enforced
/// when the client handle is constructed.
#[derive(Debug, Clone, Default)]
pub struct SupabaseSettings {
    /// Base project URL (`SUPABASE_URL`).
    pub url: Option<String>,
    /// Anonymous key, subject to row-level security (`SUPABASE_KEY`).
    pub anon_key: Option<String>,
    /// Service-role key, bypasses row-level security (`SUPABASE_SERVICE_KEY`).
    pub service_key: Option<String>,
}

impl SupabaseSettings {
    /// Read settings from the process environment without touching `.env`.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("SUPABASE_URL").ok(),
            anon_key: std::env::var("SUPABASE_KEY").ok(),
            service_key: std::env::var("SUPABASE_SERVICE_KEY").ok(),
        }
    }

    /// Load a `.env` file if one exists, then read the environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Set the project URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the anonymous key.
    pub fn with_anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Set the service-role key.
    pub fn with_service_key(mut self, key: impl Into<String>) -> Self {
        self.service_key = Some(key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment mutation is process-global; serialize the tests that touch it.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_builder_setters() {
        let settings = SupabaseSettings::default()
            .with_url("https://proj.supabase.co")
            .with_anon_key("anon456")
            .with_service_key("svc123");

        assert_eq!(settings.url.as_deref(), Some("https://proj.supabase.co"));
        assert_eq!(settings.anon_key.as_deref(), Some("anon456"));
        assert_eq!(settings.service_key.as_deref(), Some("svc123"));
    }

    #[test]
    fn test_default_is_all_unset() {
        let settings = SupabaseSettings::default();
        assert!(settings.url.is_none());
        assert!(settings.anon_key.is_none());
        assert!(settings.service_key.is_none());
    }

    #[test]
    fn test_from_env_reads_all_three() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("SUPABASE_URL", "https://proj.supabase.co");
            std::env::set_var("SUPABASE_KEY", "anon456");
            std::env::set_var("SUPABASE_SERVICE_KEY", "svc123");
        }

        let settings = SupabaseSettings::from_env();
        assert_eq!(settings.url.as_deref(), Some("https://proj.supabase.co"));
        assert_eq!(settings.anon_key.as_deref(), Some("anon456"));
        assert_eq!(settings.service_key.as_deref(), Some("svc123"));

        unsafe {
            std::env::remove_var("SUPABASE_URL");
            std::env::remove_var("SUPABASE_KEY");
            std::env::remove_var("SUPABASE_SERVICE_KEY");
        }

        let settings = SupabaseSettings::from_env();
        assert!(settings.url.is_none());
        assert!(settings.anon_key.is_none());
        assert!(settings.service_key.is_none());
    }
}
