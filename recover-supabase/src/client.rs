//! Supabase client handle.

use crate::key::{KeyRole, select_key};
use crate::settings::SupabaseSettings;
use postgrest::Postgrest;
use recover_core::{RecoverError, Result};
use tracing::info;

/// An authenticated PostgREST handle for the Supabase project.
///
/// Constructed once at startup and shared read-only afterwards; consumers
/// receive it by injection (e.g. axum state behind an `Arc`) rather than
/// through a process-wide global. Transport, serialization and auth headers
/// past construction are owned by the `postgrest` crate.
pub struct SupabaseClient {
    postgrest: Postgrest,
    rest_url: String,
    role: KeyRole,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("rest_url", &self.rest_url)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl SupabaseClient {
    /// Build the client handle from settings.
    ///
    /// Fails fast with [`RecoverError::Config`] when the URL is missing or
    /// when neither key is available, so a misconfigured deployment dies at
    /// startup instead of on the first request. Key and URL FORMAT are not
    /// validated here; that stays with the SDK.
    ///
    /// Emits exactly one info log line naming the selected key role. The
    /// key value itself is never logged.
    pub fn connect(settings: &SupabaseSettings) -> Result<Self> {
        let url = settings
            .url
            .as_deref()
            .ok_or_else(|| RecoverError::Config("SUPABASE_URL is not set".to_string()))?;

        let (selected, role) =
            select_key(settings.service_key.as_deref(), settings.anon_key.as_deref());
        let key = selected.ok_or_else(|| {
            RecoverError::Config(
                "no Supabase API key available: set SUPABASE_SERVICE_KEY or SUPABASE_KEY"
                    .to_string(),
            )
        })?;

        match role {
            KeyRole::Service => {
                info!("Supabase client: using service key (row-level security bypassed)")
            }
            KeyRole::Anon => {
                info!("Supabase client: service key not set, using anon key (row-level security applies)")
            }
        }

        let rest_url = format!("{}/rest/v1", url.trim_end_matches('/'));
        let postgrest = Postgrest::new(rest_url.clone())
            .insert_header("apikey", key)
            .insert_header("authorization", format!("Bearer {}", key));

        Ok(Self { postgrest, rest_url, role })
    }

    /// Start a PostgREST request against the given table.
    pub fn from(&self, table: impl AsRef<str>) -> postgrest::Builder {
        self.postgrest.from(table)
    }

    /// The PostgREST endpoint this handle talks to.
    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    /// Which key category the handle was built with.
    pub fn role(&self) -> KeyRole {
        self.role
    }
}
