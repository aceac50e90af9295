//! Profile lookups through the Supabase handle.

use recover_core::{RecoverError, Result};
use recover_supabase::SupabaseClient;
use serde::Deserialize;

/// The columns the notification mails need from `profiles`.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Fetch a profile row by id. `Ok(None)` when no row matches.
pub async fn fetch_profile(client: &SupabaseClient, id: &str) -> Result<Option<Profile>> {
    let response = client
        .from("profiles")
        .select("email,name")
        .eq("id", id)
        .limit(1)
        .execute()
        .await
        .map_err(|e| RecoverError::Database(format!("profile lookup failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RecoverError::Database(format!("profile lookup returned {}: {}", status, body)));
    }

    let body = response
        .text()
        .await
        .map_err(|e| RecoverError::Database(format!("profile lookup read failed: {}", e)))?;
    let rows: Vec<Profile> = serde_json::from_str(&body)?;

    Ok(rows.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_tolerates_missing_columns() {
        let profile: Profile = serde_json::from_str(r#"{"email": "ana@example.com"}"#).unwrap();
        assert_eq!(profile.email.as_deref(), Some("ana@example.com"));
        assert!(profile.name.is_none());

        let profile: Profile = serde_json::from_str(r#"{}"#).unwrap();
        assert!(profile.email.is_none());
    }
}
