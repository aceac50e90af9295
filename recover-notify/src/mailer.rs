//! Brevo transactional mail client.

use recover_core::{RecoverError, Result};
use serde::Serialize;
use tracing::debug;

pub const BREVO_API_BASE: &str = "https://api.brevo.com";

const DEFAULT_SENDER_NAME: &str = "Recover";

/// Configuration for the Brevo transactional API.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// Brevo API key (`SMTP_USERNAME`).
    pub api_key: String,
    /// Sender address (`SMTP_SENDER_EMAIL`).
    pub sender_email: String,
    /// Sender display name (`SMTP_SENDER_NAME`, default "Recover").
    pub sender_name: String,
    /// Optional API base override, used by tests.
    pub base_url: Option<String>,
}

impl MailerConfig {
    /// Create a config with the given API key and sender address.
    pub fn new(api_key: impl Into<String>, sender_email: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            sender_email: sender_email.into(),
            sender_name: DEFAULT_SENDER_NAME.to_string(),
            base_url: None,
        }
    }

    /// Read the mailer configuration from the environment.
    ///
    /// Fails with [`RecoverError::Config`] when the API key or sender
    /// address is missing, mirroring the "configuration is incomplete"
    /// check the edge functions perform.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("SMTP_USERNAME")
            .map_err(|_| RecoverError::Config("SMTP_USERNAME is not set".to_string()))?;
        let sender_email = std::env::var("SMTP_SENDER_EMAIL")
            .map_err(|_| RecoverError::Config("SMTP_SENDER_EMAIL is not set".to_string()))?;
        let sender_name =
            std::env::var("SMTP_SENDER_NAME").unwrap_or_else(|_| DEFAULT_SENDER_NAME.to_string());

        Ok(Self { api_key, sender_email, sender_name, base_url: None })
    }

    /// Set the sender display name.
    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = name.into();
        self
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// An outgoing e-mail.
#[derive(Debug, Clone)]
pub struct EmailPayload {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    sender: Party<'a>,
    to: Vec<Address<'a>>,
    subject: &'a str,
    #[serde(rename = "textContent")]
    text_content: &'a str,
    #[serde(rename = "htmlContent", skip_serializing_if = "Option::is_none")]
    html_content: Option<&'a str>,
}

#[derive(Serialize)]
struct Party<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
}

/// Client for Brevo's transactional e-mail endpoint.
pub struct Mailer {
    client: reqwest::Client,
    config: MailerConfig,
}

impl Mailer {
    /// Create a mailer from a config.
    pub fn new(config: MailerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| RecoverError::Mail(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create a mailer from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(MailerConfig::from_env()?)
    }

    fn api_url(&self) -> String {
        let base = self.config.base_url.as_deref().unwrap_or(BREVO_API_BASE);
        format!("{}/v3/smtp/email", base.trim_end_matches('/'))
    }

    /// Send one e-mail. Non-success responses surface as [`RecoverError::Mail`]
    /// with the status and the API's error body.
    pub async fn send(&self, payload: &EmailPayload) -> Result<()> {
        let request = SendRequest {
            sender: Party { name: &self.config.sender_name, email: &self.config.sender_email },
            to: vec![Address { email: &payload.to }],
            subject: &payload.subject,
            text_content: &payload.text,
            html_content: payload.html.as_deref(),
        };

        let response = self
            .client
            .post(self.api_url())
            .header("api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| RecoverError::Mail(format!("Brevo request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RecoverError::Mail(format!("Brevo API error ({}): {}", status, error_text)));
        }

        debug!(subject = %payload.subject, "notification e-mail sent");
        Ok(())
    }
}
