//! # Recover Notify
//!
//! The notification service: Postgres webhooks land here (via
//! `net.http_post` triggers) and turn into transactional e-mails sent
//! through the Brevo API. Row lookups go through the injected Supabase
//! client handle, which runs with the service key so row-level security
//! does not hide the profiles being notified.

pub mod mailer;
pub mod payload;
pub mod profiles;
pub mod routes;

pub use mailer::{EmailPayload, Mailer, MailerConfig};
pub use payload::{ItemFoundWebhook, ItemRecord, MessageRecord, MessageWebhook, RecordId};
pub use profiles::Profile;
pub use routes::{NotifyState, create_app};
