//! # Recover Supabase
//!
//! Configuration loading and client-handle construction for the Supabase
//! backend. The handle is built once at startup and shared read-only by
//! injection; the PostgREST transport itself is owned by the `postgrest`
//! crate and is not reproduced here.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use recover_supabase::{SupabaseClient, SupabaseSettings};
//!
//! let settings = SupabaseSettings::load();
//! let _client = SupabaseClient::connect(&settings)?;
//! # Ok::<(), recover_core::RecoverError>(())
//! ```

pub mod client;
pub mod key;
pub mod settings;

pub use client::SupabaseClient;
pub use key::{KeyRole, select_key};
pub use settings::SupabaseSettings;
