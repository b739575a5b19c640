//! # meeting-auth
//!
//! Single source of truth for authentication in the meeting assistant:
//! - Bearer token authentication for hosted model providers (Hugging Face)
//! - OAuth 2.0 authorization-code flow against Google
//! - Client secrets loading (Google's `credentials.json` format)
//! - Single-tenant credential storage and token refresh
//!
//! ## Architecture
//!
//! This crate provides the authentication foundation that other crates build upon:
//! - `domain` drives the OAuth flow and reads stored credentials for calendar calls
//! - `domain` gateways use bearer auth for the summarization host
//!
//! ## Usage
//!
//! ```rust,ignore
//! use meeting_auth::{
//!     api_key::{ApiKeyProvider, BearerTokenAuth, ProviderAuth},
//!     credentials::ClientSecrets,
//!     oauth::{providers::google, token::{InMemoryStorage, Manager}},
//! };
//! ```

pub mod api_key;
pub mod credentials;
pub mod error;
pub mod oauth;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
