//! Meeting assistant domain: Google authorization, meeting scheduling and
//! transcript summarization, plus the gateways they call.
//!
//! `web` depends on this crate only; types it needs from `meeting_auth` and
//! `meeting_ai` are re-exported here so it never names those crates directly.

pub use meeting_ai::traits::summarization::Provider as SummaryProvider;
pub use meeting_auth::oauth::token::{InMemoryStorage, Manager};

/// The credential store shared by every request.
pub type CredentialManager = Manager<InMemoryStorage>;

pub mod authorization;
pub mod error;
pub mod meeting;
pub mod summary;

pub mod gateway;
