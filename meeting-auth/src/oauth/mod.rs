//! OAuth 2.0 authentication infrastructure.
//!
//! Provides the authorization-code flow against the calendar provider and the
//! single-tenant credential store that holds its result.

mod provider;

pub mod providers;
pub mod token;

pub use provider::{AuthorizationRequest, Provider, ProviderKind};
