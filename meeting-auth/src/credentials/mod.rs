//! OAuth client credentials.

mod client_secrets;

pub use client_secrets::{ClientSecrets, DEFAULT_AUTH_URI, DEFAULT_TOKEN_URI};
