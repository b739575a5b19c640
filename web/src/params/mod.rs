//! This module holds typed parameters for various endpoint inputs.
//!
//! Request bodies and query strings are deserialized into these types and then
//! converted into the domain's own request types before any work happens.

pub(crate) mod meeting;
pub(crate) mod oauth;
pub(crate) mod summary;
