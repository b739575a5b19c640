use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters Google appends when redirecting back after consent.
#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct CallbackParams {
    /// Authorization code, present when consent was granted.
    pub(crate) code: Option<String>,
    /// Error code, present when consent was not granted (e.g. `access_denied`).
    pub(crate) error: Option<String>,
    pub(crate) state: Option<String>,
}
