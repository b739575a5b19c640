use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::ffi::OsString;

/// Default Google Calendar API base URL used when `GOOGLE_CALENDAR_BASE_URL` is not set.
pub const DEFAULT_GOOGLE_CALENDAR_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Default hosted summarization model endpoint.
pub const DEFAULT_HUGGINGFACE_API_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Path to the Google OAuth client secrets file downloaded from the Cloud console.
    #[arg(long, env, default_value = "credentials.json")]
    client_secrets_file: String,

    /// OAuth scopes requested from Google.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        default_value = "https://www.googleapis.com/auth/calendar"
    )]
    google_scopes: Vec<String>,

    /// The redirect URI Google sends the user back to after consent.
    #[arg(long, env, default_value = "http://localhost:8000/oauth2callback")]
    google_redirect_uri: String,

    /// Where the browser lands after a successful OAuth callback.
    #[arg(long, env, default_value = "http://localhost:3001")]
    google_oauth_success_redirect_uri: String,

    /// The base URL of the Google Calendar API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_GOOGLE_CALENDAR_BASE_URL)]
    google_calendar_base_url: String,

    /// The calendar new meetings are created in.
    #[arg(long, env, default_value = "primary")]
    google_calendar_id: String,

    /// The API key to use when calling the Hugging Face Inference API.
    #[arg(long, env)]
    huggingface_api_key: Option<String>,

    /// The summarization model endpoint.
    #[arg(long, env, default_value = DEFAULT_HUGGINGFACE_API_URL)]
    huggingface_api_url: String,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "0.0.0.0")]
    pub interface: String,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 8000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        ignore_case = true,
    )]
    pub log_level_filter: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Parse an explicit argument list instead of the process arguments.
    /// Environment variables still act as fallbacks, `.env` is not read.
    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Config::try_parse_from(args)
    }

    pub fn client_secrets_file(&self) -> &str {
        &self.client_secrets_file
    }

    pub fn set_client_secrets_file(mut self, path: impl Into<String>) -> Self {
        self.client_secrets_file = path.into();
        self
    }

    pub fn google_scopes(&self) -> Vec<String> {
        self.google_scopes.clone()
    }

    pub fn google_redirect_uri(&self) -> &str {
        &self.google_redirect_uri
    }

    /// Returns the front-end URL the OAuth callback redirects to.
    pub fn google_oauth_success_redirect_uri(&self) -> &str {
        &self.google_oauth_success_redirect_uri
    }

    /// Returns the Google Calendar API base URL.
    pub fn google_calendar_base_url(&self) -> &str {
        &self.google_calendar_base_url
    }

    pub fn set_google_calendar_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.google_calendar_base_url = base_url.into();
        self
    }

    pub fn google_calendar_id(&self) -> &str {
        &self.google_calendar_id
    }

    /// Returns the Hugging Face API key, if configured.
    pub fn huggingface_api_key(&self) -> Option<String> {
        self.huggingface_api_key.clone()
    }

    pub fn huggingface_api_url(&self) -> &str {
        &self.huggingface_api_url
    }
}
