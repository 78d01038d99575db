// Configuration module: gathers the endpoint URL, API key and output
// folder into one struct instead of scattering globals around. Values
// are read from environment variables with defaults so the binary runs
// out of the box (apart from the API key, which has no useful default).

use std::path::PathBuf;
use std::time::Duration;

/// Default image generation endpoint (Google Imagen `:predict` shape).
pub const DEFAULT_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/imagen-3.0-generate-002:predict";

/// Default folder where generated images are written, relative to the
/// working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "generated_digits";

/// How long one generation request may take before the client gives up.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Runtime configuration for the digit generator.
#[derive(Clone, Debug)]
pub struct Config {
    /// Full URL of the `:predict` endpoint.
    pub api_url: String,
    /// API key, sent as the `key` query parameter. May be empty, in
    /// which case the remote end will reject requests.
    pub api_key: String,
    /// Folder the PNG files are written into.
    pub output_dir: PathBuf,
}

impl Config {
    /// Build a Config from the environment:
    /// - `DIGITGEN_API_URL` overrides the endpoint URL,
    /// - `DIGITGEN_API_KEY` supplies the key (empty if unset),
    /// - `DIGITGEN_OUTPUT_DIR` overrides the output folder.
    pub fn from_env() -> Self {
        let api_url =
            std::env::var("DIGITGEN_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let api_key = std::env::var("DIGITGEN_API_KEY").unwrap_or_default();
        let output_dir = std::env::var("DIGITGEN_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR));
        Config {
            api_url,
            api_key,
            output_dir,
        }
    }
}
