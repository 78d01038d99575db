// API client module: contains a small blocking HTTP client that talks to
// the image generation endpoint. It is intentionally small and
// synchronous; one POST produces one image, and batching is done by the
// caller through repeated calls.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::{Config, REQUEST_TIMEOUT};

/// Simple API client that holds a reqwest blocking client, the endpoint
/// URL and the API key sent as a query parameter.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    api_url: String,
    api_key: String,
}

/// Outgoing request body. Field names mirror the wire format expected
/// by the `:predict` endpoint.
#[derive(Serialize, Debug)]
pub struct PredictRequest {
    pub instances: Vec<Instance>,
    pub parameters: Parameters,
}

/// One prompt per instance; we always send exactly one.
#[derive(Serialize, Debug)]
pub struct Instance {
    pub prompt: String,
}

#[derive(Serialize, Debug)]
pub struct Parameters {
    #[serde(rename = "sampleCount")]
    pub sample_count: u32,
}

/// Expected response from the predict endpoint. `predictions` defaults
/// to empty and the base64 field is optional so a structurally odd
/// response parses and is rejected by the caller with a clear message
/// instead of a serde error.
#[derive(Deserialize, Debug, Default)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

/// One entry in the response's predictions list, expected to carry a
/// base64-encoded image.
#[derive(Deserialize, Debug)]
pub struct Prediction {
    #[serde(rename = "bytesBase64Encoded")]
    pub bytes_base64_encoded: Option<String>,
}

impl ApiClient {
    /// Create an ApiClient from the resolved configuration. The request
    /// timeout is set on the client so every call is bounded.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Request a single generated image for `prompt` by POSTing to the
    /// predict endpoint. Returns the parsed response on success, or an
    /// error carrying the HTTP status and server body on failure.
    pub fn predict(&self, prompt: &str) -> Result<PredictResponse> {
        let url = format!("{}?key={}", &self.api_url, &self.api_key);
        let body = PredictRequest {
            instances: vec![Instance {
                prompt: prompt.to_string(),
            }],
            parameters: Parameters { sample_count: 1 },
        };
        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .context("Failed to send predict request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Predict failed: {} - {}", status, txt);
        }
        // Read the body as text first so a malformed payload can be
        // echoed back in the error message.
        let txt = res.text().context("Reading predict response body")?;
        let resp: PredictResponse = serde_json::from_str(&txt)
            .with_context(|| format!("Parsing predict response json: {}", txt))?;
        Ok(resp)
    }
}
