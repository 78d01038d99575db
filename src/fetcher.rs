// Fetcher module: the core fetch/decode/save loop. One call to
// `fetch_batch` turns a digit into up to `count` PNG files in the
// output folder, requesting one image per HTTP call.
//
// Failure policy is all-or-nothing per batch: the first failure of any
// kind (transport error, HTTP error status, malformed response, bad
// image data, write error) aborts the remaining images. Files already
// saved stay on disk. There are no retries.

use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use image::ImageFormat;
use std::fs;
use std::path::PathBuf;

use crate::api::ApiClient;

/// Number of images generated per user request.
pub const BATCH_SIZE: u32 = 5;

/// Fetches generated digit images and persists them as PNG files.
pub struct DigitFetcher {
    api: ApiClient,
    output_dir: PathBuf,
}

/// Prompt template asking for an MNIST-style rendition of `digit`.
/// Deterministic: the same digit always produces the same prompt.
pub fn digit_prompt(digit: u8) -> String {
    format!(
        "A single handwritten digit '{digit}', centered. The style is exactly like the \
         MNIST dataset: a 28x28 grayscale image with a black background (value 0) and \
         white foreground (the digit, value 255). The digit should be clear and distinct."
    )
}

/// File name for the `index`-th image of `digit` (1-based index).
/// Collisions across runs are possible; files are silently overwritten.
pub fn image_file_name(digit: u8, index: u32) -> String {
    format!("digit_{digit}_image_{index}.png")
}

impl DigitFetcher {
    pub fn new(api: ApiClient, output_dir: impl Into<PathBuf>) -> Self {
        DigitFetcher {
            api,
            output_dir: output_dir.into(),
        }
    }

    /// Folder the fetcher writes into.
    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    /// Generate and save `count` images of `digit`. Returns the number
    /// of files written on full success.
    ///
    /// Out-of-range digits are rejected before any network call. A
    /// directory-creation failure also aborts before the first call.
    /// After that, the first per-image failure aborts the remaining
    /// batch: an error after k successes leaves exactly k files.
    pub fn fetch_batch(&self, digit: u8, count: u32) -> Result<usize> {
        if digit > 9 {
            anyhow::bail!("Digit must be between 0 and 9, got {}", digit);
        }

        // Reuses the folder on later runs without complaint.
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Creating output directory '{}'", self.output_dir.display())
        })?;

        let prompt = digit_prompt(digit);
        println!("\nGenerating {} images for the digit '{}'...", count, digit);

        for i in 1..=count {
            println!("  - Generating image {}/{}...", i, count);
            let path = self
                .fetch_one(&prompt, digit, i)
                .with_context(|| format!("Image {}/{} failed", i, count))?;
            println!("    -> Saved to '{}'", path.display());
        }
        Ok(count as usize)
    }

    /// One request/decode/save round trip. Assumes the output directory
    /// exists. Returns the path of the written file.
    fn fetch_one(&self, prompt: &str, digit: u8, index: u32) -> Result<PathBuf> {
        let resp = self.api.predict(prompt)?;
        let b64 = resp
            .predictions
            .first()
            .and_then(|p| p.bytes_base64_encoded.as_deref())
            .context("The API response did not contain valid image data")?;
        let raw = general_purpose::STANDARD
            .decode(b64)
            .context("Decoding base64 image data")?;
        let img = image::load_from_memory(&raw).context("Decoding image bytes")?;

        let path = self.output_dir.join(image_file_name(digit, index));
        img.save_with_format(&path, ImageFormat::Png)
            .with_context(|| format!("Writing '{}'", path.display()))?;
        Ok(path)
    }
}
