// Integration tests for the fetch/decode/save loop, run against a
// local httpmock server instead of the real endpoint. Each test writes
// into its own temporary output folder.

use base64::{engine::general_purpose, Engine as _};
use httpmock::MockServer;
use image::ImageOutputFormat;
use serde_json::json;
use std::io::Cursor;
use std::path::Path;

use digitgen_cli::api::ApiClient;
use digitgen_cli::config::Config;
use digitgen_cli::fetcher::{image_file_name, DigitFetcher};

/// Encode a 28x28 black grayscale PNG, the canvas the prompt asks for.
fn tiny_png_bytes() -> Vec<u8> {
    let img = image::DynamicImage::ImageLuma8(image::GrayImage::from_pixel(
        28,
        28,
        image::Luma([0u8]),
    ));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageOutputFormat::Png).unwrap();
    buf.into_inner()
}

fn tiny_png_base64() -> String {
    general_purpose::STANDARD.encode(tiny_png_bytes())
}

fn fetcher_for(server: &MockServer, output_dir: &Path) -> DigitFetcher {
    let config = Config {
        api_url: server.url("/v1/predict"),
        api_key: "TESTKEY".into(),
        output_dir: output_dir.to_path_buf(),
    };
    let api = ApiClient::new(&config).unwrap();
    DigitFetcher::new(api, config.output_dir)
}

fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[test]
fn successful_batch_saves_all_images() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::POST)
            .path("/v1/predict")
            .query_param("key", "TESTKEY");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "predictions": [{"bytesBase64Encoded": tiny_png_base64()}]
            }));
    });

    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher_for(&server, dir.path());

    let saved = fetcher.fetch_batch(7, 3).unwrap();
    assert_eq!(saved, 3);
    mock.assert_hits(3);

    for i in 1..=3 {
        let path = dir.path().join(image_file_name(7, i));
        assert!(path.exists(), "missing {}", path.display());
        // Each file must be a decodable image.
        image::open(&path).unwrap();
    }
    assert_eq!(file_count(dir.path()), 3);
}

#[test]
fn out_of_range_digit_makes_no_network_calls() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::POST);
        then.status(200);
    });

    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher_for(&server, dir.path());

    let err = fetcher.fetch_batch(12, 5).unwrap_err();
    assert!(err.to_string().contains("between 0 and 9"));
    mock.assert_hits(0);
}

#[test]
fn http_error_aborts_the_remaining_batch() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::POST).path("/v1/predict");
        then.status(500).body("server on fire");
    });

    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher_for(&server, dir.path());

    let err = fetcher.fetch_batch(3, 5).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("500"), "unexpected error: {}", msg);

    // The first failure stops the batch: one call, zero files.
    mock.assert_hits(1);
    assert_eq!(file_count(dir.path()), 0);
}

#[test]
fn malformed_response_aborts_the_remaining_batch() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::POST).path("/v1/predict");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"predictions": [{}]}));
    });

    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher_for(&server, dir.path());

    let err = fetcher.fetch_batch(1, 5).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("did not contain valid image data"), "{}", msg);
    mock.assert_hits(1);
    assert_eq!(file_count(dir.path()), 0);
}

#[test]
fn saved_file_matches_direct_decode() {
    let server = MockServer::start();
    let b64 = tiny_png_base64();
    server.mock(|when, then| {
        when.method(httpmock::Method::POST).path("/v1/predict");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"predictions": [{"bytesBase64Encoded": b64}]}));
    });

    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher_for(&server, dir.path());
    fetcher.fetch_batch(5, 1).unwrap();

    // Decode the same payload directly and re-encode the same way the
    // fetcher does; the bytes on disk must match exactly.
    let raw = general_purpose::STANDARD.decode(&b64).unwrap();
    let img = image::load_from_memory(&raw).unwrap();
    let reference = dir.path().join("reference.png");
    img.save_with_format(&reference, image::ImageFormat::Png)
        .unwrap();

    let saved = std::fs::read(dir.path().join(image_file_name(5, 1))).unwrap();
    let expected = std::fs::read(&reference).unwrap();
    assert_eq!(saved, expected);
}

#[test]
fn output_dir_is_created_once_and_reused() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(httpmock::Method::POST).path("/v1/predict");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "predictions": [{"bytesBase64Encoded": tiny_png_base64()}]
            }));
    });

    let parent = tempfile::tempdir().unwrap();
    let out = parent.path().join("generated_digits");
    assert!(!out.exists());

    let fetcher = fetcher_for(&server, &out);
    fetcher.fetch_batch(2, 1).unwrap();
    assert!(out.exists());

    // Second batch into the existing folder succeeds without error.
    fetcher.fetch_batch(8, 1).unwrap();
    assert!(out.join(image_file_name(2, 1)).exists());
    assert!(out.join(image_file_name(8, 1)).exists());
}
