// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive digit
// generator.
//
// Module responsibilities:
// - `config`: Resolves endpoint URL, API key and output folder from
//   environment variables with sensible defaults.
// - `api`: Encapsulates the blocking HTTP interaction with the image
//   generation endpoint (request/response payload types included).
// - `fetcher`: The fetch/decode/save loop that turns one user request
//   into a batch of PNG files on disk.
// - `ui`: Implements the terminal prompt loop and delegates to `fetcher`.
//
// Keeping this separation makes it easier to test the fetch logic
// against a mock server without driving a terminal.
pub mod api;
pub mod config;
pub mod fetcher;
pub mod ui;
