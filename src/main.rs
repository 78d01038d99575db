// Entrypoint for the CLI application.
// - Keeps `main` small: resolve config, create an API client and a
//   fetcher, and hand everything to the prompt loop.
// - Returns `anyhow::Result` to simplify error handling.

use digitgen_cli::{api::ApiClient, config::Config, fetcher::DigitFetcher, ui::prompt_loop};

fn main() -> anyhow::Result<()> {
    // Endpoint URL, API key and output folder come from environment
    // variables with defaults. See `config::Config::from_env`.
    let config = Config::from_env();
    let api = ApiClient::new(&config)?;
    let fetcher = DigitFetcher::new(api, config.output_dir);

    // Start the interactive prompt. This call blocks until the user quits.
    prompt_loop(&fetcher)?;
    Ok(())
}
