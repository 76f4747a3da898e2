//! Interactive unified search against a running meridian-api instance.
//!
//! Usage: cargo run --example search_repl -- http://localhost:8000

use std::io::{self, BufRead, Write};
use std::time::Instant;

use meridian_client::{ApiClient, SearchController, UnifiedSearch, DEBOUNCE};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8000".to_string());

    let client = ApiClient::new(&base_url)?;
    let mut controller = SearchController::new(UnifiedSearch::default());

    let stdin = io::stdin();
    print!("search> ");
    io::stdout().flush()?;

    for line in stdin.lock().lines() {
        controller.set_query(line?.trim(), Instant::now());

        // A line-based REPL has no keystroke stream, so just wait out the
        // debounce window before polling.
        tokio::time::sleep(DEBOUNCE).await;
        if let Some(request) = controller.poll(Instant::now()) {
            let seq = request.seq;
            let outcome = client.fetch(&request).await.map_err(|e| e.to_string());
            controller.apply(seq, outcome);
        }

        if let Some(error) = controller.error() {
            println!("error: {error}");
        } else if let Some(message) = controller.message() {
            println!("{message}");
        } else {
            println!(
                "{} results (page {}/{})",
                controller.total(),
                controller.page(),
                controller.total_pages()
            );
            for hit in controller.results() {
                let tag = hit
                    .kind
                    .map(|kind| kind.to_string())
                    .unwrap_or_else(|| "?".to_string());
                println!("  [{tag}] {} (score {})", hit.title, hit.score.unwrap_or(0));
            }
        }

        print!("search> ");
        io::stdout().flush()?;
    }

    Ok(())
}
