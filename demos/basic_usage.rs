//! Basic usage example for the docs-query library.
//!
//! This example demonstrates how to compose documents feed URIs from filters.

use docs_query::config::get_config;
use docs_query::{DocumentsQuery, QueryParameters};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = get_config();
    let feed = &config.feed.base_uri;

    // Search a folder for an exact title, first page of 25
    let mut query = DocumentsQuery::with_limits(None, 1, 25);
    query.set_folder_id(Some("0B1234"));
    query.set_title(Some("Annual Report"), true);
    println!("Folder search:\n  {}\n", query.compose_uri(feed));

    // Documents shared with particular people
    let mut shared = DocumentsQuery::new(Some("budget"));
    shared.add_collaborator("alice@example.com")?;
    shared.add_reader("bob@example.com")?;
    shared.add_reader("carol@example.com")?;
    shared.set_show_folders(true);
    println!("Shared search:\n  {}\n", shared.compose_uri(feed));

    // A single entry ignores collection filters
    shared.base_mut().set_entry_id(Some("document:abc123"));
    println!("Single entry:\n  {}", shared.compose_uri(feed));

    Ok(())
}
