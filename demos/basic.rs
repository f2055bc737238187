//! Basic example demonstrating the Perma API client.
//!
//! Run with:
//! ```
//! PERMA_API_KEY=your-key cargo run --example basic
//! ```

use permapi::{CreateArchiveOptions, Pagination, PermaClient};

#[tokio::main]
async fn main() -> permapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Perma client...");
    let client = PermaClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // Who owns this API key?
    let user = client.pull_user().await?;
    println!("\n--- Account ---");
    println!("{} {} (#{})", user.first_name, user.last_name, user.id);
    println!("Top-level folders: {}", user.top_level_folders.len());

    // List the first page of the user's archives
    println!("\n--- Archives (first page) ---");
    let archives = client.pull_archives(Pagination::new(10, 0), None).await?;
    println!(
        "Showing {} of {} archives",
        archives.len(),
        archives.meta.total_count
    );
    for archive in &archives {
        let title = archive.title.as_deref().unwrap_or("(untitled)");
        println!("  - {} {} -> {}", archive.guid, title, archive.url);
    }

    // Capture a page into the first top-level folder, if there is one
    if let Some(folder) = user.top_level_folders.first() {
        println!("\n--- Creating an archive in '{}' ---", folder.name);
        let options = CreateArchiveOptions {
            parent_folder_id: Some(folder.id),
            ..Default::default()
        };
        let archive = client
            .create_archive("https://example.com", &options)
            .await?;
        println!("Created {}", archive.guid);

        // Track the asynchronous capture job
        let job = client.pull_archive_capture_job(&archive.guid).await?;
        println!("Capture job status: {:?}", job.status);

        // Clean up, waiting for in-flight captures first
        println!("Deleting {} (safe mode)...", archive.guid);
        client.delete_archive(&archive.guid, true).await?;
        println!("Deleted.");
    }

    println!("\nDone!");
    Ok(())
}
