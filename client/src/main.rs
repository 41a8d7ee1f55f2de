//! Shelf - manage a book collection against a REST backend.
//!
//! Every invocation loads the collection (falling back to demo data when the
//! backend is down), applies one command, and prints the resulting page.

use clap::{Parser, Subcommand};
use shelf_client::{render, Config, Error, Frame};
use shelf_engine::{BookId, SortKey};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Book manager with offline fallback.
#[derive(Parser)]
#[command(name = "shelf", version, about = "Manage books against a REST backend")]
struct Cli {
    /// Backend base URL.
    #[arg(long, global = true, env = "SHELF_API_BASE")]
    api_base: Option<String>,

    /// Only show books whose title or author contains this text.
    #[arg(long, short, global = true)]
    query: Option<String>,

    /// Sort order: id|title|author followed by -asc or -desc.
    #[arg(long, short, global = true, default_value = "id-desc")]
    sort: SortKey,

    /// Page to show.
    #[arg(long, short, global = true, default_value_t = 1)]
    page: u32,

    /// Books per page.
    #[arg(long, global = true, env = "SHELF_PAGE_SIZE")]
    per_page: Option<u32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List books (default).
    List,

    /// Add a book.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
    },

    /// Edit a book. Omitted fields keep their current value.
    Edit {
        id: BookId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
    },

    /// Delete a book.
    Delete {
        id: BookId,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing on stderr so stdout carries only the rendered view
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelf=info,shelf_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(api_base) = &cli.api_base {
        config = config.with_api_base(api_base)?;
    }
    if let Some(per_page) = cli.per_page {
        config.page_size = per_page.max(1);
    }

    tracing::debug!("Using backend at {}", config.api_base);

    match run(cli, &config).await {
        Ok(frame) => {
            print!("{}", render::render_frame(&frame));
            Ok(())
        }
        Err(e) => {
            if let Some(fields) = e.field_errors() {
                eprint!("{}", render::field_errors(fields));
                std::process::exit(2);
            }
            Err(e.into())
        }
    }
}

async fn run(cli: Cli, config: &Config) -> Result<Frame, Error> {
    let mut controller = shelf_client::connect(config)?;

    let loading = controller.mark_loading();
    if let Some(status) = &loading.status {
        eprintln!("{}", status.message);
    }
    controller.load().await;

    if let Some(query) = &cli.query {
        controller.search(query);
    }
    controller.set_sort(cli.sort);
    controller.set_page(cli.page);

    let frame = match cli.command.unwrap_or(Commands::List) {
        Commands::List => controller.frame(),
        Commands::Add { title, author } => controller.request_create(&title, &author).await?,
        Commands::Edit { id, title, author } => {
            let current = controller.book(id).cloned().ok_or(Error::NotFound(id))?;
            let title = title.unwrap_or(current.title);
            let author = author.unwrap_or(current.author);
            controller.request_update(id, &title, &author).await?
        }
        Commands::Delete { id, yes } => {
            let book = controller.book(id).cloned().ok_or(Error::NotFound(id))?;
            if !yes {
                println!("{}", render::delete_prompt(&book));
                println!("Re-run with --yes to confirm.");
                return Ok(controller.frame());
            }
            controller.request_delete(id).await
        }
    };

    Ok(frame)
}
