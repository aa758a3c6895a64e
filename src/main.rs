//! CLI entry point for artigos

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "artigos")]
#[command(version)]
#[command(about = "A small static site generator for a markdown article blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new article
    New {
        /// Title of the new article
        title: String,

        /// Site path of the article (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,

        /// Short summary used in the page metadata
        #[arg(long)]
        description: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local preview server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Remove the public folder
    Clean,

    /// List articles, newest first
    List,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "artigos=debug,info"
    } else {
        "artigos=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            artigos::commands::init::init_site(&target_dir)?;
            println!("Initialized empty site in {:?}", target_dir);
        }

        Commands::New {
            title,
            slug,
            description,
        } => {
            let site = artigos::Site::new(&base_dir)?;
            tracing::info!("Creating new article with title: {}", title);
            artigos::commands::new::create_post(
                &site,
                &title,
                slug.as_deref(),
                description.as_deref(),
            )?;
        }

        Commands::Generate { watch } => {
            let site = artigos::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");

            let report = site.generate()?;

            if watch {
                tokio::task::spawn_blocking(move || {
                    artigos::commands::generate::watch(&site, |_| {})
                })
                .await??;
            } else if !report.is_success() {
                anyhow::bail!("{} page(s) or file(s) failed", report.failures.len());
            }
            println!("Generated successfully!");
        }

        Commands::Server {
            port,
            ip,
            r#static,
        } => {
            let site = artigos::Site::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            let report = site.generate()?;
            if !report.is_success() {
                tracing::warn!("{} page(s) failed, serving the rest", report.failures.len());
            }

            tracing::info!("Starting server at http://{}:{}", ip, port);
            artigos::server::start(&site, &ip, port, !r#static).await?;
        }

        Commands::Clean => {
            let site = artigos::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List => {
            let site = artigos::Site::new(&base_dir)?;
            artigos::commands::list::run(&site)?;
        }

        Commands::Version => {
            println!("artigos version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
