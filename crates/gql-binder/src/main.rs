use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use gql_binder::bindings::bind_all;
use gql_binder::operations::Catalog;
use gql_binder::runtime::{self, DocumentSource};
use gql_binder::tokens::TokenStore;
use tracing::{info, warn};

/// Clap styling
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Arguments to the binder
#[derive(Debug, clap::Parser)]
#[command(
    styles = STYLES,
    about = "gql-binder - resolve GraphQL operation documents to typed client bindings",
)]
struct Args {
    /// The path to the YAML configuration file
    #[arg(long, short = 'c', env = "GQL_BINDER_CONFIG")]
    config: Option<PathBuf>,

    /// Operation document files or directories to scan, overriding the config
    #[arg(long = "documents", short = 'd', num_args = 0..)]
    documents: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => runtime::read_config(path)?,
        None => runtime::read_config_from_env()?,
    };

    let _logging_guard = runtime::setup_logging(&config.logging)?;

    let clients = config.client_set()?;
    let store = TokenStore::init(&clients, None);
    for client in clients.iter() {
        if let Some(state) = store.state(&client.name) {
            info!(
                "Client {} ({}): token {:?}",
                client.name,
                client.host,
                state.source()
            );
        }
    }

    if !config.codegen.enabled {
        info!("Code generation is disabled; skipping document scan");
        return Ok(());
    }

    let paths = if args.documents.is_empty() {
        config.documents.clone()
    } else {
        args.documents
    };
    if paths.is_empty() {
        bail!("No document paths were provided: pass --documents or set them in the config");
    }

    let documents = DocumentSource::new(paths).load()?;
    let catalog = Catalog::collect(documents)?;
    if catalog.skipped_anonymous() > 0 {
        warn!(
            "{} anonymous operation(s) were skipped; name them to generate bindings",
            catalog.skipped_anonymous()
        );
    }

    let bindings = bind_all(catalog, &clients, &config.codegen.prefix)?;
    info!("Generated {} binding(s)", bindings.len());

    serde_json::to_writer_pretty(std::io::stdout().lock(), &bindings)?;
    println!();

    Ok(())
}
