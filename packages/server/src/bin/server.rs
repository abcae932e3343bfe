use clap::Parser;
use metanord_server::{serve, ServerOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// MetaNord page-builder content server
#[derive(Parser, Debug)]
#[command(name = "metanord-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding one JSON file per page
    #[arg(default_value = "pages")]
    pages_dir: PathBuf,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// HTTP port
    #[arg(short, long, default_value = "3030")]
    port: u16,

    /// Language used for page summaries
    #[arg(long, default_value = "en")]
    default_language: String,

    /// Do not reload pages edited on disk
    #[arg(long)]
    no_watch: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    serve(ServerOptions {
        pages_dir: args.pages_dir,
        host: args.host,
        port: args.port,
        default_language: args.default_language,
        watch: !args.no_watch,
    })
    .await
}
