use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use metanord_server::ServerOptions;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Do not reload pages edited on disk
    #[arg(long)]
    pub no_watch: bool,
}

pub fn serve(args: ServeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let options = ServerOptions {
        pages_dir: config.get_pages_dir(cwd),
        host: args.host.unwrap_or(config.host),
        port: args.port.unwrap_or(config.port),
        default_language: config.default_language,
        watch: !args.no_watch,
    };

    println!("{}", "🚀 Starting MetaNord server...".bright_blue().bold());
    println!("   Pages: {}", options.pages_dir.display());
    println!(
        "   URL:   {}",
        format!("http://{}:{}/api/pages", options.host, options.port).cyan()
    );
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(metanord_server::serve(options))
}
