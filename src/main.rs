mod importer;

use crate::importer::cli::{Cli, Settings};
use crate::importer::client::HttpClient;
use crate::importer::prompt::TerminalPrompter;
use crate::importer::upload::print_summary;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // 解析命令行参数
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run_importer(cli.into_settings()).await {
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_importer(settings: Settings) -> Result<(), anyhow::Error> {
    let api = HttpClient::new(&settings.searchie_url);
    let mut prompter = TerminalPrompter::stdio();

    let report = importer::run(&settings, &api, &mut prompter).await?;
    print_summary(&report);
    Ok(())
}
