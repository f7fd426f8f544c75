use std::process::ExitCode;

use clap::Parser;
use portal_cli::{Config, ConfigOverrides, PortalCli, init_tracing, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = PortalCli::parse();
    let config = Config::from_env(&ConfigOverrides {
        base_url: cli.base_url,
        token_path: cli.token_path,
    })?;
    init_tracing(&config.log_filter);

    let status = run(cli.command, &config, std::io::stdout().lock()).await?;
    Ok(status.into())
}
