use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use nonfollow::GithubClient;

mod cli;
mod cmd;

use cli::{Args, Cmd};

#[tokio::main(flavor = "current_thread")]
async fn main() -> cmd::Result<ExitCode> {
    let Args {
        token,
        api_url,
        max_pages,
        timeout,
        verbose,
        cmd: command,
    } = Args::parse();

    // Configure logging, RUST_LOG wins over --verbose
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // Configure api client
    let client = GithubClient::builder()
        .api_url(&api_url)
        .token(token)
        .timeout(Duration::from_secs(timeout))
        .build()?;
    log::debug!("using api at {}", client.base_url());

    match command {
        Cmd::Check { username } => {
            let username = cmd::username(username)?;
            cmd::check::execute(client, max_pages, &username).await
        }
        Cmd::List { username, kind } => {
            let username = cmd::username(username)?;
            cmd::list::execute(&client, max_pages, &username, kind.into()).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
