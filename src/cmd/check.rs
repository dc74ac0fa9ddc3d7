use std::io::Write;
use std::process::ExitCode;

use nonfollow::Checker;
use nonfollow::GithubClient;
use nonfollow::PageSource;
use nonfollow::Terminal;

use super::Context;
use super::Result;

/// Check who doesn't follow `username` back, printing results to stdout and errors to stderr.
pub async fn execute(
    client: GithubClient,
    max_pages: Option<u32>,
    username: &str,
) -> Result<ExitCode> {
    let mut builder = Checker::builder(client, Terminal::stdio());
    builder.with_max_pages(max_pages);
    let checker = builder.build();

    if run(&checker, username).await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Run one check and tell whether it succeeded. A failed check is already rendered, so only
/// output that couldn't be written is an error here.
async fn run<S, O, E>(checker: &Checker<S, Terminal<O, E>>, username: &str) -> Result<bool>
where
    S: PageSource,
    O: Write,
    E: Write,
{
    let res = checker.compute_non_followers(username).await;
    if let Some(e) = checker.renderer().take_error() {
        return Err(e).context("write results");
    }
    Ok(res.is_ok())
}
