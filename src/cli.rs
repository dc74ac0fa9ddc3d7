use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

use nonfollow::RelationKind;

/// Nonfollow - Who doesn't follow you back on GitHub.
#[derive(Parser)]
#[clap(author, version, about)]
pub struct Args {
    /// GitHub token, raises the api rate limit
    #[clap(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
    /// Api base url
    #[clap(long, env = "GITHUB_API_URL", default_value = nonfollow::API_URL)]
    pub api_url: String,
    /// Stop with an error after this many pages of a relation list
    #[clap(long, env = "NONFOLLOW_MAX_PAGES")]
    pub max_pages: Option<u32>,
    /// Request timeout in seconds
    #[clap(long, env = "NONFOLLOW_TIMEOUT", default_value_t = crate::cmd::TIMEOUT.as_secs())]
    pub timeout: u64,
    /// Log debug messages
    #[clap(long, short = 'v')]
    pub verbose: bool,
    #[clap(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// List the accounts you follow that don't follow you back.
    Check {
        /// GitHub username, prompted for if missing
        username: Option<String>,
    },
    /// List all followers or all followed accounts.
    List {
        /// GitHub username, prompted for if missing
        username: Option<String>,
        /// Relation to list
        #[clap(long, short = 'k', value_enum, default_value_t = Kind::Followers)]
        kind: Kind,
    },
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum Kind {
    /// Accounts following the user
    Followers,
    /// Accounts the user follows
    Following,
}

impl From<Kind> for RelationKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Followers => RelationKind::Followers,
            Kind::Following => RelationKind::Following,
        }
    }
}
