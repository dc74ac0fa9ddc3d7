use std::io::{self, Write};

use nonfollow::fetch_all_relations;
use nonfollow::GithubClient;
use nonfollow::RelationEntry;
use nonfollow::RelationKind;

use super::Context;
use super::Result;

/// Fetch one relation list of `username` and print it with its count.
pub async fn execute(
    client: &GithubClient,
    max_pages: Option<u32>,
    username: &str,
    kind: RelationKind,
) -> Result<()> {
    let list = fetch_all_relations(client, username, kind, max_pages)
        .await
        .with_context(|| format!("list {kind} of {username}"))?;

    print_list(io::stdout().lock(), kind, &list).context("write list")?;

    Ok(())
}

fn print_list(mut out: impl Write, kind: RelationKind, list: &[RelationEntry]) -> io::Result<()> {
    for entry in list {
        writeln!(out, "@{}  {}", entry.login, entry.profile_url())?;
    }
    writeln!(out, "{}: {}", capitalize(kind.as_ref()), list.len())?;
    out.flush()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
