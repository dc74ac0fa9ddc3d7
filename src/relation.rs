use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

use crate::PROFILE_URL;

/// An account on the other side of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelationEntry {
    /// Account identifier, compared verbatim
    pub login: String,
    /// Profile page, if the api sent one
    #[serde(default)]
    pub html_url: Option<String>,
}

impl RelationEntry {
    /// Constructs a new `RelationEntry` from a login.
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            html_url: None,
        }
    }

    /// Link to the account's profile page.
    pub fn profile_url(&self) -> String {
        match &self.html_url {
            Some(url) => url.clone(),
            None => format!("{}{}", PROFILE_URL, self.login),
        }
    }
}

/// All entries of one relation, in api page order.
pub type RelationList = Vec<RelationEntry>;

/// Kinds of relation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// Accounts following the user
    Followers,
    /// Accounts the user follows
    Following,
}

impl AsRef<str> for RelationKind {
    fn as_ref(&self) -> &str {
        match self {
            Self::Followers => "followers",
            Self::Following => "following",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// Accounts followed by the user that don't follow back, in `following` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NonFollowers(Vec<RelationEntry>);

impl NonFollowers {
    /// Number of non-followers.
    pub fn count(&self) -> usize {
        self.0.len()
    }

    /// Whether everyone follows back.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The entries.
    pub fn entries(&self) -> &[RelationEntry] {
        &self.0
    }

    /// Logins of the entries, mostly handy for display and tests.
    pub fn logins(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.login.as_str())
    }
}

impl IntoIterator for NonFollowers {
    type Item = RelationEntry;
    type IntoIter = std::vec::IntoIter<RelationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Keeps the entries of `following` whose login is absent from `followers`.
pub fn non_followers(
    followers: &[RelationEntry],
    following: impl IntoIterator<Item = RelationEntry>,
) -> NonFollowers {
    let logins: HashSet<&str> = followers.iter().map(|e| e.login.as_str()).collect();
    NonFollowers(
        following
            .into_iter()
            .filter(|e| !logins.contains(e.login.as_str()))
            .collect(),
    )
}
