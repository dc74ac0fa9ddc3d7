use async_trait::async_trait;
use log::debug;

use crate::Error;
use crate::RelationEntry;
use crate::RelationKind;
use crate::RelationList;

/// Source of relation pages, indexed from 1.
#[async_trait]
pub trait PageSource {
    /// Get one page of `kind` relations for `username`. An empty page marks the end of the list.
    async fn page(
        &self,
        username: &str,
        kind: RelationKind,
        page: u32,
    ) -> Result<Vec<RelationEntry>, Error>;
}

/// Fetch every page of `kind` relations for `username`, stopping at the first empty page.
///
/// Any failed page aborts the whole fetch. With `max_pages` set, a non-empty page past the
/// ceiling fails with [`Error::PageLimit`], otherwise pages are requested until the source
/// runs dry.
pub async fn fetch_all_relations<S: PageSource + ?Sized>(
    source: &S,
    username: &str,
    kind: RelationKind,
    max_pages: Option<u32>,
) -> Result<RelationList, Error> {
    let mut ret = RelationList::new();
    let mut page = 1;

    loop {
        let entries = source.page(username, kind, page).await?;
        debug!("{username} {kind} page {page}: {} entries", entries.len());
        if entries.is_empty() {
            break;
        }
        if let Some(limit) = max_pages.filter(|&limit| page > limit) {
            return Err(Error::PageLimit { kind, limit });
        }
        ret.extend(entries);
        page += 1;
    }

    Ok(ret)
}
