use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use log::{debug, error, info};

use crate::fetch_all_relations;
use crate::non_followers;
use crate::Error;
use crate::NonFollowers;
use crate::PageSource;
use crate::RelationKind;
use crate::Render;

/// Runs non-follower checks, one at a time.
#[derive(Debug)]
pub struct Checker<S, R> {
    // where relation pages come from
    source: S,
    // where state changes go
    renderer: R,
    // optional page ceiling per relation list
    max_pages: Option<u32>,
    // set while a check is in flight
    busy: AtomicBool,
    // last successful result
    last: Mutex<Option<NonFollowers>>,
}

impl<S: PageSource, R: Render> Checker<S, R> {
    /// Build a Checker from parts.
    ///
    /// See [`CheckerBuilder`].
    pub fn builder(source: S, renderer: R) -> CheckerBuilder<S, R> {
        CheckerBuilder {
            source,
            renderer,
            max_pages: None,
        }
    }

    /// Whether a check is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// The result of the last successful check, if any.
    pub fn last_result(&self) -> Option<NonFollowers> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get a reference to the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Take back the renderer.
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Find the accounts `username` follows that don't follow back, and render them.
    ///
    /// Returns `Ok(None)` without doing anything if another check is still in flight. On
    /// failure the error is rendered and returned, and the previous result is kept.
    pub async fn compute_non_followers(
        &self,
        username: &str,
    ) -> Result<Option<NonFollowers>, Error> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("check already in flight, ignoring request for {username}");
            return Ok(None);
        }
        let _busy = BusyGuard {
            flag: &self.busy,
            renderer: &self.renderer,
        };

        self.renderer.loading(true);
        self.renderer.error("");
        info!("checking non-followers of {username}");

        match self.fetch_non_followers(username).await {
            Ok(result) => {
                info!("{username}: {} non-followers", result.count());
                self.renderer.results(&result);
                *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(result.clone());
                Ok(Some(result))
            }
            Err(e) => {
                error!("{e}");
                self.renderer.error(&e.to_string());
                Err(e)
            }
        }
    }

    async fn fetch_non_followers(&self, username: &str) -> Result<NonFollowers, Error> {
        let followers =
            fetch_all_relations(&self.source, username, RelationKind::Followers, self.max_pages)
                .await?;
        let following =
            fetch_all_relations(&self.source, username, RelationKind::Following, self.max_pages)
                .await?;
        debug!(
            "{username}: {} followers, {} following",
            followers.len(),
            following.len()
        );
        Ok(non_followers(&followers, following))
    }
}

/// Clears the busy flag and the loading state on every exit path of a check.
struct BusyGuard<'a, R: Render> {
    flag: &'a AtomicBool,
    renderer: &'a R,
}

impl<R: Render> Drop for BusyGuard<'_, R> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        self.renderer.loading(false);
    }
}

/// Builder.
#[derive(Debug)]
pub struct CheckerBuilder<S, R> {
    source: S,
    renderer: R,
    max_pages: Option<u32>,
}

impl<S: PageSource, R: Render> CheckerBuilder<S, R> {
    /// Setter for the page ceiling. `None` fetches until the api runs out of pages.
    pub fn with_max_pages(&mut self, max_pages: Option<u32>) -> &mut Self {
        self.max_pages = max_pages;
        self
    }

    /// Finish building and return a new Checker.
    pub fn build(self) -> Checker<S, R> {
        Checker {
            source: self.source,
            renderer: self.renderer,
            max_pages: self.max_pages,
            busy: AtomicBool::new(false),
            last: Mutex::new(None),
        }
    }
}
