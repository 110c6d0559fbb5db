//! The crawler implementation
//!
//! Drives the recursive traversal: fetch the root listing, then depth-first
//! visit every same-host directory reference exactly once, merging all
//! discovered items into one aggregate result.

use std::collections::HashSet;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::protocol::{Item, ItemFactory, ItemSet, ListingParser};
use crate::session::GopherSession;
use crate::storage::{CaptureStore, ROOT_CAPTURE};

/// Recursive gopher crawler bound to one origin server.
///
/// Traversal is strictly sequential: one listing fetch completes before the
/// next begins. Cross-host directories are recorded as references but never
/// traversed; looping selectors are refused before any fetch.
pub struct Crawler {
    host: String,
    session: GopherSession,
    captures: CaptureStore,
    factory: ItemFactory,
}

impl Crawler {
    /// Create a crawler for the given origin, saving listing captures under
    /// `capture_dir`
    pub fn new(host: impl Into<String>, port: u16, capture_dir: impl Into<PathBuf>) -> Self {
        let host = host.into();
        Self {
            session: GopherSession::new(host.clone(), port),
            captures: CaptureStore::new(capture_dir),
            factory: ItemFactory::new(),
            host,
        }
    }

    /// The origin host this crawl is restricted to
    pub fn origin_host(&self) -> &str {
        &self.host
    }

    /// Crawl the origin server and return the aggregate item set.
    ///
    /// Returns `Ok(None)` when the root listing yields no items. Any
    /// transport error anywhere in the traversal aborts the whole crawl;
    /// captures already written stay on disk.
    pub async fn crawl(&mut self) -> Result<Option<ItemSet>> {
        info!("Starting crawl of {}", self.session.addr());

        let lines = self.session.fetch_listing("", true).await?;
        self.captures.record(ROOT_CAPTURE, &lines).await?;

        let Some(mut items) = ListingParser::parse(&lines, &mut self.factory) else {
            info!("Root listing of {} yielded no items", self.host);
            return Ok(None);
        };

        let mut visited: HashSet<Item> = HashSet::new();
        let mut collected = Vec::new();
        for dir in items.directory_items.clone() {
            if let Some(found) = self.visit(dir, &mut visited).await? {
                collected.push(found);
            }
        }
        items.merge(collected);

        info!(
            "Crawl of {} finished: {} directories visited, {} items discovered",
            self.host,
            visited.len(),
            items.len()
        );
        Ok(Some(items))
    }

    /// Visit one directory reference, returning the items found beneath it.
    ///
    /// Returns `Ok(None)` without fetching for loops, already-visited
    /// directories (by the identity rule) and cross-host references, and for
    /// directories whose listing yields no items. The visited set is an
    /// explicit accumulator shared across the whole traversal.
    fn visit<'a>(
        &'a mut self,
        dir: Item,
        visited: &'a mut HashSet<Item>,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ItemSet>>> + Send + 'a>> {
        Box::pin(async move {
            if dir.is_loop() {
                warn!("Refusing looping directory selector {:?}", dir.selector);
                return Ok(None);
            }
            if visited.contains(&dir) {
                debug!("Already visited directory {:?}", dir.selector);
                return Ok(None);
            }
            visited.insert(dir.clone());

            if dir.is_external(&self.host) {
                debug!(
                    "Recording external directory {:?} on {} without traversing",
                    dir.selector, dir.host
                );
                return Ok(None);
            }

            info!("Exploring directory {:?}", dir.selector);
            let lines = self.session.fetch_listing(&dir.selector, true).await?;
            self.captures.record(&dir.capture_name(), &lines).await?;

            let Some(mut found) = ListingParser::parse(&lines, &mut self.factory) else {
                debug!("Directory {:?} is empty", dir.selector);
                return Ok(None);
            };

            let mut collected = Vec::new();
            for next in found.directory_items.clone() {
                if let Some(sub) = self.visit(next, &mut *visited).await? {
                    collected.push(sub);
                }
            }
            found.merge(collected);

            Ok(Some(found))
        })
    }
}
