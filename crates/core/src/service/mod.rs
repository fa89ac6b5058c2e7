//! Loading and publishing the mapping pair of the selected profile.
//!
//! Tables are built off the query path on the blocking pool. The published
//! pair is replaced with one pointer swap, so a reader holding a snapshot
//! keeps seeing a consistent pair while a newer one is being built.

pub mod fetcher;
pub mod profiles;

pub use fetcher::{FsFetcher, MappingFetcher};
pub use profiles::ProfileStore;

use crate::error::{MappingError, Result};
use crate::model::MappingTable;
use crate::parser::{LineSource, ParseOptions, PeekableLines, parse_flat, parse_retrace};
use crate::resolver::Resolver;
use dashmap::DashSet;
use mapscope_api::{LoadStatus, MappingFormat, MappingLifecycle, MappingProfile, MappingSource};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, error, info};

/// Community and canonical tables built from one profile.
#[derive(Debug)]
pub struct MappingPair {
    pub profile: MappingProfile,
    pub community: Arc<MappingTable>,
    pub canonical: Arc<MappingTable>,
}

impl MappingPair {
    pub fn profile_id(&self) -> &str {
        &self.profile.id
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(Some(&self.community), Some(&self.canonical))
    }
}

/// Parse one side of a profile with the parser its format selects.
pub fn load_table(
    fetcher: &dyn MappingFetcher,
    source: &MappingSource,
    options: &ParseOptions,
) -> Result<MappingTable> {
    let started = Instant::now();
    let table = match source.format {
        MappingFormat::Flat => {
            let mut classes = PeekableLines::new(fetcher.open(&source.location)?);
            let mut members = match source.members.as_deref() {
                Some(location) => Some(PeekableLines::new(fetcher.open(location)?)),
                None => None,
            };
            parse_flat(
                &mut classes,
                members.as_mut().map(|m| m as &mut dyn LineSource),
                options,
            )?
        }
        MappingFormat::Retrace => {
            let mut lines = PeekableLines::new(fetcher.open(&source.location)?);
            parse_retrace(&mut lines, options)?
        }
    };
    info!(
        location = %source.location,
        format = %source.format,
        classes = table.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "loaded mapping table"
    );
    Ok(table)
}

/// Build both sides of `profile` on the current thread.
pub fn load_pair(
    fetcher: &dyn MappingFetcher,
    profile: &MappingProfile,
    options: &ParseOptions,
) -> Result<MappingPair> {
    let community = load_table(fetcher, &profile.community, options)?;
    let canonical = load_table(fetcher, &profile.canonical, options)?;
    Ok(MappingPair {
        profile: profile.clone(),
        community: Arc::new(community),
        canonical: Arc::new(canonical),
    })
}

/// Owns the published [`MappingPair`] and the builds that replace it.
///
/// Cloning is cheap; clones share state.
#[derive(Clone)]
pub struct MappingService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    fetcher: Arc<dyn MappingFetcher>,
    runtime: Handle,
    options: ParseOptions,
    current: RwLock<Option<Arc<MappingPair>>>,
    /// Profile asked for most recently. Builds for any other profile finish
    /// without publishing.
    requested: RwLock<Option<MappingProfile>>,
    in_flight: DashSet<String>,
    last_error: RwLock<Option<String>>,
    generation: watch::Sender<u64>,
}

impl MappingService {
    pub fn new(fetcher: Arc<dyn MappingFetcher>, runtime: Handle, options: ParseOptions) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            inner: Arc::new(ServiceInner {
                fetcher,
                runtime,
                options,
                current: RwLock::new(None),
                requested: RwLock::new(None),
                in_flight: DashSet::new(),
                last_error: RwLock::new(None),
                generation,
            }),
        }
    }

    /// The published pair, without waiting for any build.
    pub fn snapshot(&self) -> Option<Arc<MappingPair>> {
        self.inner
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loading(&self, profile_id: &str) -> bool {
        self.inner.in_flight.contains(profile_id)
    }

    /// Message of the most recent failed build, cleared by the next publish.
    pub fn last_error(&self) -> Option<String> {
        self.inner
            .last_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Receiver of the publish generation; it changes whenever the published
    /// pair is replaced or cleared.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.generation.subscribe()
    }

    fn clear(&self) {
        // Lock order: `requested` then `current`, as in `publish`.
        let mut requested = self
            .inner
            .requested
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *requested = None;
        let previous = self
            .inner
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        drop(requested);
        if let Some(previous) = previous {
            info!(profile = %previous.profile_id(), "mapping pair unloaded");
            self.inner.generation.send_modify(|g| *g += 1);
        }
    }
}

impl MappingLifecycle for MappingService {
    fn trigger_load(&self, profile: Option<&MappingProfile>) -> LoadStatus {
        let Some(profile) = profile else {
            self.clear();
            return LoadStatus::Disabled;
        };

        *self
            .inner
            .requested
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(profile.clone());

        if self
            .snapshot()
            .is_some_and(|pair| pair.profile == *profile)
        {
            return LoadStatus::AvailableNow;
        }

        if !self.inner.in_flight.insert(profile.id.clone()) {
            debug!(profile = %profile.id, "mapping build already in flight");
            return LoadStatus::Pending;
        }

        info!(profile = %profile.id, "starting mapping build");
        let inner = Arc::clone(&self.inner);
        let profile = profile.clone();
        self.inner.runtime.spawn(async move {
            inner.build(profile).await;
        });
        LoadStatus::Pending
    }

    fn is_loaded(&self) -> bool {
        self.snapshot().is_some()
    }
}

impl ServiceInner {
    /// Build `profile` and publish it if it is still the requested one.
    ///
    /// The caller has claimed `profile.id` in `in_flight`. If the profile was
    /// re-selected under the same id with different sources while building,
    /// the newer sources are built next, unless a concurrent trigger already
    /// took the id back.
    async fn build(&self, mut profile: MappingProfile) {
        loop {
            self.build_once(profile.clone()).await;
            self.in_flight.remove(&profile.id);

            let Some(next) = self.superseded_by(&profile) else {
                break;
            };
            if !self.in_flight.insert(next.id.clone()) {
                // A trigger that ran after the removal owns the rebuild.
                break;
            }
            info!(profile = %next.id, "profile changed during build; rebuilding");
            profile = next;
        }
    }

    /// The requested profile, if it shares `built`'s id but not its sources
    /// and has not been published.
    fn superseded_by(&self, built: &MappingProfile) -> Option<MappingProfile> {
        let requested = self
            .requested
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()?;
        if requested.id != built.id || requested == *built {
            return None;
        }
        let published = self
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|pair| pair.profile == requested);
        (!published).then_some(requested)
    }

    async fn build_once(&self, profile: MappingProfile) {
        let started = Instant::now();

        let community = self.spawn_table(profile.community.clone());
        let canonical = self.spawn_table(profile.canonical.clone());
        let (community, canonical) = tokio::join!(community, canonical);

        match community.and_then(|c| canonical.map(|k| (c, k))) {
            Ok((community, canonical)) => {
                let pair = MappingPair {
                    profile,
                    community: Arc::new(community),
                    canonical: Arc::new(canonical),
                };
                self.publish(pair, started);
            }
            Err(e) => {
                error!(profile = %profile.id, error = %e, "mapping build failed; keeping previous pair");
                *self
                    .last_error
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = Some(e.to_string());
            }
        }
    }

    async fn spawn_table(&self, source: MappingSource) -> Result<MappingTable> {
        let fetcher = Arc::clone(&self.fetcher);
        let options = self.options;
        tokio::task::spawn_blocking(move || load_table(fetcher.as_ref(), &source, &options))
            .await
            .map_err(|e| MappingError::Internal(e.to_string()))?
    }

    fn publish(&self, pair: MappingPair, started: Instant) {
        // Held until `current` is swapped; `clear` must not interleave.
        let requested = self
            .requested
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if requested.as_ref() != Some(&pair.profile) {
            debug!(profile = %pair.profile_id(), "discarding build for a profile no longer selected");
            return;
        }

        info!(
            profile = %pair.profile_id(),
            community_classes = pair.community.len(),
            canonical_classes = pair.canonical.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "mapping pair published"
        );
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(pair));
        drop(requested);
        *self
            .last_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        self.generation.send_modify(|g| *g += 1);
    }
}
