mod common;

use mapscope_api::{LoadStatus, MappingLifecycle, MappingProfile, MappingSource};
use mapscope_core::{FsFetcher, MappingFetcher, MappingService, ParseOptions};
use std::io::BufRead;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;

fn profile(id: &str, canonical: &str) -> MappingProfile {
    MappingProfile::new(
        id,
        MappingSource::flat("classes.csrg", Some("members.csrg".to_string())),
        MappingSource::retrace(canonical),
    )
}

fn service(dir: &Path) -> MappingService {
    MappingService::new(
        Arc::new(FsFetcher::with_base_dir(dir)),
        Handle::current(),
        ParseOptions::default(),
    )
}

/// File fetcher whose opens block until `release` is called.
struct GatedFetcher {
    files: FsFetcher,
    opened: AtomicUsize,
    open: Mutex<bool>,
    released: Condvar,
}

impl GatedFetcher {
    fn new(dir: &Path) -> Arc<Self> {
        Arc::new(Self {
            files: FsFetcher::with_base_dir(dir),
            opened: AtomicUsize::new(0),
            open: Mutex::new(false),
            released: Condvar::new(),
        })
    }

    fn release(&self) {
        *self.open.lock().unwrap() = true;
        self.released.notify_all();
    }

    fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

impl MappingFetcher for GatedFetcher {
    fn open(&self, location: &str) -> mapscope_core::Result<Box<dyn BufRead + Send>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        let mut open = self.open.lock().unwrap();
        while !*open {
            open = self.released.wait(open).unwrap();
        }
        drop(open);
        self.files.open(location)
    }
}

fn gated_service(fetcher: &Arc<GatedFetcher>) -> MappingService {
    MappingService::new(
        Arc::clone(fetcher) as Arc<dyn MappingFetcher>,
        Handle::current(),
        ParseOptions::default(),
    )
}

async fn wait_idle(service: &MappingService, id: &str) {
    tokio::time::timeout(Duration::from_secs(10), async {
        while service.is_loading(id) {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("build did not finish");
}

#[tokio::test]
async fn test_load_publishes_pair() {
    let dir = tempfile::tempdir().unwrap();
    common::write_fixture(dir.path());
    let service = service(dir.path());
    let mut published = service.subscribe();
    let profile = profile("fixture", "server.txt");

    assert!(!service.is_loaded());
    assert_eq!(service.trigger_load(Some(&profile)), LoadStatus::Pending);

    tokio::time::timeout(Duration::from_secs(10), published.changed())
        .await
        .expect("no publish")
        .unwrap();

    let pair = service.snapshot().unwrap();
    assert_eq!(pair.profile_id(), "fixture");
    assert_eq!(pair.community.len(), 4);
    assert_eq!(
        pair.resolver().class_name("net.minecraft.server.Block"),
        Some("net.minecraft.world.level.block.Block")
    );
    assert_eq!(service.trigger_load(Some(&profile)), LoadStatus::AvailableNow);
    assert!(service.last_error().is_none());
}

#[tokio::test]
async fn test_failed_build_keeps_previous_pair() {
    let dir = tempfile::tempdir().unwrap();
    common::write_fixture(dir.path());
    let service = service(dir.path());
    let mut published = service.subscribe();

    let good = profile("good", "server.txt");
    service.trigger_load(Some(&good));
    tokio::time::timeout(Duration::from_secs(10), published.changed())
        .await
        .expect("no publish")
        .unwrap();

    let broken = profile("broken", "missing.txt");
    assert_eq!(service.trigger_load(Some(&broken)), LoadStatus::Pending);
    wait_idle(&service, "broken").await;

    assert!(service.last_error().is_some());
    let pair = service.snapshot().unwrap();
    assert_eq!(pair.profile_id(), "good");
    assert_eq!(service.trigger_load(Some(&broken)), LoadStatus::Pending);
}

#[tokio::test]
async fn test_no_profile_disables_and_clears() {
    let dir = tempfile::tempdir().unwrap();
    common::write_fixture(dir.path());
    let service = service(dir.path());
    let mut published = service.subscribe();

    service.trigger_load(Some(&profile("fixture", "server.txt")));
    tokio::time::timeout(Duration::from_secs(10), published.changed())
        .await
        .expect("no publish")
        .unwrap();
    assert!(service.is_loaded());

    assert_eq!(service.trigger_load(None), LoadStatus::Disabled);
    assert!(!service.is_loaded());
    assert!(service.snapshot().is_none());
}

#[tokio::test]
async fn test_snapshot_survives_replacement() {
    let dir = tempfile::tempdir().unwrap();
    common::write_fixture(dir.path());
    common::write(
        dir.path(),
        "server-v2.txt",
        "net.minecraft.world.level.block.BaseBlock -> a:\n",
    );
    let service = service(dir.path());
    let mut published = service.subscribe();

    service.trigger_load(Some(&profile("v1", "server.txt")));
    tokio::time::timeout(Duration::from_secs(10), published.changed())
        .await
        .expect("no publish")
        .unwrap();
    let old = service.snapshot().unwrap();

    service.trigger_load(Some(&profile("v2", "server-v2.txt")));
    tokio::time::timeout(Duration::from_secs(10), published.changed())
        .await
        .expect("no publish")
        .unwrap();
    let new = service.snapshot().unwrap();

    assert_eq!(
        old.resolver().class_name("net.minecraft.server.Block"),
        Some("net.minecraft.world.level.block.Block")
    );
    assert_eq!(
        new.resolver().class_name("net.minecraft.server.Block"),
        Some("net.minecraft.world.level.block.BaseBlock")
    );
}

#[tokio::test]
async fn test_repeated_trigger_runs_one_build() {
    let dir = tempfile::tempdir().unwrap();
    common::write_fixture(dir.path());
    let fetcher = GatedFetcher::new(dir.path());
    let service = gated_service(&fetcher);
    let mut published = service.subscribe();
    let profile = profile("fixture", "server.txt");

    assert_eq!(service.trigger_load(Some(&profile)), LoadStatus::Pending);
    assert_eq!(service.trigger_load(Some(&profile)), LoadStatus::Pending);
    assert!(service.is_loading("fixture"));

    fetcher.release();
    tokio::time::timeout(Duration::from_secs(10), published.changed())
        .await
        .expect("no publish")
        .unwrap();
    wait_idle(&service, "fixture").await;

    // One build opens the class list, the member list and the canonical file.
    assert_eq!(fetcher.opened(), 3);
    assert_eq!(*published.borrow_and_update(), 1);
    assert!(!published.has_changed().unwrap());
    assert_eq!(service.trigger_load(Some(&profile)), LoadStatus::AvailableNow);
}

#[tokio::test]
async fn test_reselected_profile_with_new_sources_is_built() {
    let dir = tempfile::tempdir().unwrap();
    common::write_fixture(dir.path());
    common::write(
        dir.path(),
        "server-v2.txt",
        "net.minecraft.world.level.block.BaseBlock -> a:\n",
    );
    let fetcher = GatedFetcher::new(dir.path());
    let service = gated_service(&fetcher);
    let mut published = service.subscribe();

    let first = profile("p", "server.txt");
    let second = profile("p", "server-v2.txt");
    assert_eq!(service.trigger_load(Some(&first)), LoadStatus::Pending);
    assert_eq!(service.trigger_load(Some(&second)), LoadStatus::Pending);

    fetcher.release();
    tokio::time::timeout(Duration::from_secs(10), published.changed())
        .await
        .expect("no publish")
        .unwrap();
    wait_idle(&service, "p").await;

    let pair = service.snapshot().unwrap();
    assert_eq!(pair.profile, second);
    assert_eq!(
        pair.resolver().class_name("net.minecraft.server.Block"),
        Some("net.minecraft.world.level.block.BaseBlock")
    );
    assert_eq!(*published.borrow_and_update(), 1);
    assert!(service.last_error().is_none());
}

#[tokio::test]
async fn test_unload_during_build_stays_unloaded() {
    let dir = tempfile::tempdir().unwrap();
    common::write_fixture(dir.path());
    let fetcher = GatedFetcher::new(dir.path());
    let service = gated_service(&fetcher);

    let profile = profile("fixture", "server.txt");
    assert_eq!(service.trigger_load(Some(&profile)), LoadStatus::Pending);
    assert_eq!(service.trigger_load(None), LoadStatus::Disabled);

    fetcher.release();
    wait_idle(&service, "fixture").await;

    assert!(!service.is_loaded());
    assert!(service.snapshot().is_none());
}
