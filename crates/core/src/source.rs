//! Hot-swappable refreshing index source.
//!
//! Owns the background refresh loop: on each tick it asks the injected
//! [`IndexBuilder`] for a fresh [`PrefixIndex`] and atomically publishes
//! it. Readers always observe either the previous good snapshot or the
//! fully-built new one, never a partial state; pre-first-success they
//! observe `None`.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use log::{debug, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::errors::BuildError;
use crate::index::PrefixIndex;
use crate::provider::IndexBuilder;

/// Refresh scheduling configuration.
///
/// On success the loop waits `refresh_interval` before the next rebuild;
/// after a failure it reattempts every `retry_interval` until a build
/// succeeds, then resumes the refresh cadence.
#[derive(Clone, Copy, Debug)]
pub struct RefreshConfig {
    /// Delay between rebuilds after a successful build.
    pub refresh_interval: Duration,
    /// Delay before reattempting after a failed build.
    pub retry_interval: Duration,
}

impl Default for RefreshConfig {
    /// Fallback cadence matching the upstream defaults: rebuild every
    /// 8 hours, retry failed builds every minute.
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(8 * 60 * 60),
            retry_interval: Duration::from_secs(60),
        }
    }
}

/// Publishes the most recently built [`PrefixIndex`] and keeps it fresh.
///
/// The only shared mutable state is the published-snapshot slot and the
/// last-error slot; both are replaced wholesale through an atomic swap,
/// so the read path never takes a lock and never waits on an in-flight
/// build.
pub struct RefreshingSource {
    builder: Arc<dyn IndexBuilder>,
    config: RefreshConfig,
    current: ArcSwapOption<PrefixIndex>,
    last_error: ArcSwapOption<BuildError>,
}

impl RefreshingSource {
    /// Create a source with no snapshot published yet.
    ///
    /// Nothing is scheduled until
    /// [`spawn_refresh_loop`](Self::spawn_refresh_loop) is called; a
    /// one-off [`refresh`](Self::refresh) also works without the loop.
    pub fn new(builder: Arc<dyn IndexBuilder>, config: RefreshConfig) -> Arc<Self> {
        Arc::new(Self {
            builder,
            config,
            current: ArcSwapOption::const_empty(),
            last_error: ArcSwapOption::const_empty(),
        })
    }

    /// The currently published snapshot, or `None` before the first
    /// successful build. Non-blocking; safe for unbounded concurrent
    /// callers.
    pub fn current(&self) -> Option<Arc<PrefixIndex>> {
        self.current.load_full()
    }

    /// The most recent build failure, or `None` if the most recent
    /// attempt succeeded.
    pub fn last_error(&self) -> Option<Arc<BuildError>> {
        self.last_error.load_full()
    }

    /// Perform one build-and-publish attempt outside the scheduled
    /// cadence.
    ///
    /// On success the new snapshot replaces the published one and the
    /// last error is cleared. On failure the published snapshot is left
    /// untouched and the failure is recorded. Concurrent manual and
    /// scheduled refreshes both publish through the same atomic swap;
    /// the last publish wins.
    pub async fn refresh(&self) -> Result<(), Arc<BuildError>> {
        match self.builder.build_index().await {
            Ok(index) => {
                debug!("published fresh index ({} records)", index.len());
                self.current.store(Some(Arc::new(index)));
                self.last_error.store(None);
                Ok(())
            }
            Err(err) => {
                let err = Arc::new(err);
                self.last_error.store(Some(Arc::clone(&err)));
                Err(err)
            }
        }
    }

    /// Spawn the long-lived refresh loop.
    ///
    /// Builds immediately, then sleeps `refresh_interval` after each
    /// success and `retry_interval` after each failure. The loop exits
    /// when `shutdown` flips to `true` or its sender is dropped, so the
    /// task can be torn down deterministically at process shutdown.
    pub fn spawn_refresh_loop(
        self: &Arc<Self>,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let source = Arc::clone(self);
        tokio::spawn(async move {
            debug!(
                "refresh loop started (refresh every {:?}, retry every {:?})",
                source.config.refresh_interval, source.config.retry_interval
            );
            loop {
                if *shutdown.borrow() {
                    break;
                }
                let delay = match source.refresh().await {
                    Ok(()) => source.config.refresh_interval,
                    Err(err) => {
                        warn!("index refresh failed: {err}");
                        source.config.retry_interval
                    }
                };
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }
            debug!("refresh loop stopped");
        })
    }

    /// Start a source with its refresh loop already running.
    ///
    /// Convenience wiring for the common case; returns the source and a
    /// [`SourceTask`] handle used to stop the loop.
    pub fn start(builder: Arc<dyn IndexBuilder>, config: RefreshConfig) -> (Arc<Self>, SourceTask) {
        let source = Self::new(builder, config);
        let (stop, shutdown) = watch::channel(false);
        let handle = source.spawn_refresh_loop(shutdown);
        (source, SourceTask { stop, handle })
    }
}

/// Handle to a running refresh loop.
pub struct SourceTask {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl SourceTask {
    /// Signal the loop to stop and wait for the task to finish.
    pub async fn stop(self) {
        // The receiver may already be gone if the task exited on its own.
        let _ = self.stop.send(true);
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::index::DEFAULT_FIELDS;
    use crate::models::Record;

    /// Builder scripted with a per-call outcome; `true` builds the fixed
    /// record set, `false` fails. Calls past the script reuse its last
    /// entry.
    struct ScriptedBuilder {
        outcomes: Vec<bool>,
        calls: AtomicUsize,
    }

    impl ScriptedBuilder {
        fn new(outcomes: &[bool]) -> Arc<Self> {
            Arc::new(Self {
                outcomes: outcomes.to_vec(),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IndexBuilder for ScriptedBuilder {
        async fn build_index(&self) -> Result<PrefixIndex, BuildError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let ok = *self
                .outcomes
                .get(call)
                .or(self.outcomes.last())
                .unwrap_or(&true);
            if ok {
                PrefixIndex::build(
                    vec![Record::new("AAPL", "Apple Inc"), Record::new("A", "Agilent")],
                    DEFAULT_FIELDS,
                )
            } else {
                Err(BuildError::Fetch(crate::errors::FetchError::new(
                    anyhow::anyhow!("scripted failure"),
                )))
            }
        }
    }

    fn quick_config() -> RefreshConfig {
        RefreshConfig {
            refresh_interval: Duration::from_secs(3600),
            retry_interval: Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn test_uninitialized_source_has_no_snapshot() {
        let source = RefreshingSource::new(ScriptedBuilder::new(&[true]), quick_config());
        assert!(source.current().is_none());
        assert!(source.last_error().is_none());
    }

    #[tokio::test]
    async fn test_refresh_publishes_snapshot() {
        let builder = ScriptedBuilder::new(&[true]);
        let source = RefreshingSource::new(Arc::clone(&builder) as Arc<dyn IndexBuilder>, quick_config());

        source.refresh().await.unwrap();

        let snapshot = source.current().expect("snapshot after successful refresh");
        assert_eq!(snapshot.get_all().len(), 2);
        assert_eq!(builder.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_old_snapshot_and_records_error() {
        let builder = ScriptedBuilder::new(&[true, false, true]);
        let source = RefreshingSource::new(Arc::clone(&builder) as Arc<dyn IndexBuilder>, quick_config());

        source.refresh().await.unwrap();
        let first = source.current().unwrap();

        // Failure: snapshot untouched, error recorded.
        source.refresh().await.unwrap_err();
        let after_failure = source.current().unwrap();
        assert!(Arc::ptr_eq(&first, &after_failure));
        assert!(source.last_error().is_some());

        // Next success clears the error and swaps the snapshot.
        source.refresh().await.unwrap();
        assert!(source.last_error().is_none());
        assert!(!Arc::ptr_eq(&first, &source.current().unwrap()));
    }

    #[tokio::test]
    async fn test_failure_before_first_success_stays_uninitialized() {
        let source = RefreshingSource::new(ScriptedBuilder::new(&[false]), quick_config());
        source.refresh().await.unwrap_err();
        assert!(source.current().is_none());
        assert!(source.last_error().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_retries_until_success_then_resumes_cadence() {
        // Fail, fail, succeed with a 1s retry interval: after a few
        // virtual seconds the source is Ready with a clear last error,
        // and the next attempt is an hour out.
        let builder = ScriptedBuilder::new(&[false, false, true]);
        let source = RefreshingSource::new(Arc::clone(&builder) as Arc<dyn IndexBuilder>, quick_config());

        let (stop, shutdown) = watch::channel(false);
        let handle = source.spawn_refresh_loop(shutdown);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(builder.calls(), 3);
        assert!(source.current().is_some());
        assert!(source.last_error().is_none());

        stop.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_refreshes_on_schedule() {
        let builder = ScriptedBuilder::new(&[true]);
        let config = RefreshConfig {
            refresh_interval: Duration::from_secs(60),
            retry_interval: Duration::from_secs(1),
        };
        let source = RefreshingSource::new(Arc::clone(&builder) as Arc<dyn IndexBuilder>, config);

        let (stop, shutdown) = watch::channel(false);
        let handle = source.spawn_refresh_loop(shutdown);

        tokio::time::sleep(Duration::from_secs(150)).await;
        // Immediate build plus one per elapsed refresh interval.
        assert_eq!(builder.calls(), 3);

        stop.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_interrupts_sleep() {
        let builder = ScriptedBuilder::new(&[true]);
        let (source, task) = RefreshingSource::start(Arc::clone(&builder) as Arc<dyn IndexBuilder>, quick_config());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(source.current().is_some());

        // The loop is asleep for an hour; stop() must not wait it out.
        task.stop().await;
        assert_eq!(builder.calls(), 1);
    }
}
