use crate::api::PriceSource;
use crate::config::Config;
use crate::models::{PriceSample, PriceState};
use crate::render::{self, RenderOutput};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, error, info, warn};

/// Owns the tokio task driving the periodic fetch schedule. Created by
/// [`PriceTracker::activate`], released by [`PriceTracker::deactivate`].
pub struct SubscriptionHandle {
    timer_task: JoinHandle<()>,
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.timer_task.abort();
    }
}

/// Guard fields live under the same lock as the state so the superseded
/// and deactivated checks are atomic with the state write.
struct TrackerCore {
    state: PriceState,
    latest_seq: u64,
    active: bool,
}

struct Shared {
    core: Mutex<TrackerCore>,
}

impl Shared {
    fn snapshot(&self) -> PriceState {
        self.core.lock().state
    }

    fn issue_seq(&self) -> u64 {
        let mut core = self.core.lock();
        core.latest_seq += 1;
        core.latest_seq
    }

    fn on_fetch_success(&self, seq: u64, value: f64) {
        let mut core = self.core.lock();
        if !core.active {
            debug!("Fetch #{} resolved after deactivation, discarding", seq);
            return;
        }
        if seq != core.latest_seq {
            debug!("Fetch #{} superseded by a later tick, discarding", seq);
            return;
        }

        core.state = PriceState::Loaded(PriceSample::new(value));
        let state = core.state;
        drop(core);

        let output = render::render(&state);
        info!("{}", output.body);
    }

    fn on_fetch_failure(&self, seq: u64, err: &crate::error::TrackerError) {
        if !self.core.lock().active {
            debug!("Fetch #{} failed after deactivation, discarding", seq);
            return;
        }
        // Last known price stays on screen; the next tick is the retry.
        error!("Failed to fetch price: {}", err);
    }
}

/// Polls the configured price source on a fixed schedule and keeps the
/// latest successfully fetched price available for rendering.
///
/// Each tick is tagged with a monotonically increasing sequence number and
/// only the highest-numbered fetch may update state, so a slow response can
/// never overwrite a newer one. Deactivation clears the guard under the
/// same lock that protects the state, which bars any still in-flight fetch
/// from mutating state afterwards.
pub struct PriceTracker {
    source: Arc<dyn PriceSource>,
    config: Config,
    shared: Arc<Shared>,
    handle: Option<SubscriptionHandle>,
}

impl PriceTracker {
    pub fn new(source: Arc<dyn PriceSource>, config: Config) -> Self {
        Self {
            source,
            config,
            shared: Arc::new(Shared {
                core: Mutex::new(TrackerCore {
                    state: PriceState::Loading,
                    latest_seq: 0,
                    active: false,
                }),
            }),
            handle: None,
        }
    }

    /// Starts the periodic schedule: an immediate first fetch, then one
    /// fetch per interval until [`deactivate`](Self::deactivate). Fetches
    /// run on their own tasks so ticks stay periodic even when a fetch
    /// outlasts the interval.
    pub fn activate(&mut self) {
        if self.handle.is_some() {
            warn!("Tracker already active, ignoring activate()");
            return;
        }

        info!(
            "Activating price tracker, polling every {}ms",
            self.config.poll_interval_ms
        );

        self.shared.core.lock().active = true;

        let shared = Arc::clone(&self.shared);
        let source = Arc::clone(&self.source);
        let period = Duration::from_millis(self.config.poll_interval_ms);

        let timer_task = tokio::spawn(async move {
            let mut ticker = time::interval(period);
            loop {
                ticker.tick().await;
                let seq = shared.issue_seq();
                debug!("Tick #{}, issuing fetch", seq);

                let shared = Arc::clone(&shared);
                let source = Arc::clone(&source);
                tokio::spawn(async move {
                    match source.fetch_price().await {
                        Ok(value) => shared.on_fetch_success(seq, value),
                        Err(err) => shared.on_fetch_failure(seq, &err),
                    }
                });
            }
        });

        self.handle = Some(SubscriptionHandle { timer_task });
    }

    /// Cancels the schedule and discards the held sample. No fetch callback
    /// can mutate state once this returns, even if its response is still in
    /// flight. Idempotent.
    pub fn deactivate(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        {
            let mut core = self.shared.core.lock();
            core.active = false;
            // Bump past every issued fetch so none can match after reactivation.
            core.latest_seq += 1;
            core.state = PriceState::Loading;
        }
        drop(handle);

        info!("Price tracker deactivated");
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    pub fn state(&self) -> PriceState {
        self.shared.snapshot()
    }

    pub fn render(&self) -> RenderOutput {
        render::render(&self.shared.snapshot())
    }
}

impl Drop for PriceTracker {
    fn drop(&mut self) {
        self.deactivate();
    }
}
