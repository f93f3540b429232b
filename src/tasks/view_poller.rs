use crate::store::DataSource;
use crate::views::{PanelSink, View, ViewState};
use chrono::Utc;
use log::{debug, error, info};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant};

/// Orders the refreshes of one view.
///
/// Every refresh takes a ticket when it starts. A result is applied only if
/// its ticket is newer than the last one applied, so a slow response can
/// never overwrite a fresher one.
#[derive(Debug, Default)]
pub struct SequenceGuard {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl SequenceGuard {
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Marks `ticket` applied and returns true if it is the newest so far.
    pub fn accept(&self, ticket: u64) -> bool {
        self.applied.fetch_max(ticket, Ordering::SeqCst) < ticket
    }
}

/// One live view bound to the message it keeps current.
pub struct ViewSession {
    view: RwLock<View>,
    state: RwLock<ViewState>,
    source: Arc<dyn DataSource>,
    sink: Arc<dyn PanelSink>,
    sequence: SequenceGuard,
    publish: Mutex<()>,
    closed: AtomicBool,
}

impl ViewSession {
    pub fn new(view: View, source: Arc<dyn DataSource>, sink: Arc<dyn PanelSink>) -> Self {
        Self {
            view: RwLock::new(view),
            state: RwLock::new(ViewState::Idle),
            source,
            sink,
            sequence: SequenceGuard::default(),
            publish: Mutex::new(()),
            closed: AtomicBool::new(false),
        }
    }

    pub async fn view(&self) -> View {
        self.view.read().await.clone()
    }

    pub async fn set_view(&self, view: View) {
        *self.view.write().await = view;
    }

    pub async fn state(&self) -> ViewState {
        *self.state.read().await
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Fetch, render and publish, unless a newer refresh got there first.
    pub async fn refresh(&self) {
        if self.is_closed() {
            return;
        }
        let ticket = self.sequence.issue();
        *self.state.write().await = ViewState::Loading;

        let view = self.view().await;
        let panel = view.build(self.source.as_ref(), Utc::now()).await;

        let _publishing = self.publish.lock().await;
        if self.is_closed() {
            return;
        }
        if !self.sequence.accept(ticket) {
            debug!("Dropping stale {} refresh #{}", view.name(), ticket);
            return;
        }
        if let Err(e) = self.sink.publish(&panel).await {
            error!("Failed to publish {} view: {}", view.name(), e);
        }
        *self.state.write().await = ViewState::Loaded;
    }

    async fn retire(&self) {
        self.close();
        let _publishing = self.publish.lock().await;
        if let Err(e) = self.sink.retire().await {
            error!("Failed to retire view controls: {}", e);
        }
    }
}

struct ActiveView {
    session: Arc<ViewSession>,
    ticker: JoinHandle<()>,
}

/// Live views keyed by the id of the message that shows them.
#[derive(Default)]
pub struct ViewRegistry {
    active: Mutex<HashMap<u64, ActiveView>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start polling `session` every `every` until closed or `ttl` elapses.
    /// The first refresh fires immediately.
    pub async fn open(&self, key: u64, session: Arc<ViewSession>, every: Duration, ttl: Duration) {
        let ticker = spawn_ticker(Arc::clone(&session), every, ttl);

        let mut active = self.active.lock().await;
        active.retain(|_, entry| !entry.ticker.is_finished());
        if let Some(previous) = active.insert(key, ActiveView { session, ticker }) {
            previous.ticker.abort();
            previous.session.close();
        }
        info!("Opened live view for message {} ({} active)", key, active.len());
    }

    pub async fn session(&self, key: u64) -> Option<Arc<ViewSession>> {
        let active = self.active.lock().await;
        active
            .get(&key)
            .filter(|entry| !entry.session.is_closed())
            .map(|entry| Arc::clone(&entry.session))
    }

    /// Stop polling and release the timer. Returns false if nothing was live.
    pub async fn close(&self, key: u64) -> bool {
        let removed = self.active.lock().await.remove(&key);
        match removed {
            Some(entry) => {
                entry.ticker.abort();
                entry.session.close();
                info!("Closed live view for message {}", key);
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.active
            .lock()
            .await
            .values()
            .filter(|entry| !entry.ticker.is_finished())
            .count()
    }
}

fn spawn_ticker(session: Arc<ViewSession>, every: Duration, ttl: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let deadline = Instant::now() + ttl;
        let mut ticker = interval(every);

        loop {
            ticker.tick().await;
            if session.is_closed() {
                return;
            }
            if Instant::now() >= deadline {
                break;
            }
            // Refreshes are not awaited here; a slow fetch must not hold back the next tick.
            let refreshing = Arc::clone(&session);
            tokio::spawn(async move {
                refreshing.refresh().await;
            });
        }

        let name = session.view().await.name();
        info!("Live {} view reached its time limit; auto-refresh stopped", name);
        session.retire().await;
    })
}
