// src/view/status_view.rs
use super::Rendered;
use crate::config::ViewConfig;
use crate::health::{HealthStatus, ProbeOutcome, StatusSource};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initial,  // Nothing issued yet
    Checking, // Probe in flight
    Resolved, // Backend answered with an HTTP status
    Failed,   // Backend unreachable
}

impl Phase {
    pub fn is_settled(&self) -> bool {
        matches!(self, Phase::Resolved | Phase::Failed)
    }
}

/// Snapshot published on every re-render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub phase: Phase,
    pub status: HealthStatus,
    pub checked_at: Option<DateTime<Utc>>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            phase: Phase::Initial,
            status: HealthStatus::Unknown,
            checked_at: None,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("Status view is already mounted")]
    AlreadyMounted,

    #[error("Status view has not been mounted")]
    NotMounted,
}

/// Static title and subtitle plus a badge fed by a single health check.
///
/// The check runs once, on [`StatusView::mount`]. Results that arrive
/// after [`StatusView::unmount`] (or drop) are discarded.
pub struct StatusView {
    id: Uuid,
    layout: ViewConfig,
    source: Arc<dyn StatusSource>,
    state_tx: Arc<watch::Sender<ViewState>>,
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl StatusView {
    pub fn new(source: Arc<dyn StatusSource>, layout: ViewConfig) -> Self {
        let (state_tx, _) = watch::channel(ViewState::default());
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            id: Uuid::new_v4(),
            layout,
            source,
            state_tx: Arc::new(state_tx),
            shutdown_tx,
            task: None,
        }
    }

    /// Spawn the one health check for this view.
    pub fn mount(&mut self) -> Result<(), ViewError> {
        if self.state_tx.borrow().phase != Phase::Initial {
            warn!(view = %self.id, "ignoring second mount");
            return Err(ViewError::AlreadyMounted);
        }

        info!(
            view = %self.id,
            endpoint = self.source.endpoint(),
            "Mounting status view"
        );

        self.state_tx.send_modify(|state| state.phase = Phase::Checking);

        let id = self.id;
        let source = self.source.clone();
        let state_tx = self.state_tx.clone();
        let shutdown_rx = self.shutdown_tx.subscribe();

        self.task = Some(tokio::spawn(async move {
            run_check(id, source, state_tx, shutdown_rx).await;
        }));

        Ok(())
    }

    pub fn state(&self) -> ViewState {
        self.state_tx.borrow().clone()
    }

    pub fn status(&self) -> HealthStatus {
        self.state_tx.borrow().status
    }

    /// Receiver that changes whenever the view re-renders.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state_tx.subscribe()
    }

    /// Wait for the check to resolve or fail.
    pub async fn settled(&self) -> Result<ViewState, ViewError> {
        let mut rx = self.state_tx.subscribe();
        loop {
            {
                let state = rx.borrow_and_update();
                if state.phase == Phase::Initial {
                    return Err(ViewError::NotMounted);
                }
                if state.phase.is_settled() {
                    return Ok(state.clone());
                }
            }
            if rx.changed().await.is_err() {
                return Ok(rx.borrow().clone());
            }
        }
    }

    pub fn render(&self) -> Rendered {
        Rendered {
            title: self.layout.title.clone(),
            subtitle: self.layout.subtitle.clone(),
            badge: self.status().label(),
        }
    }

    /// Tear the view down, cancelling a check that is still in flight.
    pub async fn unmount(mut self) {
        if let Some(task) = self.task.take() {
            let _ = self.shutdown_tx.send(true);
            task.abort();
            let _ = task.await;
        }
        info!(view = %self.id, "Status view unmounted");
    }
}

impl Drop for StatusView {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = self.shutdown_tx.send(true);
            task.abort();
        }
    }
}

async fn run_check(
    id: Uuid,
    source: Arc<dyn StatusSource>,
    state_tx: Arc<watch::Sender<ViewState>>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let outcome = tokio::select! {
        outcome = source.probe() => outcome,
        _ = shutdown_rx.changed() => {
            debug!(view = %id, "view unmounted before health check resolved");
            return;
        }
    };

    let published = match outcome {
        ProbeOutcome::Healthy { status } | ProbeOutcome::Unhealthy { status } => {
            let health = HealthStatus::from(status.is_success());
            let published = publish(&state_tx, &shutdown_rx, |state| {
                state.phase = Phase::Resolved;
                state.status = health;
            });
            if published {
                info!(view = %id, %status, %health, "Backend health resolved");
            }
            published
        }
        ProbeOutcome::Unreachable(e) => {
            let published = publish(&state_tx, &shutdown_rx, |state| {
                state.phase = Phase::Failed;
            });
            if published {
                warn!(view = %id, error = %e, "Backend unreachable, keeping previous status");
            }
            published
        }
    };

    if !published {
        debug!(view = %id, "discarding health check result after unmount");
    }
}

/// Apply a settled result unless the view has been torn down. The shutdown
/// flag is read while the state lock is held.
fn publish(
    state_tx: &watch::Sender<ViewState>,
    shutdown_rx: &watch::Receiver<bool>,
    settle: impl FnOnce(&mut ViewState),
) -> bool {
    state_tx.send_if_modified(|state| {
        if *shutdown_rx.borrow() {
            return false;
        }
        settle(state);
        state.checked_at = Some(Utc::now());
        true
    })
}
