//! Cancellable fixed-interval refetching.
//!
//! Live views (the group detail page's member messages) refresh by polling.
//! Polling is modelled as a subscription: [`Poller::start`] returns a
//! [`PollHandle`] that the view must stop on teardown. Dropping the handle
//! stops the poll as well, so a forgotten handle cannot leak a timer.

use std::future::Future;
use std::time::Duration;

use groupdesk_core::Result;
use serde::de::DeserializeOwned;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::ApiClient;
use crate::error::ClientError;

/// Starts polling tasks on the current tokio runtime.
pub struct Poller;

impl Poller {
    /// Runs `task` immediately and then every `period` until stopped.
    ///
    /// A tick that is still running when the next one is due delays the
    /// schedule rather than overlapping it.
    pub fn start<F, Fut>(period: Duration, mut task: F) -> PollHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let join = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = interval.tick() => task().await,
                }
            }
            tracing::debug!("Poll stopped");
        });

        PollHandle {
            stop: Some(stop_tx),
            join: Some(join),
        }
    }
}

/// Owner of a running poll.
#[derive(Debug)]
pub struct PollHandle {
    stop: Option<oneshot::Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Stops the poll and waits for an in-flight tick to finish.
    ///
    /// No tick starts after this returns.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.await;
        }
    }

    /// Returns true while the poll task is alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.join.as_ref().is_some_and(|join| !join.is_finished())
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            join.abort();
        }
    }
}

impl ApiClient {
    /// Polls `path` every `period`, handing each result to `on_update`.
    ///
    /// A rejected session token clears the session and ends the poll.
    pub fn poll_json<T, F>(&self, path: &str, period: Duration, on_update: F) -> PollHandle
    where
        T: DeserializeOwned + Send + 'static,
        F: Fn(Result<T, ClientError>) + Send + Sync + 'static,
    {
        let client = self.clone();
        let path = path.to_string();
        let on_update = std::sync::Arc::new(on_update);

        Poller::start(period, move || {
            let client = client.clone();
            let path = path.clone();
            let on_update = std::sync::Arc::clone(&on_update);
            async move {
                // Unauthorized already cleared the session; skip quietly.
                if !client.session().state().is_authenticated() {
                    return;
                }
                on_update(client.get_json::<T>(&path).await);
            }
        })
    }
}
