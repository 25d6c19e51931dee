//! Backup/sorted pair compatibility check
//!
//! Watches the values and validity of two fields and asks the server whether
//! they make sense together. It reads field state but never writes to it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_util::sync::CancellationToken;

use crate::api::{PairValidation, PathApi};
use crate::debouncer::Debouncer;
use crate::error::ApiError;

struct PairResponse {
    request_id: u64,
    result: Result<PairValidation, ApiError>,
}

pub struct PairCheck {
    api: Arc<dyn PathApi>,
    runtime: Handle,
    timer: Debouncer,
    /// Values the current result (or pending check) belongs to
    inputs: Option<(String, String)>,
    result: Option<PairValidation>,
    response_tx: UnboundedSender<PairResponse>,
    response_rx: UnboundedReceiver<PairResponse>,
    cancel_token: CancellationToken,
    next_request_id: u64,
    in_flight: usize,
}

impl PairCheck {
    pub fn new(api: Arc<dyn PathApi>, runtime: Handle, debounce: Duration) -> Self {
        let (response_tx, response_rx) = unbounded_channel();
        Self {
            api,
            runtime,
            timer: Debouncer::new(debounce),
            inputs: None,
            result: None,
            response_tx,
            response_rx,
            cancel_token: CancellationToken::new(),
            next_request_id: 0,
            in_flight: 0,
        }
    }

    /// Feed the current state of both fields. Cheap to call every frame:
    /// only a change of values or validity restarts the debounce.
    pub fn update(
        &mut self,
        backup: (&str, bool),
        sorted: (&str, bool),
        now: Instant,
    ) {
        let (backup_path, backup_valid) = backup;
        let (sorted_path, sorted_valid) = sorted;

        let ready = backup_valid
            && sorted_valid
            && !backup_path.trim().is_empty()
            && !sorted_path.trim().is_empty();

        if !ready {
            if self.inputs.take().is_some() || self.result.is_some() {
                log::debug!("Pair check cleared");
            }
            self.timer.cancel();
            self.result = None;
            return;
        }

        let unchanged = self
            .inputs
            .as_ref()
            .is_some_and(|(b, s)| b == backup_path && s == sorted_path);
        if unchanged {
            return;
        }

        self.inputs = Some((backup_path.to_string(), sorted_path.to_string()));
        self.result = None;
        self.timer.schedule(now);
    }

    pub fn tick(&mut self, now: Instant) {
        if self.timer.fire_if_due(now) {
            self.dispatch();
        }
    }

    fn dispatch(&mut self) {
        let Some((backup_path, sorted_path)) = self.inputs.clone() else {
            return;
        };

        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.in_flight += 1;
        log::debug!(
            "Pair check {} for {:?} / {:?}",
            request_id,
            backup_path,
            sorted_path
        );

        let api = self.api.clone();
        let tx = self.response_tx.clone();
        let cancel_token = self.cancel_token.clone();
        self.runtime.spawn(async move {
            let result = tokio::select! {
                _ = cancel_token.cancelled() => return,
                result = api.validate_pair(&backup_path, &sorted_path) => result,
            };
            let _ = tx.send(PairResponse { request_id, result });
        });
    }

    /// Apply arrived results. Results for superseded inputs are dropped.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(response) = self.response_rx.try_recv() {
            self.apply(response);
            applied += 1;
        }
        applied
    }

    pub async fn next_response(&mut self) -> bool {
        match self.response_rx.recv().await {
            Some(response) => {
                self.apply(response);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, response: PairResponse) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if response.request_id != self.next_request_id
            || self.inputs.is_none()
            || self.timer.is_pending()
        {
            return;
        }

        match response.result {
            Ok(validation) => {
                if !validation.valid {
                    log::debug!("Pair rejected: {:?}", validation.errors);
                }
                self.result = Some(validation);
            }
            Err(e) => {
                log::warn!("Pair check failed: {}", e);
                self.result = None;
            }
        }
    }

    pub fn result(&self) -> Option<&PairValidation> {
        self.result.as_ref()
    }

    pub fn errors(&self) -> &[String] {
        self.result
            .as_ref()
            .map(|r| r.errors.as_slice())
            .unwrap_or_default()
    }

    pub fn warnings(&self) -> &[String] {
        self.result
            .as_ref()
            .map(|r| r.warnings.as_slice())
            .unwrap_or_default()
    }

    pub fn is_checking(&self) -> bool {
        self.in_flight > 0 || self.timer.is_pending()
    }

    /// Both fields valid, the pair accepted, and nothing left to wait for
    pub fn can_save(&self) -> bool {
        self.inputs.is_some()
            && !self.is_checking()
            && self.result.as_ref().is_some_and(|r| r.valid)
    }
}

impl Drop for PairCheck {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

#[cfg(test)]
#[path = "pair_tests.rs"]
mod pair_tests;
