//! Poll scheduler driving repeated check cycles

use crate::classifier::classify;
use crate::endpoint::Endpoint;
use crate::errors::Result;
use crate::executor::{Outcome, RequestExecutor};
use crate::ledger::{AvailabilityLedger, Observation};

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::time::{Duration, sleep};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Cycling,
    Stopped,
}

/// Checks every endpoint once per interval and keeps per-domain availability
pub struct HealthMonitor {
    endpoints: Vec<Endpoint>,
    executor: Box<dyn RequestExecutor>,
    ledger: AvailabilityLedger,
    check_interval: Duration,
    state: MonitorState,
    cycles: u64,
    run_id: String,
}

impl HealthMonitor {
    pub fn new(
        endpoints: Vec<Endpoint>,
        executor: Box<dyn RequestExecutor>,
        ledger: AvailabilityLedger,
        check_interval: Duration,
    ) -> Self {
        Self {
            endpoints,
            executor,
            ledger,
            check_interval,
            state: MonitorState::Idle,
            cycles: 0,
            run_id: Uuid::new_v4().to_string(),
        }
    }

    /// Run cycles until `shutdown` is notified.
    ///
    /// The first cycle starts one full interval after this call. Cycles never
    /// overlap: the next interval is measured from the end of the previous cycle.
    pub async fn run(&mut self, shutdown: Arc<Notify>) -> Result<()> {
        info!(
            "Run {} monitoring {} endpoints every {}s",
            self.run_id,
            self.endpoints.len(),
            self.check_interval.as_secs_f64()
        );
        self.state = MonitorState::Cycling;

        loop {
            tokio::select! {
                _ = shutdown.notified() => break,
                _ = sleep(self.check_interval) => {}
            }

            tokio::select! {
                _ = shutdown.notified() => {
                    warn!("Shutdown requested mid-cycle, abandoning remaining checks");
                    break;
                }
                _ = self.run_cycle() => {}
            }
        }

        self.state = MonitorState::Stopped;
        self.log_summary();
        Ok(())
    }

    /// Check every endpoint once, in list order
    pub async fn run_cycle(&mut self) -> Vec<Observation> {
        self.cycles += 1;
        debug!("Starting cycle {}", self.cycles);

        let mut observations = Vec::with_capacity(self.endpoints.len());
        for endpoint in &self.endpoints {
            let outcome = self.executor.execute(endpoint).await;
            if let Some(observation) = Self::observe(&mut self.ledger, endpoint, &outcome) {
                observations.push(observation);
            }
        }

        observations
    }

    fn observe(
        ledger: &mut AvailabilityLedger,
        endpoint: &Endpoint,
        outcome: &Outcome,
    ) -> Option<Observation> {
        let domain = endpoint.domain();

        match outcome {
            Outcome::Failed(err) => {
                error!(endpoint = %endpoint.name, "{}: Error - {}", endpoint.name, err);
            }
            Outcome::Responded { status, elapsed } => {
                debug!(
                    endpoint = %endpoint.name,
                    "{} returned {} in {}ms",
                    endpoint.name,
                    status,
                    elapsed.as_millis()
                );
            }
        }

        let health = classify(outcome);
        ledger.record(domain, health);

        match ledger.availability_percent(domain) {
            Ok(availability) => {
                let observation = Observation {
                    endpoint: endpoint.name.clone(),
                    domain: domain.to_string(),
                    health,
                    availability,
                    checked_at: Utc::now(),
                };
                info!("{}", observation);
                Some(observation)
            }
            Err(e) => {
                error!(endpoint = %endpoint.name, "Failed to compute availability: {}", e);
                None
            }
        }
    }

    fn log_summary(&self) {
        info!("Run {} stopped after {} cycles", self.run_id, self.cycles);
        for (domain, counters) in self.ledger.domains() {
            info!(
                "Final availability - {}: {}% ({}/{} checks up)",
                domain,
                counters.percent(),
                counters.up,
                counters.total
            );
        }
    }

    pub fn ledger(&self) -> &AvailabilityLedger {
        &self.ledger
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}
