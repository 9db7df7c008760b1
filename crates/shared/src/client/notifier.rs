use crate::{
    abstract_trait::external::DynAccountBalanceClient, config::NotifierSettings,
    domain::requests::transaction::UpdateBalanceRequest,
};
use std::sync::Arc;
use tokio::sync::{
    Semaphore,
    mpsc::{self, error::TrySendError},
};
use tracing::{error, info, warn};

/// Fire-and-forget delivery of balance updates.
///
/// Requests go into a bounded queue drained by a single dispatcher task, which
/// runs at most `max_in_flight` deliveries at once. Each update is attempted
/// exactly once; when the queue is full the update is dropped and logged.
#[derive(Clone)]
pub struct BalanceNotifier {
    sender: mpsc::Sender<UpdateBalanceRequest>,
}

impl BalanceNotifier {
    /// Must be called from within a Tokio runtime.
    pub fn spawn(client: DynAccountBalanceClient, settings: NotifierSettings) -> Self {
        let (sender, mut receiver) = mpsc::channel::<UpdateBalanceRequest>(settings.queue_capacity);
        let permits = Arc::new(Semaphore::new(settings.max_in_flight));

        tokio::spawn(async move {
            while let Some(req) = receiver.recv().await {
                let Ok(permit) = permits.clone().acquire_owned().await else {
                    break;
                };
                let client = client.clone();

                tokio::spawn(async move {
                    let _permit = permit;
                    match client.update_balance(&req).await {
                        Ok(()) => info!(
                            "✅ Balance updated for account {} ({} {})",
                            req.account_number, req.transaction_type, req.amount
                        ),
                        Err(e) => error!(
                            "❌ Balance update failed for account {}: {e}",
                            req.account_number
                        ),
                    }
                });
            }
            info!("Balance notifier stopped");
        });

        Self { sender }
    }

    pub fn notify(&self, req: UpdateBalanceRequest) {
        match self.sender.try_send(req) {
            Ok(()) => {}
            Err(TrySendError::Full(req)) => warn!(
                "⚠️ Balance update queue full, dropping update for account {}",
                req.account_number
            ),
            Err(TrySendError::Closed(req)) => error!(
                "❌ Balance notifier is not running, dropping update for account {}",
                req.account_number
            ),
        }
    }
}
