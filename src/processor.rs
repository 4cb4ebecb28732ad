use futures::FutureExt;
use std::any::Any;
use std::borrow::Cow;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::due_date::DueDateCalculator;
use crate::webhook::WorkOrderEvent;
use crate::workorders::WorkOrderApi;

/// How processing of a single event ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Updated,
    NoPriority,
    FetchFailed,
    RateLimited,
    UpdateFailed,
}

/// Turns work order events into due-date updates
pub struct EventProcessor {
    api: Arc<dyn WorkOrderApi>,
    calculator: DueDateCalculator,
}

impl EventProcessor {
    pub fn new(api: Arc<dyn WorkOrderApi>, calculator: DueDateCalculator) -> Self {
        Self { api, calculator }
    }

    /// Process one event. Every outcome, including failures, ends up in the
    /// logs only.
    pub async fn process(&self, event: &WorkOrderEvent) {
        let outcome = self.handle(event).await;
        tracing::debug!(
            work_order_id = event.work_order_id,
            ?outcome,
            "Finished processing event"
        );
    }

    /// Process an event on a detached task.
    ///
    /// The task never propagates a failure: panics are caught and logged.
    pub fn spawn(self: &Arc<Self>, event: WorkOrderEvent) -> JoinHandle<()> {
        let processor = Arc::clone(self);
        tokio::spawn(async move {
            let work_order_id = event.work_order_id;
            let result = AssertUnwindSafe(processor.process(&event))
                .catch_unwind()
                .await;
            if let Err(panic) = result {
                tracing::error!(
                    work_order_id,
                    panic = panic_message(panic.as_ref()),
                    "Event processing panicked"
                );
            }
        })
    }

    async fn handle(&self, event: &WorkOrderEvent) -> Outcome {
        let id = event.work_order_id;

        let snapshot = match &event.work_order {
            Some(snapshot) => Cow::Borrowed(snapshot),
            None => {
                tracing::info!(work_order_id = id, "No work order in event, fetching details");
                match self.api.get_work_order(id).await {
                    Ok(snapshot) => Cow::Owned(snapshot),
                    Err(e) => {
                        tracing::error!(
                            work_order_id = id,
                            error = %e.payload(),
                            "Failed to fetch work order details"
                        );
                        return Outcome::FetchFailed;
                    }
                }
            }
        };

        let priority = match snapshot.priority.as_deref() {
            Some(p) => p,
            None => {
                tracing::info!(work_order_id = id, "Work order has no priority, skipping");
                return Outcome::NoPriority;
            }
        };

        let due_date = self.calculator.calculate(Some(priority));
        tracing::info!(
            work_order_id = id,
            priority,
            due_date = %due_date,
            "Computed due date"
        );

        match self.api.update_due_date(id, &due_date).await {
            Ok(receipt) => {
                tracing::info!(
                    work_order_id = id,
                    status = receipt.status,
                    rate_limit_remaining = receipt.rate_limit.remaining_or_na(),
                    rate_limit_reset = receipt.rate_limit.reset_or_na(),
                    "Updated work order due date"
                );
                Outcome::Updated
            }
            Err(e) if e.is_rate_limited() => {
                let reset_secs = e.retry_after_secs();
                tracing::warn!(
                    work_order_id = id,
                    reset_secs,
                    "Rate limited by work order API, retry in {}s",
                    reset_secs
                );
                Outcome::RateLimited
            }
            Err(e) => {
                tracing::error!(
                    work_order_id = id,
                    status = ?e.status(),
                    error = %e.payload(),
                    "Failed to update work order due date"
                );
                Outcome::UpdateFailed
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
