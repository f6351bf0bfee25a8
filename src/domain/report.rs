use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SinkStatus {
    Success,
    Failed(String),
    Skipped(String),
}

/// Outcome of one fan-out: one entry per sink, in dispatch order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FanOutReport {
    pub ledger: SinkStatus,
    pub owner_notification: SinkStatus,
    pub guest_notification: SinkStatus,
}
