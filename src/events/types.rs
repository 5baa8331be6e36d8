use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A relayed event as recorded by a receiving endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broadcast {
    pub event: String,
    pub args: Vec<Value>,
    pub received_at: DateTime<Utc>,
}

impl Broadcast {
    pub fn new(event: impl Into<String>, args: &[Value]) -> Self {
        Self {
            event: event.into(),
            args: args.to_vec(),
            received_at: Utc::now(),
        }
    }
}
