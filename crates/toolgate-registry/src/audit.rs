//! Audit sink port.

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// One dispatched request/response pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Method name as sent by the client.
    pub method: String,
    /// Serialized request.
    pub request: String,
    /// Serialized response.
    pub response: String,
    /// Server-assigned timestamp (milliseconds since the Unix epoch).
    pub timestamp_ms: u64,
}

impl AuditRecord {
    /// Creates a record stamped with the current time.
    pub fn new(
        method: impl Into<String>,
        request: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            method: method.into(),
            request: request.into(),
            response: response.into(),
            timestamp_ms,
        }
    }
}

/// Append-only durable store of audit records.
///
/// Implementations must accept concurrent appends from many
/// connections without losing or duplicating records.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Appends one record.
    async fn append(&self, record: &AuditRecord) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_timestamped() {
        let record = AuditRecord::new("tools.list", "{}", "{}");
        assert!(record.timestamp_ms > 0);
        assert_eq!(record.method, "tools.list");
    }
}
