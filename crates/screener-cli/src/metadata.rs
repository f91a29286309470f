use std::fmt::{Display, Formatter};

use screener_core::UtcDateTime;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Request identifier (UUID v4). For market runs it is the pipeline run id,
/// so envelope and log lines share one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for RequestId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Metadata attached to every envelope. Field order is the output order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvelopeMeta {
    pub request_id: RequestId,
    pub generated_at: UtcDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Standard `{ meta, data }` output document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub meta: EnvelopeMeta,
    pub data: Value,
}
