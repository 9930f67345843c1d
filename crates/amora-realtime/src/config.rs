//! Realtime configuration

use serde::{Deserialize, Serialize};

/// Configuration for the realtime fan-out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Maximum serialized payload size in bytes for chat messages
    /// Default: 10 KiB
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
}

fn default_max_payload_bytes() -> usize {
    10 * 1024
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: default_max_payload_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ceiling() {
        assert_eq!(RealtimeConfig::default().max_payload_bytes, 10240);
    }

    #[test]
    fn test_deserialize_with_default() {
        let config: RealtimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.max_payload_bytes, 10240);
    }
}
