//! Candidate filter configuration

use serde::{Deserialize, Serialize};

/// Configuration for candidate filtering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Maximum great-circle distance to a candidate, in kilometers
    ///
    /// The one radius shared by candidate filtering and any future
    /// nearby-style feature. Default: 10.
    #[serde(default = "default_match_radius_km")]
    pub match_radius_km: f64,
}

fn default_match_radius_km() -> f64 {
    10.0
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            match_radius_km: default_match_radius_km(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_radius() {
        assert_eq!(FilterConfig::default().match_radius_km, 10.0);
    }
}
