//! Input generation settings.

use serde::{Deserialize, Serialize};

/// Controls generated default inputs. Generation is reproducible per seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub seed: u64,
    /// Length of generated arrays.
    pub default_array_len: usize,
    /// Node count of generated graphs.
    pub default_graph_nodes: usize,
    /// Inclusive range for generated array values.
    pub value_min: i64,
    pub value_max: i64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED_A16D,
            default_array_len: 30,
            default_graph_nodes: 8,
            value_min: 1,
            value_max: 100,
        }
    }
}

impl InputConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_default_array_len(mut self, len: usize) -> Self {
        self.default_array_len = len;
        self
    }

    #[must_use]
    pub fn with_default_graph_nodes(mut self, nodes: usize) -> Self {
        self.default_graph_nodes = nodes;
        self
    }

    /// Set the generated value range. Bounds are reordered if reversed.
    #[must_use]
    pub fn with_value_range(mut self, min: i64, max: i64) -> Self {
        self.value_min = min.min(max);
        self.value_max = min.max(max);
        self
    }
}
