use serde::{Deserialize, Serialize};

use crate::error::{WindowError, WindowResult};

/// Parameters shared by the sequential, indexed and resampling readers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Symbols per window; 0 takes whole records
    pub window_length: usize,
    /// Restart from the first qualifying record after the last one
    pub cyclic: bool,
    /// Stitch record ends to their starts when extracting windows
    pub circular: bool,
    /// Windows drawn per qualifying record (indexed and resampling readers)
    pub samples_per_record: usize,
    /// Optional deterministic seed for randomized sampling
    pub seed: Option<u64>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_length: 0,
            cyclic: false,
            circular: false,
            samples_per_record: 1,
            seed: None,
        }
    }
}

impl WindowConfig {
    pub fn new(window_length: usize) -> Self {
        Self {
            window_length,
            ..Default::default()
        }
    }

    pub fn cyclic(mut self, cyclic: bool) -> Self {
        self.cyclic = cyclic;
        self
    }

    pub fn circular(mut self, circular: bool) -> Self {
        self.circular = circular;
        self
    }

    pub fn samples_per_record(mut self, samples: usize) -> Self {
        self.samples_per_record = samples;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn validate_sampling(&self) -> WindowResult<()> {
        if self.samples_per_record == 0 {
            return Err(WindowError::InvalidParams(
                "samples_per_record must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = WindowConfig::new(65).cyclic(true).samples_per_record(5).seed(7);
        assert_eq!(config.window_length, 65);
        assert!(config.cyclic);
        assert!(!config.circular);
        assert_eq!(config.samples_per_record, 5);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_zero_samples_rejected() {
        let config = WindowConfig::new(10).samples_per_record(0);
        assert!(matches!(config.validate_sampling(), Err(WindowError::InvalidParams(_))));
    }
}
