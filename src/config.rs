// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use getset::CopyGetters;

use crate::errs::SkipListError;

/// The default expected capacity of a list.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// The default chance that a node is promoted one level further up.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Construction parameters for a [`SkipList`](crate::skiplist::SkipList).
///
/// `capacity` is the number of keys the list is sized for. It bounds the
/// maximum level, it is not a hard limit on the number of keys.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct SkipListConfig {
    capacity: usize,
    probability: f64,
    /// When set, level sampling is reproducible.
    seed: Option<u64>,
}

impl Default for SkipListConfig {
    fn default() -> Self {
        SkipListConfig {
            capacity: DEFAULT_CAPACITY,
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }
}

impl SkipListConfig {
    pub fn new(capacity: usize, probability: f64) -> Self {
        SkipListConfig {
            capacity,
            probability,
            seed: None,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), SkipListError> {
        validate(self.capacity, self.probability)
    }
}

pub(crate) fn validate(capacity: usize, probability: f64) -> Result<(), SkipListError> {
    if capacity < 1 {
        return Err(SkipListError::InvalidConfig(format!(
            "capacity must be at least 1, got {}",
            capacity
        )));
    }
    // written this way so NaN is rejected too
    if !(probability > 0.0 && probability < 1.0) {
        return Err(SkipListError::InvalidConfig(format!(
            "probability must be in (0, 1), got {}",
            probability
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SkipListConfig::default();
        assert_eq!(config.capacity(), DEFAULT_CAPACITY);
        assert_eq!(config.probability(), DEFAULT_PROBABILITY);
        assert_eq!(config.seed(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SkipListConfig::default()
            .with_capacity(18)
            .with_probability(0.6)
            .with_seed(22);
        assert_eq!(config, SkipListConfig::new(18, 0.6).with_seed(22));
    }

    #[test]
    fn test_invalid() {
        assert!(SkipListConfig::new(0, 0.5).validate().is_err());
        assert!(SkipListConfig::new(10, 0.0).validate().is_err());
        assert!(SkipListConfig::new(10, 1.0).validate().is_err());
        assert!(SkipListConfig::new(10, -0.5).validate().is_err());
        assert!(SkipListConfig::new(10, f64::NAN).validate().is_err());
        assert!(SkipListConfig::new(1, 0.01).validate().is_ok());
    }
}
