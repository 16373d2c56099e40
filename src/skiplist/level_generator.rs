// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use rand::{
    rngs::StdRng,
    Rng,
    SeedableRng,
};
use tracing::debug;

use crate::{
    config,
    errs::SkipListError,
};

/// Upon the insertion of a new node in the list, the node is replicated to
/// higher levels with a certain probability as determined by a
/// `LevelGenerator`.
pub trait LevelGenerator {
    /// The maximum height this generator will ever produce.
    fn total(&self) -> usize;
    /// Generate a random height for a new node in the range `[1, total]`.
    ///
    /// This must never return `0` or a height that is `> self.total()`.
    fn random(&mut self) -> usize;
}

/// The cumulative count histogram of node heights for a list of expected
/// capacity `n` and promotion probability `p`.
///
/// `counts[0]` is always `0` and `counts[i]` is `ceil(n * (1 - p^i))`, i.e.
/// the expected number of nodes with a height of at most `i`. The table is
/// monotonic and `counts[max_level] >= n`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    capacity: usize,
    probability: f64,
    max_level: usize,
    counts: Vec<usize>,
}

impl Histogram {
    pub fn new(capacity: usize, probability: f64) -> Result<Self, SkipListError> {
        config::validate(capacity, probability)?;

        let n = capacity as f64;
        let bucket = |level: usize| {
            let exp = i32::try_from(level).unwrap_or(i32::MAX);
            (n * (1.0 - probability.powi(exp))).ceil() as usize
        };

        let mut max_level = (1.0 + n.ln() / (1.0 / probability).ln()).floor() as usize;
        let mut counts = Vec::with_capacity(max_level + 1);
        counts.push(0);
        counts.extend((1..=max_level).map(bucket));

        // when log_{1/p}(n) is integral, rounding can leave the top bucket one
        // short of n, so every draw in [1, n] has to still land on a level.
        // above 2^53 `n` itself rounds below capacity and the buckets plateau,
        // in which case the top bucket is pinned to capacity.
        while counts[max_level] < capacity {
            let next = bucket(max_level + 1);
            if next <= counts[max_level] {
                counts[max_level] = capacity;
                break;
            }
            max_level += 1;
            counts.push(next);
        }

        Ok(Histogram {
            capacity,
            probability,
            max_level,
            counts,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// The smallest level `i >= 1` whose cumulative count reaches `draw`.
    #[inline]
    pub fn level_for(&self, draw: usize) -> Option<usize> {
        let level = self.counts[1..].partition_point(|&count| count < draw) + 1;
        (level <= self.max_level).then_some(level)
    }
}

/// A level generator which picks a height with a single uniform draw against a
/// precomputed [`Histogram`].
///
/// The outcome has the same distribution as flipping a `p`-biased coin until it
/// fails, truncated at the maximum level, without the repeated draws.
#[derive(Debug, Clone)]
pub struct HistogramLevelGenerator<R = StdRng> {
    histogram: Histogram,
    rng: R,
}

impl HistogramLevelGenerator<StdRng> {
    /// Create a generator seeded from system entropy.
    pub fn new(capacity: usize, probability: f64) -> Result<Self, SkipListError> {
        Self::with_rng(capacity, probability, StdRng::from_entropy())
    }

    /// Create a generator whose draws are reproducible for a given `seed`.
    pub fn seeded(capacity: usize, probability: f64, seed: u64) -> Result<Self, SkipListError> {
        Self::with_rng(capacity, probability, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> HistogramLevelGenerator<R> {
    pub fn with_rng(capacity: usize, probability: f64, rng: R) -> Result<Self, SkipListError> {
        let histogram = Histogram::new(capacity, probability)?;
        debug!(
            capacity,
            probability,
            max_level = histogram.max_level(),
            "built level histogram"
        );
        Ok(HistogramLevelGenerator { histogram, rng })
    }
}

impl<R> HistogramLevelGenerator<R> {
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }
}

impl<R: Rng> LevelGenerator for HistogramLevelGenerator<R> {
    fn total(&self) -> usize {
        self.histogram.max_level()
    }

    fn random(&mut self) -> usize {
        let draw = self.rng.gen_range(1..=self.histogram.capacity());
        match self.histogram.level_for(draw) {
            | Some(level) => level,
            | None => panic!(
                "histogram has no level for draw {} (counts: {:?})",
                draw,
                self.histogram.counts()
            ),
        }
    }
}

/// Coin-flip baseline for [`HistogramLevelGenerator`].
///
/// Flips a `p`-biased coin until it fails, so height `h + 1` is `p` times as
/// likely as height `h`, capped at `total`. The list never uses it; it exists
/// to check and benchmark the histogram sampler against the distribution it
/// stands in for.
pub struct GeometricalLevelGenerator<R = StdRng> {
    total: usize,
    p: f64,
    rng: R,
}

impl GeometricalLevelGenerator<StdRng> {
    /// A baseline capped at `total` levels, seeded from system entropy.
    ///
    /// # Panics
    ///
    /// Panics if `total` is zero or `p` is outside `(0, 1)`.
    pub fn new(total: usize, p: f64) -> Self {
        Self::with_rng(total, p, StdRng::from_entropy())
    }
}

impl<R: Rng> GeometricalLevelGenerator<R> {
    pub fn with_rng(total: usize, p: f64, rng: R) -> Self {
        if total == 0 {
            panic!("total must be non-zero.");
        }
        if p <= 0.0 || p >= 1.0 {
            panic!("p must be in (0, 1).");
        }
        GeometricalLevelGenerator { total, p, rng }
    }
}

impl<R: Rng> LevelGenerator for GeometricalLevelGenerator<R> {
    fn random(&mut self) -> usize {
        let mut h = 1;
        while h < self.total && self.rng.gen::<f64>() < self.p {
            h += 1;
        }
        h
    }

    fn total(&self) -> usize {
        self.total
    }
}
