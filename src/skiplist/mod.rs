// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

//! A skiplist implementation which allows faster random access than a standard
//! linked list.
//!
//! SkipLists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level `n > 0` will contain a random subset of the nodes on level `n - 1`.
//!
//! Heights are drawn from a cumulative histogram sized for the expected
//! capacity of the list (see [`Histogram`]), so every insert costs exactly one
//! random draw. The result follows the usual geometric distribution where the
//! chance that a node occupies level `n` is `p` times the chance of occupying
//! level `n-1`.
//!
//! Nodes live in an append-only arena and link to each other by index, so
//! there is no unsafe pointer juggling anywhere in the list.

use std::{
    borrow::Borrow,
    fmt,
};

use rand::{
    rngs::StdRng,
    Rng,
};
use tracing::{
    instrument,
    trace,
};

pub use self::level_generator::{
    GeometricalLevelGenerator,
    Histogram,
    HistogramLevelGenerator,
    LevelGenerator,
};
use self::node::{
    Arena,
    Cursor,
    Link,
    Node,
};
use crate::{
    config::SkipListConfig,
    errs::SkipListError,
};

mod level_generator;
mod node;
mod test;

/// An ordered set of unique keys.
pub struct SkipList<T, R = StdRng> {
    /// The head sentinel. It carries no key and spans every level.
    head: Box<[Link]>,
    arena: Arena<T>,
    generator: HistogramLevelGenerator<R>,
}

impl<T: Ord> SkipList<T, StdRng> {
    /// Create a list sized for `capacity` keys where each node is promoted to
    /// the next level with `probability`.
    pub fn new(capacity: usize, probability: f64) -> Result<Self, SkipListError> {
        HistogramLevelGenerator::new(capacity, probability).map(Self::with_generator)
    }

    /// Like [`SkipList::new`], but node heights are reproducible for `seed`.
    pub fn with_seed(capacity: usize, probability: f64, seed: u64) -> Result<Self, SkipListError> {
        HistogramLevelGenerator::seeded(capacity, probability, seed).map(Self::with_generator)
    }

    #[instrument(level = "debug")]
    pub fn from_config(config: SkipListConfig) -> Result<Self, SkipListError> {
        match config.seed() {
            | Some(seed) => Self::with_seed(config.capacity(), config.probability(), seed),
            | None => Self::new(config.capacity(), config.probability()),
        }
    }
}

impl<T: Ord, R: Rng> SkipList<T, R> {
    pub fn with_rng(capacity: usize, probability: f64, rng: R) -> Result<Self, SkipListError> {
        HistogramLevelGenerator::with_rng(capacity, probability, rng).map(Self::with_generator)
    }

    fn with_generator(generator: HistogramLevelGenerator<R>) -> Self {
        SkipList {
            head: vec![None; generator.total()].into_boxed_slice(),
            arena: Arena::new(),
            generator,
        }
    }

    /// Insert `value`, returning `false` if an equal key was already present.
    /// A duplicate leaves the list untouched.
    #[instrument(level = "trace", skip_all)]
    pub fn insert(&mut self, value: T) -> bool {
        let mut update: Vec<Cursor> = vec![None; self.max_level()];
        let pred = self.descend(&value, |level, at| update[level] = at);

        if let Some(succ) = self.next(pred, 0) {
            if self.arena[succ].value == value {
                return false;
            }
        }

        let height = self.generator.random();
        assert!(
            (1..=self.max_level()).contains(&height),
            "sampled height {} outside of [1, {}]",
            height,
            self.max_level()
        );

        let id = self.arena.push(Node::new(value, height));
        for (level, &at) in update.iter().enumerate().take(height) {
            self.arena[id].next[level] = self.next(at, level);
            self.set_next(at, level, Some(id));
        }

        self.arena[id].prev = pred;
        if let Some(succ) = self.arena[id].next[0] {
            self.arena[succ].prev = Some(id);
        }

        trace!(height, len = self.len(), "inserted node");
        true
    }
}

impl<T: Ord, R> SkipList<T, R> {
    /// Find the stored key equal to `key`.
    #[instrument(level = "trace", skip_all)]
    pub fn search<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|node| &node.value)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// The height of the tower holding `key`.
    pub fn height_of<Q>(&self, key: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(Node::height)
    }

    fn find<Q>(&self, key: &Q) -> Option<&Node<T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let pred = self.descend(key, |_, _| {});
        self.next(pred, 0)
            .map(|id| &self.arena[id])
            .filter(|node| node.value.borrow() == key)
    }

    /// Walk from the top level down to level 0, advancing along each level
    /// while the next key is strictly less than `key`. `visit` sees the last
    /// position reached on every level, and the final position (the level 0
    /// predecessor of `key`) is returned.
    fn descend<Q>(&self, key: &Q, mut visit: impl FnMut(usize, Cursor)) -> Cursor
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut at: Cursor = None;
        for level in (0..self.max_level()).rev() {
            while let Some(next) = self.next(at, level) {
                if self.arena[next].value.borrow() >= key {
                    break;
                }
                at = Some(next);
            }
            visit(level, at);
        }
        at
    }
}

impl<T, R> SkipList<T, R> {
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.generator.histogram().capacity()
    }

    pub fn probability(&self) -> f64 {
        self.generator.histogram().probability()
    }

    pub fn max_level(&self) -> usize {
        self.head.len()
    }

    /// The cumulative height histogram, `histogram()[i]` being the number of
    /// draws out of `capacity` that yield a height of at most `i`.
    pub fn histogram(&self) -> &[usize] {
        self.generator.histogram().counts()
    }

    pub fn first(&self) -> Option<&T> {
        self.head[0].map(|id| &self.arena[id].value)
    }

    pub fn last(&self) -> Option<&T> {
        let mut at: Cursor = None;
        for level in (0..self.max_level()).rev() {
            while let Some(next) = self.next(at, level) {
                at = Some(next);
            }
        }
        at.map(|id| &self.arena[id].value)
    }

    /// Iterate over every key in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            link: self.head[0],
            remaining: self.len(),
        }
    }

    /// Iterate over the keys whose towers reach `level`, in ascending order.
    pub fn iter_level(&self, level: usize) -> impl Iterator<Item = &T> + '_ {
        self.walk(level).map(|node| &node.value)
    }

    /// Every key with the height of its tower, in ascending key order.
    pub fn towers(&self) -> Vec<(&T, usize)> {
        self.walk(0).map(|node| (&node.value, node.height())).collect()
    }

    /// Check that every level 0 back-reference agrees with the forward chain.
    pub fn check_links(&self) -> bool {
        let mut expected: Cursor = None;
        let mut link = self.head[0];
        while let Some(id) = link {
            let node = &self.arena[id];
            if node.prev != expected {
                return false;
            }
            expected = Some(id);
            link = node.next[0];
        }
        true
    }

    fn walk(&self, level: usize) -> impl Iterator<Item = &Node<T>> + '_ {
        let start = self.head.get(level).copied().flatten();
        std::iter::successors(start.map(|id| &self.arena[id]), move |node| {
            node.next[level].map(|id| &self.arena[id])
        })
    }

    #[inline]
    fn next(&self, at: Cursor, level: usize) -> Link {
        match at {
            | None => self.head[level],
            | Some(id) => self.arena[id].next[level],
        }
    }

    #[inline]
    fn set_next(&mut self, at: Cursor, level: usize, link: Link) {
        match at {
            | None => self.head[level] = link,
            | Some(id) => self.arena[id].next[level] = link,
        }
    }
}

impl<T: fmt::Debug, R> fmt::Debug for SkipList<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkipList")
            .field("max_level", &self.max_level())
            .field("histogram", &self.histogram())
            .field("towers", &self.towers())
            .finish()
    }
}

impl<T: Ord, R: Rng> Extend<T> for SkipList<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T, R> IntoIterator for &'a SkipList<T, R> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// An ascending iterator over the keys of a [`SkipList`].
pub struct Iter<'a, T> {
    arena: &'a Arena<T>,
    link: Link,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = &self.arena[self.link?];
        self.link = node.next[0];
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
