// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

//! An in-memory ordered key index built on a [`skip list`] whose node heights
//! are sampled from a precomputed histogram.
//!
//! The list is single-threaded. Wrap it in a lock if it has to be shared.
//!
//! [`skip list`]: https://en.wikipedia.org/wiki/Skip_list

pub mod config;
pub mod errs;
pub mod skiplist;

pub use crate::{
    config::SkipListConfig,
    errs::SkipListError,
    skiplist::SkipList,
};
