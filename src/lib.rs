//! A `WeightedSamplingSet` is a container of distinct elements, each carrying
//! a positive real weight, supporting insertion, weight update, removal,
//! membership/weight queries, and weighted random sampling (with or without
//! replacement) in expected time independent of the number of elements.
//!
//! It is a specialized tool, purpose-built for scenarios where weights span
//! several orders of magnitude and the element population mutates live
//! between samples. The composition-and-rejection scheme couples logarithmic
//! group binning (see [`bin_index`]) with rejection sampling inside a group
//! (see [`group_bins`]) over partial sums propagated through a flat binary
//! tree (see [`propagation_tree`]), so sampling cost never depends on how
//! many elements are stored, only on how wide the weight range is.

pub mod bin_index;
pub mod element_table;
pub mod error;
pub mod group_bins;
pub mod propagation_tree;
pub mod rng;
pub mod sample_without_replacement;

use std::hash::Hash;

pub use bin_index::BinIndex;
pub use element_table::{ElementTable, Record};
pub use error::SamplerError;
pub use group_bins::GroupBins;
pub use propagation_tree::PropagationTree;
pub use rng::SamplerRng;
pub use sample_without_replacement::SampleWithoutReplacement;

/// A dynamic weighted sampling set over elements of type `E`.
///
/// `E` must be equality-comparable and hashable (the "hash(e) -> bucket"
/// capability the spec treats as injected) and cloneable, since elements are
/// stored by value in up to two places at once (the element table and a
/// group bin) and returned by value from `sample`.
/// Deliberately does not derive `Clone`: a verbatim clone would carry the RNG
/// state over byte-for-byte, so `sample()` on the clone would reproduce the
/// same stream as the original. Use [`WeightedSamplingSet::copy`] instead,
/// which reseeds (or accepts an explicit seed) for an independent stream.
#[derive(Debug)]
pub struct WeightedSamplingSet<E: Eq + Hash + Clone> {
    bin_index: BinIndex,
    table: ElementTable<E>,
    bins: GroupBins<E>,
    tree: PropagationTree,
    rng: SamplerRng,
}

impl<E: Eq + Hash + Clone> WeightedSamplingSet<E> {
    /// Creates an empty set over `[w_min, w_max]`, seeded from OS entropy.
    ///
    /// # Panics
    /// Panics if `w_min` is not positive or `w_max < w_min`.
    pub fn new(w_min: f64, w_max: f64) -> Self {
        Self::with_rng(w_min, w_max, SamplerRng::from_entropy())
    }

    /// Creates an empty set over `[w_min, w_max]`, seeded deterministically.
    ///
    /// # Panics
    /// Panics if `w_min` is not positive or `w_max < w_min`.
    pub fn with_seed(w_min: f64, w_max: f64, seed: u64) -> Self {
        Self::with_rng(w_min, w_max, SamplerRng::from_seed(seed))
    }

    fn with_rng(w_min: f64, w_max: f64, rng: SamplerRng) -> Self {
        let bin_index = BinIndex::new(w_min, w_max);
        let num_groups = bin_index.num_groups();
        Self {
            bin_index,
            table: ElementTable::new(),
            bins: GroupBins::new(num_groups),
            tree: PropagationTree::new(num_groups),
            rng,
        }
    }

    /// Creates a set over `[w_min, w_max]` preloaded with `pairs`, optionally
    /// seeded. Fails on the first pair with an out-of-range weight or a
    /// repeated element, leaving no partially-built set behind for the caller
    /// to observe (the `Result::Err` is returned together with the aborted,
    /// owned set, which the caller drops).
    pub fn from_pairs<I>(
        w_min: f64,
        w_max: f64,
        pairs: I,
        seed: Option<u64>,
    ) -> Result<Self, SamplerError>
    where
        I: IntoIterator<Item = (E, f64)>,
    {
        let mut set = match seed {
            Some(s) => Self::with_seed(w_min, w_max, s),
            None => Self::new(w_min, w_max),
        };
        for (e, w) in pairs {
            set.insert(e, w)?;
        }
        Ok(set)
    }

    /// Inserts `e` with weight `w`.
    ///
    /// # Errors
    /// [`SamplerError::DuplicateElement`] if `e` is already present;
    /// [`SamplerError::OutOfRangeWeight`] if `w` is outside `[w_min, w_max]`.
    pub fn insert(&mut self, e: E, w: f64) -> Result<(), SamplerError> {
        if self.table.contains(&e) {
            return Err(SamplerError::DuplicateElement);
        }
        let g = self.bin_index.group_of(w)?;
        let p = self.bins.append(g, e.clone(), w);
        self.table.put(
            e,
            Record {
                group: g,
                position: p,
                weight: w,
            },
        );
        self.tree.update_leaf(g, w);
        Ok(())
    }

    /// Updates the weight of an existing element `e` to `w_new`, moving it
    /// between groups if necessary.
    ///
    /// # Errors
    /// [`SamplerError::MissingElement`] if `e` is absent;
    /// [`SamplerError::OutOfRangeWeight`] if `w_new` is outside `[w_min, w_max]`.
    pub fn set_weight(&mut self, e: &E, w_new: f64) -> Result<(), SamplerError> {
        let record = *self.table.get(e).ok_or(SamplerError::MissingElement)?;
        let g_new = self.bin_index.group_of(w_new)?;

        if g_new == record.group {
            self.bins
                .overwrite_weight(record.group, record.position, w_new);
            self.tree.update_leaf(record.group, w_new - record.weight);
            self.table.put(
                e.clone(),
                Record {
                    weight: w_new,
                    ..record
                },
            );
            return Ok(());
        }

        let moved = self
            .bins
            .swap_remove(record.group, record.position)
            .cloned();
        self.tree.update_leaf(record.group, -record.weight);
        if let Some(moved_e) = moved {
            self.table.set_position(&moved_e, record.position);
        }

        let p_new = self.bins.append(g_new, e.clone(), w_new);
        self.tree.update_leaf(g_new, w_new);
        self.table.put(
            e.clone(),
            Record {
                group: g_new,
                position: p_new,
                weight: w_new,
            },
        );
        Ok(())
    }

    /// Removes `e` from the set.
    ///
    /// # Errors
    /// [`SamplerError::MissingElement`] if `e` is absent.
    pub fn erase(&mut self, e: &E) -> Result<(), SamplerError> {
        let record = self.table.remove(e).ok_or(SamplerError::MissingElement)?;
        let moved = self
            .bins
            .swap_remove(record.group, record.position)
            .cloned();
        self.tree.update_leaf(record.group, -record.weight);
        if let Some(moved_e) = moved {
            self.table.set_position(&moved_e, record.position);
        }
        Ok(())
    }

    /// Returns `e`'s current weight, or `None` if absent.
    pub fn get_weight(&self, e: &E) -> Option<f64> {
        self.table.get(e).map(|r| r.weight)
    }

    pub fn contains(&self, e: &E) -> bool {
        self.table.contains(e)
    }

    pub fn size(&self) -> usize {
        self.table.size()
    }

    pub fn total_weight(&self) -> f64 {
        self.tree.total()
    }

    /// Draws one element with probability proportional to its weight, via
    /// composition-and-rejection: descend the propagation tree to a group
    /// biased by group weight, pick uniformly within that group's bin, then
    /// accept with probability `weight / upper_bound_of(group)`, retrying on
    /// rejection. Expected number of rejections per sample is bounded by 2.
    ///
    /// Returns `None` if the set is empty.
    pub fn sample(&mut self) -> Option<(E, f64)> {
        if self.table.size() == 0 || self.tree.total() <= 0.0 {
            return None;
        }
        loop {
            let r = self.rng.uniform_below(self.tree.total());
            let g = self.tree.descend(r);
            let bin_size = self.bins.size(g);
            if bin_size == 0 {
                continue;
            }
            let p = self.rng.uniform_index(bin_size);
            let (e, w) = self.bins.at(g, p).clone();
            let w_star = self.bin_index.upper_bound_of(g);
            let u = self.rng.uniform_unit();
            if u * w_star <= w {
                return Some((e, w));
            }
        }
    }

    /// Produces a lazy sequence of up to `n` distinct samples without
    /// replacement. See [`SampleWithoutReplacement`] for the reinsertion
    /// guarantee on drop.
    pub fn sample_without_replacement(&mut self, n: usize) -> SampleWithoutReplacement<'_, E> {
        SampleWithoutReplacement::new(self, n)
    }

    /// Yields every `(element, weight)` pair once, in unspecified order.
    /// Non-restartable; mutating the set while this iterator is live is
    /// prevented by the borrow checker.
    pub fn iterate(&self) -> impl Iterator<Item = (&E, f64)> {
        self.table.iterate().map(|(e, r)| (e, r.weight))
    }

    /// Removes every element, returning the set to its initial empty state.
    /// The RNG stream is left untouched.
    pub fn clear(&mut self) {
        self.table.clear();
        self.bins.clear();
        self.tree = PropagationTree::new(self.bin_index.num_groups());
    }

    /// Deep-copies every component. If `seed` is absent, the copy's RNG is
    /// seeded from a single draw of this set's RNG, adequate for modest
    /// fan-out, but callers making many copies should pass explicit seeds to
    /// avoid birthday collisions across the copies' streams.
    pub fn copy(&mut self, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => SamplerRng::from_seed(s),
            None => SamplerRng::from_seed(self.rng.draw_seed()),
        };
        Self {
            bin_index: self.bin_index,
            table: self.table.clone(),
            bins: self.bins.clone(),
            tree: self.tree.clone(),
            rng,
        }
    }

    /// Recomputes every bin sum and the entire propagation tree exactly from
    /// stored element weights, undoing incremental floating-point drift
    /// accumulated over many mutations.
    pub fn rebalance(&mut self) {
        self.bins.recompute_sums();
        let leaves: Vec<f64> = (0..self.bin_index.num_groups())
            .map(|g| self.bins.sum(g))
            .collect();
        self.tree.rebuild(&leaves);
    }
}
