//! Category Norm switches
//!
//! - **Pairwise** (Troyer, Moscovitch & Winocur, 1997): a switch is predicted
//!   whenever an item shares no category with the item before it.
//! - **Running cluster** (Hills et al., 2015): an item extends the current
//!   cluster only if it shares a category with *every* item of that cluster.
//!
//! Items are resolved through a [`CategoryResolver`], so free-text responses
//! are fuzzy-matched to the norms vocabulary. Items missing from the norms
//! share no category with anything and therefore always switch.

use std::collections::BTreeSet;

use forage_core::{Category, CategorySet, Classification, Item, SwitchCode};
use forage_ports::{CategoryResolver, FluencyInput, SwitchDetector, SwitchResult};
use log::trace;

use crate::method::{NORMS, NORMS_CATEGORICAL};
use crate::validate;

/// Pairwise category switches
pub fn switch_norms(items: &[Item], norms: &dyn CategoryResolver) -> SwitchResult<Classification> {
    validate::non_empty(items.len())?;

    let categories = norms.resolve_all(items);
    let mut classification = Classification::with_capacity(items.len());
    classification.push(SwitchCode::Boundary);
    for pair in categories.windows(2) {
        classification.push(SwitchCode::from_switch(!pair[1].intersects(&pair[0])));
    }
    Ok(classification)
}

/// Running-cluster category switches
pub fn switch_norms_categorical(
    items: &[Item],
    norms: &dyn CategoryResolver,
) -> SwitchResult<Classification> {
    validate::non_empty(items.len())?;

    let categories = norms.resolve_all(items);
    let mut classification = Classification::with_capacity(items.len());
    classification.push(SwitchCode::Boundary);

    let mut cluster = RunningCluster::start(0, &categories[0]);
    for (position, current) in categories.iter().enumerate().skip(1) {
        let is_switch = if position == 1 {
            // Second item only sees the first one
            !current.intersects(&categories[0])
        } else {
            !cluster.shares_category(current)
        };

        if is_switch {
            trace!(
                "Cluster {}..{} closed at '{}'",
                cluster.start,
                position,
                items[position]
            );
            cluster = RunningCluster::start(position, current);
        } else {
            cluster.extend(current);
        }
        classification.push(SwitchCode::from_switch(is_switch));
    }
    Ok(classification)
}

/// Current cluster of the running-cluster scan
///
/// `shared` is the intersection of the categories of every normed member;
/// `None` while no member of the cluster is in the norms.
#[derive(Debug, Clone)]
struct RunningCluster {
    start: usize,
    shared: Option<BTreeSet<Category>>,
}

impl RunningCluster {
    fn start(position: usize, first: &CategorySet) -> Self {
        Self {
            start: position,
            shared: first.categories().cloned(),
        }
    }

    /// Returns true if `item` can join the cluster
    fn shares_category(&self, item: &CategorySet) -> bool {
        match (item.categories(), &self.shared) {
            (None, _) => false,
            // Cluster opened by an unmatched item: the first normed item joins it
            (Some(_), None) => true,
            (Some(categories), Some(shared)) => !categories.is_disjoint(shared),
        }
    }

    fn extend(&mut self, item: &CategorySet) {
        let Some(categories) = item.categories() else {
            return;
        };
        self.shared = Some(match self.shared.take() {
            Some(shared) => shared.intersection(categories).cloned().collect(),
            None => categories.clone(),
        });
    }
}

/// Pairwise norms detector
#[derive(Debug, Clone, Copy, Default)]
pub struct TroyerNorms;

impl SwitchDetector for TroyerNorms {
    fn detect(&self, input: &FluencyInput<'_>) -> SwitchResult<Classification> {
        switch_norms(input.items, input.require_norms(NORMS)?)
    }

    fn name(&self) -> &str {
        NORMS
    }
}

/// Running-cluster norms detector
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoricalNorms;

impl SwitchDetector for CategoricalNorms {
    fn detect(&self, input: &FluencyInput<'_>) -> SwitchResult<Classification> {
        switch_norms_categorical(input.items, input.require_norms(NORMS_CATEGORICAL)?)
    }

    fn name(&self) -> &str {
        NORMS_CATEGORICAL
    }
}
