use crate::core::{Label, Record};
use crate::windows::ForgettingStrategy;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minimum number of records every class should keep in the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClassFloor {
    Uniform(usize),
    PerClass(BTreeMap<Label, usize>),
}

impl ClassFloor {
    pub fn floor_for(&self, label: &str) -> usize {
        match self {
            ClassFloor::Uniform(n) => *n,
            ClassFloor::PerClass(map) => map.get(label).copied().unwrap_or(0),
        }
    }
}

/// Before the oldest partition is dropped, re-samples just enough of its
/// records so every class keeps at least its floor.
///
/// Floors never force extra records to stay: a class already at its floor
/// in the remaining window contributes nothing.
#[derive(Debug)]
pub struct Threshold {
    floor: ClassFloor,
    rng: StdRng,
}

impl Threshold {
    pub fn per_class(floors: BTreeMap<Label, usize>, seed: u64) -> Self {
        Self {
            floor: ClassFloor::PerClass(floors),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Same floor for every class.
    pub fn fixed(min_count: usize, seed: u64) -> Self {
        Self {
            floor: ClassFloor::Uniform(min_count),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn floor(&self) -> &ClassFloor {
        &self.floor
    }

    /// Deficit per class of `candidates` given the counts in `remaining`.
    /// Only classes with a positive deficit are returned.
    pub fn required_data<'a>(
        &self,
        candidates: impl IntoIterator<Item = &'a str>,
        remaining: &[&Record],
    ) -> BTreeMap<Label, usize> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for r in remaining {
            *counts.entry(r.label()).or_default() += 1;
        }
        let mut required = BTreeMap::new();
        for class in candidates {
            let have = counts.get(class).copied().unwrap_or(0);
            let need = self.floor.floor_for(class).saturating_sub(have);
            if need > 0 {
                required.insert(class.to_string(), need);
            }
        }
        required
    }
}

impl ForgettingStrategy for Threshold {
    fn name(&self) -> &'static str {
        match self.floor {
            ClassFloor::Uniform(_) => "fixed_threshold_forgetting",
            ClassFloor::PerClass(_) => "threshold_forgetting",
        }
    }

    fn sample_data(&mut self, to_forget: &[Record], remaining: &[&Record]) -> Vec<Record> {
        let mut by_class: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (i, r) in to_forget.iter().enumerate() {
            by_class.entry(r.label()).or_default().push(i);
        }

        let required = self.required_data(by_class.keys().copied(), remaining);

        let mut picked = Vec::new();
        for (class, count) in required {
            let Some(pool) = by_class.get(class.as_str()) else {
                continue;
            };
            let amount = count.min(pool.len());
            let mut chosen: Vec<usize> = rand::seq::index::sample(&mut self.rng, pool.len(), amount)
                .into_iter()
                .map(|p| pool[p])
                .collect();
            chosen.sort_unstable();
            picked.extend(chosen);
        }
        picked.sort_unstable();
        picked.into_iter().map(|i| to_forget[i].clone()).collect()
    }
}
