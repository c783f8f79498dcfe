use serde::{Serialize, Deserialize};

use std::fmt;
use std::collections::BTreeMap;


/// Number of rows per label on a node.
pub(crate) type LabelToWeight = BTreeMap<i64, f64>;


/// Splitting criteria for growing decision tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitBy {
    /// Gini index.
    Gini,
    /// Entropy function.
    Entropy,
}

impl Default for SplitBy {
    fn default() -> Self {
        Self::Gini
    }
}

impl fmt::Display for SplitBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Gini => "Gini index",
            Self::Entropy => "Entropy",
        };

        write!(f, "{name}")
    }
}

impl SplitBy {
    /// Returns the impurity of a node whose label counts are `map`.
    #[inline]
    pub(crate) fn impurity(&self, map: &LabelToWeight) -> f64 {
        match self {
            Self::Gini => gini_impurity(map),
            Self::Entropy => entropic_impurity(map),
        }
    }


    /// Returns the best threshold on one feature and
    /// its weighted child impurity.
    ///
    /// `pairs` holds `(feature value, label)` of the rows on the node,
    /// sorted by the feature value.
    /// `parent` is the label count of the node.
    /// Returns `None` if all values are equal.
    pub(crate) fn best_threshold(
        &self,
        pairs:  &[(f64, i64)],
        parent: &LabelToWeight,
    ) -> Option<(f64, f64)>
    {
        let total = pairs.len() as f64;

        let mut left = LabelToWeight::new();
        let mut right = parent.clone();

        let mut best: Option<(f64, f64)> = None;
        for (k, window) in pairs.windows(2).enumerate() {
            let (x, y) = window[0];
            let next = window[1].0;

            *left.entry(y).or_insert(0f64) += 1f64;
            if let Some(entry) = right.get_mut(&y) {
                *entry -= 1f64;
                if *entry <= 0f64 { right.remove(&y); }
            }

            // No threshold separates equal values.
            if x == next { continue; }

            let lp = (k + 1) as f64 / total;
            let rp = (1f64 - lp).max(0f64);
            let score = lp * self.impurity(&left) + rp * self.impurity(&right);

            if best.map_or(true, |(_, s)| score < s) {
                best = Some((0.5 * (x + next), score));
            }
        }
        best
    }
}

/// Returns the entropic-impurity of the given map.
#[inline(always)]
fn entropic_impurity(map: &LabelToWeight) -> f64 {
    let total = map.values().sum::<f64>();
    if total <= 0f64 || map.is_empty() { return 0f64; }

    map.values()
        .map(|&p| {
            let r = p / total;
            if r <= 0f64 { 0f64 } else { -r * r.ln() }
        })
        .sum::<f64>()
}

/// Returns the gini-impurity of the given map.
#[inline(always)]
fn gini_impurity(map: &LabelToWeight) -> f64 {
    let total = map.values().sum::<f64>();
    if total <= 0f64 || map.is_empty() { return 0f64; }

    let correct = map.values()
        .map(|&w| (w / total).powi(2))
        .sum::<f64>();

    (1f64 - correct).max(0f64)
}
