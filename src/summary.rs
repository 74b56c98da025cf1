use indexmap::IndexMap;
use serde::Serialize;

use crate::color::ColorSample;

/// Hex frequency statistics over all grid cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_cells: usize,
    pub unique_colors: usize,
    /// `(hex, count)` by descending count; equal counts keep first-seen order.
    pub most_frequent_colors: Vec<(String, usize)>,
}

impl Summary {
    pub fn from_samples(samples: &[ColorSample]) -> Self {
        let mut frequency: IndexMap<&str, usize> = IndexMap::new();
        for sample in samples {
            *frequency.entry(sample.hex.as_str()).or_insert(0) += 1;
        }

        let mut most_frequent_colors: Vec<(String, usize)> = frequency
            .into_iter()
            .map(|(hex, count)| (hex.to_owned(), count))
            .collect();
        // stable, so ties stay in insertion order
        most_frequent_colors.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            total_cells: samples.len(),
            unique_colors: most_frequent_colors.len(),
            most_frequent_colors,
        }
    }

    pub fn top(&self, n: usize) -> &[(String, usize)] {
        &self.most_frequent_colors[..n.min(self.most_frequent_colors.len())]
    }
}
