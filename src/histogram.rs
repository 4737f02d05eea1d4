use std::collections::HashMap;

use crate::argb::{is_opaque, Argb};

/// Exact-color pixel counts, in order of first appearance.
///
/// Pixels that are not fully opaque are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelHistogram {
    entries: Vec<(Argb, u32)>,
}

impl PixelHistogram {
    pub fn build(pixels: &[Argb]) -> Self {
        let mut index: HashMap<Argb, usize> = HashMap::new();
        let mut entries: Vec<(Argb, u32)> = Vec::new();

        for &pixel in pixels {
            if !is_opaque(pixel) {
                continue;
            }
            match index.get(&pixel) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(pixel, entries.len());
                    entries.push((pixel, 1));
                }
            }
        }

        Self { entries }
    }

    /// `(color, count)` pairs in first-seen order.
    pub fn entries(&self) -> &[(Argb, u32)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(Argb, u32)> {
        self.entries
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of opaque pixels counted.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, count)| count as u64).sum()
    }
}
