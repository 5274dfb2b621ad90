use std::collections::hash_map;
use std::collections::HashMap;

use crate::math::IterationResult;
use crate::rect::ComplexRect;
use crate::util::PixelCoordinate;

/// The raw data of one rendering of the Mandelbrot set: an iteration result
/// per pixel, paired with the crop it was computed for.
///
/// A dataset is an immutable snapshot once the orchestrator publishes it;
/// combining runs goes through [`MandelbrotDataset::merge`], which copies.
#[derive(Clone, Debug, PartialEq)]
pub struct MandelbrotDataset {
    crop: ComplexRect,
    values: HashMap<PixelCoordinate, IterationResult>,
}

impl MandelbrotDataset {
    pub fn new(crop: ComplexRect) -> Self {
        MandelbrotDataset {
            crop,
            values: HashMap::new(),
        }
    }

    pub(crate) fn from_values(
        crop: ComplexRect,
        values: HashMap<PixelCoordinate, IterationResult>,
    ) -> Self {
        MandelbrotDataset { crop, values }
    }

    /// The crop this dataset was computed for, so a consumer can label and
    /// validate what it is displaying.
    pub fn crop(&self) -> ComplexRect {
        self.crop
    }

    pub fn get(&self, coordinate: PixelCoordinate) -> Option<IterationResult> {
        self.values.get(&coordinate).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Full traversal in no particular order. Restartable; call again for a
    /// fresh pass.
    pub fn iter(&self) -> impl Iterator<Item = (&PixelCoordinate, &IterationResult)> {
        self.values.iter()
    }

    /// Overlays `other`'s entries onto this dataset in place; `other` wins on
    /// key collision. The crop is unchanged.
    pub fn insert_all(&mut self, other: &MandelbrotDataset) {
        for (coordinate, iterations) in other.iter() {
            self.values.insert(*coordinate, *iterations);
        }
    }

    /// Non-mutating form of [`MandelbrotDataset::insert_all`]: a copy of
    /// `self` with `other` overlaid.
    pub fn merge(&self, other: &MandelbrotDataset) -> MandelbrotDataset {
        let mut merged = self.clone();
        merged.insert_all(other);
        merged
    }
}

impl Default for MandelbrotDataset {
    fn default() -> Self {
        MandelbrotDataset::new(ComplexRect::DEFAULT_CROP)
    }
}

impl<'a> IntoIterator for &'a MandelbrotDataset {
    type Item = (&'a PixelCoordinate, &'a IterationResult);
    type IntoIter = hash_map::Iter<'a, PixelCoordinate, IterationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(entries: &[(usize, usize, IterationResult)]) -> MandelbrotDataset {
        let values = entries
            .iter()
            .map(|&(x, y, iterations)| (PixelCoordinate::new(x, y), iterations))
            .collect();
        MandelbrotDataset::from_values(ComplexRect::DEFAULT_CROP, values)
    }

    const ESCAPED: IterationResult = IterationResult::Finite {
        iterations: 3,
        limit: 10,
    };
    const BOUNDED: IterationResult = IterationResult::Indefinite { limit: 10 };

    #[test]
    fn lookup_and_traversal() {
        let data = dataset(&[(0, 0, ESCAPED), (1, 0, BOUNDED)]);

        assert_eq!(data.len(), 2);
        assert_eq!(data.get(PixelCoordinate::new(0, 0)), Some(ESCAPED));
        assert_eq!(data.get(PixelCoordinate::new(5, 5)), None);
        assert_eq!(data.iter().count(), 2);
        assert_eq!((&data).into_iter().count(), 2);
    }

    #[test]
    fn merge_with_itself_is_idempotent() {
        let data = dataset(&[(0, 0, ESCAPED), (1, 0, BOUNDED)]);
        assert_eq!(data.merge(&data), data);
    }

    #[test]
    fn merge_prefers_the_other_dataset_on_collision() {
        let stale = dataset(&[(0, 0, ESCAPED), (1, 0, ESCAPED)]);
        let fresh = dataset(&[(1, 0, BOUNDED), (2, 0, BOUNDED)]);

        let merged = stale.merge(&fresh);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get(PixelCoordinate::new(0, 0)), Some(ESCAPED));
        assert_eq!(merged.get(PixelCoordinate::new(1, 0)), Some(BOUNDED));
        assert_eq!(merged.get(PixelCoordinate::new(2, 0)), Some(BOUNDED));

        // The originals are untouched.
        assert_eq!(stale.get(PixelCoordinate::new(1, 0)), Some(ESCAPED));
    }

    #[test]
    fn equality_is_structural() {
        let a = dataset(&[(0, 0, ESCAPED)]);
        let b = dataset(&[(0, 0, ESCAPED)]);
        let c = dataset(&[(0, 0, BOUNDED)]);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut different_crop = b.clone();
        different_crop.crop = ComplexRect::centered_at(
            crate::complex::ComplexNumber::ZERO,
            crate::rect::ComplexSize::new(1.0, 1.0),
        );
        assert_ne!(a, different_crop);
    }

    #[test]
    fn default_is_empty_with_the_default_crop() {
        let data = MandelbrotDataset::default();
        assert!(data.is_empty());
        assert_eq!(data.crop(), ComplexRect::DEFAULT_CROP);
    }
}
