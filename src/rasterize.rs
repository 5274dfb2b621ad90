use std::str::FromStr;

use itertools::iproduct;
use log::trace;

use crate::complex::ComplexNumber;
use crate::error::Error;
use crate::rect::{ComplexRect, ComplexSize};
use crate::util::{PixelCoordinate, PixelSize};

/// One rasterized sample: a point of the complex plane paired with the pixel
/// it was sampled for.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MandelbrotCoordinate {
    pub complex: ComplexNumber,
    pub screen: PixelCoordinate,
}

/// How a crop whose aspect ratio differs from the pixel grid's is mapped onto
/// it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FitPolicy {
    /// Independent x/y scale. Fills the grid exactly, may distort.
    Stretch,
    /// Preserve aspect ratio, cover the whole grid; the crop's excess along
    /// one axis is clipped.
    Fill,
    /// Preserve aspect ratio, keep the whole crop visible; the sampled region
    /// is padded along one axis.
    Fit,
}

impl Default for FitPolicy {
    fn default() -> Self {
        FitPolicy::Fill
    }
}

impl FromStr for FitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stretch" => Ok(FitPolicy::Stretch),
            "fill" => Ok(FitPolicy::Fill),
            "fit" => Ok(FitPolicy::Fit),
            other => Err(format!("unknown fit policy {other:?}")),
        }
    }
}

/// A crop mapped onto a pixel grid: a finite, restartable source of exactly
/// `resolution.area()` coordinate pairs in row-major order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rasterization {
    region: ComplexRect,
    resolution: PixelSize,
}

impl Rasterization {
    pub fn len(&self) -> usize {
        self.resolution.area()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The region actually sampled, after the fit policy was applied.
    pub fn region(&self) -> ComplexRect {
        self.region
    }

    pub fn iter(&self) -> impl Iterator<Item = MandelbrotCoordinate> {
        let region = self.region;
        let resolution = self.resolution;
        iproduct!(0..resolution.height, 0..resolution.width).map(move |(y, x)| {
            MandelbrotCoordinate {
                complex: region.relative_point(
                    x as f64 / resolution.width as f64,
                    y as f64 / resolution.height as f64,
                ),
                screen: PixelCoordinate::new(x, y),
            }
        })
    }
}

/// Maps `region` onto an integer pixel grid of the given resolution.
///
/// Fails fast with [`Error::InvalidResolution`] when either dimension is
/// zero; a zero-sized view means there is nothing to render yet.
pub fn rasterize(
    region: &ComplexRect,
    resolution: PixelSize,
    policy: FitPolicy,
) -> Result<Rasterization, Error> {
    if resolution.width == 0 || resolution.height == 0 {
        return Err(Error::InvalidResolution {
            width: resolution.width,
            height: resolution.height,
        });
    }

    let effective = effective_region(region, resolution, policy);
    trace!(
        "rasterizing {} at {}x{} ({policy:?}, effective {})",
        region,
        resolution.width,
        resolution.height,
        effective
    );

    Ok(Rasterization {
        region: effective,
        resolution,
    })
}

// Resolves the fit policy into the region actually sampled: Fill crops the
// region to the grid's aspect ratio about its center, Fit pads it.
fn effective_region(region: &ComplexRect, resolution: PixelSize, policy: FitPolicy) -> ComplexRect {
    if region.size.width == 0.0 || region.size.height == 0.0 {
        return *region;
    }

    let grid_aspect = resolution.aspect();
    let size = match policy {
        FitPolicy::Stretch => return *region,
        FitPolicy::Fill => {
            if region.size.aspect() > grid_aspect {
                ComplexSize::new(region.size.height * grid_aspect, region.size.height)
            } else {
                ComplexSize::new(region.size.width, region.size.width / grid_aspect)
            }
        }
        FitPolicy::Fit => {
            if region.size.aspect() > grid_aspect {
                ComplexSize::new(region.size.width, region.size.width / grid_aspect)
            } else {
                ComplexSize::new(region.size.height * grid_aspect, region.size.height)
            }
        }
    };

    ComplexRect::centered_at(region.center(), size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn square_crop() -> ComplexRect {
        ComplexRect::new(ComplexNumber::new(-2.0, -1.5), ComplexSize::new(3.0, 3.0))
    }

    #[test]
    fn produces_one_pair_per_pixel_with_no_duplicates() {
        let raster = rasterize(&square_crop(), PixelSize::new(7, 5), FitPolicy::Stretch).unwrap();
        let screen: HashSet<_> = raster.iter().map(|pair| pair.screen).collect();

        assert_eq!(raster.len(), 35);
        assert_eq!(screen.len(), 35);
        assert!(screen
            .iter()
            .all(|coordinate| coordinate.x < 7 && coordinate.y < 5));
    }

    #[test]
    fn row_major_and_restartable() {
        let raster = rasterize(&square_crop(), PixelSize::new(3, 2), FitPolicy::Stretch).unwrap();

        let first_pass: Vec<_> = raster.iter().collect();
        let second_pass: Vec<_> = raster.iter().collect();
        assert_eq!(first_pass, second_pass);

        let screen: Vec<_> = first_pass.iter().map(|pair| pair.screen).collect();
        assert_eq!(
            screen,
            vec![
                PixelCoordinate::new(0, 0),
                PixelCoordinate::new(1, 0),
                PixelCoordinate::new(2, 0),
                PixelCoordinate::new(0, 1),
                PixelCoordinate::new(1, 1),
                PixelCoordinate::new(2, 1),
            ]
        );
    }

    #[test]
    fn stretch_interpolates_from_the_origin() {
        let raster = rasterize(&square_crop(), PixelSize::new(4, 4), FitPolicy::Stretch).unwrap();
        let pairs: Vec<_> = raster.iter().collect();

        // Pixel (0, 0) sits at the crop origin; pixel (2, 2) is halfway.
        assert_eq!(pairs[0].complex, ComplexNumber::new(-2.0, -1.5));
        assert_eq!(pairs[10].complex, ComplexNumber::new(-0.5, 0.0));
    }

    #[test]
    fn fill_crops_the_wider_axis_to_the_grid_aspect() {
        // A 4x2 crop on a square grid: fill keeps the height and clips the
        // width down to 2, centered.
        let crop = ComplexRect::new(ComplexNumber::new(-2.0, -1.0), ComplexSize::new(4.0, 2.0));
        let raster = rasterize(&crop, PixelSize::new(10, 10), FitPolicy::Fill).unwrap();

        let effective = raster.region();
        assert_eq!(effective.size, ComplexSize::new(2.0, 2.0));
        assert!(effective.center().approx_eq(&crop.center(), 1e-12));
    }

    #[test]
    fn fit_pads_the_narrower_axis_to_the_grid_aspect() {
        let crop = ComplexRect::new(ComplexNumber::new(-2.0, -1.0), ComplexSize::new(4.0, 2.0));
        let raster = rasterize(&crop, PixelSize::new(10, 10), FitPolicy::Fit).unwrap();

        let effective = raster.region();
        assert_eq!(effective.size, ComplexSize::new(4.0, 4.0));
        assert!(effective.center().approx_eq(&crop.center(), 1e-12));
    }

    #[test]
    fn matching_aspect_ratios_leave_the_region_untouched() {
        for policy in [FitPolicy::Stretch, FitPolicy::Fill, FitPolicy::Fit] {
            let raster = rasterize(&square_crop(), PixelSize::new(8, 8), policy).unwrap();
            assert_eq!(raster.region(), square_crop());
        }
    }

    #[test]
    fn zero_resolution_is_rejected() {
        assert_eq!(
            rasterize(&square_crop(), PixelSize::new(0, 5), FitPolicy::Fill),
            Err(Error::InvalidResolution { width: 0, height: 5 })
        );
        assert_eq!(
            rasterize(&square_crop(), PixelSize::new(5, 0), FitPolicy::Fill),
            Err(Error::InvalidResolution { width: 5, height: 0 })
        );
    }

    #[test]
    fn fit_policy_parses_from_cli_names() {
        assert_eq!("stretch".parse::<FitPolicy>().unwrap(), FitPolicy::Stretch);
        assert_eq!("fill".parse::<FitPolicy>().unwrap(), FitPolicy::Fill);
        assert_eq!("fit".parse::<FitPolicy>().unwrap(), FitPolicy::Fit);
        assert!("cover".parse::<FitPolicy>().is_err());
    }
}
