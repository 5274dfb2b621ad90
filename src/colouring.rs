use colorgrad::{Color, CustomGradient, Gradient};

use crate::dataset::MandelbrotDataset;
use crate::math::IterationResult;
use crate::util::image::Image;

// The gradient wraps around, so high iteration counts keep cycling through
// the palette instead of saturating.
const PALETTE_SPAN: u32 = 1024;
const HUE_STEP: u32 = 40;

/// Converts iteration results into display colours.
pub enum ColourMethod {
    /// Escape count walks a cyclic gradient; points that never escaped are
    /// black.
    Iteration(Gradient),
}

impl ColourMethod {
    /// The default blue-white-orange gradient.
    pub fn iteration() -> Self {
        let gradient = CustomGradient::new()
            .colors(&[
                Color::from_rgba8(0, 7, 100, 255),
                Color::from_rgba8(32, 107, 203, 255),
                Color::from_rgba8(237, 255, 255, 255),
                Color::from_rgba8(255, 170, 0, 255),
                Color::from_rgba8(0, 2, 0, 255),
                Color::from_rgba8(0, 7, 100, 255),
            ])
            .domain(&[0.0, 0.16, 0.42, 0.6425, 0.8575, 1.0])
            .build()
            .expect("default palette stops are valid");

        ColourMethod::Iteration(gradient)
    }

    pub fn colour(&self, iterations: IterationResult) -> (u8, u8, u8) {
        match self {
            ColourMethod::Iteration(gradient) => match iterations.iterations() {
                None => (0, 0, 0),
                Some(count) => {
                    let hue = (count.wrapping_mul(HUE_STEP)) % PALETTE_SPAN;
                    let [r, g, b, _] = gradient.at(hue as f64 / PALETTE_SPAN as f64).to_rgba8();
                    (r, g, b)
                }
            },
        }
    }

    /// Paints every entry of the dataset into the image.
    pub fn run(&self, dataset: &MandelbrotDataset, image: &mut Image) {
        for (coordinate, iterations) in dataset {
            let (r, g, b) = self.colour(*iterations);
            image.plot(coordinate.x, coordinate.y, r, g, b);
        }
    }
}
