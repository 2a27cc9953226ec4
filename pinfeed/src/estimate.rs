//! Rendered-height estimation for masonry placement.
//!
//! Heights produced here drive column balancing only; they are estimates, not
//! exact pixel layout. The actual on-screen height may differ once an image
//! loads, and the placement pass does not re-balance afterwards.

use derive_setters::Setters;

use crate::pin::{Pin, PinDimensions};

/// Aspect ratios common across pin content, cycled when fabricating
/// dimensions for pins that do not carry any.
pub const COMMON_ASPECT_RATIOS: [(f32, f32); 7] = [
    (2.0, 3.0),
    (3.0, 4.0),
    (1.0, 1.0),
    (4.0, 5.0),
    (9.0, 16.0),
    (1.0, 2.0),
    (4.0, 3.0),
];

/// Reference width used when fabricating intrinsic dimensions.
pub const REFERENCE_WIDTH: f32 = 1000.0;

/// Tuning knobs for height estimation.
///
/// The clamp bounds and footer height are presentation tuning constants; they
/// carry no meaning beyond "looks right" and are kept configurable for that
/// reason.
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct EstimatorArgs {
    /// Lower clamp bound for aspect ratios.
    /// Defaults to `0.5` (very vertical, 1:2).
    pub min_aspect_ratio: f32,
    /// Upper clamp bound for aspect ratios.
    /// Defaults to `1.5` (landscape, 3:2).
    pub max_aspect_ratio: f32,
    /// Fallback ratio used when a pin has no usable dimensions.
    /// Defaults to `2/3`, the portrait bias dominant in pin content.
    pub optimal_aspect_ratio: f32,
    /// Estimated height of the caption/footer rendered below the image.
    /// Defaults to `80.0`.
    pub footer_height: f32,
    /// Whether items render with the caption footer.
    /// Defaults to `true`.
    pub with_footer: bool,
}

impl Default for EstimatorArgs {
    fn default() -> Self {
        Self {
            min_aspect_ratio: 0.5,
            max_aspect_ratio: 1.5,
            optimal_aspect_ratio: 2.0 / 3.0,
            footer_height: 80.0,
            with_footer: true,
        }
    }
}

impl EstimatorArgs {
    /// Clamps a raw aspect ratio into the configured range.
    ///
    /// Non-finite or non-positive ratios fall back to the optimal ratio.
    pub fn clamp_ratio(&self, ratio: f32) -> f32 {
        if !ratio.is_finite() || ratio <= 0.0 {
            return self.optimal_aspect_ratio;
        }
        ratio.max(self.min_aspect_ratio).min(self.max_aspect_ratio)
    }

    /// Estimates the rendered height of `pin` at `column_width`.
    ///
    /// Always strictly positive for any positive column width, including pins
    /// with missing or degenerate dimensions.
    pub fn estimate(&self, pin: &Pin, column_width: f32) -> f32 {
        let width = ensure_positive(column_width);
        let ratio = match pin.dimensions.and_then(|dims| dims.aspect_ratio()) {
            Some(raw) => self.clamp_ratio(raw),
            None => self.optimal_aspect_ratio,
        };
        let image_height = width / ratio;
        if self.with_footer {
            image_height + self.footer_height
        } else {
            image_height
        }
    }

    /// Derives dimensions from an aspect ratio against a reference width.
    ///
    /// The ratio is clamped before the height is computed, so pathological
    /// inputs still produce usable dimensions.
    pub fn generate_dimensions(&self, aspect_ratio: f32, reference_width: f32) -> PinDimensions {
        let width = ensure_positive(reference_width);
        let ratio = self.clamp_ratio(aspect_ratio);
        PinDimensions::new(width, (width / ratio).round())
    }

    /// Fabricates deterministic, varied dimensions keyed by item index.
    ///
    /// Cycles [`COMMON_ASPECT_RATIOS`] so neighbouring items get different
    /// proportions, the way real pin feeds look.
    pub fn varied_dimensions(&self, index: usize) -> PinDimensions {
        let (width, height) = COMMON_ASPECT_RATIOS[index % COMMON_ASPECT_RATIOS.len()];
        self.generate_dimensions(width / height, REFERENCE_WIDTH)
    }

    /// Fills in fabricated dimensions for every pin that has none.
    ///
    /// Pins with usable dimensions are left untouched.
    pub fn enrich_dimensions(&self, pins: &mut [Pin]) {
        for (index, pin) in pins.iter_mut().enumerate() {
            let usable = pin
                .dimensions
                .map(|dims| dims.aspect_ratio().is_some())
                .unwrap_or(false);
            if !usable {
                pin.dimensions = Some(self.varied_dimensions(index));
            }
        }
    }
}

fn ensure_positive(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}
