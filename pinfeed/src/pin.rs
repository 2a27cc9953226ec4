//! Pin data model shared by the feed assembler.
//!
//! A [`Pin`] is one feed entry: an image reference plus display metadata and
//! per-item interaction state. The layout and pagination code only ever reads
//! `id` and `dimensions`; everything else is carried for the presentation
//! layer.

use derive_setters::Setters;

/// Reference to a pin's image content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Remote image addressed by a URI.
    Remote(String),
    /// Bundled image addressed by an opaque asset handle.
    Local(u64),
}

/// Intrinsic dimensions of a pin's image, when known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinDimensions {
    /// Source image width.
    pub width: f32,
    /// Source image height.
    pub height: f32,
}

impl PinDimensions {
    /// Creates a dimension pair.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns `width / height` if both dimensions are finite and positive.
    pub fn aspect_ratio(&self) -> Option<f32> {
        let valid = self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0;
        valid.then(|| self.width / self.height)
    }
}

/// One feed entry.
///
/// `id` is the de-duplication key and must be unique within any feed snapshot
/// handed to the layout pass; see [`crate::feed::FeedSession::combined`] for
/// how collisions across sources are resolved.
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct Pin {
    /// Unique identifier within the combined feed.
    #[setters(skip)]
    pub id: String,
    /// Where the image content lives.
    #[setters(skip)]
    pub image: ImageSource,
    /// Display title.
    pub title: String,
    /// Display description.
    pub description: String,
    /// Display author name.
    pub author: String,
    /// Number of likes.
    pub like_count: u32,
    /// Whether the current user has liked this pin.
    pub is_liked: bool,
    /// Whether the current user has saved this pin.
    pub is_saved: bool,
    /// Intrinsic image dimensions, if known.
    #[setters(strip_option)]
    pub dimensions: Option<PinDimensions>,
}

impl Pin {
    /// Creates a pin with empty metadata and no interaction state.
    pub fn new(id: impl Into<String>, image: ImageSource) -> Self {
        Self {
            id: id.into(),
            image,
            title: String::new(),
            description: String::new(),
            author: String::new(),
            like_count: 0,
            is_liked: false,
            is_saved: false,
            dimensions: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_valid() {
        let dims = PinDimensions::new(2.0, 3.0);
        assert_eq!(dims.aspect_ratio(), Some(2.0 / 3.0));
    }

    #[test]
    fn test_aspect_ratio_rejects_degenerate_dimensions() {
        assert_eq!(PinDimensions::new(0.0, 3.0).aspect_ratio(), None);
        assert_eq!(PinDimensions::new(2.0, -1.0).aspect_ratio(), None);
        assert_eq!(PinDimensions::new(f32::NAN, 3.0).aspect_ratio(), None);
        assert_eq!(PinDimensions::new(2.0, f32::INFINITY).aspect_ratio(), None);
    }

    #[test]
    fn test_pin_defaults() {
        let pin = Pin::new("p1", ImageSource::Local(42));
        assert_eq!(pin.id, "p1");
        assert_eq!(pin.like_count, 0);
        assert!(!pin.is_liked);
        assert!(!pin.is_saved);
        assert!(pin.dimensions.is_none());
    }

    #[test]
    fn test_pin_setters_chain() {
        let pin = Pin::new("p2", ImageSource::Remote("https://example.com/a.jpg".into()))
            .title("Rainy alley".to_string())
            .like_count(3)
            .dimensions(PinDimensions::new(2.0, 3.0));
        assert_eq!(pin.title, "Rainy alley");
        assert_eq!(pin.like_count, 3);
        assert!(pin.dimensions.is_some());
    }
}
