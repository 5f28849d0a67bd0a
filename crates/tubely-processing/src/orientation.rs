//! Orientation classification from frame geometry.
//!
//! A frame is landscape when its aspect ratio is within 5% (inclusive, relative)
//! of 16:9, portrait when within 5% of 9:16, and other in every remaining case,
//! including zero dimensions. The comparison is done in integer arithmetic so
//! boundary ratios classify exactly.

use std::fmt;

/// Tolerance expressed as 1/20 = 5%.
const TOLERANCE_DENOMINATOR: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Landscape,
    Portrait,
    Other,
}

impl Orientation {
    /// Key prefix under which objects of this orientation are stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Other => "other",
        }
    }

    pub fn aspect_label(&self) -> &'static str {
        match self {
            Orientation::Landscape => "16:9",
            Orientation::Portrait => "9:16",
            Orientation::Other => "other",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `|w/h - num/den| <= (num/den) / 20`, rearranged to
/// `20 * |den*w - num*h| <= num*h`.
fn within_tolerance(width: u64, height: u64, num: u64, den: u64) -> bool {
    let diff = (den * width).abs_diff(num * height);
    TOLERANCE_DENOMINATOR * diff <= num * height
}

pub fn classify(width: u32, height: u32) -> Orientation {
    if width == 0 || height == 0 {
        return Orientation::Other;
    }

    let (w, h) = (u64::from(width), u64::from(height));
    if within_tolerance(w, h, 16, 9) {
        Orientation::Landscape
    } else if within_tolerance(w, h, 9, 16) {
        Orientation::Portrait
    } else {
        Orientation::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_resolutions() {
        assert_eq!(classify(1920, 1080), Orientation::Landscape);
        assert_eq!(classify(1280, 720), Orientation::Landscape);
        assert_eq!(classify(1080, 1920), Orientation::Portrait);
        assert_eq!(classify(720, 1280), Orientation::Portrait);
        assert_eq!(classify(1080, 1080), Orientation::Other);
        assert_eq!(classify(640, 480), Orientation::Other);
    }

    #[test]
    fn test_scaled_ratios() {
        for k in [1u32, 7, 120, 240] {
            assert_eq!(classify(16 * k, 9 * k), Orientation::Landscape);
            assert_eq!(classify(9 * k, 16 * k), Orientation::Portrait);
        }
    }

    #[test]
    fn test_zero_dimensions() {
        assert_eq!(classify(0, 1080), Orientation::Other);
        assert_eq!(classify(1920, 0), Orientation::Other);
        assert_eq!(classify(0, 0), Orientation::Other);
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        // 1680/900 and 1520/900 sit exactly 5% above and below 16:9.
        assert_eq!(classify(1680, 900), Orientation::Landscape);
        assert_eq!(classify(1520, 900), Orientation::Landscape);
        assert_eq!(classify(1681, 900), Orientation::Other);
        assert_eq!(classify(1519, 900), Orientation::Other);

        // 945/1600 and 855/1600 sit exactly 5% above and below 9:16.
        assert_eq!(classify(945, 1600), Orientation::Portrait);
        assert_eq!(classify(855, 1600), Orientation::Portrait);
        assert_eq!(classify(946, 1600), Orientation::Other);
        assert_eq!(classify(854, 1600), Orientation::Other);
    }

    #[test]
    fn test_large_dimensions_do_not_overflow() {
        assert_eq!(classify(u32::MAX, u32::MAX), Orientation::Other);
        assert_eq!(classify(u32::MAX, 1), Orientation::Other);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Orientation::Landscape.to_string(), "landscape");
        assert_eq!(Orientation::Portrait.aspect_label(), "9:16");
        assert_eq!(Orientation::Other.aspect_label(), "other");
    }
}
