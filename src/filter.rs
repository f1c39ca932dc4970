/// A trait used to implement filters for the extracted palette.
///
/// After ranking, filters decide which representative colors make it into the final palette. A
/// disallowed color is skipped entirely and does not consume one of the palette's slots. This
/// trait allows the library consumer to implement custom filters.
///
/// See [`crate::PaletteBuilder::add_filter`] on how to add filters to the extraction.
pub trait Filter {
    /// Return whether a given color should be allowed or not. The same color is given in both sRGB
    /// and HSL for convenience.
    fn is_allowed(&self, rgb: (u8, u8, u8), hsl: (f32, f32, f32)) -> bool;
}

/// The filter included in every [`crate::PaletteBuilder`] by default.
///
/// This filter will disallow pure white, (255, 255, 255), and nothing else. Use
/// [`crate::PaletteBuilder::clear_filters`] to let white rank like any other color.
#[derive(Debug)]
pub struct WhiteFilter;
impl Filter for WhiteFilter {
    fn is_allowed(&self, rgb: (u8, u8, u8), _: (f32, f32, f32)) -> bool {
        rgb != (255, 255, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pure_white_is_disallowed() {
        let hsl = (0.0, 0.0, 1.0);
        assert!(!WhiteFilter.is_allowed((255, 255, 255), hsl));
        assert!(WhiteFilter.is_allowed((255, 255, 254), hsl));
        assert!(WhiteFilter.is_allowed((254, 255, 255), hsl));
        assert!(WhiteFilter.is_allowed((0, 0, 0), (0.0, 0.0, 0.0)));
    }
}
