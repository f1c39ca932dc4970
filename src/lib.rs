// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A library to extract the most used colors of an image and arrange them into a strip of labeled
//! color swatches.
//!
//! Extraction and layout are two independent, pure steps. [`Palette`] reduces an image to its most
//! frequent representative colors with a median-cut quantizer, ranked by how many pixels each one
//! covers. [`layout`] turns that ordered palette into positioned swatch rectangles, either strung
//! along an edge of a page or stretched across a selection bounding box, ready to be rendered by
//! the host document.
//!
//! ```no_run
//! use swatch_strip::{layout, LayoutConfig, Palette, ReferenceArea};
//!
//! let palette = Palette::from_path("image.jpg")?.max_colors(5).extract();
//!
//! let config = LayoutConfig::default();
//! let area = ReferenceArea::Page { width: 210.0, height: 297.0 };
//! let swatches = layout(palette.colors(), &config, &area)?;
//! # Ok::<(), swatch_strip::Error>(())
//! ```

mod color;
mod color_cut_quantizer;
mod error;
mod filter;
mod layout;
mod style;

pub const DEFAULT_PALETTE_SIZE: usize = 16;
pub const DEFAULT_MAX_COLORS: usize = 5;

pub use crate::{
    color::Color,
    error::{Error, Result},
    filter::{Filter, WhiteFilter},
    layout::{layout, Label, LayoutConfig, Orientation, Point, ReferenceArea, Swatch, DEFAULT_CORNER_RADIUS},
    style::{AttrValue, Style},
};
pub use image;
pub use palette;

use color_cut_quantizer::{ColorCutQuantizer, Quantization};
use image::ImageBuffer;
use palette::IntoColor;
use std::path::Path;

/// An ordered set of representative colors extracted from an image, most frequent first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    colors: Vec<Color>,
}

pub struct PaletteBuilder<P>
where
    P: image::Pixel<Subpixel = u8> + 'static + std::cmp::Eq + std::hash::Hash,
{
    image: ImageBuffer<P, Vec<<P as image::Pixel>::Subpixel>>,
    palette_size: usize,
    max_colors: usize,
    filters: Vec<Box<dyn Filter>>,
}

impl Palette {
    pub fn from_image<P>(image: ImageBuffer<P, Vec<<P as image::Pixel>::Subpixel>>) -> PaletteBuilder<P>
    where
        P: image::Pixel<Subpixel = u8> + 'static + std::cmp::Eq + std::hash::Hash,
    {
        PaletteBuilder::from_image(image)
    }

    /// Decode an image from a file and begin building a palette from it. Decoding failures are
    /// returned as [`Error::ImageDecode`] untouched.
    pub fn from_path<P>(path: P) -> Result<PaletteBuilder<image::Rgb<u8>>>
    where
        P: AsRef<Path>,
    {
        let image = image::open(path)?.to_rgb8();
        Ok(PaletteBuilder::from_image(image))
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The color covering the most pixels, if any color survived filtering.
    pub fn most_prominent_color(&self) -> Option<Color> {
        self.colors.first().copied()
    }
}

impl<P> PaletteBuilder<P>
where
    P: image::Pixel<Subpixel = u8> + 'static + std::cmp::Eq + std::hash::Hash,
{
    pub fn from_image(image: ImageBuffer<P, Vec<<P as image::Pixel>::Subpixel>>) -> Self {
        Self {
            image,
            palette_size: DEFAULT_PALETTE_SIZE,
            max_colors: DEFAULT_MAX_COLORS,
            filters: vec![Box::new(WhiteFilter)],
        }
    }

    /// Set how many representative colors the quantizer may produce before ranking. Has to be at
    /// least [`max_colors`](Self::max_colors) for the extraction to be able to fill every slot.
    pub fn palette_size(self, palette_size: usize) -> Self {
        Self { palette_size, ..self }
    }

    /// Cap the amount of colors in the extracted palette.
    pub fn max_colors(self, max_colors: usize) -> Self {
        Self { max_colors, ..self }
    }

    pub fn add_filter<F>(mut self, filter: F) -> Self
    where
        F: Filter + 'static,
    {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn clear_filters(self) -> Self {
        Self {
            filters: Vec::new(),
            ..self
        }
    }

    /// Quantize the image and return its representative colors ranked by descending pixel count.
    ///
    /// Colors disallowed by a filter are skipped without consuming one of the `max_colors` slots.
    /// When two buckets cover an equal amount of pixels, the one with the higher bucket index
    /// ranks first; the ordering is fully deterministic for a given image.
    pub fn extract(self) -> Palette {
        let pixels = self.image.pixels().copied().collect();
        let Quantization { palette, assignments } = ColorCutQuantizer::new(pixels, self.palette_size).quantize();

        let mut counts = vec![0u32; palette.len()];
        for &bucket in &assignments {
            counts[bucket] += 1;
        }

        let mut ranked: Vec<usize> = (0..palette.len()).collect();
        ranked.sort_unstable_by(|&a, &b| (counts[b], b).cmp(&(counts[a], a)));

        let mut colors = Vec::with_capacity(self.max_colors.min(palette.len()));
        for bucket in ranked {
            if colors.len() >= self.max_colors {
                break;
            }

            let color = palette[bucket];
            if !self.should_ignore_color(color) {
                colors.push(color);
            }
        }

        Palette { colors }
    }

    fn should_ignore_color(&self, color: Color) -> bool {
        let rgb = color.rgb();
        let hsl = rgb_to_hsl(rgb);
        self.filters.iter().any(|filter| !filter.is_allowed(rgb, hsl))
    }
}

fn rgb_to_hsl(rgb: (u8, u8, u8)) -> (f32, f32, f32) {
    let raw = palette::Srgb::from_components(rgb);
    let raw_float: palette::Srgb<f32> = raw.into_format();
    let hsl: palette::Hsl = raw_float.into_color();
    let (h, s, l) = hsl.into_components();

    (h.to_positive_degrees(), s, l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn image_of(pixels: &[(u8, u8, u8)]) -> RgbImage {
        let mut image = RgbImage::new(pixels.len() as u32, 1);
        for (x, &(r, g, b)) in pixels.iter().enumerate() {
            image.put_pixel(x as u32, 0, Rgb([r, g, b]));
        }

        image
    }

    #[test]
    fn ranks_by_descending_pixel_count() {
        let image = image_of(&[
            (200, 0, 0),
            (200, 0, 0),
            (200, 0, 0),
            (0, 0, 200),
            (0, 0, 200),
            (0, 200, 0),
        ]);

        let palette = Palette::from_image(image).extract();
        assert_eq!(
            palette.colors(),
            &[Color::new(200, 0, 0), Color::new(0, 0, 200), Color::new(0, 200, 0)]
        );
    }

    #[test]
    fn equal_counts_prefer_the_higher_bucket_index() {
        // distinct colors are ordered by their combined channel integer before bucket indices are
        // assigned, so (0,0,10) becomes bucket 0 and (10,0,0) bucket 1. with equal pixel counts
        // the higher index has to come out first
        let image = image_of(&[(10, 0, 0), (0, 0, 10), (10, 0, 0), (0, 0, 10)]);

        let palette = Palette::from_image(image).extract();
        assert_eq!(palette.colors(), &[Color::new(10, 0, 0), Color::new(0, 0, 10)]);
    }

    #[test]
    fn caps_the_palette_at_max_colors() {
        let image = image_of(&[(10, 0, 0), (0, 10, 0), (0, 0, 10), (10, 10, 0), (0, 10, 10)]);

        for cap in 0..6 {
            let palette = Palette::from_image(image.clone()).max_colors(cap).extract();
            assert!(palette.len() <= cap);
        }
    }

    #[test]
    fn white_is_skipped_without_consuming_a_slot() {
        let image = image_of(&[
            (255, 255, 255),
            (255, 255, 255),
            (255, 255, 255),
            (200, 0, 0),
            (0, 0, 200),
        ]);

        let palette = Palette::from_image(image).max_colors(2).extract();
        assert_eq!(palette.colors(), &[Color::new(200, 0, 0), Color::new(0, 0, 200)]);
    }

    #[test]
    fn white_ranks_normally_with_filters_cleared() {
        let image = image_of(&[(255, 255, 255), (255, 255, 255), (200, 0, 0)]);

        let palette = Palette::from_image(image).clear_filters().extract();
        assert_eq!(palette.most_prominent_color(), Some(Color::new(255, 255, 255)));
    }

    #[test]
    fn fewer_distinct_colors_than_requested_yields_a_shorter_palette() {
        let image = image_of(&[(200, 0, 0), (0, 0, 200)]);

        let palette = Palette::from_image(image).max_colors(5).extract();
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn empty_image_yields_an_empty_palette() {
        let palette = Palette::from_image(RgbImage::new(0, 0)).extract();
        assert!(palette.is_empty());
    }
}
