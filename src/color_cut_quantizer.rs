use crate::color::Color;
use std::collections::{BinaryHeap, HashMap};

pub(crate) struct ColorCutQuantizer<P>
where
    P: image::Pixel<Subpixel = u8>,
{
    pixels: Vec<P>,
    palette_size: usize,
}

/// The outcome of quantizing an image: the representative color of each bucket, and for every
/// source pixel the index of the bucket it was assigned to.
pub(crate) struct Quantization {
    pub palette: Vec<Color>,
    pub assignments: Vec<usize>,
}

struct Vbox<'a, P>
where
    P: image::Pixel<Subpixel = u8> + std::cmp::Eq + std::hash::Hash,
{
    colors: &'a mut [(P, u32)],
    population: u32,
    red_range: (u8, u8),
    green_range: (u8, u8),
    blue_range: (u8, u8),
}

enum Component {
    Red,
    Green,
    Blue,
}

impl<P> ColorCutQuantizer<P>
where
    P: image::Pixel<Subpixel = u8> + std::cmp::Eq + std::hash::Hash,
{
    pub fn new(pixels: Vec<P>, palette_size: usize) -> Self {
        Self { pixels, palette_size }
    }

    pub fn quantize(self) -> Quantization {
        // begin by generating a histogram of the pixel values
        let mut hist = HashMap::new();
        for pixel in self.pixels.iter() {
            *hist.entry(*pixel).or_insert(0u32) += 1;
        }

        // the distinct colors have to be in a deterministic order before any buckets are formed,
        // so order them by combining their channels into a single integer where the red channel is
        // the most significant and the blue the least
        let mut colors = hist.into_iter().collect::<Vec<_>>();
        colors.sort_unstable_by_key(|(pixel, _)| {
            let (r, g, b) = pixel_to_rgb(pixel);
            ((r as u32) << 16) | ((g as u32) << 8) | b as u32
        });

        // map each distinct color to the index of the bucket it ends up in so every source pixel
        // can be assigned afterwards
        let mut bucket_of = HashMap::new();
        let mut palette = Vec::new();

        if colors.len() <= self.palette_size {
            // there are less colors than requested, no need for further processing; each distinct
            // color becomes a bucket of its own with its exact color as the representative
            for (index, (pixel, _)) in colors.iter().enumerate() {
                let (r, g, b) = pixel_to_rgb(pixel);
                palette.push(Color::new(r, g, b));
                bucket_of.insert(*pixel, index);
            }
        } else {
            for (index, vbox) in split_into_boxes(&mut colors, self.palette_size).iter().enumerate() {
                palette.push(vbox.get_average_color());

                for (pixel, _) in vbox.colors.iter() {
                    bucket_of.insert(*pixel, index);
                }
            }
        }

        let assignments = self.pixels.iter().map(|pixel| bucket_of[pixel]).collect();

        Quantization { palette, assignments }
    }
}

fn split_into_boxes<P>(colors: &mut [(P, u32)], palette_size: usize) -> Vec<Vbox<'_, P>>
where
    P: image::Pixel<Subpixel = u8> + std::cmp::Eq + std::hash::Hash,
{
    // create a priority queue of Vboxes with the first one containing all the given colors. Vbox
    // comparison is based on their volume, reversed, so the queue always pops the largest Vbox by
    // volume first
    let mut pq = BinaryHeap::with_capacity(palette_size);
    pq.push(Vbox::new(colors));

    // go through the queue until there are enough boxes or no more boxes to split
    while pq.len() < palette_size {
        match pq.pop() {
            Some(vbox) if vbox.can_split() => {
                // split the box in two and push them both back to the queue
                let (left, right) = vbox.split_box();

                pq.push(left);
                pq.push(right);
            }
            Some(vbox) => {
                // the largest box holds a single distinct color; it has to stay in the queue so
                // the pixels in it keep a bucket
                pq.push(vbox);
                break;
            }
            None => break,
        }
    }

    // drain the queue in its comparison order so bucket indices are deterministic
    pq.into_sorted_vec()
}

impl<'a, P> Vbox<'a, P>
where
    P: image::Pixel<Subpixel = u8> + std::cmp::Eq + std::hash::Hash,
{
    fn new(colors: &'a mut [(P, u32)]) -> Self {
        // compute the boundaries of the Vbox to tightly fit around the colors within it

        let mut population = 0;
        // min, max
        let (mut min_red, mut max_red) = (u8::MAX, 0);
        let (mut min_green, mut max_green) = (u8::MAX, 0);
        let (mut min_blue, mut max_blue) = (u8::MAX, 0);

        for (pixel, count) in colors.iter() {
            let (r, g, b) = pixel_to_rgb(pixel);
            population += count;

            if r < min_red {
                min_red = r;
            }

            if r > max_red {
                max_red = r;
            }

            if g < min_green {
                min_green = g;
            }

            if g > max_green {
                max_green = g;
            }

            if b < min_blue {
                min_blue = b;
            }

            if b > max_blue {
                max_blue = b;
            }
        }

        Self {
            colors,
            population,
            red_range: (min_red, max_red),
            green_range: (min_green, max_green),
            blue_range: (min_blue, max_blue),
        }
    }

    fn volume(&self) -> u32 {
        (self.red_range.1 as u32 - self.red_range.0 as u32 + 1)
            * (self.green_range.1 as u32 - self.green_range.0 as u32 + 1)
            * (self.blue_range.1 as u32 - self.blue_range.0 as u32 + 1)
    }

    fn split_box(mut self) -> (Vbox<'a, P>, Vbox<'a, P>) {
        // split the Vbox at the midpoint of its largest color dimension

        assert!(self.can_split());

        // sort the colors by the longest dimension so the midpoint can be searched for
        self.sort_colors_by_longest_dimension();

        let split_point = self.find_split_point();
        let (old, new) = self.colors.split_at_mut(split_point);

        let old_box = Vbox::new(old);
        let new_box = Vbox::new(new);

        (old_box, new_box)
    }

    fn sort_colors_by_longest_dimension(&mut self) {
        let longest_dimension = self.get_longest_dimension();

        self.colors.sort_by(|(lhs, _), (rhs, _)| match longest_dimension {
            Component::Red => pixel_to_rgb(lhs).0.cmp(&pixel_to_rgb(rhs).0),
            Component::Green => pixel_to_rgb(lhs).1.cmp(&pixel_to_rgb(rhs).1),
            Component::Blue => pixel_to_rgb(lhs).2.cmp(&pixel_to_rgb(rhs).2),
        });
    }

    fn find_split_point(&mut self) -> usize {
        let midpoint = self.population / 2;
        let mut pop = 0;

        // keep a total sum of all the color populations and return the first one that crosses the
        // midpoint. if no such color is found, return the first index to still split the Vbox in
        // two
        for (i, (_, count)) in self.colors.iter().enumerate() {
            pop += count;

            if pop >= midpoint {
                // in case the first color (index 0) already crosses the midpoint, return the color
                // after it in order to always split the Vbox in two
                return i.max(1);
            }
        }

        1
    }

    fn can_split(&self) -> bool {
        self.colors.len() > 1
    }

    fn get_longest_dimension(&self) -> Component {
        let red_length = self.red_range.1 - self.red_range.0;
        let green_length = self.green_range.1 - self.green_range.0;
        let blue_length = self.blue_range.1 - self.blue_range.0;

        if red_length >= green_length && red_length >= blue_length {
            Component::Red
        } else if green_length >= red_length && green_length >= blue_length {
            Component::Green
        } else {
            Component::Blue
        }
    }

    fn get_average_color(&self) -> Color {
        // calculate the sum of all the color populations, as well as weighted sums of each color
        // channel based on the color populations
        let (pop, red_sum, green_sum, blue_sum) =
            self.colors
                .iter()
                .fold((0u64, 0u64, 0u64, 0u64), |(pop, red_sum, green_sum, blue_sum), (pixel, count)| {
                    let (r, g, b) = pixel_to_rgb(pixel);
                    let count = *count as u64;

                    (
                        pop + count,
                        red_sum + r as u64 * count,
                        green_sum + g as u64 * count,
                        blue_sum + b as u64 * count,
                    )
                });

        // the representative color is the population-weighted mean of each channel
        let red_mean = (red_sum as f64 / pop as f64).round() as u8;
        let green_mean = (green_sum as f64 / pop as f64).round() as u8;
        let blue_mean = (blue_sum as f64 / pop as f64).round() as u8;

        Color::new(red_mean, green_mean, blue_mean)
    }
}

impl<P> Eq for Vbox<'_, P> where P: image::Pixel<Subpixel = u8> + std::cmp::Eq + std::hash::Hash {}
impl<P> PartialEq for Vbox<'_, P>
where
    P: image::Pixel<Subpixel = u8> + std::cmp::Eq + std::hash::Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.volume() == other.volume()
    }
}

impl<P> Ord for Vbox<'_, P>
where
    P: image::Pixel<Subpixel = u8> + std::cmp::Eq + std::hash::Hash,
{
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.volume().cmp(&self.volume())
    }
}

impl<P> PartialOrd for Vbox<'_, P>
where
    P: image::Pixel<Subpixel = u8> + std::cmp::Eq + std::hash::Hash,
{
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

fn pixel_to_rgb<P>(pixel: &P) -> (u8, u8, u8)
where
    P: image::Pixel<Subpixel = u8>,
{
    let rgb = pixel.to_rgb();
    (rgb.0[0], rgb.0[1], rgb.0[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn pixels_of(colors: &[(u8, u8, u8)]) -> Vec<Rgb<u8>> {
        colors.iter().map(|&(r, g, b)| Rgb([r, g, b])).collect()
    }

    #[test]
    fn distinct_colors_within_budget_keep_their_exact_values() {
        let pixels = pixels_of(&[(255, 0, 0), (255, 0, 0), (255, 255, 255), (0, 128, 64)]);

        let quantization = ColorCutQuantizer::new(pixels, 16).quantize();
        assert_eq!(
            quantization.palette,
            vec![Color::new(0, 128, 64), Color::new(255, 0, 0), Color::new(255, 255, 255)]
        );
    }

    #[test]
    fn every_pixel_is_assigned_to_a_valid_bucket() {
        let pixels = pixels_of(&[
            (0, 0, 0),
            (255, 0, 0),
            (0, 255, 0),
            (0, 0, 255),
            (128, 128, 128),
            (255, 255, 0),
        ]);

        let quantization = ColorCutQuantizer::new(pixels.clone(), 3).quantize();
        assert!(quantization.palette.len() <= 3);
        assert_eq!(quantization.assignments.len(), pixels.len());
        assert!(quantization.assignments.iter().all(|&bucket| bucket < quantization.palette.len()));
    }

    #[test]
    fn identical_pixels_share_a_bucket() {
        let pixels = pixels_of(&[(10, 20, 30), (40, 50, 60), (10, 20, 30)]);

        let quantization = ColorCutQuantizer::new(pixels, 16).quantize();
        assert_eq!(quantization.assignments[0], quantization.assignments[2]);
        assert_ne!(quantization.assignments[0], quantization.assignments[1]);
    }

    #[test]
    fn quantization_is_deterministic() {
        let pixels = pixels_of(&[
            (12, 34, 56),
            (200, 10, 10),
            (10, 200, 10),
            (10, 10, 200),
            (100, 100, 100),
            (250, 250, 0),
            (0, 250, 250),
        ]);

        let first = ColorCutQuantizer::new(pixels.clone(), 4).quantize();
        let second = ColorCutQuantizer::new(pixels, 4).quantize();

        assert_eq!(first.palette, second.palette);
        assert_eq!(first.assignments, second.assignments);
    }

    #[test]
    fn no_pixels_yield_an_empty_quantization() {
        let quantization = ColorCutQuantizer::new(Vec::<Rgb<u8>>::new(), 16).quantize();
        assert!(quantization.palette.is_empty());
        assert!(quantization.assignments.is_empty());
    }
}
