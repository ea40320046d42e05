// Raster images and pixel classification.
//
// A `Raster` is the exchange format between the core and the host: the
// input site plan comes in as one, and `VoxelGrid::image_from_grid()`
// produces one. Pixels are normalized [0,1] RGB; the pixel grid matches
// the voxel grid's ground plane (width = size.x, height = size.z).
//
// `classify_pixel` scores a pixel against the eight category prototypes by
// sum of absolute per-channel differences and picks the prototype with the
// **maximum** score. That is the inverse of a nearest-color rule. Input
// palettes are authored against this exact behavior, so the rule, the
// prototype order, and the tie handling must not change.

use crate::types::{FunctionColor, Rgb};
use serde::{Deserialize, Serialize};

/// The eight classification prototypes, in scoring order. First index wins
/// ties (the comparison is strictly-greater).
pub const PROTOTYPES: [(FunctionColor, Rgb); 8] = [
    (FunctionColor::Cyan, Rgb::new(0.0, 1.0, 1.0)),
    (FunctionColor::Blue, Rgb::new(0.0, 0.0, 1.0)),
    (FunctionColor::Magenta, Rgb::new(1.0, 0.0, 1.0)),
    (FunctionColor::Red, Rgb::new(1.0, 0.0, 0.0)),
    (FunctionColor::Green, Rgb::new(0.0, 1.0, 0.0)),
    (FunctionColor::Yellow, Rgb::new(1.0, 1.0, 0.0)),
    (FunctionColor::White, Rgb::new(1.0, 1.0, 1.0)),
    (FunctionColor::Gray, Rgb::new(0.5, 0.5, 0.5)),
];

/// Classify a pixel against the prototypes. Returns the winning category
/// and its score.
pub fn classify_pixel(pixel: Rgb) -> (FunctionColor, f32) {
    let mut winner = PROTOTYPES[0].0;
    let mut biggest = 0.0f32;
    for (category, prototype) in PROTOTYPES {
        let score = pixel.channel_distance(prototype);
        if score > biggest {
            biggest = score;
            winner = category;
        }
    }
    (winner, biggest)
}

/// A dense RGB image with normalized channels, row-major from (0, 0).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Raster {
    /// Create a raster filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::new(0.0, 0.0, 0.0); (width as usize) * (height as usize)],
        }
    }

    /// Create a raster from row-major pixel data. Returns `None` if the
    /// pixel count does not match the dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read a pixel. Returns `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y as usize) * (self.width as usize) + x as usize])
    }

    /// Write a pixel. No-op out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        if x < self.width && y < self.height {
            self.pixels[(y as usize) * (self.width as usize) + x as usize] = color;
        }
    }

    /// Mutable access to the raw pixel buffer, for parallel fills.
    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_starts_black() {
        let raster = Raster::new(3, 2);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(raster.pixel(x, y), Some(Rgb::new(0.0, 0.0, 0.0)));
            }
        }
    }

    #[test]
    fn pixel_out_of_bounds_is_none() {
        let raster = Raster::new(3, 2);
        assert_eq!(raster.pixel(3, 0), None);
        assert_eq!(raster.pixel(0, 2), None);
    }

    #[test]
    fn set_pixel_roundtrip() {
        let mut raster = Raster::new(4, 4);
        let color = Rgb::new(0.25, 0.5, 0.75);
        raster.set_pixel(2, 3, color);
        assert_eq!(raster.pixel(2, 3), Some(color));
        // Out-of-bounds write must not panic.
        raster.set_pixel(10, 10, color);
    }

    #[test]
    fn from_pixels_rejects_wrong_length() {
        assert!(Raster::from_pixels(2, 2, vec![Rgb::new(0.0, 0.0, 0.0); 3]).is_none());
        assert!(Raster::from_pixels(2, 2, vec![Rgb::new(0.0, 0.0, 0.0); 4]).is_some());
    }

    #[test]
    fn classification_picks_the_maximum_score() {
        // A pure cyan pixel is *farthest* from the red prototype
        // (|0-1| + |1-0| + |1-0| = 3), so under the max rule it wins as Red.
        let (winner, score) = classify_pixel(Rgb::new(0.0, 1.0, 1.0));
        assert_eq!(winner, FunctionColor::Red);
        assert_eq!(score, 3.0);

        // Pure red is farthest from cyan, the first prototype in the list.
        let (winner, score) = classify_pixel(Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(winner, FunctionColor::Cyan);
        assert_eq!(score, 3.0);
    }

    #[test]
    fn classification_first_index_wins_ties() {
        // Black scores 3 against white, the unique maximum.
        let (winner, _) = classify_pixel(Rgb::new(0.0, 0.0, 0.0));
        assert_eq!(winner, FunctionColor::White);

        // Mid-gray scores 1.5 against every pure-channel prototype and 0
        // against the gray prototype; cyan is the first of the tied maxima.
        let (winner, score) = classify_pixel(Rgb::new(0.5, 0.5, 0.5));
        assert_eq!(winner, FunctionColor::Cyan);
        assert_eq!(score, 1.5);
    }

    #[test]
    fn serialization_roundtrip() {
        let mut raster = Raster::new(2, 2);
        raster.set_pixel(1, 1, Rgb::new(1.0, 0.64, 0.0));
        let json = serde_json::to_string(&raster).unwrap();
        let restored: Raster = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.pixel(1, 1), Some(Rgb::new(1.0, 0.64, 0.0)));
        assert_eq!(restored.width(), 2);
    }
}
