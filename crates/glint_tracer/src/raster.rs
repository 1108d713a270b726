//! 8-bit RGB output image.

use crate::Color;
use glint_math::Interval;

/// Top-down, row-major 8-bit RGB image.
///
/// Tracks which pixels have been written so callers can tell a finished
/// render from a cancelled one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
    written: Vec<bool>,
}

impl Raster {
    /// Create a new black raster.
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0]; size],
            written: vec![false; size],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Set pixel at column `x`, row `y` (row 0 at the top).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let idx = (y * self.width + x) as usize;
        self.pixels[idx] = rgb;
        self.written[idx] = true;
    }

    /// Get pixel at column `x`, row `y` (row 0 at the top).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn is_written(&self, x: u32, y: u32) -> bool {
        self.written[(y * self.width + x) as usize]
    }

    /// Number of pixels written so far.
    pub fn written_count(&self) -> usize {
        self.written.iter().filter(|&&w| w).count()
    }

    /// Raw RGB bytes, suitable for `image::save_buffer`.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Turn an accumulated sample sum into an 8-bit pixel.
///
/// Averages over `samples`, applies gamma 2 and clamps to [0, 0.999] so
/// the 256x scale never reaches 256. NaN components come out black.
pub fn color_to_rgb(sum: Color, samples: u32) -> [u8; 3] {
    let scale = 1.0 / samples as f32;
    let intensity = Interval::new(0.0, 0.999);
    let quantize = |c: f32| (256.0 * intensity.clamp((scale * c).sqrt())) as u8;
    [quantize(sum.x), quantize(sum.y), quantize(sum.z)]
}
