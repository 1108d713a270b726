//! Textures: colour as a function of surface coordinates and position.

use crate::{Color, SceneError};
use glint_math::Vec3;
use std::path::Path;
use std::sync::Arc;

/// Anything that can be sampled for a colour at a surface point.
pub trait Texture: Send + Sync {
    /// Colour at texture coordinates `(u, v)` and world-space point `p`.
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color;
}

/// A single colour everywhere.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.color
    }
}

/// Procedural 3D checkerboard driven by the hit point, not by `(u, v)`.
pub struct CheckerTexture {
    odd: Arc<dyn Texture>,
    even: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(odd: Arc<dyn Texture>, even: Arc<dyn Texture>) -> Self {
        Self { odd, even }
    }

    /// Checkerboard alternating between two solid colours.
    pub fn from_colors(odd: Color, even: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(odd)), Arc::new(SolidColor::new(even)))
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        let sines = (10.0 * p.x).sin() * (10.0 * p.y).sin() * (10.0 * p.z).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

/// Nearest-neighbour lookup into a decoded RGB image.
///
/// `v = 0` is the bottom row of the image, matching the sphere UV mapping.
pub struct ImageTexture {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl ImageTexture {
    /// Decode an image file (any format the `image` crate understands).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let rgb = image::open(path)?.to_rgb8();
        log::debug!(
            "Loaded texture {} ({}x{})",
            path.display(),
            rgb.width(),
            rgb.height()
        );
        Ok(Self::from_rgb8(rgb))
    }

    /// Wrap an already decoded image.
    pub fn from_rgb8(image: image::RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let pixels = image.pixels().map(|p| p.0).collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3) -> Color {
        // Solid cyan makes a missing image obvious in the render
        if self.width == 0 || self.height == 0 {
            return Color::new(0.0, 1.0, 1.0);
        }

        let u = u.clamp(0.0, 1.0);
        let v = 1.0 - v.clamp(0.0, 1.0);

        let i = ((u * self.width as f32) as u32).min(self.width - 1);
        let j = ((v * self.height as f32) as u32).min(self.height - 1);

        let [r, g, b] = self.pixels[(j * self.width + i) as usize];
        Color::new(r as f32, g as f32, b as f32) / 255.0
    }
}
