//! Command line options and their validation.

use anyhow::{bail, Context, Result};
use clap::Parser;
use glint_math::parse_vec3;
use glint_tracer::{CameraSettings, RenderParams};
use std::fs;
use std::path::PathBuf;

/// Height used when neither `--height` nor `--aspect-ratio` is given.
pub const DEFAULT_HEIGHT: u32 = 1080;

#[derive(Debug, Clone, Parser)]
#[command(name = "glint", version, about = "Render a built-in scene with the Glint path tracer")]
pub struct Options {
    /// Built-in scene to render
    #[arg(long, default_value = "first-scene")]
    pub scene: String,

    /// List the built-in scenes and exit
    #[arg(long)]
    pub list_scenes: bool,

    /// Let the scene supply its own camera and render settings,
    /// overriding the ones given here
    #[arg(long)]
    pub use_scene_settings: bool,

    /// PNG file to write when the render completes
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Render without writing the output file
    #[arg(long)]
    pub no_save: bool,

    /// Image for scenes with a textured sphere or an image background
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Cancel the render after this many seconds
    #[arg(long)]
    pub time_limit: Option<u64>,

    /// Image width in pixels
    #[arg(long, default_value_t = 1920)]
    pub width: u32,

    /// Image height in pixels (1080 if no aspect ratio is given)
    #[arg(long)]
    pub height: Option<u32>,

    /// Aspect ratio as n:m; the height is derived from the width
    #[arg(long)]
    pub aspect_ratio: Option<String>,

    /// JSON file of render parameters; the flags below override it
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Samples per pixel
    #[arg(long)]
    pub samples: Option<u32>,

    /// Maximum bounce depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Edge length of the render chunks
    #[arg(long)]
    pub chunk_size: Option<u32>,

    /// Worker threads; 0 uses every core
    #[arg(long)]
    pub parallelism: Option<usize>,

    /// Test every object instead of building a BVH
    #[arg(long)]
    pub disable_bvh: bool,

    /// Count hit tests per object kind and log them after the render
    #[arg(long)]
    pub enable_hit_counts: bool,

    /// Shade by surface normal
    #[arg(long)]
    pub normal_material: bool,

    /// Ignore materials and compute grey diffuse shading
    #[arg(long)]
    pub disable_materials: bool,

    /// With --disable-materials, sample the hemisphere instead of the
    /// Lambertian distribution
    #[arg(long)]
    pub disable_lambertian: bool,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 60.0)]
    pub field_of_view: f32,

    /// Lens aperture; larger values give a shallower depth of field
    #[arg(long, default_value_t = 0.5)]
    pub aperture: f32,

    /// Distance from the camera to the plane in focus
    #[arg(long, default_value_t = 10.0)]
    pub focus_distance: f32,

    /// Camera position as x,y,z
    #[arg(long, default_value = "0,0,0", allow_hyphen_values = true)]
    pub camera_position: String,

    /// Point the camera looks at as x,y,z
    #[arg(long, default_value = "0,0,-1", allow_hyphen_values = true)]
    pub camera_look_at: String,

    /// Camera up vector as x,y,z
    #[arg(long, default_value = "0,1,0", allow_hyphen_values = true)]
    pub camera_vertical: String,
}

impl Options {
    /// Final image size from the width, height and aspect ratio.
    pub fn resolution(&self) -> Result<(u32, u32)> {
        let height = match (&self.aspect_ratio, self.height) {
            (Some(_), Some(_)) => bail!("When specifying an aspect ratio provide only the width, not the height"),
            (Some(ratio), None) => {
                let (n, m) = parse_aspect_ratio(ratio)?;
                (u64::from(self.width) * u64::from(m) / u64::from(n)) as u32
            }
            (None, Some(height)) => height,
            (None, None) => DEFAULT_HEIGHT,
        };

        if self.width == 0 || height == 0 {
            bail!("Image width and height must both be at least 1 (got {}x{})", self.width, height);
        }
        Ok((self.width, height))
    }

    /// Camera settings from the resolution, lens and vector options.
    pub fn camera_settings(&self) -> Result<CameraSettings> {
        let (width, height) = self.resolution()?;
        let vector_hint = "must be three numbers separated by commas, e.g. 1.0,2.0,-2.0";
        let look_from = parse_vec3(&self.camera_position).with_context(|| format!("--camera-position {vector_hint}"))?;
        let look_at = parse_vec3(&self.camera_look_at).with_context(|| format!("--camera-look-at {vector_hint}"))?;
        let vup = parse_vec3(&self.camera_vertical).with_context(|| format!("--camera-vertical {vector_hint}"))?;

        Ok(CameraSettings::new()
            .with_resolution(width, height)
            .with_position(look_from, look_at, vup)
            .with_lens(self.field_of_view, self.aperture, self.focus_distance))
    }

    /// Render parameters: the `--params` file (or defaults) with explicit
    /// flags applied on top, then validated.
    pub fn render_params(&self) -> Result<RenderParams> {
        let mut params = match &self.params {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read render parameters from {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Failed to parse render parameters in {}", path.display()))?
            }
            None => RenderParams::default(),
        };

        if let Some(samples) = self.samples {
            params.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            params.max_depth = max_depth;
        }
        if let Some(chunk_size) = self.chunk_size {
            params.chunk_size = chunk_size;
        }
        if let Some(parallelism) = self.parallelism {
            params.parallelism = parallelism;
        }
        params.disable_bvh |= self.disable_bvh;
        params.enable_hit_counts |= self.enable_hit_counts;
        params.normal_material |= self.normal_material;
        params.disable_materials |= self.disable_materials;
        params.disable_lambertian |= self.disable_lambertian;

        params.validate().context("Invalid render parameters")?;
        Ok(params)
    }

    /// Set the camera from scene-provided values.
    pub fn set_camera(&mut self, position: &str, look_at: &str, field_of_view: f32, aperture: f32, focus_distance: f32) {
        self.camera_position = position.to_string();
        self.camera_look_at = look_at.to_string();
        self.camera_vertical = "0,1,0".to_string();
        self.field_of_view = field_of_view;
        self.aperture = aperture;
        self.focus_distance = focus_distance;
    }

    /// Set the size from a width and an `n:m` ratio.
    pub fn set_aspect(&mut self, width: u32, ratio: &str) {
        self.width = width;
        self.height = None;
        self.aspect_ratio = Some(ratio.to_string());
    }
}

/// Parse `n:m` with each side one to four digits.
pub fn parse_aspect_ratio(input: &str) -> Result<(u32, u32)> {
    let invalid = || {
        format!("The aspect ratio must be two integers of up to four digits separated by a colon, got '{input}'")
    };

    let Some((n, m)) = input.split_once(':') else {
        bail!(invalid());
    };
    let side = |s: &str| -> Option<u32> {
        let valid = (1..=4).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit());
        valid.then(|| s.parse().ok()).flatten()
    };

    match (side(n), side(m)) {
        (Some(0), _) => bail!("The aspect ratio width must not be zero"),
        (Some(n), Some(m)) => Ok((n, m)),
        _ => bail!(invalid()),
    }
}
