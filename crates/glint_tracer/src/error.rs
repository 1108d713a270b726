//! Error types for scene construction and rendering.

use glint_math::ParseVectorError;
use thiserror::Error;

/// Failures while assembling a scene, before any ray is traced.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("cannot build a BVH from an empty object list")]
    EmptyBvh,

    #[error("{kind} has no bounding box and cannot be placed in a BVH")]
    MissingBoundingBox { kind: &'static str },

    #[error("failed to load texture image: {0}")]
    Texture(#[from] image::ImageError),

    #[error(transparent)]
    InvalidVector(#[from] ParseVectorError),
}

/// Render parameters that fall outside their documented ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("samples per pixel must be greater than zero")]
    ZeroSamples,

    #[error("chunk size must be at least 1")]
    ZeroChunkSize,

    #[error("disable_lambertian only applies together with disable_materials")]
    LambertianWithoutDisableMaterials,

    #[error("normal_material and disable_materials cannot both be enabled")]
    ConflictingDebugModes,
}

/// Failures that stop a render from starting.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid render parameters: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to start render worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("raster is {actual_width}x{actual_height} but the camera renders {expected_width}x{expected_height}")]
    RasterSize {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}
