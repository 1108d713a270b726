//! Numeric render parameters and feature toggles.

use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// Everything the renderer needs besides the camera and the world.
///
/// Missing fields take their defaults when deserialized, so a JSON file
/// can override just the values it cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Edge length of the square chunks the image is split into
    pub chunk_size: u32,
    /// Worker threads; 0 uses every hardware thread
    pub parallelism: usize,
    /// Test objects in a flat list instead of a BVH
    pub disable_bvh: bool,
    /// Count hit tests per hittable kind
    pub enable_hit_counts: bool,
    /// Shade by surface normal only
    pub normal_material: bool,
    /// Ignore materials and bounce grey diffuse rays
    pub disable_materials: bool,
    /// With `disable_materials`, use hemisphere sampling instead of Lambertian
    pub disable_lambertian: bool,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            samples_per_pixel: 20,
            max_depth: 10,
            chunk_size: 50,
            parallelism: 0,
            disable_bvh: false,
            enable_hit_counts: false,
            normal_material: false,
            disable_materials: false,
            disable_lambertian: false,
        }
    }
}

impl RenderParams {
    /// Check the documented ranges and flag combinations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.disable_lambertian && !self.disable_materials {
            return Err(ConfigError::LambertianWithoutDisableMaterials);
        }
        if self.normal_material && self.disable_materials {
            return Err(ConfigError::ConflictingDebugModes);
        }
        Ok(())
    }

    /// Worker count: 0 resolves to the hardware thread count, explicit
    /// values are capped at it.
    pub fn degree_of_parallelism(&self) -> usize {
        let available = num_cpus::get().max(1);
        match self.parallelism {
            0 => available,
            n => n.min(available),
        }
    }
}
