//! Glint - CPU Path Tracing
//!
//! A Monte Carlo path tracer in the "Ray Tracing in One Weekend" lineage:
//! spheres, axis-aligned rectangles, boxes, fog volumes and instancing
//! transforms, accelerated by a BVH and rendered in parallel chunks.

mod background;
mod bvh;
mod camera;
mod chunk;
mod cuboid;
mod diagnostics;
mod error;
mod hittable;
mod integrator;
mod material;
mod medium;
mod params;
mod raster;
mod rect;
mod renderer;
mod sampling;
mod sphere;
mod texture;
mod transform;
mod world;

pub use background::{Background, GradientBackground, ImageBackground, SolidBackground};
pub use bvh::BvhNode;
pub use camera::{Camera, CameraSettings};
pub use chunk::{chunked_range, generate_chunks, Chunk};
pub use cuboid::Cuboid;
pub use diagnostics::{Counted, HitCounts};
pub use error::{ConfigError, RenderError, SceneError};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use integrator::{Integrator, ShadingMode, T_MIN};
pub use material::{Color, Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal, ScatterResult};
pub use medium::ConstantMedium;
pub use params::RenderParams;
pub use raster::{color_to_rgb, Raster};
pub use rect::{AxisRect, RectPlane};
pub use renderer::{CancellationToken, RenderProgress, RenderStatus, Renderer};
pub use sampling::{
    gen_f32, gen_range_f32, random_in_hemisphere, random_in_unit_disk, random_in_unit_sphere, random_unit_vector,
    random_vec3,
};
pub use sphere::Sphere;
pub use texture::{CheckerTexture, ImageTexture, SolidColor, Texture};
pub use transform::{RotateY, Translate};
pub use world::{World, WorldOptions};

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Aabb, Interval, Ray, Vec3};
