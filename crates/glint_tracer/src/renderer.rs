//! Chunked parallel renderer.
//!
//! Splits the image into chunks, renders them on a bounded rayon pool
//! and writes each finished chunk into a shared raster in one locked
//! section. Rendering can be cancelled cooperatively between chunks and
//! between rows.

use crate::camera::Camera;
use crate::chunk::{generate_chunks, Chunk};
use crate::integrator::{Integrator, ShadingMode};
use crate::raster::{color_to_rgb, Raster};
use crate::sampling::gen_f32;
use crate::world::World;
use crate::{Color, RenderError, RenderParams};
use rand::RngCore;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

/// Shared flag that asks a running render to stop.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Chunks finished so far out of the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderProgress {
    pub completed: usize,
    pub total: usize,
}

/// How a render ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// Every pixel was written.
    Completed,
    /// Stopped early; the raster holds only whole chunks.
    Cancelled,
}

/// Renders a world through a camera.
pub struct Renderer<'a> {
    camera: &'a Camera,
    world: &'a World,
    params: RenderParams,
    integrator: Integrator,
}

impl<'a> Renderer<'a> {
    /// Validate `params` and prepare a renderer.
    pub fn new(camera: &'a Camera, world: &'a World, params: RenderParams) -> Result<Self, RenderError> {
        params.validate()?;
        let integrator = Integrator::new(ShadingMode::from_params(&params));
        Ok(Self {
            camera,
            world,
            params,
            integrator,
        })
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    /// Render into a fresh raster sized from the camera.
    pub fn render<F>(&self, progress: F, cancel: &CancellationToken) -> Result<(Raster, RenderStatus), RenderError>
    where
        F: Fn(RenderProgress) + Sync,
    {
        let raster = Mutex::new(Raster::new(self.camera.image_width(), self.camera.image_height()));
        let status = self.render_into(&raster, progress, cancel)?;
        let raster = raster.into_inner().unwrap_or_else(PoisonError::into_inner);
        Ok((raster, status))
    }

    /// Render into a shared raster.
    ///
    /// `progress` is called after each chunk is written, from whichever
    /// worker finished it, while the raster lock is held; reports are
    /// therefore strictly increasing.
    pub fn render_into<F>(
        &self,
        raster: &Mutex<Raster>,
        progress: F,
        cancel: &CancellationToken,
    ) -> Result<RenderStatus, RenderError>
    where
        F: Fn(RenderProgress) + Sync,
    {
        let width = self.camera.image_width();
        let height = self.camera.image_height();
        {
            let raster = raster.lock().unwrap_or_else(PoisonError::into_inner);
            if raster.width() != width || raster.height() != height {
                return Err(RenderError::RasterSize {
                    expected_width: width,
                    expected_height: height,
                    actual_width: raster.width(),
                    actual_height: raster.height(),
                });
            }
        }

        let chunks = generate_chunks(width, height, self.params.chunk_size);
        let total = chunks.len();
        let threads = self.params.degree_of_parallelism();

        log::info!(
            "Rendering {}x{}: {} chunks, {} threads, {} spp, max depth {}",
            width,
            height,
            total,
            threads,
            self.params.samples_per_pixel,
            self.params.max_depth
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("glint-render-{i}"))
            .build()?;

        let start = Instant::now();
        let completed = AtomicUsize::new(0);

        pool.install(|| {
            chunks.par_iter().with_max_len(1).for_each(|chunk| {
                if cancel.is_cancelled() {
                    return;
                }

                let mut rng = rand::thread_rng();
                let Some(pixels) = self.render_chunk(chunk, cancel, &mut rng) else {
                    return;
                };

                let mut raster = raster.lock().unwrap_or_else(PoisonError::into_inner);
                for (x, y, rgb) in pixels {
                    // Internal rows count up from the bottom
                    raster.set(x - 1, height - y, rgb);
                }
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                progress(RenderProgress { completed: done, total });
            });
        });

        let elapsed = start.elapsed();
        let done = completed.load(Ordering::SeqCst);
        if done == total {
            log::info!("Render complete in {:.2?}", elapsed);
            Ok(RenderStatus::Completed)
        } else {
            log::warn!("Render cancelled after {:.2?} ({} of {} chunks)", elapsed, done, total);
            Ok(RenderStatus::Cancelled)
        }
    }

    /// Render one chunk, or `None` if cancelled part way through.
    ///
    /// Pixels come back as 1-based `(x, y)` with `y` counted from the bottom.
    fn render_chunk(
        &self,
        chunk: &Chunk,
        cancel: &CancellationToken,
        rng: &mut dyn RngCore,
    ) -> Option<Vec<(u32, u32, [u8; 3])>> {
        let mut pixels = Vec::with_capacity(chunk.pixel_count() as usize);

        for y in chunk.y.0..=chunk.y.1 {
            if cancel.is_cancelled() {
                return None;
            }
            for x in chunk.x.0..=chunk.x.1 {
                let color = self.render_pixel(x, y, rng);
                pixels.push((x, y, color_to_rgb(color, self.params.samples_per_pixel)));
            }
        }

        Some(pixels)
    }

    /// Sum of all samples for the 1-based pixel `(x, y)`.
    fn render_pixel(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Color {
        let width = self.camera.image_width() as f32;
        let height = self.camera.image_height() as f32;

        let mut sum = Color::ZERO;
        for _ in 0..self.params.samples_per_pixel {
            let s = ((x - 1) as f32 + gen_f32(rng)) / width;
            let t = ((y - 1) as f32 + gen_f32(rng)) / height;
            let ray = self.camera.get_ray(s, t, rng);
            sum += self.integrator.ray_color(&ray, self.world, self.params.max_depth, rng);
        }
        sum
    }
}
