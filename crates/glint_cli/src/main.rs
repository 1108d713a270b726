//! `glint`: render a built-in scene to a PNG.

mod options;
mod scenes;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use glint_tracer::{CancellationToken, HitCounts, Raster, RenderStatus, Renderer, World, WorldOptions};
use indicatif::{ProgressBar, ProgressStyle};
use options::Options;
use scenes::{SceneContext, SCENES};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut options = Options::parse();

    if options.list_scenes {
        for entry in SCENES {
            println!("{:<18} {}", entry.name, entry.description);
        }
        return Ok(());
    }

    let scene = scenes::find(&options.scene)
        .ok_or_else(|| anyhow!("'{}' is not a built-in scene (see --list-scenes)", options.scene))?;
    if options.use_scene_settings {
        scene.apply_settings(&mut options);
    }

    let camera = options.camera_settings()?.build();
    let params = options.render_params()?;

    let hit_counts = params.enable_hit_counts.then(HitCounts::new);
    let built = scene.build(&SceneContext {
        image: options.image.as_deref(),
    })?;
    let world = World::with_options(
        built.objects,
        built.background,
        &WorldOptions {
            disable_bvh: params.disable_bvh,
            hit_counts: hit_counts.as_ref(),
        },
    )
    .context("Failed to build world")?;

    let cancel = CancellationToken::new();
    if let Some(seconds) = options.time_limit {
        let cancel = cancel.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(seconds));
            log::warn!("Time limit of {}s reached, cancelling", seconds);
            cancel.cancel();
        });
    }

    let renderer = Renderer::new(&camera, &world, params)?;
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} chunks ({eta})")?
            .progress_chars("=> "),
    );

    let start = Instant::now();
    let (raster, status) = renderer.render(
        |progress| {
            bar.set_length(progress.total as u64);
            bar.set_position(progress.completed as u64);
        },
        &cancel,
    )?;
    bar.finish_and_clear();

    if let Some(counts) = &hit_counts {
        counts.log_report();
    }

    match status {
        RenderStatus::Completed => {
            log::info!("Rendering took {}ms", start.elapsed().as_millis());
            if !options.no_save {
                save_png(&raster, &options.output)?;
            }
        }
        RenderStatus::Cancelled => {
            log::warn!("Render cancelled, nothing saved");
        }
    }

    Ok(())
}

fn save_png(raster: &Raster, path: &Path) -> Result<()> {
    image::save_buffer(
        path,
        raster.as_bytes(),
        raster.width(),
        raster.height(),
        image::ColorType::Rgb8,
    )
    .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Saved {}x{} image to {}", raster.width(), raster.height(), path.display());
    Ok(())
}
