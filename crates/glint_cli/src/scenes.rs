//! Built-in scenes, looked up by name.
//!
//! Each scene builds its objects and background and can optionally
//! supply camera and render settings (`--use-scene-settings`).

use crate::options::Options;
use anyhow::{Context, Result};
use glint_tracer::{
    random_vec3, AxisRect, Background, CheckerTexture, Color, ConstantMedium, Cuboid, Dielectric, DiffuseLight,
    GradientBackground, Hittable, ImageBackground, ImageTexture, Lambertian, Material, Metal, RotateY,
    SolidBackground, Sphere, Translate, Vec3,
};
use rand::Rng;
use std::path::Path;
use std::sync::Arc;

/// Inputs a scene may draw on besides its own constants.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneContext<'a> {
    /// Image for textured spheres or an image background
    pub image: Option<&'a Path>,
}

/// Objects and background produced by a scene.
pub struct Scene {
    pub objects: Vec<Box<dyn Hittable>>,
    pub background: Box<dyn Background>,
}

/// An entry in the scene registry.
pub struct SceneEntry {
    pub name: &'static str,
    pub description: &'static str,
    build: fn(&SceneContext<'_>) -> Result<Scene>,
    settings: fn(&mut Options),
}

impl SceneEntry {
    pub fn build(&self, ctx: &SceneContext<'_>) -> Result<Scene> {
        let scene = (self.build)(ctx).with_context(|| format!("Failed to build scene '{}'", self.name))?;
        log::info!("Scene '{}': {} objects", self.name, scene.objects.len());
        Ok(scene)
    }

    /// Overwrite camera and render options with the scene's own.
    pub fn apply_settings(&self, options: &mut Options) {
        (self.settings)(options);
        log::info!("Using settings from scene '{}'", self.name);
    }
}

pub static SCENES: &[SceneEntry] = &[
    SceneEntry {
        name: "first-scene",
        description: "Diffuse, glass and metal spheres on a large ground sphere",
        build: first_scene,
        settings: first_scene_settings,
    },
    SceneEntry {
        name: "many-balls",
        description: "Random field of small spheres around three large ones",
        build: many_balls,
        settings: many_balls_settings,
    },
    SceneEntry {
        name: "cornell-box",
        description: "Cornell box with two white boxes and an area light",
        build: cornell_box,
        settings: cornell_box_settings,
    },
    SceneEntry {
        name: "emissive",
        description: "Textured sphere lit by a rectangular light",
        build: emissive,
        settings: emissive_settings,
    },
    SceneEntry {
        name: "bvh-test",
        description: "A row of sixty tiny spheres for BVH diagnostics",
        build: bvh_test,
        settings: bvh_test_settings,
    },
    SceneEntry {
        name: "fog-box",
        description: "Cornell box with rotated smoke and fog volumes",
        build: fog_box,
        settings: fog_box_settings,
    },
    SceneEntry {
        name: "image-background",
        description: "First scene inside an environment image (needs --image)",
        build: image_background,
        settings: image_background_settings,
    },
];

/// Find a scene by name, ignoring case and separators, so
/// `first-scene`, `first_scene` and `FirstScene` all match.
pub fn find(name: &str) -> Option<&'static SceneEntry> {
    let wanted = normalize(name);
    SCENES.iter().find(|entry| normalize(entry.name) == wanted)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn lambertian(r: f32, g: f32, b: f32) -> Arc<dyn Material> {
    Arc::new(Lambertian::new(Color::new(r, g, b)))
}

fn checker_ground() -> Arc<dyn Material> {
    let checker = CheckerTexture::from_colors(Color::new(0.2, 0.3, 0.1), Color::new(0.9, 0.9, 0.9));
    Arc::new(Lambertian::with_texture(Arc::new(checker)))
}

/// Earth-style material: the `--image` texture if given, otherwise plain brown.
fn textured_or_plain(ctx: &SceneContext<'_>) -> Result<Arc<dyn Material>> {
    match ctx.image {
        Some(path) => {
            let texture = ImageTexture::open(path)?;
            Ok(Arc::new(Lambertian::with_texture(Arc::new(texture))))
        }
        None => {
            log::info!("No --image given, textured sphere uses a plain material");
            Ok(lambertian(0.4, 0.2, 0.1))
        }
    }
}

fn spheres_on_ground() -> Vec<Box<dyn Hittable>> {
    vec![
        Box::new(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, lambertian(0.1, 0.2, 0.5))),
        Box::new(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, Arc::new(Dielectric::new(1.5)))),
        Box::new(Sphere::new(
            Vec3::new(1.0, 0.0, -1.0),
            0.5,
            Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.0)),
        )),
        Box::new(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, lambertian(0.8, 0.8, 0.0))),
    ]
}

fn first_scene(_ctx: &SceneContext<'_>) -> Result<Scene> {
    Ok(Scene {
        objects: spheres_on_ground(),
        background: Box::new(GradientBackground::default()),
    })
}

fn first_scene_settings(options: &mut Options) {
    options.set_camera("0,0,0", "0,0,-1", 60.0, 0.01, 10.0);
}

fn many_balls(ctx: &SceneContext<'_>) -> Result<Scene> {
    let mut rng = rand::thread_rng();
    let mut objects: Vec<Box<dyn Hittable>> = Vec::new();

    for a in -11..11 {
        for b in -11..11 {
            let center = Vec3::new(a as f32 + 0.9 * rng.gen::<f32>(), 0.2, b as f32 + 0.9 * rng.gen::<f32>());
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choice: f32 = rng.gen();
            let material: Arc<dyn Material> = if choice < 0.7 {
                let albedo = random_vec3(&mut rng, 0.0, 1.0) * random_vec3(&mut rng, 0.0, 1.0);
                Arc::new(Lambertian::new(albedo))
            } else if choice < 0.9 {
                let albedo = random_vec3(&mut rng, 0.5, 1.0);
                Arc::new(Metal::new(albedo, rng.gen_range(0.0..0.5)))
            } else {
                Arc::new(Dielectric::new(1.5))
            };
            objects.push(Box::new(Sphere::new(center, 0.2, material)));
        }
    }

    objects.push(Box::new(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, Arc::new(Dielectric::new(1.5)))));
    objects.push(Box::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));
    objects.push(Box::new(Sphere::new(Vec3::new(4.0, 1.0, 0.0), 1.0, textured_or_plain(ctx)?)));
    objects.push(Box::new(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, checker_ground())));

    Ok(Scene {
        objects,
        background: Box::new(GradientBackground::default()),
    })
}

fn many_balls_settings(options: &mut Options) {
    options.set_aspect(800, "3:2");
    options.samples = Some(40);
    options.max_depth = Some(5);
    options.chunk_size = Some(20);
    options.set_camera("13,2,3", "0,0,0", 20.0, 0.1, 10.0);
    options.disable_bvh = false;
    options.enable_hit_counts = true;
}

/// The five walls of a 555-unit Cornell box plus a ceiling light.
fn cornell_walls(light: Arc<dyn Material>, light_x: (f32, f32), light_z: (f32, f32)) -> Vec<Box<dyn Hittable>> {
    let red = lambertian(0.65, 0.05, 0.05);
    let white = lambertian(0.73, 0.73, 0.73);
    let green = lambertian(0.12, 0.45, 0.15);

    vec![
        Box::new(AxisRect::yz(0.0, 555.0, 0.0, 555.0, 555.0, green)),
        Box::new(AxisRect::yz(0.0, 555.0, 0.0, 555.0, 0.0, red)),
        Box::new(AxisRect::xz(light_x.0, light_x.1, light_z.0, light_z.1, 554.0, light)),
        Box::new(AxisRect::xz(0.0, 555.0, 0.0, 555.0, 0.0, white.clone())),
        Box::new(AxisRect::xz(0.0, 555.0, 0.0, 555.0, 555.0, white.clone())),
        Box::new(AxisRect::xy(0.0, 555.0, 0.0, 555.0, 555.0, white)),
    ]
}

fn cornell_box(_ctx: &SceneContext<'_>) -> Result<Scene> {
    let light = Arc::new(DiffuseLight::new(Color::splat(15.0)));
    let white = lambertian(0.73, 0.73, 0.73);

    let mut objects = cornell_walls(light, (213.0, 343.0), (227.0, 332.0));
    objects.push(Box::new(Cuboid::new(
        Vec3::new(130.0, 0.0, 65.0),
        Vec3::new(295.0, 165.0, 230.0),
        white.clone(),
    )));
    objects.push(Box::new(Cuboid::new(
        Vec3::new(265.0, 0.0, 295.0),
        Vec3::new(430.0, 330.0, 460.0),
        white,
    )));

    Ok(Scene {
        objects,
        background: Box::new(SolidBackground::new(Color::ZERO)),
    })
}

fn cornell_box_settings(options: &mut Options) {
    options.set_aspect(600, "1:1");
    options.samples = Some(600);
    options.max_depth = Some(5);
    options.chunk_size = Some(50);
    options.set_camera("278,278,-800", "278,278,0", 40.0, 32.1, 800.0);
    options.disable_bvh = false;
    options.enable_hit_counts = false;
}

fn emissive(ctx: &SceneContext<'_>) -> Result<Scene> {
    let objects: Vec<Box<dyn Hittable>> = vec![
        Box::new(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 2.0, textured_or_plain(ctx)?)),
        Box::new(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, checker_ground())),
        Box::new(AxisRect::xy(
            3.0,
            5.0,
            1.0,
            3.0,
            -2.0,
            Arc::new(DiffuseLight::new(Color::splat(8.0))),
        )),
    ];

    Ok(Scene {
        objects,
        background: Box::new(SolidBackground::new(Color::ZERO)),
    })
}

fn emissive_settings(options: &mut Options) {
    options.set_aspect(800, "3:2");
    options.samples = Some(400);
    options.max_depth = Some(5);
    options.chunk_size = Some(20);
    options.set_camera("26,3,6", "0,2,0", 20.0, 0.1, 26.0);
    options.disable_bvh = false;
    options.enable_hit_counts = false;
}

fn bvh_test(_ctx: &SceneContext<'_>) -> Result<Scene> {
    const BALL_COUNT: usize = 60;
    let diameter = 1.0 / BALL_COUNT as f32;
    let radius = diameter / 2.0;
    let start_x = -0.5 + radius;
    let material = lambertian(1.0, 1.0, 1.0);

    let objects = (0..BALL_COUNT)
        .map(|i| {
            let center = Vec3::new(start_x + i as f32 * diameter, 0.0, -1.0);
            Box::new(Sphere::new(center, radius, material.clone())) as Box<dyn Hittable>
        })
        .collect();

    Ok(Scene {
        objects,
        background: Box::new(GradientBackground::default()),
    })
}

fn bvh_test_settings(options: &mut Options) {
    options.width = 1000;
    options.height = Some(1000);
    options.aspect_ratio = None;
    options.samples = Some(1);
    options.max_depth = Some(1);
    options.set_camera("0,0,0", "0,0,-1", 60.0, 0.01, 1.0);
    options.normal_material = true;
    options.disable_bvh = false;
    options.enable_hit_counts = true;
}

fn fog_box(_ctx: &SceneContext<'_>) -> Result<Scene> {
    let light = Arc::new(DiffuseLight::new(Color::splat(7.0)));
    let white = lambertian(0.73, 0.73, 0.73);

    let mut objects = cornell_walls(light, (113.0, 443.0), (127.0, 432.0));

    let tall: Box<dyn Hittable> = Box::new(Cuboid::new(Vec3::ZERO, Vec3::new(165.0, 330.0, 165.0), white.clone()));
    let tall = Box::new(RotateY::new(tall, 15.0));
    let tall = Box::new(Translate::new(tall, Vec3::new(265.0, 0.0, 295.0)));

    let short: Box<dyn Hittable> = Box::new(Cuboid::new(Vec3::ZERO, Vec3::splat(165.0), white));
    let short = Box::new(RotateY::new(short, -18.0));
    let short = Box::new(Translate::new(short, Vec3::new(130.0, 0.0, 65.0)));

    objects.push(Box::new(ConstantMedium::new(tall, 0.01, Color::ZERO)));
    objects.push(Box::new(ConstantMedium::new(short, 0.01, Color::ONE)));

    Ok(Scene {
        objects,
        background: Box::new(SolidBackground::new(Color::ZERO)),
    })
}

fn fog_box_settings(options: &mut Options) {
    options.set_aspect(600, "1:1");
    options.samples = Some(200);
    options.max_depth = Some(50);
    options.chunk_size = Some(50);
    options.set_camera("278,278,-800", "278,278,0", 40.0, 0.0, 800.0);
    options.disable_bvh = false;
    options.enable_hit_counts = false;
}

fn image_background(ctx: &SceneContext<'_>) -> Result<Scene> {
    let path = ctx
        .image
        .context("The image-background scene needs an environment image, pass one with --image")?;
    let background = ImageBackground::open(path)?;

    Ok(Scene {
        objects: spheres_on_ground(),
        background: Box::new(background),
    })
}

fn image_background_settings(options: &mut Options) {
    options.set_aspect(800, "3:2");
    options.samples = Some(500);
    options.max_depth = Some(5);
    options.set_camera("0,0,1.5", "0,0,-1", 60.0, 0.01, 10.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use glint_tracer::{World, WorldOptions};

    #[test]
    fn test_find_ignores_case_and_separators() {
        assert_eq!(find("first-scene").map(|s| s.name), Some("first-scene"));
        assert_eq!(find("FirstScene").map(|s| s.name), Some("first-scene"));
        assert_eq!(find("cornell_box").map(|s| s.name), Some("cornell-box"));
        assert!(find("nope").is_none());
    }

    #[test]
    fn test_scene_names_are_unique() {
        for (i, a) in SCENES.iter().enumerate() {
            for b in &SCENES[i + 1..] {
                assert_ne!(normalize(a.name), normalize(b.name));
            }
        }
    }

    #[test]
    fn test_scenes_build_without_image() {
        let ctx = SceneContext::default();
        for entry in SCENES.iter().filter(|s| s.name != "image-background") {
            let scene = entry.build(&ctx).expect("scene builds");
            assert!(!scene.objects.is_empty(), "{} has no objects", entry.name);
            World::new(scene.objects, scene.background).expect("world builds");
        }
    }

    #[test]
    fn test_image_background_needs_image() {
        let entry = find("image-background").expect("registered");
        assert!(entry.build(&SceneContext::default()).is_err());
    }

    #[test]
    fn test_bvh_test_row() {
        let scene = bvh_test(&SceneContext::default()).expect("builds");
        assert_eq!(scene.objects.len(), 60);

        let world = World::with_options(
            scene.objects,
            scene.background,
            &WorldOptions {
                disable_bvh: true,
                ..Default::default()
            },
        )
        .expect("world builds");
        let bbox = world.bounding_box().expect("bounded");
        assert!((bbox.minimum.x + 0.5).abs() < 1e-4);
        assert!((bbox.maximum.x - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_scene_settings_resolve() {
        for entry in SCENES {
            let mut options = Options::try_parse_from(["glint"]).expect("defaults parse");
            entry.apply_settings(&mut options);
            assert!(options.camera_settings().is_ok(), "{} camera", entry.name);
            assert!(options.render_params().is_ok(), "{} params", entry.name);
        }

        let mut options = Options::try_parse_from(["glint"]).expect("defaults parse");
        find("many-balls").expect("registered").apply_settings(&mut options);
        assert_eq!(options.resolution().unwrap(), (800, 533));
        let params = options.render_params().unwrap();
        assert_eq!(params.samples_per_pixel, 40);
        assert_eq!(params.chunk_size, 20);
        assert!(params.enable_hit_counts);
    }
}
