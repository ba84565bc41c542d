//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by a maximum depth
//! - Anti-aliasing via jittered multi-sampling
//! - A sky gradient for rays that leave the scene

use crate::scanline::render_scanlines;
use crate::{Camera, Color, Frame, Hittable, RenderResult};
use lumen_math::{Interval, Point3, Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Rays ignore hits closer than this to their origin, so a bounce does not
/// re-hit the surface it just left.
pub const T_MIN: f32 = 0.001;

/// Render configuration, supplied before [`render`] is called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub image_width: u32,
    /// Width over height; the height is derived from it
    pub aspect_ratio: f64,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Point camera is looking from
    pub look_from: Point3,
    /// Point camera is looking at
    pub look_at: Point3,
    /// Camera-relative "up" direction
    pub vup: Vec3,
    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f32,
    /// Distance from `look_from` to the plane of perfect focus
    pub focus_dist: f32,
    /// Fixed seed for reproducible output; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Worker thread count; `None` uses one per hardware thread
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 100,
            aspect_ratio: 1.0,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            seed: None,
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Samples per pixel, never less than one.
    pub fn effective_samples(&self) -> u32 {
        self.samples_per_pixel.max(1)
    }
}

/// Compute the color seen by a ray.
///
/// Recurses once per bounce. Returns black when `depth` reaches zero or the
/// struck material absorbs the ray.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            result.attenuation * ray_color(&result.scattered, world, depth - 1, rng)
        }
        None => Color::ZERO,
    }
}

/// Vertical white-to-blue gradient keyed on the ray's normalized y.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Render a single pixel with multi-sampling. Returns the averaged linear color.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let samples = config.effective_samples();
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    pixel_color * (1.0 / samples as f32)
}

/// Render the scene into a finished [`Frame`].
///
/// Initializes the camera, runs the scanline scheduler over the worker pool
/// and assembles the rows top to bottom.
pub fn render(config: &RenderConfig, world: &dyn Hittable) -> RenderResult<Frame> {
    if config.samples_per_pixel == 0 {
        log::warn!("samples_per_pixel is 0, clamping to 1");
    }

    let camera = Camera::new(config);
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        camera.image_width(),
        camera.image_height(),
        config.effective_samples(),
        config.max_depth
    );

    let rows = render_scanlines(&camera, world, config)?;
    log::info!("Done.");

    Ok(Frame::new(camera.image_width(), camera.image_height(), rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color_to_bytes, Dielectric, HitRecord, HittableList, Lambertian, Material, Metal,
        ScatterResult, Sphere,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    struct Absorber;

    impl Material for Absorber {
        fn scatter(&self, _: &Ray, _: &HitRecord, _: &mut dyn RngCore) -> Option<ScatterResult> {
            None
        }
    }

    fn lambertian(r: f32, g: f32, b: f32) -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Color::new(r, g, b)))
    }

    fn single_sphere_world() -> HittableList {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            lambertian(0.5, 0.5, 0.5),
        )));
        world
    }

    fn mixed_world() -> HittableList {
        let ground = lambertian(0.8, 0.8, 0.0);
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground)));
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -1.2),
            0.5,
            lambertian(0.1, 0.2, 0.5),
        )));
        world.add(Box::new(Sphere::new(
            Vec3::new(-1.0, 0.0, -1.0),
            0.5,
            Arc::new(Dielectric::new(1.5)),
        )));
        world.add(Box::new(Sphere::new(
            Vec3::new(1.0, 0.0, -1.0),
            0.5,
            Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3)),
        )));
        world
    }

    fn widescreen(width: u32) -> RenderConfig {
        RenderConfig {
            image_width: width,
            aspect_ratio: 16.0 / 9.0,
            samples_per_pixel: 4,
            max_depth: 10,
            seed: Some(7),
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_sky_gradient() {
        let up = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0)));
        let down = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::NEG_Y));
        let level = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::NEG_Z));

        assert_eq!(up, Color::new(0.5, 0.7, 1.0));
        assert_eq!(down, Color::ONE);
        assert!((level - Color::new(0.75, 0.85, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_depth_zero_is_black() {
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert_eq!(ray_color(&ray, &single_sphere_world(), 0, &mut rng), Color::ZERO);
        assert_eq!(ray_color(&ray, &HittableList::new(), 0, &mut rng), Color::ZERO);
        let away = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(ray_color(&away, &mixed_world(), 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_miss_returns_sky_exactly() {
        let mut rng = StdRng::seed_from_u64(2);
        let world = HittableList::new();

        for _ in 0..100 {
            let dir = lumen_math::random_unit_vector(&mut rng);
            let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), dir);
            assert_eq!(ray_color(&ray, &world, 5, &mut rng), sky_gradient(&ray));
        }
    }

    #[test]
    fn test_absorbed_path_is_black() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, Arc::new(Absorber))));
        let mut rng = StdRng::seed_from_u64(3);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(ray_color(&ray, &world, 50, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_last_bounce_is_black() {
        // Depth 1: the hit scatters, but the scattered ray has no depth left
        let mut rng = StdRng::seed_from_u64(4);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(ray_color(&ray, &single_sphere_world(), 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_mirror_attenuation_equals_albedo() {
        let albedo = Color::new(0.8, 0.6, 0.2);
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, -1000.5, -1.0),
            1000.0,
            lambertian(0.5, 0.5, 0.5),
        )));
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Metal::new(albedo, 0.0)),
        )));
        let mut rng = StdRng::seed_from_u64(5);

        // Straight down the axis: reflects straight back into the sky
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = world.hit(&ray, Interval::new(T_MIN, f32::INFINITY)).unwrap();
        let scatter = rec.material.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(scatter.attenuation, albedo);
        assert_eq!(scatter.scattered.direction(), Vec3::Z);

        let expected = albedo * sky_gradient(&Ray::new(Vec3::ZERO, Vec3::Z));
        for _ in 0..10 {
            assert_eq!(ray_color(&ray, &world, 10, &mut rng), expected);
        }
    }

    #[test]
    fn test_render_pixel_averages_samples() {
        let config = RenderConfig {
            image_width: 20,
            samples_per_pixel: 16,
            ..RenderConfig::default()
        };
        let camera = Camera::new(&config);
        let mut rng = StdRng::seed_from_u64(6);

        // Depth 1 on a diffuse sphere: every sample that hits is black
        let config = RenderConfig { max_depth: 1, ..config };
        let color = render_pixel(&camera, &single_sphere_world(), 10, 10, &config, &mut rng);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_unseeded_pixel_converges_to_sky() {
        let config = RenderConfig {
            image_width: 40,
            samples_per_pixel: 2000,
            ..RenderConfig::default()
        };
        let camera = Camera::new(&config);
        let world = HittableList::new();
        let mut rng = StdRng::from_entropy();

        let color = render_pixel(&camera, &world, 5, 30, &config, &mut rng);
        let center = camera.pixel_center(5, 30);
        let expected = sky_gradient(&Ray::new(camera.center(), center - camera.center()));
        assert!((color - expected).length() < 0.01);
    }

    #[test]
    fn test_scenario_single_sphere_silhouette() {
        let config = RenderConfig {
            max_depth: 1,
            ..widescreen(400)
        };
        let frame = render(&config, &single_sphere_world()).unwrap();

        assert_eq!(frame.width(), 400);
        assert_eq!(frame.height(), 225);
        assert!(frame.to_ppm().starts_with("P3\n400 225\n255\n"));
        assert_eq!(frame.header(), "P3\n400 225\n255\n");

        // Image center lies inside the sphere; depth 1 makes it black
        let camera = Camera::new(&config);
        let center_ray = Ray::new(Vec3::ZERO, camera.pixel_center(200, 112));
        let background = color_to_bytes(sky_gradient(&center_ray));
        assert_eq!(frame.pixel(200, 112), [0, 0, 0]);
        assert_ne!(frame.pixel(200, 112), background);

        // A corner pixel sees only sky
        assert_ne!(frame.pixel(0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_scenario_empty_scene_is_sky_gradient() {
        let config = widescreen(400);
        let frame = render(&config, &HittableList::new()).unwrap();
        let camera = Camera::new(&config);

        for j in 0..frame.height() {
            for i in 0..frame.width() {
                let ray = Ray::new(camera.center(), camera.pixel_center(i, j) - camera.center());
                let expected = color_to_bytes(sky_gradient(&ray));
                let actual = frame.pixel(i, j);
                for c in 0..3 {
                    // Sub-pixel jitter can move a channel across one rounding step
                    assert!(
                        (actual[c] as i32 - expected[c] as i32).abs() <= 1,
                        "pixel ({i}, {j}) = {actual:?}, expected {expected:?}"
                    );
                }
            }
        }

        // Zenith endpoint is (0.5, 0.7, 1.0); rows looking up carry less red
        let top = frame.pixel(200, 0);
        let bottom = frame.pixel(200, frame.height() - 1);
        assert!(top[0] < bottom[0]);
        assert!(top[1] < bottom[1]);
        assert_eq!(top[2], 255);
        assert_eq!(bottom[2], 255);
    }

    #[test]
    fn test_scenario_mirror_sphere_tints_reflection() {
        let albedo = Color::new(0.8, 0.6, 0.2);
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, -1000.5, -1.0),
            1000.0,
            lambertian(0.5, 0.5, 0.5),
        )));
        world.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Metal::new(albedo, 0.0)),
        )));

        let config = RenderConfig {
            max_depth: 10,
            ..widescreen(400)
        };
        let frame = render(&config, &world).unwrap();

        let expected = color_to_bytes(albedo * sky_gradient(&Ray::new(Vec3::ZERO, Vec3::Z)));
        let actual = frame.pixel(200, 112);
        for c in 0..3 {
            assert!((actual[c] as i32 - expected[c] as i32).abs() <= 3);
        }
    }

    #[test]
    fn test_seeded_render_is_reproducible_across_thread_counts() {
        let world = mixed_world();
        let base = RenderConfig {
            image_width: 48,
            aspect_ratio: 2.0,
            samples_per_pixel: 3,
            max_depth: 8,
            seed: Some(1234),
            ..RenderConfig::default()
        };

        let single = render(&RenderConfig { threads: Some(1), ..base.clone() }, &world).unwrap();
        let many = render(&RenderConfig { threads: Some(4), ..base.clone() }, &world).unwrap();
        let again = render(&RenderConfig { threads: Some(4), ..base.clone() }, &world).unwrap();

        assert_eq!(single.to_ppm(), many.to_ppm());
        assert_eq!(many.to_ppm(), again.to_ppm());

        let other_seed =
            render(&RenderConfig { seed: Some(99), threads: Some(2), ..base }, &world).unwrap();
        assert_ne!(single.to_ppm(), other_seed.to_ppm());
    }

    #[test]
    fn test_zero_samples_still_renders() {
        let config = RenderConfig {
            image_width: 8,
            samples_per_pixel: 0,
            seed: Some(1),
            ..RenderConfig::default()
        };
        let frame = render(&config, &HittableList::new()).unwrap();
        assert_eq!(frame.height(), 8);
    }

    #[test]
    fn test_config_json_defaults() {
        let config: RenderConfig =
            serde_json::from_str(r#"{ "image_width": 400, "look_from": [13.0, 2.0, 3.0] }"#)
                .unwrap();

        assert_eq!(config.image_width, 400);
        assert_eq!(config.look_from, Vec3::new(13.0, 2.0, 3.0));
        assert_eq!(config.max_depth, RenderConfig::default().max_depth);
        assert_eq!(config.seed, None);
    }
}
