//! Camera for ray generation.

use crate::RenderConfig;
use lumen_math::{gen_f32, random_in_unit_disk, Point3, Ray, Vec3};
use rand::RngCore;

/// Largest image height a camera will derive from its aspect ratio.
pub const MAX_IMAGE_HEIGHT: u32 = 1 << 16;

/// Render geometry derived from a [`RenderConfig`].
///
/// Building a camera is the initialization step of a render: image size,
/// viewport and defocus disk are computed once and then only read.
#[derive(Debug, Clone)]
pub struct Camera {
    image_width: u32,
    image_height: u32,

    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,

    defocus_angle: f32,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Compute viewport and lens geometry for `config`.
    pub fn new(config: &RenderConfig) -> Self {
        let image_width = config.image_width.max(1);
        if config.image_width == 0 {
            log::warn!("image_width is 0, clamping to 1");
        }

        let aspect_ratio = if config.aspect_ratio.is_finite() && config.aspect_ratio > 0.0 {
            config.aspect_ratio
        } else {
            log::warn!("aspect_ratio {} is not positive, using 1.0", config.aspect_ratio);
            1.0
        };

        let derived_height = (image_width as f64 / aspect_ratio).floor();
        let image_height = if derived_height < 1.0 {
            log::warn!("image_height floors to 0, clamping to 1");
            1
        } else if derived_height > MAX_IMAGE_HEIGHT as f64 {
            log::warn!(
                "image_height {} exceeds {}, clamping",
                derived_height,
                MAX_IMAGE_HEIGHT
            );
            MAX_IMAGE_HEIGHT
        } else {
            derived_height as u32
        };

        let center = config.look_from;

        // Viewport dimensions on the focus plane
        let theta = config.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * config.focus_dist;
        let viewport_width = viewport_height * (image_width as f32 / image_height as f32);

        // Camera basis vectors
        let w = (config.look_from - config.look_at).normalize();
        let u = config.vup.cross(w).normalize();
        let v = w.cross(u);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        let pixel_delta_u = viewport_u / image_width as f32;
        let pixel_delta_v = viewport_v / image_height as f32;

        let viewport_upper_left =
            center - config.focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = config.focus_dist * (config.defocus_angle / 2.0).to_radians().tan();

        log::debug!(
            "Camera initialized: {}x{}, vfov {}, defocus {}",
            image_width,
            image_height,
            config.vfov,
            config.defocus_angle
        );

        Self {
            image_width,
            image_height,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            u,
            v,
            w,
            defocus_angle: config.defocus_angle,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
        }
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Camera position (the `look_from` point).
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Orthonormal camera frame: right, up, backward.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// World position of the center of pixel (i, j).
    pub fn pixel_center(&self, i: u32, j: u32) -> Point3 {
        self.pixel00_loc + (i as f32) * self.pixel_delta_u + (j as f32) * self.pixel_delta_v
    }

    /// Generate a ray for pixel (i, j), jittered inside the pixel square and
    /// starting on the defocus disk when depth of field is enabled.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

/// Sample a random point in the unit square [-0.5, 0.5) x [-0.5, 0.5).
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5, 0.0)
}
