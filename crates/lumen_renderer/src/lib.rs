//! Lumen renderer - CPU path tracing
//!
//! A Monte Carlo path tracer for analytic scenes. Scanlines are handed out
//! to a pool of worker threads and assembled in order into a [`Frame`].

mod camera;
mod color;
mod error;
mod frame;
mod hittable;
mod material;
mod renderer;
mod scanline;
mod sphere;

pub use camera::{Camera, MAX_IMAGE_HEIGHT};
pub use color::{color_to_bytes, linear_to_gamma, Color};
pub use error::{RenderError, RenderResult};
pub use frame::Frame;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use renderer::{ray_color, render, render_pixel, sky_gradient, RenderConfig, T_MIN};
pub use scanline::render_scanlines;
pub use sphere::Sphere;

/// Re-export common math types from lumen_math
pub use lumen_math::{Aabb, Interval, Point3, Ray, Vec3};
