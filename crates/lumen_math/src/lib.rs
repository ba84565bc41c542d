// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod aabb;
mod interval;
mod ray;
mod vec;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use vec::{
    gen_f32, gen_range, near_zero, random_in_unit_disk, random_in_unit_sphere,
    random_on_hemisphere, random_unit_vector, random_vec3, reflect, refract, Point3,
};
