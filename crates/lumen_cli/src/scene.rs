//! Scene construction: JSON scene files and the built-in demo scene.
//!
//! Materials are declared once by name and shared by every sphere that
//! references them.

use lumen_renderer::{
    Color, Dielectric, HittableList, Lambertian, Material, Metal, Point3, RenderConfig, Sphere,
    Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sphere references unknown material: {0}")]
    UnknownMaterial(String),
}

/// A material entry in a scene file.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Lambertian { albedo: Color },
    Metal { albedo: Color, fuzz: f32 },
    Dielectric { refraction_index: f32 },
}

impl MaterialDesc {
    fn build(&self) -> Arc<dyn Material> {
        match self {
            MaterialDesc::Lambertian { albedo } => Arc::new(Lambertian::new(*albedo)),
            MaterialDesc::Metal { albedo, fuzz } => Arc::new(Metal::new(*albedo, *fuzz)),
            MaterialDesc::Dielectric { refraction_index } => {
                Arc::new(Dielectric::new(*refraction_index))
            }
        }
    }
}

/// A sphere entry in a scene file.
#[derive(Debug, Clone, Deserialize)]
pub struct SphereDesc {
    pub center: Point3,
    pub radius: f32,
    pub material: String,
}

/// Scene file contents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SceneDesc {
    #[serde(default)]
    pub materials: HashMap<String, MaterialDesc>,
    #[serde(default)]
    pub spheres: Vec<SphereDesc>,
}

impl SceneDesc {
    /// Parse a scene from JSON text.
    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a scene file.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Build the scene aggregate, sharing one material instance per name.
    pub fn build(&self) -> Result<HittableList, SceneError> {
        let materials: HashMap<&str, Arc<dyn Material>> = self
            .materials
            .iter()
            .map(|(name, desc)| (name.as_str(), desc.build()))
            .collect();

        let mut world = HittableList::new();
        for sphere in &self.spheres {
            let material = materials
                .get(sphere.material.as_str())
                .ok_or_else(|| SceneError::UnknownMaterial(sphere.material.clone()))?;
            world.add(Box::new(Sphere::new(
                sphere.center,
                sphere.radius,
                Arc::clone(material),
            )));
        }

        log::debug!(
            "Built scene with {} spheres and {} materials",
            world.len(),
            materials.len()
        );
        Ok(world)
    }
}

/// Camera and quality settings that frame [`demo_scene`].
pub fn demo_config() -> RenderConfig {
    RenderConfig {
        image_width: 400,
        aspect_ratio: 16.0 / 9.0,
        samples_per_pixel: 50,
        max_depth: 50,
        vfov: 20.0,
        look_from: Point3::new(13.0, 2.0, 3.0),
        look_at: Point3::ZERO,
        vup: Vec3::Y,
        defocus_angle: 0.6,
        focus_dist: 10.0,
        ..RenderConfig::default()
    }
}

/// Ground, three large spheres and a field of small random ones.
pub fn demo_scene(seed: u64) -> HittableList {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = HittableList::new();

    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
    world.add(Box::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        ground,
    )));

    // One glass material shared by every small glass sphere
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let center = Point3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat: f32 = rng.gen();
            let material: Arc<dyn Material> = if choose_mat < 0.8 {
                // Diffuse
                let albedo = Color::new(
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                );
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = Color::new(
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                );
                Arc::new(Metal::new(albedo, rng.gen_range(0.0..0.5)))
            } else {
                Arc::clone(&glass)
            };

            world.add(Box::new(Sphere::new(center, 0.2, material)));
        }
    }

    world.add(Box::new(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, glass)));
    world.add(Box::new(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Box::new(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    world
}
