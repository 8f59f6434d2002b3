//! Scene configuration.
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files. Every
//! field is optional; anything left out falls back to the default scene, a
//! single textured cube spinning in front of the camera.
//!
//! ```ron
//! (
//!     window: (width: 1024, height: 768),
//!     texture: Some("res/crate.png"),
//!     models: [
//!         (mesh: Some("res/crate2.obj"), position: (0.0, 0.0, 12.0)),
//!     ],
//! )
//! ```
//!
//! Relative paths in a file loaded with [`SceneConfig::load`] are resolved
//! against the directory that file lives in.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::Camera;
use crate::math::vec3::Vec3;
use crate::mesh::{Mesh, MeshError};
use crate::model::Model;
use crate::texture::{Texture, TextureError};
use crate::transform::Transform;

/// Raylib's "RAYWHITE".
pub const DEFAULT_CLEAR_COLOR: u32 = 0xFFF5F5F5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scene file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scene: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid scene: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub target_fps: u32,
    /// ARGB8888 background.
    pub clear_color: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "ssr".to_string(),
            width: 720,
            height: 720,
            target_fps: 60,
            clear_color: DEFAULT_CLEAR_COLOR,
        }
    }
}

/// Camera placement; angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: (f32, f32, f32),
    pub rotation: (f32, f32, f32),
    pub fov: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Units per frame.
    pub move_speed: f32,
    /// Degrees per frame.
    pub rotation_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: (0.0, 0.0, 0.0),
            rotation: (0.0, 0.0, 0.0),
            fov: 90.0,
            z_near: 0.1,
            z_far: 300.0,
            move_speed: crate::camera::DEFAULT_MOVE_SPEED,
            rotation_speed: crate::camera::DEFAULT_ROTATION_SPEED,
        }
    }
}

impl CameraConfig {
    pub fn build(&self) -> Camera {
        Camera::new(
            vec3(self.position),
            vec3(self.rotation).to_radians(),
            self.fov,
            self.z_near,
            self.z_far,
        )
        .with_speeds(self.move_speed, self.rotation_speed)
    }
}

/// One model instance; angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// OBJ file; `None` uses the built-in cube.
    pub mesh: Option<PathBuf>,
    pub position: (f32, f32, f32),
    pub rotation: (f32, f32, f32),
    pub scale: (f32, f32, f32),
    /// Rotation added every frame.
    pub spin: (f32, f32, f32),
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            mesh: None,
            position: (0.0, 0.0, 12.0),
            rotation: (0.0, 0.0, 0.0),
            scale: (2.0, 2.0, 2.0),
            spin: (2.0, 2.0, 0.0),
        }
    }
}

impl ModelConfig {
    pub fn transform(&self) -> Transform {
        let mut transform = Transform::new();
        transform
            .set_position(vec3(self.position))
            .set_rotation(vec3(self.rotation).to_radians())
            .set_scale(vec3(self.scale));
        transform
    }

    /// Per-frame rotation delta in radians.
    pub fn spin_radians(&self) -> Vec3 {
        vec3(self.spin).to_radians()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    /// Image file; `None` uses a built-in checkerboard.
    pub texture: Option<PathBuf>,
    pub models: Vec<ModelConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            texture: None,
            models: vec![ModelConfig::default()],
        }
    }
}

impl FromStr for SceneConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: SceneConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

impl SceneConfig {
    /// Load a scene from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SceneConfig = contents.parse()?;

        info!("loaded scene '{}'", path.display());
        match path.parent() {
            Some(base) => Ok(config.relative_to(base)),
            None => Ok(config),
        }
    }

    /// Rebase every relative asset path onto `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        let rebase = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        if let Some(texture) = self.texture.as_mut() {
            rebase(texture);
        }
        for model in &mut self.models {
            if let Some(mesh) = model.mesh.as_mut() {
                rebase(mesh);
            }
        }
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.window;
        if w.width == 0 || w.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                w.width, w.height
            )));
        }
        if w.target_fps == 0 {
            return Err(ConfigError::Invalid("target_fps must be at least 1".into()));
        }

        let c = &self.camera;
        if !(c.fov > 0.0 && c.fov < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera fov must be between 0 and 180 degrees, got {}",
                c.fov
            )));
        }
        if !(c.z_near > 0.0 && c.z_far > c.z_near) {
            return Err(ConfigError::Invalid(format!(
                "camera planes must satisfy 0 < z_near < z_far, got {} and {}",
                c.z_near, c.z_far
            )));
        }
        Ok(())
    }

    pub fn load_texture(&self) -> Result<Texture, TextureError> {
        match &self.texture {
            Some(path) => Texture::from_file(path),
            None => {
                info!("no texture configured, using checkerboard");
                Ok(Texture::checkerboard(64, 8, 0xFFE0E0E0, 0xFF8B5A2B))
            }
        }
    }

    /// Builds every model instance together with its per-frame spin.
    ///
    /// A mesh file named by several models is loaded once and shared.
    pub fn load_models(&self) -> Result<Vec<(Model, Vec3)>, MeshError> {
        if self.models.is_empty() {
            warn!("scene has no models, nothing will be drawn");
        }

        let mut cache: HashMap<Option<&Path>, Arc<Mesh>> = HashMap::new();
        let mut models = Vec::with_capacity(self.models.len());

        for entry in &self.models {
            let key = entry.mesh.as_deref();
            let mesh = match cache.get(&key) {
                Some(mesh) => Arc::clone(mesh),
                None => {
                    let mesh = Arc::new(match key {
                        Some(path) => Mesh::from_obj(path)?,
                        None => Mesh::cube(),
                    });
                    cache.insert(key, Arc::clone(&mesh));
                    mesh
                }
            };
            models.push((
                Model::with_transform(mesh, entry.transform()),
                entry.spin_radians(),
            ));
        }

        Ok(models)
    }
}

fn vec3((x, y, z): (f32, f32, f32)) -> Vec3 {
    Vec3::new(x, y, z)
}
