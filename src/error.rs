use thiserror::Error;

use crate::config::ConfigError;
use crate::mesh::MeshError;
use crate::texture::TextureError;

/// Anything that can stop the viewer from starting or running.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error(transparent)]
    Texture(#[from] TextureError),
    /// SDL2 reports its failures as plain strings.
    #[error("window error: {0}")]
    Window(String),
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Window(message)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
