use serde::Deserialize;

use crate::MaterializeError;
use crate::common::coordinate_systems::{Convention, SourceSpace};
use crate::graph::nodes::TextureImage;

/// Per-call configuration of one materialization, deserializable from the
/// camelCase wire shape callers already pass around.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterializeSettings {
    pub coordinate_convention: Convention,
    pub scale: f32,
    /// Compute smooth vertex normals for geometries that come without a
    /// normal channel.
    pub compute_normals: bool,
    /// When off, conversion stops at raw reference ids and the providers
    /// are never called.
    pub auto_resolve_references: bool,
    /// When off, every loaded texture is forced to plain linear filtering.
    pub generate_mipmaps: bool,
    pub texture_base_path: String,
    /// Substituted when a texture fails to load. Injected rather than a
    /// process-wide constant so tests can use a deterministic placeholder.
    #[serde(skip)]
    pub fallback_image: TextureImage,
}

impl Default for MaterializeSettings {
    fn default() -> Self {
        Self {
            coordinate_convention: Convention::Identity,
            scale: 1.0,
            compute_normals: false,
            auto_resolve_references: true,
            generate_mipmaps: true,
            texture_base_path: String::new(),
            fallback_image: TextureImage::default(),
        }
    }
}

impl MaterializeSettings {
    /// Validates the convention/scale pair. Called before any record is
    /// touched; a bad configuration aborts the whole call.
    pub fn source_space(&self) -> Result<SourceSpace, MaterializeError> {
        SourceSpace::new(self.coordinate_convention, self.scale)
    }
}
