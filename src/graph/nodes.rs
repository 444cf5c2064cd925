use std::f32::consts::PI;
use std::sync::Arc;

use glam::{Quat, Vec2, Vec3};
use itertools::Either;

/// A reference field: either the raw foreign id copied from the record, or
/// the live sub-graph value patched in by the resolver. Never both, and
/// never a mix inside an id list.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference<T> {
    Unresolved(String),
    Resolved(T),
}

impl<T> Reference<T> {
    pub fn new(id: impl Into<String>) -> Self {
        Reference::Unresolved(id.into())
    }

    /// The foreign id, while still unresolved.
    pub fn id(&self) -> Option<&str> {
        match self {
            Reference::Unresolved(id) => Some(id),
            Reference::Resolved(_) => None,
        }
    }

    pub fn resolved(&self) -> Option<&T> {
        match self {
            Reference::Unresolved(_) => None,
            Reference::Resolved(value) => Some(value),
        }
    }

    pub fn resolved_mut(&mut self) -> Option<&mut T> {
        match self {
            Reference::Unresolved(_) => None,
            Reference::Resolved(value) => Some(value),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Reference::Resolved(_))
    }
}

/// Geometries are shareable between nodes.
pub type GeometryRef = Reference<Arc<GeometryNode>>;
/// Materials carry per-node mutable state (opacity fades), so every node
/// gets its own clone instead of a shared pointer.
pub type MaterialRef = Reference<Box<MaterialNode>>;
/// Textures are shared: every slot resolving to the same path receives the
/// same instance.
pub type TextureRef = Reference<Arc<TextureNode>>;

/// One materialized record.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Object(ObjectNode),
    Geometry(Arc<GeometryNode>),
    Material(MaterialNode),
    Texture(TextureNode),
}

impl Node {
    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            Node::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ObjectNode> {
        match self {
            Node::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_material(&self) -> Option<&MaterialNode> {
        match self {
            Node::Material(material) => Some(material),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
    pub id: String,
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub kind: ObjectKind,
    pub position: Vec3,
    /// Euler angles in radians, XYZ order.
    pub rotation: Vec3,
    pub quaternion: Option<Quat>,
    pub scale: Vec3,
    pub visible: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub geometry: Option<GeometryRef>,
    pub material: Option<MaterialSlot>,
}

impl ObjectNode {
    pub fn new(id: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            id: id.into(),
            uuid: None,
            name: None,
            kind,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            quaternion: None,
            scale: Vec3::ONE,
            visible: true,
            cast_shadow: false,
            receive_shadow: false,
            geometry: None,
            material: None,
        }
    }
}

/// A node's material field is a single reference or an ordered group of
/// them, mirroring the record shape.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialSlot {
    Single(MaterialRef),
    Multi(Vec<MaterialRef>),
}

impl MaterialSlot {
    pub fn refs(&self) -> impl Iterator<Item = &MaterialRef> {
        match self {
            MaterialSlot::Single(reference) => Either::Left(std::iter::once(reference)),
            MaterialSlot::Multi(references) => Either::Right(references.iter()),
        }
    }

    pub fn refs_mut(&mut self) -> impl Iterator<Item = &mut MaterialRef> {
        match self {
            MaterialSlot::Single(reference) => Either::Left(std::iter::once(reference)),
            MaterialSlot::Multi(references) => Either::Right(references.iter_mut()),
        }
    }
}

/// Closed set of object variants. New ones extend this enum and the
/// importer's constructor table.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Mesh,
    Line,
    Points,
    Group,
    Scene,
    AmbientLight(LightInfo),
    DirectionalLight(LightInfo),
    PointLight(PointLightInfo),
    SpotLight(SpotLightInfo),
    PerspectiveCamera(PerspectiveInfo),
    OrthographicCamera(OrthographicInfo),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightInfo {
    pub color: Vec3,
    pub intensity: f32,
}

impl Default for LightInfo {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointLightInfo {
    pub light: LightInfo,
    /// 0 means no distance cutoff.
    pub distance: f32,
    pub decay: f32,
}

impl Default for PointLightInfo {
    fn default() -> Self {
        Self {
            light: LightInfo::default(),
            distance: 0.0,
            decay: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpotLightInfo {
    pub light: LightInfo,
    pub distance: f32,
    pub angle: f32,
    pub penumbra: f32,
    pub decay: f32,
}

impl Default for SpotLightInfo {
    fn default() -> Self {
        Self {
            light: LightInfo::default(),
            distance: 0.0,
            angle: PI / 3.0,
            penumbra: 0.0,
            decay: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveInfo {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveInfo {
    fn default() -> Self {
        Self {
            fov: 50.0,
            aspect: 1.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicInfo {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrthographicInfo {
    fn default() -> Self {
        Self {
            left: -1.0,
            right: 1.0,
            top: 1.0,
            bottom: -1.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

/// One decoded vertex-attribute channel.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferChannel {
    pub data: Vec<f32>,
    pub item_size: u32,
    pub normalized: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeometryNode {
    pub id: String,
    pub name: Option<String>,
    pub index: Option<Vec<u32>>,
    pub position: Option<BufferChannel>,
    pub normal: Option<BufferChannel>,
    pub uv: Option<BufferChannel>,
}

impl GeometryNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            index: None,
            position: None,
            normal: None,
            uv: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    Basic,
    Lambert,
    Phong,
    Standard,
    LineBasic,
    Points,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialNode {
    pub id: String,
    pub name: Option<String>,
    pub kind: MaterialKind,
    pub color: Vec3,
    pub emissive: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
    pub metalness: f32,
    pub roughness: f32,
    pub opacity: f32,
    pub transparent: bool,
    pub wireframe: bool,
    pub double_sided: bool,
    pub textures: TextureSlots,
}

impl MaterialNode {
    pub fn new(id: impl Into<String>, kind: MaterialKind) -> Self {
        Self {
            id: id.into(),
            name: None,
            kind,
            color: Vec3::ONE,
            emissive: Vec3::ZERO,
            specular: Vec3::splat(0x11 as f32 / 255.0),
            shininess: 30.0,
            metalness: 0.0,
            roughness: 1.0,
            opacity: 1.0,
            transparent: false,
            wireframe: false,
            double_sided: false,
            textures: TextureSlots::default(),
        }
    }
}

/// The closed set of texture slots a material can carry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureSlots {
    pub map: Option<TextureRef>,
    pub light_map: Option<TextureRef>,
    pub ao_map: Option<TextureRef>,
    pub emissive_map: Option<TextureRef>,
    pub bump_map: Option<TextureRef>,
    pub normal_map: Option<TextureRef>,
    pub displacement_map: Option<TextureRef>,
    pub specular_map: Option<TextureRef>,
    pub alpha_map: Option<TextureRef>,
    pub env_map: Option<TextureRef>,
}

impl TextureSlots {
    /// Wire names of the slots, in scan order.
    pub const NAMES: [&'static str; 10] = [
        "map",
        "lightMap",
        "aoMap",
        "emissiveMap",
        "bumpMap",
        "normalMap",
        "displacementMap",
        "specularMap",
        "alphaMap",
        "envMap",
    ];

    pub fn slot_mut(&mut self, name: &str) -> Option<&mut Option<TextureRef>> {
        match name {
            "map" => Some(&mut self.map),
            "lightMap" => Some(&mut self.light_map),
            "aoMap" => Some(&mut self.ao_map),
            "emissiveMap" => Some(&mut self.emissive_map),
            "bumpMap" => Some(&mut self.bump_map),
            "normalMap" => Some(&mut self.normal_map),
            "displacementMap" => Some(&mut self.displacement_map),
            "specularMap" => Some(&mut self.specular_map),
            "alphaMap" => Some(&mut self.alpha_map),
            "envMap" => Some(&mut self.env_map),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Option<TextureRef>)> {
        [
            ("map", &self.map),
            ("lightMap", &self.light_map),
            ("aoMap", &self.ao_map),
            ("emissiveMap", &self.emissive_map),
            ("bumpMap", &self.bump_map),
            ("normalMap", &self.normal_map),
            ("displacementMap", &self.displacement_map),
            ("specularMap", &self.specular_map),
            ("alphaMap", &self.alpha_map),
            ("envMap", &self.env_map),
        ]
        .into_iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&'static str, &mut Option<TextureRef>)> {
        [
            ("map", &mut self.map),
            ("lightMap", &mut self.light_map),
            ("aoMap", &mut self.ao_map),
            ("emissiveMap", &mut self.emissive_map),
            ("bumpMap", &mut self.bump_map),
            ("normalMap", &mut self.normal_map),
            ("displacementMap", &mut self.displacement_map),
            ("specularMap", &mut self.specular_map),
            ("alphaMap", &mut self.alpha_map),
            ("envMap", &mut self.env_map),
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
    LinearMipmapLinear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureWrap {
    Clamp,
    Repeat,
    Mirror,
}

/// Raw image payload handed over by the texture loader.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// A 1x1 single-color image, the shape of the injected fallback.
    pub fn solid_color(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }
}

impl Default for TextureImage {
    fn default() -> Self {
        Self::solid_color([255, 255, 255, 255])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureNode {
    /// Set for textures materialized from their own records; loader-made
    /// textures only have a source path.
    pub id: Option<String>,
    pub name: Option<String>,
    /// Filename from the record, or the resolved request path for loaded
    /// textures.
    pub source: String,
    pub image: Option<TextureImage>,
    pub min_filter: TextureFilter,
    pub mag_filter: TextureFilter,
    pub wrap_s: TextureWrap,
    pub wrap_t: TextureWrap,
    pub repeat: Vec2,
    pub offset: Vec2,
    pub flip_y: bool,
    pub anisotropy: f32,
    /// Set when the image changed after creation (fallback substitution)
    /// and the renderer needs to re-upload it.
    pub needs_upload: bool,
    pub fallback: bool,
}

impl TextureNode {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            id: None,
            name: None,
            source: source.into(),
            image: None,
            min_filter: TextureFilter::LinearMipmapLinear,
            mag_filter: TextureFilter::Linear,
            wrap_s: TextureWrap::Clamp,
            wrap_t: TextureWrap::Clamp,
            repeat: Vec2::ONE,
            offset: Vec2::ZERO,
            flip_y: true,
            anisotropy: 1.0,
            needs_upload: false,
            fallback: false,
        }
    }
}
