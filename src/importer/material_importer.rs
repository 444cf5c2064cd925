use glam::Vec3;

use scenedb_records::record::{Patch, RawRecord};

use crate::Issue;
use crate::graph::nodes::{MaterialKind, MaterialNode, Reference, TextureSlots};

pub struct MaterialImporter {}

impl MaterialImporter {
    pub fn import(record: &RawRecord) -> Result<MaterialNode, Issue> {
        let kind = match record.type_name() {
            "MeshBasicMaterial" => MaterialKind::Basic,
            "MeshLambertMaterial" => MaterialKind::Lambert,
            "MeshPhongMaterial" => MaterialKind::Phong,
            "MeshStandardMaterial" | "MeshPhysicalMaterial" => MaterialKind::Standard,
            "LineBasicMaterial" => MaterialKind::LineBasic,
            "PointsMaterial" => MaterialKind::Points,
            other => {
                return Err(Issue::UnknownVariant {
                    id: record.id().to_string(),
                    family: "material",
                    type_name: other.to_string(),
                });
            }
        };

        let mut material = MaterialNode::new(record.id(), kind);
        let defaults = MaterialNode::new("", kind);
        material.name = record.patch_string("name").into_option();

        record
            .patch_color("color")
            .map(Vec3::from_array)
            .apply(&mut material.color, defaults.color);
        record
            .patch_color("emissive")
            .map(Vec3::from_array)
            .apply(&mut material.emissive, defaults.emissive);
        record
            .patch_color("specular")
            .map(Vec3::from_array)
            .apply(&mut material.specular, defaults.specular);
        record.patch_f32("shininess").apply(&mut material.shininess, defaults.shininess);
        record.patch_f32("metalness").apply(&mut material.metalness, defaults.metalness);
        record.patch_f32("roughness").apply(&mut material.roughness, defaults.roughness);
        record.patch_f32("opacity").apply(&mut material.opacity, defaults.opacity);
        record.patch_bool("transparent").apply(&mut material.transparent, false);
        record.patch_bool("wireframe").apply(&mut material.wireframe, false);
        record.patch_bool("doubleSided").apply(&mut material.double_sided, false);

        // texture slots hold filenames until the path cache fills them
        for name in TextureSlots::NAMES {
            if let Patch::Set(file) = record.patch_string(name) {
                if !file.is_empty() {
                    if let Some(slot) = material.textures.slot_mut(name) {
                        *slot = Some(Reference::new(file));
                    }
                }
            }
        }
        Ok(material)
    }
}
