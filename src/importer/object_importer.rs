use glam::{Quat, Vec3};
use log::warn;

use scenedb_records::record::{Patch, RawRecord, ReferenceValue};

use crate::Issue;
use crate::graph::nodes::{
    LightInfo, MaterialSlot, ObjectKind, ObjectNode, OrthographicInfo, PerspectiveInfo, PointLightInfo, Reference,
    SpotLightInfo,
};
use crate::importer::ImportContext;

pub struct ObjectImporter {}

impl ObjectImporter {
    pub fn import(record: &RawRecord, ctx: &ImportContext, issues: &mut Vec<Issue>) -> Result<ObjectNode, Issue> {
        let kind = Self::kind(record)?;
        let mut node = ObjectNode::new(record.id(), kind);
        node.uuid = record.patch_string("uuid").into_option();
        node.name = record.patch_string("name").into_option();

        record
            .patch_vec3("position")
            .map(|p| ctx.space.point(Vec3::from_array(p)))
            .apply(&mut node.position, Vec3::ZERO);
        record
            .patch_vec3("rotation")
            .map(|r| ctx.space.euler(Vec3::from_array(r)))
            .apply(&mut node.rotation, Vec3::ZERO);
        if let Patch::Set(q) = record.patch_quat("quaternion") {
            node.quaternion = Some(ctx.space.quaternion(Quat::from_array(q)));
        }
        if let Patch::Set(s) = record.patch_vec3("scale") {
            if s.iter().any(|&component| component == 0.0) {
                // a zero axis collapses geometry to a plane or point
                warn!("record {}: scale has a zero component, keeping the default", record.id());
                issues.push(Issue::DegenerateScale {
                    id: record.id().to_string(),
                });
            } else {
                node.scale = ctx.space.scale_triple(Vec3::from_array(s));
            }
        }

        record.patch_bool("visible").apply(&mut node.visible, true);
        record.patch_bool("castShadow").apply(&mut node.cast_shadow, false);
        record.patch_bool("receiveShadow").apply(&mut node.receive_shadow, false);

        if let Some(ReferenceValue::One(id)) = record.reference("geometry") {
            node.geometry = Some(Reference::new(id));
        }
        node.material = match record.reference("material") {
            Some(ReferenceValue::One(id)) => Some(MaterialSlot::Single(Reference::new(id))),
            Some(ReferenceValue::Many(ids)) => {
                Some(MaterialSlot::Multi(ids.into_iter().map(Reference::new).collect()))
            }
            None => None,
        };
        Ok(node)
    }

    fn kind(record: &RawRecord) -> Result<ObjectKind, Issue> {
        Ok(match record.type_name() {
            "Mesh" => ObjectKind::Mesh,
            "Line" | "LineSegments" => ObjectKind::Line,
            "Points" | "PointCloud" => ObjectKind::Points,
            "Group" | "Object3D" => ObjectKind::Group,
            "Scene" => ObjectKind::Scene,
            "AmbientLight" => ObjectKind::AmbientLight(Self::light(record)),
            "DirectionalLight" => ObjectKind::DirectionalLight(Self::light(record)),
            "PointLight" => {
                let mut info = PointLightInfo {
                    light: Self::light(record),
                    ..PointLightInfo::default()
                };
                record.patch_f32("distance").apply(&mut info.distance, 0.0);
                record.patch_f32("decay").apply(&mut info.decay, 2.0);
                ObjectKind::PointLight(info)
            }
            "SpotLight" => {
                let mut info = SpotLightInfo {
                    light: Self::light(record),
                    ..SpotLightInfo::default()
                };
                record.patch_f32("distance").apply(&mut info.distance, 0.0);
                record.patch_f32("angle").apply(&mut info.angle, SpotLightInfo::default().angle);
                record.patch_f32("penumbra").apply(&mut info.penumbra, 0.0);
                record.patch_f32("decay").apply(&mut info.decay, 2.0);
                ObjectKind::SpotLight(info)
            }
            "PerspectiveCamera" => {
                let mut info = PerspectiveInfo::default();
                record.patch_f32("fov").apply(&mut info.fov, 50.0);
                record.patch_f32("aspect").apply(&mut info.aspect, 1.0);
                record.patch_f32("near").apply(&mut info.near, 0.1);
                record.patch_f32("far").apply(&mut info.far, 2000.0);
                ObjectKind::PerspectiveCamera(info)
            }
            "OrthographicCamera" => {
                let mut info = OrthographicInfo::default();
                record.patch_f32("left").apply(&mut info.left, -1.0);
                record.patch_f32("right").apply(&mut info.right, 1.0);
                record.patch_f32("top").apply(&mut info.top, 1.0);
                record.patch_f32("bottom").apply(&mut info.bottom, -1.0);
                record.patch_f32("near").apply(&mut info.near, 0.1);
                record.patch_f32("far").apply(&mut info.far, 2000.0);
                ObjectKind::OrthographicCamera(info)
            }
            other if other.ends_with("Light") || other.ends_with("Camera") => {
                return Err(Issue::UnknownVariant {
                    id: record.id().to_string(),
                    family: "object",
                    type_name: other.to_string(),
                });
            }
            other => {
                return Err(Issue::UnknownType {
                    id: record.id().to_string(),
                    type_name: other.to_string(),
                });
            }
        })
    }

    fn light(record: &RawRecord) -> LightInfo {
        let mut info = LightInfo::default();
        record
            .patch_color("color")
            .map(Vec3::from_array)
            .apply(&mut info.color, Vec3::ONE);
        record.patch_f32("intensity").apply(&mut info.intensity, 1.0);
        info
    }
}
