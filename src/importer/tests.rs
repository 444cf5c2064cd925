use glam::{Quat, Vec3};
use serde_json::json;

use scenedb_records::attribute::codec::encode;
use scenedb_records::attribute::types::AttributeData;
use scenedb_records::record::RawRecord;

use crate::Issue;
use crate::common::coordinate_systems::{Convention, SourceSpace};
use crate::graph::nodes::{MaterialSlot, Node, ObjectKind, Reference};
use crate::importer::{ImportContext, convert};

fn record(value: serde_json::Value) -> RawRecord {
    RawRecord::from_value(value).expect("valid record")
}

fn ctx(convention: Convention, scale: f32) -> ImportContext {
    ImportContext {
        space: SourceSpace::new(convention, scale).expect("valid space"),
        compute_normals: false,
    }
}

#[test]
fn mesh_record_converts_with_transformed_fields() {
    let mut issues = Vec::new();
    let node = convert(
        &record(json!({
            "_id": "o1",
            "type": "Mesh",
            "name": "chair",
            "position": {"x": 1.0, "y": 2.0, "z": 3.0},
            "rotation": {"x": 0.5, "y": 0.25, "z": -0.5},
            "quaternion": {"x": 0.1, "y": 0.2, "z": 0.3, "w": 0.9},
            "scale": {"x": 1.0, "y": 2.0, "z": 3.0},
            "castShadow": true,
            "geometry": "g1",
            "material": ["m1", "m2"]
        })),
        &ctx(Convention::ZBack, 1.0),
        &mut issues,
    )
    .expect("converts");

    let Node::Object(object) = node else {
        panic!("expected an object node");
    };
    assert_eq!(object.kind, ObjectKind::Mesh);
    assert_eq!(object.name.as_deref(), Some("chair"));
    assert_eq!(object.position, Vec3::new(1.0, 3.0, -2.0));
    assert_eq!(object.rotation, Vec3::new(0.5, -0.5, -0.25));
    assert_eq!(object.quaternion, Some(Quat::from_xyzw(0.1, 0.3, -0.2, 0.9)));
    assert_eq!(object.scale, Vec3::new(1.0, 3.0, 2.0));
    assert!(object.cast_shadow);
    assert!(object.visible);
    assert_eq!(object.geometry.as_ref().and_then(|r| r.id()), Some("g1"));
    let Some(MaterialSlot::Multi(materials)) = &object.material else {
        panic!("expected a material list");
    };
    let ids: Vec<_> = materials.iter().filter_map(|r| r.id()).collect();
    assert_eq!(ids, vec!["m1", "m2"]);
    assert!(issues.is_empty());
}

#[test]
fn zero_scale_component_keeps_the_default() {
    let mut issues = Vec::new();
    let node = convert(
        &record(json!({
            "_id": "o1",
            "type": "Mesh",
            "scale": {"x": 0.0, "y": 1.0, "z": 1.0}
        })),
        &ctx(Convention::Identity, 1.0),
        &mut issues,
    )
    .expect("converts");

    let Node::Object(object) = node else {
        panic!("expected an object node");
    };
    assert_eq!(object.scale, Vec3::ONE);
    assert!(matches!(issues.as_slice(), [Issue::DegenerateScale { id }] if id == "o1"));
}

#[test]
fn unknown_record_type_is_terminal_for_the_record() {
    let mut issues = Vec::new();
    let result = convert(
        &record(json!({"_id": "o1", "type": "Wormhole"})),
        &ctx(Convention::Identity, 1.0),
        &mut issues,
    );
    assert!(matches!(result, Err(Issue::UnknownType { type_name, .. }) if type_name == "Wormhole"));
}

#[test]
fn unknown_material_variant_is_reported_per_family() {
    let mut issues = Vec::new();
    let result = convert(
        &record(json!({"_id": "m1", "type": "MeshChromeMaterial"})),
        &ctx(Convention::Identity, 1.0),
        &mut issues,
    );
    assert!(matches!(
        result,
        Err(Issue::UnknownVariant { family: "material", .. })
    ));
}

#[test]
fn null_clears_a_material_field_back_to_default() {
    let mut issues = Vec::new();
    let node = convert(
        &record(json!({
            "_id": "m1",
            "type": "MeshPhongMaterial",
            "opacity": null,
            "shininess": 4.0,
            "map": "wood.jpg"
        })),
        &ctx(Convention::Identity, 1.0),
        &mut issues,
    )
    .expect("converts");

    let Node::Material(material) = node else {
        panic!("expected a material node");
    };
    assert_eq!(material.opacity, 1.0);
    assert_eq!(material.shininess, 4.0);
    assert_eq!(
        material.textures.map.as_ref().and_then(|r| r.id()),
        Some("wood.jpg")
    );
    assert!(material.textures.env_map.is_none());
}

#[test]
fn buffer_geometry_decodes_and_transforms_position_only() {
    let position = encode(&AttributeData::Float32(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]));
    let normal = encode(&AttributeData::Float32(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]));
    let index = encode(&AttributeData::Uint16(vec![0, 1, 2]));
    let mut issues = Vec::new();

    let node = convert(
        &record(json!({
            "_id": "g1",
            "type": "BufferGeometry",
            "index": {"array": index},
            "position": {"array": position, "itemSize": 3},
            "normal": {"array": normal, "itemSize": 3}
        })),
        &ctx(Convention::ZBack, 1.0),
        &mut issues,
    )
    .expect("converts");

    let Node::Geometry(geometry) = node else {
        panic!("expected a geometry node");
    };
    assert_eq!(geometry.index.as_deref(), Some([0u32, 1, 2].as_slice()));
    let position = geometry.position.as_ref().expect("position channel");
    assert_eq!(position.item_size, 3);
    assert_eq!(position.data, vec![1.0, 3.0, -2.0, 4.0, 6.0, -5.0]);
    // normals were stored post-conversion and must not be remapped again
    let normal = geometry.normal.as_ref().expect("normal channel");
    assert_eq!(normal.data, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
    assert!(issues.is_empty());
}

#[test]
fn bad_channel_is_skipped_and_reported() {
    // tag 9 does not exist
    let mut issues = Vec::new();
    let node = convert(
        &record(json!({
            "_id": "g1",
            "type": "BufferGeometry",
            "position": {"array": "CQAAAAA=", "itemSize": 3}
        })),
        &ctx(Convention::Identity, 1.0),
        &mut issues,
    )
    .expect("record itself survives");

    let Node::Geometry(geometry) = node else {
        panic!("expected a geometry node");
    };
    assert!(geometry.position.is_none());
    assert!(matches!(
        issues.as_slice(),
        [Issue::Decode { field: "position", .. }]
    ));
}

#[test]
fn compute_normals_fills_the_missing_channel() {
    let position = encode(&AttributeData::Float32(vec![
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0,
    ]));
    let index = encode(&AttributeData::Uint8(vec![0, 1, 2]));
    let mut issues = Vec::new();
    let mut import_ctx = ctx(Convention::Identity, 1.0);
    import_ctx.compute_normals = true;

    let node = convert(
        &record(json!({
            "_id": "g1",
            "type": "BufferGeometry",
            "index": {"array": index},
            "position": {"array": position, "itemSize": 3}
        })),
        &import_ctx,
        &mut issues,
    )
    .expect("converts");

    let Node::Geometry(geometry) = node else {
        panic!("expected a geometry node");
    };
    let normal = geometry.normal.as_ref().expect("computed normals");
    assert_eq!(normal.item_size, 3);
    assert_eq!(normal.data, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn texture_record_parses_sampling_fields() {
    let mut issues = Vec::new();
    let node = convert(
        &record(json!({
            "_id": "t1",
            "type": "Texture",
            "image": "bricks.png",
            "wrapS": "repeat",
            "wrapT": "mirror",
            "minFilter": "nearest",
            "repeat": {"x": 2.0, "y": 2.0},
            "flipY": false
        })),
        &ctx(Convention::Identity, 1.0),
        &mut issues,
    )
    .expect("converts");

    let Node::Texture(texture) = node else {
        panic!("expected a texture node");
    };
    assert_eq!(texture.id.as_deref(), Some("t1"));
    assert_eq!(texture.source, "bricks.png");
    assert_eq!(texture.wrap_s, crate::graph::nodes::TextureWrap::Repeat);
    assert_eq!(texture.wrap_t, crate::graph::nodes::TextureWrap::Mirror);
    assert_eq!(texture.min_filter, crate::graph::nodes::TextureFilter::Nearest);
    assert_eq!(texture.repeat, glam::Vec2::splat(2.0));
    assert!(!texture.flip_y);
}

#[test]
fn reference_accessor_is_unresolved_until_patched() {
    let reference: Reference<()> = Reference::new("g7");
    assert_eq!(reference.id(), Some("g7"));
}
