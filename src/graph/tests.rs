use std::sync::Arc;

use crate::graph::nodes::{
    GeometryNode, MaterialKind, MaterialNode, MaterialRef, MaterialSlot, Reference, TextureSlots,
};

#[test]
fn references_expose_their_id_until_resolved() {
    let mut reference: Reference<Arc<GeometryNode>> = Reference::new("g1");
    assert_eq!(reference.id(), Some("g1"));
    assert!(!reference.is_resolved());
    assert!(reference.resolved().is_none());

    reference = Reference::Resolved(Arc::new(GeometryNode::new("g1")));
    assert_eq!(reference.id(), None);
    assert!(reference.is_resolved());
    assert_eq!(reference.resolved().map(|g| g.id.as_str()), Some("g1"));
}

#[test]
fn material_slots_iterate_single_and_multi() {
    let single = MaterialSlot::Single(MaterialRef::new("m1"));
    assert_eq!(single.refs().count(), 1);

    let multi = MaterialSlot::Multi(vec![MaterialRef::new("m1"), MaterialRef::new("m2")]);
    let ids: Vec<_> = multi.refs().filter_map(|r| r.id()).collect();
    assert_eq!(ids, vec!["m1", "m2"]);
}

#[test]
fn texture_slots_cover_the_whole_closed_list() {
    let mut slots = TextureSlots::default();
    assert_eq!(slots.iter().count(), TextureSlots::NAMES.len());
    let names: Vec<_> = slots.iter_mut().map(|(name, _)| name).collect();
    assert_eq!(names.as_slice(), TextureSlots::NAMES.as_slice());

    for name in TextureSlots::NAMES {
        assert!(slots.slot_mut(name).is_some(), "missing slot {name}");
    }
    assert!(slots.slot_mut("glowMap").is_none());
}

#[test]
fn material_defaults_are_opaque_white() {
    let material = MaterialNode::new("m1", MaterialKind::Phong);
    assert_eq!(material.opacity, 1.0);
    assert!(!material.transparent);
    assert_eq!(material.color, glam::Vec3::ONE);
    assert_eq!(material.shininess, 30.0);
}
