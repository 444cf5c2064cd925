use glam::Vec3;

use scenedb_records::attribute::codec;
use scenedb_records::attribute::types::AttributeData;
use scenedb_records::record::{BufferDescriptor, RawRecord};

use crate::Issue;
use crate::graph::nodes::{BufferChannel, GeometryNode};
use crate::importer::ImportContext;

pub struct GeometryImporter {}

impl GeometryImporter {
    pub fn import(record: &RawRecord, ctx: &ImportContext, issues: &mut Vec<Issue>) -> Result<GeometryNode, Issue> {
        match record.type_name() {
            "BufferGeometry" | "Geometry" => {}
            other => {
                return Err(Issue::UnknownVariant {
                    id: record.id().to_string(),
                    family: "geometry",
                    type_name: other.to_string(),
                });
            }
        }

        let mut geometry = GeometryNode::new(record.id());
        geometry.name = record.patch_string("name").into_option();

        if let Some((data, _)) = Self::channel(record, "index", issues) {
            geometry.index = Some(data.to_u32());
        }
        if let Some((data, descriptor)) = Self::channel(record, "position", issues) {
            let mut positions = data.to_f32();
            // the only channel that lives in the source coordinate space
            ctx.space.positions_in_place(&mut positions);
            geometry.position = Some(Self::to_channel(positions, &descriptor));
        }
        if let Some((data, descriptor)) = Self::channel(record, "normal", issues) {
            geometry.normal = Some(Self::to_channel(data.to_f32(), &descriptor));
        }
        if let Some((data, descriptor)) = Self::channel(record, "uv", issues) {
            geometry.uv = Some(Self::to_channel(data.to_f32(), &descriptor));
        }

        if ctx.compute_normals && geometry.normal.is_none() {
            if let Some(normals) = compute_vertex_normals(&geometry) {
                geometry.normal = Some(BufferChannel {
                    data: normals,
                    item_size: 3,
                    normalized: false,
                });
            }
        }
        Ok(geometry)
    }

    /// Reads and decodes one attribute channel. A bad descriptor or blob is
    /// fatal for the field only: it is reported and the channel skipped.
    fn channel(
        record: &RawRecord,
        field: &'static str,
        issues: &mut Vec<Issue>,
    ) -> Option<(AttributeData, BufferDescriptor)> {
        let descriptor = match record.buffer(field)? {
            Ok(descriptor) => descriptor,
            Err(error) => {
                issues.push(Issue::Decode {
                    id: record.id().to_string(),
                    field,
                    source: error,
                });
                return None;
            }
        };
        match codec::decode(&descriptor.array) {
            Ok(data) => Some((data, descriptor)),
            Err(error) => {
                issues.push(Issue::Decode {
                    id: record.id().to_string(),
                    field,
                    source: error,
                });
                None
            }
        }
    }

    fn to_channel(data: Vec<f32>, descriptor: &BufferDescriptor) -> BufferChannel {
        BufferChannel {
            data,
            item_size: descriptor.item_size,
            normalized: descriptor.normalized,
        }
    }
}

/// Area-weighted smooth vertex normals: face normals accumulate at every
/// corner they touch, the sums are normalized at the end. Works on indexed
/// geometry and on sequential-triangle soups.
pub(crate) fn compute_vertex_normals(geometry: &GeometryNode) -> Option<Vec<f32>> {
    let position = geometry.position.as_ref()?;
    if position.item_size != 3 {
        return None;
    }
    let positions = &position.data;
    let vertex_count = positions.len() / 3;
    if vertex_count == 0 {
        return None;
    }

    let vec3_at = |i: usize| Vec3::new(positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]);
    let mut normals = vec![Vec3::ZERO; vertex_count];
    let mut accumulate = |i0: usize, i1: usize, i2: usize| {
        if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
            return;
        }
        let p0 = vec3_at(i0);
        // the cross product length carries the face area, bigger faces
        // weigh more
        let face = (vec3_at(i1) - p0).cross(vec3_at(i2) - p0);
        normals[i0] += face;
        normals[i1] += face;
        normals[i2] += face;
    };

    match &geometry.index {
        Some(index) => {
            for triangle in index.chunks_exact(3) {
                accumulate(triangle[0] as usize, triangle[1] as usize, triangle[2] as usize);
            }
        }
        None => {
            for base in 0..vertex_count / 3 {
                accumulate(base * 3, base * 3 + 1, base * 3 + 2);
            }
        }
    }

    let mut out = Vec::with_capacity(vertex_count * 3);
    for normal in normals {
        out.extend_from_slice(&normal.normalize_or_zero().to_array());
    }
    Some(out)
}
