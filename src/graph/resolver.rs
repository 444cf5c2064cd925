use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use itertools::Itertools;
use log::debug;

use crate::graph::nodes::{GeometryNode, GeometryRef, MaterialNode, MaterialRef, Node, Reference};
use crate::{Issue, ResolveError};

/// Bulk reader for geometry records referenced from a batch. One call per
/// batch, with the deduplicated id set.
pub trait GeometryProvider {
    fn read(&self, ids: &[String]) -> impl Future<Output = anyhow::Result<HashMap<String, GeometryNode>>> + Send;
}

/// Bulk reader for material records referenced from a batch.
pub trait MaterialProvider {
    fn read(&self, ids: &[String]) -> impl Future<Output = anyhow::Result<HashMap<String, MaterialNode>>> + Send;
}

/// Resolves the dangling geometry and material ids of a converted batch.
///
/// Both provider reads are issued before either is awaited and patching
/// only starts once both have settled. On a provider failure nothing has
/// been patched: every reference id is still in place, so the same batch
/// can be retried.
pub async fn resolve_references<G, M>(
    nodes: &mut HashMap<String, Node>,
    geometry_provider: &G,
    material_provider: &M,
    issues: &mut Vec<Issue>,
) -> Result<(), ResolveError>
where
    G: GeometryProvider,
    M: MaterialProvider,
{
    let geometry_ids = nodes
        .values()
        .filter_map(Node::as_object)
        .filter_map(|object| object.geometry.as_ref())
        .filter_map(|reference| reference.id())
        .map(str::to_string)
        .unique()
        .collect_vec();
    let material_ids = nodes
        .values()
        .filter_map(Node::as_object)
        .filter_map(|object| object.material.as_ref())
        .flat_map(|slot| slot.refs())
        .filter_map(|reference| reference.id())
        .map(str::to_string)
        .unique()
        .collect_vec();

    // Fast path: a batch without reference fields never touches the
    // providers.
    if geometry_ids.is_empty() && material_ids.is_empty() {
        return Ok(());
    }
    debug!(
        "resolving {} distinct geometry and {} distinct material references",
        geometry_ids.len(),
        material_ids.len()
    );

    let geometry_read = async {
        if geometry_ids.is_empty() {
            Ok(HashMap::new())
        } else {
            geometry_provider.read(&geometry_ids).await
        }
    };
    let material_read = async {
        if material_ids.is_empty() {
            Ok(HashMap::new())
        } else {
            material_provider.read(&material_ids).await
        }
    };
    let (geometry_result, material_result) = tokio::join!(geometry_read, material_read);

    let geometries: HashMap<String, Arc<GeometryNode>> = geometry_result
        .map_err(ResolveError::Geometry)?
        .into_iter()
        .map(|(id, geometry)| (id, Arc::new(geometry)))
        .collect();
    let materials = material_result.map_err(ResolveError::Material)?;

    for node in nodes.values_mut() {
        let Some(object) = node.as_object_mut() else {
            continue;
        };
        let id = object.id.clone();
        if let Some(reference) = object.geometry.as_mut() {
            patch_geometry(&id, reference, &geometries, issues);
        }
        if let Some(slot) = object.material.as_mut() {
            for reference in slot.refs_mut() {
                patch_material(&id, reference, &materials, issues);
            }
        }
    }
    Ok(())
}

fn patch_geometry(
    id: &str,
    reference: &mut GeometryRef,
    resolved: &HashMap<String, Arc<GeometryNode>>,
    issues: &mut Vec<Issue>,
) {
    let Reference::Unresolved(wanted) = &*reference else {
        return;
    };
    match resolved.get(wanted) {
        Some(geometry) => *reference = Reference::Resolved(Arc::clone(geometry)),
        None => issues.push(Issue::MissingReference {
            id: id.to_string(),
            family: "geometry",
            reference: wanted.clone(),
        }),
    }
}

fn patch_material(
    id: &str,
    reference: &mut MaterialRef,
    resolved: &HashMap<String, MaterialNode>,
    issues: &mut Vec<Issue>,
) {
    let Reference::Unresolved(wanted) = &*reference else {
        return;
    };
    match resolved.get(wanted) {
        // every node gets its own clone, materials hold per-node state
        Some(material) => *reference = Reference::Resolved(Box::new(material.clone())),
        None => issues.push(Issue::MissingReference {
            id: id.to_string(),
            family: "material",
            reference: wanted.clone(),
        }),
    }
}
