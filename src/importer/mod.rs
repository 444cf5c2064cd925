//! Converts one flat record into its concrete node type.
//!
//! Conversion is pure and synchronous: scalar and flag fields are copied
//! under the patch-if-defined policy, coordinate-bearing fields go through
//! the [`SourceSpace`] exactly once, buffer channels through the attribute
//! codec. Reference fields stay raw ids; linking them up is the resolver's
//! job.

use std::sync::Arc;

use scenedb_records::record::RawRecord;

use crate::Issue;
use crate::common::coordinate_systems::SourceSpace;
use crate::graph::nodes::Node;

pub mod geometry_importer;
pub mod material_importer;
pub mod object_importer;
pub mod texture_importer;

#[cfg(test)]
mod tests;

use geometry_importer::GeometryImporter;
use material_importer::MaterialImporter;
use object_importer::ObjectImporter;
use texture_importer::TextureImporter;

/// Conversion-time context, fixed for one materialization call.
#[derive(Debug, Clone, Copy)]
pub struct ImportContext {
    pub space: SourceSpace,
    pub compute_normals: bool,
}

/// Dispatches a record to its family importer. A terminal problem with the
/// record comes back as `Err`, recovered ones (skipped channels, degenerate
/// scales) are pushed onto `issues`.
pub fn convert(record: &RawRecord, ctx: &ImportContext, issues: &mut Vec<Issue>) -> Result<Node, Issue> {
    let type_name = record.type_name();
    if type_name.ends_with("Geometry") {
        GeometryImporter::import(record, ctx, issues).map(|geometry| Node::Geometry(Arc::new(geometry)))
    } else if type_name.ends_with("Material") {
        MaterialImporter::import(record).map(Node::Material)
    } else if type_name == "Texture" {
        TextureImporter::import(record).map(Node::Texture)
    } else {
        ObjectImporter::import(record, ctx, issues).map(Node::Object)
    }
}
