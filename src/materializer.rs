use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use log::info;

use scenedb_records::record::RawRecord;

use crate::graph::nodes::Node;
use crate::graph::resolver::{self, GeometryProvider, MaterialProvider};
use crate::graph::textures::{self, TextureLoader, TexturePathCache};
use crate::importer::{self, ImportContext};
use crate::settings::MaterializeSettings;
use crate::{Issue, MaterializeError, ResolveError};

/// One materialized batch: the id-keyed node map plus everything non-fatal
/// that happened on the way there.
#[derive(Debug, Default)]
pub struct Materialized {
    pub nodes: HashMap<String, Node>,
    pub issues: Vec<Issue>,
}

type ProgressFn = dyn Fn(usize, usize) + Send + Sync;

/// The pipeline entry point: converts raw records, resolves their
/// references through the providers and fills texture slots through the
/// loader.
///
/// Dropping the returned future abandons the call; in-flight provider
/// fetches finish on their own but their results die with the dropped
/// state and are never applied anywhere.
pub struct Materializer<G, M, L> {
    geometry: G,
    materials: M,
    textures: Arc<L>,
    settings: MaterializeSettings,
    progress: Option<Box<ProgressFn>>,
}

impl<G, M, L> Materializer<G, M, L>
where
    G: GeometryProvider,
    M: MaterialProvider,
    L: TextureLoader + Send + Sync + 'static,
{
    pub fn new(geometry: G, materials: M, textures: Arc<L>, settings: MaterializeSettings) -> Self {
        Self {
            geometry,
            materials,
            textures,
            settings,
            progress: None,
        }
    }

    /// Side channel reporting conversion progress, called once per record
    /// with `(index + 1, total)`.
    pub fn with_progress(mut self, progress: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    pub async fn materialize(&self, records: &[RawRecord]) -> Result<Materialized, MaterializeError> {
        // configuration problems abort before any record is touched
        let space = self.settings.source_space()?;
        let ctx = ImportContext {
            space,
            compute_normals: self.settings.compute_normals,
        };

        let started = Instant::now();
        let mut batch = Materialized::default();
        let total = records.len();
        for (index, record) in records.iter().enumerate() {
            if batch.nodes.contains_key(record.id()) {
                batch.issues.push(Issue::DuplicateId {
                    id: record.id().to_string(),
                });
            } else {
                match importer::convert(record, &ctx, &mut batch.issues) {
                    Ok(node) => {
                        batch.nodes.insert(record.id().to_string(), node);
                    }
                    Err(issue) => batch.issues.push(issue),
                }
            }
            if let Some(progress) = &self.progress {
                progress(index + 1, total);
            }
        }
        info!(
            "converted {} of {} records in {}ms",
            batch.nodes.len(),
            total,
            started.elapsed().as_millis()
        );

        if self.settings.auto_resolve_references {
            if let Err(source) = self.resolve(&mut batch).await {
                return Err(MaterializeError::Resolve {
                    source,
                    unresolved: Box::new(batch),
                });
            }
        }
        Ok(batch)
    }

    /// Reference resolution plus texture fill for an already-converted
    /// batch. Public so a batch handed back in
    /// [`MaterializeError::Resolve`] can be retried without converting the
    /// records again.
    pub async fn resolve(&self, batch: &mut Materialized) -> Result<(), ResolveError> {
        let started = Instant::now();
        resolver::resolve_references(&mut batch.nodes, &self.geometry, &self.materials, &mut batch.issues).await?;

        let cache = TexturePathCache::new();
        textures::fill_textures(&mut batch.nodes, &self.settings, &self.textures, &cache).await;
        info!("resolved references in {}ms", started.elapsed().as_millis());
        Ok(())
    }
}
