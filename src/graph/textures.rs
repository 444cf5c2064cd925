use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use itertools::Itertools;
use log::warn;
use tokio::task::JoinSet;

use crate::graph::nodes::{MaterialNode, Node, Reference, TextureFilter, TextureImage, TextureNode};
use crate::settings::MaterializeSettings;

/// Loads texture images by request path. Failures are recovered with the
/// configured fallback image and never abort a batch.
pub trait TextureLoader {
    fn load(&self, path: &str) -> impl Future<Output = anyhow::Result<TextureImage>> + Send;
}

/// Path-keyed cache of loaded textures.
///
/// One cache per materialization call by default, so batches stay
/// independent. The type is `Sync`; a caller wanting cross-call dedup can
/// hold one and reuse it.
#[derive(Debug, Default)]
pub struct TexturePathCache {
    entries: DashMap<String, Arc<TextureNode>>,
}

impl TexturePathCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn get(&self, path: &str) -> Option<Arc<TextureNode>> {
        self.entries.get(path).map(|entry| Arc::clone(&entry))
    }

    pub fn insert(&self, path: String, texture: Arc<TextureNode>) {
        self.entries.insert(path, texture);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fills the texture slots of every material in the batch, both material
/// nodes and the material clones already patched into object nodes.
///
/// All wanted paths are collected and deduplicated before any load is
/// awaited, so references to the same path collapse onto one request, and
/// distinct paths load concurrently.
pub async fn fill_textures<L>(
    nodes: &mut HashMap<String, Node>,
    settings: &MaterializeSettings,
    loader: &Arc<L>,
    cache: &TexturePathCache,
) where
    L: TextureLoader + Send + Sync + 'static,
{
    let wanted = nodes
        .values()
        .flat_map(batch_materials)
        .flat_map(|material| material.textures.iter())
        .filter_map(|(_, slot)| slot.as_ref())
        .filter_map(|reference| reference.id())
        .map(|file| request_path(&settings.texture_base_path, file))
        .unique()
        .filter(|path| cache.get(path).is_none())
        .collect_vec();

    if !wanted.is_empty() {
        let mut loads = JoinSet::new();
        for path in wanted {
            let loader = Arc::clone(loader);
            loads.spawn(async move {
                let result = loader.load(&path).await;
                (path, result)
            });
        }
        while let Some(joined) = loads.join_next().await {
            let (path, result) = match joined {
                Ok(entry) => entry,
                Err(error) => {
                    warn!("texture load task died: {error}");
                    continue;
                }
            };
            let image = match result {
                Ok(image) => image,
                Err(error) => {
                    warn!("could not load texture {path}: {error:#}");
                    let mut texture = finish_texture(path.clone(), settings.fallback_image.clone(), settings);
                    texture.fallback = true;
                    texture.needs_upload = true;
                    cache.insert(path, Arc::new(texture));
                    continue;
                }
            };
            cache.insert(path.clone(), Arc::new(finish_texture(path, image, settings)));
        }
    }

    for node in nodes.values_mut() {
        for material in batch_materials_mut(node) {
            for (_, slot) in material.textures.iter_mut() {
                let Some(file) = slot.as_ref().and_then(|reference| reference.id()) else {
                    continue;
                };
                let path = request_path(&settings.texture_base_path, file);
                if let Some(texture) = cache.get(&path) {
                    *slot = Some(Reference::Resolved(texture));
                }
            }
        }
    }
}

fn finish_texture(path: String, image: TextureImage, settings: &MaterializeSettings) -> TextureNode {
    let mut texture = TextureNode::new(path);
    texture.image = Some(image);
    if !settings.generate_mipmaps {
        // no mip chains exist for this call, so nothing may sample one
        texture.min_filter = TextureFilter::Linear;
        texture.mag_filter = TextureFilter::Linear;
    }
    texture
}

fn request_path(base: &str, file: &str) -> String {
    if base.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), file)
    }
}

/// Materials reachable from one node: the node itself when it is a
/// material, or the resolved clones hanging off an object node.
fn batch_materials(node: &Node) -> Vec<&MaterialNode> {
    match node {
        Node::Material(material) => vec![material],
        Node::Object(object) => object
            .material
            .iter()
            .flat_map(|slot| slot.refs())
            .filter_map(|reference| reference.resolved())
            .map(|boxed| &**boxed)
            .collect(),
        _ => Vec::new(),
    }
}

fn batch_materials_mut(node: &mut Node) -> Vec<&mut MaterialNode> {
    match node {
        Node::Material(material) => vec![material],
        Node::Object(object) => object
            .material
            .iter_mut()
            .flat_map(|slot| slot.refs_mut())
            .filter_map(|reference| reference.resolved_mut())
            .map(|boxed| &mut **boxed)
            .collect(),
        _ => Vec::new(),
    }
}
