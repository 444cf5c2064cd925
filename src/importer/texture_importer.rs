use glam::Vec2;

use scenedb_records::record::RawRecord;

use crate::Issue;
use crate::graph::nodes::{TextureFilter, TextureNode, TextureWrap};

pub struct TextureImporter {}

impl TextureImporter {
    pub fn import(record: &RawRecord) -> Result<TextureNode, Issue> {
        let source = record.str_field("image").unwrap_or_default();
        let mut texture = TextureNode::new(source);
        texture.id = Some(record.id().to_string());
        texture.name = record.patch_string("name").into_option();

        if let Some(filter) = record.str_field("minFilter").and_then(parse_filter) {
            texture.min_filter = filter;
        }
        if let Some(filter) = record.str_field("magFilter").and_then(parse_filter) {
            texture.mag_filter = filter;
        }
        if let Some(wrap) = record.str_field("wrapS").and_then(parse_wrap) {
            texture.wrap_s = wrap;
        }
        if let Some(wrap) = record.str_field("wrapT").and_then(parse_wrap) {
            texture.wrap_t = wrap;
        }
        record
            .patch_vec2("repeat")
            .map(Vec2::from_array)
            .apply(&mut texture.repeat, Vec2::ONE);
        record
            .patch_vec2("offset")
            .map(Vec2::from_array)
            .apply(&mut texture.offset, Vec2::ZERO);
        record.patch_bool("flipY").apply(&mut texture.flip_y, true);
        record.patch_f32("anisotropy").apply(&mut texture.anisotropy, 1.0);
        Ok(texture)
    }
}

fn parse_filter(name: &str) -> Option<TextureFilter> {
    match name {
        "nearest" => Some(TextureFilter::Nearest),
        "linear" => Some(TextureFilter::Linear),
        "linear-mipmap-linear" => Some(TextureFilter::LinearMipmapLinear),
        _ => None,
    }
}

fn parse_wrap(name: &str) -> Option<TextureWrap> {
    match name {
        "clamp" => Some(TextureWrap::Clamp),
        "repeat" => Some(TextureWrap::Repeat),
        "mirror" => Some(TextureWrap::Mirror),
        _ => None,
    }
}
