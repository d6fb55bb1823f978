use crate::collection::CollectionMeta;
use crate::error::ForgeResult;
use crate::record::Pfp;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

/// Per-item document handed to the publishing side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
    pub description: String,
    /// Published as `traitCount`, the key existing marketplace documents carry.
    #[serde(rename = "traitCount")]
    pub score: f64,
    pub image: String,
    pub attributes: Vec<Attribute>,
}

impl Metadata {
    pub fn new(meta: &CollectionMeta, pfp: &Pfp, attributes: Vec<Attribute>) -> Self {
        Self {
            name: pfp.unique_id.clone(),
            description: format!("{}{}", meta.description_prefix, pfp.unique_id),
            score: pfp.score,
            image: format!("{}{}.png", meta.base_uri, pfp.unique_id),
            attributes,
        }
    }
}

pub trait MetadataSink {
    fn publish(&mut self, metadata: &Metadata) -> ForgeResult<()>;
}

/// Keeps everything in memory.
impl MetadataSink for Vec<Metadata> {
    fn publish(&mut self, metadata: &Metadata) -> ForgeResult<()> {
        self.push(metadata.clone());
        Ok(())
    }
}

/// Writes `<dir>/<name>.json` per item.
pub struct JsonMetadataWriter {
    dir: PathBuf,
}

impl JsonMetadataWriter {
    pub fn new<P: AsRef<Path>>(dir: P) -> ForgeResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}

impl MetadataSink for JsonMetadataWriter {
    fn publish(&mut self, metadata: &Metadata) -> ForgeResult<()> {
        let path = self.dir.join(format!("{}.json", metadata.name));
        fs::write(path, serde_json::to_string_pretty(metadata)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_derive_from_identifier() {
        let meta = CollectionMeta {
            name: "Dan".into(),
            size: 1,
            description_prefix: "Dan_".into(),
            base_uri: "ipfs://root/".into(),
        };
        let pfp = Pfp::new(1, "_Sky", vec![Some(0)], 4.0);
        let md = Metadata::new(&meta, &pfp, vec![]);
        assert_eq!(md.name, "0001_Sky");
        assert_eq!(md.description, "Dan_0001_Sky");
        assert_eq!(md.image, "ipfs://root/0001_Sky.png");
        assert_eq!(md.score, 4.0);
    }

    #[test]
    fn score_is_published_as_trait_count() {
        let meta = CollectionMeta {
            name: "Dan".into(),
            size: 1,
            description_prefix: String::new(),
            base_uri: String::new(),
        };
        let pfp = Pfp::new(3, "_Sky", vec![Some(0)], 2.5);
        let json = serde_json::to_string(&Metadata::new(&meta, &pfp, vec![])).unwrap();
        assert!(json.contains("\"traitCount\":2.5"));
        assert!(!json.contains("\"score\""));

        let back: Metadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back.score, 2.5);
    }
}
