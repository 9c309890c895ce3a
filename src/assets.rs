//! Sprite catalogue
//!
//! The simulation only needs sprite dimensions: hit boxes, ground placement
//! and batch spacing are all derived from them. Pixels stay with the platform.

use std::collections::BTreeMap;
use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::platform::Platform;
use crate::sim::ObstacleSize;

/// Every sprite the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Character,
    CactusSmall1,
    CactusSmall2,
    CactusLarge1,
    CactusLarge2,
}

impl SpriteId {
    pub const ALL: [SpriteId; 5] = [
        SpriteId::Character,
        SpriteId::CactusSmall1,
        SpriteId::CactusSmall2,
        SpriteId::CactusLarge1,
        SpriteId::CactusLarge2,
    ];

    /// Name of the source image asset
    pub fn image_name(self) -> &'static str {
        match self {
            SpriteId::Character => "dino",
            SpriteId::CactusSmall1 => "cactus_small_1",
            SpriteId::CactusSmall2 => "cactus_small_2",
            SpriteId::CactusLarge1 => "cactus_large_1",
            SpriteId::CactusLarge2 => "cactus_large_2",
        }
    }

    /// Cactus sprite for a size class and visual variant (0 or 1)
    pub fn cactus(size: ObstacleSize, variant: u8) -> Self {
        match (size, variant) {
            (ObstacleSize::Small, 0) => SpriteId::CactusSmall1,
            (ObstacleSize::Small, _) => SpriteId::CactusSmall2,
            (ObstacleSize::Large, 0) => SpriteId::CactusLarge1,
            (ObstacleSize::Large, _) => SpriteId::CactusLarge2,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Pixel dimensions of a source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: i32,
    pub height: i32,
}

impl ImageInfo {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Image name -> source dimensions, loaded from JSON or built in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetManifest {
    pub images: BTreeMap<String, ImageInfo>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        let images = [
            ("dino", ImageInfo::new(88, 94)),
            ("cactus_small_1", ImageInfo::new(85, 180)),
            ("cactus_small_2", ImageInfo::new(100, 180)),
            ("cactus_large_1", ImageInfo::new(125, 250)),
            ("cactus_large_2", ImageInfo::new(150, 250)),
        ]
        .into_iter()
        .map(|(name, info)| (name.to_string(), info))
        .collect();
        Self { images }
    }
}

impl AssetManifest {
    /// Read a manifest file; entries missing from the file keep their built-in size
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let overrides: BTreeMap<String, ImageInfo> =
            serde_json::from_str(&json).map_err(|e| Error::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let mut manifest = Self::default();
        log::info!("Loaded {} image entries from {}", overrides.len(), path.display());
        manifest.images.extend(overrides);
        Ok(manifest)
    }

    pub fn get(&self, name: &str) -> Option<ImageInfo> {
        self.images.get(name).copied()
    }
}

/// On-screen sprite sizes after scaling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    sizes: [IVec2; 5],
}

impl SpriteSheet {
    /// Load every sprite through the platform. Any failure aborts startup.
    pub fn load<P: Platform + ?Sized>(platform: &mut P) -> Result<Self> {
        let mut sizes = [IVec2::ZERO; 5];
        for id in SpriteId::ALL {
            let name = id.image_name();
            let info = platform.load_image(name)?;
            if info.width <= 0 || info.height <= 0 {
                return Err(Error::InvalidImage {
                    name: name.to_string(),
                    width: info.width,
                    height: info.height,
                });
            }
            sizes[id.index()] = match id {
                SpriteId::Character => IVec2::new(CHARACTER_WIDTH, CHARACTER_HEIGHT),
                _ => Self::scale_obstacle(info),
            };
            log::debug!("Sprite {} -> {}x{}", name, sizes[id.index()].x, sizes[id.index()].y);
        }
        Ok(Self { sizes })
    }

    /// Built-in sizes, without going through a platform
    pub fn builtin() -> Self {
        let manifest = AssetManifest::default();
        let mut sizes = [IVec2::new(CHARACTER_WIDTH, CHARACTER_HEIGHT); 5];
        for id in SpriteId::ALL {
            if id != SpriteId::Character {
                if let Some(info) = manifest.get(id.image_name()) {
                    sizes[id.index()] = Self::scale_obstacle(info);
                }
            }
        }
        Self { sizes }
    }

    /// Shrink by the fixed divisor, preserving aspect ratio
    pub fn scale_obstacle(info: ImageInfo) -> IVec2 {
        let width = info.width / SPRITE_SCALE_DIVISOR;
        let height = (info.height as f64 * (width as f64 / info.width as f64)) as i32;
        IVec2::new(width, height)
    }

    pub fn size(&self, id: SpriteId) -> IVec2 {
        self.sizes[id.index()]
    }
}
