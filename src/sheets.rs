//! Sprite sheets stored as files on disk.

use std::path::{Path, PathBuf};

use anyhow::Context;
use gfx::{SheetCache, SpriteSheet};

/// Load sheet `name` from `<dir>/<name>.png` and the frame table in
/// `<dir>/<name>.idm`.
pub fn load(dir: &Path, name: &str) -> anyhow::Result<SpriteSheet> {
    let png_path = dir.join(format!("{name}.png"));
    let png = std::fs::read(&png_path)
        .with_context(|| format!("failed to read {}", png_path.display()))?;

    let table_path = dir.join(format!("{name}.idm"));
    let table = std::fs::read_to_string(&table_path)
        .with_context(|| format!("failed to read {}", table_path.display()))?;

    SpriteSheet::load(&png, &table)
        .with_context(|| format!("bad sprite sheet {name:?}"))
}

/// Sheet cache that reads sheets from a directory.
pub fn cache(dir: PathBuf) -> SheetCache {
    SheetCache::new(move |name| load(&dir, name))
}
