//! Locating the module sprite files on disk.
//!
//! Each style has a short list of candidate file names. The first one that
//! exists and decodes wins. When only one style has a sprite, the other
//! style borrows it with its palette color as tint.

use bevy::prelude::*;
use std::path::{Path, PathBuf};

use crate::constants::{MANUFACTURED_SPRITE_CANDIDATES, PREFAB_SPRITE_CANDIDATES};
use crate::habitat::ModuleStyle;
use crate::theme;

/// Outcome of searching for one sprite file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpriteLookup {
    Found(PathBuf),
    Missing,
}

/// How a module style should be drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum SpriteSource {
    /// The style's own sprite
    File(PathBuf),
    /// Another style's sprite, recolored
    Tinted { path: PathBuf, tint: Color },
    /// No usable sprite, draw a flat colored hexagon
    Flat,
}

impl SpriteSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            SpriteSource::File(path) | SpriteSource::Tinted { path, .. } => Some(path),
            SpriteSource::Flat => None,
        }
    }

    /// Color the sprite is multiplied with when drawn.
    pub fn tint(&self) -> Color {
        match self {
            SpriteSource::Tinted { tint, .. } => *tint,
            _ => Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleSprites {
    pub prefabricated: SpriteSource,
    pub manufactured: SpriteSource,
}

impl StyleSprites {
    pub fn source(&self, style: ModuleStyle) -> &SpriteSource {
        match style {
            ModuleStyle::Prefabricated => &self.prefabricated,
            ModuleStyle::Manufactured => &self.manufactured,
        }
    }
}

fn candidates(style: ModuleStyle) -> &'static [&'static str] {
    match style {
        ModuleStyle::Prefabricated => &PREFAB_SPRITE_CANDIDATES,
        ModuleStyle::Manufactured => &MANUFACTURED_SPRITE_CANDIDATES,
    }
}

/// Search `dirs` in order for the first candidate that exists and decodes.
pub fn find_sprite(candidates: &[&str], dirs: &[PathBuf]) -> SpriteLookup {
    for dir in dirs {
        for name in candidates {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }
            match image::image_dimensions(&path) {
                Ok((w, h)) => {
                    debug!("Found sprite {:?} ({}x{})", path, w, h);
                    return SpriteLookup::Found(path);
                }
                Err(e) => warn!("Ignoring unreadable sprite {:?}: {}", path, e),
            }
        }
    }
    SpriteLookup::Missing
}

/// Resolve how each module style is drawn, borrowing a sprite across styles
/// when only one of them is present.
pub fn resolve_style_sprites(dirs: &[PathBuf]) -> StyleSprites {
    let prefab = find_sprite(candidates(ModuleStyle::Prefabricated), dirs);
    let manufactured = find_sprite(candidates(ModuleStyle::Manufactured), dirs);

    let borrow = |lookup: &SpriteLookup, style: ModuleStyle| match lookup {
        SpriteLookup::Found(path) => SpriteSource::Tinted {
            path: path.clone(),
            tint: theme::style_color(style),
        },
        SpriteLookup::Missing => SpriteSource::Flat,
    };

    let sprites = match (&prefab, &manufactured) {
        (SpriteLookup::Found(a), SpriteLookup::Found(b)) => StyleSprites {
            prefabricated: SpriteSource::File(a.clone()),
            manufactured: SpriteSource::File(b.clone()),
        },
        (SpriteLookup::Found(a), SpriteLookup::Missing) => StyleSprites {
            prefabricated: SpriteSource::File(a.clone()),
            manufactured: borrow(&prefab, ModuleStyle::Manufactured),
        },
        (SpriteLookup::Missing, SpriteLookup::Found(b)) => StyleSprites {
            prefabricated: borrow(&manufactured, ModuleStyle::Prefabricated),
            manufactured: SpriteSource::File(b.clone()),
        },
        (SpriteLookup::Missing, SpriteLookup::Missing) => StyleSprites {
            prefabricated: SpriteSource::Flat,
            manufactured: SpriteSource::Flat,
        },
    };

    for style in ModuleStyle::all() {
        match sprites.source(*style) {
            SpriteSource::Flat => warn!(
                "No sprite for {} modules, drawing flat hexagons",
                style.display_name()
            ),
            SpriteSource::Tinted { path, .. } => info!(
                "{} modules reuse {:?} with a tint",
                style.display_name(),
                path
            ),
            SpriteSource::File(path) => info!("{} sprite: {:?}", style.display_name(), path),
        }
    }

    sprites
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "hexhabitat_sprites_{}_{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_png(path: &Path) {
        image::RgbaImage::new(4, 4).save(path).unwrap();
    }

    #[test]
    fn test_both_sprites_found() {
        let dir = temp_dir("both");
        write_png(&dir.join("Modulo.png"));
        write_png(&dir.join("ModuloB.png"));

        let sprites = resolve_style_sprites(std::slice::from_ref(&dir));
        assert_eq!(sprites.prefabricated, SpriteSource::File(dir.join("Modulo.png")));
        assert_eq!(sprites.manufactured, SpriteSource::File(dir.join("ModuloB.png")));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_style_borrows_tinted() {
        let dir = temp_dir("borrow");
        write_png(&dir.join("Modulo.png"));

        let sprites = resolve_style_sprites(std::slice::from_ref(&dir));
        assert_eq!(sprites.prefabricated.tint(), Color::WHITE);
        match &sprites.manufactured {
            SpriteSource::Tinted { path, tint } => {
                assert_eq!(path, &dir.join("Modulo.png"));
                assert_eq!(*tint, theme::MANUFACTURED);
            }
            other => panic!("expected tinted sprite, got {:?}", other),
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_no_sprites_is_flat() {
        let dir = temp_dir("none");
        let sprites = resolve_style_sprites(std::slice::from_ref(&dir));
        assert_eq!(sprites.prefabricated, SpriteSource::Flat);
        assert_eq!(sprites.manufactured, SpriteSource::Flat);
        assert!(sprites.prefabricated.path().is_none());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_undecodable_file_counts_as_missing() {
        let dir = temp_dir("garbage");
        std::fs::write(dir.join("Modulo.png"), b"definitely not a png").unwrap();
        assert_eq!(
            find_sprite(&PREFAB_SPRITE_CANDIDATES, std::slice::from_ref(&dir)),
            SpriteLookup::Missing
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_earlier_directory_wins() {
        let first = temp_dir("first");
        let second = temp_dir("second");
        write_png(&first.join("Modulo.png"));
        write_png(&second.join("Modulo.png"));

        assert_eq!(
            find_sprite(&PREFAB_SPRITE_CANDIDATES, &[first.clone(), second.clone()]),
            SpriteLookup::Found(first.join("Modulo.png"))
        );

        std::fs::remove_dir_all(&first).ok();
        std::fs::remove_dir_all(&second).ok();
    }
}
