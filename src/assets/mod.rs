mod sprites;
pub use sprites::resolve_style_sprites;

use bevy::asset::LoadState;
use bevy::prelude::*;
use std::path::PathBuf;

use crate::habitat::ModuleStyle;

/// A loaded module sprite and the color it is drawn with.
#[derive(Debug, Clone)]
pub struct StyleSprite {
    pub image: Handle<Image>,
    pub color: Color,
}

/// Sprite handles per module style. `None` means draw a flat hexagon.
#[derive(Resource, Default)]
pub struct ModuleSprites {
    styles: [Option<StyleSprite>; 2],
}

impl ModuleSprites {
    pub fn get(&self, style: ModuleStyle) -> Option<&StyleSprite> {
        self.styles[style.index() as usize].as_ref()
    }

    fn set(&mut self, style: ModuleStyle, sprite: Option<StyleSprite>) {
        self.styles[style.index() as usize] = sprite;
    }
}

/// Directories searched for sprites, in priority order
fn sprite_search_dirs() -> Vec<PathBuf> {
    vec![crate::paths::sprites_dir(), PathBuf::from(".")]
}

/// Startup system resolving sprite files and handing them to the asset server
fn load_module_sprites(mut sprites: ResMut<ModuleSprites>, asset_server: Res<AssetServer>) {
    let resolved = resolve_style_sprites(&sprite_search_dirs());

    for style in ModuleStyle::all() {
        let source = resolved.source(*style);
        let sprite = source.path().map(|path| {
            // Absolute so the asset server does not resolve it under its own root
            let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
            StyleSprite {
                image: asset_server.load(path),
                color: source.tint(),
            }
        });
        sprites.set(*style, sprite);
    }
}

/// Downgrades a style to flat rendering when its sprite fails to load.
fn detect_failed_sprites(mut sprites: ResMut<ModuleSprites>, asset_server: Res<AssetServer>) {
    for style in ModuleStyle::all() {
        let Some(sprite) = sprites.get(*style) else {
            continue;
        };
        if let LoadState::Failed(err) = asset_server.load_state(&sprite.image) {
            warn!(
                "Sprite for {} modules failed to load ({}), drawing flat hexagons",
                style.display_name(),
                err
            );
            sprites.set(*style, None);
        }
    }
}

pub struct ModuleSpritesPlugin;

impl Plugin for ModuleSpritesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModuleSprites>()
            .add_systems(Startup, load_module_sprites)
            .add_systems(Update, detect_failed_sprites);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_sprites_default_is_flat() {
        let sprites = ModuleSprites::default();
        for style in ModuleStyle::all() {
            assert!(sprites.get(*style).is_none());
        }
    }

    #[test]
    fn test_module_sprites_set_per_style() {
        let mut sprites = ModuleSprites::default();
        sprites.set(
            ModuleStyle::Manufactured,
            Some(StyleSprite {
                image: Handle::default(),
                color: Color::WHITE,
            }),
        );
        assert!(sprites.get(ModuleStyle::Prefabricated).is_none());
        assert!(sprites.get(ModuleStyle::Manufactured).is_some());
        sprites.set(ModuleStyle::Manufactured, None);
        assert!(sprites.get(ModuleStyle::Manufactured).is_none());
    }
}
