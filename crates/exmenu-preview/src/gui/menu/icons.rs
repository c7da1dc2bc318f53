use super::ICON_SIZE;
use exmenu::AvatarDescriptor;
use exmenu::icon::{IconName, IconSet, find_builtin_icon, find_icon_path};
use exmenu::render::IconRef;
use gdk_pixbuf::Pixbuf;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Every icon the preview can draw, loaded once when an avatar is opened.
pub struct IconCache {
    builtins: IconSet<Pixbuf>,
    assets: HashMap<IconName, Pixbuf>,
}

impl IconCache {
    /// `base_dir` anchors relative control icon paths (usually the avatar
    /// file's directory).
    pub fn load(avatar: &AvatarDescriptor, base_dir: Option<&Path>, icon_dir: Option<&Path>) -> Self {
        let builtins =
            IconSet::resolve(|icon| find_builtin_icon(icon, icon_dir).and_then(|p| load_pixbuf(&p)));

        let mut assets = HashMap::new();
        for (_, control) in avatar.menu.walk() {
            let Some(name) = &control.icon else { continue };
            if assets.contains_key(name) {
                continue;
            }
            match resolve_asset(name, base_dir).and_then(|p| load_pixbuf(&p)) {
                Some(pixbuf) => {
                    assets.insert(name.clone(), pixbuf);
                }
                None => log::warn!("Icon '{}' for '{}' not found", name, control.name),
            }
        }

        Self { builtins, assets }
    }

    pub fn get(&self, icon: IconRef<'_>) -> Option<&Pixbuf> {
        match icon {
            IconRef::Builtin(builtin) => self.builtins.get(builtin),
            IconRef::Asset(name) => self
                .assets
                .get(name)
                .or_else(|| self.builtins.placeholder()),
        }
    }
}

fn resolve_asset(name: &IconName, base_dir: Option<&Path>) -> Option<PathBuf> {
    base_dir
        .map(|dir| dir.join(name.as_str()))
        .filter(|p| p.is_file())
        .or_else(|| find_icon_path(name))
}

fn load_pixbuf(path: &Path) -> Option<Pixbuf> {
    Pixbuf::from_file_at_scale(path, ICON_SIZE, ICON_SIZE, true)
        .map_err(|e| log::debug!("Failed to load {}: {}", path.display(), e))
        .ok()
}
