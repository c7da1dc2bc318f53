use crate::item::ItemKind;
use derive_more::{AsRef, Deref, Display, From, Into};
use freedesktop_icons::lookup;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use strum::{EnumIter, IntoEnumIterator};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconName(String);

crate::impl_string_newtype!(IconName);

impl From<&str> for IconName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Icons shipped with the previewer rather than authored on the avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum BuiltinIcon {
    SubMenu,
    QuickActions,
    Back,
    BackHome,
    Play,
    Radial,
    ToggleActive,
    NoIcon,
}

impl BuiltinIcon {
    /// Stable identifier, also the file stem under an icon directory.
    pub fn id(self) -> &'static str {
        match self {
            Self::SubMenu => "sub_menu",
            Self::QuickActions => "quick_actions",
            Self::Back => "back",
            Self::BackHome => "back_home",
            Self::Play => "play",
            Self::Radial => "radial",
            Self::ToggleActive => "toggle_active",
            Self::NoIcon => "no_icon",
        }
    }

    fn theme_name(self) -> &'static str {
        match self {
            Self::SubMenu => "folder",
            Self::QuickActions => "view-more",
            Self::Back => "go-previous",
            Self::BackHome => "go-home",
            Self::Play => "media-playback-start",
            Self::Radial => "view-refresh",
            Self::ToggleActive => "object-select",
            Self::NoIcon => "image-missing",
        }
    }
}

const KIND_BADGES: &[(ItemKind, BuiltinIcon)] = &[
    (ItemKind::SubMenu, BuiltinIcon::SubMenu),
    (ItemKind::Toggle, BuiltinIcon::Play),
    (ItemKind::RadialPuppet, BuiltinIcon::Radial),
];

/// The small corner badge telling the user what kind of entry a sector is.
pub fn kind_badge(kind: ItemKind) -> Option<BuiltinIcon> {
    KIND_BADGES
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, icon)| *icon)
}

/// Builtin icons resolved once per session. Lookups for anything that failed to
/// load fall back to the `NoIcon` placeholder; if even that is missing the
/// caller draws nothing.
#[derive(Debug, Clone)]
pub struct IconSet<T> {
    icons: HashMap<BuiltinIcon, T>,
}

impl<T> IconSet<T> {
    pub fn resolve(mut loader: impl FnMut(BuiltinIcon) -> Option<T>) -> Self {
        let icons = BuiltinIcon::iter()
            .filter_map(|icon| match loader(icon) {
                Some(loaded) => Some((icon, loaded)),
                None => {
                    log::warn!("Builtin icon '{}' not found", icon.id());
                    None
                }
            })
            .collect();
        Self { icons }
    }

    pub fn get(&self, icon: BuiltinIcon) -> Option<&T> {
        self.icons
            .get(&icon)
            .or_else(|| self.icons.get(&BuiltinIcon::NoIcon))
    }

    pub fn placeholder(&self) -> Option<&T> {
        self.icons.get(&BuiltinIcon::NoIcon)
    }
}

pub fn find_icon_path(icon_name: &IconName) -> Option<PathBuf> {
    if icon_name.is_empty() {
        return None;
    }

    let path = Path::new(icon_name.as_str());
    if path.is_absolute() && path.exists() {
        return Some(path.to_path_buf());
    }

    lookup(icon_name.as_str())
        .with_size(128)
        .with_scale(1)
        .find()
}

/// Looks in `override_dir`, then the `exmenu/icons` xdg data directory, then the
/// current icon theme.
pub fn find_builtin_icon(icon: BuiltinIcon, override_dir: Option<&Path>) -> Option<PathBuf> {
    let file = format!("{}.png", icon.id());

    override_dir
        .map(|dir| dir.join(&file))
        .filter(|p| p.exists())
        .or_else(|| {
            xdg::BaseDirectories::with_prefix("exmenu").find_data_file(Path::new("icons").join(&file))
        })
        .or_else(|| find_icon_path(&IconName::new(icon.theme_name())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_badges() {
        assert_eq!(kind_badge(ItemKind::SubMenu), Some(BuiltinIcon::SubMenu));
        assert_eq!(kind_badge(ItemKind::Toggle), Some(BuiltinIcon::Play));
        assert_eq!(kind_badge(ItemKind::RadialPuppet), Some(BuiltinIcon::Radial));
        assert_eq!(kind_badge(ItemKind::Button), None);
        assert_eq!(kind_badge(ItemKind::Back), None);
        assert_eq!(kind_badge(ItemKind::Other), None);
    }

    #[test]
    fn test_missing_icons_fall_back_to_placeholder() {
        let set = IconSet::resolve(|icon| match icon {
            BuiltinIcon::Back | BuiltinIcon::NoIcon => Some(icon.id()),
            _ => None,
        });

        assert_eq!(set.get(BuiltinIcon::Back), Some(&"back"));
        assert_eq!(set.get(BuiltinIcon::Radial), Some(&"no_icon"));
    }

    #[test]
    fn test_missing_placeholder_yields_nothing() {
        let set: IconSet<&str> = IconSet::resolve(|_| None);
        assert_eq!(set.get(BuiltinIcon::Play), None);
        assert_eq!(set.placeholder(), None);
    }

    #[test]
    fn test_override_dir_wins() {
        let dir = std::env::temp_dir().join("exmenu-icon-override-test");
        fs_err::create_dir_all(&dir).unwrap();
        let file = dir.join("radial.png");
        fs_err::write(&file, b"png").unwrap();

        assert_eq!(find_builtin_icon(BuiltinIcon::Radial, Some(&dir)), Some(file));
    }

    #[test]
    fn test_empty_icon_name() {
        assert_eq!(find_icon_path(&IconName::new("")), None);
    }
}
