use super::IconCache;
use crate::config::Config;
use exmenu::geometry::Point;
use exmenu::navigation::RadialPuppetSession;
use exmenu::render::DiscLayout;
use exmenu::{Activation, AvatarDescriptor, InMemoryStore, PreviewSession};
use std::path::{Path, PathBuf};

/// Everything the window needs to draw and drive one avatar's menu.
pub struct Preview {
    pub avatar: AvatarDescriptor,
    pub avatar_path: Option<PathBuf>,
    pub store: InMemoryStore,
    pub session: PreviewSession,
    pub icons: IconCache,
    pub layout: DiscLayout,
    icon_dir: Option<PathBuf>,
    slider_echo: Option<f64>,
}

impl Preview {
    pub fn load(config: &Config) -> Self {
        let avatar = config
            .avatar
            .as_deref()
            .map(load_avatar)
            .unwrap_or_else(|| {
                log::warn!("No avatar configured, previewing an empty menu");
                AvatarDescriptor::default()
            });
        let icons = IconCache::load(
            &avatar,
            config.avatar.as_deref().and_then(Path::parent),
            config.icon_dir.as_deref(),
        );

        Self {
            store: InMemoryStore::from_descriptor(&avatar),
            avatar,
            avatar_path: config.avatar.clone(),
            session: PreviewSession::new(),
            icons,
            layout: DiscLayout::square(Point::default(), config.menu_size()),
            icon_dir: config.icon_dir.clone(),
            slider_echo: None,
        }
    }

    /// Re-reads the avatar file. Navigation restarts at the root; the preview
    /// stays enabled if it was.
    pub fn reload_avatar(&mut self) {
        let Some(path) = self.avatar_path.clone() else {
            return;
        };
        let enabled = self.session.is_preview_enabled();

        self.avatar = load_avatar(&path);
        self.store = InMemoryStore::from_descriptor(&self.avatar);
        self.icons = IconCache::load(&self.avatar, path.parent(), self.icon_dir.as_deref());
        self.session = PreviewSession::new();
        if enabled {
            self.session
                .set_preview(true, &self.avatar, &mut self.store);
        }
        log::info!("Avatar reloaded from {}", path.display());
    }

    /// Applies a changed config. The avatar is only re-read when its path
    /// moved, which is what the return value reports.
    pub fn apply_config(&mut self, config: &Config) -> bool {
        self.layout = DiscLayout::square(Point::default(), config.menu_size());

        let moved = config.avatar.is_some() && config.avatar != self.avatar_path;
        if moved {
            self.avatar_path = config.avatar.clone();
            self.icon_dir = config.icon_dir.clone();
            self.reload_avatar();
        } else if config.icon_dir != self.icon_dir {
            self.icon_dir = config.icon_dir.clone();
            self.icons = IconCache::load(
                &self.avatar,
                self.avatar_path.as_deref().and_then(Path::parent),
                self.icon_dir.as_deref(),
            );
        }
        moved
    }

    pub fn toggle_preview(&mut self) -> bool {
        let enabled = !self.session.is_preview_enabled();
        self.session.set_preview(enabled, &self.avatar, &mut self.store);
        enabled
    }

    pub fn press(&mut self, point: Point) -> Activation {
        self.session
            .press(point, &self.layout, &self.avatar, &mut self.store)
    }

    /// Presses the Back entry, which is always the first item.
    pub fn back(&mut self) -> Activation {
        if !self.session.is_preview_enabled() {
            return Activation::default();
        }
        self.session
            .activate_index(0, &self.avatar, &mut self.store)
    }

    pub fn hover(&mut self, pointer: Option<Point>) -> bool {
        self.session.hover(pointer, &self.layout, &self.avatar)
    }

    /// Records the value the slider was moved to programmatically, so its
    /// change notification is not written back as a user edit.
    pub fn expect_slider_echo(&mut self, value: f64) {
        self.slider_echo = Some(value);
    }

    pub fn set_puppet_value(&mut self, value: f64) -> bool {
        if self.slider_echo.take() == Some(value) {
            return false;
        }
        self.session.set_puppet_value(value as f32, &mut self.store)
    }

    pub fn puppet(&self) -> Option<&RadialPuppetSession> {
        self.session.puppet()
    }
}

fn load_avatar(path: &Path) -> AvatarDescriptor {
    match AvatarDescriptor::load(path) {
        Ok(avatar) => avatar,
        Err(e) => {
            log::error!("{}", e);
            AvatarDescriptor::default()
        }
    }
}
