use crate::avatar::AvatarDescriptor;
use crate::geometry::Point;
use crate::item::{ItemKind, MenuItem, build_item_list};
use crate::navigation::{NavigationStack, RadialPuppetSession};
use crate::params::ParameterStore;
use crate::render::{Canvas, DiscLayout, Frame, render};
use crate::sync::{apply_activation, set_defaults};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Activation {
    pub should_redraw: bool,
    /// Back was pressed with nothing left to pop.
    pub home_requested: bool,
}

impl Activation {
    fn redraw() -> Self {
        Self {
            should_redraw: true,
            home_requested: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PreviewSession {
    stack: NavigationStack,
    puppet: Option<RadialPuppetSession>,
    pointer: Option<Point>,
    preview_enabled: bool,
}

impl PreviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    pub fn puppet(&self) -> Option<&RadialPuppetSession> {
        self.puppet.as_ref()
    }

    pub fn is_preview_enabled(&self) -> bool {
        self.preview_enabled
    }

    pub fn items(&self, avatar: &AvatarDescriptor) -> Vec<MenuItem> {
        build_item_list(&self.stack, &avatar.menu)
    }

    pub fn frame(&self, avatar: &AvatarDescriptor) -> Frame {
        Frame::new(self.items(avatar))
    }

    /// Turning preview on writes the parameter defaults. Turning it off drops
    /// all navigation and puppet state.
    pub fn set_preview<S: ParameterStore + ?Sized>(
        &mut self,
        enabled: bool,
        avatar: &AvatarDescriptor,
        store: &mut S,
    ) {
        self.preview_enabled = enabled;
        if enabled {
            set_defaults(&avatar.parameters, store);
        } else {
            self.reset();
        }
        log::info!("Preview {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn reset(&mut self) {
        self.stack.clear();
        self.puppet = None;
        self.pointer = None;
    }

    pub fn on_item_activated<S: ParameterStore + ?Sized>(
        &mut self,
        item: &MenuItem,
        avatar: &AvatarDescriptor,
        store: &mut S,
    ) -> Activation {
        let puppet_closed = item.kind != ItemKind::RadialPuppet && self.puppet.take().is_some();

        let activation = match item.kind {
            ItemKind::SubMenu => match &item.submenu {
                Some(menu) => {
                    self.stack.push(menu.clone());
                    Activation::redraw()
                }
                None => {
                    log::warn!("Submenu '{}' has no menu assigned", item.name);
                    Activation::default()
                }
            },
            ItemKind::Back => Activation {
                should_redraw: true,
                home_requested: self.stack.pop().is_none(),
            },
            ItemKind::Toggle | ItemKind::Button => {
                match avatar.parameter(item.parameter.as_str()) {
                    Some(parameter) => {
                        apply_activation(parameter, item, store);
                        Activation::redraw()
                    }
                    None => {
                        log::debug!("'{}' drives no known parameter", item.name);
                        Activation::default()
                    }
                }
            }
            ItemKind::RadialPuppet => self.toggle_puppet(item, store),
            ItemKind::Other => Activation::default(),
        };

        Activation {
            should_redraw: activation.should_redraw || puppet_closed,
            ..activation
        }
    }

    fn toggle_puppet<S: ParameterStore + ?Sized>(
        &mut self,
        item: &MenuItem,
        store: &S,
    ) -> Activation {
        if self.puppet.take().is_some() {
            return Activation::redraw();
        }

        let Some(first) = item.sub_parameters.first() else {
            log::warn!("Radial puppet '{}' has no sub-parameter", item.name);
            return Activation::default();
        };

        let value = store.get_float(first.name.as_str()).unwrap_or_else(|| {
            log::debug!("Puppet parameter '{}' has no float value", first.name);
            0.0
        });
        self.puppet = Some(RadialPuppetSession {
            parameter: first.name.clone(),
            value,
        });
        Activation::redraw()
    }

    pub fn activate_index<S: ParameterStore + ?Sized>(
        &mut self,
        index: usize,
        avatar: &AvatarDescriptor,
        store: &mut S,
    ) -> Activation {
        match self.items(avatar).get(index) {
            Some(item) => self.on_item_activated(item, avatar, store),
            None => Activation::default(),
        }
    }

    /// A press at `point`; activates the sector under it, if any.
    pub fn press<S: ParameterStore + ?Sized>(
        &mut self,
        point: Point,
        layout: &DiscLayout,
        avatar: &AvatarDescriptor,
        store: &mut S,
    ) -> Activation {
        if !self.preview_enabled {
            return Activation::default();
        }
        self.pointer = Some(point);

        let frame = self.frame(avatar);
        match frame.hit(layout, point) {
            Some(index) => self.on_item_activated(&frame.items[index], avatar, store),
            None => Activation::default(),
        }
    }

    /// Moves the pointer. Returns whether the highlighted sector changed.
    pub fn hover(
        &mut self,
        pointer: Option<Point>,
        layout: &DiscLayout,
        avatar: &AvatarDescriptor,
    ) -> bool {
        let before = self.hovered(layout, avatar);
        self.pointer = pointer;
        before != self.hovered(layout, avatar)
    }

    pub fn hovered(&self, layout: &DiscLayout, avatar: &AvatarDescriptor) -> Option<usize> {
        let pointer = self.pointer.filter(|_| self.preview_enabled)?;
        self.frame(avatar).hit(layout, pointer)
    }

    /// Pushes a puppet value straight to the store. Returns false when no
    /// puppet is engaged.
    pub fn set_puppet_value<S: ParameterStore + ?Sized>(&mut self, value: f32, store: &mut S) -> bool {
        let Some(puppet) = self.puppet.as_mut() else {
            return false;
        };
        puppet.value = value.clamp(0.0, 1.0);
        store.set_float(puppet.parameter.as_str(), puppet.value);
        true
    }

    pub fn render<C: Canvas, S: ParameterStore + ?Sized>(
        &self,
        layout: &DiscLayout,
        avatar: &AvatarDescriptor,
        store: &S,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        if !self.preview_enabled {
            return Ok(());
        }
        let frame = self.frame(avatar);
        let hovered = self.pointer.and_then(|p| frame.hit(layout, p));
        render(&frame, layout, hovered, avatar, store, canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avatar::{ExpressionParameter, ValueKind};
    use crate::geometry::direction;
    use crate::menu::{Control, ControlType, MenuDefinition};
    use crate::params::{InMemoryStore, ParameterValue};
    use crate::render::tests::Recorder;
    use std::sync::Arc;

    fn scenario() -> AvatarDescriptor {
        let expr = Arc::new(MenuDefinition::new(vec![
            Control::new("Wave", ControlType::Toggle).with_parameter("wave", 1.0),
        ]));
        AvatarDescriptor::new(
            vec![
                ExpressionParameter::new("light", ValueKind::Int, 0.0),
                ExpressionParameter::new("wave", ValueKind::Bool, 0.0),
                ExpressionParameter::new("hue", ValueKind::Float, 0.4),
            ],
            MenuDefinition::new(vec![
                Control::new("Light", ControlType::Toggle).with_parameter("light", 1.0),
                Control::new("Expr", ControlType::SubMenu).with_sub_menu(expr),
                Control::new("Hue", ControlType::RadialPuppet).with_sub_parameter("hue"),
                Control::new("Broken", ControlType::RadialPuppet),
            ]),
        )
    }

    fn started(avatar: &AvatarDescriptor) -> (PreviewSession, InMemoryStore) {
        let mut store = InMemoryStore::from_descriptor(avatar);
        let mut session = PreviewSession::new();
        session.set_preview(true, avatar, &mut store);
        (session, store)
    }

    fn click(
        session: &mut PreviewSession,
        name: &str,
        avatar: &AvatarDescriptor,
        store: &mut InMemoryStore,
    ) -> Activation {
        let index = session
            .items(avatar)
            .iter()
            .position(|i| i.name == name)
            .unwrap();
        session.activate_index(index, avatar, store)
    }

    fn names(session: &PreviewSession, avatar: &AvatarDescriptor) -> Vec<String> {
        session.items(avatar).into_iter().map(|i| i.name).collect()
    }

    #[test]
    fn test_light_and_expression_walkthrough() {
        let avatar = scenario();
        let (mut session, mut store) = started(&avatar);

        click(&mut session, "Light", &avatar, &mut store);
        assert_eq!(store.get_int("light"), Some(1));
        click(&mut session, "Light", &avatar, &mut store);
        assert_eq!(store.get_int("light"), Some(0));

        let activation = click(&mut session, "Expr", &avatar, &mut store);
        assert!(activation.should_redraw);
        assert_eq!(names(&session, &avatar), vec!["Back", "Wave"]);

        click(&mut session, "Wave", &avatar, &mut store);
        assert_eq!(store.get_bool("wave"), Some(true));

        let activation = click(&mut session, "Back", &avatar, &mut store);
        assert!(activation.should_redraw);
        assert!(!activation.home_requested);
        assert_eq!(
            names(&session, &avatar),
            vec!["Back", "Quick Actions", "Light", "Expr", "Hue", "Broken"]
        );
    }

    #[test]
    fn test_back_restores_identical_root_list() {
        let avatar = scenario();
        let (mut session, mut store) = started(&avatar);
        let before = session.items(&avatar);

        click(&mut session, "Expr", &avatar, &mut store);
        click(&mut session, "Back", &avatar, &mut store);

        let after = session.items(&avatar);
        assert_eq!(before, after);
        assert!(Arc::ptr_eq(
            before[3].submenu.as_ref().unwrap(),
            after[3].submenu.as_ref().unwrap()
        ));
        assert!(session.stack().is_root());
    }

    #[test]
    fn test_back_at_root_requests_home() {
        let avatar = scenario();
        let (mut session, mut store) = started(&avatar);

        let activation = click(&mut session, "Back", &avatar, &mut store);
        assert!(activation.home_requested);
        assert!(session.stack().is_root());
    }

    #[test]
    fn test_quick_actions_is_inert() {
        let avatar = scenario();
        let (mut session, mut store) = started(&avatar);
        let before: Vec<_> = store.iter().map(|(k, v)| (k.clone(), *v)).collect();

        let activation = click(&mut session, "Quick Actions", &avatar, &mut store);
        assert_eq!(activation, Activation::default());
        let after: Vec<_> = store.iter().map(|(k, v)| (k.clone(), *v)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_radial_puppet_engage_and_release() {
        let avatar = scenario();
        let (mut session, mut store) = started(&avatar);
        store.set_float("hue", 0.7);

        click(&mut session, "Hue", &avatar, &mut store);
        let puppet = session.puppet().unwrap();
        assert_eq!(puppet.parameter.as_str(), "hue");
        assert_eq!(puppet.value, 0.7);

        click(&mut session, "Hue", &avatar, &mut store);
        assert!(session.puppet().is_none());
        assert_eq!(store.get_float("hue"), Some(0.7));
    }

    #[test]
    fn test_puppet_values_are_pushed_live() {
        let avatar = scenario();
        let (mut session, mut store) = started(&avatar);
        assert!(!session.set_puppet_value(0.5, &mut store));

        click(&mut session, "Hue", &avatar, &mut store);
        assert!(session.set_puppet_value(0.2, &mut store));
        assert_eq!(store.get_float("hue"), Some(0.2));
        assert!(session.set_puppet_value(1.5, &mut store));
        assert_eq!(store.get_float("hue"), Some(1.0));
    }

    #[test]
    fn test_other_items_close_puppet() {
        let avatar = scenario();
        let (mut session, mut store) = started(&avatar);

        click(&mut session, "Hue", &avatar, &mut store);
        let activation = click(&mut session, "Quick Actions", &avatar, &mut store);
        assert!(session.puppet().is_none());
        assert!(activation.should_redraw);
    }

    #[test]
    fn test_puppet_without_sub_parameter() {
        let avatar = scenario();
        let (mut session, mut store) = started(&avatar);

        let activation = click(&mut session, "Broken", &avatar, &mut store);
        assert!(session.puppet().is_none());
        assert!(!activation.should_redraw);
    }

    #[test]
    fn test_disabling_preview_resets_state() {
        let avatar = scenario();
        let (mut session, mut store) = started(&avatar);
        click(&mut session, "Hue", &avatar, &mut store);
        click(&mut session, "Expr", &avatar, &mut store);
        assert_eq!(session.stack().depth(), 1);

        session.set_preview(false, &avatar, &mut store);
        assert!(session.stack().is_root());
        assert!(session.puppet().is_none());
        assert!(!session.is_preview_enabled());
    }

    #[test]
    fn test_enabling_preview_writes_defaults() {
        let avatar = scenario();
        let mut store = InMemoryStore::from_descriptor(&avatar);
        store.set_int("light", 7);

        PreviewSession::new().set_preview(true, &avatar, &mut store);
        assert_eq!(store.get("light"), Some(ParameterValue::Int(0)));
    }

    #[test]
    fn test_press_hits_sector_under_pointer() {
        let avatar = scenario();
        let (mut session, mut store) = started(&avatar);
        let layout = DiscLayout::square(Point::default(), 400.0);
        let frame = session.frame(&avatar);
        let light = &frame.sectors[2];
        let point = layout.center + direction(light.bisector()) * (layout.radius / 2.0);

        session.press(point, &layout, &avatar, &mut store);
        assert_eq!(store.get_int("light"), Some(1));
        assert_eq!(session.hovered(&layout, &avatar), Some(2));
    }

    #[test]
    fn test_press_ignored_when_preview_off() {
        let avatar = scenario();
        let mut store = InMemoryStore::from_descriptor(&avatar);
        let mut session = PreviewSession::new();
        let layout = DiscLayout::square(Point::default(), 400.0);
        let frame = session.frame(&avatar);
        let point = layout.center + direction(frame.sectors[2].bisector()) * 100.0;

        assert_eq!(
            session.press(point, &layout, &avatar, &mut store),
            Activation::default()
        );
        assert_eq!(store.get_int("light"), Some(0));
    }

    #[test]
    fn test_hover_reports_changes() {
        let avatar = scenario();
        let (mut session, _) = started(&avatar);
        let layout = DiscLayout::square(Point::default(), 400.0);
        let frame = session.frame(&avatar);
        let at = |i: usize| layout.center + direction(frame.sectors[i].bisector()) * 100.0;

        assert!(session.hover(Some(at(1)), &layout, &avatar));
        assert!(!session.hover(Some(at(1)), &layout, &avatar));
        assert!(session.hover(Some(at(4)), &layout, &avatar));
        assert!(session.hover(None, &layout, &avatar));
        assert_eq!(session.hovered(&layout, &avatar), None);
    }

    #[test]
    fn test_render_skipped_when_preview_off() {
        let avatar = scenario();
        let store = InMemoryStore::from_descriptor(&avatar);
        let layout = DiscLayout::square(Point::default(), 400.0);
        let mut canvas = Recorder::default();

        PreviewSession::new()
            .render(&layout, &avatar, &store, &mut canvas)
            .unwrap();
        assert!(canvas.ops.is_empty());
    }
}
