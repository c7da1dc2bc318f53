use crate::icon::{BuiltinIcon, IconName};
use crate::menu::{Control, ControlType, MenuDefinition, ParameterName, SubParameter};
use crate::navigation::NavigationStack;
use std::sync::Arc;
use strum::Display as StrumDisplay;

pub const BACK_LABEL: &str = "Back";
pub const QUICK_ACTIONS_LABEL: &str = "Quick Actions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
pub enum ItemKind {
    Toggle,
    Button,
    RadialPuppet,
    SubMenu,
    Back,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemIcon {
    Builtin(BuiltinIcon),
    Asset(IconName),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub name: String,
    pub icon: Option<ItemIcon>,
    pub submenu: Option<Arc<MenuDefinition>>,
    pub parameter: ParameterName,
    pub trigger_value: f32,
    pub sub_parameters: Vec<SubParameter>,
    pub kind: ItemKind,
}

impl MenuItem {
    fn synthetic(name: &str, icon: BuiltinIcon, kind: ItemKind) -> Self {
        Self {
            name: name.to_string(),
            icon: Some(ItemIcon::Builtin(icon)),
            submenu: None,
            parameter: ParameterName::default(),
            trigger_value: 0.0,
            sub_parameters: Vec::new(),
            kind,
        }
    }

    /// At the root, Back means "home" and gets its own icon.
    pub fn back(at_root: bool) -> Self {
        let icon = if at_root {
            BuiltinIcon::BackHome
        } else {
            BuiltinIcon::Back
        };
        Self::synthetic(BACK_LABEL, icon, ItemKind::Back)
    }

    pub fn quick_actions() -> Self {
        Self::synthetic(QUICK_ACTIONS_LABEL, BuiltinIcon::QuickActions, ItemKind::Other)
    }

    pub fn from_control(control: &Control) -> Self {
        Self {
            name: control.name.clone(),
            icon: control.icon.clone().map(ItemIcon::Asset),
            submenu: control.sub_menu.clone(),
            parameter: control.parameter.clone(),
            trigger_value: control.value,
            sub_parameters: control.sub_parameters.clone(),
            kind: classify(control.control_type),
        }
    }
}

pub fn classify(control_type: ControlType) -> ItemKind {
    match control_type {
        ControlType::Toggle => ItemKind::Toggle,
        ControlType::SubMenu => ItemKind::SubMenu,
        ControlType::Button => ItemKind::Button,
        ControlType::RadialPuppet => ItemKind::RadialPuppet,
        ControlType::TwoAxisPuppet | ControlType::FourAxisPuppet => ItemKind::Other,
    }
}

/// Items for the level on top of `stack`, or for `root` when the stack is
/// empty, with the synthetic navigation entries first.
pub fn build_item_list(stack: &NavigationStack, root: &MenuDefinition) -> Vec<MenuItem> {
    let (synthetic, menu) = match stack.top() {
        None => (vec![MenuItem::back(true), MenuItem::quick_actions()], root),
        Some(top) => (vec![MenuItem::back(false)], top.as_ref()),
    };

    synthetic
        .into_iter()
        .chain(menu.controls.iter().map(MenuItem::from_control))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[MenuItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    fn scenario() -> (MenuDefinition, Arc<MenuDefinition>) {
        let expr = Arc::new(MenuDefinition::new(vec![
            Control::new("Wave", ControlType::Toggle).with_parameter("wave", 1.0),
        ]));
        let root = MenuDefinition::new(vec![
            Control::new("Light", ControlType::Toggle).with_parameter("light", 1.0),
            Control::new("Expr", ControlType::SubMenu).with_sub_menu(expr.clone()),
        ]);
        (root, expr)
    }

    #[test]
    fn test_root_level_items() {
        let (root, _) = scenario();
        let items = build_item_list(&NavigationStack::default(), &root);

        assert_eq!(names(&items), vec!["Back", "Quick Actions", "Light", "Expr"]);
        assert_eq!(items[0].kind, ItemKind::Back);
        assert_eq!(items[0].icon, Some(ItemIcon::Builtin(BuiltinIcon::BackHome)));
        assert_eq!(items[1].kind, ItemKind::Other);
        assert_eq!(items[2].kind, ItemKind::Toggle);
        assert_eq!(items[2].parameter.as_str(), "light");
        assert_eq!(items[2].trigger_value, 1.0);
        assert_eq!(items[3].kind, ItemKind::SubMenu);
    }

    #[test]
    fn test_nested_level_items() {
        let (root, expr) = scenario();
        let mut stack = NavigationStack::default();
        stack.push(expr);

        let items = build_item_list(&stack, &root);
        assert_eq!(names(&items), vec!["Back", "Wave"]);
        assert_eq!(items[0].icon, Some(ItemIcon::Builtin(BuiltinIcon::Back)));
    }

    #[test]
    fn test_empty_submenu_still_has_back() {
        let (root, _) = scenario();
        let mut stack = NavigationStack::default();
        stack.push(Arc::new(MenuDefinition::default()));

        let items = build_item_list(&stack, &root);
        assert_eq!(names(&items), vec!["Back"]);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(ControlType::Toggle), ItemKind::Toggle);
        assert_eq!(classify(ControlType::Button), ItemKind::Button);
        assert_eq!(classify(ControlType::SubMenu), ItemKind::SubMenu);
        assert_eq!(classify(ControlType::RadialPuppet), ItemKind::RadialPuppet);
        assert_eq!(classify(ControlType::TwoAxisPuppet), ItemKind::Other);
        assert_eq!(classify(ControlType::FourAxisPuppet), ItemKind::Other);
    }

    #[test]
    fn test_control_icon_carried() {
        let control = Control::new("Hat", ControlType::Button).with_icon("hat.png");
        let item = MenuItem::from_control(&control);
        assert_eq!(item.icon, Some(ItemIcon::Asset(IconName::new("hat.png"))));
        assert_eq!(MenuItem::from_control(&Control::new("Bare", ControlType::Button)).icon, None);
    }
}
