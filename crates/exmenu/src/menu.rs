use crate::icon::IconName;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::borrow::Borrow;
use std::sync::Arc;
use strum::{Display as StrumDisplay, EnumString};

#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct ParameterName(String);

crate::impl_string_newtype!(ParameterName);

impl From<&str> for ParameterName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Borrow<str> for ParameterName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum ControlType {
    Button,
    Toggle,
    #[strum(serialize = "SubMenu", serialize = "sub_menu", serialize = "menu")]
    SubMenu,
    #[strum(serialize = "TwoAxisPuppet", serialize = "two_axis")]
    TwoAxisPuppet,
    #[strum(serialize = "FourAxisPuppet", serialize = "four_axis")]
    FourAxisPuppet,
    #[strum(serialize = "RadialPuppet", serialize = "radial")]
    RadialPuppet,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubParameter {
    pub name: ParameterName,
    #[serde(default)]
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Control {
    pub name: String,
    #[serde(default)]
    pub icon: Option<IconName>,
    #[serde(rename = "type")]
    pub control_type: ControlType,
    /// Empty when the control drives nothing directly (submenus, puppets).
    #[serde(default)]
    pub parameter: ParameterName,
    #[serde(default)]
    pub value: f32,
    #[serde(default)]
    pub sub_menu: Option<Arc<MenuDefinition>>,
    #[serde(default)]
    pub sub_parameters: Vec<SubParameter>,
}

impl Control {
    pub fn new(name: impl Into<String>, control_type: ControlType) -> Self {
        Self {
            name: name.into(),
            icon: None,
            control_type,
            parameter: ParameterName::default(),
            value: 0.0,
            sub_menu: None,
            sub_parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: impl Into<ParameterName>, value: f32) -> Self {
        self.parameter = parameter.into();
        self.value = value;
        self
    }

    pub fn with_sub_menu(mut self, menu: Arc<MenuDefinition>) -> Self {
        self.sub_menu = Some(menu);
        self
    }

    pub fn with_sub_parameter(mut self, name: impl Into<ParameterName>) -> Self {
        self.sub_parameters.push(SubParameter {
            name: name.into(),
            value: 0.0,
        });
        self
    }

    pub fn with_icon(mut self, icon: impl Into<IconName>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MenuDefinition {
    #[serde(default)]
    pub controls: Vec<Control>,
}

impl MenuDefinition {
    pub fn new(controls: Vec<Control>) -> Self {
        Self { controls }
    }

    /// Depth-first walk over every control, paired with its nesting depth.
    pub fn walk(&self) -> Vec<(usize, &Control)> {
        let mut out = Vec::new();
        self.walk_into(0, &mut out);
        out
    }

    fn walk_into<'a>(&'a self, depth: usize, out: &mut Vec<(usize, &'a Control)>) {
        for control in &self.controls {
            out.push((depth, control));
            if let Some(sub) = &control.sub_menu {
                sub.walk_into(depth + 1, out);
            }
        }
    }
}
