use crate::avatar::{AvatarDescriptor, ValueKind};
use crate::menu::ParameterName;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterValue {
    Bool(bool),
    Int(i32),
    Float(f32),
}

impl ParameterValue {
    pub fn default_for(kind: &ValueKind, default_value: f32) -> Option<Self> {
        match kind {
            ValueKind::Bool => Some(Self::Bool(default_value == 1.0)),
            ValueKind::Int => Some(Self::Int(default_value.round() as i32)),
            ValueKind::Float => Some(Self::Float(default_value)),
            ValueKind::Unsupported(_) => None,
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
        }
    }
}

pub trait ParameterStore {
    fn get_bool(&self, name: &str) -> Option<bool>;
    fn get_int(&self, name: &str) -> Option<i32>;
    fn get_float(&self, name: &str) -> Option<f32>;
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_int(&mut self, name: &str, value: i32);
    fn set_float(&mut self, name: &str, value: f32);

    fn set(&mut self, name: &str, value: ParameterValue) {
        match value {
            ParameterValue::Bool(v) => self.set_bool(name, v),
            ParameterValue::Int(v) => self.set_int(name, v),
            ParameterValue::Float(v) => self.set_float(name, v),
        }
    }
}

/// Stand-in for the animator: a fixed set of declared, typed parameters.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    values: BTreeMap<ParameterName, ParameterValue>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares every parameter the descriptor knows how to type, at its default.
    pub fn from_descriptor(avatar: &AvatarDescriptor) -> Self {
        let mut store = Self::new();
        for parameter in &avatar.parameters {
            if let Some(value) =
                ParameterValue::default_for(&parameter.kind, parameter.default_value)
            {
                store.declare(parameter.name.clone(), value);
            }
        }
        store
    }

    pub fn declare(&mut self, name: impl Into<ParameterName>, value: ParameterValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<ParameterValue> {
        self.values.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParameterName, &ParameterValue)> {
        self.values.iter()
    }

    fn write(&mut self, name: &str, value: ParameterValue) {
        match self.values.get_mut(name) {
            Some(slot) if std::mem::discriminant(slot) == std::mem::discriminant(&value) => {
                *slot = value;
            }
            Some(slot) => log::warn!(
                "Parameter '{}' is {}, ignoring {} write",
                name,
                slot.kind_name(),
                value.kind_name()
            ),
            None => log::debug!("Parameter '{}' not declared, ignoring write", name),
        }
    }
}

impl ParameterStore for InMemoryStore {
    fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            ParameterValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    fn get_int(&self, name: &str) -> Option<i32> {
        match self.get(name)? {
            ParameterValue::Int(v) => Some(v),
            _ => None,
        }
    }

    fn get_float(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            ParameterValue::Float(v) => Some(v),
            _ => None,
        }
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.write(name, ParameterValue::Bool(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.write(name, ParameterValue::Int(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.write(name, ParameterValue::Float(value));
    }
}
