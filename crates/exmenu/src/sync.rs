use crate::avatar::{AvatarDescriptor, ExpressionParameter, ValueKind};
use crate::item::MenuItem;
use crate::params::{ParameterStore, ParameterValue};

fn as_bool(value: f32) -> bool {
    value == 1.0
}

fn as_int(value: f32) -> i32 {
    value.round() as i32
}

pub fn is_active<S: ParameterStore + ?Sized>(
    parameter: &ExpressionParameter,
    item: &MenuItem,
    store: &S,
) -> bool {
    let name = item.parameter.as_str();
    match parameter.kind {
        ValueKind::Bool => store
            .get_bool(name)
            .is_some_and(|v| v == as_bool(item.trigger_value)),
        ValueKind::Int => store
            .get_int(name)
            .is_some_and(|v| v == as_int(item.trigger_value)),
        ValueKind::Float => store.get_float(name).is_some_and(|v| v == item.trigger_value),
        ValueKind::Unsupported(_) => false,
    }
}

/// Looks up the parameter the item drives, then applies [`is_active`].
pub fn item_is_active<S: ParameterStore + ?Sized>(
    avatar: &AvatarDescriptor,
    item: &MenuItem,
    store: &S,
) -> bool {
    avatar
        .parameter(item.parameter.as_str())
        .is_some_and(|parameter| is_active(parameter, item, store))
}

/// Sets the trigger value, or restores the configured default when the
/// parameter already holds it.
pub fn apply_activation<S: ParameterStore + ?Sized>(
    parameter: &ExpressionParameter,
    item: &MenuItem,
    store: &mut S,
) {
    let name = item.parameter.as_str();
    let next = match parameter.kind {
        ValueKind::Bool => {
            let trigger = as_bool(item.trigger_value);
            ParameterValue::Bool(if store.get_bool(name) == Some(trigger) {
                as_bool(parameter.default_value)
            } else {
                trigger
            })
        }
        ValueKind::Int => {
            let trigger = as_int(item.trigger_value);
            ParameterValue::Int(if store.get_int(name) == Some(trigger) {
                as_int(parameter.default_value)
            } else {
                trigger
            })
        }
        ValueKind::Float => {
            let trigger = item.trigger_value;
            ParameterValue::Float(if store.get_float(name) == Some(trigger) {
                parameter.default_value
            } else {
                trigger
            })
        }
        ValueKind::Unsupported(ref kind) => {
            log::debug!("Parameter '{}' has unsupported kind '{}'", name, kind);
            return;
        }
    };

    log::debug!("{} -> {}", name, next);
    store.set(name, next);
}

/// Writes every typed parameter's default into the store.
pub fn set_defaults<S: ParameterStore + ?Sized>(parameters: &[ExpressionParameter], store: &mut S) {
    for parameter in parameters {
        if let Some(value) = ParameterValue::default_for(&parameter.kind, parameter.default_value) {
            store.set(parameter.name.as_str(), value);
        }
    }
}
