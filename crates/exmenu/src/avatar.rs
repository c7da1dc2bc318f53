use crate::menu::{MenuDefinition, ParameterName};
use config::{File, FileFormat};
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strum::EnumString;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, DeserializeFromStr, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ValueKind {
    #[strum(serialize = "Int", serialize = "integer")]
    Int,
    Float,
    #[strum(serialize = "Bool", serialize = "boolean")]
    Bool,
    #[strum(default)]
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExpressionParameter {
    pub name: ParameterName,
    #[serde(rename = "type")]
    pub kind: ValueKind,
    #[serde(default)]
    pub default_value: f32,
}

impl ExpressionParameter {
    pub fn new(name: impl Into<ParameterName>, kind: ValueKind, default_value: f32) -> Self {
        Self {
            name: name.into(),
            kind,
            default_value,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvatarDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ExpressionParameter>,
    #[serde(default)]
    pub menu: Arc<MenuDefinition>,
}

#[derive(Error, Debug)]
pub enum AvatarError {
    #[error("Failed to read avatar file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid avatar file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },
}

impl AvatarDescriptor {
    pub fn new(parameters: Vec<ExpressionParameter>, menu: MenuDefinition) -> Self {
        Self {
            name: String::new(),
            parameters,
            menu: Arc::new(menu),
        }
    }

    pub fn load(path: &Path) -> Result<Self, AvatarError> {
        let text = fs_err::read_to_string(path)?;
        Self::from_toml(&text).map_err(|source| AvatarError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// First parameter with this name; the menu may reference names that were
    /// never declared.
    pub fn parameter(&self, name: &str) -> Option<&ExpressionParameter> {
        if name.is_empty() {
            return None;
        }
        self.parameters.iter().find(|p| p.name.as_str() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::ControlType;

    const AVATAR: &str = r#"
name = "Test"

[[parameters]]
name = "light"
type = "Int"
default_value = 0

[[parameters]]
name = "wave"
type = "bool"

[[parameters]]
name = "hue"
type = "Float"
default_value = 0.25

[[parameters]]
name = "odd"
type = "vector3"

[[menu.controls]]
name = "Light"
type = "Toggle"
parameter = "light"
value = 1

[[menu.controls]]
name = "Expr"
type = "SubMenu"

[[menu.controls.sub_menu.controls]]
name = "Wave"
type = "Toggle"
parameter = "wave"
value = 1

[[menu.controls]]
name = "Hue"
type = "RadialPuppet"
sub_parameters = [{ name = "hue" }]
"#;

    #[test]
    fn test_avatar_from_toml() {
        let avatar = AvatarDescriptor::from_toml(AVATAR).unwrap();

        assert_eq!(avatar.name, "Test");
        assert_eq!(avatar.parameters.len(), 4);
        assert_eq!(avatar.parameters[1].kind, ValueKind::Bool);
        assert_eq!(avatar.parameters[1].default_value, 0.0);
        assert_eq!(avatar.parameters[2].default_value, 0.25);
        assert_eq!(
            avatar.parameters[3].kind,
            ValueKind::Unsupported("vector3".to_string())
        );

        let controls = &avatar.menu.controls;
        assert_eq!(controls.len(), 3);
        assert_eq!(controls[0].parameter.as_str(), "light");
        assert_eq!(controls[0].value, 1.0);
        assert_eq!(controls[1].control_type, ControlType::SubMenu);

        let sub = controls[1].sub_menu.as_ref().unwrap();
        assert_eq!(sub.controls[0].name, "Wave");
        assert_eq!(controls[2].sub_parameters[0].name.as_str(), "hue");
    }

    #[test]
    fn test_parameter_lookup() {
        let avatar = AvatarDescriptor::from_toml(AVATAR).unwrap();

        assert_eq!(avatar.parameter("hue").map(|p| &p.kind), Some(&ValueKind::Float));
        assert!(avatar.parameter("missing").is_none());
        assert!(avatar.parameter("").is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let err = AvatarDescriptor::load(Path::new("/nonexistent/avatar.toml")).unwrap_err();
        assert!(matches!(err, AvatarError::Io(_)));
    }
}
