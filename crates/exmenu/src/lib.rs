pub mod avatar;
pub mod geometry;
pub mod icon;
pub mod item;
mod macros;
pub mod menu;
pub mod navigation;
pub mod params;
pub mod render;
pub mod session;
pub mod sync;

pub use avatar::{AvatarDescriptor, AvatarError, ExpressionParameter, ValueKind};
pub use item::{ItemKind, MenuItem};
pub use menu::{Control, ControlType, MenuDefinition, ParameterName};
pub use params::{InMemoryStore, ParameterStore, ParameterValue};
pub use session::{Activation, PreviewSession};
