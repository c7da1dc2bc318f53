#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    AvatarReload,
    ConfigReload,
}
