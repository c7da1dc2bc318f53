use crate::menu::{MenuDefinition, ParameterName};
use std::sync::Arc;

/// Submenus entered so far. Empty means the root level.
#[derive(Debug, Clone, Default)]
pub struct NavigationStack {
    menus: Vec<Arc<MenuDefinition>>,
}

impl NavigationStack {
    pub fn push(&mut self, menu: Arc<MenuDefinition>) {
        self.menus.push(menu);
    }

    pub fn pop(&mut self) -> Option<Arc<MenuDefinition>> {
        self.menus.pop()
    }

    pub fn top(&self) -> Option<&Arc<MenuDefinition>> {
        self.menus.last()
    }

    pub fn depth(&self) -> usize {
        self.menus.len()
    }

    pub fn is_root(&self) -> bool {
        self.menus.is_empty()
    }

    pub fn clear(&mut self) {
        self.menus.clear();
    }
}

/// A radial puppet bound to its first sub-parameter while engaged.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialPuppetSession {
    pub parameter: ParameterName,
    pub value: f32,
}
