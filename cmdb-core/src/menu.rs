//! Category dropdown state.
//!
//! While the menu is open it holds a [`DismissListener`]: the subscription that
//! watches for clicks outside the menu and Escape presses. The listener is an
//! RAII guard, so every way of closing the menu (choosing an entry, dismissal,
//! dropping the menu with the view) releases it.

use crate::category::ResourceCategory;
use crate::registry::{self, ResourceType};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts live dismiss listeners.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    active: Arc<AtomicUsize>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    pub fn acquire(&self) -> DismissListener {
        self.active.fetch_add(1, Ordering::SeqCst);
        log::debug!("[MENU] dismiss listener acquired");
        DismissListener {
            registry: self.clone(),
        }
    }
}

#[derive(Debug)]
pub struct DismissListener {
    registry: ListenerRegistry,
}

impl Drop for DismissListener {
    fn drop(&mut self) {
        self.registry.active.fetch_sub(1, Ordering::SeqCst);
        log::debug!("[MENU] dismiss listener released");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissEvent {
    OutsideClick,
    Escape,
}

#[derive(Debug)]
pub struct CategoryMenu {
    selected: ResourceCategory,
    registry: ListenerRegistry,
    listener: Option<DismissListener>,
}

impl CategoryMenu {
    pub fn new(selected: ResourceCategory) -> Self {
        Self::with_registry(selected, ListenerRegistry::new())
    }

    pub fn with_registry(selected: ResourceCategory, registry: ListenerRegistry) -> Self {
        Self {
            selected,
            registry,
            listener: None,
        }
    }

    pub fn selected(&self) -> ResourceCategory {
        self.selected
    }

    pub fn selected_label(&self) -> &'static str {
        registry::resolve(self.selected).label
    }

    pub fn options(&self) -> impl Iterator<Item = &'static ResourceType> {
        registry::selectable()
    }

    pub fn is_open(&self) -> bool {
        self.listener.is_some()
    }

    pub fn open(&mut self) {
        if self.listener.is_none() {
            self.listener = Some(self.registry.acquire());
        }
    }

    pub fn close(&mut self) {
        self.listener = None;
    }

    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Pick an entry and close the menu. Returns the category when it differs
    /// from the previous selection.
    pub fn choose(&mut self, category: ResourceCategory) -> Option<ResourceCategory> {
        self.close();
        if self.selected == category {
            return None;
        }
        self.selected = category;
        Some(category)
    }

    /// Close in response to a dismiss event. Ignored while closed, since no
    /// listener exists to receive it.
    pub fn dismiss(&mut self, event: DismissEvent) -> bool {
        if !self.is_open() {
            return false;
        }
        log::debug!("[MENU] dismissed by {:?}", event);
        self.close();
        true
    }

    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_acquires_single_listener() {
        let registry = ListenerRegistry::new();
        let mut menu = CategoryMenu::with_registry(ResourceCategory::Vm, registry.clone());

        menu.open();
        menu.open();
        assert!(menu.is_open());
        assert_eq!(registry.active(), 1);
    }

    #[test]
    fn test_every_close_path_releases_listener() {
        let registry = ListenerRegistry::new();
        let mut menu = CategoryMenu::with_registry(ResourceCategory::Vm, registry.clone());

        menu.open();
        assert_eq!(menu.choose(ResourceCategory::SqlServer), Some(ResourceCategory::SqlServer));
        assert_eq!(registry.active(), 0);

        menu.open();
        assert!(menu.dismiss(DismissEvent::OutsideClick));
        assert_eq!(registry.active(), 0);

        menu.open();
        assert!(menu.dismiss(DismissEvent::Escape));
        assert_eq!(registry.active(), 0);

        menu.toggle();
        menu.toggle();
        assert_eq!(registry.active(), 0);

        menu.open();
        drop(menu);
        assert_eq!(registry.active(), 0);
    }

    #[test]
    fn test_choose_same_category_reports_no_change() {
        let mut menu = CategoryMenu::new(ResourceCategory::SqlDatabase);
        menu.open();
        assert_eq!(menu.choose(ResourceCategory::SqlDatabase), None);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_dismiss_while_closed_is_ignored() {
        let mut menu = CategoryMenu::new(ResourceCategory::Vm);
        assert!(!menu.dismiss(DismissEvent::Escape));
    }

    #[test]
    fn test_options_hide_legacy_category() {
        let menu = CategoryMenu::new(ResourceCategory::Database);
        assert_eq!(menu.selected_label(), "Databases (legacy)");
        assert!(menu.options().all(|entry| !entry.category.is_legacy()));
        assert_eq!(menu.options().count(), 4);
    }
}
