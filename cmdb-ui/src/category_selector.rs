// Category Selector - egui drawing of CategoryMenu
// The popup is an Area anchored under the button. While the menu holds its
// dismiss listener, every frame checks for Escape or a press outside both the
// popup and the button.

use crate::state_manager::ResourceStateManager;
use cmdb_core::{CategoryMenu, DismissEvent, ResourceCategory};

pub struct CategorySelector {
    menu: CategoryMenu,
}

impl CategorySelector {
    pub fn new(selected: ResourceCategory) -> Self {
        Self {
            menu: CategoryMenu::new(selected),
        }
    }

    pub fn selected(&self) -> ResourceCategory {
        self.menu.selected()
    }

    pub fn is_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut ResourceStateManager) {
        let button = ui.button(format!("{} ⏷", self.menu.selected_label()));
        if button.clicked() {
            self.menu.toggle();
        }
        if !self.menu.is_open() {
            return;
        }

        let mut chosen = None;
        let menu = &self.menu;
        let popup = egui::Area::new(egui::Id::new("category_menu_popup"))
            .order(egui::Order::Foreground)
            .fixed_pos(button.rect.left_bottom())
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_min_width(button.rect.width().max(180.0));
                    for entry in menu.options() {
                        let current = entry.category == menu.selected();
                        if ui.selectable_label(current, entry.label).clicked() {
                            chosen = Some(entry.category);
                        }
                    }
                });
            });

        if let Some(category) = chosen {
            if let Some(changed) = self.menu.choose(category) {
                log::info!("🔄 [UI] Category changed to {}", changed);
                state.select_category(changed);
            }
            return;
        }

        let popup_rect = popup.response.rect;
        let (escape, outside_click) = ui.input(|i| {
            let outside = i.pointer.any_pressed()
                && i.pointer
                    .interact_pos()
                    .is_some_and(|pos| !popup_rect.contains(pos) && !button.rect.contains(pos));
            (i.key_pressed(egui::Key::Escape), outside)
        });

        if escape {
            self.menu.dismiss(DismissEvent::Escape);
        } else if outside_click {
            self.menu.dismiss(DismissEvent::OutsideClick);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(
        ctx: &egui::Context,
        events: Vec<egui::Event>,
        selector: &mut CategorySelector,
        state: &mut ResourceStateManager,
    ) {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(800.0, 600.0),
            )),
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| selector.show(ui, state));
        });
    }

    #[test]
    fn test_escape_closes_open_menu() {
        let ctx = egui::Context::default();
        let mut state = ResourceStateManager::new(None);
        let mut selector = CategorySelector::new(ResourceCategory::Vm);

        selector.menu.open();
        frame(&ctx, Vec::new(), &mut selector, &mut state);
        assert!(selector.is_open());

        let escape = egui::Event::Key {
            key: egui::Key::Escape,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        };
        frame(&ctx, vec![escape], &mut selector, &mut state);

        assert!(!selector.is_open());
        assert_eq!(selector.menu.registry().active(), 0);
        assert_eq!(selector.selected(), ResourceCategory::Vm);
        assert_eq!(state.selected_category(), None);
    }

    #[test]
    fn test_press_outside_popup_closes_menu() {
        let ctx = egui::Context::default();
        let mut state = ResourceStateManager::new(None);
        let mut selector = CategorySelector::new(ResourceCategory::SqlServer);

        selector.menu.open();
        frame(&ctx, Vec::new(), &mut selector, &mut state);
        assert!(selector.is_open());
        assert_eq!(selector.menu.registry().active(), 1);

        // Bottom-right corner: far from the button and the popup under it.
        let outside = egui::pos2(760.0, 560.0);
        let press = vec![
            egui::Event::PointerMoved(outside),
            egui::Event::PointerButton {
                pos: outside,
                button: egui::PointerButton::Primary,
                pressed: true,
                modifiers: egui::Modifiers::NONE,
            },
        ];
        frame(&ctx, press, &mut selector, &mut state);

        assert!(!selector.is_open());
        assert_eq!(selector.menu.registry().active(), 0);
        assert_eq!(selector.selected(), ResourceCategory::SqlServer);
        assert_eq!(state.selected_category(), None);
    }

    #[test]
    fn test_pointer_move_alone_keeps_menu_open() {
        let ctx = egui::Context::default();
        let mut state = ResourceStateManager::new(None);
        let mut selector = CategorySelector::new(ResourceCategory::Vm);

        selector.menu.open();
        frame(
            &ctx,
            vec![egui::Event::PointerMoved(egui::pos2(760.0, 560.0))],
            &mut selector,
            &mut state,
        );

        assert!(selector.is_open());
        assert_eq!(selector.menu.registry().active(), 1);
    }
}
