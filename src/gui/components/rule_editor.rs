//! Rule field, format picker and the Next/Save/Delete/always-on-top controls

use eframe::egui;

use crate::barcode::SymbolFormat;
use crate::gui::constants::*;
use crate::state::AppState;

/// What the user did in the editor this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    None,
    /// Text typed or a saved rule picked from the dropdown
    TextChanged,
    FormatChanged,
    Next,
    Save,
    Delete,
    TopmostChanged,
}

pub fn ui(ui: &mut egui::Ui, state: &mut AppState) -> RuleAction {
    let mut action = RuleAction::None;

    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Rule:").strong());

            let edit = egui::TextEdit::singleline(state.rules.active_mut())
                .desired_width(RULE_FIELD_WIDTH)
                .hint_text("Content to encode");
            if ui.add(edit).changed() {
                action = RuleAction::TextChanged;
            }

            // Dropdown of saved rules next to the editable field
            let mut picked: Option<String> = None;
            egui::ComboBox::from_id_salt("saved_rules")
                .selected_text(format!("{} saved", state.rules.len()))
                .show_ui(ui, |ui| {
                    for rule in state.rules.rules() {
                        let selected = rule == state.rules.active();
                        if ui.selectable_label(selected, rule).clicked() {
                            picked = Some(rule.clone());
                        }
                    }
                    if state.rules.is_empty() {
                        ui.label(egui::RichText::new("(No saved rules)").italics().weak());
                    }
                });
            if let Some(rule) = picked {
                state.rules.set_active(rule);
                action = RuleAction::TextChanged;
            }
        });

        ui.add_space(ITEM_SPACING);

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Format:").strong());

            let before = state.format;
            egui::ComboBox::from_id_salt("symbol_format")
                .selected_text(state.format.label())
                .show_ui(ui, |ui| {
                    for format in SymbolFormat::ALL {
                        ui.selectable_value(&mut state.format, format, format.label());
                    }
                });
            if state.format != before {
                action = RuleAction::FormatChanged;
            }

            if ui.button("⏭ Next").clicked() {
                action = RuleAction::Next;
            }

            if ui.button("💾 Save rule").clicked() {
                action = RuleAction::Save;
            }

            if ui.button("🗑 Delete rule").clicked() {
                action = RuleAction::Delete;
            }
        });

        ui.add_space(ITEM_SPACING);

        if ui
            .checkbox(&mut state.always_on_top, "Always on top")
            .changed()
        {
            action = RuleAction::TopmostChanged;
        }
    });

    action
}
