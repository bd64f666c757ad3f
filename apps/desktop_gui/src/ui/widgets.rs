//! Small reusable widgets shared by the wizard screens.

use eframe::egui;
use shared::domain::Step;

pub fn human_readable_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        return format!("{bytes} o");
    }
    if bytes < MB {
        return format_scaled_unit(bytes, KB, "Ko");
    }
    if bytes < GB {
        return format_scaled_unit(bytes, MB, "Mo");
    }
    format_scaled_unit(bytes, GB, "Go")
}

fn format_scaled_unit(bytes: u64, unit_size: u64, unit_label: &str) -> String {
    let value = bytes as f64 / unit_size as f64;
    let value_text = format!("{value:.1}");
    let compact_value = value_text.strip_suffix(".0").unwrap_or(&value_text);
    format!("{compact_value} {unit_label}")
}

/// Labelled single-line input. Returns the new text when the user edited it.
pub fn field_input(
    ui: &mut egui::Ui,
    id: &'static str,
    label: &str,
    hint: &str,
    current: &str,
) -> Option<String> {
    ui.label(egui::RichText::new(label).strong());
    let mut buffer = current.to_string();
    let edit = egui::TextEdit::singleline(&mut buffer)
        .id_salt(id)
        .hint_text(
            egui::RichText::new(hint).color(ui.visuals().weak_text_color().gamma_multiply(0.85)),
        )
        .desired_width(f32::INFINITY);
    let response = ui.add_sized([ui.available_width(), 30.0], edit);
    response.changed().then_some(buffer)
}

pub fn error_banner(ui: &mut egui::Ui, message: &str) {
    egui::Frame::NONE
        .fill(egui::Color32::from_rgb(111, 53, 53))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
            });
        });
}

pub fn inline_error(ui: &mut egui::Ui, message: &str) {
    ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(220, 110, 110)));
}

/// Step indicator: "1. Identité > 2. Orientation Académique > 3. ..."
pub fn step_trail(ui: &mut egui::Ui, current: Step) {
    ui.horizontal_wrapped(|ui| {
        for step in [Step::Identity, Step::Academic, Step::Documents] {
            let Some(ordinal) = step.ordinal() else {
                continue;
            };
            if ordinal > 1 {
                ui.weak(">");
            }
            let text = egui::RichText::new(format!("{ordinal}. {}", step.title()));
            if step == current {
                ui.label(text.strong().color(ui.visuals().selection.bg_fill));
            } else {
                ui.label(text.weak());
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::human_readable_bytes;

    #[test]
    fn formats_file_sizes_readably() {
        assert_eq!(human_readable_bytes(0), "0 o");
        assert_eq!(human_readable_bytes(1023), "1023 o");
        assert_eq!(human_readable_bytes(1024), "1 Ko");
        assert_eq!(human_readable_bytes(1536), "1.5 Ko");
        assert_eq!(human_readable_bytes(5 * 1024 * 1024), "5 Mo");
        assert_eq!(human_readable_bytes(3 * 1024 * 1024 * 1024), "3 Go");
    }
}
