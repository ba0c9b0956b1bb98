use eframe::egui;

use crate::session::UploadHandler;

/// Returns a path when the user asked to upload one from the picker field.
pub fn render(ui: &mut egui::Ui, upload: &mut UploadHandler) -> Option<String> {
    let mut picked = None;

    let fill = if upload.is_dragging() {
        ui.visuals().selection.bg_fill
    } else {
        ui.visuals().extreme_bg_color
    };

    egui::Frame::group(ui.style()).fill(fill).show(ui, |ui| {
        ui.set_width(ui.available_width());
        match upload.selected() {
            Some(name) => {
                ui.horizontal(|ui| {
                    ui.label("File đã chọn:");
                    ui.strong(name);
                });
            }
            None => {
                ui.label("Kéo và thả file vào đây hoặc nhập đường dẫn bên dưới");
                ui.label(egui::RichText::new("↓").heading());
            }
        }

        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut upload.path_input);
            if ui.button("Tải lên").clicked() && !upload.path_input.trim().is_empty() {
                picked = Some(upload.path_input.trim().to_string());
                upload.path_input.clear();
            }
        });
    });

    picked
}
