use eframe::egui;

/// Returns true when the user pressed Send or Enter. Validation is left to
/// the chat session, which keeps blank input in the field.
pub fn render(ui: &mut egui::Ui, input_text: &mut String) -> bool {
    let mut send = false;
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(input_text)
                .hint_text("Nhập tin nhắn của bạn...")
                .desired_width(ui.available_width() - 60.0),
        );
        if ui.button("Gửi").clicked() {
            send = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
            response.request_focus();
        }
    });

    send
}
