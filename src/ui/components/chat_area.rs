use chrono::{DateTime, Local, Utc};
use eframe::egui;

use crate::common::{ChatMessage, Sender};

pub fn render(ui: &mut egui::Ui, messages: &[ChatMessage], scroll_to_bottom: bool) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if messages.is_empty() {
                ui.label(egui::RichText::new("Bắt đầu cuộc trò chuyện!").weak());
            }

            for message in messages {
                let color = match message.sender {
                    Sender::User => egui::Color32::LIGHT_BLUE,
                    Sender::Bot => egui::Color32::LIGHT_GREEN,
                };
                ui.push_id(&message.id, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.colored_label(color, format!("{}:", message.sender))
                            .on_hover_text(sent_at(message.timestamp));
                        ui.label(&message.text);
                    });
                });
            }

            // Cuộn xuống tin nhắn mới nhất
            if scroll_to_bottom {
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
            }
        });
}

fn sent_at(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp)
        .map(|time| time.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_default()
}
