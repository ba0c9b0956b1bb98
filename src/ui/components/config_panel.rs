use eframe::egui;

use crate::config::AppConfig;

pub fn render(ui: &mut egui::Ui, config: &AppConfig) {
    ui.heading("Settings");
    ui.separator();

    egui::Grid::new("connection_grid")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            row(ui, "API", &config.api_url);
            row(ui, "WebSocket", &config.websocket_url);
            row(ui, "Identity file", &config.identity_path);
        });

    ui.separator();
    egui::CollapsingHeader::new("Model defaults").show(ui, |ui| {
        let model = &config.model;
        egui::Grid::new("model_grid")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                row(ui, "Model", &model.default_model);
                row(ui, "Embedding", &model.default_embedding_model);
                row(ui, "Vector store", &model.default_vector_store);
                row(ui, "Chunk size", &model.default_chunk_size.to_string());
                row(ui, "Chunk overlap", &model.default_chunk_overlap.to_string());
                row(ui, "Max tokens", &model.default_max_tokens.to_string());
                row(ui, "Temperature", &format!("{:.2}", model.default_temperature));
                row(ui, "Top p", &format!("{:.2}", model.default_top_p));
            });
    });
}

fn row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.label(label);
    ui.label(egui::RichText::new(value).monospace());
    ui.end_row();
}
