use std::path::PathBuf;
use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{ApiCommand, ApiEvent, UploadSource};
use crate::config::AppConfig;

use super::components::{chat_area, config_panel, input_bar, upload_zone};
use super::state::AppState;

// Reply đến từ tokio task, nên UI cần tự vẽ lại định kỳ.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct ChatApp {
    state: AppState,
    command_sender: mpsc::Sender<ApiCommand>,
    event_receiver: mpsc::Receiver<ApiEvent>,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        command_sender: mpsc::Sender<ApiCommand>,
        event_receiver: mpsc::Receiver<ApiEvent>,
    ) -> Self {
        Self {
            state: AppState::new(config),
            command_sender,
            event_receiver,
        }
    }

    fn handle_api_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                ApiEvent::Reply(outcome) => self.state.chat.apply_reply(outcome),
            }
        }
    }

    fn send_command(&mut self, command: ApiCommand) {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to API worker: {err}");
        }
    }

    fn submit_message(&mut self) {
        if let Some(text) = self.state.chat.submit() {
            self.send_command(ApiCommand::Ask(text));
        }
    }

    fn pick_file(&mut self, path: &str) {
        let source = UploadSource::Path(PathBuf::from(path));
        if let Some(source) = self.state.upload.select([source]) {
            self.send_command(ApiCommand::UploadDocument(source));
        }
    }

    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
            )
        });

        if let Some(source) = self.state.upload.handle_window_files(hovering, &dropped) {
            self.send_command(ApiCommand::UploadDocument(source));
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_api_events();
        self.handle_file_drops(ctx);

        egui::TopBottomPanel::top("upload_zone").show(ctx, |ui| {
            if let Some(path) = upload_zone::render(ui, &mut self.state.upload) {
                self.pick_file(&path);
            }
        });

        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                config_panel::render(ui, &self.state.config);
            });

        egui::TopBottomPanel::bottom("input_bar").show(ctx, |ui| {
            if input_bar::render(ui, &mut self.state.chat.input_text) {
                self.submit_message();
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let scroll_to_bottom = self.state.chat.take_scroll_request();
            chat_area::render(ui, self.state.chat.messages(), scroll_to_bottom);
        });

        ctx.request_repaint_after(POLL_INTERVAL);
    }
}
