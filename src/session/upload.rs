use crate::common::UploadSource;

#[derive(Debug, Default)]
pub struct UploadHandler {
    /// Tên file đã chọn gần nhất; bytes không được giữ lại.
    selected: Option<String>,
    dragging: bool,
    pub path_input: String,
}

impl UploadHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Chỉ lấy file đầu tiên; các file còn lại bị bỏ qua.
    /// Trả về nguồn cần upload ngay, hoặc `None` nếu không có file nào.
    pub fn select<I>(&mut self, files: I) -> Option<UploadSource>
    where
        I: IntoIterator<Item = UploadSource>,
    {
        let source = files.into_iter().next()?;
        let name = source.name();
        log::info!("Selected file {name}");
        self.selected = Some(name);
        Some(source)
    }

    pub fn drag_enter(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// Drop kết thúc trạng thái kéo, kể cả khi không có file.
    pub fn drop_files<I>(&mut self, files: I) -> Option<UploadSource>
    where
        I: IntoIterator<Item = UploadSource>,
    {
        self.dragging = false;
        self.select(files)
    }

    /// Feeds one frame of window file input: whether files hover over the
    /// window, and the files dropped this frame.
    pub fn handle_window_files(
        &mut self,
        hovering: bool,
        dropped: &[egui::DroppedFile],
    ) -> Option<UploadSource> {
        if dropped.is_empty() {
            if hovering && !self.dragging {
                self.drag_enter();
            } else if !hovering && self.dragging {
                self.drag_leave();
            }
            return None;
        }

        if dropped.len() > 1 {
            log::debug!("Dropped {} files; only the first is uploaded", dropped.len());
        }
        let first = dropped.first().and_then(|file| {
            let source = UploadSource::from_dropped(file);
            if source.is_none() {
                log::warn!("Dropped file {} has neither bytes nor a path", file.name);
            }
            source
        });
        self.drop_files(first)
    }
}
