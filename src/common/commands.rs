use super::types::UploadSource;

/// Lệnh UI gửi xuống tầng mạng.
#[derive(Debug, Clone)]
pub enum ApiCommand {
    /// Gửi câu hỏi tới /v1/retrieve. Chuỗi là nội dung thô người dùng đã gõ.
    Ask(String),
    /// Upload file lên /v1/document; worker tự đọc file nếu là đường dẫn.
    UploadDocument(UploadSource),
}
