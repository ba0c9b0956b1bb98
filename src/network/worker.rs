use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::common::{ApiCommand, ApiEvent, ReplyOutcome, UploadSource};
use crate::storage::IdentityProvider;

use super::client::ApiClient;

/// Nhận lệnh từ UI, mỗi lệnh chạy trong một task riêng.
/// Không có thứ tự giữa các request đang chạy song song.
pub struct ApiWorker {
    client: Arc<ApiClient>,
    identity: Arc<dyn IdentityProvider>,
    event_sender: mpsc::Sender<ApiEvent>,
    command_receiver: mpsc::Receiver<ApiCommand>,
}

impl ApiWorker {
    pub fn new(
        client: ApiClient,
        identity: Arc<dyn IdentityProvider>,
        event_sender: mpsc::Sender<ApiEvent>,
        command_receiver: mpsc::Receiver<ApiCommand>,
    ) -> Self {
        Self {
            client: Arc::new(client),
            identity,
            event_sender,
            command_receiver,
        }
    }

    pub async fn run(mut self) {
        log::info!("API worker started against {}", self.client.base_url());
        while let Some(command) = self.command_receiver.recv().await {
            self.dispatch(command);
        }
        log::info!("Command channel closed; API worker stopping");
    }

    fn dispatch(&self, command: ApiCommand) -> JoinHandle<()> {
        match command {
            ApiCommand::Ask(query) => self.spawn_ask(query),
            ApiCommand::UploadDocument(source) => self.spawn_upload(source),
        }
    }

    fn spawn_ask(&self, query: String) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let identity = Arc::clone(&self.identity);
        let event_sender = self.event_sender.clone();

        tokio::spawn(async move {
            let uid = lookup_uid(identity).await;
            let outcome = ReplyOutcome::from(client.retrieve(&query, uid.as_deref()).await);
            match &outcome {
                ReplyOutcome::Answered(_) => log::debug!("Retrieve answered"),
                ReplyOutcome::Rejected { status } => {
                    log::warn!("Retrieve rejected with status {status}")
                }
                ReplyOutcome::TransportFailed(err) => log::error!("Retrieve failed: {err}"),
            }

            if let Err(err) = event_sender.send(ApiEvent::Reply(outcome)).await {
                log::warn!("UI dropped before reply could be delivered: {err}");
            }
        })
    }

    /// Fire-and-forget: kết quả upload chỉ được ghi log.
    fn spawn_upload(&self, source: UploadSource) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let identity = Arc::clone(&self.identity);

        tokio::spawn(async move {
            let name = source.name();
            let file = match source.load().await {
                Ok(file) => file,
                Err(err) => {
                    log::warn!("Upload of {name} failed: could not read file: {err}");
                    return;
                }
            };
            let uid = lookup_uid(identity).await;

            log::info!("Uploading {name} ({} bytes)", file.size());
            match client.upload_document(file, uid.as_deref()).await {
                Ok(receipt) => log::info!(
                    "Upload of {name} finished with status {} (filename: {:?}, message: {:?})",
                    receipt.status,
                    receipt.filename,
                    receipt.message
                ),
                Err(err) => log::warn!("Upload of {name} failed: {err}"),
            }
        })
    }
}

// Identity có thể đọc file đồng bộ, nên chạy ngoài runtime thread.
async fn lookup_uid(identity: Arc<dyn IdentityProvider>) -> Option<String> {
    match tokio::task::spawn_blocking(move || identity.uid()).await {
        Ok(uid) => uid,
        Err(err) => {
            log::warn!("Identity lookup failed: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;

    use super::*;
    use crate::network::client::tests::{
        dead_backend, echo_router, failing_router, spawn_backend, upload_router,
    };
    use crate::common::SelectedFile;
    use crate::storage::{FileIdentity, StaticIdentity};

    fn worker_for(base: &str, uid: Option<&str>) -> (ApiWorker, mpsc::Receiver<ApiEvent>) {
        let (_cmd_tx, cmd_rx) = mpsc::channel(8);
        let (event_tx, event_rx) = mpsc::channel(8);
        let worker = ApiWorker::new(
            ApiClient::new(base),
            Arc::new(StaticIdentity(uid.map(str::to_string))),
            event_tx,
            cmd_rx,
        );
        (worker, event_rx)
    }

    #[tokio::test]
    async fn ask_emits_answer_with_identity() {
        let base = spawn_backend(echo_router()).await;
        let (worker, mut events) = worker_for(&base, Some("abc"));

        worker.dispatch(ApiCommand::Ask("hello".into())).await.unwrap();

        let ApiEvent::Reply(outcome) = events.recv().await.unwrap();
        assert_eq!(outcome, ReplyOutcome::Answered("abc:hello".into()));
    }

    #[tokio::test]
    async fn ask_emits_rejection_on_server_error() {
        let base = spawn_backend(failing_router(StatusCode::BAD_GATEWAY)).await;
        let (worker, mut events) = worker_for(&base, None);

        worker.dispatch(ApiCommand::Ask("hello".into())).await.unwrap();

        let ApiEvent::Reply(outcome) = events.recv().await.unwrap();
        assert_eq!(outcome, ReplyOutcome::Rejected { status: 502 });
    }

    #[tokio::test]
    async fn ask_emits_transport_failure_when_unreachable() {
        let base = dead_backend().await;
        let (worker, mut events) = worker_for(&base, None);

        worker.dispatch(ApiCommand::Ask("hello".into())).await.unwrap();

        let ApiEvent::Reply(outcome) = events.recv().await.unwrap();
        assert!(matches!(outcome, ReplyOutcome::TransportFailed(_)));
    }

    #[tokio::test]
    async fn upload_emits_no_event() {
        let (tx, mut captured) = tokio::sync::mpsc::unbounded_channel();
        let base = spawn_backend(upload_router(tx)).await;
        let (worker, mut events) = worker_for(&base, Some("abc"));

        worker
            .dispatch(ApiCommand::UploadDocument(UploadSource::Inline(
                SelectedFile::new("a.txt", b"A".to_vec()),
            )))
            .await
            .unwrap();

        let upload = captured.recv().await.unwrap();
        assert_eq!(upload.file_name.as_deref(), Some("a.txt"));
        assert_eq!(upload.uid.as_deref(), Some("abc"));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn failed_upload_is_swallowed() {
        let (worker, mut events) = worker_for(&dead_backend().await, None);

        let handle = worker.dispatch(ApiCommand::UploadDocument(UploadSource::Inline(
            SelectedFile::new("a.txt", b"A".to_vec()),
        )));
        assert!(handle.await.is_ok());
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn upload_reads_path_inside_the_task() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manual.pdf");
        std::fs::write(&path, b"%PDF-1.5 manual").unwrap();

        let (tx, mut captured) = tokio::sync::mpsc::unbounded_channel();
        let base = spawn_backend(upload_router(tx)).await;
        let (worker, _events) = worker_for(&base, None);

        worker
            .dispatch(ApiCommand::UploadDocument(UploadSource::Path(path)))
            .await
            .unwrap();

        let upload = captured.recv().await.unwrap();
        assert_eq!(upload.file_name.as_deref(), Some("manual.pdf"));
        assert_eq!(upload.bytes, b"%PDF-1.5 manual");
    }

    #[tokio::test]
    async fn unreadable_path_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, mut captured) = tokio::sync::mpsc::unbounded_channel();
        let base = spawn_backend(upload_router(tx)).await;
        let (worker, mut events) = worker_for(&base, None);

        let handle = worker.dispatch(ApiCommand::UploadDocument(UploadSource::Path(
            dir.path().join("missing.pdf"),
        )));
        assert!(handle.await.is_ok());
        assert!(captured.try_recv().is_err());
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn uid_is_read_from_identity_file_per_request() {
        let dir = tempfile::tempdir().unwrap();
        let identity = FileIdentity::new(dir.path().join("identity.json"));
        let base = spawn_backend(echo_router()).await;
        let (_cmd_tx, cmd_rx) = mpsc::channel(8);
        let (event_tx, mut events) = mpsc::channel(8);
        let worker = ApiWorker::new(
            ApiClient::new(&base),
            Arc::new(identity.clone()),
            event_tx,
            cmd_rx,
        );

        worker.dispatch(ApiCommand::Ask("q".into())).await.unwrap();
        let ApiEvent::Reply(before) = events.recv().await.unwrap();
        assert_eq!(before, ReplyOutcome::Answered("-:q".into()));

        identity.store("fresh-uid").unwrap();
        worker.dispatch(ApiCommand::Ask("q".into())).await.unwrap();
        let ApiEvent::Reply(after) = events.recv().await.unwrap();
        assert_eq!(after, ReplyOutcome::Answered("fresh-uid:q".into()));
    }

    #[tokio::test]
    async fn run_processes_commands_until_channel_closes() {
        let base = spawn_backend(echo_router()).await;
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (event_tx, mut events) = mpsc::channel(8);
        let worker = ApiWorker::new(
            ApiClient::new(&base),
            Arc::new(StaticIdentity::default()),
            event_tx,
            cmd_rx,
        );
        let running = tokio::spawn(worker.run());

        cmd_tx.send(ApiCommand::Ask("one".into())).await.unwrap();
        cmd_tx.send(ApiCommand::Ask("two".into())).await.unwrap();

        let mut replies = Vec::new();
        for _ in 0..2 {
            let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
                .await
                .unwrap()
                .unwrap();
            let ApiEvent::Reply(outcome) = event;
            replies.push(outcome);
        }
        replies.sort_by_key(|outcome| format!("{outcome:?}"));
        assert_eq!(
            replies,
            vec![
                ReplyOutcome::Answered("-:one".into()),
                ReplyOutcome::Answered("-:two".into()),
            ]
        );

        drop(cmd_tx);
        tokio::time::timeout(Duration::from_secs(5), running)
            .await
            .unwrap()
            .unwrap();
    }
}
