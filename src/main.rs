mod common;
mod config;
mod network;
mod session;
mod storage;
mod ui;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::sync::mpsc;
use uuid::Uuid;

use common::{ReplyOutcome, Sender, UploadSource};
use config::AppConfig;
use network::{ApiClient, ApiWorker};
use session::{ChatSession, UploadHandler};
use storage::{FileIdentity, IdentityProvider, StaticIdentity};
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "docchat",
    version,
    about = "Chat client for a document retrieval API"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Override `api_url` from the config file
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
    /// Use this uid instead of the one stored in the identity file
    #[arg(long)]
    uid: Option<String>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// Ask one question and print the reply (no UI)
    Ask { query: String },
    /// Upload one document (no UI)
    Upload { path: PathBuf },
    /// Store a uid in the identity file; generates a new one when omitted
    SetUid { uid: Option<String> },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    // Khởi tạo Logger để debug
    env_logger::init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    if let Some(api_url) = cli.api_url {
        app_config.api_url = api_url;
    }

    let identity: Arc<dyn IdentityProvider> = match cli.uid {
        Some(uid) => Arc::new(StaticIdentity(Some(uid))),
        None => Arc::new(FileIdentity::new(&app_config.identity_path)),
    };
    let client = ApiClient::new(&app_config.api_url);

    match cli.mode {
        Some(Mode::Ask { query }) => run_ask(&client, identity.as_ref(), &app_config, query).await,
        Some(Mode::Upload { path }) => run_upload(&client, identity.as_ref(), path).await,
        Some(Mode::SetUid { uid }) => set_uid(&app_config, uid),
        None => Ok(run_full_client(client, identity, app_config)?),
    }
}

async fn run_ask(
    client: &ApiClient,
    identity: &dyn IdentityProvider,
    app_config: &AppConfig,
    query: String,
) -> Result<(), Box<dyn Error>> {
    let mut session = ChatSession::new(
        app_config.fallback_reply.clone(),
        app_config.transport_error_bubble,
    );
    session.input_text = query;
    let Some(text) = session.submit() else {
        log::warn!("Refusing to send an empty question");
        return Ok(());
    };

    let result = client.retrieve(&text, identity.uid().as_deref()).await;
    match &result {
        Err(err) if err.is_server_status() => log::warn!("Retrieve rejected: {err}"),
        Err(err) => log::error!("Retrieve failed: {err}"),
        Ok(_) => {}
    }
    let outcome = ReplyOutcome::from(result);
    let lost = matches!(outcome, ReplyOutcome::TransportFailed(_));
    session.apply_reply(outcome);

    if let Some(reply) = session
        .messages()
        .last()
        .filter(|message| message.sender == Sender::Bot)
    {
        println!("{}", reply.text);
    }
    if lost {
        return Err("no reply from the retrieval endpoint".into());
    }
    Ok(())
}

async fn run_upload(
    client: &ApiClient,
    identity: &dyn IdentityProvider,
    path: PathBuf,
) -> Result<(), Box<dyn Error>> {
    let mut upload = UploadHandler::new();
    let Some(source) = upload.select([UploadSource::Path(path.clone())]) else {
        return Ok(());
    };
    let file = source
        .load()
        .await
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    let name = file.name.clone();

    let receipt = client.upload_document(file, identity.uid().as_deref()).await?;
    log::info!("Upload of {name} finished with status {}", receipt.status);
    println!(
        "{name}: {}",
        receipt
            .message
            .or(receipt.filename)
            .unwrap_or_else(|| format!("status {}", receipt.status))
    );
    Ok(())
}

fn set_uid(app_config: &AppConfig, uid: Option<String>) -> Result<(), Box<dyn Error>> {
    let uid = uid.unwrap_or_else(|| Uuid::new_v4().to_string());
    let identity = FileIdentity::new(&app_config.identity_path);
    identity.store(&uid)?;
    log::info!("Stored uid in {}", identity.path().display());
    println!("{uid}");
    Ok(())
}

fn run_full_client(
    client: ApiClient,
    identity: Arc<dyn IdentityProvider>,
    app_config: AppConfig,
) -> Result<(), eframe::Error> {
    // 1. Tạo các kênh giao tiếp (Channels)
    // UI -> API worker
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // API worker -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    // 2. Khởi chạy API worker (Chạy ngầm)
    tokio::spawn(ApiWorker::new(client, identity, event_tx, cmd_rx).run());

    // 3. Khởi chạy UI (Chạy trên Main Thread)
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "DocChat",
        options,
        Box::new(move |cc| {
            log::info!("Client started against {}", app_config.api_url);
            Ok(Box::new(ChatApp::new(cc, app_config, cmd_tx, event_rx)))
        }),
    )
}
