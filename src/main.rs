use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use verdant::voice::ChannelSource;
use verdant::{
    create_router, AppState, ChatManager, Config, Formatter, GeminiClient, PlantAnalyzer,
    RenderMode, VoiceCapture,
};

#[derive(Debug, Parser)]
#[command(name = "verdant", about = "Plant-care assistant service")]
struct Args {
    /// Path to the config file (without extension)
    #[arg(long, default_value = "config/verdant")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    // Missing credential is fatal at startup
    let api_key = Config::api_key()?;

    info!("Verdant v0.1.0");
    info!("Loaded config: {}", cfg.service.name);
    info!("Model: {}", cfg.gemini.model);

    let client: Arc<GeminiClient> =
        Arc::new(GeminiClient::new(api_key, cfg.gemini.base_url.as_deref())?);

    let chat = Arc::new(ChatManager::new(client.clone(), cfg.gemini.model.clone()));
    let analyzer = Arc::new(PlantAnalyzer::new(client, cfg.gemini.model.clone()));

    let (voice, recognition_feed) = if cfg.voice.enabled {
        let (source, feed) = ChannelSource::new();
        (VoiceCapture::new(Some(Box::new(source))), Some(feed))
    } else {
        (VoiceCapture::new(None), None)
    };

    let formatter = Formatter::new(if cfg.render.markdown {
        RenderMode::Markdown
    } else {
        RenderMode::PlainText
    });

    let state = AppState::new(
        chat,
        analyzer,
        Arc::new(voice),
        recognition_feed,
        formatter,
    );

    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
