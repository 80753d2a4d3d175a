use anyhow::Context;
use listenfd::ListenFd;
use std::path::PathBuf;
use std::sync::Arc;
use structopt::StructOpt;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

mod config;
mod rank;
mod routes;
mod youtube;

#[derive(StructOpt, Debug)]
#[structopt(name = "querytube", about = "Search videos by what they say.")]
struct Opt {
    /// RON config file
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Address to listen on, unless a socket is passed in via LISTEN_FDS
    #[structopt(long, default_value = "127.0.0.1:8000")]
    listen: String,

    #[structopt(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    youtube_api_key: Option<String>,
}

async fn listener(listen: &str) -> anyhow::Result<TcpListener> {
    let mut fds = ListenFd::from_env();
    match fds
        .take_tcp_listener(0)
        .context("LISTEN_FDS must pass a TCP socket")?
    {
        Some(inherited) => {
            inherited.set_nonblocking(true)?;
            Ok(TcpListener::from_std(inherited)?)
        }
        None => TcpListener::bind(listen)
            .await
            .with_context(|| format!("cannot listen on {}", listen)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("querytube=debug,tower_http=debug")),
        )
        .init();

    let opt = Opt::from_args();
    let config = match &opt.config {
        Some(path) => config::Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => config::Config::default(),
    };
    if opt.youtube_api_key.is_none() {
        tracing::warn!("YOUTUBE_API_KEY is not set, searches will fail");
    }

    let state = routes::AppState {
        source: Arc::new(youtube::YouTube::new(opt.youtube_api_key)),
        max_results: config.max_results,
    };
    let app = routes::router(state, &config);

    let listener = listener(&opt.listen).await?;
    info!(message = "listening", addr = %listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
