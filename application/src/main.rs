use std::{
    future::IntoFuture as _,
    io,
    pin::pin,
    sync::OnceLock,
};

use application::{Args, Config, Service, Shell};
use futures::{
    future::{self, Either},
    TryFutureExt as _,
};
use service::{
    command::{Command as _, RestoreSession},
    infra::{http, store},
};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let Args { config } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        gateway,
        store,
        service,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let gateway = http::Http::new(gateway.into()).map_err(|e| {
        log::error!("failed to initialize `Http` gateway: {e}");
    })?;
    let store = store::File::new(store.token_path);

    let (service, background) = Service::new(service.into(), gateway, store);

    // Startup derivation pass: restore the persisted session, silently
    // discarding a stale or malformed token.
    drop(service.execute(RestoreSession).await.map_err(|e| {
        log::error!("failed to restore the persisted session: {e}");
    })?);

    let shell = pin!(Shell::new(service)
        .run()
        .map_err(|e| log::error!("shell failed: {e}")));
    let background = pin!(background
        .into_future()
        .map_err(|e| log::error!("background task failed: {e}")));

    match future::select(shell, background).await {
        Either::Left((res, _)) | Either::Right((res, _)) => res,
    }
}
