//! Terminal host for the banner carousel.
//!
//! Reads taps from stdin (`h`/`left`, `l`/`right`, `q` to quit) and prints
//! the banners inside the viewport whenever the active banner changes.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use banner_carousel::binding::{BannerBinding, TextBanner};
use banner_carousel::config::CarouselConfig;
use banner_carousel::events::{CarouselCommand, NavControl, ScrollTo};
use banner_carousel::render::{CarouselLayout, ControlGlyph};
use banner_carousel::tasks;
use clap::{ArgAction, Parser};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "carousel-demo",
    version,
    about = "auto-advancing banner carousel in the terminal"
)]
struct Args {
    /// Path to YAML config
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Banner title (repeatable); four placeholder banners when omitted
    #[arg(short, long = "banner", value_name = "TITLE")]
    banners: Vec<String>,
    /// Override the auto-scroll interval, e.g. `1500ms` or `5s`
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    interval: Option<Duration>,
    /// Viewport width in layout units
    #[arg(long, default_value_t = 390.0)]
    width: f32,
    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    let result = runtime.block_on(run(args));
    // stdin reads park a blocking thread; don't wait on it
    runtime.shutdown_background();
    result
}

async fn run(args: Args) -> Result<()> {
    let mut cfg = match &args.config {
        Some(path) => CarouselConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => CarouselConfig::default(),
    };
    if let Some(interval) = args.interval {
        cfg.auto_scroll_interval = interval;
    }
    let cfg = cfg.validated().context("invalid configuration values")?;
    tracing::debug!("configuration:\n{cfg:#?}");

    let titles: Vec<String> = if args.banners.is_empty() {
        (1..=4).map(|i| format!("Banner {i}")).collect()
    } else {
        args.banners.clone()
    };
    let banners: Vec<TextBanner> = titles.iter().map(TextBanner::new).collect();

    let (cmd_tx, cmd_rx) = mpsc::channel::<CarouselCommand>(16); // Host -> Carousel
    let (scroll_tx, mut scroll_rx) = mpsc::channel::<ScrollTo>(16); // Carousel -> Host
    let cancel = CancellationToken::new();

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {err}");
                return;
            }
            tracing::info!("ctrl-c received; unmounting");
            cancel.cancel();
        });
    }

    cmd_tx
        .send(CarouselCommand::Resize { width: args.width })
        .await
        .context("carousel command channel closed")?;

    let mut tasks = JoinSet::new();

    // Carousel
    tasks.spawn({
        let cancel = cancel.clone();
        async move {
            tasks::carousel::run(
                cfg,
                BannerBinding::constant(banners),
                cmd_rx,
                scroll_tx,
                cancel,
            )
            .await
            .context("carousel task failed")
        }
    });

    // Stdin taps
    tasks.spawn({
        let cmd_tx = cmd_tx.clone();
        let cancel = cancel.clone();
        async move { read_taps(cmd_tx, cancel).await.context("stdin task failed") }
    });

    // Scrolls keep draining while a layout request is in flight so the
    // carousel never blocks on a full channel.
    let mut pending = request_layout(&cmd_tx);
    loop {
        let awaiting_layout = pending.is_some();
        let event = tokio::select! {
            scroll = scroll_rx.recv() => HostEvent::Scroll(scroll),
            layout = async {
                match pending.as_mut() {
                    Some(reply) => reply.await,
                    None => std::future::pending().await,
                }
            }, if awaiting_layout => HostEvent::Layout(layout),
        };
        match event {
            HostEvent::Scroll(Some(scroll)) => {
                tracing::info!(index = scroll.index, cause = ?scroll.cause, "scroll to center");
                if pending.is_none() {
                    pending = request_layout(&cmd_tx);
                }
            }
            HostEvent::Scroll(None) => break,
            HostEvent::Layout(layout) => {
                pending = None;
                if let Ok(layout) = layout {
                    println!("{}", describe(&layout, &titles));
                }
            }
        }
    }
    cancel.cancel();

    while let Some(res) = tasks.join_next().await {
        match res {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("task error: {e:?}"),
            Err(e) => tracing::error!("join error: {e}"),
        }
    }
    Ok(())
}

async fn read_taps(cmd_tx: mpsc::Sender<CarouselCommand>, cancel: CancellationToken) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            tracing::info!("stdin closed; unmounting");
            cancel.cancel();
            break;
        };
        let control = match line.trim() {
            "h" | "left" => NavControl::Left,
            "l" | "right" => NavControl::Right,
            "q" | "quit" => {
                cancel.cancel();
                break;
            }
            "" => continue,
            other => {
                tracing::warn!("unknown input {other:?}; use h/l/q");
                continue;
            }
        };
        if cmd_tx.send(CarouselCommand::Tap(control)).await.is_err() {
            break;
        }
    }
    Ok(())
}

enum HostEvent {
    Scroll(Option<ScrollTo>),
    Layout(Result<CarouselLayout, oneshot::error::RecvError>),
}

/// Ask for a layout without waiting; skipped when the command queue is full.
fn request_layout(
    cmd_tx: &mpsc::Sender<CarouselCommand>,
) -> Option<oneshot::Receiver<CarouselLayout>> {
    let (reply_tx, reply_rx) = oneshot::channel();
    cmd_tx
        .try_send(CarouselCommand::Render(reply_tx))
        .ok()
        .map(|()| reply_rx)
}

fn describe(layout: &CarouselLayout, titles: &[String]) -> String {
    let glyph = |g: &ControlGlyph, icon: &'static str| match g {
        ControlGlyph::Icon { .. } => icon,
        ControlGlyph::Blank => " ",
    };
    let strip: Vec<String> = layout
        .visible_items()
        .map(|item| {
            let title = titles.get(item.index).map_or("?", String::as_str);
            if Some(item.index) == layout.active {
                format!("[{title}]")
            } else {
                format!(" {title} ")
            }
        })
        .collect();
    format!(
        "{} {} {}",
        glyph(&layout.left.glyph, "<"),
        strip.join(""),
        glyph(&layout.right.glyph, ">")
    )
}
