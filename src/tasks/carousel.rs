use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::binding::{BannerBinding, BannerContent};
use crate::carousel::Carousel;
use crate::config::CarouselConfig;
use crate::events::{CarouselCommand, ScrollTo};

/// Host a mounted carousel until `cancel` fires.
///
/// Rules:
/// - Commands and timer ticks are handled one at a time on this task.
/// - A pending command is always handled before a tick that is due at the
///   same moment, so a tap's timer reset wins over a stale tick.
/// - Every index change is sent to `scrolls` exactly once.
/// - Cancellation unmounts the carousel, even while blocked on a full
///   `scrolls` channel; nothing is sent afterwards and `scrolls` is closed
///   when this returns.
pub async fn run<B>(
    config: CarouselConfig,
    banners: BannerBinding<B>,
    mut commands: Receiver<CarouselCommand>,
    scrolls: Sender<ScrollTo>,
    cancel: CancellationToken,
) -> Result<()>
where
    B: BannerContent + Send + Sync + 'static,
{
    let mut watch = banners.clone();
    let mut carousel = Carousel::new(config, banners);
    let mut banners_live = true;
    let mut commands_live = true;

    carousel.mount(Instant::now());

    loop {
        let deadline = carousel.next_deadline();
        let scroll = select! {
            biased;

            _ = cancel.cancelled() => break,

            maybe_cmd = commands.recv(), if commands_live => {
                match maybe_cmd {
                    Some(CarouselCommand::Tap(control)) => carousel.tap(control, Instant::now()),
                    Some(CarouselCommand::Resize { width }) => {
                        debug!(width, "viewport resized");
                        carousel.resize(width);
                        None
                    }
                    Some(CarouselCommand::Render(reply)) => {
                        let _ = reply.send(carousel.render(Instant::now()));
                        None
                    }
                    None => {
                        // Host dropped its command handle; keep auto-advancing.
                        commands_live = false;
                        None
                    }
                }
            }

            changed = watch.changed(), if banners_live => {
                match changed {
                    Ok(()) => carousel.on_banners_changed(Instant::now()),
                    Err(_) => {
                        debug!("banner list owner dropped; list is now fixed");
                        banners_live = false;
                        None
                    }
                }
            }

            _ = async {
                match deadline {
                    Some(at) => sleep_until(at).await,
                    None => std::future::pending::<()>().await,
                }
            } => carousel.on_timer(Instant::now()),
        };

        if let Some(scroll) = scroll {
            // a full channel must not hold off unmount
            select! {
                biased;

                _ = cancel.cancelled() => break,

                res = scrolls.send(scroll) => {
                    if res.is_err() {
                        warn!("scroll receiver closed");
                        break;
                    }
                }
            }
        }
    }

    carousel.unmount();
    Ok(())
}
