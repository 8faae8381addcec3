use std::time::Duration;

use banner_carousel::binding::{BannerBinding, TextBanner};
use banner_carousel::config::CarouselConfig;
use banner_carousel::events::{CarouselCommand, NavControl, ScrollCause, ScrollTo};
use banner_carousel::tasks::carousel;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, timeout};
use tokio_util::sync::CancellationToken;

const INTERVAL: Duration = Duration::from_secs(3);
const SLACK: Duration = Duration::from_millis(5);

fn banners(n: usize) -> Vec<TextBanner> {
    (0..n)
        .map(|i| TextBanner::new(format!("banner {i}")).with_width(300.0))
        .collect()
}

struct Harness {
    commands: mpsc::Sender<CarouselCommand>,
    scrolls: mpsc::Receiver<ScrollTo>,
    cancel: CancellationToken,
    handle: JoinHandle<anyhow::Result<()>>,
}

fn mount(binding: BannerBinding<TextBanner>) -> Harness {
    mount_with_capacity(binding, 8)
}

fn mount_with_capacity(binding: BannerBinding<TextBanner>, scroll_capacity: usize) -> Harness {
    let (commands, cmd_rx) = mpsc::channel::<CarouselCommand>(8);
    let (scroll_tx, scrolls) = mpsc::channel::<ScrollTo>(scroll_capacity);
    let cancel = CancellationToken::new();
    let cfg = CarouselConfig::default().with_auto_scroll_interval(INTERVAL);
    let handle = tokio::spawn(carousel::run(
        cfg,
        binding,
        cmd_rx,
        scroll_tx,
        cancel.clone(),
    ));
    Harness {
        commands,
        scrolls,
        cancel,
        handle,
    }
}

async fn next_scroll(rx: &mut mpsc::Receiver<ScrollTo>) -> ScrollTo {
    timeout(Duration::from_secs(30), rx.recv())
        .await
        .expect("timeout waiting for scroll")
        .expect("scroll channel closed")
}

#[tokio::test(start_paused = true)]
async fn auto_advances_once_per_interval() {
    let start = Instant::now();
    let mut h = mount(BannerBinding::constant(banners(4)));

    let first = next_scroll(&mut h.scrolls).await;
    let elapsed = start.elapsed();
    assert_eq!(first.index, 1);
    assert_eq!(first.cause, ScrollCause::AutoAdvance);
    assert!(
        elapsed >= INTERVAL && elapsed < INTERVAL + SLACK,
        "auto-advance fired at {elapsed:?}"
    );

    let second = next_scroll(&mut h.scrolls).await;
    assert_eq!(second.index, 2);
    let elapsed = start.elapsed();
    assert!(elapsed >= INTERVAL * 2 && elapsed < INTERVAL * 2 + SLACK);

    h.cancel.cancel();
    h.handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn tap_restarts_the_interval() {
    let mut h = mount(BannerBinding::constant(banners(4)));

    tokio::time::sleep(Duration::from_secs(2)).await;
    let tap_at = Instant::now();
    h.commands
        .send(CarouselCommand::Tap(NavControl::Right))
        .await
        .unwrap();

    let tapped = next_scroll(&mut h.scrolls).await;
    assert_eq!(tapped.index, 1);
    assert_eq!(tapped.cause, ScrollCause::Tap(NavControl::Right));

    let auto = next_scroll(&mut h.scrolls).await;
    let since_tap = tap_at.elapsed();
    assert_eq!(auto.index, 2);
    assert_eq!(auto.cause, ScrollCause::AutoAdvance);
    assert!(
        since_tap >= INTERVAL && since_tap < INTERVAL + SLACK,
        "auto-advance should follow the tap by one interval, got {since_tap:?}"
    );

    h.cancel.cancel();
    h.handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn left_tap_wraps_and_renders() {
    let mut h = mount(BannerBinding::constant(banners(4)));

    h.commands
        .send(CarouselCommand::Tap(NavControl::Left))
        .await
        .unwrap();
    let scroll = next_scroll(&mut h.scrolls).await;
    assert_eq!(scroll.index, 3);

    let (reply_tx, reply_rx) = oneshot::channel();
    h.commands
        .send(CarouselCommand::Render(reply_tx))
        .await
        .unwrap();
    let layout = reply_rx.await.expect("render reply");
    assert_eq!(layout.active, Some(3));
    assert_eq!(layout.items.len(), 4);
    assert_eq!(layout.height, CarouselConfig::DEFAULT_HEIGHT);

    h.cancel.cancel();
    h.handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn unmount_stops_all_ticks() {
    let mut h = mount(BannerBinding::constant(banners(4)));

    let first = next_scroll(&mut h.scrolls).await;
    assert_eq!(first.index, 1);

    h.cancel.cancel();
    h.handle.await.unwrap().unwrap();

    tokio::time::sleep(INTERVAL * 4).await;
    assert!(
        h.scrolls.recv().await.is_none(),
        "no scroll may be delivered after unmount"
    );
}

#[tokio::test(start_paused = true)]
async fn shrinking_list_recenters() {
    let (tx, binding) = BannerBinding::channel(banners(5));
    let mut h = mount(binding);

    h.commands
        .send(CarouselCommand::Tap(NavControl::Left))
        .await
        .unwrap();
    assert_eq!(next_scroll(&mut h.scrolls).await.index, 4);

    tx.send(banners(2)).unwrap();
    let scroll = next_scroll(&mut h.scrolls).await;
    assert_eq!(scroll.index, 1);
    assert_eq!(scroll.cause, ScrollCause::ListChanged);

    h.cancel.cancel();
    h.handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn empty_list_never_scrolls() {
    let mut h = mount(BannerBinding::constant(Vec::new()));

    h.commands
        .send(CarouselCommand::Tap(NavControl::Right))
        .await
        .unwrap();
    let nothing = timeout(INTERVAL * 3, h.scrolls.recv()).await;
    assert!(nothing.is_err(), "empty carousel must stay still");

    h.cancel.cancel();
    h.handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn keeps_advancing_without_a_command_handle() {
    let Harness {
        commands,
        mut scrolls,
        cancel,
        handle,
    } = mount(BannerBinding::constant(banners(3)));
    drop(commands);

    assert_eq!(next_scroll(&mut scrolls).await.index, 1);
    assert_eq!(next_scroll(&mut scrolls).await.index, 2);
    assert_eq!(next_scroll(&mut scrolls).await.index, 0);

    cancel.cancel();
    handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn stops_when_host_drops_scroll_receiver() {
    let Harness {
        commands: _commands,
        scrolls,
        cancel: _cancel,
        handle,
    } = mount(BannerBinding::constant(banners(3)));
    drop(scrolls);

    timeout(INTERVAL * 2, handle)
        .await
        .expect("carousel should exit after its scroll receiver closes")
        .unwrap()
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn cancel_while_scroll_channel_is_full() {
    let mut h = mount_with_capacity(BannerBinding::constant(banners(4)), 1);

    for _ in 0..3 {
        h.commands
            .send(CarouselCommand::Tap(NavControl::Right))
            .await
            .unwrap();
    }
    // let the carousel fill the channel and block on the next scroll
    tokio::task::yield_now().await;
    tokio::time::sleep(Duration::from_millis(10)).await;

    h.cancel.cancel();
    timeout(Duration::from_secs(10), h.handle)
        .await
        .expect("carousel must unmount while blocked on a full scroll channel")
        .unwrap()
        .unwrap();

    assert_eq!(h.scrolls.recv().await.map(|s| s.index), Some(1));
    assert!(
        h.scrolls.recv().await.is_none(),
        "no scroll may be delivered after unmount"
    );
}
