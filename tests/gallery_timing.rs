use std::time::Duration;

use photo_gallery::assets::{ImageRecord, Records};
use photo_gallery::events::{Frame, UserInput};
use photo_gallery::gallery::{Gallery, GalleryOptions};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;

const INTERVAL: Duration = Duration::from_secs(5);

struct Harness {
    input: mpsc::Sender<UserInput>,
    frames: mpsc::Receiver<Frame>,
    cancel: CancellationToken,
    handle: JoinHandle<anyhow::Result<()>>,
}

fn four_records() -> Records {
    Records::new(vec![
        ImageRecord::new("hero_img", "Image 1", "This is the first image in the gallery."),
        ImageRecord::new("hero_img2", "Image 2", "This is the second image in the gallery."),
        ImageRecord::new("hero_img", "Image 3", "This is the third image in the gallery."),
        ImageRecord::new("hero_img2", "Image 4", "This is the fourth image in the gallery."),
    ])
    .expect("non-empty records")
}

fn start(records: Records) -> Harness {
    let (input, input_rx) = mpsc::channel(8);
    let (frames_tx, frames) = mpsc::channel(8);
    let cancel = CancellationToken::new();
    let options = GalleryOptions {
        interval: INTERVAL,
        ..GalleryOptions::default()
    };
    let gallery = Gallery::mount(records, options, cancel.clone()).expect("valid options");
    let handle = tokio::spawn(gallery.run(input_rx, frames_tx));
    Harness {
        input,
        frames,
        cancel,
        handle,
    }
}

async fn next_frame(h: &mut Harness) -> Frame {
    h.frames.recv().await.expect("gallery stopped unexpectedly")
}

#[tokio::test(start_paused = true)]
async fn index_after_k_ticks_is_k_mod_n() {
    let mut h = start(four_records());
    let t0 = Instant::now();
    assert_eq!(next_frame(&mut h).await.view.content.key, 0);

    for k in 1..=9usize {
        let frame = next_frame(&mut h).await;
        assert_eq!(frame.view.content.key, k % 4);
        assert_eq!(frame.view.image.key, k % 4);
        let t = frame.transition.expect("tick frames carry a transition");
        assert_eq!(t.to, k % 4);
        assert_eq!(t.from, (k - 1) % 4);
        assert!(t0.elapsed() >= INTERVAL * k as u32);
    }

    h.cancel.cancel();
    h.handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn pause_halts_advance_and_close_restarts_interval() {
    let mut h = start(four_records());
    next_frame(&mut h).await;
    next_frame(&mut h).await;
    next_frame(&mut h).await;

    sleep(Duration::from_secs(3)).await;
    h.input.send(UserInput::ImageClicked).await.unwrap();
    let opened = next_frame(&mut h).await;
    let overlay = opened.view.overlay.expect("lightbox shown");
    assert_eq!(overlay.source.as_str(), "hero_img");
    assert_eq!(opened.view.content.key, 2);

    sleep(Duration::from_secs(20)).await;
    assert!(matches!(h.frames.try_recv(), Err(TryRecvError::Empty)));

    h.input.send(UserInput::BackdropClicked).await.unwrap();
    let closed = next_frame(&mut h).await;
    let closed_at = Instant::now();
    assert!(closed.view.overlay.is_none());
    assert_eq!(closed.view.content.key, 2);

    let resumed = next_frame(&mut h).await;
    assert_eq!(resumed.view.content.key, 3);
    let waited = closed_at.elapsed();
    assert!(waited >= INTERVAL, "tick fired early after close: {waited:?}");
    assert!(waited < INTERVAL + Duration::from_secs(1), "tick late: {waited:?}");

    h.cancel.cancel();
    h.handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn open_then_close_keeps_index() {
    let mut h = start(four_records());
    next_frame(&mut h).await;

    h.input.send(UserInput::ImageClicked).await.unwrap();
    let opened = next_frame(&mut h).await;
    assert_eq!(opened.view.overlay.unwrap().source.as_str(), "hero_img");

    h.input.send(UserInput::DismissClicked).await.unwrap();
    let closed = next_frame(&mut h).await;
    assert!(closed.view.overlay.is_none());
    assert_eq!(closed.view.content.key, 0);
    assert_eq!(closed.view.content.title, "Image 1");

    h.cancel.cancel();
    h.handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn redundant_close_produces_no_frame() {
    let mut h = start(four_records());
    next_frame(&mut h).await;

    h.input.send(UserInput::DismissClicked).await.unwrap();
    h.input.send(UserInput::OverlayImageClicked).await.unwrap();
    sleep(Duration::from_secs(1)).await;
    assert!(matches!(h.frames.try_recv(), Err(TryRecvError::Empty)));

    let tick = next_frame(&mut h).await;
    assert_eq!(tick.view.content.key, 1);

    h.cancel.cancel();
    h.handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn unmount_stops_all_updates() {
    let mut h = start(four_records());
    next_frame(&mut h).await;
    sleep(Duration::from_secs(2)).await;

    h.cancel.cancel();
    h.handle.await.unwrap().unwrap();

    sleep(INTERVAL * 4).await;
    assert!(h.frames.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn closed_input_keeps_cycling_until_cancelled() {
    let Harness {
        input,
        mut frames,
        cancel,
        handle,
    } = start(four_records());
    frames.recv().await.unwrap();
    drop(input);

    let frame = frames.recv().await.expect("gallery still running");
    assert_eq!(frame.view.content.key, 1);
    assert!(!handle.is_finished());

    cancel.cancel();
    handle.await.unwrap().unwrap();
    assert!(frames.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn dropping_renderer_unmounts() {
    let Harness {
        frames, handle, ..
    } = start(four_records());
    drop(frames);
    handle.await.unwrap().unwrap();
}
