//! The auto-rotating gallery component.
//!
//! A `Gallery` owns its state machine and, while cycling, one `TickTimer`.
//! Opening the lightbox drops the timer; closing it arms a fresh one, so the
//! interval always restarts from zero on re-entering the cycling state.

pub mod state;
pub mod timer;
pub mod view;

use std::time::Duration;

use anyhow::{Result, ensure};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::assets::Records;
use crate::config::Configuration;
use crate::events::{Frame, Tick, UserInput};

use state::{GallerySM, GalleryState};
use timer::TickTimer;
use view::{GalleryView, Heading, Presence, Transition};

const TICK_CHANNEL_CAPACITY: usize = 4;

#[derive(Debug, Clone)]
pub struct GalleryOptions {
    pub interval: Duration,
    pub transition: Duration,
    pub heading: Heading,
}

impl From<&Configuration> for GalleryOptions {
    fn from(cfg: &Configuration) -> Self {
        Self {
            interval: cfg.interval,
            transition: cfg.transition.duration,
            heading: Heading::from(&cfg.heading),
        }
    }
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self::from(&Configuration::default())
    }
}

pub struct Gallery {
    records: Records,
    heading: Heading,
    interval: Duration,
    sm: GallerySM,
    presence: Presence,
    timer: Option<TickTimer>,
    next_generation: u64,
    tick_tx: mpsc::Sender<Tick>,
    tick_rx: mpsc::Receiver<Tick>,
    cancel: CancellationToken,
}

impl Gallery {
    /// Create the component in the cycling state and arm its timer.
    ///
    /// Must be called from within a tokio runtime. Cancelling `cancel`
    /// unmounts the gallery. Fails when `options.interval` is zero.
    pub fn mount(
        records: Records,
        options: GalleryOptions,
        cancel: CancellationToken,
    ) -> Result<Self> {
        ensure!(
            !options.interval.is_zero(),
            "gallery interval must be greater than zero"
        );
        let (tick_tx, tick_rx) = mpsc::channel(TICK_CHANNEL_CAPACITY);
        let mut presence = Presence::new(options.transition);
        presence.observe(0);
        let mut gallery = Self {
            sm: GallerySM::new(records.count()),
            records,
            heading: options.heading,
            interval: options.interval,
            presence,
            timer: None,
            next_generation: 0,
            tick_tx,
            tick_rx,
            cancel,
        };
        gallery.arm_timer();
        info!(
            records = gallery.records.count(),
            interval_ms = gallery.interval.as_millis() as u64,
            "gallery mounted"
        );
        Ok(gallery)
    }

    pub fn state(&self) -> &GalleryState {
        self.sm.current()
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    pub fn view(&self) -> GalleryView {
        GalleryView::compose(&self.heading, &self.records, self.sm.current())
    }

    pub fn is_timer_active(&self) -> bool {
        self.timer.as_ref().is_some_and(TickTimer::is_active)
    }

    /// Map a pointer event onto `open`/`close`.
    pub fn handle_input(&mut self, input: UserInput) -> Option<Frame> {
        debug!(?input, "user input");
        match input {
            UserInput::ImageClicked => self.open(),
            UserInput::BackdropClicked
            | UserInput::OverlayImageClicked
            | UserInput::DismissClicked => self.close(),
        }
    }

    /// Enlarge the record under the cursor and pause advancement.
    pub fn open(&mut self) -> Option<Frame> {
        let index = self.sm.current().current_index();
        let source = self.records.at(index).source.clone();
        self.sm.on_open(source.clone())?;
        self.disarm_timer();
        info!(index, source = %source, "lightbox opened");
        Some(self.frame(None))
    }

    /// Dismiss the lightbox and restart the interval from zero.
    pub fn close(&mut self) -> Option<Frame> {
        self.sm.on_close()?;
        self.arm_timer();
        info!(index = self.sm.current().current_index(), "lightbox closed");
        Some(self.frame(None))
    }

    /// Apply one timer tick; ticks from a disarmed timer are discarded.
    pub fn handle_tick(&mut self, tick: Tick) -> Option<Frame> {
        let armed = self.timer.as_ref().map(TickTimer::generation);
        if armed != Some(tick.generation) {
            debug!(generation = tick.generation, ?armed, "dropping stale tick");
            return None;
        }
        let index = self.sm.on_tick()?;
        let transition = self.presence.observe(index)?;
        let record = self.records.at(index);
        info!(index, title = %record.title, "gallery advanced");
        Some(self.frame(Some(transition)))
    }

    /// Cancel any pending timer and tear the component down.
    pub fn unmount(mut self) {
        self.disarm_timer();
        info!("gallery unmounted");
    }

    /// Drive the component until cancelled or until the renderer goes away.
    ///
    /// The current view is sent first; afterwards a frame is sent for every
    /// visible change. A closed input channel only stops input handling; the
    /// gallery keeps cycling.
    pub async fn run(
        mut self,
        mut input_rx: mpsc::Receiver<UserInput>,
        frames_tx: mpsc::Sender<Frame>,
    ) -> Result<()> {
        let cancel = self.cancel.clone();
        let mut input_open = true;
        if frames_tx.send(self.frame(None)).await.is_err() {
            warn!("renderer channel closed before first frame");
            self.unmount();
            return Ok(());
        }

        loop {
            let frame = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                maybe_input = input_rx.recv(), if input_open => match maybe_input {
                    Some(input) => self.handle_input(input),
                    None => {
                        debug!("input channel closed; continuing without input");
                        input_open = false;
                        None
                    }
                },
                Some(tick) = self.tick_rx.recv() => self.handle_tick(tick),
            };

            if let Some(frame) = frame {
                if frames_tx.send(frame).await.is_err() {
                    warn!("renderer channel closed");
                    break;
                }
            }
        }

        self.unmount();
        Ok(())
    }

    fn frame(&self, transition: Option<Transition>) -> Frame {
        Frame {
            view: self.view(),
            transition,
        }
    }

    fn arm_timer(&mut self) {
        let generation = self.next_generation;
        self.next_generation += 1;
        // Replacing the old timer drops it, which cancels it.
        self.timer = Some(TickTimer::start(
            self.interval,
            generation,
            self.tick_tx.clone(),
            &self.cancel,
        ));
    }

    fn disarm_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }
}
