use std::collections::VecDeque;

use log::{debug, info};
use storia_core::{
    driver::DriverTag,
    media::{MediaSignal, MediaSignalKind, MediaSurface},
};
use thiserror::Error;

/// Interval between simulated `timeupdate` reports.
const TIME_REPORT_MS: u64 = 250;

#[derive(Debug, Error, Eq, PartialEq)]
pub(super) enum SurfaceError {
    #[error("autoplay blocked until user interaction")]
    AutoplayBlocked,
    #[error("nothing prepared")]
    NothingPrepared,
}

#[derive(Debug)]
struct Loaded {
    tag: DriverTag,
    media: String,
    duration_ms: u64,
    position_ms: u64,
    duration_reported: bool,
    ended: bool,
}

/// Stand-in for a video element. Every clip lasts `clip_ms`; the first
/// autoplay attempt after each load is refused when `block_autoplay` is
/// set, as a browser would for unmuted or gesture-less playback.
#[derive(Debug)]
pub(super) struct SimulatedSurface {
    clip_ms: u64,
    block_autoplay: bool,
    loaded: Option<Loaded>,
    playing: bool,
    muted: bool,
    autoplay_pending: bool,
    last_advance_ms: Option<u64>,
    last_report_ms: u64,
    pending: VecDeque<MediaSignal>,
}

impl SimulatedSurface {
    pub(super) fn new(clip_ms: u64, block_autoplay: bool) -> Self {
        Self {
            clip_ms: clip_ms.max(1),
            block_autoplay,
            loaded: None,
            playing: false,
            muted: true,
            autoplay_pending: false,
            last_advance_ms: None,
            last_report_ms: 0,
            pending: VecDeque::new(),
        }
    }

    /// Plays the loaded clip forward to `now_ms`, queueing the reports a
    /// media element would fire along the way.
    pub(super) fn advance_to(&mut self, now_ms: u64) {
        let elapsed = self
            .last_advance_ms
            .map_or(0, |last| now_ms.saturating_sub(last));
        self.last_advance_ms = Some(now_ms);

        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };

        if !loaded.duration_reported {
            loaded.duration_reported = true;
            self.pending.push_back(MediaSignal::new(
                loaded.tag.clone(),
                MediaSignalKind::DurationKnown {
                    duration_sec: loaded.duration_ms as f64 / 1_000.0,
                },
            ));
        }

        if !self.playing || loaded.ended {
            return;
        }

        loaded.position_ms = (loaded.position_ms + elapsed).min(loaded.duration_ms);
        let finished = loaded.position_ms >= loaded.duration_ms;
        if finished || now_ms.saturating_sub(self.last_report_ms) >= TIME_REPORT_MS {
            self.last_report_ms = now_ms;
            self.pending.push_back(MediaSignal::new(
                loaded.tag.clone(),
                MediaSignalKind::TimeAdvanced {
                    current_sec: loaded.position_ms as f64 / 1_000.0,
                    duration_sec: loaded.duration_ms as f64 / 1_000.0,
                },
            ));
        }
        if finished {
            loaded.ended = true;
            self.playing = false;
            debug!("surface: ended media={}", loaded.media);
            self.pending
                .push_back(MediaSignal::new(loaded.tag.clone(), MediaSignalKind::Ended));
        }
    }

    pub(super) fn is_playing(&self) -> bool {
        self.playing
    }
}

impl MediaSurface for SimulatedSurface {
    type Error = SurfaceError;

    fn prepare(&mut self, tag: &DriverTag, media: &str) -> Result<(), Self::Error> {
        info!(
            "surface: load media={} panel={} muted={}",
            media, tag.panel_id, self.muted
        );
        self.loaded = Some(Loaded {
            tag: tag.clone(),
            media: media.to_string(),
            duration_ms: self.clip_ms,
            position_ms: 0,
            duration_reported: false,
            ended: false,
        });
        self.playing = false;
        self.autoplay_pending = self.block_autoplay;
        Ok(())
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn play(&mut self) -> Result<(), Self::Error> {
        if self.loaded.is_none() {
            return Err(SurfaceError::NothingPrepared);
        }
        if self.autoplay_pending {
            self.autoplay_pending = false;
            return Err(SurfaceError::AutoplayBlocked);
        }
        self.playing = true;
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(loaded) = self.loaded.take() {
            debug!(
                "surface: stop media={} at_ms={}",
                loaded.media, loaded.position_ms
            );
        }
        self.playing = false;
    }

    fn poll_signal(&mut self) -> Option<MediaSignal> {
        self.pending.pop_front()
    }
}
