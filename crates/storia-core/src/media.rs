//! Progress driver for video panels.
//!
//! A [`MediaSurface`] plays the media and reports back asynchronously
//! (duration known, time advanced, ended). [`MediaSync`] turns those reports
//! into tagged [`DriverEvent`]s and owns the mute state.

use alloc::string::String;

use log::debug;

use crate::{
    driver::{DriverEvent, DriverTag},
    progress::clamp_fraction,
};

/// What a media surface reported.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MediaSignalKind {
    DurationKnown { duration_sec: f64 },
    TimeAdvanced { current_sec: f64, duration_sec: f64 },
    Ended,
}

/// A report from the media surface, tagged with the binding it was
/// prepared under.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaSignal {
    pub tag: DriverTag,
    pub kind: MediaSignalKind,
}

impl MediaSignal {
    pub fn new(tag: DriverTag, kind: MediaSignalKind) -> Self {
        Self { tag, kind }
    }
}

/// Video playback surface owned by the presentation layer.
pub trait MediaSurface {
    type Error: core::fmt::Debug;

    /// Load `media`. Signals produced for it must carry `tag`.
    fn prepare(&mut self, tag: &DriverTag, media: &str) -> Result<(), Self::Error>;

    fn set_muted(&mut self, muted: bool);

    /// Start playback. May be refused by the environment's autoplay policy.
    fn play(&mut self) -> Result<(), Self::Error>;

    /// Stop playback of the current media. Signals already in flight may
    /// still arrive afterwards.
    fn stop(&mut self);

    /// Next pending report, if any.
    fn poll_signal(&mut self) -> Option<MediaSignal>;
}

#[derive(Clone, Debug, PartialEq)]
struct Binding {
    tag: DriverTag,
    media: String,
    duration_sec: Option<f64>,
}

/// Translates media-surface reports into driver events for the bound panel.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaSync {
    binding: Option<Binding>,
    muted: bool,
}

impl Default for MediaSync {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaSync {
    pub const fn new() -> Self {
        Self {
            binding: None,
            muted: true,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub fn tag(&self) -> Option<&DriverTag> {
        self.binding.as_ref().map(|binding| &binding.tag)
    }

    pub fn media(&self) -> Option<&str> {
        self.binding.as_ref().map(|binding| binding.media.as_str())
    }

    pub fn duration_sec(&self) -> Option<f64> {
        self.binding.as_ref().and_then(|binding| binding.duration_sec)
    }

    /// Binds new media. Mute is forced on before the surface starts
    /// preparing, then a muted autoplay is attempted; a refusal is
    /// tolerated.
    ///
    /// Fails only when the surface cannot load the media at all.
    pub fn bind<S: MediaSurface>(
        &mut self,
        tag: DriverTag,
        media: &str,
        surface: &mut S,
    ) -> Result<(), S::Error> {
        self.release(surface);

        self.muted = true;
        surface.set_muted(true);
        surface.prepare(&tag, media)?;

        debug!(
            "media: bound panel={} generation={} media={}",
            tag.panel_id, tag.generation, media
        );
        self.binding = Some(Binding {
            tag,
            media: String::from(media),
            duration_sec: None,
        });

        if let Err(err) = surface.play() {
            debug!("media: autoplay refused err={:?}", err);
        }
        Ok(())
    }

    /// Drops the binding and stops the surface. Mute goes back on, since
    /// the active media reference is gone.
    pub fn release<S: MediaSurface>(&mut self, surface: &mut S) {
        self.muted = true;
        if let Some(binding) = self.binding.take() {
            debug!(
                "media: released panel={} generation={}",
                binding.tag.panel_id, binding.tag.generation
            );
            surface.stop();
        }
    }

    /// Flips mute on the bound media. Unmuting retries playback, since the
    /// toggle counts as a user gesture; a refusal is swallowed.
    ///
    /// Returns the resulting mute state. Without bound media nothing changes.
    pub fn toggle_mute<S: MediaSurface>(&mut self, surface: &mut S) -> bool {
        if self.binding.is_none() {
            return self.muted;
        }

        self.muted = !self.muted;
        surface.set_muted(self.muted);
        if !self.muted {
            if let Err(err) = surface.play() {
                debug!("media: play after unmute refused err={:?}", err);
            }
        }
        self.muted
    }

    /// Records the media duration. Not-yet-loaded media reports `NaN` or
    /// zero; those reports are ignored.
    pub fn on_duration_known(&mut self, tag: &DriverTag, duration_sec: f64) -> bool {
        if !is_usable_duration(duration_sec) {
            return false;
        }

        match self.binding.as_mut() {
            Some(binding) if binding.tag == *tag => {
                binding.duration_sec = Some(duration_sec);
                true
            }
            _ => false,
        }
    }

    /// Converts a playback-time report into a progress event.
    pub fn on_time_advanced(
        &mut self,
        tag: &DriverTag,
        current_sec: f64,
        duration_sec: f64,
    ) -> Option<DriverEvent> {
        if !is_usable_duration(duration_sec) || !current_sec.is_finite() {
            return None;
        }

        if let Some(binding) = self.binding.as_mut().filter(|binding| binding.tag == *tag) {
            binding.duration_sec = Some(duration_sec);
        }

        let fraction = clamp_fraction((current_sec / duration_sec) as f32);
        Some(DriverEvent::progress(tag.clone(), fraction))
    }

    pub fn on_ended(&mut self, tag: &DriverTag) -> DriverEvent {
        DriverEvent::completed(tag.clone())
    }

    /// Dispatches a surface report to the matching handler.
    pub fn translate(&mut self, signal: &MediaSignal) -> Option<DriverEvent> {
        match signal.kind {
            MediaSignalKind::DurationKnown { duration_sec } => {
                self.on_duration_known(&signal.tag, duration_sec);
                None
            }
            MediaSignalKind::TimeAdvanced {
                current_sec,
                duration_sec,
            } => self.on_time_advanced(&signal.tag, current_sec, duration_sec),
            MediaSignalKind::Ended => Some(self.on_ended(&signal.tag)),
        }
    }
}

fn is_usable_duration(duration_sec: f64) -> bool {
    duration_sec.is_finite() && duration_sec > 0.0
}


#[cfg(test)]
mod tests {
    use super::{
        testing::{RecordingSurface, SurfaceCall},
        *,
    };
    use crate::driver::DriverEventKind;

    fn tag(panel: &str, generation: u32) -> DriverTag {
        DriverTag::new(panel, generation)
    }

    #[test]
    fn bind_mutes_before_preparing_and_tries_autoplay() {
        let mut surface = RecordingSurface::default();
        let mut sync = MediaSync::new();
        sync.bind(tag("v1", 1), "clip.mp4", &mut surface).unwrap();

        assert_eq!(
            surface.calls,
            [
                SurfaceCall::Muted(true),
                SurfaceCall::Prepare("clip.mp4".into()),
                SurfaceCall::Play,
            ]
        );
        assert!(sync.is_muted());
    }

    #[test]
    fn autoplay_refusal_is_swallowed() {
        let mut surface = RecordingSurface {
            refuse_play: true,
            ..Default::default()
        };
        let mut sync = MediaSync::new();
        assert!(sync.bind(tag("v1", 1), "clip.mp4", &mut surface).is_ok());
        assert!(sync.is_bound());

        assert!(!sync.toggle_mute(&mut surface));
        assert!(!surface.playing);
    }

    #[test]
    fn prepare_failure_leaves_adapter_unbound() {
        let mut surface = RecordingSurface {
            fail_prepare: true,
            ..Default::default()
        };
        let mut sync = MediaSync::new();
        assert!(sync.bind(tag("v1", 1), "clip.mp4", &mut surface).is_err());
        assert!(!sync.is_bound());
    }

    #[test]
    fn media_change_resets_mute() {
        let mut surface = RecordingSurface::default();
        let mut sync = MediaSync::new();
        sync.bind(tag("v1", 1), "a.mp4", &mut surface).unwrap();
        assert!(!sync.toggle_mute(&mut surface));
        assert!(!surface.muted);

        sync.bind(tag("v2", 2), "b.mp4", &mut surface).unwrap();
        assert!(sync.is_muted());
        assert!(surface.muted);
    }

    #[test]
    fn toggle_without_media_is_a_no_op() {
        let mut surface = RecordingSurface::default();
        let mut sync = MediaSync::new();
        assert!(sync.toggle_mute(&mut surface));
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn unusable_durations_are_ignored() {
        let mut surface = RecordingSurface::default();
        let mut sync = MediaSync::new();
        let t = tag("v1", 1);
        sync.bind(t.clone(), "a.mp4", &mut surface).unwrap();

        assert!(!sync.on_duration_known(&t, f64::NAN));
        assert!(!sync.on_duration_known(&t, 0.0));
        assert!(sync.on_time_advanced(&t, 1.0, f64::INFINITY).is_none());
        assert!(sync.on_time_advanced(&t, f64::NAN, 10.0).is_none());
        assert_eq!(sync.duration_sec(), None);

        assert!(sync.on_duration_known(&t, 10.0));
        assert_eq!(sync.duration_sec(), Some(10.0));
    }

    #[test]
    fn time_reports_become_clamped_progress() {
        let mut sync = MediaSync::new();
        let t = tag("v1", 1);

        let half = sync.on_time_advanced(&t, 5.0, 10.0).unwrap();
        assert_eq!(half.kind, DriverEventKind::Progress(0.5));
        assert_eq!(half.tag, t);

        let over = sync.on_time_advanced(&t, 12.0, 10.0).unwrap();
        assert_eq!(over.kind, DriverEventKind::Progress(1.0));
    }

    #[test]
    fn ended_always_completes_with_its_own_tag() {
        let mut sync = MediaSync::new();
        let stale = tag("old", 3);
        let event = sync.translate(&MediaSignal::new(stale.clone(), MediaSignalKind::Ended));
        assert_eq!(event, Some(DriverEvent::completed(stale)));
    }

    #[test]
    fn stale_duration_does_not_touch_current_binding() {
        let mut surface = RecordingSurface::default();
        let mut sync = MediaSync::new();
        sync.bind(tag("v2", 2), "b.mp4", &mut surface).unwrap();

        assert!(!sync.on_duration_known(&tag("v1", 1), 30.0));
        assert_eq!(sync.duration_sec(), None);
    }
}
