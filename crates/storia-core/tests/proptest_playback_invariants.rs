//! Property-based invariant tests for progress segments, the playback clock
//! and the story player.
//!
//! 1. Segment fills have one entry per panel and are non-increasing.
//! 2. Segments before the active panel are full, after it empty.
//! 3. A clock run emits exactly `emission_count` progress values, strictly
//!    increasing, ending at 1.0 and followed by one `Elapsed`.
//! 4. The emitted sequence does not depend on how often the clock is polled.
//! 5. Any command sequence keeps the player's position inside the feed.

use std::collections::VecDeque;

use proptest::prelude::*;
use storia_core::{
    app::{PlayerConfig, PlayerStatus, StoryPlayer},
    clock::{ClockEvent, PlaybackClock},
    content::{StaticFeed, StoryFeed},
    driver::DriverTag,
    input::{Command, mock::MockInput},
    media::{MediaSignal, MediaSurface},
    progress::segments,
};

// ── Helpers ─────────────────────────────────────────────────────────────

/// Surface that accepts everything and reports nothing.
#[derive(Default)]
struct SilentSurface {
    pending: VecDeque<MediaSignal>,
}

impl MediaSurface for SilentSurface {
    type Error = ();

    fn prepare(&mut self, _tag: &DriverTag, _media: &str) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_muted(&mut self, _muted: bool) {}

    fn play(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn stop(&mut self) {}

    fn poll_signal(&mut self) -> Option<MediaSignal> {
        self.pending.pop_front()
    }
}

/// Runs a clock to completion, polling every `stride_ms`.
fn run_clock(duration_ms: u32, tick_ms: u32, stride_ms: u64) -> Vec<ClockEvent> {
    let mut clock = PlaybackClock::new(tick_ms);
    clock.start(duration_ms);

    let mut events = Vec::new();
    let mut now = 0u64;
    let end = duration_ms as u64 + stride_ms;
    while now <= end {
        while let Some(event) = clock.poll(now) {
            events.push(event);
        }
        now += stride_ms;
    }
    while let Some(event) = clock.poll(now) {
        events.push(event);
    }
    events
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::NextPanel),
        Just(Command::PrevPanel),
        Just(Command::NextStory),
        Just(Command::PrevStory),
        Just(Command::ToggleMute),
        (prop_oneof![Just("harbour"), Just("market"), Just("missing")], 0usize..8).prop_map(
            |(story_id, panel_index)| Command::JumpTo {
                story_id: story_id.to_string(),
                panel_index,
            }
        ),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Segment shape
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn segments_are_full_then_partial_then_empty(
        total in 0usize..64,
        current in 0usize..64,
        progress in -2.0f32..3.0,
    ) {
        let fills = segments(total, current, progress);
        prop_assert_eq!(fills.len(), total);

        for (index, fill) in fills.iter().copied().enumerate() {
            prop_assert!((0.0..=1.0).contains(&fill), "fill {} out of range at {}", fill, index);
            if index < current {
                prop_assert_eq!(fill, 1.0);
            } else if index > current {
                prop_assert_eq!(fill, 0.0);
            }
        }
        for pair in fills.windows(2) {
            prop_assert!(pair[0] >= pair[1], "fills increase: {:?}", fills);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Clock emission count and ordering
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clock_emits_expected_sequence(
        duration_ms in 1u32..20_000,
        tick_ms in 1u32..500,
        stride_ms in 1u64..1_000,
    ) {
        let events = run_clock(duration_ms, tick_ms, stride_ms);
        let expected = PlaybackClock::emission_count(duration_ms, tick_ms) as usize;

        prop_assert_eq!(events.len(), expected + 1);
        prop_assert_eq!(events.last(), Some(&ClockEvent::Elapsed));

        let fractions: Vec<f32> = events
            .iter()
            .filter_map(|event| match event {
                ClockEvent::Progress(fraction) => Some(*fraction),
                ClockEvent::Elapsed => None,
            })
            .collect();
        prop_assert_eq!(fractions.len(), expected);
        prop_assert_eq!(fractions.last().copied(), Some(1.0));
        for pair in fractions.windows(2) {
            prop_assert!(pair[0] < pair[1], "progress not increasing: {:?}", pair);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Polling granularity does not change the emissions
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clock_is_deterministic_under_any_stride(
        duration_ms in 1u32..10_000,
        tick_ms in 1u32..250,
        coarse in 1u64..2_000,
    ) {
        let fine = run_clock(duration_ms, tick_ms, 1);
        let coarse = run_clock(duration_ms, tick_ms, coarse);
        prop_assert_eq!(fine, coarse);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Player position stays inside the feed
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn navigation_keeps_position_in_bounds(
        commands in prop::collection::vec((command_strategy(), 0u64..3_000), 0..60),
    ) {
        let feed = StaticFeed::sample();
        let mut player = StoryPlayer::new(
            feed,
            SilentSurface::default(),
            MockInput::new(),
            PlayerConfig::default(),
            None,
        );

        let mut now = 0u64;
        for (command, advance_ms) in commands {
            player.post_command(command);
            now += advance_ms;
            let _ = player.tick(now);

            let position = player.position();
            match player.status() {
                PlayerStatus::Playing | PlayerStatus::Finished => {
                    let position = position.expect("playing without a position");
                    let story = player
                        .feed()
                        .story_at(position.story_index)
                        .expect("story index out of range");
                    prop_assert!(position.panel_index < story.panel_count());
                    prop_assert!((0.0..=1.0).contains(&position.progress));
                }
                PlayerStatus::Empty | PlayerStatus::Closed => prop_assert!(position.is_none()),
            }
        }
    }
}
