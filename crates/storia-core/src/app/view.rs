impl<F, M, IN> StoryPlayer<F, M, IN>
where
    F: StoryFeed,
    M: MediaSurface,
    IN: InputProvider,
{
    /// Opens the viewer on `start_story_id`, or on the first story with
    /// panels when the id is absent or unknown.
    pub fn new(
        feed: F,
        surface: M,
        input: IN,
        config: PlayerConfig,
        start_story_id: Option<&str>,
    ) -> Self {
        let config = config.normalized();

        let mut player = Self {
            feed,
            surface,
            input,
            config,
            gestures: GestureConfig::default(),
            status: PlayerStatus::Empty,
            position: None,
            clock: PlaybackClock::new(config.tick_ms),
            media: MediaSync::new(),
            active: None,
            generation: 0,
            inbox: Deque::new(),
            outbox: Deque::new(),
            pending_redraw: true,
            panels_since_drain: 0,
        };

        let seeded = start_story_id
            .and_then(|id| player.feed.story_index_of(id))
            .filter(|&index| player.story_panel_count(index) > 0);
        let start = seeded.or_else(|| player.next_playable_story(0));

        match start {
            Some(story_index) => {
                debug!(
                    "player: open story_index={} requested={:?}",
                    story_index, start_story_id
                );
                player.apply_transition(Transition::Move {
                    story_index,
                    panel_index: 0,
                    restart: true,
                });
            }
            None => debug!("player: open with no playable stories"),
        }

        player
    }

    pub fn with_gestures(mut self, gestures: GestureConfig) -> Self {
        self.gestures = gestures;
        self
    }

    /// Runs one step of the event loop: polls input, media reports and the
    /// clock, then applies everything queued in arrival order.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        self.process_inputs();
        self.collect_media_signals();
        self.collect_clock_events(now_ms);
        self.drain_inbox();

        // A driver installed while draining is anchored to this tick.
        self.collect_clock_events(now_ms);
        self.drain_inbox();

        if self.pending_redraw {
            self.pending_redraw = false;
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    pub fn with_screen<R, G>(&self, f: G) -> R
    where
        G: FnOnce(Screen<'_>) -> R,
    {
        let Some(position) = self.position else {
            return f(match self.status {
                PlayerStatus::Closed => Screen::Closed,
                _ => Screen::Empty,
            });
        };

        let Some(story) = self.feed.story_at(position.story_index) else {
            return f(Screen::Empty);
        };
        let Some(panel) = story.panel(position.panel_index) else {
            return f(Screen::Empty);
        };

        let fills = segments(story.panel_count(), position.panel_index, position.progress);
        let counter = counter_label(position.panel_index, story.panel_count());
        let view = PlaybackView {
            story,
            panel,
            story_index: position.story_index,
            panel_index: position.panel_index,
            progress: position.progress,
            segments: &fills,
            counter: &counter,
            muted: self.media.is_muted(),
            show_mute: position.driver == DriverKind::Media && self.media.is_bound(),
            driver: position.driver,
        };

        match self.status {
            PlayerStatus::Finished => f(Screen::Finished(view)),
            _ => f(Screen::Playing(view)),
        }
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn position(&self) -> Option<PlaybackPosition> {
        self.position
    }

    pub fn is_muted(&self) -> bool {
        self.media.is_muted()
    }

    pub fn config(&self) -> PlayerConfig {
        self.config
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    pub fn current_story(&self) -> Option<&Story> {
        self.position
            .and_then(|position| self.feed.story_at(position.story_index))
    }

    /// Tag of the installed driver; events carrying any other tag are
    /// dropped.
    pub fn active_tag(&self) -> Option<&DriverTag> {
        self.active.as_ref()
    }

    pub fn with_surface_mut<R, G>(&mut self, f: G) -> R
    where
        G: FnOnce(&mut M) -> R,
    {
        f(&mut self.surface)
    }

    pub fn with_input_mut<R, G>(&mut self, f: G) -> R
    where
        G: FnOnce(&mut IN) -> R,
    {
        f(&mut self.input)
    }

    /// Takes every queued notification, oldest first.
    pub fn drain_signals(&mut self) -> Vec<PlayerSignal> {
        let mut out = Vec::with_capacity(self.outbox.len());
        while let Some(signal) = self.outbox.pop_front() {
            out.push(signal);
        }
        out
    }

    /// Panels completed by their driver since the last call.
    pub fn drain_completed_panels(&mut self) -> u32 {
        let count = self.panels_since_drain;
        self.panels_since_drain = 0;
        count
    }

    fn emit(&mut self, signal: PlayerSignal) {
        if self.outbox.is_full() {
            if let Some(dropped) = self.outbox.pop_front() {
                trace!("player: outbox full, dropped {:?}", dropped);
            }
        }
        let _ = self.outbox.push_back(signal);
    }
}
