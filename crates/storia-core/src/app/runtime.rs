impl<F, M, IN> StoryPlayer<F, M, IN>
where
    F: StoryFeed,
    M: MediaSurface,
    IN: InputProvider,
{
    fn collect_media_signals(&mut self) {
        while let Some(signal) = self.surface.poll_signal() {
            self.post(Message::Media(signal));
        }
    }

    fn collect_clock_events(&mut self, now_ms: u64) {
        let Some(tag) = self.active.clone() else {
            return;
        };
        if self.position.map(|position| position.driver) != Some(DriverKind::Clock) {
            return;
        }

        while let Some(event) = self.clock.poll(now_ms) {
            let event = match event {
                ClockEvent::Progress(fraction) => DriverEvent::progress(tag.clone(), fraction),
                ClockEvent::Elapsed => DriverEvent::completed(tag.clone()),
            };
            self.post(Message::Clock(event));
        }
    }

    fn drain_inbox(&mut self) {
        while let Some(message) = self.inbox.pop_front() {
            self.apply_message(message);
        }
    }

    fn apply_message(&mut self, message: Message) {
        match message {
            Message::Command(command) => self.handle_command(command),
            Message::Media(signal) => {
                if let Some(event) = self.media.translate(&signal) {
                    self.apply_driver_event(event);
                }
            }
            Message::Clock(event) => self.apply_driver_event(event),
        }
    }

    /// Applies a driver event if it belongs to the installed driver.
    fn apply_driver_event(&mut self, event: DriverEvent) {
        if self.status != PlayerStatus::Playing || self.active.as_ref() != Some(&event.tag) {
            trace!(
                "player: stale driver event panel={} generation={} {:?}",
                event.tag.panel_id, event.tag.generation, event.kind
            );
            return;
        }
        let Some(position) = self.position.as_mut() else {
            return;
        };

        match event.kind {
            DriverEventKind::Progress(fraction) => {
                let fraction = clamp_fraction(fraction);
                if fraction > position.progress {
                    position.progress = fraction;
                    self.pending_redraw = true;
                }
            }
            DriverEventKind::Completed => {
                position.progress = 1.0;
                self.panels_since_drain = self.panels_since_drain.saturating_add(1);
                debug!(
                    "player: panel complete story_index={} panel_index={}",
                    position.story_index, position.panel_index
                );
                let transition = self.advance_panel_transition();
                self.apply_transition(transition);
            }
        }
    }

    /// Installs the driver for the panel at the current position: media
    /// sync for videos with a media reference, the clock otherwise.
    fn install_driver(&mut self) {
        let Some(position) = self.position else {
            return;
        };
        let Some(panel) = self
            .feed
            .story_at(position.story_index)
            .and_then(|story| story.panel(position.panel_index))
        else {
            return;
        };

        let panel_id = panel.id.clone();
        let kind = panel.kind;
        let media = panel.media_ref().map(String::from);
        let duration_ms = self.config.panel_duration_ms(panel.duration_ms);

        self.generation = self.generation.wrapping_add(1);
        let tag = DriverTag::new(panel_id, self.generation);

        let driver = match (kind, media) {
            (PanelKind::Video, Some(media)) => {
                match self.media.bind(tag.clone(), &media, &mut self.surface) {
                    Ok(()) => DriverKind::Media,
                    Err(err) => {
                        warn!(
                            "player: media load failed panel={} err={:?}; using clock",
                            tag.panel_id, err
                        );
                        self.clock.start(duration_ms);
                        DriverKind::Clock
                    }
                }
            }
            (PanelKind::Video, None) => {
                debug!(
                    "player: video panel={} has no media; using clock",
                    tag.panel_id
                );
                self.clock.start(duration_ms);
                DriverKind::Clock
            }
            _ => {
                self.clock.start(duration_ms);
                DriverKind::Clock
            }
        };

        debug!(
            "player: driver {:?} panel={} generation={} duration_ms={}",
            driver, tag.panel_id, tag.generation, duration_ms
        );
        if let Some(position) = self.position.as_mut() {
            position.driver = driver;
        }
        self.active = Some(tag);
    }

    /// Cancels whichever driver is installed. Events it already produced
    /// are dropped by the tag check.
    fn cancel_driver(&mut self) {
        self.clock.cancel();
        self.media.release(&mut self.surface);
        self.active = None;
    }
}
