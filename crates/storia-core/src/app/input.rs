impl<F, M, IN> StoryPlayer<F, M, IN>
where
    F: StoryFeed,
    M: MediaSurface,
    IN: InputProvider,
{
    /// Queues a message for the next tick. When the queue is full, what is
    /// already queued is applied first so arrival order is kept.
    pub fn post(&mut self, message: Message) {
        if self.inbox.is_full() {
            warn!("player: inbox full, applying queued messages early");
            self.drain_inbox();
        }
        if let Err(message) = self.inbox.push_back(message) {
            // Only reachable if draining re-filled the queue.
            self.apply_message(message);
        }
    }

    pub fn post_command(&mut self, command: Command) {
        self.post(Message::Command(command));
    }

    /// Next panel, or the next story's first panel after the last one.
    pub fn advance_panel(&mut self) {
        self.handle_command(Command::NextPanel);
    }

    /// Previous panel, or the previous story's last panel before the first.
    pub fn retreat_panel(&mut self) {
        self.handle_command(Command::PrevPanel);
    }

    pub fn advance_story(&mut self) {
        self.handle_command(Command::NextStory);
    }

    pub fn retreat_story(&mut self) {
        self.handle_command(Command::PrevStory);
    }

    /// Jumps to `panel_index` of `story_id`, clamped to the story's panels.
    /// Progress always restarts, even for the current panel.
    pub fn jump_to(&mut self, story_id: &str, panel_index: usize) {
        self.handle_command(Command::JumpTo {
            story_id: String::from(story_id),
            panel_index,
        });
    }

    pub fn toggle_mute(&mut self) {
        self.handle_command(Command::ToggleMute);
    }

    pub fn close(&mut self) {
        self.handle_command(Command::Close);
    }

    pub fn handle_command(&mut self, command: Command) {
        match self.status {
            PlayerStatus::Closed => {
                trace!("player: closed, ignoring {:?}", command);
                return;
            }
            PlayerStatus::Empty if command != Command::Close => {
                trace!("player: empty, ignoring {:?}", command);
                return;
            }
            _ => {}
        }

        debug!("player: command {:?}", command);
        match command {
            Command::NextPanel => {
                let transition = self.advance_panel_transition();
                self.apply_transition(transition);
            }
            Command::PrevPanel => {
                let transition = self.retreat_panel_transition();
                self.apply_transition(transition);
            }
            Command::NextStory => {
                let transition = self.advance_story_transition();
                self.apply_transition(transition);
            }
            Command::PrevStory => {
                let transition = self.retreat_story_transition();
                self.apply_transition(transition);
            }
            Command::JumpTo {
                story_id,
                panel_index,
            } => {
                let transition = self.jump_transition(&story_id, panel_index);
                self.apply_transition(transition);
            }
            Command::ToggleMute => {
                if self.status == PlayerStatus::Playing {
                    let muted = self.media.toggle_mute(&mut self.surface);
                    debug!("player: muted={}", muted);
                    self.pending_redraw = true;
                }
            }
            Command::Close => self.close_viewer(),
        }
    }

    fn process_inputs(&mut self) {
        loop {
            match self.input.poll_event() {
                Ok(Some(event)) => match event.command_with(&self.gestures) {
                    Some(command) => self.post(Message::Command(command)),
                    None => trace!("player: unmapped input {:?}", event),
                },
                Ok(None) => break,
                Err(_) => {
                    warn!("player: input provider failed");
                    break;
                }
            }
        }
    }

    fn close_viewer(&mut self) {
        self.cancel_driver();
        self.position = None;
        self.status = PlayerStatus::Closed;
        self.inbox.clear();
        self.emit(PlayerSignal::Closed);
        self.pending_redraw = true;
        debug!("player: closed");
    }
}
