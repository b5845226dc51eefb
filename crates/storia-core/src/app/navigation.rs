impl<F, M, IN> StoryPlayer<F, M, IN>
where
    F: StoryFeed,
    M: MediaSurface,
    IN: InputProvider,
{
    fn advance_panel_transition(&self) -> Transition {
        let Some(position) = self.position else {
            return Transition::Stay;
        };
        if self.status == PlayerStatus::Finished {
            return Transition::Stay;
        }

        let panel_count = self.story_panel_count(position.story_index);
        if position.panel_index + 1 < panel_count {
            return Transition::Move {
                story_index: position.story_index,
                panel_index: position.panel_index + 1,
                restart: false,
            };
        }

        self.advance_story_transition()
    }

    fn advance_story_transition(&self) -> Transition {
        let Some(position) = self.position else {
            return Transition::Stay;
        };
        if self.status == PlayerStatus::Finished {
            return Transition::Stay;
        }

        match self.next_playable_story(position.story_index + 1) {
            Some(story_index) => Transition::Move {
                story_index,
                panel_index: 0,
                restart: false,
            },
            None => Transition::Finish,
        }
    }

    fn retreat_panel_transition(&self) -> Transition {
        let Some(position) = self.position else {
            return Transition::Stay;
        };

        if position.panel_index > 0 {
            return Transition::Move {
                story_index: position.story_index,
                panel_index: position.panel_index - 1,
                restart: false,
            };
        }

        match self.previous_playable_story(position.story_index) {
            Some(story_index) => Transition::Move {
                story_index,
                panel_index: self.story_panel_count(story_index).saturating_sub(1),
                restart: false,
            },
            None if self.status == PlayerStatus::Finished => Transition::Move {
                story_index: position.story_index,
                panel_index: position.panel_index,
                restart: true,
            },
            None => Transition::Stay,
        }
    }

    fn retreat_story_transition(&self) -> Transition {
        let Some(position) = self.position else {
            return Transition::Stay;
        };

        let story_index = self
            .previous_playable_story(position.story_index)
            .unwrap_or(position.story_index);
        Transition::Move {
            story_index,
            panel_index: 0,
            restart: true,
        }
    }

    fn jump_transition(&self, story_id: &str, panel_index: usize) -> Transition {
        let Some(story_index) = self.feed.story_index_of(story_id) else {
            debug!("player: jump to unknown story={}", story_id);
            return Transition::Stay;
        };

        let panel_count = self.story_panel_count(story_index);
        if panel_count == 0 {
            debug!("player: jump to story={} without panels", story_id);
            return Transition::Stay;
        }

        let clamped = panel_index.min(panel_count - 1);
        if clamped != panel_index {
            debug!(
                "player: jump panel_index={} clamped to {} story={}",
                panel_index, clamped, story_id
            );
        }
        Transition::Move {
            story_index,
            panel_index: clamped,
            restart: true,
        }
    }

    fn apply_transition(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::Finish => {
                if self.status == PlayerStatus::Finished {
                    return;
                }
                self.cancel_driver();
                self.status = PlayerStatus::Finished;
                self.emit(PlayerSignal::Finished);
                self.pending_redraw = true;
                debug!("player: finished");
            }
            Transition::Move {
                story_index,
                panel_index,
                restart,
            } => {
                let unchanged = self.position.is_some_and(|position| {
                    position.story_index == story_index && position.panel_index == panel_index
                });
                if unchanged && !restart && self.status == PlayerStatus::Playing {
                    return;
                }

                self.cancel_driver();
                self.position = Some(PlaybackPosition {
                    story_index,
                    panel_index,
                    progress: 0.0,
                    driver: DriverKind::Clock,
                });
                self.status = PlayerStatus::Playing;
                self.install_driver();
                self.emit(PlayerSignal::PositionChanged {
                    story_index,
                    panel_index,
                });
                self.pending_redraw = true;
                debug!(
                    "player: position story_index={} panel_index={}",
                    story_index, panel_index
                );
            }
        }
    }

    fn story_panel_count(&self, story_index: usize) -> usize {
        self.feed
            .story_at(story_index)
            .map_or(0, Story::panel_count)
    }

    /// First story at or after `from` that has panels.
    fn next_playable_story(&self, from: usize) -> Option<usize> {
        (from..self.feed.story_count()).find(|&index| self.story_panel_count(index) > 0)
    }

    /// Closest story before `before` that has panels.
    fn previous_playable_story(&self, before: usize) -> Option<usize> {
        (0..before)
            .rev()
            .find(|&index| self.story_panel_count(index) > 0)
    }
}
