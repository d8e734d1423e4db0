use crate::{Episode, PlayerAction, PlayerConfig};
use log::{debug, info, warn};
use rand::Rng;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Everything a view needs to render the player.
pub struct PlaybackState {
    pub(crate) playlist: Arc<[Episode]>,
    pub(crate) current_index: usize,

    pub(crate) is_playing: bool,
    pub(crate) is_looping: bool,
    pub(crate) is_shuffling: bool,
}

impl PlaybackState {
    pub fn new() -> Self {
        PlaybackState {
            playlist: Arc::from(Vec::new()),
            current_index: 0,
            is_playing: false,
            is_looping: false,
            is_shuffling: false,
        }
    }

    pub fn playlist(&self) -> &[Episode] {
        &self.playlist
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.playlist.get(self.current_index)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    pub fn has_previous_episode(&self) -> bool {
        self.current_index > 0
    }

    /// Always true while shuffling, since "next" draws a new index instead of advancing.
    pub fn has_next_episode(&self) -> bool {
        self.is_shuffling || self.current_index + 1 < self.playlist.len()
    }

    fn next_episode<R: Rng>(&mut self, config: &PlayerConfig, rng: &mut R) {
        if self.is_shuffling {
            if self.playlist.is_empty() {
                return;
            }
            self.current_index = rng.gen_range(0..self.playlist.len());
            if config.shuffle_resumes_playback {
                self.is_playing = true;
            }
        } else if self.has_next_episode() {
            self.current_index += 1;
            self.is_playing = true;
        }
    }

    fn previous_episode(&mut self) {
        if self.has_previous_episode() {
            self.current_index -= 1;
            self.is_playing = true;
        }
    }

    fn clear(&mut self) {
        self.playlist = Arc::from(Vec::new());
        self.current_index = 0;
        self.is_playing = false;
    }

    pub(crate) fn apply<R: Rng>(
        &self,
        actions: Vec<PlayerAction>,
        config: &PlayerConfig,
        rng: &mut R,
    ) -> PlaybackState {
        let mut next = self.clone();

        for action in actions {
            debug!("Applying {:?}", action);

            match action {
                PlayerAction::PlaySingle(episode) => {
                    info!("Playing {}", episode.id());
                    next.playlist = Arc::from(vec![episode]);
                    next.current_index = 0;
                    next.is_playing = true;
                }
                PlayerAction::PlayList { list, index } => {
                    if index >= list.len() {
                        warn!(
                            "Ignoring playlist of {} with out-of-range index {}",
                            list.len(),
                            index
                        );
                        continue;
                    }
                    info!("Playing playlist of {} from {}", list.len(), index);
                    next.playlist = Arc::from(list);
                    next.current_index = index;
                    next.is_playing = true;
                }
                PlayerAction::TogglePlay => {
                    next.is_playing = !next.is_playing;
                }
                PlayerAction::SetPlayingState(is_playing) => {
                    next.is_playing = is_playing;
                }
                PlayerAction::ToggleLoop => {
                    next.is_looping = !next.is_looping;
                }
                PlayerAction::ToggleShuffle => {
                    next.is_shuffling = !next.is_shuffling;
                }
                PlayerAction::NextEpisode => {
                    next.next_episode(config, rng);
                }
                PlayerAction::PreviousEpisode => {
                    next.previous_episode();
                }
                PlayerAction::ClearPlayerState => {
                    info!("Clearing player");
                    next.clear();
                }
                PlayerAction::EpisodeEnded => {
                    if next.has_next_episode() {
                        next.next_episode(config, rng);
                    } else {
                        info!("Playlist finished");
                        next.clear();
                    }
                }
            }
        }

        next
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState::new()
    }
}
