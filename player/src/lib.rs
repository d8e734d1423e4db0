use futures::channel::mpsc::Receiver as FReceiver;
use log::{debug, info};
use state::{Episode, PlaybackController};
use std::sync::Arc;

mod simulated;

pub use simulated::SimulatedBackend;

/// Notifications raised by the media resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    Play,
    Pause,
    /// Reached the end of the source. Not raised while looping.
    Ended,
    MetadataLoaded { duration: u64 },
    TimeUpdate { position: u64 },
}

/// The thing that actually makes sound.
pub trait MediaBackend {
    fn load(&mut self, episode: &Episode);
    fn unload(&mut self);
    fn play(&mut self);
    fn pause(&mut self);
    fn set_looping(&mut self, looping: bool);
    fn seek(&mut self, position: u64);

    fn poll_event(&mut self) -> Option<MediaEvent>;
}

/// Keeps a media backend in step with a [`PlaybackController`].
pub struct Player<B: MediaBackend> {
    controller: Arc<PlaybackController>,
    updates: FReceiver<()>,
    backend: B,

    loaded_url: Option<String>,
    /// The backend sits at the end of `loaded_url` until something rewinds it.
    ended: bool,
    position: u64,
    duration: u64,
}

impl<B: MediaBackend> Player<B> {
    pub fn new(controller: Arc<PlaybackController>, backend: B) -> Self {
        let updates = controller.updates();
        let mut player = Player {
            controller,
            updates,
            backend,
            loaded_url: None,
            ended: false,
            position: 0,
            duration: 0,
        };
        player.sync();

        player
    }

    pub fn controller(&self) -> &Arc<PlaybackController> {
        &self.controller
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// `(position, duration)` in seconds, for a progress slider.
    pub fn progress(&self) -> (u64, u64) {
        (self.position, self.duration)
    }

    /// Syncs only if the controller changed since the last call.
    pub fn refresh(&mut self) -> bool {
        let mut changed = false;
        while let Ok(()) = self.updates.try_recv() {
            changed = true;
        }
        if changed {
            self.sync();
        }

        changed
    }

    /// Pushes the latest controller state into the backend.
    pub fn sync(&mut self) {
        let state = self.controller.get();

        let episode = match state.current_episode() {
            Some(episode) => episode,
            None => {
                if self.loaded_url.take().is_some() {
                    info!("Unloading media");
                    self.backend.unload();
                }
                self.ended = false;
                self.position = 0;
                self.duration = 0;
                return;
            }
        };

        if self.loaded_url.as_deref() != Some(episode.url()) {
            info!("Loading {} from {}", episode.id(), episode.url());
            self.backend.load(episode);
            self.loaded_url = Some(episode.url().to_owned());
            self.ended = false;
            self.position = 0;
            self.duration = episode.duration();
        } else if self.ended {
            // Same source picked again, e.g. a repeated entry or a shuffled repeat.
            debug!("Rewinding {}", episode.id());
            self.backend.seek(0);
            self.ended = false;
            self.position = 0;
        }

        self.backend.set_looping(state.is_looping());
        if state.is_playing() {
            self.backend.play();
        } else {
            self.backend.pause();
        }
    }

    pub fn handle_event(&mut self, event: MediaEvent) {
        debug!("Media event {:?}", event);

        match event {
            MediaEvent::Play => self.controller.set_playing_state(true),
            MediaEvent::Pause => self.controller.set_playing_state(false),
            MediaEvent::Ended => {
                self.ended = true;
                self.controller.on_episode_ended();
            }
            MediaEvent::MetadataLoaded { duration } => {
                self.position = 0;
                self.duration = duration;
            }
            MediaEvent::TimeUpdate { position } => {
                self.position = position;
            }
        }

        // A shuffled repeat can leave the snapshot untouched, so nothing else would rewind.
        if !self.refresh() && self.ended {
            self.sync();
        }
    }

    /// Drains every pending backend notification.
    pub fn process_events(&mut self) {
        while let Some(event) = self.backend.poll_event() {
            self.handle_event(event);
        }
    }

    /// Moves the playhead. Clamped to the loaded episode.
    pub fn seek(&mut self, position: u64) {
        if self.loaded_url.is_none() {
            return;
        }

        let position = position.min(self.duration);
        self.backend.seek(position);
        self.position = position;
    }
}
