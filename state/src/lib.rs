use futures::channel::mpsc::{channel as fchannel, Receiver as FReceiver, Sender as FSender};
use log::warn;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

mod config;
mod duration;
mod episode;
mod episode_record;
mod player_state;
mod state_error;

pub use config::PlayerConfig;
pub use duration::format_duration;
pub use episode::Episode;
pub use episode_record::{EpisodeRecord, RecordDuration, RecordFile};
pub use player_state::PlaybackState;
pub use state_error::StateError;

#[derive(Debug, Clone)]
pub enum PlayerAction {
    PlaySingle(Episode),
    PlayList { list: Vec<Episode>, index: usize },
    TogglePlay,
    /// Reconciles the flag with what the media resource actually did.
    SetPlayingState(bool),
    ToggleLoop,
    ToggleShuffle,
    NextEpisode,
    PreviousEpisode,
    ClearPlayerState,
    /// Raised by the media resource. Never raised while looping.
    EpisodeEnded,
}

/// Something that re-renders when the player changes.
pub trait PlaybackObserver: Send + Sync {
    fn state_changed(&self, state: &Arc<PlaybackState>);
}

impl<F> PlaybackObserver for F
where
    F: Fn(&Arc<PlaybackState>) + Send + Sync,
{
    fn state_changed(&self, state: &Arc<PlaybackState>) {
        self(state)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The only thing allowed to change the player.
///
/// Commands apply synchronously: a read right after a command sees its effect.
/// Observers and update receivers are told after the lock is released.
pub struct PlaybackController {
    state: RwLock<Arc<PlaybackState>>,
    config: PlayerConfig,
    rng: Mutex<StdRng>,

    observers: Mutex<Vec<Arc<dyn PlaybackObserver>>>,
    waiters: Mutex<Vec<FSender<()>>>,
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PlaybackController")
    }
}

impl PlaybackController {
    /// Creates an empty, stopped player.
    ///
    /// Also creates a notifier that can be used to figure out when the state has been updated.
    pub fn new(config: PlayerConfig) -> (Arc<PlaybackController>, FReceiver<()>) {
        let controller = Arc::new(PlaybackController {
            state: RwLock::new(Arc::new(PlaybackState::new())),
            rng: Mutex::new(config.rng()),
            config,
            observers: Mutex::new(Vec::new()),
            waiters: Mutex::new(Vec::new()),
        });
        let updates = controller.updates();

        (controller, updates)
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn get(&self) -> Arc<PlaybackState> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Yields once whenever the state changed since the receiver was last drained.
    pub fn updates(&self) -> FReceiver<()> {
        let (send_update, receive_update) = fchannel(1);
        lock(&self.waiters).push(send_update);

        receive_update
    }

    pub fn subscribe(&self, observer: Arc<dyn PlaybackObserver>) {
        lock(&self.observers).push(observer);
    }

    /// Applies the actions in order and publishes the result once.
    pub fn update(&self, actions: Vec<PlayerAction>) {
        let next = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let mut rng = lock(&self.rng);

            let next = state.apply(actions, &self.config, &mut *rng);
            if next == **state {
                return;
            }

            let next = Arc::new(next);
            *state = Arc::clone(&next);
            next
        };

        self.notify(&next);
    }

    fn notify(&self, state: &Arc<PlaybackState>) {
        // Only send if they're not already waiting for an update.
        lock(&self.waiters).retain_mut(|waiter| match waiter.try_send(()) {
            Ok(()) => true,
            Err(err) => !err.is_disconnected(),
        });

        let observers = lock(&self.observers).clone();
        for observer in observers {
            observer.state_changed(state);
        }
    }

    pub fn play_single(&self, episode: Episode) {
        self.update(vec![episode.build()]);
    }

    pub fn play_list(&self, list: Vec<Episode>, index: usize) -> Result<(), StateError> {
        if index >= list.len() {
            warn!("Rejecting playlist of {} at index {}", list.len(), index);
            return Err(StateError::IndexOutOfRange {
                index,
                len: list.len(),
            });
        }

        self.update(vec![PlayerAction::PlayList { list, index }]);
        Ok(())
    }

    pub fn toggle_play(&self) {
        self.update(vec![PlayerAction::TogglePlay]);
    }

    pub fn set_playing_state(&self, is_playing: bool) {
        self.update(vec![PlayerAction::SetPlayingState(is_playing)]);
    }

    pub fn toggle_loop(&self) {
        self.update(vec![PlayerAction::ToggleLoop]);
    }

    pub fn toggle_shuffle(&self) {
        self.update(vec![PlayerAction::ToggleShuffle]);
    }

    pub fn next_episode(&self) {
        self.update(vec![PlayerAction::NextEpisode]);
    }

    pub fn previous_episode(&self) {
        self.update(vec![PlayerAction::PreviousEpisode]);
    }

    pub fn clear_player_state(&self) {
        self.update(vec![PlayerAction::ClearPlayerState]);
    }

    pub fn on_episode_ended(&self) {
        self.update(vec![PlayerAction::EpisodeEnded]);
    }
}
