use crate::{MediaBackend, MediaEvent};
use log::debug;
use state::Episode;
use std::collections::VecDeque;

/// A backend with no audio device. Time only moves on [`SimulatedBackend::advance`].
#[derive(Debug, Default)]
pub struct SimulatedBackend {
    url: Option<String>,
    duration: u64,
    position: u64,

    playing: bool,
    looping: bool,

    loads: usize,
    events: VecDeque<MediaEvent>,
}

impl SimulatedBackend {
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// How many sources have been loaded so far.
    pub fn loads(&self) -> usize {
        self.loads
    }

    /// Plays for `seconds`, raising the same events a real element would.
    pub fn advance(&mut self, seconds: u64) {
        if !self.playing || self.url.is_none() {
            return;
        }

        self.position += seconds;
        if self.position >= self.duration {
            if self.looping && self.duration > 0 {
                self.position %= self.duration;
            } else {
                self.position = self.duration;
                self.playing = false;
                self.events.push_back(MediaEvent::TimeUpdate {
                    position: self.position,
                });
                self.events.push_back(MediaEvent::Pause);
                self.events.push_back(MediaEvent::Ended);
                return;
            }
        }

        self.events.push_back(MediaEvent::TimeUpdate {
            position: self.position,
        });
    }
}

impl MediaBackend for SimulatedBackend {
    fn load(&mut self, episode: &Episode) {
        debug!("Simulating {}", episode.url());

        self.url = Some(episode.url().to_owned());
        self.duration = episode.duration();
        self.position = 0;
        self.playing = false;
        self.loads += 1;
        self.events.push_back(MediaEvent::MetadataLoaded {
            duration: self.duration,
        });
    }

    fn unload(&mut self) {
        self.url = None;
        self.duration = 0;
        self.position = 0;
        self.playing = false;
    }

    fn play(&mut self) {
        if self.url.is_some() && !self.playing {
            self.playing = true;
            self.events.push_back(MediaEvent::Play);
        }
    }

    fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.events.push_back(MediaEvent::Pause);
        }
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn seek(&mut self, position: u64) {
        if self.url.is_some() {
            self.position = position.min(self.duration);
            self.events.push_back(MediaEvent::TimeUpdate {
                position: self.position,
            });
        }
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(duration: u64) -> SimulatedBackend {
        let mut backend = SimulatedBackend::default();
        backend.load(
            &Episode::default()
                .with_url(String::from("file:///tmp/a.mp3"))
                .with_duration(duration),
        );
        backend.play();
        while backend.poll_event().is_some() {}

        backend
    }

    #[test]
    fn paused_backend_does_not_advance() {
        let mut backend = loaded(30);
        backend.pause();
        backend.poll_event();

        backend.advance(10);
        assert_eq!(backend.position(), 0);
        assert_eq!(backend.poll_event(), None);
    }

    #[test]
    fn raises_ended_at_the_end() {
        let mut backend = loaded(30);
        backend.advance(45);

        assert_eq!(
            backend.poll_event(),
            Some(MediaEvent::TimeUpdate { position: 30 })
        );
        assert_eq!(backend.poll_event(), Some(MediaEvent::Pause));
        assert_eq!(backend.poll_event(), Some(MediaEvent::Ended));
        assert!(!backend.is_playing());
    }

    #[test]
    fn wraps_while_looping() {
        let mut backend = loaded(30);
        backend.set_looping(true);
        backend.advance(65);

        assert_eq!(
            backend.poll_event(),
            Some(MediaEvent::TimeUpdate { position: 5 })
        );
        assert_eq!(backend.poll_event(), None);
        assert!(backend.is_playing());
    }

    #[test]
    fn play_and_pause_only_report_changes() {
        let mut backend = loaded(30);
        backend.play();
        assert_eq!(backend.poll_event(), None);

        backend.pause();
        backend.pause();
        assert_eq!(backend.poll_event(), Some(MediaEvent::Pause));
        assert_eq!(backend.poll_event(), None);
    }
}
