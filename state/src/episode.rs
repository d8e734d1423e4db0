use crate::PlayerAction;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// One playable episode. Immutable once handed to the controller.
pub struct Episode {
    id: String,

    title: String,
    /// Display label for the hosts and guests.
    members: String,

    thumbnail: String,
    url: String,
    /// In seconds.
    duration: u64,

    published_at: Option<String>,
    description: Option<String>,
}

impl Episode {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn with_id(mut self, id: String) -> Self {
        self.id = id;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn with_title(mut self, title: String) -> Self {
        self.title = title;
        self
    }

    pub fn members(&self) -> &str {
        &self.members
    }

    pub fn with_members(mut self, members: String) -> Self {
        self.members = members;
        self
    }

    pub fn thumbnail(&self) -> &str {
        &self.thumbnail
    }

    pub fn with_thumbnail(mut self, thumbnail: String) -> Self {
        self.thumbnail = thumbnail;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn with_url(mut self, url: String) -> Self {
        self.url = url;
        self
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn with_duration(mut self, duration: u64) -> Self {
        self.duration = duration;
        self
    }

    /// Raw date string from the data source. Formatting is left to the caller.
    pub fn published_at(&self) -> Option<&str> {
        self.published_at.as_deref()
    }

    pub fn with_published_at(mut self, published_at: String) -> Self {
        self.published_at = Some(published_at);
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    /// Plays just this episode, replacing whatever playlist was loaded.
    pub fn build(self) -> PlayerAction {
        PlayerAction::PlaySingle(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let episode = Episode::default()
            .with_id(String::from("a-economia-do-software"))
            .with_title(String::from("A economia do software"))
            .with_members(String::from("Diego, Richard e Thiago"))
            .with_url(String::from("https://example.com/a.m4a"))
            .with_duration(3981);

        assert_eq!(episode.id(), "a-economia-do-software");
        assert_eq!(episode.members(), "Diego, Richard e Thiago");
        assert_eq!(episode.duration(), 3981);
        assert_eq!(episode.thumbnail(), "");
        assert_eq!(episode.published_at(), None);
    }

    #[test]
    fn build_plays_single() {
        let episode = Episode::default().with_id(String::from("a"));
        match episode.clone().build() {
            PlayerAction::PlaySingle(built) => assert_eq!(built, episode),
            other => panic!("unexpected action {:?}", other),
        }
    }
}
