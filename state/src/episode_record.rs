use crate::{Episode, StateError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
/// Durations show up both as numbers and as numeric strings.
pub enum RecordDuration {
    Seconds(u64),
    Text(String),
}

impl Default for RecordDuration {
    fn default() -> Self {
        RecordDuration::Seconds(0)
    }
}

impl RecordDuration {
    pub fn seconds(&self) -> Result<u64, StateError> {
        match self {
            RecordDuration::Seconds(seconds) => Ok(*seconds),
            RecordDuration::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| StateError::InvalidDuration(text.clone())),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RecordFile {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub duration: RecordDuration,
}

#[derive(Debug, Deserialize)]
/// An episode as served by the episode API.
pub struct EpisodeRecord {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub members: String,

    #[serde(default)]
    pub thumbnail: String,

    pub description: Option<String>,

    pub published_at: Option<String>,

    #[serde(default)]
    pub file: RecordFile,
}

impl EpisodeRecord {
    pub fn to_episode(&self) -> Result<Episode, StateError> {
        let mut episode = Episode::default()
            .with_id(self.id.clone())
            .with_title(self.title.clone())
            .with_members(self.members.clone())
            .with_thumbnail(self.thumbnail.clone())
            .with_url(self.file.url.clone())
            .with_duration(self.file.duration.seconds()?);

        if let Some(published_at) = &self.published_at {
            episode = episode.with_published_at(published_at.clone());
        }
        if let Some(description) = &self.description {
            episode = episode.with_description(description.clone());
        }

        Ok(episode)
    }

    pub fn to_episodes(records: &[EpisodeRecord]) -> Result<Vec<Episode>, StateError> {
        records.iter().map(EpisodeRecord::to_episode).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDS: &str = r#"[
        {
            "id": "a-importancia-da-contribuicao-em-open-source",
            "title": "Faladev #30 | A importância da contribuição em Open Source",
            "members": "Diego Fernandes, João Pedro, Diego Haz e Bruno Lemos",
            "published_at": "2021-01-22 19:16:21",
            "thumbnail": "https://example.com/opensource.jpg",
            "description": "<p>Nesse episódio...</p>",
            "file": { "url": "https://example.com/opensource.m4a", "type": "audio/x-m4a", "duration": 3981 }
        },
        {
            "id": "uma-conversa-sobre-programacao-funcional",
            "title": "Uma conversa sobre programação funcional",
            "members": "Diego e Richard",
            "thumbnail": "https://example.com/funcional.jpg",
            "file": { "url": "https://example.com/funcional.m4a", "duration": "2763" }
        }
    ]"#;

    #[test]
    fn parses_numeric_and_string_durations() {
        let records: Vec<EpisodeRecord> = serde_json::from_str(RECORDS).unwrap();
        let episodes = EpisodeRecord::to_episodes(&records).unwrap();

        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].duration(), 3981);
        assert_eq!(episodes[0].url(), "https://example.com/opensource.m4a");
        assert_eq!(episodes[0].published_at(), Some("2021-01-22 19:16:21"));
        assert_eq!(episodes[1].duration(), 2763);
        assert_eq!(episodes[1].description(), None);
    }

    #[test]
    fn rejects_garbage_duration() {
        let record: EpisodeRecord = serde_json::from_str(
            r#"{ "id": "x", "file": { "url": "u", "duration": "about an hour" } }"#,
        )
        .unwrap();

        assert_eq!(
            record.to_episode(),
            Err(StateError::InvalidDuration(String::from("about an hour")))
        );
    }
}
