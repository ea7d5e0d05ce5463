use crate::{Result, Track};

/// Number of images requested per moodboard.
pub const MOODBOARD_IMAGE_COUNT: usize = 4;

const EMPTY_RESULT_MESSAGE: &str = "Could not generate images. Please try again.";
const GENERATION_FAILED_MESSAGE: &str = "An error occurred while generating images.";

/// Builds the image-generation prompt for a track.
pub fn moodboard_prompt(track: &Track) -> String {
    format!(
        "Generate a visual moodboard that captures the essence of {} music. \
         Focus on themes like: {}. Create an atmospheric, visually striking, \
         and artistic collection of images.",
        track.genre, track.title
    )
}

/// External image-generation collaborator. One request, one response; any
/// retrying is the caller's decision, not the core's.
pub trait ImageGenerator {
    /// Returns `count` images encoded as data URIs.
    fn generate(&mut self, prompt: &str, count: usize) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoodboardState {
    Closed,
    Ready(Vec<String>),
    Failed(String),
}

/// The moodboard side panel: generates a fresh image set when opened and
/// again whenever the current track changes while it stays open.
#[derive(Debug)]
pub struct Moodboard {
    state: MoodboardState,
    /// Which track the current images belong to.
    track_id: Option<u32>,
}

impl Moodboard {
    pub fn new() -> Self {
        Self {
            state: MoodboardState::Closed,
            track_id: None,
        }
    }

    pub fn state(&self) -> &MoodboardState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != MoodboardState::Closed
    }

    /// Opens the panel and runs one generation for `track`. An empty result
    /// and a generator error both surface as a user-facing failure message.
    pub fn open<G: ImageGenerator>(&mut self, track: &Track, generator: &mut G) {
        let prompt = moodboard_prompt(track);
        self.state = match generator.generate(&prompt, MOODBOARD_IMAGE_COUNT) {
            Ok(images) if !images.is_empty() => MoodboardState::Ready(images),
            Ok(_) => MoodboardState::Failed(EMPTY_RESULT_MESSAGE.to_string()),
            Err(_) => MoodboardState::Failed(GENERATION_FAILED_MESSAGE.to_string()),
        };
        self.track_id = Some(track.id);
    }

    /// Regenerates when the open panel no longer matches the current track.
    pub fn sync_track<G: ImageGenerator>(&mut self, track: &Track, generator: &mut G) {
        if self.is_open() && self.track_id != Some(track.id) {
            self.open(track, generator);
        }
    }

    pub fn close(&mut self) {
        self.state = MoodboardState::Closed;
    }
}

impl Default for Moodboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Catalog, PlayerError};

    struct StubGenerator {
        response: Result<Vec<String>>,
        calls: usize,
        last_prompt: Option<String>,
    }

    impl StubGenerator {
        fn returning(response: Result<Vec<String>>) -> Self {
            Self {
                response,
                calls: 0,
                last_prompt: None,
            }
        }
    }

    impl ImageGenerator for StubGenerator {
        fn generate(&mut self, prompt: &str, count: usize) -> Result<Vec<String>> {
            assert_eq!(count, MOODBOARD_IMAGE_COUNT);
            self.calls += 1;
            self.last_prompt = Some(prompt.to_string());
            match &self.response {
                Ok(images) => Ok(images.clone()),
                Err(_) => Err(PlayerError::image("stubbed outage")),
            }
        }
    }

    fn images() -> Vec<String> {
        (0..4).map(|i| format!("data:image/jpeg;base64,{i}")).collect()
    }

    #[test]
    fn prompt_mentions_genre_and_title() {
        let catalog = Catalog::builtin();
        let prompt = moodboard_prompt(catalog.get(4).unwrap());
        assert!(prompt.contains("Synthwave music"));
        assert!(prompt.contains("Neon Drive"));
    }

    #[test]
    fn opening_loads_a_fresh_image_set() {
        let catalog = Catalog::builtin();
        let mut generator = StubGenerator::returning(Ok(images()));
        let mut moodboard = Moodboard::new();

        moodboard.open(catalog.get(0).unwrap(), &mut generator);
        assert_eq!(moodboard.state(), &MoodboardState::Ready(images()));
        assert!(moodboard.is_open());
    }

    #[test]
    fn empty_and_failed_generations_surface_messages() {
        let catalog = Catalog::builtin();
        let track = catalog.get(0).unwrap();
        let mut moodboard = Moodboard::new();

        let mut empty = StubGenerator::returning(Ok(Vec::new()));
        moodboard.open(track, &mut empty);
        assert!(matches!(moodboard.state(), MoodboardState::Failed(_)));

        let mut failing = StubGenerator::returning(Err(PlayerError::image("down")));
        moodboard.open(track, &mut failing);
        assert!(matches!(moodboard.state(), MoodboardState::Failed(_)));
    }

    #[test]
    fn track_changes_regenerate_only_while_open() {
        let catalog = Catalog::builtin();
        let mut generator = StubGenerator::returning(Ok(images()));
        let mut moodboard = Moodboard::new();

        moodboard.sync_track(catalog.get(1).unwrap(), &mut generator);
        assert_eq!(generator.calls, 0);

        moodboard.open(catalog.get(0).unwrap(), &mut generator);
        moodboard.sync_track(catalog.get(0).unwrap(), &mut generator);
        assert_eq!(generator.calls, 1);

        moodboard.sync_track(catalog.get(1).unwrap(), &mut generator);
        assert_eq!(generator.calls, 2);
    }
}
