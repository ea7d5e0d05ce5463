use serde::{Deserialize, Serialize};

use crate::Result;

/// One timestamped line of lyrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    /// Offset from the start of the track, in seconds.
    pub time: f32,
    pub text: String,
}

impl LyricLine {
    pub fn new(time: f32, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
        }
    }
}

/// A playable track together with its presentation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: u32,
    pub title: String,
    pub artist: String,
    pub audio_src: String,
    pub cover_art: String,
    /// Accent colour applied to the waveform and active lyric line.
    pub main_color: String,
    pub genre: String,
    #[serde(default)]
    pub lyrics: Vec<LyricLine>,
}

/// Ordered collection of tracks forming the play queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Parses a catalog from its JSON representation.
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Serialises the catalog back to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns the five tracks bundled with the player.
    pub fn builtin() -> Self {
        let line = LyricLine::new;
        Self::new(vec![
            Track {
                id: 1,
                title: "Lofi Chill".to_string(),
                artist: "SoundCanvas".to_string(),
                audio_src: "https://cdn.pixabay.com/audio/2022/02/01/audio_eb721999d9.mp3"
                    .to_string(),
                cover_art:
                    "https://images.unsplash.com/photo-1516962322815-5e4e83f32490?q=80&w=800&auto=format&fit=crop"
                        .to_string(),
                main_color: "#3b82f6".to_string(),
                genre: "Lofi".to_string(),
                lyrics: vec![
                    line(5.0, "(Verse 1)"),
                    line(8.0, "Rainy days and coffee cups"),
                    line(12.0, "City nights and neon lights"),
                    line(16.0, "Just a chill beat on repeat"),
                    line(20.0, "Feeling cozy, feeling right"),
                    line(24.0, "(Chorus)"),
                    line(27.0, "Oh, lofi dreams and mellow scenes"),
                    line(31.0, "Got my headphones, in my zone"),
                    line(35.0, "Just vibing out, no need to shout"),
                    line(39.0, "In this moment, I'm at home"),
                ],
            },
            Track {
                id: 2,
                title: "Ambient Classical".to_string(),
                artist: "SoundCanvas".to_string(),
                audio_src: "https://cdn.pixabay.com/audio/2022/11/17/audio_859b8974a6.mp3"
                    .to_string(),
                cover_art:
                    "https://images.unsplash.com/photo-1511379938547-c1f69419868d?q=80&w=800&auto=format&fit=crop"
                        .to_string(),
                main_color: "#db2777".to_string(),
                genre: "Ambient".to_string(),
                lyrics: vec![
                    line(3.0, "(Instrumental)"),
                    line(10.0, "A gentle piano melody,"),
                    line(15.0, "Strings that swell and flow."),
                    line(20.0, "A soundscape vast as the open sea,"),
                    line(25.0, "Where quiet feelings grow."),
                    line(30.0, "No words are needed to convey,"),
                    line(35.0, "The peace that fills the air."),
                    line(40.0, "Just close your eyes and drift away,"),
                    line(45.0, "Without a single care."),
                ],
            },
            Track {
                id: 3,
                title: "Future Bass".to_string(),
                artist: "SoundCanvas".to_string(),
                audio_src: "https://cdn.pixabay.com/audio/2021/07/22/audio_c29d6621f3.mp3"
                    .to_string(),
                cover_art:
                    "https://images.unsplash.com/photo-1619983081563-436f63e02242?q=80&w=800&auto=format&fit=crop"
                        .to_string(),
                main_color: "#7c3aed".to_string(),
                genre: "Electronic".to_string(),
                lyrics: vec![
                    line(5.0, "(Verse 1)"),
                    line(9.0, "Lights flash, the synth begins to climb"),
                    line(13.0, "Losing all my sense of time"),
                    line(17.0, "The beat drops, and the world just fades"),
                    line(21.0, "Lost in these electronic everglades"),
                    line(25.0, "(Chorus)"),
                    line(28.0, "Future bass, a vibrant sound"),
                    line(32.0, "Lifting me right off the ground"),
                    line(36.0, "With every chord, a new design"),
                    line(40.0, "This energy is truly mine"),
                ],
            },
            Track {
                id: 4,
                title: "Cinematic Dream".to_string(),
                artist: "SoundCanvas".to_string(),
                audio_src: "https://cdn.pixabay.com/audio/2024/05/10/audio_6dee399f66.mp3"
                    .to_string(),
                cover_art:
                    "https://images.unsplash.com/photo-1506157786151-b8491531f063?q=80&w=800&auto=format&fit=crop"
                        .to_string(),
                main_color: "#06b6d4".to_string(),
                genre: "Cinematic".to_string(),
                lyrics: vec![
                    line(4.0, "(Instrumental)"),
                    line(12.0, "A sweeping score for a silver screen,"),
                    line(18.0, "A hero's journey, a final scene."),
                    line(24.0, "The orchestra builds, a powerful tide,"),
                    line(30.0, "With epic drums and nowhere to hide."),
                    line(36.0, "A story told in notes and keys,"),
                    line(42.0, "Carried forward on the breeze."),
                    line(48.0, "A cinematic dream takes flight,"),
                    line(54.0, "And fills the darkness with brilliant light."),
                ],
            },
            Track {
                id: 5,
                title: "Neon Drive".to_string(),
                artist: "SoundCanvas".to_string(),
                audio_src: "https://cdn.pixabay.com/audio/2022/06/09/audio_2bbe645012.mp3"
                    .to_string(),
                cover_art:
                    "https://images.unsplash.com/photo-1554734867-bf3c00a49371?q=80&w=800&auto=format&fit=crop"
                        .to_string(),
                main_color: "#f472b6".to_string(),
                genre: "Synthwave".to_string(),
                lyrics: vec![
                    line(6.0, "Grid lines on a digital sea"),
                    line(10.0, "Sunset hues for you and me"),
                    line(14.0, "Driving fast, a retro dream"),
                    line(18.0, "Living in a synthwave theme"),
                    line(22.0, "(Chorus)"),
                    line(25.0, "Neon drive, through the night"),
                    line(29.0, "Underneath the purple light"),
                    line(33.0, "The engine hums a steady beat"),
                    line(37.0, "This 80s vibe can't be beat"),
                ],
            },
        ])
    }
}
