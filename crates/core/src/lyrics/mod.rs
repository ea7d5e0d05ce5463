use crate::LyricLine;

/// Index of the lyric line active at `time`: the line whose timestamp has
/// been reached and whose successor has not. `None` before the first line.
pub fn active_line(lyrics: &[LyricLine], time: f32) -> Option<usize> {
    lyrics.iter().enumerate().find_map(|(index, line)| {
        let next = lyrics.get(index + 1);
        (time >= line.time && next.map_or(true, |next| time < next.time)).then_some(index)
    })
}

/// Remembers the last active line and reports only changes, which is what
/// the display layer needs to trigger its scroll-into-view.
#[derive(Debug, Default)]
pub struct LyricsTracker {
    last_active: Option<usize>,
}

impl LyricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the newly active line index, or `None` when the active line
    /// has not changed since the previous observation.
    pub fn observe(&mut self, lyrics: &[LyricLine], time: f32) -> Option<usize> {
        let active = active_line(lyrics, time)?;
        if self.last_active == Some(active) {
            return None;
        }
        self.last_active = Some(active);
        Some(active)
    }

    /// Forgets the remembered line, e.g. when the track changes.
    pub fn reset(&mut self) {
        self.last_active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lyrics() -> Vec<LyricLine> {
        vec![
            LyricLine::new(5.0, "(Verse 1)"),
            LyricLine::new(8.0, "Rainy days and coffee cups"),
            LyricLine::new(12.0, "City nights and neon lights"),
        ]
    }

    #[test]
    fn no_line_is_active_before_the_first_timestamp() {
        assert_eq!(active_line(&lyrics(), 0.0), None);
        assert_eq!(active_line(&lyrics(), 4.9), None);
    }

    #[test]
    fn the_reached_line_stays_active_until_its_successor() {
        let lines = lyrics();
        assert_eq!(active_line(&lines, 5.0), Some(0));
        assert_eq!(active_line(&lines, 7.9), Some(0));
        assert_eq!(active_line(&lines, 8.0), Some(1));
    }

    #[test]
    fn the_final_line_stays_active_forever() {
        assert_eq!(active_line(&lyrics(), 500.0), Some(2));
    }

    #[test]
    fn tracker_reports_each_line_once() {
        let lines = lyrics();
        let mut tracker = LyricsTracker::new();

        assert_eq!(tracker.observe(&lines, 3.0), None);
        assert_eq!(tracker.observe(&lines, 5.5), Some(0));
        assert_eq!(tracker.observe(&lines, 6.0), None);
        assert_eq!(tracker.observe(&lines, 9.0), Some(1));

        tracker.reset();
        assert_eq!(tracker.observe(&lines, 9.0), Some(1));
    }
}
