use crate::{render::Surface, FrequencySnapshot};

/// Horizontal gap between adjacent bars, in pixels.
const BAR_GUTTER: f32 = 2.0;

/// Renders one frame of the bar-chart waveform onto `surface`.
///
/// The surface is cleared first, so passing `None` leaves it in the rest
/// state. Bars run left to right in bin order (low to high frequency) with
/// `bar_width = (surface_width / bin_count) * 1.5` and
/// `bar_height = magnitude / 2.5`, anchored to the bottom edge. Drawing stops
/// at the right edge; at most one bar overruns it.
pub fn draw<S: Surface>(surface: &mut S, color: &str, snapshot: Option<&FrequencySnapshot>) {
    surface.clear();

    let Some(snapshot) = snapshot else {
        return;
    };
    if snapshot.is_empty() {
        return;
    }

    let width = surface.width();
    let height = surface.height();
    let bar_width = (width / snapshot.len() as f32) * 1.5;
    let mut x = 0.0;

    for &magnitude in snapshot.bins() {
        if x >= width {
            break;
        }
        let bar_height = magnitude as f32 / 2.5;
        surface.fill_rect(x, height - bar_height, bar_width, bar_height, color);
        x += bar_width + BAR_GUTTER;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;

    const COLOR: &str = "#3b82f6";

    fn snapshot(value: u8) -> FrequencySnapshot {
        FrequencySnapshot::new(vec![value; 128])
    }

    #[test]
    fn absent_input_leaves_the_surface_cleared() {
        let mut surface = RecordingSurface::new(500.0, 80.0);
        draw(&mut surface, COLOR, Some(&snapshot(200)));
        assert!(!surface.is_cleared());

        draw(&mut surface, COLOR, None);
        assert!(surface.is_cleared());
    }

    #[test]
    fn bars_advance_in_strict_bin_order() {
        let mut surface = RecordingSurface::new(500.0, 80.0);
        draw(&mut surface, COLOR, Some(&snapshot(100)));

        let mut last_x = f32::NEG_INFINITY;
        for rect in surface.rects() {
            assert!(rect.x > last_x);
            last_x = rect.x;
        }
    }

    #[test]
    fn drawn_extent_stays_within_one_bar_of_the_surface() {
        let mut surface = RecordingSurface::new(500.0, 80.0);
        draw(&mut surface, COLOR, Some(&snapshot(255)));

        let bar_width = (500.0 / 128.0) * 1.5;
        let max_extent = surface
            .rects()
            .iter()
            .map(|rect| rect.x + rect.width)
            .fold(0.0, f32::max);
        assert!(max_extent <= 500.0 + bar_width);
    }

    #[test]
    fn bar_geometry_follows_the_magnitude() {
        let mut surface = RecordingSurface::new(500.0, 80.0);
        draw(&mut surface, COLOR, Some(&snapshot(100)));

        let bar_width = (500.0 / 128.0) * 1.5;
        let first = &surface.rects()[0];
        assert_eq!(first.x, 0.0);
        assert_eq!(first.height, 100.0 / 2.5);
        assert_eq!(first.y, 80.0 - 100.0 / 2.5);
        assert!((first.width - bar_width).abs() < 1e-6);

        let second = &surface.rects()[1];
        assert!((second.x - (bar_width + 2.0)).abs() < 1e-6);
    }

    #[test]
    fn every_frame_starts_from_a_clean_surface() {
        let mut surface = RecordingSurface::new(500.0, 80.0);
        draw(&mut surface, COLOR, Some(&snapshot(255)));
        let first_pass = surface.rects().len();

        draw(&mut surface, COLOR, Some(&snapshot(255)));
        assert_eq!(surface.rects().len(), first_pass);
    }

    #[test]
    fn zero_magnitudes_draw_flat_bars() {
        let mut surface = RecordingSurface::new(500.0, 80.0);
        draw(&mut surface, COLOR, Some(&snapshot(0)));
        assert!(surface.rects().iter().all(|rect| rect.height == 0.0));
    }
}
