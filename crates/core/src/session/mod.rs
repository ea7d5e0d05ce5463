use rand::Rng;

use crate::{
    driver::{FrameRequest, FrameScheduler, FrameSink},
    render::{ScaleTarget, Surface},
    waveform, AppConfig, AudioGraph, BubbleField, Catalog, FrequencySnapshot, Player, RenderLoop,
    Result,
};

/// One player session: the transport, the lazily built audio graph, both
/// reactive effects and the render loop that drives them.
///
/// The audio graph is an owned resource constructed at most once per
/// session, on the first play, and sampled by reference from then on. It is
/// never re-attached to another playback element.
#[derive(Debug)]
pub struct PlayerSession {
    config: AppConfig,
    player: Player,
    bubbles: BubbleField,
    render_loop: RenderLoop,
    graph: Option<AudioGraph>,
}

impl PlayerSession {
    pub fn new<R: Rng>(catalog: Catalog, config: AppConfig, rng: &mut R) -> Result<Self> {
        let player = Player::new(catalog)?;
        let bubbles = BubbleField::generate(config.visual.bubble_count, rng);
        Ok(Self {
            config,
            player,
            bubbles,
            render_loop: RenderLoop::new(),
            graph: None,
        })
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Direct transport access for operations that do not touch the render
    /// loop: volume, seek, shuffle, repeat, host time reports.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn bubbles(&self) -> &BubbleField {
        &self.bubbles
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn graph_built(&self) -> bool {
        self.graph.is_some()
    }

    pub fn is_loop_running(&self) -> bool {
        self.render_loop.is_running()
    }

    /// The play/pause button. Starting builds the graph on first use and
    /// kicks off the frame chain; pausing cancels it and rests the visuals.
    pub fn toggle_play_pause<S, E, U>(
        &mut self,
        scheduler: &mut S,
        elements: &mut [E],
        surface: &mut U,
    ) -> Result<()>
    where
        S: FrameScheduler,
        E: ScaleTarget,
        U: Surface,
    {
        self.player.toggle_play_pause();
        if self.player.is_playing() {
            self.ensure_graph()?;
            self.render_loop.start(scheduler);
        } else {
            self.halt_loop(scheduler, elements, surface);
        }
        Ok(())
    }

    /// Selecting a queue entry always starts playback.
    pub fn select<S: FrameScheduler>(&mut self, index: usize, scheduler: &mut S) -> Result<()> {
        self.player.select(index)?;
        self.ensure_graph()?;
        self.render_loop.start(scheduler);
        Ok(())
    }

    /// The host refused playback; fall back to stopped and rest the visuals
    /// so the loop never runs against a dead source.
    pub fn playback_rejected<S, E, U>(
        &mut self,
        scheduler: &mut S,
        elements: &mut [E],
        surface: &mut U,
    ) where
        S: FrameScheduler,
        E: ScaleTarget,
        U: Surface,
    {
        self.player.playback_rejected();
        self.halt_loop(scheduler, elements, surface);
    }

    /// The close button: stop, rewind, rest the visuals.
    pub fn close<S, E, U>(&mut self, scheduler: &mut S, elements: &mut [E], surface: &mut U)
    where
        S: FrameScheduler,
        E: ScaleTarget,
        U: Surface,
    {
        self.player.close();
        self.halt_loop(scheduler, elements, surface);
    }

    /// Routes decoded PCM from the host into the analysis graph. A no-op
    /// until the graph exists.
    pub fn push_samples(&mut self, samples: &[f32]) {
        if let Some(graph) = self.graph.as_mut() {
            graph.push_samples(samples);
        }
    }

    /// The per-frame callback body: sample the graph, gate on the playback
    /// state and hand both effects their input through the loop driver.
    pub fn frame<S, E, U>(
        &mut self,
        scheduler: &mut S,
        request: FrameRequest,
        elements: &mut [E],
        surface: &mut U,
    ) where
        S: FrameScheduler,
        E: ScaleTarget,
        U: Surface,
    {
        let playing = self.player.is_playing();
        let snapshot = self.graph.as_mut().and_then(AudioGraph::sample);
        let color = self.player.current_track().main_color.clone();

        let mut bubble_sink = BubbleSink {
            field: &self.bubbles,
            targets: elements,
        };
        let mut waveform_sink = WaveformSink {
            surface,
            color: &color,
        };
        self.render_loop.frame(
            scheduler,
            request,
            playing,
            snapshot.as_ref(),
            &mut [&mut bubble_sink, &mut waveform_sink],
        );
    }

    fn ensure_graph(&mut self) -> Result<()> {
        if self.graph.is_none() {
            self.graph = Some(AudioGraph::new(self.config.audio.fft_size)?);
        }
        Ok(())
    }

    fn halt_loop<S, E, U>(&mut self, scheduler: &mut S, elements: &mut [E], surface: &mut U)
    where
        S: FrameScheduler,
        E: ScaleTarget,
        U: Surface,
    {
        let color = self.player.current_track().main_color.clone();
        let mut bubble_sink = BubbleSink {
            field: &self.bubbles,
            targets: elements,
        };
        let mut waveform_sink = WaveformSink {
            surface,
            color: &color,
        };
        self.render_loop
            .stop(scheduler, &mut [&mut bubble_sink, &mut waveform_sink]);
    }
}

/// Adapts the bubble field plus its element handles to the loop driver.
struct BubbleSink<'a, E: ScaleTarget> {
    field: &'a BubbleField,
    targets: &'a mut [E],
}

impl<E: ScaleTarget> FrameSink for BubbleSink<'_, E> {
    fn on_frame(&mut self, snapshot: &FrequencySnapshot) {
        self.field.apply(self.targets, snapshot);
    }

    fn on_rest(&mut self) {
        self.field.rest(self.targets);
    }
}

/// Adapts the waveform surface to the loop driver.
struct WaveformSink<'a, U: Surface> {
    surface: &'a mut U,
    color: &'a str,
}

impl<U: Surface> FrameSink for WaveformSink<'_, U> {
    fn on_frame(&mut self, snapshot: &FrequencySnapshot) {
        waveform::draw(self.surface, self.color, Some(snapshot));
    }

    fn on_rest(&mut self) {
        waveform::draw(self.surface, self.color, None);
    }
}
