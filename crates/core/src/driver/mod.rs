use crate::FrequencySnapshot;

/// Opaque handle to one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest(u64);

/// Host-side per-frame callback facility. On a browser substrate this wraps
/// the native animation-frame API; headless hosts drive frames manually.
pub trait FrameScheduler {
    /// Schedules one callback for the next frame boundary.
    fn request_frame(&mut self) -> FrameRequest;
    /// Cancels a previously scheduled callback. Must be a no-op for requests
    /// that already fired.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Consumer of per-frame snapshots. The two reactive effects sit behind this
/// trait so the loop driver stays substrate-agnostic.
pub trait FrameSink {
    /// One fresh snapshot, valid for this frame only.
    fn on_frame(&mut self, snapshot: &FrequencySnapshot);
    /// The loop went idle; restore the rest state.
    fn on_rest(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

impl Default for LoopState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Drives the per-frame visual update chain.
///
/// Two states: `Idle` (nothing scheduled) and `Running` (exactly one frame
/// scheduled). Start and stop are idempotent; any pending request is
/// cancelled before a new chain begins, so two starts in a row never leave
/// two concurrent chains. Leaving `Running` always pushes the rest state to
/// every sink.
#[derive(Debug, Default)]
pub struct RenderLoop {
    state: LoopState,
    pending: Option<FrameRequest>,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Begins a frame chain. Any pending request is cancelled first.
    pub fn start<S: FrameScheduler>(&mut self, scheduler: &mut S) {
        if let Some(pending) = self.pending.take() {
            scheduler.cancel_frame(pending);
        }
        self.pending = Some(scheduler.request_frame());
        self.state = LoopState::Running;
    }

    /// Cancels the chain and resets every sink. Safe to call while idle.
    pub fn stop<S: FrameScheduler>(&mut self, scheduler: &mut S, sinks: &mut [&mut dyn FrameSink]) {
        if let Some(pending) = self.pending.take() {
            scheduler.cancel_frame(pending);
        }
        if self.state == LoopState::Running {
            self.state = LoopState::Idle;
            rest_all(sinks);
        }
    }

    /// The per-frame body, invoked by the host when `request` fires.
    ///
    /// While `playing` holds and a snapshot exists, every sink consumes the
    /// snapshot and the next frame is scheduled. Otherwise the loop goes
    /// idle and the sinks drop to their rest state; a missing snapshot while
    /// nominally playing is treated the same as a stop.
    pub fn frame<S: FrameScheduler>(
        &mut self,
        scheduler: &mut S,
        request: FrameRequest,
        playing: bool,
        snapshot: Option<&FrequencySnapshot>,
        sinks: &mut [&mut dyn FrameSink],
    ) {
        // Callbacks from a cancelled chain must not re-enter the loop.
        if self.pending != Some(request) {
            return;
        }
        self.pending = None;

        match snapshot {
            Some(snapshot) if playing => {
                for sink in sinks.iter_mut() {
                    sink.on_frame(snapshot);
                }
                self.pending = Some(scheduler.request_frame());
            }
            _ => {
                self.state = LoopState::Idle;
                rest_all(sinks);
            }
        }
    }
}

fn rest_all(sinks: &mut [&mut dyn FrameSink]) {
    for sink in sinks.iter_mut() {
        sink.on_rest();
    }
}

/// Frame scheduler for headless hosts: requests queue up and the owner fires
/// them explicitly, one per simulated frame.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    queued: Vec<FrameRequest>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks currently waiting to fire.
    pub fn queued(&self) -> usize {
        self.queued.len()
    }

    /// Pops the oldest queued request so the host can deliver it.
    pub fn fire(&mut self) -> Option<FrameRequest> {
        if self.queued.is_empty() {
            None
        } else {
            Some(self.queued.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next_id);
        self.next_id += 1;
        self.queued.push(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.queued.retain(|queued| *queued != request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct CountingSink {
        frames: usize,
        rests: usize,
    }

    impl FrameSink for CountingSink {
        fn on_frame(&mut self, _snapshot: &FrequencySnapshot) {
            self.frames += 1;
        }

        fn on_rest(&mut self) {
            self.rests += 1;
        }
    }

    fn snapshot() -> FrequencySnapshot {
        FrequencySnapshot::new(vec![100; 128])
    }

    #[test]
    fn double_start_keeps_a_single_chain() {
        let mut scheduler = ManualScheduler::new();
        let mut render_loop = RenderLoop::new();

        render_loop.start(&mut scheduler);
        render_loop.start(&mut scheduler);

        assert!(render_loop.is_running());
        assert_eq!(scheduler.queued(), 1);
    }

    #[test]
    fn running_frames_feed_sinks_and_reschedule() {
        let mut scheduler = ManualScheduler::new();
        let mut render_loop = RenderLoop::new();
        let mut sink = CountingSink::default();
        let frame = snapshot();

        render_loop.start(&mut scheduler);
        for _ in 0..3 {
            let request = scheduler.fire().unwrap();
            render_loop.frame(&mut scheduler, request, true, Some(&frame), &mut [&mut sink]);
        }

        assert_eq!(sink.frames, 3);
        assert_eq!(sink.rests, 0);
        assert!(render_loop.is_running());
        assert_eq!(scheduler.queued(), 1);
    }

    #[test]
    fn stopping_playback_rests_the_sinks_mid_animation() {
        let mut scheduler = ManualScheduler::new();
        let mut render_loop = RenderLoop::new();
        let mut sink = CountingSink::default();
        let frame = snapshot();

        render_loop.start(&mut scheduler);
        let request = scheduler.fire().unwrap();
        render_loop.frame(&mut scheduler, request, true, Some(&frame), &mut [&mut sink]);

        let request = scheduler.fire().unwrap();
        render_loop.frame(&mut scheduler, request, false, Some(&frame), &mut [&mut sink]);

        assert_eq!(sink.rests, 1);
        assert!(!render_loop.is_running());
        assert_eq!(scheduler.queued(), 0);
    }

    #[test]
    fn missing_snapshot_while_playing_forces_rest() {
        let mut scheduler = ManualScheduler::new();
        let mut render_loop = RenderLoop::new();
        let mut sink = CountingSink::default();

        render_loop.start(&mut scheduler);
        let request = scheduler.fire().unwrap();
        render_loop.frame(&mut scheduler, request, true, None, &mut [&mut sink]);

        assert_eq!(sink.rests, 1);
        assert!(!render_loop.is_running());
    }

    #[test]
    fn stop_is_idempotent() {
        let mut scheduler = ManualScheduler::new();
        let mut render_loop = RenderLoop::new();
        let mut sink = CountingSink::default();

        render_loop.stop(&mut scheduler, &mut [&mut sink]);
        assert_eq!(sink.rests, 0);

        render_loop.start(&mut scheduler);
        render_loop.stop(&mut scheduler, &mut [&mut sink]);
        render_loop.stop(&mut scheduler, &mut [&mut sink]);

        assert_eq!(sink.rests, 1);
        assert_eq!(scheduler.queued(), 0);
    }

    #[test]
    fn callbacks_from_a_cancelled_chain_are_ignored() {
        let mut scheduler = ManualScheduler::new();
        let mut render_loop = RenderLoop::new();
        let mut sink = CountingSink::default();
        let frame = snapshot();

        render_loop.start(&mut scheduler);
        let stale = scheduler.fire().unwrap();
        // Restart before the old callback is delivered.
        render_loop.start(&mut scheduler);

        render_loop.frame(&mut scheduler, stale, true, Some(&frame), &mut [&mut sink]);
        assert_eq!(sink.frames, 0);
        assert_eq!(scheduler.queued(), 1);
    }
}
