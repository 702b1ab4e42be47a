//! Test helper module for bgmix-core integration tests
//!
//! Provides an observable playback source the mixer can drive, canned clips,
//! and a mixer constructor preloaded with a small registry.

#![allow(dead_code)]

use bgmix_core::source::{AudioClip, AudioSource};
use bgmix_core::{MixerConfig, MusicMixer};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize a test subscriber once per process. Safe to call from every test.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Clip handle with identity equality on its name.
#[derive(Debug, Clone)]
pub struct TestClip {
    pub name: &'static str,
    pub length: f32,
}

impl TestClip {
    pub fn new(name: &'static str, length: f32) -> Self {
        Self { name, length }
    }
}

impl PartialEq for TestClip {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl AudioClip for TestClip {
    fn length(&self) -> f32 {
        self.length
    }
}

/// Observable state of one test source.
#[derive(Debug, Default)]
pub struct SourceState {
    pub clip: Option<TestClip>,
    pub position: f32,
    pub gain: f32,
    pub pitch: f32,
    pub pan: f32,
    pub looping: bool,
    pub playing: bool,
    pub play_calls: u32,
    pub stop_calls: u32,
}

impl SourceState {
    pub fn clip_name(&self) -> Option<&'static str> {
        self.clip.as_ref().map(|c| c.name)
    }
}

/// Playback source backed by shared observable state, so tests can inspect
/// what the mixer did after handing the source over.
pub struct TestSource {
    state: Rc<RefCell<SourceState>>,
}

impl TestSource {
    pub fn new() -> (Self, Rc<RefCell<SourceState>>) {
        let state = Rc::new(RefCell::new(SourceState::default()));
        (
            Self {
                state: Rc::clone(&state),
            },
            state,
        )
    }
}

impl AudioSource for TestSource {
    type Clip = TestClip;

    fn set_clip(&mut self, clip: TestClip) {
        self.state.borrow_mut().clip = Some(clip);
    }

    fn clip(&self) -> Option<TestClip> {
        self.state.borrow().clip.clone()
    }

    fn seek(&mut self, seconds: f32) {
        self.state.borrow_mut().position = seconds;
    }

    fn play(&mut self) {
        let mut state = self.state.borrow_mut();
        state.playing = true;
        state.play_calls += 1;
    }

    fn stop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.playing = false;
        state.stop_calls += 1;
    }

    fn set_gain(&mut self, gain: f32) {
        self.state.borrow_mut().gain = gain;
    }

    fn set_pitch(&mut self, pitch: f32) {
        self.state.borrow_mut().pitch = pitch;
    }

    fn set_pan(&mut self, pan: f32) {
        self.state.borrow_mut().pan = pan;
    }

    fn set_looping(&mut self, looping: bool) {
        self.state.borrow_mut().looping = looping;
    }

    fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }
}

/// A mixer plus handles to both source states.
pub struct TestRig {
    pub mixer: MusicMixer<TestSource>,
    pub a: Rc<RefCell<SourceState>>,
    pub b: Rc<RefCell<SourceState>>,
}

impl TestRig {
    /// Mixer with the standard two-track registry: "menu" (10 s) and
    /// "battle" (8 s).
    pub fn new() -> Self {
        Self::with_config(MixerConfig::default())
    }

    pub fn with_config(config: MixerConfig) -> Self {
        init_tracing();
        let (source_a, a) = TestSource::new();
        let (source_b, b) = TestSource::new();
        let mut mixer = MusicMixer::with_config(source_a, source_b, config);
        mixer.register_track("menu", TestClip::new("menu", 10.0));
        mixer.register_track("battle", TestClip::new("battle", 8.0));
        Self { mixer, a, b }
    }

    /// Advance the mixer in fixed steps until `total` seconds have passed.
    pub fn run_for(&mut self, total: f32, step: f32) {
        let mut elapsed = 0.0;
        while elapsed < total {
            self.mixer.tick(step);
            elapsed += step;
        }
    }

    pub fn gain_a(&self) -> f32 {
        self.a.borrow().gain
    }

    pub fn gain_b(&self) -> f32 {
        self.b.borrow().gain
    }

    /// The state holding the named clip, if exactly one channel has it.
    pub fn holder_of(&self, name: &str) -> Option<Rc<RefCell<SourceState>>> {
        let in_a = self.a.borrow().clip_name() == Some(name);
        let in_b = self.b.borrow().clip_name() == Some(name);
        match (in_a, in_b) {
            (true, false) => Some(Rc::clone(&self.a)),
            (false, true) => Some(Rc::clone(&self.b)),
            _ => None,
        }
    }
}
