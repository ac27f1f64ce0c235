use crate::audio::WebAudioBackend;
use crate::canvas::CanvasSurface;
use crate::dom::LocalStorageStore;
use crate::engine::{
    Instrument, MotionController, MotionRequest, PadView, Position, PositionStore,
    WaveformSampler,
};
use crate::frame::FrameLoop;
use crate::input::DragState;
use crate::readout;
use instant::Instant;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Mutable page state. Borrowed only for the duration of one handler or frame.
pub struct App {
    pub instrument: Instrument<WebAudioBackend>,
    pub motion: MotionController,
    pub sampler: WaveformSampler,
    pub surface: CanvasSurface,
    pub store: LocalStorageStore,
    pub rng: StdRng,
    pub drag: DragState,
}

/// Cheap-to-clone handle shared by every listener.
///
/// The frame loops live outside the `App` cell so they can be cancelled
/// while a handler holds no borrow.
#[derive(Clone)]
pub struct AppHandle {
    pub app: Rc<RefCell<App>>,
    pub document: web::Document,
    pub audio_ctx: web::AudioContext,
    motion_loop: Rc<FrameLoop>,
    waveform_loop: Rc<FrameLoop>,
}

impl AppHandle {
    pub fn new(app: App, document: web::Document, audio_ctx: web::AudioContext) -> Self {
        Self {
            app: Rc::new(RefCell::new(app)),
            document,
            audio_ctx,
            motion_loop: Rc::new(FrameLoop::new("motion")),
            waveform_loop: Rc::new(FrameLoop::new("waveform")),
        }
    }

    pub fn render_all(&self) {
        let view = self.app.borrow().instrument.view();
        readout::render(&self.document, &view);
    }

    /// Direct position input. Graph and readout are updated before returning.
    pub fn set_position(&self, position: Position) -> PadView {
        let view = self.app.borrow_mut().instrument.set_position(position);
        readout::render_position(&self.document, &view);
        view
    }

    pub fn save_position(&self) {
        let app = self.app.borrow();
        if let Err(e) = app.store.save(app.instrument.position()) {
            log::warn!("[store] could not save position: {}", e);
        }
    }

    pub fn set_resonance(&self, q: f32) {
        let view = self.app.borrow_mut().instrument.set_resonance(q);
        readout::render(&self.document, &view);
    }

    // ---------------- Motion ----------------

    /// Replace any in-flight glide with a new one toward the request target.
    pub fn start_motion(&self, request: MotionRequest) {
        if self.app.borrow().drag.blocks_motion() {
            log::debug!("[motion] {:?} ignored while dragging", request);
            return;
        }
        self.motion_loop.cancel();
        {
            let mut app = self.app.borrow_mut();
            let App {
                instrument,
                motion,
                rng,
                ..
            } = &mut *app;
            let from = instrument.position();
            let to = request.target(rng);
            motion.start(from, to, Instant::now());
        }
        let handle = self.clone();
        self.motion_loop.start(move || handle.motion_frame());
    }

    pub fn cancel_motion(&self) {
        let was_running = self.motion_loop.cancel();
        let was_active = self.app.borrow_mut().motion.cancel();
        if was_running || was_active {
            log::debug!("[motion] cancelled");
        }
    }

    fn motion_frame(&self) -> bool {
        let step = {
            let mut app = self.app.borrow_mut();
            let Some(step) = app.motion.tick(Instant::now()) else {
                return false;
            };
            step
        };
        self.set_position(step.position);
        if step.finished {
            self.save_position();
            log::debug!("[motion] settled");
        }
        !step.finished
    }

    // ---------------- Transport ----------------

    pub fn toggle_playing(&self) {
        let playing = self.app.borrow().instrument.is_playing();
        self.set_playing(!playing);
    }

    pub fn set_playing(&self, playing: bool) {
        if playing {
            self.resume_audio();
            {
                let mut app = self.app.borrow_mut();
                let App {
                    instrument,
                    sampler,
                    surface,
                    ..
                } = &mut *app;
                instrument.set_playing(true);
                sampler.set_playing(true, surface);
            }
            let handle = self.clone();
            self.waveform_loop.start(move || handle.waveform_frame());
        } else {
            self.waveform_loop.cancel();
            let mut app = self.app.borrow_mut();
            let App {
                instrument,
                sampler,
                surface,
                ..
            } = &mut *app;
            sampler.set_playing(false, surface);
            instrument.set_playing(false);
        }
        readout::render_transport(&self.document, playing);
    }

    fn waveform_frame(&self) -> bool {
        let mut app = self.app.borrow_mut();
        let App {
            instrument,
            sampler,
            surface,
            ..
        } = &mut *app;
        sampler.tick(instrument, surface)
    }

    fn resume_audio(&self) {
        if self.audio_ctx.state() == web::AudioContextState::Running {
            return;
        }
        match self.audio_ctx.resume() {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("[gesture] audio resume rejected: {:?}", e);
                } else {
                    log::info!("[gesture] audio resumed");
                }
            }),
            Err(e) => log::warn!("[gesture] audio resume failed: {:?}", e),
        }
    }

    // ---------------- Teardown ----------------

    /// Page hidden into the back/forward cache: stop sound and motion but
    /// keep the graph so a restored page plays again.
    pub fn suspend(&self) {
        self.cancel_motion();
        self.set_playing(false);
        self.save_position();
        _ = self.audio_ctx.suspend();
        log::info!("[pad] suspended");
    }

    /// Stop both loops, clear the preview and release all audio resources.
    pub fn shutdown(&self) {
        self.motion_loop.cancel();
        self.waveform_loop.cancel();
        {
            let mut app = self.app.borrow_mut();
            let App {
                instrument,
                motion,
                sampler,
                surface,
                store,
                ..
            } = &mut *app;
            motion.cancel();
            if let Err(e) = store.save(instrument.position()) {
                log::warn!("[store] could not save position: {}", e);
            }
            sampler.set_playing(false, surface);
            instrument.shutdown();
        }
        _ = self.audio_ctx.close();
        log::info!("[pad] shut down");
    }
}
