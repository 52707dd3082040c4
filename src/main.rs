//! Breakout entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use breakout::audio::AudioManager;
    use breakout::consts::*;
    use breakout::platform::{AudioOut, InputEvent, PresentError, Surface};
    use breakout::renderer::{Label, RenderState, Scene};
    use breakout::{Game, RoundConfig, Settings};

    /// WebGPU canvas plus DOM text for the score line and banner
    struct WebSurface {
        render_state: RenderState,
        score_el: Option<Element>,
        banner_el: Option<Element>,
    }

    impl WebSurface {
        fn new(render_state: RenderState, document: &Document) -> Self {
            Self {
                render_state,
                score_el: document.get_element_by_id("score"),
                banner_el: document.get_element_by_id("banner"),
            }
        }

        /// Place a label over the canvas, in percent of the playfield
        fn place(el: &Element, label: &Label, scene: &Scene) {
            let left = label.x as f32 / scene.width as f32 * 100.0;
            let top = label.y as f32 / scene.height as f32 * 100.0;
            let transform = if label.centered {
                "translate(-50%, -50%)"
            } else {
                "none"
            };
            let _ = el.set_attribute(
                "style",
                &format!(
                    "left:{left:.2}%;top:{top:.2}%;font-size:{}px;transform:{transform}",
                    label.size_px
                ),
            );
            el.set_text_content(Some(&label.text));
        }
    }

    impl Surface for WebSurface {
        fn present(&mut self, scene: &Scene) -> Result<(), PresentError> {
            if let Some(el) = &self.score_el {
                Self::place(el, &scene.score, scene);
            }
            if let Some(el) = &self.banner_el {
                match &scene.banner {
                    Some(banner) => {
                        Self::place(el, banner, scene);
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }

            match self.render_state.render(scene) {
                Ok(()) => Ok(()),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                    Err(PresentError::Lost)
                }
                Err(wgpu::SurfaceError::OutOfMemory) => Err(PresentError::OutOfMemory),
                Err(e) => Err(PresentError::Other(format!("{e:?}"))),
            }
        }
    }

    /// Browser-side game instance
    struct App {
        game: Game,
        surface: Option<WebSurface>,
        audio: AudioManager,
        accumulator: f32,
        last_time: f64,
        /// Events gathered by DOM listeners since the last frame
        pending: Vec<InputEvent>,
        /// Animation-frame time at which the round ended
        ended_at: Option<f64>,
        finished: bool,
    }

    impl App {
        fn new(game: Game, audio: AudioManager) -> Self {
            Self {
                game,
                surface: None,
                audio,
                accumulator: 0.0,
                last_time: 0.0,
                pending: Vec::new(),
                ended_at: None,
                finished: false,
            }
        }

        /// Drain input and run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let events: Vec<InputEvent> = self.pending.drain(..).collect();
            if events.contains(&InputEvent::Quit) {
                log::info!("Quit requested");
                self.finish();
                return;
            }
            for event in events {
                self.game.handle_event(event);
            }

            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.game.step(&mut self.audio);
                self.accumulator -= SIM_DT;
                substeps += 1;

                if self.game.outcome().is_some() {
                    self.ended_at.get_or_insert(time);
                    break;
                }
            }
            self.audio.pump();
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(surface) = &mut self.surface
                && let Err(e) = surface.present(&self.game.scene())
            {
                match e {
                    PresentError::OutOfMemory => log::error!("Out of memory!"),
                    e => log::warn!("Render error: {e}"),
                }
            }
        }

        fn finish(&mut self) {
            self.audio.stop_music();
            self.finished = true;
            log::info!("Final score: {}", self.game.state.score);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Breakout starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("no document");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("no canvas");
            return;
        };

        // Backing store at device resolution, playfield aspect from CSS
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = match Game::new(RoundConfig::default(), seed) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Invalid round configuration: {e}");
                return;
            }
        };
        let app = Rc::new(RefCell::new(App::new(game, AudioManager::new(Settings::load()))));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {e}");
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {e}");
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let field = (SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32);
        match RenderState::new(surface, &adapter, width, height, field).await {
            Ok(render_state) => {
                app.borrow_mut().surface = Some(WebSurface::new(render_state, &document));
            }
            Err(e) => log::error!("Failed to create device: {e}"),
        }

        setup_input_handlers(&canvas, app.clone());
        setup_focus_handlers(app.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        app.borrow_mut().audio.start_music();

        // Start game loop
        request_animation_frame(app);

        log::info!("Breakout running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Pointer position in playfield pixels
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let client_w = canvas_clone.client_width().max(1) as f32;
                let x = event.offset_x() as f32 * SCREEN_WIDTH as f32 / client_w;
                app.borrow_mut()
                    .pending
                    .push(InputEvent::PointerMoved { x: x as i32 });
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Button release launches; it is also the user gesture audio needs
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.audio.resume();
                a.pending.push(InputEvent::PointerReleased);
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: autoplay, mute and quit
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut a = app.borrow_mut();
            match event.key().as_str() {
                "i" | "I" => {
                    let enabled = !a.game.input.autoplay;
                    a.game.set_autoplay(enabled);
                    log::info!("Autoplay: {enabled}");
                }
                "m" | "M" => {
                    let muted = !a.audio.settings().muted;
                    a.audio.set_muted(muted);
                    log::info!("Muted: {muted}");
                }
                "Escape" => a.pending.push(InputEvent::Quit),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_focus_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Window blur (click outside)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                if a.audio.settings().mute_on_blur {
                    a.audio.set_suspended(true);
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                a.audio.set_suspended(false);
                // Don't replay the time spent in the background
                a.last_time = 0.0;
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            match a.ended_at {
                // Banner is up; just wait out the hold
                Some(ended) => {
                    a.audio.pump();
                    if time - ended >= END_BANNER_HOLD_MS as f64 {
                        a.finish();
                    }
                }
                None => {
                    a.update(dt, time);
                    a.render();
                }
            }

            if a.finished {
                return;
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless autoplay round at the real tick rate, logging progress
#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::Context;

    use breakout::consts::TICKS_PER_SECOND;
    use breakout::game::run;
    use breakout::platform::headless::{FixedRatePacer, LogSurface, RecordingAudio, ScriptedInput};
    use breakout::Game;

    env_logger::init();
    log::info!("Breakout (native) starting...");

    let config = load_config(std::env::args().nth(1).as_deref())?;
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before UNIX epoch")?
        .as_millis() as u64;

    let mut game = Game::new(config, seed).context("start round")?;
    game.set_autoplay(true);

    let mut surface = LogSurface::default();
    let mut audio = RecordingAudio::default();
    let mut input = ScriptedInput::default();
    let mut pacer = FixedRatePacer::new(TICKS_PER_SECOND);

    let outcome = run(&mut game, &mut surface, &mut audio, &mut input, &mut pacer);
    log::info!(
        "Finished: {outcome:?} after {} ticks, {} cues",
        game.state.time_ticks,
        audio.cues.len()
    );
    Ok(())
}

/// Optional round configuration as JSON; defaults without a path
#[cfg(not(target_arch = "wasm32"))]
fn load_config(path: Option<&str>) -> anyhow::Result<breakout::RoundConfig> {
    use anyhow::Context;
    use breakout::RoundConfig;

    let Some(path) = path else {
        return Ok(RoundConfig::default());
    };
    let json =
        std::fs::read_to_string(path).with_context(|| format!("read round config {path}"))?;
    RoundConfig::from_json(&json).with_context(|| format!("parse round config {path}"))
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_without_path() {
        let config = load_config(None).unwrap();
        assert_eq!(config, breakout::RoundConfig::default());
    }

    #[test]
    fn test_config_errors_name_the_file() {
        let missing = "no/such/round.json";
        let err = load_config(Some(missing)).unwrap_err();
        assert!(format!("{err:#}").contains(missing));

        let path = std::env::temp_dir().join("breakout_bad_round.json");
        std::fs::write(&path, r#"{ "lives": 0 }"#).unwrap();
        let path = path.to_string_lossy().into_owned();
        let err = load_config(Some(&path)).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains(&path));
        assert!(message.contains("at least one life"));
        assert!(err.downcast_ref::<breakout::ConfigError>().is_some());
    }
}
