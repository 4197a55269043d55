//! Moto Racer entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::convert::FromWasmAbi;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, EventTarget, HtmlCanvasElement};

    use moto_racer::Session;
    use moto_racer::persistence::{LocalStorage, MemoryStorage, Storage};
    use moto_racer::platform::{InputEvent, key_event};
    use moto_racer::renderer::{Palette, RenderState, build_frame, build_splash};
    use moto_racer::sim::{GameEvent, GamePhase};

    /// Game instance holding all state
    struct Game {
        session: Session<Box<dyn Storage>>,
        render_state: Option<RenderState>,
        document: Document,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        last_phase: GamePhase,
    }

    impl Game {
        fn new(session: Session<Box<dyn Storage>>, document: Document) -> Self {
            let last_phase = session.phase();
            Self {
                session,
                render_state: None,
                document,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_phase,
            }
        }

        /// Step the simulation for this animation frame
        fn update(&mut self, time: f64) {
            let events = self.session.frame_at(time);
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::Crashed { .. }))
            {
                log::info!("Run over, showing overlay");
            }

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            if self.session.phase() != self.last_phase {
                self.last_phase = self.session.phase();
                self.sync_overlay();
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let palette = Palette::for_settings(self.session.settings().high_contrast);
            let vertices = match self.session.phase() {
                GamePhase::Idle => build_splash(&palette),
                _ => build_frame(self.session.state(), &palette),
            };
            if let Some(ref mut render_state) = self.render_state {
                render_state.clear = palette.background;
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            self.set_text("score", &self.session.score().to_string());
            self.set_text("best", &self.session.best().to_string());
            self.set_text("pauseBtn", self.session.pause_label());
            if self.session.settings().show_fps {
                self.set_text("fps", &self.fps.to_string());
            }
        }

        /// Show the splash/game-over overlay or hide it while playing
        fn sync_overlay(&self) {
            let Some(overlay_el) = self.document.get_element_by_id("overlay") else {
                return;
            };
            match self.session.overlay() {
                Some(overlay) => {
                    self.set_text("stateTitle", overlay.title);
                    self.set_text("stateSubtitle", &overlay.subtitle);
                    self.set_text("playBtn", overlay.button);
                    let _ = overlay_el.class_list().remove_1("hidden");
                }
                None => {
                    let _ = overlay_el.class_list().add_1("hidden");
                }
            }
        }

        fn handle(&mut self, event: InputEvent) {
            self.session.handle_event(event);
            if self.session.phase() != self.last_phase {
                self.last_phase = self.session.phase();
                self.sync_overlay();
            }
        }
    }

    /// Attach a closure to a DOM event for the lifetime of the page
    fn listen<E, F>(target: &EventTarget, name: &str, handler: F)
    where
        E: FromWasmAbi + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn open_storage() -> Box<dyn Storage> {
        match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{}; best score will not persist", e);
                Box::new(MemoryStorage::new())
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("logger init failed: {}", e).into());
        }

        log::info!("Moto Racer starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("no document");
            return;
        };

        let canvas: HtmlCanvasElement = match document
            .get_element_by_id("game")
            .and_then(|el| el.dyn_into().ok())
        {
            Some(canvas) => canvas,
            None => {
                log::error!("no #game canvas");
                return;
            }
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(open_storage(), seed);
        log::info!("Session created with seed: {}", seed);
        let game = Rc::new(RefCell::new(Game::new(session, document.clone())));

        match init_renderer(canvas, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Renderer unavailable: {}", e),
        }

        setup_input_handlers(&window, &document, game.clone());
        setup_auto_pause(&window, &document, game.clone());

        {
            let g = game.borrow();
            g.sync_overlay();
            g.update_hud();
        }

        request_animation_frame(game);

        log::info!("Moto Racer running!");
    }

    async fn init_renderer(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, moto_racer::renderer::RenderInitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);
        RenderState::new(surface, &adapter, width, height).await
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        document: &Document,
        game: Rc<RefCell<Game>>,
    ) {
        // Keyboard
        for (name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            listen(window, name, move |event: web_sys::KeyboardEvent| {
                if let Some(input) = key_event(&event.code(), pressed) {
                    if event.code() == "Space" {
                        event.prevent_default();
                    }
                    game.borrow_mut().handle(input);
                }
            });
        }

        // On-screen hold buttons
        let holds: [(&str, fn(bool) -> InputEvent); 3] = [
            ("leftBtn", |pressed| InputEvent::SteerLeft { pressed }),
            ("rightBtn", |pressed| InputEvent::SteerRight { pressed }),
            ("boostBtn", |pressed| InputEvent::Boost { pressed }),
        ];
        for (id, make) in holds {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            for (name, pressed) in [
                ("mousedown", true),
                ("mouseup", false),
                ("mouseleave", false),
                ("touchstart", true),
                ("touchend", false),
            ] {
                let game = game.clone();
                listen(&btn, name, move |event: web_sys::Event| {
                    if name.starts_with("touch") {
                        event.prevent_default();
                    }
                    game.borrow_mut().handle(make(pressed));
                });
            }
        }

        // Pause toggle
        if let Some(btn) = document.get_element_by_id("pauseBtn") {
            let game = game.clone();
            listen(&btn, "click", move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.handle(InputEvent::PauseToggle);
                g.update_hud();
            });
        }

        // Play / Play Again
        if let Some(btn) = document.get_element_by_id("playBtn") {
            listen(&btn, "click", move |_event: web_sys::MouseEvent| {
                game.borrow_mut().handle(InputEvent::Play);
            });
        }
    }

    fn setup_auto_pause(window: &web_sys::Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            listen(document, "visibilitychange", move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.session.phase() == GamePhase::Running {
                        g.handle(InputEvent::PauseToggle);
                        g.update_hud();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
        }

        // Window blur: held buttons would otherwise stick
        listen(window, "blur", move |_event: web_sys::FocusEvent| {
            game.borrow_mut().session.release_input();
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Moto Racer (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    headless::run(seed, 3);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Autopilot runs that exercise the session without a display
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use moto_racer::Session;
    use moto_racer::consts::*;
    use moto_racer::lane_center;
    use moto_racer::persistence::MemoryStorage;
    use moto_racer::platform::InputEvent;
    use moto_racer::sim::{GamePhase, GameState};

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up on a run after this many seconds
    const RUN_LIMIT_SECS: f32 = 120.0;

    pub fn run(seed: u64, runs: u32) {
        let mut session = Session::new(MemoryStorage::new(), seed);
        for run in 1..=runs {
            session.handle_event(InputEvent::Play);
            let mut steering = Steer::None;
            while session.phase() == GamePhase::Running && session.state().elapsed < RUN_LIMIT_SECS {
                let wanted = choose_steer(session.state());
                if wanted != steering {
                    for event in transition(steering, wanted) {
                        session.handle_event(event);
                    }
                    steering = wanted;
                }
                session.frame(FRAME_DT);
            }
            for event in transition(steering, Steer::None) {
                session.handle_event(event);
            }
            if session.phase() == GamePhase::Running {
                session.game_over();
            }
            log::info!(
                "Run {}: {:.1}s, score {}, best {}",
                run,
                session.state().elapsed,
                session.score(),
                session.best()
            );
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Steer {
        None,
        Left,
        Right,
    }

    fn transition(from: Steer, to: Steer) -> Vec<InputEvent> {
        let mut events = Vec::new();
        match from {
            Steer::Left => events.push(InputEvent::SteerLeft { pressed: false }),
            Steer::Right => events.push(InputEvent::SteerRight { pressed: false }),
            Steer::None => {}
        }
        match to {
            Steer::Left => events.push(InputEvent::SteerLeft { pressed: true }),
            Steer::Right => events.push(InputEvent::SteerRight { pressed: true }),
            Steer::None => {}
        }
        events
    }

    /// Head for the lane whose nearest incoming obstacle is farthest away
    fn choose_steer(state: &GameState) -> Steer {
        let player = state.player.rect();
        let clearance = |lane: u32| {
            let center = lane_center(lane);
            state
                .obstacles
                .iter()
                .filter(|o| {
                    let r = o.rect();
                    r.min().x < center && r.max().x > center && r.min().y < player.max().y
                })
                .map(|o| player.min().y - o.rect().max().y)
                .fold(f32::MAX, f32::min)
        };
        let best_lane = (0..LANE_COUNT)
            .max_by(|&a, &b| clearance(a).total_cmp(&clearance(b)))
            .unwrap_or(PLAYER_START_LANE);

        let offset = lane_center(best_lane) - player.center().x;
        if offset < -STEER_SPEED * FRAME_DT {
            Steer::Left
        } else if offset > STEER_SPEED * FRAME_DT {
            Steer::Right
        } else {
            Steer::None
        }
    }
}
