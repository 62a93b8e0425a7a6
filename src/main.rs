//! Block Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use block_breaker::Settings;
    use block_breaker::consts::*;
    use block_breaker::driver::{FrameScheduler, Key, LoopDriver, Presenter};
    use block_breaker::renderer::{RenderOptions, RenderState};
    use block_breaker::sim::{GameEvent, GamePhase, GameState};

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
    type Driver = LoopDriver<RafScheduler, RenderState, DomPresenter>;

    /// requestAnimationFrame-backed scheduler
    struct RafScheduler {
        callback: FrameCallback,
        handle: Option<i32>,
    }

    impl FrameScheduler for RafScheduler {
        fn request_frame(&mut self) {
            if self.handle.is_some() {
                return;
            }
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(callback) = self.callback.borrow().as_ref() {
                self.handle = window
                    .request_animation_frame(callback.as_ref().unchecked_ref())
                    .ok();
            }
        }

        fn cancel(&mut self) {
            if let Some(handle) = self.handle.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(handle);
                }
            }
        }

        fn on_fired(&mut self) {
            self.handle = None;
        }

        fn is_pending(&self) -> bool {
            self.handle.is_some()
        }
    }

    /// Mirrors presentation events into the DOM
    struct DomPresenter {
        document: web_sys::Document,
    }

    impl DomPresenter {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "modal" } else { "modal hidden" });
            }
        }

        fn hide_modals(&self) {
            self.set_visible("start-modal", false);
            self.set_visible("game-over-modal", false);
            self.set_visible("level-complete-modal", false);
        }
    }

    impl Presenter for DomPresenter {
        fn on_event(&mut self, event: GameEvent) {
            match event {
                GameEvent::ScoreChanged(score) => self.set_text("score-value", &score.to_string()),
                GameEvent::LivesChanged(lives) => self.set_text("lives-value", &lives.to_string()),
                GameEvent::LevelComplete => self.set_visible("level-complete-modal", true),
                GameEvent::GameOver { final_score } => {
                    self.set_text("final-score", &final_score.to_string());
                    self.set_visible("game-over-modal", true);
                }
            }
        }
    }

    fn set_pause_label(phase: GamePhase) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(btn) = document.get_element_by_id("pause-btn") {
            let label = if phase == GamePhase::Paused { "Resume" } else { "Pause" };
            btn.set_text_content(Some(label));
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Block Breaker starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let settings = Settings::load();

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Backing store at device resolution, playfield aspect
        let dpr = window.device_pixel_ratio();
        let width = (PLAYFIELD_WIDTH as f64 * dpr) as u32;
        let height = (PLAYFIELD_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .expect("Failed to create device");

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler {
            callback: callback.clone(),
            handle: None,
        };
        let presenter = DomPresenter {
            document: document.clone(),
        };
        let mut driver = LoopDriver::new(
            GameState::new(settings.tuning.clone()),
            scheduler,
            render_state,
            presenter,
        )
        .with_options(RenderOptions::from(&settings));
        if settings.autopilot {
            driver.set_autopilot(Some(settings.autopilot_seed));
        }
        let driver = Rc::new(RefCell::new(driver));

        // The frame callback re-arms itself through the scheduler
        {
            let driver = driver.clone();
            *callback.borrow_mut() = Some(Closure::new(move |_time: f64| {
                driver.borrow_mut().frame();
            }));
        }

        let settings = Rc::new(RefCell::new(settings));
        setup_input_handlers(&canvas, driver.clone(), settings);
        setup_buttons(driver.clone());
        setup_auto_pause(driver);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        log::info!("Block Breaker ready");
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        driver: Rc<RefCell<Driver>>,
        settings: Rc<RefCell<Settings>>,
    ) {
        let document = web_sys::window().unwrap().document().unwrap();

        // Mouse move anywhere on the page, mapped into playfield pixels
        {
            let driver = driver.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas.get_bounding_client_rect();
                if rect.width() <= 0.0 {
                    return;
                }
                let relative = event.client_x() as f64 - rect.left();
                let x = (relative * PLAYFIELD_WIDTH as f64 / rect.width()) as f32;
                driver.borrow_mut().pointer_moved(x);
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Arrow keys are hold intents
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut d = driver.borrow_mut();
                match event.key().as_str() {
                    "Left" | "ArrowLeft" => d.key_down(Key::Left),
                    "Right" | "ArrowRight" => d.key_down(Key::Right),
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut d = driver.borrow_mut();
                match event.key().as_str() {
                    "Left" | "ArrowLeft" => d.key_up(Key::Left),
                    "Right" | "ArrowRight" => d.key_up(Key::Right),
                    "p" | "P" => {
                        let phase = d.toggle_pause();
                        set_pause_label(phase);
                    }
                    "i" | "I" => {
                        let mut settings = settings.borrow_mut();
                        let pilot = settings.toggle_autopilot(js_sys::Date::now() as u64);
                        settings.save();
                        d.set_autopilot(pilot);
                    }
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(driver: Rc<RefCell<Driver>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        // Start and restart share one transition
        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let driver = driver.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    let mut d = driver.borrow_mut();
                    d.presenter().hide_modals();
                    d.start();
                    set_pause_label(d.phase());
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("next-level-btn") {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut d = driver.borrow_mut();
                if d.advance_level() {
                    d.presenter().set_visible("level-complete-modal", false);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("pause-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let phase = driver.borrow_mut().toggle_pause();
                set_pause_label(phase);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(driver: Rc<RefCell<Driver>>) {
        let window = web_sys::window().unwrap();

        // Window blur (click outside, tab switch)
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut d = driver.borrow_mut();
            if d.phase() == GamePhase::Running {
                let phase = d.toggle_pause();
                set_pause_label(phase);
                log::info!("Auto-paused (window blur)");
            }
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Block Breaker (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - use `trunk serve` for the web version");

    let settings = block_breaker::Settings::load();
    headless::run(&settings, 50_000);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use block_breaker::Settings;
    use block_breaker::driver::{EventLog, HeadlessTarget, LoopDriver, ManualScheduler};
    use block_breaker::renderer::RenderOptions;
    use block_breaker::sim::{GameEvent, GamePhase, GameState};

    /// Play with the autopilot until game over or the frame cap
    pub fn run(settings: &Settings, max_frames: u64) {
        let mut driver = LoopDriver::new(
            GameState::new(settings.tuning.clone()),
            ManualScheduler::default(),
            HeadlessTarget::default(),
            EventLog::default(),
        )
        .with_options(RenderOptions::from(settings));
        driver.set_autopilot(Some(settings.autopilot_seed));
        driver.start();

        while driver.target().frames < max_frames {
            if !driver.scheduler_mut().take() {
                if driver.phase() == GamePhase::LevelComplete {
                    driver.advance_level();
                    continue;
                }
                break;
            }
            driver.frame();
        }

        let state = driver.state();
        let levels_cleared = driver
            .presenter()
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelComplete))
            .count();
        println!(
            "{:?} after {} frames: level {}, score {}, lives {}, levels cleared {}",
            state.phase,
            driver.target().frames,
            state.level,
            state.score,
            state.lives,
            levels_cleared
        );
    }
}
