//! Hatchery entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use hatchery::input::KeyAction;
    use hatchery::renderer::canvas::CanvasSurface;
    use hatchery::{Game, GameConfig};

    const CANVAS_WIDTH: u32 = 1280;
    const CANVAS_HEIGHT: u32 = 720;

    /// Browser-side session: the game plus its canvas
    struct App {
        game: Game,
        surface: CanvasSurface,
        last_time: f64,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Hatchery starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas1")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(CANVAS_WIDTH);
        canvas.set_height(CANVAS_HEIGHT);

        let surface = CanvasSurface::new(&canvas, &document).expect("no 2d context");

        let config = GameConfig {
            seed: js_sys::Date::now() as u64,
            width: CANVAS_WIDTH as f32,
            height: CANVAS_HEIGHT as f32,
            ..GameConfig::default()
        };
        let mut game = match Game::new(config) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Invalid game config: {}", e);
                return;
            }
        };
        game.init();

        let app = Rc::new(RefCell::new(App {
            game,
            surface,
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, app.clone());
        setup_popup(app.clone());

        request_animation_frame(app);

        log::info!("Hatchery running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse down - start steering
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut()
                    .game
                    .pointer_down(event.offset_x() as f32, event.offset_y() as f32);
            });
            listen(canvas, "mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up - stop steering, keep the last target
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut()
                    .game
                    .pointer_up(event.offset_x() as f32, event.offset_y() as f32);
            });
            listen(canvas, "mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - drag the target while pressed
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut()
                    .game
                    .pointer_move(event.offset_x() as f32, event.offset_y() as f32);
            });
            listen(canvas, "mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = KeyAction::from_key(&event.key()) {
                    app.borrow_mut().game.handle_key(action);
                }
            });
            listen(&window, "keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Start screen: its button hides the popup and starts a fresh session
    fn setup_popup(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        let Ok(Some(popup)) = document.query_selector(".popup") else {
            log::warn!("No .popup element, starting without a start screen");
            return;
        };
        let Ok(Some(button)) = popup.query_selector(".popup__button") else {
            log::warn!("Popup has no .popup__button");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            if let Err(e) = popup.class_list().remove_1("popup_opened") {
                log::warn!("Could not close popup: {:?}", e);
            }
            app.borrow_mut().game.restart();
        });
        listen(&button, "click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Register `callback` for `event`, logging (not panicking) on failure
    fn listen(target: &EventTarget, event: &str, callback: &js_sys::Function) {
        if let Err(e) = target.add_event_listener_with_callback(event, callback) {
            log::warn!("Failed to register {} listener: {:?}", event, e);
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed, game loop stopped: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut guard = app.borrow_mut();
            let App {
                game,
                surface,
                last_time,
            } = &mut *guard;

            let delta = (time - *last_time) as f32;
            *last_time = time;
            game.render(surface, delta);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hatchery (native) starting...");
    log::info!("Native mode runs a headless session - serve the wasm build for the playable version");

    if let Err(e) = headless::run(std::env::args().nth(1).as_deref()) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session against a recording surface
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use anyhow::{Context, Result};
    use hatchery::renderer::recording::RecordingSurface;
    use hatchery::{Game, GameConfig};

    /// One minute of play at 60Hz host frames
    const FRAMES: u32 = 3600;
    const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Run with the config in `path` (JSON) or the defaults
    pub fn run(path: Option<&str>) -> Result<()> {
        let config = match path {
            Some(path) => load_config(path)?,
            None => GameConfig::default(),
        };

        let mut surface = RecordingSurface::new(config.width, config.height);
        let mut game = Game::new(config)?;
        game.init();

        for frame in 0..FRAMES {
            // Sweep the guardian back and forth across the play band
            if frame % 240 == 0 {
                let config = game.config();
                let x = if (frame / 240) % 2 == 0 {
                    config.width * 0.2
                } else {
                    config.width * 0.8
                };
                let y = config.top_margin + (config.height - config.top_margin) * 0.5;
                game.pointer_down(x, y);
            }

            game.render(&mut surface, FRAME_MS);
            surface.take_commands();

            if game.is_game_over() {
                log::info!("Session ended after {} frames", frame + 1);
                break;
            }
        }

        log::info!(
            "Score {}, lost {}, outcome {:?}",
            game.score(),
            game.lost_hatchlings(),
            game.outcome()
        );
        Ok(())
    }

    fn load_config(path: &str) -> Result<GameConfig> {
        let json =
            std::fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
        GameConfig::from_json(&json).with_context(|| format!("loading config {path}"))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_missing_config_reports_read_failure() {
            let err = run(Some("/nonexistent/hatchery.json")).unwrap_err();
            let message = format!("{err:#}");
            assert!(message.starts_with("reading config /nonexistent/hatchery.json"));
            assert!(!message.contains("parse error"));
        }

        #[test]
        fn test_invalid_config_reports_load_failure() {
            let path = std::env::temp_dir().join("hatchery-bad-config.json");
            std::fs::write(&path, r#"{ "fps": 0 }"#).unwrap();
            let err = run(path.to_str()).unwrap_err();
            assert!(format!("{err:#}").contains("invalid logic rate"));
            let _ = std::fs::remove_file(&path);
        }
    }
}
