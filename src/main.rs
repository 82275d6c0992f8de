//! Neon Snake entry point
//!
//! Handles platform-specific wiring and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use neon_snake::audio::AudioPlayer;
    use neon_snake::highscore::LocalStorageStore;
    use neon_snake::render::Renderer;
    use neon_snake::session::{Command, Event, GamePhase, Session};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorageStore>,
        renderer: Renderer,
        audio: AudioPlayer,
    }

    impl Game {
        /// Forward one event, play its side signals and redraw
        fn dispatch(&mut self, event: Event) {
            for signal in self.session.handle_event(event) {
                self.audio.play(signal);
            }
            self.renderer.draw(self.session.data(), self.session.phase());
        }
    }

    /// Map a key code to a command for the current phase. Raw input becomes
    /// a typed command here; the core never sees key codes.
    fn map_key(code: &str, phase: GamePhase) -> Option<Command> {
        match (phase, code) {
            (GamePhase::Menu, "Space" | "Enter") => Some(Command::Start),
            (GamePhase::GameOver, "Space" | "Enter") => Some(Command::Restart),
            (GamePhase::Playing | GamePhase::Paused, "Space") => Some(Command::TogglePause),
            (GamePhase::Playing, "ArrowUp" | "KeyW") => Some(Command::MoveUp),
            (GamePhase::Playing, "ArrowDown" | "KeyS") => Some(Command::MoveDown),
            (GamePhase::Playing, "ArrowLeft" | "KeyA") => Some(Command::MoveLeft),
            (GamePhase::Playing, "ArrowRight" | "KeyD") => Some(Command::MoveRight),
            _ => None,
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Snake starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(LocalStorageStore::new(), seed);
        let Some(renderer) = Renderer::new(&document) else {
            log::error!("missing #grid element - cannot render");
            return;
        };
        let audio = AudioPlayer::new();

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            audio,
        }));

        // first paint before any event arrives
        {
            let g = game.borrow();
            g.renderer.draw(g.session.data(), g.session.phase());
        }

        setup_keyboard(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Neon Snake running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            if let Some(cmd) = map_key(event.code().as_str(), g.session.phase()) {
                event.prevent_default();
                g.dispatch(Event::Command(cmd));
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let doc = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if doc.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut g = game.borrow_mut();
                if g.session.phase() == GamePhase::Playing {
                    g.dispatch(Event::Command(Command::TogglePause));
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().dispatch(Event::Frame { now_ms: time });
        request_animation_frame(game);
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
    log::info!("Neon Snake (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nRunning simulation smoke test...");
    smoke_test_simulation();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_test_simulation() {
    use neon_snake::highscore::MemoryStore;
    use neon_snake::session::{Command, Event, GameEvent, Session};

    let mut session = Session::new(MemoryStore::new(), 7);
    session.handle_event(Event::Command(Command::Start));

    // head starts at x=10 moving right; the wall at x=20 ends the run
    let mut now_ms = 0.0;
    for _ in 0..64 {
        now_ms += 200.0;
        let signals = session.handle_event(Event::Frame { now_ms });
        if signals.contains(&GameEvent::GameOver) {
            println!(
                "✓ Simulation smoke test passed (final score {})",
                session.data().score
            );
            return;
        }
    }
    panic!("snake never reached the wall");
}
