//! Neon Blaster entry point
//!
//! Native builds run a headless attract-mode session (the ship flies itself)
//! against simulated 60 Hz time and print the result. Browser builds drive
//! [`neon_blaster::Game`] from `requestAnimationFrame` and export a small
//! JS API (start, initials, JSON snapshots) for the page's canvas and menus.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use neon_blaster::audio::{AudioManager, LogBackend};
    use neon_blaster::persistence::{FileStore, KvStore, MemoryStore};
    use neon_blaster::platform::{self, time::time_seed};
    use neon_blaster::ui::leaderboard_rows;
    use neon_blaster::{Game, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Ten simulated minutes
    const MAX_FRAMES: u64 = 60 * 60 * 10;
    const DEFAULT_DATA_DIR: &str = ".neon-blaster";

    fn load_tuning() -> Tuning {
        let Some(path) = std::env::var_os("NEON_TUNING") else {
            return Tuning::default();
        };
        match Tuning::from_file(&PathBuf::from(path)) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Ignoring tuning file: {}", e);
                Tuning::default()
            }
        }
    }

    fn open_store() -> Box<dyn KvStore> {
        let dir = std::env::var_os("NEON_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        match FileStore::open(&dir) {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{} - scores will not persist", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    pub fn run() {
        platform::init_logging();

        let seed = std::env::args()
            .nth(1)
            .and_then(|arg| arg.parse().ok())
            .unwrap_or_else(time_seed);
        log::info!("Neon Blaster (native, attract mode) seed={}", seed);

        let audio = AudioManager::new(Box::new(LogBackend));
        let mut game = Game::new(seed, load_tuning(), open_store(), audio);
        game.autopilot = true;
        game.start();

        let mut now = 0.0;
        for _ in 0..MAX_FRAMES {
            now += FRAME_MS;
            game.frame(now);
            if game.state().phase.is_finished() {
                break;
            }
        }

        if game.awaiting_initials() {
            game.submit_initials("CPU");
        }

        let hud = game.hud();
        println!(
            "Phase: {:?}  Score: {}  Level: {}  Kills: {}  Lives: {}",
            game.state().phase,
            hud.score,
            hud.level,
            hud.kills,
            hud.lives
        );
        println!("High scores:");
        for (rank, (initials, score)) in leaderboard_rows(game.leaderboard()).iter().enumerate() {
            println!("  {}. {:<3} {:>10}", rank + 1, initials, score);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use neon_blaster::audio::{AudioManager, LogBackend};
    use neon_blaster::platform::storage::LocalStorage;
    use neon_blaster::platform::{self, Action, Clock, time::time_seed};
    use neon_blaster::{Game, Tuning};

    /// Game plus the clock that feeds it
    struct WebGame {
        game: Game<LocalStorage>,
        clock: Clock,
    }

    type SharedGame = Rc<RefCell<WebGame>>;

    thread_local! {
        static GAME: RefCell<Option<SharedGame>> = const { RefCell::new(None) };
    }

    /// Run `f` against the running game; None before `run` has been called
    fn with_game<R>(f: impl FnOnce(&mut WebGame) -> R) -> Option<R> {
        let game = GAME.with(|slot| slot.borrow().clone())?;
        let mut g = game.borrow_mut();
        Some(f(&mut g))
    }

    pub fn run() {
        platform::init_logging();

        let seed = time_seed();
        let game = Game::new(
            seed,
            Tuning::default(),
            LocalStorage::new(),
            AudioManager::new(Box::new(LogBackend)),
        );
        let web = Rc::new(RefCell::new(WebGame {
            game,
            clock: Clock::new(),
        }));
        GAME.with(|slot| *slot.borrow_mut() = Some(web.clone()));
        log::info!("Neon Blaster initialized with seed: {}", seed);

        setup_input_handlers(web.clone());
        request_animation_frame(web);
    }

    fn setup_input_handlers(web: SharedGame) {
        let Some(window) = web_sys::window() else {
            log::error!("No window - input disabled");
            return;
        };

        // Key down
        {
            let web = web.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if web.borrow_mut().game.input.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let web = web.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                web.borrow_mut().game.input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: drop held keys and pause a running session
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = web.borrow_mut();
                g.game.input.clear();
                if g.game.state().is_active() {
                    g.game.input.press(Action::Pause);
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(web: SharedGame) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(web);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(web: SharedGame) {
        {
            let mut g = web.borrow_mut();
            let now = g.clock.now_ms();
            g.game.frame(now);
        }
        request_animation_frame(web);
    }

    /// Start or restart a session (title screen / game-over "play" button)
    #[wasm_bindgen]
    pub fn start_game() {
        with_game(|g| g.game.start());
    }

    /// Leave the current session for the title screen
    #[wasm_bindgen]
    pub fn back_to_menu() {
        with_game(|g| g.game.back_to_menu());
    }

    #[wasm_bindgen]
    pub fn set_autopilot(enabled: bool) {
        with_game(|g| g.game.autopilot = enabled);
    }

    /// On-screen touch buttons send the same key names as the keyboard
    #[wasm_bindgen]
    pub fn touch_start(key: &str) -> bool {
        with_game(|g| g.game.input.key_down(key)).unwrap_or(false)
    }

    #[wasm_bindgen]
    pub fn touch_end(key: &str) -> bool {
        with_game(|g| g.game.input.key_up(key)).unwrap_or(false)
    }

    #[wasm_bindgen]
    pub fn awaiting_initials() -> bool {
        with_game(|g| g.game.awaiting_initials()).unwrap_or(false)
    }

    /// Record the finished session's score; returns the rank achieved
    #[wasm_bindgen]
    pub fn submit_initials(initials: &str) -> Option<u32> {
        with_game(|g| g.game.submit_initials(initials))
            .flatten()
            .map(|rank| rank as u32)
    }

    /// HUD values as JSON
    #[wasm_bindgen]
    pub fn hud_json() -> String {
        with_game(|g| serde_json::to_string(&g.game.hud()).unwrap_or_default()).unwrap_or_default()
    }

    /// Full simulation snapshot as JSON, for the canvas renderer
    #[wasm_bindgen]
    pub fn state_json() -> String {
        with_game(|g| serde_json::to_string(g.game.state()).unwrap_or_default())
            .unwrap_or_default()
    }

    #[wasm_bindgen]
    pub fn leaderboard_json() -> String {
        with_game(|g| serde_json::to_string(g.game.leaderboard().entries()).unwrap_or_default())
            .unwrap_or_default()
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}
