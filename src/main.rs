//! Golden Eagle entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use golden_eagle::GameConfig;
    use golden_eagle::audio::WebAudio;
    use golden_eagle::consts::*;
    use golden_eagle::platform::{BrowserClock, LocalStorage};
    use golden_eagle::screens::{App, FrameInput, ScreenId, Services, UiCommand};

    /// Game instance holding all state
    struct Game {
        app: App,
        accumulator: f32,
        last_time: f64,
        input: FrameInput,
        /// Screen shown on the previous frame, to toggle DOM panels on change
        shown: Option<ScreenId>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let storage = LocalStorage::new();
            let config = GameConfig::load(&storage);
            let services = Services {
                storage: Box::new(storage),
                audio: Box::new(WebAudio::new()),
                clock: Box::new(BrowserClock),
            };
            Self {
                app: App::new(config, services, seed),
                accumulator: 0.0,
                last_time: 0.0,
                input: FrameInput::default(),
                shown: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                self.app.tick(&input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot commands after processing
                self.input.command = None;
            }
        }

        /// Mirror the current screen into the page
        fn update_dom(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let current = self.app.current();
            if self.shown != Some(current) {
                for (id, lines_id, screen) in [
                    ("menu", "menu-lines", ScreenId::Menu),
                    ("hud", "hud-lines", ScreenId::Gameplay),
                    ("highscores", "highscore-lines", ScreenId::HighScores),
                ] {
                    if let Some(el) = document.get_element_by_id(id) {
                        let class = if screen == current { "" } else { "hidden" };
                        let _ = el.set_attribute("class", class);
                    }
                    if screen != current {
                        continue;
                    }
                    if let Some(el) = document.get_element_by_id(lines_id) {
                        el.set_text_content(Some(&self.app.screen().lines().join("\n")));
                    }
                }
                self.shown = Some(current);
            }

            let Some(hud) = self.app.hud() else { return };

            if let Some(el) = document.get_element_by_id("hud-health") {
                let style = format!(
                    "width: {:.0}%; background: {}",
                    hud.health_fraction * 100.0,
                    hud.health_band.css_color()
                );
                let _ = el.set_attribute("style", &style);
            }
            if let Some(el) = document.get_element_by_id("hud-nests") {
                el.set_text_content(Some(&hud.nest_text));
            }
            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&hud.score_text));
            }
            if let Some(el) = document.get_element_by_id("game-over") {
                match hud.banner {
                    Some(text) => {
                        el.set_text_content(Some(text));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }

        /// Arrow keys steer; Enter and friends press the visible button
        fn on_key(&mut self, key: &str, down: bool) -> bool {
            let directions = &mut self.input.directions;
            match key {
                "ArrowUp" => directions.up = down,
                "ArrowDown" => directions.down = down,
                "ArrowLeft" => directions.left = down,
                "ArrowRight" => directions.right = down,
                _ if down => {
                    let command = match (self.app.current(), key) {
                        (ScreenId::Menu, "Enter" | " ") => UiCommand::StartGame,
                        (ScreenId::Menu, "h" | "H") => UiCommand::ShowHighScores,
                        (ScreenId::Gameplay, "Enter" | " " | "r" | "R") => UiCommand::Restart,
                        (ScreenId::HighScores, "Enter" | " ") => UiCommand::PlayAgain,
                        (ScreenId::HighScores, "Escape" | "m" | "M") => UiCommand::BackToMenu,
                        _ => return false,
                    };
                    self.input.command = Some(command);
                }
                _ => return false,
            }
            true
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Golden Eagle starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        for (id, command) in [
            ("start-btn", UiCommand::StartGame),
            ("highscores-btn", UiCommand::ShowHighScores),
            ("menu-btn", UiCommand::BackToMenu),
            ("play-again-btn", UiCommand::PlayAgain),
            ("restart-btn", UiCommand::Restart),
        ] {
            setup_button(game.clone(), id, command);
        }

        request_animation_frame(game);

        log::info!("Golden Eagle running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        for (event_name, down) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if game.borrow_mut().on_key(&event.key(), down) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Releasing keys while the tab is hidden never reaches keyup
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().input.directions = Default::default();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_button(game: Rc<RefCell<Game>>, id: &str, command: UiCommand) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Button #{} missing from page", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            game.borrow_mut().input.command = Some(command);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.update_dom();
        }

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
    log::info!("Golden Eagle (native) starting...");
    log::info!("No native renderer - running a headless autopilot game");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1);
    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use golden_eagle::GameConfig;
    use golden_eagle::HighScores;
    use golden_eagle::consts::TICKS_PER_SECOND;
    use golden_eagle::platform::{Clock, FixedClock, MemoryStorage};
    use golden_eagle::sim::{EntityKind, Simulation, TickInput, tick};

    /// Give up after five minutes of game time
    const MAX_TICKS: u64 = 5 * 60 * TICKS_PER_SECOND as u64;

    /// Chase the height of the next pickup ahead, otherwise cruise mid-sky
    fn autopilot(sim: &Simulation) -> TickInput {
        let player = sim.player.pos;
        let target_y = sim
            .entities
            .of(EntityKind::Nest)
            .iter()
            .chain(sim.entities.of(EntityKind::Heal))
            .filter(|e| e.pos.x > player.x)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
            .map_or(250.0, |e| e.pos.y);

        TickInput {
            up: target_y < player.y - 5.0,
            down: target_y > player.y + 5.0,
            ..Default::default()
        }
    }

    pub fn run(seed: u64) {
        let mut sim = Simulation::new(GameConfig::default(), seed);
        while !sim.state.is_terminal() && sim.time_ticks < MAX_TICKS {
            let input = autopilot(&sim);
            tick(&mut sim, &input);
            for event in sim.drain_events() {
                log::debug!("tick {}: {:?}", sim.time_ticks, event);
            }
        }

        log::info!(
            "Seed {}: {:?} after {:.1}s, score {}, nests {}/{}, health {}",
            seed,
            sim.phase(),
            sim.time_ticks as f32 / TICKS_PER_SECOND as f32,
            sim.state.score(),
            sim.state.nests(),
            sim.config.required_nests,
            sim.state.health()
        );

        let mut storage = MemoryStorage::new();
        let mut table = HighScores::load(&storage);
        table.record(sim.state.score(), FixedClock::default().date_label(), sim.state.nests());
        if let Err(e) = table.save(&mut storage) {
            log::warn!("Failed to save high scores: {}", e);
        }
    }
}
