//! Pet Rescue entry point
//!
//! The wasm32 build wires a session to the page: pointer/touch listeners, the
//! animation-frame loop, and DOM nodes for the entities and HUD. The native
//! build runs a short headless demo round.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, MouseEvent, TouchEvent};

    use pet_rescue::sim::{Facing, GameEvent, PetKind, Playfield};
    use pet_rescue::{FrameControl, Session};

    /// Viewport width below which the phone-sized board is used
    const MOBILE_BREAKPOINT: f64 = 768.0;

    /// Game instance: the session plus the DOM nodes it keeps in sync
    struct Game {
        session: Session,
        board: HtmlElement,
        character: HtmlElement,
        pet_nodes: Vec<HtmlElement>,
        bad_guy_nodes: Vec<HtmlElement>,
        /// True while an animation-frame callback chain is scheduled
        loop_running: bool,
    }

    impl Game {
        /// Mirror the current game state into the DOM
        fn sync_dom(&mut self, document: &Document) {
            let state = self.session.state();

            place(&self.character, state.character.pos, state.character.facing);

            sync_pool(
                document,
                &self.board,
                &mut self.pet_nodes,
                state.pets.len(),
                "pet",
            );
            for (node, pet) in self.pet_nodes.iter().zip(&state.pets) {
                node.set_class_name(match pet.kind {
                    PetKind::Cat => "pet cat",
                    PetKind::Dog => "pet dog",
                });
                place(node, pet.pos, pet.facing);
            }

            sync_pool(
                document,
                &self.board,
                &mut self.bad_guy_nodes,
                state.bad_guys.len(),
                "bad-guy",
            );
            for (node, guy) in self.bad_guy_nodes.iter().zip(&state.bad_guys) {
                place(node, guy.pos, guy.facing);
            }

            // Score, with a pop animation when it changes
            if let Some(el) = document.get_element_by_id("score-value") {
                let new_text = state.score.to_string();
                let old_text = el.text_content().unwrap_or_default();
                if old_text != new_text {
                    el.set_text_content(Some(&new_text));
                    let _ = el.set_attribute("class", "pop");
                } else {
                    let _ = el.set_attribute("class", "");
                }
            }
        }
    }

    /// Position an entity node and mirror its sprite by facing
    fn place(el: &HtmlElement, pos: Vec2, facing: Facing) {
        let flip = if facing == Facing::Left { -1.0 } else { 1.0 };
        let _ = el.style().set_property(
            "transform",
            &format!("translate({:.1}px, {:.1}px) scaleX({flip})", pos.x, pos.y),
        );
    }

    /// Grow or shrink a pool of entity nodes to match the live entity count
    fn sync_pool(
        document: &Document,
        board: &HtmlElement,
        pool: &mut Vec<HtmlElement>,
        count: usize,
        class: &str,
    ) {
        while pool.len() < count {
            let Some(node) = create_div(document, class) else {
                return;
            };
            let _ = board.append_child(&node);
            pool.push(node);
        }
        while pool.len() > count {
            if let Some(node) = pool.pop() {
                node.remove();
            }
        }
    }

    fn create_div(document: &Document, class: &str) -> Option<HtmlElement> {
        let el: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
        el.set_class_name(class);
        Some(el)
    }

    fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    /// Board geometry by viewport width: a narrow phone board with a low
    /// wall, otherwise the desktop layout
    fn playfield_for_viewport(window: &web_sys::Window) -> Playfield {
        let viewport_w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(1024.0);
        if viewport_w < MOBILE_BREAKPOINT {
            Playfield::new(360.0, 640.0, 480.0)
        } else {
            Playfield::new(1000.0, 600.0, 300.0)
        }
    }

    /// Size the board and put the wall and gate strips where the field says
    fn apply_layout(document: &Document, field: &Playfield) {
        let gate = field.gate();
        if let Some(board) = html_by_id(document, "game-board") {
            let style = board.style();
            let _ = style.set_property("width", &format!("{}px", field.width));
            let _ = style.set_property("height", &format!("{}px", field.height));
        }
        if let Some(road) = html_by_id(document, "road") {
            let style = road.style();
            let _ = style.set_property("top", &format!("{}px", field.wall_y));
            let _ = style.set_property("height", &format!("{}px", field.height - field.wall_y));
        }
        if let Some(wall) = html_by_id(document, "wall") {
            let _ = wall
                .style()
                .set_property("top", &format!("{}px", field.wall_y));
        }
        if let Some(gate_el) = html_by_id(document, "gate") {
            let style = gate_el.style();
            let _ = style.set_property("top", &format!("{}px", gate.y));
            let _ = style.set_property("left", &format!("{}px", gate.x));
            let _ = style.set_property("width", &format!("{}px", gate.width));
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pet Rescue starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let field = playfield_for_viewport(&window);
        apply_layout(&document, &field);

        let board = html_by_id(&document, "game-board").expect("no game board");
        let character = html_by_id(&document, "character").expect("no character element");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(field, seed),
            board,
            character,
            pet_nodes: Vec::new(),
            bad_guy_nodes: Vec::new(),
            loop_running: false,
        }));

        log::info!("Game initialized with seed: {}", seed);

        // Park the character sprite at its idle spot before the first round
        game.borrow_mut().sync_dom(&document);

        setup_input_handlers(game.clone());
        setup_round_buttons(game.clone());
        setup_resize_handler(game);

        log::info!("Pet Rescue running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let board = game.borrow().board.clone();

        // Mouse move
        {
            let game = game.clone();
            let board_clone = board.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = board_clone.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                let y = event.client_y() as f32 - rect.top() as f32;
                game.borrow_mut().session.pointer_moved(x, y);
            });
            let _ = board
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let board_clone = board.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = board_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    game.borrow_mut().session.pointer_moved(x, y);
                }
            });
            let _ = board
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_round_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                begin_round(&game, "start-overlay");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                begin_round(&game, "game-over-overlay");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Start a round from either overlay, kicking the frame loop if it is
    /// not already scheduled
    fn begin_round(game: &Rc<RefCell<Game>>, overlay_id: &str) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(el) = document.get_element_by_id(overlay_id) {
            let _ = el.set_attribute("class", "hidden");
        }

        let kick = {
            let mut g = game.borrow_mut();
            if g.session.start() && !g.loop_running {
                g.loop_running = true;
                true
            } else {
                false
            }
        };
        if kick {
            request_animation_frame(game.clone());
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            let field = playfield_for_viewport(&window);
            apply_layout(&document, &field);
            let mut g = game.borrow_mut();
            g.session.resize(field);
            g.sync_dom(&document);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
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
        let document = web_sys::window().unwrap().document().unwrap();

        let keep_running = {
            let mut g = game.borrow_mut();
            let report = g.session.frame(time);
            g.sync_dom(&document);

            for event in &report.events {
                if let GameEvent::RoundOver { score } = event {
                    show_game_over(&document, *score);
                }
            }

            match report.control {
                FrameControl::Continue => true,
                FrameControl::Stop => {
                    g.loop_running = false;
                    false
                }
            }
        };

        if keep_running {
            request_animation_frame(game);
        }
    }

    fn show_game_over(document: &Document, score: u32) {
        if let Some(el) = document.get_element_by_id("final-score") {
            el.set_text_content(Some(&score.to_string()));
        }
        if let Some(el) = document.get_element_by_id("game-over-overlay") {
            let _ = el.set_attribute("class", "");
        }
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
    log::info!("Pet Rescue (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the playable web version");

    println!("\nRunning demo round...");
    demo_round();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive a seeded session for up to 30 simulated seconds, sweeping the
/// pointer left and right, and dump where the round ended up
#[cfg(not(target_arch = "wasm32"))]
fn demo_round() {
    use pet_rescue::sim::Playfield;
    use pet_rescue::{FrameControl, Session};

    let field = Playfield::new(1000.0, 600.0, 300.0);
    let mut session = Session::new(field, 12345);
    session.start();

    let mut now_ms = 0.0;
    for frame in 0..1800u32 {
        // Sweep the pointer across the character's half of the board
        let sweep = (frame as f32 / 120.0).sin();
        session.pointer_moved(500.0 + sweep * 400.0, 150.0);

        let report = session.frame(now_ms);
        for event in &report.events {
            log::info!("frame {frame}: {event:?}");
        }
        if report.control == FrameControl::Stop {
            break;
        }
        now_ms += 1000.0 / 60.0;
    }

    let state = session.state();
    println!(
        "✓ Demo finished: {:?}, score {}, {} pets and {} bad guys on the board",
        state.phase,
        state.score,
        state.pets.len(),
        state.bad_guys.len()
    );
    if let Ok(json) = serde_json::to_string(state) {
        log::debug!("final state: {json}");
    }
}
