//! LlamaBox entry point
//!
//! Handles platform-specific initialization and frame scheduling. The wasm
//! build renders llamas as absolutely-positioned emoji divs and drives the
//! simulation from `requestAnimationFrame`; the native build runs a headless
//! demo with simulated time.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, MouseEvent};

    use glam::Vec2;
    use llamabox::consts::*;
    use llamabox::sim::{Driver, Herd};

    /// App instance holding the herd and its driver
    struct App {
        herd: Herd,
        driver: Driver,
        /// Pending requestAnimationFrame handle, for cancellation on reset
        raf_handle: Option<i32>,
    }

    impl App {
        fn new() -> Self {
            Self {
                herd: Herd::new(),
                driver: Driver::new(),
                raf_handle: None,
            }
        }
    }

    fn window() -> web_sys::Window {
        web_sys::window().expect("no window")
    }

    fn document() -> Document {
        window().document().expect("no document")
    }

    /// Monotonic timestamp in ms, same clock requestAnimationFrame reports
    fn now_ms() -> f64 {
        window().performance().map(|p| p.now()).unwrap_or(0.0)
    }

    fn viewport() -> Vec2 {
        let w = window();
        let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Vec2::new(width as f32, height as f32)
    }

    /// Ground contact line; re-derived every tick so resizes take effect
    fn ground_level() -> f32 {
        viewport().y - GROUND_HEIGHT
    }

    /// Launch origin: the center of the crate sitting on the ground strip
    fn crate_origin() -> Vec2 {
        let vp = viewport();
        Vec2::new(vp.x / 2.0, vp.y - GROUND_HEIGHT - CRATE_SIZE / 2.0)
    }

    /// Llamas passing close behind the crate render under it; everything
    /// else renders on top. Purely a function of position, not entity state.
    fn z_index_for(pos: Vec2) -> i32 {
        let origin = crate_origin();
        let behind = (pos.y - origin.y).abs() < BEHIND_CRATE_DY
            && (pos.x - origin.x).abs() < BEHIND_CRATE_DX;
        if behind { 1 } else { 10 }
    }

    /// Draw the herd into the `#stage` element, one emoji div per llama,
    /// keyed by entity ID. Divs are only ever removed by `clear_stage`.
    fn render(herd: &Herd) {
        let document = document();
        let Some(stage) = document.get_element_by_id("stage") else {
            return;
        };

        for llama in herd.llamas() {
            let dom_id = format!("llama-{}", llama.id);
            let el: HtmlElement = match document.get_element_by_id(&dom_id) {
                Some(el) => el.dyn_into().expect("llama node is not an element"),
                None => {
                    let el: HtmlElement = document
                        .create_element("div")
                        .expect("create llama div")
                        .dyn_into()
                        .expect("div is not an html element");
                    el.set_id(&dom_id);
                    el.set_class_name("llama");
                    el.set_text_content(Some("\u{1F999}"));
                    let _ = stage.append_child(&el);
                    el
                }
            };

            let style = el.style();
            let _ = style.set_property("left", &format!("{}px", llama.pos.x));
            let _ = style.set_property("top", &format!("{}px", llama.pos.y));
            let _ = style.set_property("transform", &format!("rotate({}deg)", llama.rotation));
            let _ = style.set_property("z-index", &z_index_for(llama.pos).to_string());
        }
    }

    fn clear_stage() {
        if let Some(stage) = document().get_element_by_id("stage") {
            stage.set_inner_html("");
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("LlamaBox starting...");

        let app = Rc::new(RefCell::new(App::new()));

        setup_spawn_handler(app.clone());
        setup_reset_button(app.clone());

        log::info!("LlamaBox ready - click anywhere to launch a llama");
    }

    fn setup_spawn_handler(app: Rc<RefCell<App>>) {
        let closure = {
            let app = app.clone();
            Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let target = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                let schedule = {
                    let mut a = app.borrow_mut();
                    let App { driver, herd, .. } = &mut *a;
                    let id = herd.spawn(crate_origin(), target);
                    log::info!("llama {} launched toward ({:.0}, {:.0})", id, target.x, target.y);
                    driver.start(herd, now_ms())
                };
                if schedule {
                    schedule_frame(app.clone());
                }
            })
        };
        let _ = document()
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_reset_button(app: Rc<RefCell<App>>) {
        if let Some(btn) = document().get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                // Don't let the reset click fall through and spawn a llama
                event.stop_propagation();

                let mut a = app.borrow_mut();
                a.driver.stop();
                if let Some(handle) = a.raf_handle.take() {
                    let _ = window().cancel_animation_frame(handle);
                }
                a.herd.clear();
                drop(a);

                clear_stage();
                log::info!("herd reset");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("no #reset-btn element; reset unavailable");
        }
    }

    fn schedule_frame(app: Rc<RefCell<App>>) {
        let closure = {
            let app = app.clone();
            Closure::once(move |time: f64| {
                frame(app, time);
            })
        };
        let handle = window()
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .expect("requestAnimationFrame failed");
        app.borrow_mut().raf_handle = Some(handle);
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        let keep_going = {
            let mut a = app.borrow_mut();
            a.raf_handle = None;
            let App { driver, herd, .. } = &mut *a;
            driver.tick(herd, ground_level(), time)
        };

        render(&app.borrow().herd);

        if keep_going {
            schedule_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use llamabox::consts::FRAME_MS;
    use llamabox::sim::{Driver, Herd};

    env_logger::init();
    log::info!("LlamaBox (native) starting...");
    log::info!("Native mode is a headless demo - build for wasm32 for the interactive version");

    let ground = 600.0;
    let origin = Vec2::new(400.0, 450.0);
    let mut herd = Herd::new();
    herd.spawn(origin, Vec2::new(700.0, 200.0));
    herd.spawn(origin, Vec2::new(150.0, 300.0));
    herd.spawn(origin, origin); // straight up

    let mut driver = Driver::new();
    let mut now = 0.0;
    let mut ticks = 0u32;
    if driver.start(&herd, now) {
        loop {
            now += FRAME_MS;
            ticks += 1;
            if !driver.tick(&mut herd, ground, now) {
                break;
            }
        }
    }

    log::info!("herd settled after {} ticks", ticks);
    for llama in herd.llamas() {
        println!(
            "llama {} rests at ({:.1}, {:.1}), rotation {:.0} deg",
            llama.id, llama.pos.x, llama.pos.y, llama.rotation
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
