//! Runs under `wasm-pack test --headless --chrome`; native builds compile it away.
#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use falling_letters::simulation::compositor::{backing_scale, backing_size};
use falling_letters::simulation::{DisplayImage, Simulation, Viewport};
use falling_letters::{version, FallingLetters, SimulationConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

struct Icon;

impl DisplayImage for Icon {
    fn is_ready(&self) -> bool {
        true
    }
}

fn detached_canvas() -> HtmlCanvasElement {
    web_sys::window()
        .and_then(|w| w.document())
        .expect("document")
        .create_element("canvas")
        .expect("element")
        .dyn_into::<HtmlCanvasElement>()
        .expect("canvas")
}

#[wasm_bindgen_test]
fn version_matches_package() {
    assert_eq!(version(), env!("CARGO_PKG_VERSION"));
}

#[wasm_bindgen_test]
fn simulation_runs_on_wasm_clock() {
    let config = SimulationConfig::from_json(r#"{ "bodyCount": 2, "seed": 7 }"#).expect("config parses");
    let mut sim = Simulation::new(Viewport::new(640.0, 480.0), config, Rc::new(Icon)).expect("valid setup");
    sim.enable_perf_metrics(true);
    sim.start(0.0).expect("starts");
    sim.tick(1000.0);

    assert_eq!(sim.body_count(), 2);
    assert!(sim.stats().steps_total() > 0);
    sim.stop();
}

#[wasm_bindgen_test]
fn mount_sizes_canvas_and_unmount_tears_down() {
    let window = web_sys::window().expect("window");
    let canvas = detached_canvas();

    let mut app = FallingLetters::mount(canvas.clone(), Some(r#"{ "bodyCount": 3, "seed": 5 }"#.to_string()))
        .expect("mounts");
    assert!(app.is_mounted());
    assert!(app.is_running());

    let css_width = window.inner_width().expect("width").as_f64().expect("number") as f32;
    let scale = backing_scale(window.device_pixel_ratio());
    assert_eq!(canvas.width(), backing_size(css_width, scale));

    app.unmount();
    assert!(!app.is_mounted());
    assert!(!app.is_running());
    assert_eq!(app.body_count(), 0);

    app.unmount();
    assert!(!app.is_mounted());
}

#[wasm_bindgen_test]
fn mount_rejects_invalid_config() {
    let result = FallingLetters::mount(detached_canvas(), Some(r#"{ "restitution": 2 }"#.to_string()));
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn remounting_reuses_the_shared_icon() {
    let mut first = FallingLetters::mount(detached_canvas(), None).expect("first mount");
    first.unmount();
    let second = FallingLetters::mount(detached_canvas(), None).expect("second mount");
    assert!(second.is_running());
}
