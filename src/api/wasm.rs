//! Browser host: mounts a [`Simulation`] on a `<canvas>`.
//!
//! `mount` sizes the canvas to the window, loads the shared icon, attaches
//! the pointer listeners and starts a `requestAnimationFrame` loop that ticks
//! the physics and composites the icons. The simulation starts at
//! `performance.now()`, the clock animation-frame timestamps use; without a
//! `Performance` object it starts on the first frame instead.
//! `unmount` (or dropping the handle) removes the listeners, cancels the
//! pending frame and tears the simulation down.
//!
//! Simulation units are CSS pixels. On HiDPI screens only the backing buffer
//! grows (by the device pixel ratio) and the context is scaled to match, so
//! the pointer is mapped against the logical CSS-sized surface.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, MouseEvent, Window};

use crate::domain::config::SimulationConfig;
use crate::domain::icon::{data_url_prefix, ICON_SVG};
use crate::input::{PagePointer, SurfaceMetrics};
use crate::simulation::compositor::{backing_scale, backing_size};
use crate::simulation::{
    DisplayImage, LifecycleState, Simulation, StepStats, Surface, Viewport,
};

type SharedSimulation = Rc<RefCell<Simulation<HtmlImageElement>>>;
type FrameCallback = Closure<dyn FnMut(f64)>;
type MouseCallback = Closure<dyn FnMut(MouseEvent)>;

impl DisplayImage for HtmlImageElement {
    fn is_ready(&self) -> bool {
        // `complete` is also true for broken images; those have no size.
        self.complete() && self.natural_width() > 0
    }
}

impl Surface<HtmlImageElement> for CanvasRenderingContext2d {
    fn clear(&mut self, width: f32, height: f32) {
        self.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn draw_image(&mut self, image: &HtmlImageElement, x: f32, y: f32, width: f32, height: f32) {
        // A throwing draw only loses this icon for this frame.
        let _ = self.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            x as f64,
            y as f64,
            width as f64,
            height as f64,
        );
    }
}

thread_local! {
    /// The icon is created once per page and shared by every mount.
    static ICON: RefCell<Option<Rc<HtmlImageElement>>> = const { RefCell::new(None) };
    static ICON_ON_ERROR: RefCell<Option<Closure<dyn FnMut()>>> = const { RefCell::new(None) };
}

fn shared_icon(window: &Window) -> Result<Rc<HtmlImageElement>, JsValue> {
    if let Some(icon) = ICON.with(|slot| slot.borrow().clone()) {
        return Ok(icon);
    }

    let image = HtmlImageElement::new()?;
    let on_error = Closure::wrap(Box::new(|| {
        log_warn!("icon image failed to load; bodies will be drawn without it");
    }) as Box<dyn FnMut()>);
    image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    image.set_src(&format!("{}{}", data_url_prefix(), window.btoa(ICON_SVG)?));

    let image = Rc::new(image);
    ICON.with(|slot| *slot.borrow_mut() = Some(image.clone()));
    ICON_ON_ERROR.with(|slot| *slot.borrow_mut() = Some(on_error));
    Ok(image)
}

/// Metrics of the logical surface: the viewport stands in for the buffer,
/// whatever resolution the backing store was given.
fn surface_metrics(canvas: &HtmlCanvasElement, viewport: Viewport) -> SurfaceMetrics {
    let rect = canvas.get_bounding_client_rect();
    SurfaceMetrics {
        left: rect.left() as f32,
        top: rect.top() as f32,
        client_width: canvas.client_width() as f32,
        client_height: canvas.client_height() as f32,
        buffer_width: viewport.width,
        buffer_height: viewport.height,
        pixel_ratio: 1.0,
    }
}

/// Give `canvas` a CSS size of `viewport` and a backing store `scale` times larger.
fn provision_canvas(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    viewport: Viewport,
    scale: f64,
) -> Result<(), JsValue> {
    canvas.set_width(backing_size(viewport.width, scale));
    canvas.set_height(backing_size(viewport.height, scale));
    let style = canvas.style();
    style.set_property("width", &format!("{}px", viewport.width))?;
    style.set_property("height", &format!("{}px", viewport.height))?;
    // Resizing the buffer resets the transform, so set it after.
    ctx.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0)
}

fn page_pointer(window: &Window, event: &MouseEvent) -> PagePointer {
    PagePointer {
        page_x: event.page_x() as f32,
        page_y: event.page_y() as f32,
        scroll_x: window.page_x_offset().unwrap_or(0.0) as f32,
        scroll_y: window.page_y_offset().unwrap_or(0.0) as f32,
    }
}

/// DOM listeners owned by one mount
struct Listeners {
    window: Window,
    canvas: HtmlCanvasElement,
    on_move: MouseCallback,
    on_down: MouseCallback,
    on_up: MouseCallback,
}

impl Listeners {
    fn attach(
        window: &Window,
        canvas: &HtmlCanvasElement,
        viewport: Viewport,
        sim: &SharedSimulation,
    ) -> Result<Self, JsValue> {
        let on_move = {
            let (window, canvas, sim) = (window.clone(), canvas.clone(), sim.clone());
            Closure::wrap(Box::new(move |event: MouseEvent| {
                if let Ok(mut sim) = sim.try_borrow_mut() {
                    sim.pointer_moved(page_pointer(&window, &event), surface_metrics(&canvas, viewport));
                }
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        let on_down = {
            let (window, canvas, sim) = (window.clone(), canvas.clone(), sim.clone());
            Closure::wrap(Box::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                if let Ok(mut sim) = sim.try_borrow_mut() {
                    sim.pointer_moved(page_pointer(&window, &event), surface_metrics(&canvas, viewport));
                    sim.pointer_pressed();
                }
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        let on_up = {
            let sim = sim.clone();
            Closure::wrap(Box::new(move |_event: MouseEvent| {
                if let Ok(mut sim) = sim.try_borrow_mut() {
                    sim.pointer_released();
                }
            }) as Box<dyn FnMut(MouseEvent)>)
        };

        window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        canvas.add_event_listener_with_callback("mousedown", on_down.as_ref().unchecked_ref())?;
        window.add_event_listener_with_callback("mouseup", on_up.as_ref().unchecked_ref())?;

        Ok(Self {
            window: window.clone(),
            canvas: canvas.clone(),
            on_move,
            on_down,
            on_up,
        })
    }

    fn detach(&self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("mousemove", self.on_move.as_ref().unchecked_ref());
        let _ = self
            .canvas
            .remove_event_listener_with_callback("mousedown", self.on_down.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("mouseup", self.on_up.as_ref().unchecked_ref());
    }
}

/// Self-rescheduling `requestAnimationFrame` loop
struct FrameLoop {
    window: Window,
    handle: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl FrameLoop {
    fn start(window: &Window, ctx: CanvasRenderingContext2d, sim: &SharedSimulation) -> Result<Self, JsValue> {
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let frame = {
            let (window, handle, callback, sim) = (window.clone(), handle.clone(), callback.clone(), sim.clone());
            let mut ctx = ctx;
            Closure::wrap(Box::new(move |now: f64| {
                handle.set(None);
                {
                    let Ok(mut sim) = sim.try_borrow_mut() else {
                        return;
                    };
                    if sim.state() == LifecycleState::Uninitialized {
                        if let Err(e) = sim.start(now) {
                            log_warn!("simulation failed to start: {}", e);
                            return;
                        }
                    }
                    if !sim.is_running() {
                        return;
                    }
                    sim.tick(now);
                    sim.render(&mut ctx);
                }
                if let Some(next) = callback.borrow().as_ref() {
                    if let Ok(id) = window.request_animation_frame(next.as_ref().unchecked_ref()) {
                        handle.set(Some(id));
                    }
                }
            }) as Box<dyn FnMut(f64)>)
        };

        let id = window.request_animation_frame(frame.as_ref().unchecked_ref())?;
        handle.set(Some(id));
        *callback.borrow_mut() = Some(frame);

        Ok(Self {
            window: window.clone(),
            handle,
            callback,
        })
    }

    fn stop(&self) {
        if let Some(id) = self.handle.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // Breaks the callback's reference to itself.
        self.callback.borrow_mut().take();
    }
}

/// One mounted animation
#[wasm_bindgen]
pub struct FallingLetters {
    sim: SharedSimulation,
    listeners: Option<Listeners>,
    frame: Option<FrameLoop>,
}

#[wasm_bindgen]
impl FallingLetters {
    /// Mount on `canvas`, optionally overriding defaults with a JSON config.
    pub fn mount(canvas: HtmlCanvasElement, config_json: Option<String>) -> Result<FallingLetters, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let mut config = match config_json {
            Some(json) => SimulationConfig::from_json(&json).map_err(|e| JsValue::from_str(&e))?,
            None => SimulationConfig::default(),
        };
        if config.seed.is_none() {
            config.seed = Some((js_sys::Math::random() * u32::MAX as f64) as u32);
        }

        let width = window.inner_width()?.as_f64().unwrap_or(0.0);
        let height = window.inner_height()?.as_f64().unwrap_or(0.0);
        let viewport = Viewport::new(width as f32, height as f32);

        let image = shared_icon(&window)?;
        let sim = Simulation::new(viewport, config, image).map_err(|e| JsValue::from_str(&e))?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        provision_canvas(&canvas, &ctx, viewport, backing_scale(window.device_pixel_ratio()))?;

        let sim: SharedSimulation = Rc::new(RefCell::new(sim));
        if let Some(performance) = window.performance() {
            sim.borrow_mut()
                .start(performance.now())
                .map_err(|e| JsValue::from_str(&e))?;
        }

        let listeners = Listeners::attach(&window, &canvas, viewport, &sim)?;
        let frame = match FrameLoop::start(&window, ctx, &sim) {
            Ok(frame) => frame,
            Err(e) => {
                listeners.detach();
                sim.borrow_mut().stop();
                return Err(e);
            }
        };

        Ok(FallingLetters {
            sim,
            listeners: Some(listeners),
            frame: Some(frame),
        })
    }

    /// Tear everything down. Further calls do nothing.
    pub fn unmount(&mut self) {
        if let Some(listeners) = self.listeners.take() {
            listeners.detach();
        }
        if let Some(frame) = self.frame.take() {
            frame.stop();
        }
        if let Ok(mut sim) = self.sim.try_borrow_mut() {
            sim.stop();
        }
    }

    /// True until `unmount`: listeners attached and a frame loop alive
    #[wasm_bindgen(getter)]
    pub fn is_mounted(&self) -> bool {
        self.listeners.is_some() || self.frame.is_some()
    }

    #[wasm_bindgen(getter)]
    pub fn is_running(&self) -> bool {
        self.sim.try_borrow().map(|s| s.is_running()).unwrap_or(false)
    }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> usize {
        self.sim.try_borrow().map(|s| s.body_count()).unwrap_or(0)
    }

    pub fn stats(&self) -> StepStats {
        self.sim.try_borrow().map(|s| s.stats()).unwrap_or_default()
    }

    /// Enable or disable per-step timing (adds overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        if let Ok(mut sim) = self.sim.try_borrow_mut() {
            sim.enable_perf_metrics(enabled);
        }
    }

    pub fn config_json(&self) -> String {
        self.sim
            .try_borrow()
            .map(|s| s.config().to_json())
            .unwrap_or_else(|_| "{}".to_string())
    }
}

impl Drop for FallingLetters {
    fn drop(&mut self) {
        self.unmount();
    }
}
