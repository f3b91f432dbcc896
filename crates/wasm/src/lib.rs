//! Browser host for the particle field.
//!
//! Binds a `<canvas>` element's 2D context as a [`Surface`](particle_field_core::Surface), forwards window
//! `resize` and `mousemove` events into the [`RunLoop`], and drives it from
//! `requestAnimationFrame`. A missing canvas leaves everything inert.

mod canvas;

use canvas::CanvasSurface;
use particle_field_core::{HostEvent, RunLoop};
use particle_field_plexus::{ParticleField, PlexusParams};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Loop state shared between the frame callback and the event listeners.
struct Host {
    run_loop: RunLoop<ParticleField>,
    surface: CanvasSurface,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// The self-rescheduling frame callback and its outstanding request id.
#[derive(Clone)]
struct Frames {
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
}

impl Frames {
    /// Requests the next animation frame unless one is already pending.
    fn schedule(&self, window: &web::Window) {
        if self.pending.get().is_some() {
            return;
        }
        if let Some(callback) = self.callback.borrow().as_ref() {
            match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                Ok(id) => self.pending.set(Some(id)),
                Err(e) => log::warn!("requestAnimationFrame failed: {e:?}"),
            }
        }
    }

    fn cancel(&self, window: &web::Window) {
        if let Some(id) = self.pending.take() {
            let _ = window.cancel_animation_frame(id);
        }
    }
}

/// An event listener that unregisters itself when dropped.
struct Listener<T: ?Sized> {
    target: web::EventTarget,
    kind: &'static str,
    callback: Closure<T>,
}

impl<T: ?Sized> Listener<T> {
    fn add(target: &web::EventTarget, kind: &'static str, callback: Closure<T>) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl<T: ?Sized> Drop for Listener<T> {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Handle to a running background. Dropping it cancels the pending frame and
/// detaches the listeners.
#[wasm_bindgen]
pub struct Background {
    host: Rc<RefCell<Host>>,
    frames: Frames,
    window: web::Window,
    _on_resize: Listener<dyn FnMut(web::Event)>,
    _on_pointer: Listener<dyn FnMut(web::MouseEvent)>,
}

/// Attaches the particle field to the canvas with id `canvas_id`.
///
/// `preset` defaults to `classic`; `overrides` is an optional JSON object of
/// parameter overrides. Returns `None` (and does nothing) when the canvas is
/// missing or has no 2D context.
#[wasm_bindgen]
pub fn attach(
    canvas_id: &str,
    preset: Option<String>,
    overrides: Option<String>,
) -> Result<Option<Background>, JsValue> {
    let params = resolve_params(preset.as_deref(), overrides.as_deref())?;

    let Some(window) = web::window() else {
        return Ok(None);
    };
    let Some(surface) = window
        .document()
        .and_then(|doc| doc.get_element_by_id(canvas_id))
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
        .and_then(CanvasSurface::new)
    else {
        log::debug!("no usable #{canvas_id} canvas; particle field disabled");
        return Ok(None);
    };

    let (width, height) = viewport_size(&window);
    surface.set_size(width, height);
    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let field = ParticleField::new(width, height, seed, params);
    log::info!(
        "particle field attached: {width}x{height}, {} particles",
        field.particles().len()
    );

    let host = Rc::new(RefCell::new(Host {
        run_loop: RunLoop::new(field),
        surface,
    }));

    // A failure registering the second listener drops the first, which
    // unregisters it.
    let on_resize = {
        let host = host.clone();
        let resize_window = window.clone();
        let callback = Closure::<dyn FnMut(web::Event)>::new(move |_event: web::Event| {
            let (width, height) = viewport_size(&resize_window);
            let mut host = host.borrow_mut();
            host.surface.set_size(width, height);
            host.run_loop.push_event(HostEvent::Resize { width, height });
        });
        Listener::add(&window, "resize", callback)?
    };

    let on_pointer = {
        let host = host.clone();
        let callback = Closure::<dyn FnMut(web::MouseEvent)>::new(move |event: web::MouseEvent| {
            host.borrow_mut().run_loop.push_event(HostEvent::PointerMove {
                x: event.client_x() as f64,
                y: event.client_y() as f64,
            });
        });
        Listener::add(&window, "mousemove", callback)?
    };

    let frames = Frames {
        callback: Rc::new(RefCell::new(None)),
        pending: Rc::new(Cell::new(None)),
    };
    {
        let host = host.clone();
        let next = frames.clone();
        let window = window.clone();
        *frames.callback.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            next.pending.set(None);
            let ran = {
                let mut guard = host.borrow_mut();
                let Host { run_loop, surface } = &mut *guard;
                run_loop.tick(surface)
            };
            if ran {
                next.schedule(&window);
            }
        }));
    }

    let background = Background {
        host,
        frames,
        window,
        _on_resize: on_resize,
        _on_pointer: on_pointer,
    };
    background.start();
    Ok(Some(background))
}

#[wasm_bindgen]
impl Background {
    /// Resumes the frame loop. No-op if already running.
    pub fn start(&self) {
        self.host.borrow_mut().run_loop.start();
        self.frames.schedule(&self.window);
    }

    /// Stops after the current frame; the last frame stays on the canvas.
    pub fn stop(&self) {
        self.host.borrow_mut().run_loop.stop();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.host.borrow().run_loop.is_running()
    }

    #[wasm_bindgen(getter, js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.host.borrow().run_loop.engine().particles().len()
    }

    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> f64 {
        self.host.borrow().run_loop.frames() as f64
    }
}

impl Drop for Background {
    fn drop(&mut self) {
        self.host.borrow_mut().run_loop.stop();
        self.frames.cancel(&self.window);
        // Break the callback's self-reference so the closure can be freed.
        self.frames.callback.borrow_mut().take();
    }
}

fn resolve_params(preset: Option<&str>, overrides: Option<&str>) -> Result<PlexusParams, JsValue> {
    let overrides = match overrides {
        Some(text) => serde_json::from_str(text)
            .map_err(|e| JsValue::from_str(&format!("invalid overrides JSON: {e}")))?,
        None => serde_json::Value::Null,
    };
    PlexusParams::from_json(preset.unwrap_or("classic"), &overrides)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn viewport_size(window: &web::Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| {
        v.ok()
            .and_then(|v| v.as_f64())
            .map(|v| v.max(0.0) as u32)
            .unwrap_or(0)
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}
