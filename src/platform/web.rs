//! Browser bindings: display-refresh scheduling, image loading and input
//! listeners

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlImageElement, KeyboardEvent, MouseEvent, TouchEvent, Window};

use super::{InputAction, LoopControl, TickSource};
use crate::assets::AssetCache;

/// Calls back once per `requestAnimationFrame`
pub struct AnimationFrameSource {
    window: Window,
}

impl AnimationFrameSource {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl TickSource for AnimationFrameSource {
    fn run(self, on_frame: Box<dyn FnMut(f64) -> LoopControl>) {
        schedule(self.window, on_frame);
    }
}

fn schedule(window: Window, mut on_frame: Box<dyn FnMut(f64) -> LoopControl>) {
    let next = window.clone();
    let callback = Closure::once_into_js(move |time: f64| {
        if on_frame(time) == LoopControl::Continue {
            schedule(next, on_frame);
        } else {
            log::debug!("Frame loop stopped");
        }
    });
    if let Err(e) = window.request_animation_frame(callback.unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {:?}", e);
    }
}

/// Start loading every manifest entry into `cache`. Returns immediately;
/// entries settle as the browser reports load or error.
pub fn load_images(cache: &AssetCache<HtmlImageElement>, manifest: &[(&str, &str)]) {
    log::info!("Loading {} assets...", manifest.len());

    for &(name, src) in manifest {
        let img = match HtmlImageElement::new() {
            Ok(img) => img,
            Err(e) => {
                log::error!("Could not create image for {}: {:?}", name, e);
                cache.request(name);
                cache.fail(name);
                continue;
            }
        };
        cache.insert_pending(name, img.clone());

        let on_load = {
            let cache = cache.clone();
            let name = name.to_string();
            Closure::once_into_js(move || {
                cache.resolve(&name);
            })
        };
        let on_error = {
            let cache = cache.clone();
            let name = name.to_string();
            Closure::once_into_js(move || {
                cache.fail(&name);
            })
        };
        img.set_onload(Some(on_load.unchecked_ref()));
        img.set_onerror(Some(on_error.unchecked_ref()));
        img.set_src(src);
    }
}

/// Route keyboard (Space / ArrowUp), click and touch start to `on_input`
pub fn bind_input<F>(document: &Document, canvas: &Element, on_input: F)
where
    F: Fn() + Clone + 'static,
{
    // Keyboard
    {
        let on_input = on_input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if InputAction::from_key_code(&event.code()).is_some() {
                event.prevent_default();
                on_input();
            }
        });
        let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Touch start
    {
        let on_input = on_input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            event.prevent_default();
            on_input();
        });
        let _ = canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Mouse click
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            event.prevent_default();
            on_input();
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
