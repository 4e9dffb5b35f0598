//! Container width through `ResizeObserver`

use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::ResizeObserver;

type ResizeCallback = Closure<dyn FnMut(js_sys::Array, ResizeObserver)>;

/// Track the width of `container`.
///
/// `None` until the first observation. Only the width is reported: the
/// container's height follows the chart drawn inside it. The observer is
/// disconnected when the owning component is dropped.
pub fn use_container_width(container: NodeRef<Div>) -> ReadSignal<Option<f64>> {
    let (width, set_width) = signal(None::<f64>);
    let observer = StoredValue::new_local(None::<(ResizeObserver, ResizeCallback)>);

    Effect::new(move |_| {
        let Some(element) = container.get() else {
            return;
        };
        if observer.with_value(Option::is_some) {
            return;
        }

        let target = element.clone();
        let callback: ResizeCallback = Closure::new(move |_entries: js_sys::Array, _observer: ResizeObserver| {
            let next = Some(target.get_bounding_client_rect().width());
            if width.get_untracked() != next {
                tracing::debug!(width = ?next, "container resized");
                set_width.set(next);
            }
        });

        match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(resize) => {
                resize.observe(&element);
                observer.set_value(Some((resize, callback)));
            }
            Err(err) => {
                tracing::warn!(error = ?err, "ResizeObserver unavailable, measuring once");
                set_width.set(Some(element.get_bounding_client_rect().width()));
            }
        }
    });

    on_cleanup(move || {
        observer.try_update_value(|slot| {
            if let Some((resize, _callback)) = slot.take() {
                resize.disconnect();
            }
        });
    });

    width
}
