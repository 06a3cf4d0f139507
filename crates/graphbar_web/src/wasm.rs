//! JS-facing widget handle.

use crate::console;
use crate::dom::{report, DomSurface};
use crate::events::{parse_widget_config, resolve_list_click, timer_delay_ms, ROW_NAME_ATTRIBUTE};
use crate::storage::LocalStorageStore;
use graphbar_core::{
    Clock, GraphController, GraphService, ListClickTarget, StoredGraphListRepository,
};
use log::{error, info, LevelFilter};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget};

#[derive(Debug, Clone, Copy, Default)]
struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now().max(0.0) as u64
    }
}

type WebController =
    GraphController<StoredGraphListRepository<LocalStorageStore>, DomSurface, BrowserClock>;

struct Shared {
    controller: RefCell<WebController>,
    timer: RefCell<Option<Closure<dyn FnMut()>>>,
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// GraphBar widget mounted on the current page.
#[wasm_bindgen]
pub struct GraphWidget {
    shared: Rc<Shared>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl GraphWidget {
    /// Binds to the page elements, loads the stored list and renders it.
    ///
    /// `config_json` is an optional JSON widget config; missing fields use
    /// defaults. Rejects when an element is missing, storage is unavailable,
    /// or the stored list is malformed under the `fail` policy.
    pub fn mount(config_json: Option<String>) -> Result<GraphWidget, JsValue> {
        console::install(LevelFilter::Info);

        let config = parse_widget_config(config_json.as_deref()).map_err(|err| {
            error!("event=widget_mount module=web status=error error_code=config_invalid");
            JsValue::from_str(&err)
        })?;
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;

        let surface = DomSurface::bind(&document, &config.elements)?;
        let targets = surface.event_targets();
        let store = LocalStorageStore::from_window(&window).map_err(to_js_error)?;
        let repo = StoredGraphListRepository::from_config(store, &config);
        let service = GraphService::new(repo, surface, BrowserClock, &config);
        let controller = GraphController::start(service).map_err(to_js_error)?;

        let shared = Rc::new(Shared {
            controller: RefCell::new(controller),
            timer: RefCell::new(None),
        });
        let weak = Rc::downgrade(&shared);
        *shared.timer.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            with_shared(&weak, |shared| {
                let next = shared.controller.borrow_mut().on_timer();
                schedule_tick(shared, next);
            });
        }));

        let mut widget = GraphWidget {
            shared,
            listeners: Vec::with_capacity(3),
        };
        widget.listen(targets.read_only_toggle, |shared, _event| {
            shared.controller.borrow_mut().on_read_only_clicked();
        })?;
        widget.listen(targets.submit, |shared, _event| {
            let result = shared.controller.borrow_mut().on_add_clicked();
            if let Err(err) = result {
                error!("event=graph_add module=web status=error error={err}");
            }
            // A failed save may still have raised notifications.
            let next = shared.controller.borrow().service().next_notification_deadline();
            schedule_tick(shared, next);
        })?;
        widget.listen(targets.list, |shared, event| {
            let target = list_click_target(event);
            if target == ListClickTarget::Other {
                return;
            }
            event.prevent_default();
            if let Err(err) = shared.controller.borrow_mut().on_list_clicked(&target) {
                error!("event=graph_delete module=web status=error error={err}");
            }
        })?;

        info!("event=widget_mount module=web status=ok");
        Ok(widget)
    }

    #[wasm_bindgen(js_name = isReadOnly)]
    pub fn is_read_only(&self) -> bool {
        self.shared.controller.borrow().service().is_read_only()
    }

    #[wasm_bindgen(js_name = graphCount)]
    pub fn graph_count(&self) -> usize {
        self.shared.controller.borrow().service().graphs().len()
    }

    /// Detaches the click listeners. Also runs when JS frees the handle.
    pub fn destroy(&mut self) {
        for listener in self.listeners.drain(..) {
            report(
                "remove_event_listener",
                listener.target.remove_event_listener_with_callback(
                    listener.kind,
                    listener.callback.as_ref().unchecked_ref(),
                ),
            );
        }
    }
}

impl Drop for GraphWidget {
    fn drop(&mut self) {
        self.destroy();
        // A notification timer may still be queued; leak its callback so the
        // late call lands on a dead `Weak` instead of a freed closure.
        if let Some(timer) = self.shared.timer.borrow_mut().take() {
            timer.forget();
        }
    }
}

impl GraphWidget {
    fn listen(
        &mut self,
        target: EventTarget,
        handler: impl Fn(&Shared, &Event) + 'static,
    ) -> Result<(), JsValue> {
        let weak = Rc::downgrade(&self.shared);
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            with_shared(&weak, |shared| handler(shared, &event));
        });
        target.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target,
            kind: "click",
            callback,
        });
        Ok(())
    }
}

fn with_shared(weak: &Weak<Shared>, f: impl FnOnce(&Shared)) {
    if let Some(shared) = weak.upgrade() {
        f(&shared);
    }
}

fn list_click_target(event: &Event) -> ListClickTarget {
    let Some(element) = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
    else {
        return ListClickTarget::Other;
    };
    resolve_list_click(
        &element.tag_name(),
        &element.class_name(),
        element.get_attribute(ROW_NAME_ATTRIBUTE),
    )
}

fn schedule_tick(shared: &Shared, deadline_ms: Option<u64>) {
    let Some(deadline_ms) = deadline_ms else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };
    let timer = shared.timer.borrow();
    let Some(callback) = timer.as_ref() else {
        return;
    };
    let delay = timer_delay_ms(deadline_ms, BrowserClock.now_ms());
    if let Err(err) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        delay,
    ) {
        error!(
            "event=notification_timer module=web status=error error={}",
            crate::storage::js_error_text(&err)
        );
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    error!("event=widget_mount module=web status=error error={err}");
    JsValue::from_str(&err.to_string())
}
