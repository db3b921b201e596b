//! `#[wasm_bindgen]` entry points: the wall editor and the shared-wall viewer.
//!
//! The host owns the DOM side of a session. It forwards canvas events into
//! the engine, carries out the returned [`Action`]s (cursor, pointer capture,
//! animation-frame rendering) and persists edits through [`crate::api`] in
//! spawned futures. Persistence failures are logged and never rolled back.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use uuid::Uuid;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, EventTarget, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, WheelEvent};

use crate::api;
use crate::aspect::AspectRatios;
use crate::camera::{Camera, Point};
use crate::doc::{PhotoId, PhotoRef, Wall, WallId, WallItem};
use crate::engine::{Action, Engine};
use crate::images::ImageLoadFn;
use crate::input::{Button, Key, WheelDelta};
use crate::listener::PointerSubscription;
use crate::viewer::Viewer;

thread_local! {
    /// One aspect table per page, shared by every editor and viewer.
    static ASPECTS: AspectRatios = AspectRatios::new();
}

fn shared_aspects() -> AspectRatios {
    ASPECTS.with(AspectRatios::clone)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_id(raw: &str) -> Result<Uuid, JsValue> {
    Uuid::parse_str(raw).map_err(|e| JsValue::from_str(&format!("invalid id {raw:?}: {e}")))
}

fn no_window() -> JsValue {
    JsValue::from_str("no window")
}

fn is_text_input(target: &EventTarget) -> bool {
    let Some(el) = target.dyn_ref::<HtmlElement>() else {
        return false;
    };
    matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT") || el.is_content_editable()
}

fn percent(camera: Camera) -> i32 {
    i32::try_from(camera.zoom_percent()).unwrap_or_default()
}

// =============================================================
// Session: what the host drives
// =============================================================

trait Session {
    fn pointer_down(&mut self, pt: Point, button: Button) -> Vec<Action>;
    fn pointer_move(&mut self, pt: Point) -> Vec<Action>;
    fn pointer_up(&mut self, pt: Point) -> Vec<Action>;
    /// Abandon the active gesture without a pointer position.
    fn cancel_gesture(&mut self) -> Vec<Action>;
    fn wheel(&mut self, delta: WheelDelta) -> Vec<Action>;
    fn key_down(&mut self, key: &Key, in_text_input: bool) -> Vec<Action>;
    fn image_loaded(&mut self, photo_id: PhotoId, natural_width: f64, natural_height: f64) -> Vec<Action>;
    fn resize_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64);
    fn paint(&mut self) -> Result<(), JsValue>;
    /// Wall that local edits persist to; `None` for read-only sessions.
    fn persist_target(&self) -> Option<WallId>;
}

impl Session for Engine {
    fn pointer_down(&mut self, pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(pt, button)
    }

    fn pointer_move(&mut self, pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(pt)
    }

    fn pointer_up(&mut self, pt: Point) -> Vec<Action> {
        self.core.on_pointer_up(pt)
    }

    fn cancel_gesture(&mut self) -> Vec<Action> {
        self.core.cancel_gesture()
    }

    fn wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        self.core.on_wheel(delta)
    }

    fn key_down(&mut self, key: &Key, in_text_input: bool) -> Vec<Action> {
        self.core.on_key_down(key, in_text_input)
    }

    fn image_loaded(&mut self, photo_id: PhotoId, natural_width: f64, natural_height: f64) -> Vec<Action> {
        self.core.record_image_size(photo_id, natural_width, natural_height)
    }

    fn resize_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.set_viewport(width_css, height_css, dpr);
    }

    fn paint(&mut self) -> Result<(), JsValue> {
        self.render()
    }

    fn persist_target(&self) -> Option<WallId> {
        self.core.wall().map(|w| w.id)
    }
}

impl Session for Viewer {
    fn pointer_down(&mut self, pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(pt, button)
    }

    fn pointer_move(&mut self, pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(pt)
    }

    fn pointer_up(&mut self, pt: Point) -> Vec<Action> {
        self.core.on_pointer_up(pt)
    }

    fn cancel_gesture(&mut self) -> Vec<Action> {
        self.core.cancel_gesture()
    }

    fn wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        self.core.on_wheel(delta)
    }

    fn key_down(&mut self, _key: &Key, _in_text_input: bool) -> Vec<Action> {
        Vec::new()
    }

    fn image_loaded(&mut self, photo_id: PhotoId, natural_width: f64, natural_height: f64) -> Vec<Action> {
        self.core.record_image_size(photo_id, natural_width, natural_height)
    }

    fn resize_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.set_viewport(width_css, height_css, dpr);
    }

    fn paint(&mut self) -> Result<(), JsValue> {
        self.render()
    }

    fn persist_target(&self) -> Option<WallId> {
        None
    }
}

// =============================================================
// Host
// =============================================================

struct Host<S> {
    canvas: HtmlCanvasElement,
    session: RefCell<S>,
    /// Present exactly while a gesture is active.
    gesture: RefCell<Option<PointerSubscription>>,
    listeners: RefCell<Vec<EventListener>>,
    frame_pending: Cell<bool>,
}

impl<S: Session + 'static> Host<S> {
    fn mount<B>(canvas: HtmlCanvasElement, build: B) -> Result<Rc<Self>, JsValue>
    where
        B: FnOnce(HtmlCanvasElement, ImageLoadFn) -> Result<S, JsValue>,
    {
        // Image loads report back to a host that doesn't exist yet.
        let slot: Rc<RefCell<Weak<Self>>> = Rc::new(RefCell::new(Weak::new()));
        let slot_for_load = Rc::clone(&slot);
        let on_load: ImageLoadFn = Rc::new(move |photo_id: PhotoId, w: f64, h: f64| {
            let host = slot_for_load.borrow().upgrade();
            if let Some(host) = host {
                let actions = host.session.borrow_mut().image_loaded(photo_id, w, h);
                host.dispatch(actions);
            }
        });

        let session = build(canvas.clone(), on_load)?;
        let host = Rc::new(Self {
            canvas,
            session: RefCell::new(session),
            gesture: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            frame_pending: Cell::new(false),
        });
        *slot.borrow_mut() = Rc::downgrade(&host);
        host.attach()?;
        host.sync_viewport();
        host.request_render();
        Ok(host)
    }

    fn attach(self: &Rc<Self>) -> Result<(), JsValue> {
        let canvas: &EventTarget = self.canvas.as_ref();
        let window = web_sys::window().ok_or_else(no_window)?;
        let mut listeners = Vec::with_capacity(5);

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(canvas, "pointerdown", move |event: &Event| {
            let Some(host) = weak.upgrade() else {
                return;
            };
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let pt = host.local_point(mouse);
            let actions = host.session.borrow_mut().pointer_down(pt, Button::from_dom(mouse.button()));
            host.dispatch(actions);
        }));

        // Hover only; during a gesture the window subscription takes over.
        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(canvas, "pointermove", move |event: &Event| {
            let Some(host) = weak.upgrade() else {
                return;
            };
            if host.gesture.borrow().is_some() {
                return;
            }
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let actions = host.session.borrow_mut().pointer_move(host.local_point(mouse));
            host.dispatch(actions);
        }));

        let weak = Rc::downgrade(self);
        // Non-passive so the page doesn't scroll under the canvas.
        let options = EventListenerOptions::enable_prevent_default();
        listeners.push(EventListener::new_with_options(canvas, "wheel", options, move |event: &Event| {
            let Some(host) = weak.upgrade() else {
                return;
            };
            let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            event.prevent_default();
            let delta = WheelDelta { dx: wheel.delta_x(), dy: wheel.delta_y() };
            let actions = host.session.borrow_mut().wheel(delta);
            host.dispatch(actions);
        }));

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&window, "keydown", move |event: &Event| {
            let Some(host) = weak.upgrade() else {
                return;
            };
            let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let in_text_input = event.target().is_some_and(|t| is_text_input(&t));
            let actions = host.session.borrow_mut().key_down(&Key(key_event.key()), in_text_input);
            host.dispatch(actions);
        }));

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&window, "resize", move |_event: &Event| {
            if let Some(host) = weak.upgrade() {
                host.sync_viewport();
                host.request_render();
            }
        }));

        *self.listeners.borrow_mut() = listeners;
        Ok(())
    }

    /// Canvas-relative CSS pixel position of a mouse/pointer event.
    fn local_point(&self, event: &MouseEvent) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        Point::new(f64::from(event.client_x()) - rect.left(), f64::from(event.client_y()) - rect.top())
    }

    fn sync_viewport(&self) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let width = f64::from(self.canvas.client_width());
        let height = f64::from(self.canvas.client_height());
        self.session.borrow_mut().resize_viewport(width, height, dpr);
    }

    fn dispatch(self: &Rc<Self>, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::CapturePointer => self.capture_pointer(),
                Action::ReleasePointer => drop(self.gesture.borrow_mut().take()),
                Action::SetCursor(cursor) => {
                    if let Err(err) = self.canvas.style().set_property("cursor", &cursor) {
                        log::warn!("failed to set cursor: {err:?}");
                    }
                }
                Action::RenderNeeded => self.request_render(),
                Action::ItemsCreated(items) => self.persist_created(items),
                Action::ItemUpdated { id, fields } => {
                    let Some(wall_id) = self.session.borrow().persist_target() else {
                        continue;
                    };
                    spawn_local(async move {
                        if let Err(err) = api::update_item(wall_id, id, &fields).await {
                            log::warn!("failed to save item {id}: {err}");
                        }
                    });
                }
                Action::ItemDeleted { id } => {
                    let Some(wall_id) = self.session.borrow().persist_target() else {
                        continue;
                    };
                    spawn_local(async move {
                        if let Err(err) = api::delete_item(wall_id, id).await {
                            log::warn!("failed to delete item {id}: {err}");
                        }
                    });
                }
            }
        }
    }

    fn persist_created(&self, items: Vec<WallItem>) {
        let Some(wall_id) = self.session.borrow().persist_target() else {
            return;
        };
        spawn_local(async move {
            if let Err(err) = api::insert_items(wall_id, &items).await {
                log::warn!("failed to save {} new items: {err}", items.len());
            }
        });
    }

    fn capture_pointer(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let on_move = move |event: &Event| {
            let Some(host) = weak.upgrade() else {
                return;
            };
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let actions = host.session.borrow_mut().pointer_move(host.local_point(mouse));
            host.dispatch(actions);
        };
        let weak = Rc::downgrade(self);
        let on_up = move |event: &Event| {
            let Some(host) = weak.upgrade() else {
                return;
            };
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let actions = host.session.borrow_mut().pointer_up(host.local_point(mouse));
            host.dispatch(actions);
        };
        match PointerSubscription::new(on_move, on_up) {
            Ok(subscription) => *self.gesture.borrow_mut() = Some(subscription),
            Err(err) => {
                log::warn!("pointer capture failed, ending gesture: {err:?}");
                let actions = self.session.borrow_mut().cancel_gesture();
                self.dispatch(actions);
            }
        }
    }

    /// Schedule one paint on the next animation frame.
    fn request_render(self: &Rc<Self>) {
        if self.frame_pending.replace(true) {
            return;
        }
        let weak = Rc::downgrade(self);
        let cb = Closure::once_into_js(move |_ts: f64| {
            if let Some(host) = weak.upgrade() {
                host.frame_pending.set(false);
                host.render_now();
            }
        });
        let requested = web_sys::window()
            .ok_or_else(no_window)
            .and_then(|w| w.request_animation_frame(cb.unchecked_ref()));
        if let Err(err) = requested {
            log::warn!("requestAnimationFrame failed, painting now: {err:?}");
            self.frame_pending.set(false);
            self.render_now();
        }
    }

    fn render_now(&self) {
        if let Err(err) = self.session.borrow_mut().paint() {
            log::warn!("render failed: {err:?}");
        }
    }
}

async fn load_wall(wall_id: WallId) -> Result<(Wall, Vec<WallItem>, Vec<PhotoRef>), String> {
    let wall = api::fetch_wall(wall_id).await?;
    let items = api::fetch_items(wall_id).await?;
    let mut photo_ids: Vec<PhotoId> = items.iter().map(|i| i.photo_id).collect();
    photo_ids.sort_unstable();
    photo_ids.dedup();
    let photos = api::resolve_photos(&photo_ids).await?;
    Ok((wall, items, photos))
}

// =============================================================
// Exported: WallEditor
// =============================================================

/// Editable wall bound to a `<canvas>`.
#[wasm_bindgen]
pub struct WallEditor {
    host: Rc<Host<Engine>>,
}

#[wasm_bindgen]
impl WallEditor {
    /// # Errors
    ///
    /// Returns an error if the canvas has no 2D context or listeners cannot be attached.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<WallEditor, JsValue> {
        let host = Host::mount(canvas, |canvas, on_load| Engine::new(canvas, shared_aspects(), on_load))?;
        Ok(Self { host })
    }

    /// Load a wall, its items and their photos, replacing the current session.
    ///
    /// # Errors
    ///
    /// Returns an error if `wall_id` is not a UUID.
    pub fn open_wall(&self, wall_id: &str) -> Result<(), JsValue> {
        let wall_id = parse_id(wall_id)?;
        let weak = Rc::downgrade(&self.host);
        spawn_local(async move {
            match load_wall(wall_id).await {
                Ok((wall, items, photos)) => {
                    if let Some(host) = weak.upgrade() {
                        let actions = host.session.borrow_mut().core.open_wall(wall, items, photos);
                        host.dispatch(actions);
                    }
                }
                Err(err) => log::warn!("failed to open wall {wall_id}: {err}"),
            }
        });
        Ok(())
    }

    /// Place photos on the open wall as a grid and persist the new items.
    ///
    /// # Errors
    ///
    /// Returns an error if any id is not a UUID.
    pub fn add_photos(&self, photo_ids: Vec<String>) -> Result<(), JsValue> {
        let ids = photo_ids.iter().map(|raw| parse_id(raw)).collect::<Result<Vec<_>, _>>()?;
        let weak = Rc::downgrade(&self.host);
        spawn_local(async move {
            let photos = match api::resolve_photos(&ids).await {
                Ok(photos) => photos,
                Err(err) => {
                    log::warn!("failed to resolve photos: {err}");
                    Vec::new()
                }
            };
            if let Some(host) = weak.upgrade() {
                let mut actions = host.session.borrow_mut().core.load_photos(photos);
                actions.extend(host.session.borrow_mut().core.add_photos(&ids));
                host.dispatch(actions);
            }
        });
        Ok(())
    }

    /// Apply wall metadata edited elsewhere (rename, background, sharing).
    ///
    /// # Errors
    ///
    /// Returns an error if `wall` does not deserialize.
    pub fn update_wall(&self, wall: JsValue) -> Result<(), JsValue> {
        let wall: Wall = from_js_json(wall)?;
        let actions = self.host.session.borrow_mut().core.update_wall(wall);
        self.host.dispatch(actions);
        Ok(())
    }

    pub fn delete_selected(&self) {
        let actions = self.host.session.borrow_mut().core.delete_selected();
        self.host.dispatch(actions);
    }

    pub fn zoom_in(&self) {
        let actions = self.host.session.borrow_mut().core.zoom_in();
        self.host.dispatch(actions);
    }

    pub fn zoom_out(&self) {
        let actions = self.host.session.borrow_mut().core.zoom_out();
        self.host.dispatch(actions);
    }

    pub fn reset_view(&self) {
        let actions = self.host.session.borrow_mut().core.reset_view();
        self.host.dispatch(actions);
    }

    /// Current zoom as a whole percentage, for the toolbar label.
    #[must_use]
    pub fn zoom_percent(&self) -> i32 {
        percent(self.host.session.borrow().core.camera())
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<String> {
        self.host.session.borrow().core.selection().map(|id| id.to_string())
    }
}

// =============================================================
// Exported: WallViewer
// =============================================================

/// Read-only wall for share links.
#[wasm_bindgen]
pub struct WallViewer {
    host: Rc<Host<Viewer>>,
}

#[wasm_bindgen]
impl WallViewer {
    /// # Errors
    ///
    /// Returns an error if the canvas has no 2D context or listeners cannot be attached.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<WallViewer, JsValue> {
        let host = Host::mount(canvas, |canvas, on_load| Viewer::new(canvas, shared_aspects(), on_load))?;
        Ok(Self { host })
    }

    /// Fetch and show the wall behind a share token.
    pub fn open_shared(&self, token: String) {
        let weak = Rc::downgrade(&self.host);
        spawn_local(async move {
            match api::fetch_shared(&token).await {
                Ok(shared) => {
                    if let Some(host) = weak.upgrade() {
                        let actions = host.session.borrow_mut().core.open(shared.wall, shared.items, shared.photos);
                        host.dispatch(actions);
                    }
                }
                Err(err) => log::warn!("failed to open shared wall: {err}"),
            }
        });
    }

    pub fn zoom_in(&self) {
        let actions = self.host.session.borrow_mut().core.zoom_in();
        self.host.dispatch(actions);
    }

    pub fn zoom_out(&self) {
        let actions = self.host.session.borrow_mut().core.zoom_out();
        self.host.dispatch(actions);
    }

    pub fn reset_view(&self) {
        let actions = self.host.session.borrow_mut().core.reset_view();
        self.host.dispatch(actions);
    }

    #[must_use]
    pub fn zoom_percent(&self) -> i32 {
        percent(self.host.session.borrow().core.camera)
    }
}

/// Deserialize a plain JS object by round-tripping through JSON.
fn from_js_json<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    let text = js_sys::JSON::stringify(&value)?;
    let text = String::from(text);
    serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}
