// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_drag_drop::{
    Declaration, DragOptions, DropOptions, ElementSource, PointerEvent, SessionId,
    SessionRegistry, Surface,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, HtmlElement, MouseEvent, Window};

use crate::coords;

/// Registry type used by [`DragDrop`].
pub type DomRegistry = SessionRegistry<HtmlElement, MouseInput>;

const FLOATING_STYLE: [(&str, &str); 4] = [
    ("border", "5px solid black"),
    ("position", "absolute"),
    ("opacity", "0.5"),
    ("pointer-events", "none"),
];

/// A mouse event with its page-space position.
#[derive(Clone, Debug)]
pub struct MouseInput {
    event: MouseEvent,
    position: Point,
}

impl MouseInput {
    /// Wrap a DOM mouse event.
    pub fn new(event: MouseEvent) -> Self {
        let position = Point::new(f64::from(event.page_x()), f64::from(event.page_y()));
        Self { event, position }
    }

    /// The underlying DOM event.
    pub fn event(&self) -> &MouseEvent {
        &self.event
    }
}

impl PointerEvent for MouseInput {
    fn position(&self) -> Point {
        self.position
    }
}

/// [`Surface`] over the live document.
#[derive(Clone, Debug)]
pub struct DomSurface {
    window: Window,
    document: Document,
    body: HtmlElement,
}

impl DomSurface {
    /// Surface for the global window's document.
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        Ok(Self {
            window,
            document,
            body,
        })
    }

    /// The document this surface reads and mutates.
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn scroll(&self) -> (f64, f64) {
        (
            self.window.scroll_x().unwrap_or(0.0),
            self.window.scroll_y().unwrap_or(0.0),
        )
    }

    fn page_rect(&self, node: &HtmlElement) -> Option<Rect> {
        // An element that is not rendered has no client rects.
        if node.get_client_rects().length() == 0 {
            return None;
        }
        let rect = node.get_bounding_client_rect();
        let (sx, sy) = self.scroll();
        Some(Rect::new(
            rect.left() + sx,
            rect.top() + sy,
            rect.right() + sx,
            rect.bottom() + sy,
        ))
    }

    fn layout_origin(&self, node: &HtmlElement) -> Option<Point> {
        if node.get_client_rects().length() == 0 {
            return None;
        }
        Some(Point::new(f64::from(node.offset_left()), f64::from(node.offset_top())))
    }

    fn create_floating(&self, node: &HtmlElement, position: Point) -> Result<HtmlElement, JsValue> {
        let floating = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()?;
        let style = floating.style();
        for (property, value) in FLOATING_STYLE {
            style.set_property(property, value)?;
        }
        style.set_property("left", &format!("{}px", position.x))?;
        style.set_property("top", &format!("{}px", position.y))?;
        floating.set_inner_html(&node.outer_html());
        self.body.append_child(&floating)?;
        Ok(floating)
    }
}

fn place(node: &HtmlElement, position: Point) -> Result<(), JsValue> {
    let style = node.style();
    style.set_property("position", "absolute")?;
    style.set_property("left", &format!("{}px", position.x))?;
    style.set_property("top", &format!("{}px", position.y))?;
    Ok(())
}

impl Surface for DomSurface {
    type Node = HtmlElement;

    fn offset_origin(&self, node: &HtmlElement) -> Option<Point> {
        self.layout_origin(node)
    }

    fn bounding_rect(&self, node: &HtmlElement) -> Option<Rect> {
        self.page_rect(node)
    }

    fn query(&self, selector: &str) -> Vec<HtmlElement> {
        match self.document.query_selector_all(selector) {
            Ok(list) => (0..list.length())
                .filter_map(|index| list.item(index))
                .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
                .collect(),
            Err(err) => {
                log::warn!("invalid selector {selector:?}: {err:?}");
                Vec::new()
            }
        }
    }

    fn set_position(&mut self, node: &HtmlElement, position: Point) {
        if let Err(err) = place(node, position) {
            log::warn!("failed to position dragged element: {err:?}");
        }
    }

    fn spawn_floating(&mut self, node: &HtmlElement, position: Point) -> Option<HtmlElement> {
        let position = match (self.layout_origin(node), self.page_rect(node)) {
            (Some(origin), Some(rect)) => coords::page_position(position, origin, rect),
            _ => position,
        };
        self.create_floating(node, position)
            .map_err(|err| log::warn!("failed to create floating clone: {err:?}"))
            .ok()
    }

    fn remove_floating(&mut self, floating: HtmlElement) {
        floating.remove();
    }
}

struct Shared {
    registry: RefCell<DomRegistry>,
    surface: RefCell<DomSurface>,
}

impl Shared {
    fn press(&self, id: SessionId, input: MouseInput) {
        let (Ok(mut registry), Ok(surface)) =
            (self.registry.try_borrow_mut(), self.surface.try_borrow())
        else {
            log::warn!("mousedown during drag dispatch ignored");
            return;
        };
        registry.press(id, &*surface, input);
    }

    fn pointer_move(&self, input: &MouseInput) {
        let (Ok(mut registry), Ok(mut surface)) =
            (self.registry.try_borrow_mut(), self.surface.try_borrow_mut())
        else {
            log::warn!("mousemove during drag dispatch ignored");
            return;
        };
        registry.pointer_move(&mut *surface, input);
    }

    fn pointer_up(&self, input: &MouseInput) {
        let (Ok(mut registry), Ok(mut surface)) =
            (self.registry.try_borrow_mut(), self.surface.try_borrow_mut())
        else {
            log::warn!("mouseup during drag dispatch ignored");
            return;
        };
        registry.pointer_up(&mut *surface, input);
    }
}

fn busy() -> JsValue {
    JsValue::from_str("drag/drop registry is busy; declare outside of listeners")
}

/// Drag/drop wiring for one document.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone)]
pub struct DragDrop {
    shared: Rc<Shared>,
}

impl std::fmt::Debug for DragDrop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragDrop")
            .field("sessions", &self.shared.registry.try_borrow().map(|r| r.len()).ok())
            .finish_non_exhaustive()
    }
}

impl DragDrop {
    /// Create the registry and subscribe to document-wide `mousemove` and `mouseup`.
    ///
    /// The subscriptions live for the rest of the page.
    pub fn install() -> Result<Self, JsValue> {
        let surface = DomSurface::new()?;
        let document = surface.document().clone();
        let shared = Rc::new(Shared {
            registry: RefCell::new(DomRegistry::new()),
            surface: RefCell::new(surface),
        });

        let on_move = {
            let shared = shared.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                shared.pointer_move(&MouseInput::new(event));
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        document.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        on_move.forget();

        let on_up = {
            let shared = shared.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                shared.pointer_up(&MouseInput::new(event));
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        document.add_event_listener_with_callback("mouseup", on_up.as_ref().unchecked_ref())?;
        on_up.forget();

        log::debug!("drag/drop listeners installed");
        Ok(Self { shared })
    }

    /// Make every element matching `selector` draggable.
    pub fn drag(
        &self,
        selector: &str,
        options: DragOptions<MouseInput>,
    ) -> Result<Declaration, JsValue> {
        let mut registry = self.shared.registry.try_borrow_mut().map_err(|_| busy())?;
        let surface = self.shared.surface.try_borrow().map_err(|_| busy())?;
        let declaration = registry.declare(&*surface, ElementSource::selector(selector), options);

        for id in declaration.sessions() {
            let Some(element) = registry.get(id).map(|session| session.origin().clone()) else {
                continue;
            };
            let on_down = {
                let shared = self.shared.clone();
                Closure::wrap(Box::new(move |event: MouseEvent| {
                    shared.press(id, MouseInput::new(event));
                }) as Box<dyn FnMut(MouseEvent)>)
            };
            element
                .add_event_listener_with_callback("mousedown", on_down.as_ref().unchecked_ref())?;
            on_down.forget();
        }
        Ok(declaration)
    }

    /// Attach drop zones matching `selector` to the sessions of `declaration`.
    ///
    /// The selector is evaluated at the start of each drag.
    pub fn drop(
        &self,
        declaration: &Declaration,
        selector: &str,
        options: DropOptions<HtmlElement, MouseInput>,
    ) -> Result<(), JsValue> {
        let mut registry = self.shared.registry.try_borrow_mut().map_err(|_| busy())?;
        registry.attach_drop(declaration, ElementSource::selector(selector), options);
        Ok(())
    }

    /// Silently return a session to idle, removing its floating clone.
    pub fn reset(&self, id: SessionId) -> Result<(), JsValue> {
        let mut registry = self.shared.registry.try_borrow_mut().map_err(|_| busy())?;
        let mut surface = self.shared.surface.try_borrow_mut().map_err(|_| busy())?;
        registry.reset(id, &mut *surface);
        Ok(())
    }
}
