// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drag_drop_web --heading-base-level=0

//! DOM adapter for `understory_drag_drop`.
//!
//! When targeting `wasm32`, this crate provides:
//!
//! - `DomSurface`: a `Surface` over `web_sys::HtmlElement`. Pointers and
//!   drop-zone rectangles are page coordinates. Grab origins are
//!   `offsetLeft`/`offsetTop`, so move mode writes `left`/`top` in the
//!   element's offset-parent space with `position: absolute`. Copy mode
//!   appends a translucent bordered `<div>` holding the element's markup to
//!   `<body>`, translated back to page coordinates.
//! - `MouseInput`: a `PointerEvent` wrapping `web_sys::MouseEvent`.
//! - `DragDrop`: owns the session registry, listens for `mousemove` and
//!   `mouseup` on the document, and for `mousedown` on every declared element.
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn wire() -> Result<(), wasm_bindgen::JsValue> {
//!     use understory_drag_drop::{
//!         DragListeners, DragMode, DragOptions, DropListeners, DropOptions,
//!     };
//!     use understory_drag_drop_web::DragDrop;
//!
//!     let dnd = DragDrop::install()?;
//!     let boxes = dnd.drag(
//!         ".toolbox .box",
//!         DragOptions::new()
//!             .with_mode(DragMode::Copy)
//!             .with_listeners(DragListeners::new().on_start(|_, _| log::info!("drag started"))),
//!     )?;
//!     dnd.drop(
//!         &boxes,
//!         ".dropzone .blue",
//!         DropOptions::new(
//!             DropListeners::new()
//!                 .on_enter(|_, _, zone| { let _ = zone.class_list().add_1("green"); })
//!                 .on_leave(|_, _, zone| { let _ = zone.class_list().remove_1("green"); }),
//!         ),
//!     )?;
//!     Ok(())
//! }
//! ```
//!
//! Listeners run while the registry is borrowed. Declaring draggables or drop
//! zones from inside a listener fails with an error instead of re-entering.
//!
//! This crate installs no logger; diagnostics go through the `log` facade.

#[cfg(any(target_arch = "wasm32", test))]
mod coords;
#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomRegistry, DomSurface, DragDrop, MouseInput};
