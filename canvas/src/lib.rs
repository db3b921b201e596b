//! Wall canvas engine for the photo wall.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of a wall canvas: translating raw DOM input events into item
//! mutations, maintaining camera state for pan/zoom, hit-testing items,
//! measuring photo aspect ratios, and painting the scene. The server links the
//! same crate for the shared wire types and grid layout.
//!
//! Everything outside [`render`], [`images`] and the `browser` feature is
//! plain Rust and testable natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Editable engine and testable [`engine::EngineCore`] |
//! | [`viewer`] | Read-only viewer for shared walls |
//! | [`doc`] | Wall and item types, in-memory store, resize geometry |
//! | [`layout`] | Grid placement for newly added photos |
//! | [`aspect`] | Shared per-photo aspect ratio table |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against items and resize handles |
//! | [`scene`] | Renderer-independent scene passes |
//! | [`render`] | Canvas 2D painting of a scene pass |
//! | [`images`] | Image element cache and load reporting |
//! | [`consts`] | Shared numeric constants (zoom limits, minimum sizes, etc.) |
//! | `listener`, `api`, `host` | Browser glue behind the `browser` feature |

pub mod aspect;
pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod images;
pub mod input;
pub mod layout;
pub mod render;
pub mod scene;
pub mod viewer;

#[cfg(feature = "browser")]
pub mod api;
#[cfg(feature = "browser")]
pub mod host;
#[cfg(feature = "browser")]
pub mod listener;
