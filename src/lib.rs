//! Twibbon is a small photo-framing engine: a user photo is panned and zoomed underneath a
//! decorative frame overlay and the result is exported as a PNG.
//!
//! # Pipeline overview
//!
//! 1. **Input**: mouse, touch or slider input becomes a [`PointerEvent`] or a direct
//!    [`TransformAction`].
//! 2. **Gesture**: [`GestureController`] tracks `Idle`, `Dragging` and `Pinching` and emits
//!    transform actions.
//! 3. **Transform**: [`TransformState::reduce`] applies an action under the configured
//!    [`ScaleLimits`].
//! 4. **Render**: [`CompositeRenderer`] draws the photo at `offset`/`scale` on a fixed
//!    1080×1350 [`Surface`], then stretches the frame over it.
//! 5. **Export**: [`encode_png`] turns the surface into PNG bytes and a [`SaveSink`] stores them.
//!
//! [`EditorSession`] ties the stages together and is the entry point for hosts.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Frame on top**: the frame is drawn last on every composite.
//! - **Stale decodes are dropped**: a newer upload always wins over a slower older decode.
//! - **Premultiplied RGBA8** internally; PNG output is straight alpha.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod encode;
mod foundation;
mod gesture;
mod render;
mod session;
mod transform;

pub use assets::decode::{PreparedImage, decode_image};
pub use assets::loader::{
    AssetLoader, Completion, DecodeTicket, Generation, Readiness, ReadyPair,
};
pub use encode::png::{DEFAULT_EXPORT_FILENAME, encode_png};
pub use encode::sink::{FileSink, InMemorySink, SaveSink};
pub use foundation::core::{Canvas, Layer, Point, Rect, ScaleBounds, Vec2};
pub use foundation::error::{TwibbonError, TwibbonResult};
pub use gesture::controller::{
    DragSession, GestureController, GestureOutcome, GesturePhase, PinchBaseline,
};
pub use gesture::pointer::{
    Contacts, MouseAdapter, MouseInput, PointerEvent, PointerKind, TouchInput, TouchPhase,
};
pub use gesture::script::{GestureScript, ScriptStep};
pub use render::composite::{CompositeRenderer, RenderSettings, draw_image, photo_rect};
pub use render::surface::Surface;
pub use session::config::{EditorConfig, RedrawPolicy};
pub use session::editor::{EditorSession, RedrawStatus};
pub use session::notice::{Notice, NoticeLevel};
pub use transform::state::{ScaleLimits, TransformAction, TransformState};
