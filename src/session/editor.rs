use std::sync::Arc;

use crate::assets::decode::PreparedImage;
use crate::assets::loader::{AssetLoader, Completion, DecodeTicket, Readiness};
use crate::encode::png::encode_png;
use crate::encode::sink::SaveSink;
use crate::foundation::core::Layer;
use crate::foundation::error::{TwibbonError, TwibbonResult};
use crate::gesture::controller::{GestureController, GestureOutcome, GesturePhase};
use crate::gesture::pointer::{MouseAdapter, MouseInput, PointerEvent, TouchInput};
use crate::gesture::script::{GestureScript, ScriptStep};
use crate::render::composite::CompositeRenderer;
use crate::render::surface::Surface;
use crate::session::config::{EditorConfig, RedrawPolicy};
use crate::session::notice::Notice;
use crate::transform::state::{TransformAction, TransformState};

/// Result of a redraw attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedrawStatus {
    /// A new composite was written to the surface.
    Drawn,
    /// Waiting for at least one decode; the surface was left as is.
    Deferred,
    /// Nothing changed since the last composite.
    Unchanged,
}

/// One editing session: a frame, a replaceable photo, the photo transform and the output surface.
///
/// All mutation happens through `&mut self` on the caller's thread. Decodes are requested when
/// sources change and resolved whenever the host calls [`EditorSession::fulfill`],
/// [`EditorSession::complete`] or [`EditorSession::pump`]; the surface is redrawn as soon as both
/// layers are decoded for their latest request.
#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    transform: TransformState,
    gestures: GestureController,
    mouse: MouseAdapter,
    loader: AssetLoader,
    renderer: CompositeRenderer,
    surface: Surface,
    dirty: bool,
    notices: Vec<Notice>,
}

impl EditorSession {
    /// Start a session with default transform and an empty output surface.
    pub fn new(config: EditorConfig) -> TwibbonResult<Self> {
        config.validate()?;
        Ok(Self {
            gestures: GestureController::new(config.limits.pinch),
            renderer: CompositeRenderer::new(config.render.clone()),
            config,
            transform: TransformState::default(),
            mouse: MouseAdapter::new(),
            loader: AssetLoader::new(),
            surface: Surface::output(),
            dirty: false,
            notices: Vec::new(),
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Current photo transform.
    pub fn transform(&self) -> TransformState {
        self.transform
    }

    /// Output surface, in whatever state the last composite left it.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Current gesture phase.
    pub fn gesture_phase(&self) -> GesturePhase {
        self.gestures.phase()
    }

    /// Decoded image of `layer`, if available for its latest request.
    pub fn image(&self, layer: Layer) -> Option<&PreparedImage> {
        self.loader.image(layer)
    }

    /// Both sources are present, so controls and export are enabled.
    pub fn can_download(&self) -> bool {
        self.loader.has_source(Layer::Photo) && self.loader.has_source(Layer::Frame)
    }

    /// Supply the frame overlay. It may only be replaced if its previous decode failed.
    pub fn set_frame(&mut self, bytes: impl Into<Arc<[u8]>>) -> TwibbonResult<DecodeTicket> {
        if self.loader.has_source(Layer::Frame) && self.loader.failure(Layer::Frame).is_none() {
            return Err(TwibbonError::validation(
                "frame is fixed for the session once supplied",
            ));
        }
        self.dirty = true;
        Ok(self.loader.request(Layer::Frame, bytes))
    }

    /// Replace the user photo. Any decode still pending for an earlier photo becomes stale.
    pub fn upload_photo(&mut self, bytes: impl Into<Arc<[u8]>>) -> DecodeTicket {
        self.dirty = true;
        self.loader.request(Layer::Photo, bytes)
    }

    /// Decode the source behind `ticket` and redraw if the pair became ready.
    pub fn fulfill(&mut self, ticket: DecodeTicket) -> TwibbonResult<Completion> {
        let res = self.loader.fulfill(ticket);
        self.after_completion(ticket, res)
    }

    /// Apply a decode produced by the host and redraw if the pair became ready.
    pub fn complete(
        &mut self,
        ticket: DecodeTicket,
        result: TwibbonResult<PreparedImage>,
    ) -> TwibbonResult<Completion> {
        let failure = result.as_ref().err().map(TwibbonError::duplicate);
        let res = match (self.loader.complete(ticket, result), failure) {
            (Completion::Applied, Some(err)) => Err(err),
            (completion, _) => Ok(completion),
        };
        self.after_completion(ticket, res)
    }

    /// Resolve every outstanding decode in request order, then redraw.
    ///
    /// All tickets are attempted; the first decode failure is returned afterwards.
    pub fn pump(&mut self) -> TwibbonResult<RedrawStatus> {
        let mut first_err = None;
        for ticket in self.loader.outstanding() {
            if let Err(err) = self.fulfill(ticket) {
                first_err.get_or_insert(err);
            }
        }
        if let Some(err) = first_err {
            return Err(err);
        }
        self.redraw()
    }

    /// Feed a device-neutral pointer event. Ignored until both sources are present.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> GestureOutcome {
        if !self.can_download() {
            return GestureOutcome::default();
        }
        let outcome = self.gestures.handle(&self.transform, event);
        if let Some(action) = outcome.action {
            self.apply(action);
        }
        outcome
    }

    /// Feed raw mouse input.
    pub fn handle_mouse(&mut self, input: MouseInput) -> GestureOutcome {
        self.mouse
            .translate(input)
            .map(|ev| self.handle_pointer(&ev))
            .unwrap_or_default()
    }

    /// Feed raw touch input.
    pub fn handle_touch(&mut self, input: &TouchInput) -> GestureOutcome {
        self.handle_pointer(&input.to_pointer_event())
    }

    /// Move the zoom control. Ignored until both sources are present.
    pub fn set_slider_scale(&mut self, value: f64) -> TransformState {
        self.dispatch(TransformAction::SliderScale(value))
    }

    /// Apply a transform action directly, as a host control would. Ignored until both sources
    /// are present.
    pub fn dispatch(&mut self, action: TransformAction) -> TransformState {
        if self.can_download() {
            self.apply(action);
        }
        self.transform
    }

    /// Return the transform to `{ scale: 1, offset: (0, 0) }`.
    pub fn reset(&mut self) -> TransformState {
        if self.can_download() {
            self.gestures.cancel();
            self.apply(TransformAction::Reset);
            self.notices.push(Notice::Reset);
        }
        self.transform
    }

    /// Replay recorded interactions in order.
    pub fn apply_script(&mut self, script: &GestureScript) -> TransformState {
        for step in &script.steps {
            match step {
                ScriptStep::Mouse(input) => {
                    self.handle_mouse(*input);
                }
                ScriptStep::Touch(input) => {
                    self.handle_touch(input);
                }
                ScriptStep::Slider(v) => {
                    self.set_slider_scale(*v);
                }
                ScriptStep::Reset => {
                    self.reset();
                }
            }
        }
        self.transform
    }

    /// Composite the scene if anything changed and both layers are decoded.
    ///
    /// A failed decode is returned as an error and leaves the surface untouched.
    #[tracing::instrument(skip(self), fields(dirty = self.dirty))]
    pub fn redraw(&mut self) -> TwibbonResult<RedrawStatus> {
        if !self.dirty {
            return Ok(RedrawStatus::Unchanged);
        }
        match self.loader.ready_pair() {
            Readiness::Waiting => Ok(RedrawStatus::Deferred),
            Readiness::Failed(err) => Err(err.duplicate()),
            Readiness::Ready(pair) => {
                self.renderer
                    .render(&mut self.surface, pair.photo, pair.frame, &self.transform);
                self.dirty = false;
                Ok(RedrawStatus::Drawn)
            }
        }
    }

    /// Encode the current composite as PNG.
    #[tracing::instrument(skip(self))]
    pub fn export(&mut self) -> TwibbonResult<Vec<u8>> {
        if !self.can_download() {
            self.notices.push(Notice::ExportBlocked);
            return Err(TwibbonError::export_unavailable(
                "frame and photo must both be supplied",
            ));
        }
        encode_png(&self.surface).inspect_err(|_| self.notices.push(Notice::ExportBlocked))
    }

    /// Encode the current composite and hand it to `sink` under the configured file name.
    pub fn export_to(&mut self, sink: &mut dyn SaveSink) -> TwibbonResult<String> {
        let bytes = self.export()?;
        let location = sink.save(&self.config.export_filename, &bytes)?;
        self.notices.push(Notice::Exported {
            location: location.clone(),
        });
        Ok(location)
    }

    /// Take all notices raised since the last call.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn apply(&mut self, action: TransformAction) {
        let next = self.transform.reduce(action, &self.config.limits);
        if next == self.transform {
            return;
        }
        self.transform = next;
        self.dirty = true;
        if self.config.redraw_policy == RedrawPolicy::ReloadAlways {
            self.loader.reload(Layer::Photo);
            self.loader.reload(Layer::Frame);
        }
        self.refresh();
    }

    fn after_completion(
        &mut self,
        ticket: DecodeTicket,
        res: TwibbonResult<Completion>,
    ) -> TwibbonResult<Completion> {
        match res {
            Ok(Completion::Applied) => {
                self.dirty = true;
                self.refresh();
                Ok(Completion::Applied)
            }
            Ok(Completion::Stale) => Ok(Completion::Stale),
            Err(err) => {
                self.notices.push(Notice::DecodeFailed {
                    layer: ticket.layer,
                });
                Err(err)
            }
        }
    }

    fn refresh(&mut self) {
        if let Err(err) = self.redraw() {
            tracing::debug!(error = %err, "redraw skipped");
        }
    }
}
