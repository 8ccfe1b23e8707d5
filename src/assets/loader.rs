use std::sync::Arc;

use crate::assets::decode::{PreparedImage, decode_image};
use crate::foundation::core::Layer;
use crate::foundation::error::{TwibbonError, TwibbonResult};

/// Monotonically increasing request marker shared by both slots.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Generation(pub u64);

/// Handle for one outstanding decode request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodeTicket {
    /// Slot the request targets.
    pub layer: Layer,
    /// Generation assigned when the request was made.
    pub generation: Generation,
}

/// What happened to a completion handed to the loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The result now backs its slot.
    Applied,
    /// A newer request superseded this one; the result was dropped.
    Stale,
}

#[derive(Debug, Default)]
enum SlotState {
    #[default]
    Empty,
    Pending,
    Ready(PreparedImage),
    Failed(TwibbonError),
}

#[derive(Debug, Default)]
struct Slot {
    source: Option<Arc<[u8]>>,
    requested: Option<Generation>,
    state: SlotState,
}

/// Two-of-two barrier state over the photo and frame slots.
#[derive(Debug)]
pub enum Readiness<'a> {
    /// At least one slot has no decoded image for its latest request.
    Waiting,
    /// Both slots hold decoded images for their latest requests.
    Ready(ReadyPair<'a>),
    /// A slot's latest request failed; the barrier cannot complete until it is replaced.
    Failed(&'a TwibbonError),
}

/// Both decoded layers, tagged with the generations that produced them.
#[derive(Clone, Copy, Debug)]
pub struct ReadyPair<'a> {
    /// Decoded user photo.
    pub photo: &'a PreparedImage,
    /// Decoded frame overlay.
    pub frame: &'a PreparedImage,
    /// Generation of the photo decode.
    pub photo_generation: Generation,
    /// Generation of the frame decode.
    pub frame_generation: Generation,
}

/// Owns the encoded sources of both layers and the generation-tagged state of their decodes.
///
/// Requests are resolved out of band: a host calls [`AssetLoader::fulfill`] (or
/// [`AssetLoader::complete`] with its own result) whenever the decode finishes. Only a completion
/// carrying the latest generation of its slot is applied.
#[derive(Debug, Default)]
pub struct AssetLoader {
    next_generation: u64,
    photo: Slot,
    frame: Slot,
}

impl AssetLoader {
    /// Create a loader with both slots empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the source of `layer` and issue a new decode request for it.
    pub fn request(&mut self, layer: Layer, bytes: impl Into<Arc<[u8]>>) -> DecodeTicket {
        let generation = self.bump();
        let slot = self.slot_mut(layer);
        slot.source = Some(bytes.into());
        slot.requested = Some(generation);
        slot.state = SlotState::Pending;
        tracing::debug!(%layer, generation = generation.0, "decode requested");
        DecodeTicket { layer, generation }
    }

    /// Re-issue a request for the current source of `layer`, if any.
    pub fn reload(&mut self, layer: Layer) -> Option<DecodeTicket> {
        let source = self.slot(layer).source.clone()?;
        Some(self.request(layer, source))
    }

    /// Decode the source behind `ticket` and apply the result.
    ///
    /// Stale tickets are dropped without decoding. A decode failure is stored in the slot and
    /// returned.
    pub fn fulfill(&mut self, ticket: DecodeTicket) -> TwibbonResult<Completion> {
        if !self.is_current(ticket) {
            return Ok(self.complete_stale(ticket));
        }
        let source = self
            .slot(ticket.layer)
            .source
            .clone()
            .ok_or_else(|| TwibbonError::validation("pending slot has no source bytes"))?;
        let result = decode_image(ticket.layer, &source);
        let failure = result.as_ref().err().map(TwibbonError::duplicate);
        self.complete(ticket, result);
        match failure {
            Some(err) => Err(err),
            None => Ok(Completion::Applied),
        }
    }

    /// Apply an externally produced decode result for `ticket`.
    pub fn complete(
        &mut self,
        ticket: DecodeTicket,
        result: TwibbonResult<PreparedImage>,
    ) -> Completion {
        if !self.is_current(ticket) {
            return self.complete_stale(ticket);
        }
        let slot = self.slot_mut(ticket.layer);
        slot.state = match result {
            Ok(img) => {
                tracing::debug!(
                    layer = %ticket.layer,
                    generation = ticket.generation.0,
                    width = img.width(),
                    height = img.height(),
                    "decode applied"
                );
                SlotState::Ready(img)
            }
            Err(err) => {
                tracing::warn!(
                    layer = %ticket.layer,
                    generation = ticket.generation.0,
                    error = %err,
                    "decode failed"
                );
                SlotState::Failed(err)
            }
        };
        Completion::Applied
    }

    /// Latest unresolved ticket of each slot, oldest request first.
    pub fn outstanding(&self) -> Vec<DecodeTicket> {
        let mut out: Vec<DecodeTicket> = [Layer::Photo, Layer::Frame]
            .into_iter()
            .filter_map(|layer| {
                let slot = self.slot(layer);
                match (&slot.state, slot.requested) {
                    (SlotState::Pending, Some(generation)) => Some(DecodeTicket { layer, generation }),
                    _ => None,
                }
            })
            .collect();
        out.sort_by_key(|t| t.generation);
        out
    }

    /// Whether `layer` has been given a source, decoded or not.
    pub fn has_source(&self, layer: Layer) -> bool {
        self.slot(layer).source.is_some()
    }

    /// Decoded image for `layer`, if its latest request succeeded.
    pub fn image(&self, layer: Layer) -> Option<&PreparedImage> {
        match &self.slot(layer).state {
            SlotState::Ready(img) => Some(img),
            _ => None,
        }
    }

    /// Failure of the latest request for `layer`, if any.
    pub fn failure(&self, layer: Layer) -> Option<&TwibbonError> {
        match &self.slot(layer).state {
            SlotState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Evaluate the two-of-two barrier.
    pub fn ready_pair(&self) -> Readiness<'_> {
        for layer in [Layer::Photo, Layer::Frame] {
            if let Some(err) = self.failure(layer) {
                return Readiness::Failed(err);
            }
        }
        match (
            &self.photo.state,
            self.photo.requested,
            &self.frame.state,
            self.frame.requested,
        ) {
            (SlotState::Ready(photo), Some(pg), SlotState::Ready(frame), Some(fg)) => {
                Readiness::Ready(ReadyPair {
                    photo,
                    frame,
                    photo_generation: pg,
                    frame_generation: fg,
                })
            }
            _ => Readiness::Waiting,
        }
    }

    fn is_current(&self, ticket: DecodeTicket) -> bool {
        let slot = self.slot(ticket.layer);
        slot.requested == Some(ticket.generation) && matches!(slot.state, SlotState::Pending)
    }

    fn complete_stale(&self, ticket: DecodeTicket) -> Completion {
        tracing::warn!(
            layer = %ticket.layer,
            generation = ticket.generation.0,
            latest = ?self.slot(ticket.layer).requested.map(|g| g.0),
            "stale decode completion dropped"
        );
        Completion::Stale
    }

    fn bump(&mut self) -> Generation {
        self.next_generation += 1;
        Generation(self.next_generation)
    }

    fn slot(&self, layer: Layer) -> &Slot {
        match layer {
            Layer::Photo => &self.photo,
            Layer::Frame => &self.frame,
        }
    }

    fn slot_mut(&mut self, layer: Layer) -> &mut Slot {
        match layer {
            Layer::Photo => &mut self.photo,
            Layer::Frame => &mut self.frame,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
