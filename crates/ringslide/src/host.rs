use crate::config::ThumbSize;
use crate::error::SliderError;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Capabilities the slider asks of whatever view system embeds it.
///
/// Both calls are requests; a host that cannot honour them may ignore
/// them, which is what [`NoopHost`] does.
pub trait SliderHost {
    /// Schedule a repaint. Called after every derived-geometry change.
    fn request_redraw(&self) {}

    /// Ask ancestors not to steal the current gesture (scroll containers
    /// and the like). `true` when a drag starts, `false` when it ends.
    fn disallow_ancestor_intercept(&self, _disallow: bool) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHost;

impl SliderHost for NoopHost {}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ResourceId(String);

crate::impl_string_newtype!(ResourceId);

/// Resolves a platform image into something the renderer can paint.
///
/// The slider only keeps the returned [`ThumbSize`]; the image itself is
/// handed back to the caller.
pub trait ThumbSource {
    type Image;

    fn resolve(&self, id: &ResourceId) -> Result<(Self::Image, ThumbSize), SliderError>;
}
