use crate::gallery::view::{GalleryView, Transition};

/// Pointer events the host surface forwards to the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInput {
    /// The currently displayed gallery image was clicked.
    ImageClicked,
    /// The dimmed backdrop behind the enlarged image was clicked.
    BackdropClicked,
    /// The enlarged image itself was clicked; it sits on the backdrop.
    OverlayImageClicked,
    /// The overlay's dismiss control was clicked.
    DismissClicked,
}

/// Emitted by the timer task once per elapsed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

/// One view snapshot for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub view: GalleryView,
    pub transition: Option<Transition>,
}
