//! Renderable view tree and transition hints.
//!
//! The view is a plain snapshot: whatever sits at the cursor is what the host
//! draws. Motion values describe the styling layer's fade/slide effect and
//! carry no functional meaning.

use std::time::Duration;

use crate::assets::{AssetSource, Records};
use crate::config::HeadingConfig;

use super::state::GalleryState;

pub const OVERLAY_ALT: &str = "Selected";
pub const DISMISS_LABEL: &str = "×";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub text1: String,
    pub text2: String,
}

impl From<&HeadingConfig> for Heading {
    fn from(cfg: &HeadingConfig) -> Self {
        Self {
            text1: cfg.text1.clone(),
            text2: cfg.text2.clone(),
        }
    }
}

impl Default for Heading {
    fn default() -> Self {
        Self::from(&HeadingConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub key: usize,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlock {
    pub key: usize,
    pub source: AssetSource,
    pub alt: String,
    /// Clicking opens the lightbox; false while the overlay covers it.
    pub clickable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub source: AssetSource,
    pub alt: &'static str,
    pub dismiss_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub heading: Heading,
    pub content: ContentBlock,
    pub image: ImageBlock,
    pub overlay: Option<Overlay>,
}

impl GalleryView {
    pub fn compose(heading: &Heading, records: &Records, state: &GalleryState) -> Self {
        let index = state.current_index();
        let record = records.at(index);
        let overlay = state.selected().map(|source| Overlay {
            source: source.clone(),
            alt: OVERLAY_ALT,
            dismiss_label: DISMISS_LABEL,
        });
        Self {
            heading: heading.clone(),
            content: ContentBlock {
                key: index,
                title: record.title.clone(),
                description: record.description.clone(),
            },
            image: ImageBlock {
                key: index,
                source: record.source.clone(),
                alt: format!("Gallery {index}"),
                clickable: overlay.is_none(),
            },
            overlay,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub opacity: f32,
    pub offset_x: f32,
    pub scale: f32,
}

impl Motion {
    pub const REST: Self = Self {
        opacity: 1.0,
        offset_x: 0.0,
        scale: 1.0,
    };

    const fn hidden(offset_x: f32, scale: f32) -> Self {
        Self {
            opacity: 0.0,
            offset_x,
            scale,
        }
    }
}

/// Keyframes for one block: where new content starts, where it settles, and
/// where outgoing content goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSpec {
    pub initial: Motion,
    pub animate: Motion,
    pub exit: Motion,
}

impl MotionSpec {
    pub const TEXT: Self = Self {
        initial: Motion::hidden(-50.0, 1.0),
        animate: Motion::REST,
        exit: Motion::hidden(50.0, 1.0),
    };

    pub const IMAGE: Self = Self {
        initial: Motion::hidden(0.0, 0.9),
        animate: Motion::REST,
        exit: Motion::hidden(0.0, 0.9),
    };
}

/// Outgoing content finishes its exit before incoming content enters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub duration: Duration,
    pub text: MotionSpec,
    pub image: MotionSpec,
}

/// Tracks the keyed content last handed to the renderer.
#[derive(Debug, Clone)]
pub struct Presence {
    shown: Option<usize>,
    duration: Duration,
}

impl Presence {
    pub fn new(duration: Duration) -> Self {
        Self {
            shown: None,
            duration,
        }
    }

    /// Record `key` as shown; yields a transition when it replaces other content.
    pub fn observe(&mut self, key: usize) -> Option<Transition> {
        let previous = self.shown.replace(key)?;
        if previous == key {
            return None;
        }
        Some(Transition {
            from: previous,
            to: key,
            duration: self.duration,
            text: MotionSpec::TEXT,
            image: MotionSpec::IMAGE,
        })
    }
}
