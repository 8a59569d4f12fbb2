use crate::assets::AssetSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Cycling,
    Paused,
}

/// Interaction state of one gallery instance.
///
/// `selected` only exists while paused, so "auto-advance iff nothing is
/// selected" holds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryState {
    Cycling { index: usize },
    Paused { index: usize, selected: AssetSource },
}

impl GalleryState {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Cycling { .. } => Phase::Cycling,
            Self::Paused { .. } => Phase::Paused,
        }
    }

    pub fn current_index(&self) -> usize {
        match self {
            Self::Cycling { index } | Self::Paused { index, .. } => *index,
        }
    }

    pub fn auto_advance(&self) -> bool {
        matches!(self, Self::Cycling { .. })
    }

    pub fn selected(&self) -> Option<&AssetSource> {
        match self {
            Self::Cycling { .. } => None,
            Self::Paused { selected, .. } => Some(selected),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryStateChange {
    pub from: Phase,
    pub to: Phase,
}

pub struct GallerySM {
    state: GalleryState,
    len: usize,
}

impl GallerySM {
    /// `len` is the record count and must be at least one.
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "gallery state machine needs at least one record");
        Self {
            state: GalleryState::Cycling { index: 0 },
            len,
        }
    }

    pub fn current(&self) -> &GalleryState {
        &self.state
    }

    /// Advance the cursor. Returns the new index, or `None` while paused.
    pub fn on_tick(&mut self) -> Option<usize> {
        match &mut self.state {
            GalleryState::Cycling { index } => {
                *index = (*index + 1) % self.len;
                Some(*index)
            }
            GalleryState::Paused { .. } => None,
        }
    }

    pub fn on_open(&mut self, selected: AssetSource) -> Option<GalleryStateChange> {
        match self.state {
            GalleryState::Cycling { index } => {
                self.goto(GalleryState::Paused { index, selected })
            }
            GalleryState::Paused { .. } => None,
        }
    }

    pub fn on_close(&mut self) -> Option<GalleryStateChange> {
        match self.state {
            GalleryState::Paused { index, .. } => self.goto(GalleryState::Cycling { index }),
            GalleryState::Cycling { .. } => None,
        }
    }

    fn goto(&mut self, to: GalleryState) -> Option<GalleryStateChange> {
        let ch = GalleryStateChange {
            from: self.state.phase(),
            to: to.phase(),
        };
        self.state = to;
        Some(ch)
    }
}
