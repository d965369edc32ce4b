//! Reveal-on-scroll anchors.

/// Regions of the header that fade in once they have been on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnchorId {
    NavLinks,
    NavIcons,
}

impl AnchorId {
    pub const ALL: [AnchorId; 2] = [AnchorId::NavLinks, AnchorId::NavIcons];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AnchorId::NavLinks => "nav-links",
            AnchorId::NavIcons => "nav-icons",
        }
    }
}

/// Trigger and reveal bookkeeping for one anchor.
///
/// Both flags only ever go from `false` to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealAnchor {
    id: AnchorId,
    triggered: bool,
    revealed: bool,
}

impl RevealAnchor {
    #[must_use]
    pub const fn new(id: AnchorId) -> Self {
        Self {
            id,
            triggered: false,
            revealed: false,
        }
    }

    #[must_use]
    pub const fn id(&self) -> AnchorId {
        self.id
    }

    #[must_use]
    pub const fn has_triggered(&self) -> bool {
        self.triggered
    }

    #[must_use]
    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Record the first qualifying intersection. Returns `false` if the
    /// anchor had already triggered.
    pub fn trigger(&mut self) -> bool {
        if self.triggered {
            return false;
        }
        self.triggered = true;
        true
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }
}
