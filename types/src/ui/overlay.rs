//! Overlay state machine for the cart and menu panels.

/// Which overlay is showing. Only one can be open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    CartOpen,
    MenuOpen,
}

/// User interactions that drive [`OverlayState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayEvent {
    /// Cart icon clicked.
    ToggleCart,
    /// Menu icon clicked.
    ToggleMenu,
    /// Click on the dimmed area around an open panel.
    CloseViaBackdrop,
    /// A panel button that dismisses the panel (checkout, "confira").
    CloseViaExplicitAction,
}

impl OverlayState {
    /// The state after `event`.
    ///
    /// Asking for the overlay that is already open closes it. Asking for the
    /// other overlay swaps straight to it.
    #[must_use]
    pub const fn apply(self, event: OverlayEvent) -> Self {
        match (self, event) {
            (Self::CartOpen, OverlayEvent::ToggleCart)
            | (Self::MenuOpen, OverlayEvent::ToggleMenu)
            | (_, OverlayEvent::CloseViaBackdrop | OverlayEvent::CloseViaExplicitAction) => {
                Self::Closed
            }
            (Self::Closed | Self::MenuOpen, OverlayEvent::ToggleCart) => Self::CartOpen,
            (Self::Closed | Self::CartOpen, OverlayEvent::ToggleMenu) => Self::MenuOpen,
        }
    }

    /// Page scrolling is suppressed whenever any overlay is open.
    #[must_use]
    pub const fn scroll_locked(self) -> bool {
        !matches!(self, Self::Closed)
    }

    #[must_use]
    pub const fn is_cart_open(self) -> bool {
        matches!(self, Self::CartOpen)
    }

    #[must_use]
    pub const fn is_menu_open(self) -> bool {
        matches!(self, Self::MenuOpen)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::CartOpen => "cart",
            Self::MenuOpen => "menu",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{OverlayEvent, OverlayState};

    const STATES: [OverlayState; 3] = [
        OverlayState::Closed,
        OverlayState::CartOpen,
        OverlayState::MenuOpen,
    ];

    #[test]
    fn transition_table() {
        use OverlayEvent::{CloseViaBackdrop, CloseViaExplicitAction, ToggleCart, ToggleMenu};
        use OverlayState::{CartOpen, Closed, MenuOpen};

        let table = [
            (Closed, ToggleCart, CartOpen),
            (Closed, ToggleMenu, MenuOpen),
            (Closed, CloseViaBackdrop, Closed),
            (Closed, CloseViaExplicitAction, Closed),
            (CartOpen, ToggleCart, Closed),
            (CartOpen, ToggleMenu, MenuOpen),
            (CartOpen, CloseViaBackdrop, Closed),
            (CartOpen, CloseViaExplicitAction, Closed),
            (MenuOpen, ToggleCart, CartOpen),
            (MenuOpen, ToggleMenu, Closed),
            (MenuOpen, CloseViaBackdrop, Closed),
            (MenuOpen, CloseViaExplicitAction, Closed),
        ];
        for (from, event, to) in table {
            assert_eq!(from.apply(event), to, "{from:?} + {event:?}");
        }
    }

    #[test]
    fn scroll_lock_follows_state() {
        for state in STATES {
            assert_eq!(state.scroll_locked(), state != OverlayState::Closed);
        }
    }

    #[test]
    fn never_both_open() {
        for state in STATES {
            assert!(!(state.is_cart_open() && state.is_menu_open()));
        }
    }
}
