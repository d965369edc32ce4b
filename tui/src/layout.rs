//! Screen geometry shared by drawing, mouse hit-testing and visibility reports.

use std::time::Instant;

use ratatui::layout::{Position, Rect};

use vitrine_engine::{AnchorId, IntersectionEntry, Storefront};

pub const HEADER_HEIGHT: u16 = 3;
pub const STATUS_HEIGHT: u16 = 1;

/// Cells per header icon hit box.
pub const ICON_HIT_WIDTH: u16 = 3;

/// Where an anchor wants to be and how much of it made it on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnchorGeometry {
    pub visible: Rect,
    pub total_cells: u32,
}

impl AnchorGeometry {
    /// Place a `width` x `height` box whose left edge may be off screen.
    #[must_use]
    pub fn place(x: i32, y: u16, width: u16, height: u16, viewport: Rect) -> Self {
        let total_cells = u32::from(width) * u32::from(height);
        let left = x.max(i32::from(viewport.x));
        let right = (x + i32::from(width)).min(i32::from(viewport.right()));
        let top = y.max(viewport.y);
        let bottom = y.saturating_add(height).min(viewport.bottom());
        let visible = if right > left && bottom > top {
            Rect::new(left as u16, top, (right - left) as u16, bottom - top)
        } else {
            Rect::new(viewport.x, viewport.y, 0, 0)
        };
        Self {
            visible,
            total_cells,
        }
    }

    /// Fraction of the anchor's cells that are on screen.
    #[must_use]
    pub fn entry(&self, anchor: AnchorId) -> IntersectionEntry {
        let visible = u32::from(self.visible.width) * u32::from(self.visible.height);
        IntersectionEntry::from_areas(anchor, visible, self.total_cells)
    }
}

/// Rects produced by the last draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitMap {
    pub viewport: Rect,
    pub links: AnchorGeometry,
    pub icons: AnchorGeometry,
    pub menu_icon: Rect,
    pub cart_icon: Rect,
    /// Area covered by an open overlay.
    pub backdrop: Option<Rect>,
    /// The panel inside the backdrop; clicks here do not close it.
    pub panel: Option<Rect>,
    pub panel_button: Option<Rect>,
}

/// What a mouse click at a position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    MenuIcon,
    CartIcon,
    PanelButton,
    Panel,
    Backdrop,
    Page,
}

impl HitMap {
    #[must_use]
    pub fn anchor(&self, anchor: AnchorId) -> AnchorGeometry {
        match anchor {
            AnchorId::NavLinks => self.links,
            AnchorId::NavIcons => self.icons,
        }
    }

    #[must_use]
    pub fn target_at(&self, column: u16, row: u16) -> ClickTarget {
        let at = Position::new(column, row);
        if self.menu_icon.contains(at) {
            return ClickTarget::MenuIcon;
        }
        if self.cart_icon.contains(at) {
            return ClickTarget::CartIcon;
        }
        if self.panel_button.is_some_and(|rect| rect.contains(at)) {
            return ClickTarget::PanelButton;
        }
        if self.panel.is_some_and(|rect| rect.contains(at)) {
            return ClickTarget::Panel;
        }
        if self.backdrop.is_some_and(|rect| rect.contains(at)) {
            return ClickTarget::Backdrop;
        }
        ClickTarget::Page
    }
}

/// Report how much of each still-observed header anchor the last frame showed.
pub fn report_visibility(shop: &mut Storefront, hits: &HitMap, now: Instant) {
    let entries: Vec<IntersectionEntry> = shop
        .navigation()
        .observed_anchors()
        .map(|anchor| hits.anchor(anchor).entry(anchor))
        .collect();
    if entries.is_empty() {
        return;
    }
    shop.navigation_mut().report_intersections(now, &entries);
}

#[cfg(test)]
mod tests {
    use super::{AnchorGeometry, ClickTarget, HitMap};
    use ratatui::layout::Rect;
    use vitrine_engine::AnchorId;

    #[test]
    fn fully_visible_anchor() {
        let viewport = Rect::new(0, 0, 80, 24);
        let geometry = AnchorGeometry::place(10, 1, 20, 1, viewport);
        assert_eq!(geometry.visible, Rect::new(10, 1, 20, 1));
        let entry = geometry.entry(AnchorId::NavLinks);
        assert!((entry.ratio - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn anchor_hanging_off_left_edge_is_partial() {
        let viewport = Rect::new(0, 0, 30, 24);
        let geometry = AnchorGeometry::place(-15, 1, 20, 1, viewport);
        assert_eq!(geometry.visible, Rect::new(0, 1, 5, 1));
        let entry = geometry.entry(AnchorId::NavLinks);
        assert!((entry.ratio - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn anchor_entirely_off_screen() {
        let viewport = Rect::new(0, 0, 30, 1);
        let geometry = AnchorGeometry::place(5, 3, 10, 1, viewport);
        assert_eq!(geometry.visible.width, 0);
        assert!(!geometry.entry(AnchorId::NavIcons).is_intersecting());
    }

    #[test]
    fn click_targets_prefer_specific_rects() {
        let hits = HitMap {
            viewport: Rect::new(0, 0, 80, 24),
            menu_icon: Rect::new(70, 1, 3, 1),
            cart_icon: Rect::new(73, 1, 3, 1),
            backdrop: Some(Rect::new(0, 3, 80, 20)),
            panel: Some(Rect::new(4, 4, 72, 18)),
            panel_button: Some(Rect::new(30, 8, 20, 1)),
            ..HitMap::default()
        };
        assert_eq!(hits.target_at(71, 1), ClickTarget::MenuIcon);
        assert_eq!(hits.target_at(74, 1), ClickTarget::CartIcon);
        assert_eq!(hits.target_at(35, 8), ClickTarget::PanelButton);
        assert_eq!(hits.target_at(10, 10), ClickTarget::Panel);
        assert_eq!(hits.target_at(1, 3), ClickTarget::Backdrop);
        assert_eq!(hits.target_at(1, 0), ClickTarget::Page);
    }
}
