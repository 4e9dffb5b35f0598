//! Tooltip placement
//!
//! The tooltip opens away from the nearest viewport edges: above the pointer
//! in the lower half of the screen, to the left in the right half.

/// Horizontal offset from the pointer, px
pub const TOOLTIP_OFFSET_X: f64 = 20.0;
/// Vertical offset from the pointer, px
pub const TOOLTIP_OFFSET_Y: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    /// Tooltip sits above the pointer
    Top,
    /// Tooltip sits below the pointer
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    /// Tooltip sits left of the pointer
    Left,
    /// Tooltip sits right of the pointer
    Right,
}

/// Fixed-position anchor for the tooltip box, in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipAnchor {
    pub x: f64,
    pub y: f64,
    pub v_align: VAlign,
    pub h_align: HAlign,
}

/// Anchor for a pointer at `(px, py)` in a `vw × vh` viewport
pub fn position(px: f64, py: f64, vw: f64, vh: f64) -> TooltipAnchor {
    let v_align = if py > vh / 2.0 { VAlign::Top } else { VAlign::Bottom };
    let h_align = if px > vw / 2.0 { HAlign::Left } else { HAlign::Right };

    let y = match v_align {
        VAlign::Bottom => py - TOOLTIP_OFFSET_Y,
        VAlign::Top => py + TOOLTIP_OFFSET_Y,
    };
    let x = match h_align {
        HAlign::Left => px - TOOLTIP_OFFSET_X,
        HAlign::Right => px + TOOLTIP_OFFSET_X,
    };

    TooltipAnchor { x, y, v_align, h_align }
}

impl TooltipAnchor {
    /// CSS translate that flips the box to the anchored side
    pub fn transform(&self) -> String {
        let tx = match self.h_align {
            HAlign::Left => "-100%",
            HAlign::Right => "0%",
        };
        let ty = match self.v_align {
            VAlign::Top => "-100%",
            VAlign::Bottom => "0%",
        };
        format!("translate({tx},{ty})")
    }

    /// Inline style for a `position: fixed` element
    pub fn style(&self) -> String {
        format!(
            "position: fixed; left: {}px; top: {}px; transform: {};",
            self.x,
            self.y,
            self.transform()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_right_opens_left_below() {
        let anchor = position(900.0, 100.0, 1000.0, 1000.0);
        assert_eq!(anchor.h_align, HAlign::Left);
        assert_eq!(anchor.v_align, VAlign::Bottom);
        assert_eq!((anchor.x, anchor.y), (880.0, 60.0));
    }

    #[test]
    fn test_lower_left_opens_right_above() {
        let anchor = position(100.0, 900.0, 1000.0, 1000.0);
        assert_eq!(anchor.h_align, HAlign::Right);
        assert_eq!(anchor.v_align, VAlign::Top);
        assert_eq!(anchor.transform(), "translate(0%,-100%)");
    }
}
