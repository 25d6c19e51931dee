use ratatui::{Frame, layout::Rect, widgets::Clear};

/// Place a popup directly under `anchor`, flipping above it when `bounds`
/// has no room below. Width and height are clamped to `bounds`.
pub fn popup_below_anchor(anchor: Rect, width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.right().saturating_sub(anchor.x));
    let room_below = bounds.bottom().saturating_sub(anchor.bottom());
    let room_above = anchor.y.saturating_sub(bounds.y);

    let (y, height) = if height <= room_below || room_below >= room_above {
        (anchor.bottom(), height.min(room_below))
    } else {
        let height = height.min(room_above);
        (anchor.y - height, height)
    };

    Rect {
        x: anchor.x,
        y,
        width,
        height,
    }
}

pub fn clear_area(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}

#[cfg(test)]
#[path = "popup_tests.rs"]
mod popup_tests;
