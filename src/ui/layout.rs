use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Header, body and a one-line key hint footer.
pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: vertical[0],
            main: vertical[1],
            footer: vertical[2],
        }
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 40;
    const MIN_POPUP_HEIGHT: u16 = 7;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

/// "mm:ss" for countdown labels.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_is_clamped_to_area() {
        let area = Rect::new(0, 0, 30, 5);
        let popup = centered_rect(50, 50, area);
        assert_eq!(popup, area);

        let big = Rect::new(0, 0, 200, 60);
        let popup = centered_rect(50, 50, big);
        assert_eq!((popup.x, popup.y, popup.width, popup.height), (50, 15, 100, 30));
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(59), "00:59");
    }
}
