const MIN_BAR_WIDTH: u16 = 20;
const MAX_BAR_WIDTH: u16 = 60;
const BAR_MARGIN: u16 = 10;

/// Width of the progress bar for a viewport of the given width.
pub fn bar_width(viewport_width: u16) -> u16 {
    MAX_BAR_WIDTH
        .min(viewport_width.saturating_sub(BAR_MARGIN))
        .max(MIN_BAR_WIDTH)
}

/// Splits a bar of `width` cells into (remaining, elapsed) cells.
/// Remaining cells are rounded down.
pub fn split_bar(remaining_percentage: f64, width: u16) -> (usize, usize) {
    let width = usize::from(width);
    let fraction = (remaining_percentage / 100.0).clamp(0.0, 1.0);
    let remaining = ((fraction * width as f64).floor() as usize).min(width);

    (remaining, width - remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_width_follows_viewport() {
        assert_eq!(bar_width(0), 20);
        assert_eq!(bar_width(5), 20);
        assert_eq!(bar_width(30), 20);
        assert_eq!(bar_width(45), 35);
        assert_eq!(bar_width(70), 60);
        assert_eq!(bar_width(200), 60);
    }

    #[test]
    fn bar_cells_add_up() {
        assert_eq!(split_bar(100.0, 20), (20, 0));
        assert_eq!(split_bar(0.0, 20), (0, 20));
        assert_eq!(split_bar(50.0, 60), (30, 30));
        assert_eq!(split_bar(99.0, 20), (19, 1));
        assert_eq!(split_bar(150.0, 20), (20, 0));
        assert_eq!(split_bar(-3.0, 20), (0, 20));
    }
}
