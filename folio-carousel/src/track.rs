//! Horizontal track geometry.
//!
//! The track is `page_count * 100%` of the viewport wide and every page
//! takes `100 / page_count` percent of it, so translations are expressed in
//! percent of the track width.

use crate::transition::TrackTransition;

/// Width of one page in percent of the track.
pub fn page_width_percent(page_count: usize) -> f32 {
    100.0 / page_count.max(1) as f32
}

/// Translation placing `index` at the viewport origin, in percent of the
/// track width.
pub fn translate_percent(index: usize, page_count: usize) -> f32 {
    let translate = -(index as f32 * page_width_percent(page_count));
    // Avoid rendering `-0%` for the first page.
    if translate == 0.0 { 0.0 } else { translate }
}

/// Layout of a single page section on the track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageStyle {
    /// Page index on the track.
    pub index: usize,
    /// Section width in percent of the track.
    pub width_percent: f32,
    /// Whether this page sits at the viewport origin.
    pub is_current: bool,
}

/// Style of the paging track at rest or during a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackStyle {
    /// Track width in percent of the viewport.
    pub width_percent: f32,
    /// Horizontal translation in percent of the track width.
    pub translate_x_percent: f32,
    /// Eased transition while the animation lock is held.
    pub transition: Option<TrackTransition>,
}

impl TrackStyle {
    /// Style for `index` in a set of `page_count` pages.
    pub fn new(index: usize, page_count: usize, transition: Option<TrackTransition>) -> Self {
        Self {
            width_percent: page_count as f32 * 100.0,
            translate_x_percent: translate_percent(index, page_count),
            transition,
        }
    }

    /// CSS `transform` value.
    pub fn transform_css(&self) -> String {
        format!("translateX({}%)", self.translate_x_percent)
    }

    /// CSS `transition` value, `none` at rest.
    pub fn transition_css(&self) -> String {
        self.transition
            .map(|transition| transition.to_css())
            .unwrap_or_else(|| "none".to_string())
    }
}

/// Section styles for every page on the track.
pub fn page_styles(current: usize, page_count: usize) -> impl Iterator<Item = PageStyle> {
    let width_percent = page_width_percent(page_count);
    (0..page_count).map(move |index| PageStyle {
        index,
        width_percent,
        is_current: index == current,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_pages_translate_in_quarters() {
        assert_eq!(translate_percent(0, 4), 0.0);
        assert_eq!(translate_percent(1, 4), -25.0);
        assert_eq!(translate_percent(3, 4), -75.0);
        assert_eq!(
            TrackStyle::new(2, 4, None).transform_css(),
            "translateX(-50%)"
        );
    }

    #[test]
    fn empty_track_does_not_divide_by_zero() {
        let style = TrackStyle::new(0, 0, None);
        assert_eq!(style.width_percent, 0.0);
        assert_eq!(style.translate_x_percent, 0.0);
        assert_eq!(page_styles(0, 0).count(), 0);
    }

    #[test]
    fn transition_css_is_none_at_rest() {
        assert_eq!(TrackStyle::new(1, 4, None).transition_css(), "none");
    }

    #[test]
    fn page_styles_mark_the_current_page() {
        let styles: Vec<_> = page_styles(1, 4).collect();
        assert_eq!(styles.len(), 4);
        assert!(styles[1].is_current);
        assert!(styles.iter().all(|page| page.width_percent == 25.0));
    }
}
