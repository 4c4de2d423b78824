//! The portfolio deck and a plain-text rendering of it.

use std::{fmt::Write as _, time::Instant};

use folio_carousel::{Carousel, SlideDef, SlideSet};

/// Text content of one slide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideContent {
    /// Heading shown at the top of the slide.
    pub title: &'static str,
    /// Body lines.
    pub lines: Vec<&'static str>,
}

/// The four slides of the portfolio root page.
pub fn root_slides() -> SlideSet<SlideContent> {
    SlideSet::new([
        SlideDef::new(
            "home",
            "Home",
            SlideContent {
                title: "Home",
                lines: vec!["Portfolio", "(as a service)"],
            },
        ),
        SlideDef::new(
            "work",
            "Work",
            SlideContent {
                title: "Work",
                lines: vec!["Project A", "Project B", "Project C"],
            },
        ),
        SlideDef::new(
            "about",
            "About",
            SlideContent {
                title: "About",
                lines: vec!["Bio, skills, fun facts.", "Rust · TypeScript · Design Systems"],
            },
        ),
        SlideDef::new(
            "contact",
            "Contact",
            SlideContent {
                title: "Contact",
                lines: vec!["GitHub", "LinkedIn", "Email"],
            },
        ),
    ])
}

/// Renders the nav bar, track state and current slide as text.
pub fn render_frame(carousel: &Carousel<SlideDef<SlideContent>>, now: Instant) -> String {
    let mut frame = String::new();
    let current = carousel.current_index();

    let nav: Vec<String> = carousel
        .pages()
        .iter()
        .enumerate()
        .map(|(index, slide)| {
            if index == current {
                format!("[{}]", slide.label)
            } else {
                format!(" {} ", slide.label)
            }
        })
        .collect();
    let _ = writeln!(frame, "{}", nav.join(" "));

    let style = carousel.track_style();
    let _ = writeln!(
        frame,
        "track: width {}% transform {} (visual {:.1}%) transition {}",
        style.width_percent,
        style.transform_css(),
        carousel.visual_translate_percent(now),
        style.transition_css(),
    );

    if let Some(slide) = carousel.current_page() {
        let context = carousel.slide_context(current);
        let _ = writeln!(frame, "# {}", slide.content.title);
        for line in &slide.content.lines {
            let _ = writeln!(frame, "  {line}");
        }
        if context.has_next {
            let _ = writeln!(frame, "  (v) next");
        }
    }
    frame
}
