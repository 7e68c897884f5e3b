//! HTML rendering of paper blocks.
//!
//! Each paper becomes one `div.paper` block with its title, update date,
//! score, abstract and an action row (save, PDF link, copy). The save and copy
//! buttons are returned alongside the markup as [`ActionControl`]s so the page
//! can bind them.

mod date;
mod html;

pub use date::format_date;
pub use html::escape;

use crate::config::RenderOptions;
use crate::models::Paper;

/// Kind of per-paper action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// `button.save-paper`
    SavePaper,
    /// `button.copy-link`
    CopyLink,
}

impl ControlKind {
    /// CSS class carried by the button.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::SavePaper => "save-paper",
            Self::CopyLink => "copy-link",
        }
    }

    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SavePaper => "Save Paper",
            Self::CopyLink => "Copy Link",
        }
    }
}

impl std::fmt::Display for ControlKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_class())
    }
}

/// A clickable control and the paper id in its `data-paper-id` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionControl {
    /// What clicking the control does.
    pub kind: ControlKind,
    /// Value of `data-paper-id`.
    pub paper_id: String,
}

/// Rendered markup for one paper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperBlock {
    /// Paper id the block was rendered from.
    pub paper_id: String,
    /// Title as displayed (unescaped), for listings.
    pub title: String,
    /// Outer HTML of the `div.paper` element.
    pub html: String,
}

impl PaperBlock {
    /// The save and copy controls in document order.
    #[must_use]
    pub fn controls(&self) -> [ActionControl; 2] {
        [
            ActionControl { kind: ControlKind::SavePaper, paper_id: self.paper_id.clone() },
            ActionControl { kind: ControlKind::CopyLink, paper_id: self.paper_id.clone() },
        ]
    }
}

/// Turns papers into display blocks.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    /// Create a renderer.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render every paper, preserving order.
    #[must_use]
    pub fn render(&self, papers: &[Paper]) -> Vec<PaperBlock> {
        papers.iter().map(|p| self.render_paper(p)).collect()
    }

    /// Render a single paper block.
    #[must_use]
    pub fn render_paper(&self, paper: &Paper) -> PaperBlock {
        let text = |s: &str| if self.options.escape_html { escape(s) } else { s.to_string() };
        let id = escape(&paper.id);

        let html = format!(
            r#"<div class="paper">
    <h2>{title}</h2>
    <p class="submission-date">Updated: {date}</p>
    <p class="score">Score: {score}</p>
    <p>{abstract_}</p>
    <div class="paper-actions">
        <button class="{save}" data-paper-id="{id}">{save_label}</button>
        <a href="{pdf}" target="_blank" class="view-pdf">View PDF</a>
        <button class="{copy}" data-paper-id="{id}">{copy_label}</button>
    </div>
</div>"#,
            title = text(&paper.title),
            date = escape(&format_date(&paper.published, &self.options)),
            score = paper.score_display(),
            abstract_ = text(&paper.r#abstract),
            save = ControlKind::SavePaper.css_class(),
            save_label = ControlKind::SavePaper.label(),
            pdf = escape(&paper.pdf_url()),
            copy = ControlKind::CopyLink.css_class(),
            copy_label = ControlKind::CopyLink.label(),
        );

        PaperBlock { paper_id: paper.id.clone(), title: paper.title.clone(), html }
    }
}
