//! In-memory page: the `#papers` region, the `#save-form` form and the
//! controls currently bound inside the region.
//!
//! Replacing the region drops every previous binding and binds the controls
//! of the new blocks, so a control index is only meaningful for the render
//! generation it was read from.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::display;
use crate::render::{ActionControl, ControlKind, PaperBlock, escape};

/// Page shared between the event loop and in-flight action chains.
///
/// The lock is held only for synchronous reads and writes, never across a
/// network call.
pub type SharedPage = Arc<Mutex<Page>>;

/// Lock a shared page, recovering the contents if a holder panicked.
#[must_use]
pub fn lock(page: &SharedPage) -> MutexGuard<'_, Page> {
    page.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// The `save-form` element with its single `paper_id` field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveForm {
    paper_id: String,
}

impl SaveForm {
    /// Current value of the `paper_id` field.
    #[must_use]
    pub fn paper_id(&self) -> &str {
        &self.paper_id
    }

    /// Type into the `paper_id` field.
    pub fn set_paper_id(&mut self, paper_id: impl Into<String>) {
        self.paper_id = paper_id.into();
    }

    /// Clear every field.
    pub fn reset(&mut self) {
        self.paper_id.clear();
    }

    fn html(&self) -> String {
        format!(
            r#"<form id="save-form">
    <input type="text" name="paper_id" value="{}" placeholder="Paper ID">
    <button type="submit">Save</button>
</form>"#,
            escape(&self.paper_id)
        )
    }
}

/// Page state.
#[derive(Debug, Clone)]
pub struct Page {
    papers_html: String,
    blocks: Vec<PaperBlock>,
    controls: Vec<ActionControl>,
    generation: u64,
    save_form: SaveForm,
}

impl Page {
    /// Create a page whose papers region holds `placeholder_html`.
    #[must_use]
    pub fn new(placeholder_html: impl Into<String>) -> Self {
        Self {
            papers_html: placeholder_html.into(),
            blocks: Vec::new(),
            controls: Vec::new(),
            generation: 0,
            save_form: SaveForm::default(),
        }
    }

    /// Wrap into a [`SharedPage`].
    #[must_use]
    pub fn shared(self) -> SharedPage {
        Arc::new(Mutex::new(self))
    }

    /// Replace the entire papers region and rebind its controls.
    pub fn replace_papers(&mut self, blocks: Vec<PaperBlock>) {
        self.papers_html = blocks.iter().map(|b| b.html.as_str()).collect::<Vec<_>>().join("\n");
        self.controls = blocks.iter().flat_map(PaperBlock::controls).collect();
        self.blocks = blocks;
        self.generation += 1;

        tracing::debug!(
            generation = self.generation,
            blocks = self.blocks.len(),
            controls = self.controls.len(),
            "Papers region replaced"
        );
    }

    /// Inner HTML of the papers region.
    #[must_use]
    pub fn papers_html(&self) -> &str {
        &self.papers_html
    }

    /// Blocks currently displayed (empty while the placeholder is shown).
    #[must_use]
    pub fn blocks(&self) -> &[PaperBlock] {
        &self.blocks
    }

    /// Bound controls in document order.
    #[must_use]
    pub fn controls(&self) -> &[ActionControl] {
        &self.controls
    }

    /// Control at `index`, if bound.
    #[must_use]
    pub fn control(&self, index: usize) -> Option<&ActionControl> {
        self.controls.get(index)
    }

    /// Index of the `kind` control inside the `block`-th paper (zero-based).
    #[must_use]
    pub fn control_index(&self, block: usize, kind: ControlKind) -> Option<usize> {
        self.blocks.get(block)?;
        let per_block = self.controls.len() / self.blocks.len();

        self.controls
            .iter()
            .enumerate()
            .skip(block * per_block)
            .take(per_block)
            .find(|(_, c)| c.kind == kind)
            .map(|(index, _)| index)
    }

    /// Number of times the region has been replaced.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// The save form.
    #[must_use]
    pub const fn save_form(&self) -> &SaveForm {
        &self.save_form
    }

    /// Mutable access to the save form.
    pub fn save_form_mut(&mut self) -> &mut SaveForm {
        &mut self.save_form
    }

    /// A standalone HTML document holding the form and the papers region.
    #[must_use]
    pub fn document_html(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Paper Feed</title>
</head>
<body>
{form}
<div id="papers">
{papers}
</div>
</body>
</html>
"#,
            form = self.save_form.html(),
            papers = self.papers_html,
        )
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(display::PLACEHOLDER_HTML)
    }
}
