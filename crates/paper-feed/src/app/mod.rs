//! The feed page's behavior: loading the list and the save and copy actions.
//!
//! Every action is one request/response cycle. Failures end the action; the
//! user repeats the interaction to try again.

use std::sync::Arc;

use crate::client::PaperFeedClient;
use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::error::{ActionError, ActionResult};
use crate::models::SaveResponse;
use crate::notify::Notifier;
use crate::page::{Page, SharedPage, lock};
use crate::render::{ControlKind, Renderer};

/// Alert shown after a successful save.
pub const SAVE_SUCCESS_MESSAGE: &str = "Paper saved successfully!";

/// Result of a paper list load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The region was replaced with this many papers.
    Rendered(usize),
    /// The server returned no papers; the region was left as it was.
    Empty,
    /// The request failed; logged only.
    Failed,
}

/// Page controller.
#[derive(Clone)]
pub struct FeedApp {
    client: PaperFeedClient,
    renderer: Renderer,
    page: SharedPage,
    clipboard: Arc<dyn Clipboard>,
    notifier: Arc<dyn Notifier>,
}

impl FeedApp {
    /// Assemble a controller from its parts.
    #[must_use]
    pub fn new(
        client: PaperFeedClient,
        renderer: Renderer,
        page: SharedPage,
        clipboard: Arc<dyn Clipboard>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { client, renderer, page, clipboard, notifier }
    }

    /// Build a controller with a fresh page from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn from_config(
        config: &Config,
        clipboard: Arc<dyn Clipboard>,
        notifier: Arc<dyn Notifier>,
    ) -> anyhow::Result<Self> {
        let client = PaperFeedClient::new(config)?;
        let renderer = Renderer::new(config.render.clone());
        Ok(Self::new(client, renderer, Page::default().shared(), clipboard, notifier))
    }

    /// The page this controller renders into.
    #[must_use]
    pub fn page(&self) -> &SharedPage {
        &self.page
    }

    /// Fetch the paper list and replace the papers region with it.
    ///
    /// An empty list leaves the region untouched. Failures are logged and
    /// never shown to the user.
    pub async fn load_papers(&self) -> LoadOutcome {
        tracing::info!(url = %self.client.papers_url(), "Fetching papers...");

        match self.client.fetch_papers().await {
            Ok(papers) if papers.is_empty() => {
                tracing::info!("No papers received");
                LoadOutcome::Empty
            }
            Ok(papers) => {
                tracing::info!(count = papers.len(), "Received papers");
                let blocks = self.renderer.render(&papers);
                lock(&self.page).replace_papers(blocks);
                LoadOutcome::Rendered(papers.len())
            }
            Err(e) => {
                tracing::error!(error = %e, status = ?e.status_code(), "Error fetching papers");
                LoadOutcome::Failed
            }
        }
    }

    /// Submit the save form: save `paper_id`, the value the form held when it
    /// was submitted, and clear the form on success.
    pub async fn submit_save_form(&self, paper_id: &str) -> ActionResult<SaveResponse> {
        let result = self.request_save(paper_id).await;
        self.report_save(&result);

        if result.is_ok() {
            lock(&self.page).save_form_mut().reset();
        }
        result
    }

    /// Save a paper from its block's save button. The form is not touched.
    pub async fn save_paper(&self, paper_id: &str) -> ActionResult<SaveResponse> {
        let result = self.request_save(paper_id).await;
        self.report_save(&result);
        result
    }

    /// Copy a paper id, verbatim, to the clipboard.
    pub async fn copy_link(&self, paper_id: &str) -> ActionResult<()> {
        match self.clipboard.write_text(paper_id).await {
            Ok(()) => {
                tracing::info!(paper_id, clipboard = self.clipboard.name(), "Paper ID copied to clipboard!");
                Ok(())
            }
            Err(e) => {
                tracing::error!(paper_id, error = %e, "Failed to copy paper ID");
                let err = ActionError::from(e);
                self.notifier.alert(&err.to_user_message());
                Err(err)
            }
        }
    }

    /// Click the control bound at `index` in render `generation`.
    ///
    /// Returns `None` when nothing is bound there or the region has been
    /// replaced since `generation`.
    pub async fn click(&self, generation: u64, index: usize) -> Option<ActionResult<()>> {
        let control = {
            let page = lock(&self.page);
            if page.generation() != generation {
                tracing::warn!(
                    index,
                    generation,
                    current = page.generation(),
                    "Click on a replaced render ignored"
                );
                return None;
            }
            page.control(index).cloned()
        };

        let Some(control) = control else {
            tracing::warn!(index, "Click on unbound control ignored");
            return None;
        };

        tracing::debug!(index, kind = %control.kind, paper_id = %control.paper_id, "Control clicked");
        Some(match control.kind {
            ControlKind::SavePaper => self.save_paper(&control.paper_id).await.map(|_| ()),
            ControlKind::CopyLink => self.copy_link(&control.paper_id).await,
        })
    }

    async fn request_save(&self, paper_id: &str) -> ActionResult<SaveResponse> {
        let response = self.client.save_paper(paper_id).await.map_err(|e| {
            tracing::error!(paper_id, error = %e, "Error saving paper");
            ActionError::from(e)
        })?;

        if response.success {
            tracing::info!(
                paper_id,
                saved_id = response.paper.as_ref().map(|p| p.id.as_str()),
                "Paper saved"
            );
            Ok(response)
        } else {
            tracing::warn!(paper_id, server_message = response.message(), "Save rejected");
            Err(ActionError::rejected(response.message))
        }
    }

    fn report_save(&self, result: &ActionResult<SaveResponse>) {
        match result {
            Ok(_) => self.notifier.alert(SAVE_SUCCESS_MESSAGE),
            Err(e) => self.notifier.alert(&e.to_user_message()),
        }
    }
}

impl std::fmt::Debug for FeedApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedApp")
            .field("client", &self.client)
            .field("clipboard", &self.clipboard.name())
            .finish()
    }
}
