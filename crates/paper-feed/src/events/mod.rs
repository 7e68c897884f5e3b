//! Event dispatch.
//!
//! Each event starts its own asynchronous chain. Chains are not ordered with
//! respect to each other and cannot be cancelled once started; a reload that
//! overlaps another one simply renders whichever answer arrives last.

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::app::FeedApp;
use crate::page::{SharedPage, lock};
use crate::render::ControlKind;

/// Something the user (or the page lifecycle) did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The page finished loading: fetch the list.
    Ready,
    /// Fetch the list again.
    Reload,
    /// The save form was submitted holding this value.
    SubmitSaveForm {
        /// Value of the `paper_id` field at submit time.
        paper_id: String,
    },
    /// The control bound at `index` in render `generation` was clicked.
    Click {
        /// Render generation the index was read from.
        generation: u64,
        /// Position in the bound control list.
        index: usize,
    },
}

impl UiEvent {
    /// Submit the save form with its current value.
    #[must_use]
    pub fn submit_save_form(page: &SharedPage) -> Self {
        let paper_id = lock(page).save_form().paper_id().to_string();
        Self::SubmitSaveForm { paper_id }
    }

    /// Click the `kind` control of the `block`-th paper currently displayed.
    #[must_use]
    pub fn click(page: &SharedPage, block: usize, kind: ControlKind) -> Option<Self> {
        let page = lock(page);
        let index = page.control_index(block, kind)?;
        Some(Self::Click { generation: page.generation(), index })
    }
}

/// Consumes [`UiEvent`]s and runs their handlers.
#[derive(Debug)]
pub struct EventLoop {
    app: FeedApp,
    events: mpsc::Receiver<UiEvent>,
}

impl EventLoop {
    /// Create a loop and the sender that feeds it.
    #[must_use]
    pub fn channel(app: FeedApp, capacity: usize) -> (mpsc::Sender<UiEvent>, Self) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (tx, Self { app, events: rx })
    }

    /// Run until every sender is dropped, then wait for in-flight chains.
    ///
    /// Returns the number of events handled.
    pub async fn run(mut self) -> usize {
        let mut chains = JoinSet::new();
        let mut handled = 0;

        while let Some(event) = self.events.recv().await {
            handled += 1;
            let app = self.app.clone();
            chains.spawn(dispatch(app, event));

            while let Some(finished) = chains.try_join_next() {
                log_join(finished);
            }
        }

        tracing::debug!(pending = chains.len(), "Event channel closed, draining");
        while let Some(finished) = chains.join_next().await {
            log_join(finished);
        }

        handled
    }
}

/// Run the handler for a single event.
pub async fn dispatch(app: FeedApp, event: UiEvent) {
    tracing::debug!(?event, "Dispatching event");

    match event {
        UiEvent::Ready | UiEvent::Reload => {
            let outcome = app.load_papers().await;
            tracing::debug!(?outcome, "Load finished");
        }
        UiEvent::SubmitSaveForm { paper_id } => {
            // Outcome has already been alerted.
            let _ = app.submit_save_form(&paper_id).await;
        }
        UiEvent::Click { generation, index } => {
            let _ = app.click(generation, index).await;
        }
    }
}

fn log_join(result: Result<(), tokio::task::JoinError>) {
    if let Err(e) = result {
        tracing::error!(error = %e, "Event handler panicked");
    }
}
