//! Page state shared by the generate and download handlers.
//!
//! Both handlers read and write the displayed text through [`PageState`]
//! instead of reaching into widgets, so the rules below can be tested
//! without a window.

use serde::{Deserialize, Serialize};

use crate::client::GenerateResult;
use crate::download::DownloadFile;

/// Shown in the commented-code region whenever a request fails.
pub const GENERATE_FAILED_MESSAGE: &str = "An error occurred while generating comments.";

/// Sequence number handed out for one generate click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn number(self) -> u64 {
        self.0
    }
}

/// Everything needed to dispatch one generate request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateTicket {
    pub ticket: Ticket,
    pub code: String,
}

/// What [`PageState::apply_outcome`] did with a resolved request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Success,
    Failure,
    /// A newer request already wrote its result.
    Stale,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageState {
    pub code_input: String,
    #[serde(skip)]
    code_output: String,
    #[serde(skip)]
    doc_output: String,
    #[serde(skip)]
    download_visible: bool,
    #[serde(skip)]
    issued: u64,
    #[serde(skip)]
    applied: u64,
    #[serde(skip)]
    in_flight: usize,
}

impl PageState {
    pub fn code_output(&self) -> &str {
        &self.code_output
    }

    pub fn doc_output(&self) -> &str {
        &self.doc_output
    }

    pub fn download_visible(&self) -> bool {
        self.download_visible
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Snapshot the input for a new request and hand out its ticket.
    ///
    /// The input is copied verbatim. Earlier requests stay in flight.
    pub fn begin_generate(&mut self) -> GenerateTicket {
        self.issued += 1;
        self.in_flight += 1;
        GenerateTicket {
            ticket: Ticket(self.issued),
            code: self.code_input.clone(),
        }
    }

    /// Write a resolved request into the page.
    ///
    /// Outcomes older than the newest one already applied are dropped so a
    /// slow response can never overwrite a faster, newer one.
    pub fn apply_outcome(&mut self, ticket: Ticket, outcome: GenerateResult) -> Applied {
        self.in_flight = self.in_flight.saturating_sub(1);

        if ticket.0 <= self.applied {
            log::debug!(
                "Discarding outcome of request #{} (request #{} already shown)",
                ticket.0,
                self.applied
            );
            return Applied::Stale;
        }
        self.applied = ticket.0;

        match outcome {
            Ok(response) => {
                self.code_output = response.commented_code;
                self.doc_output = response.documentation;
                if !self.doc_output.is_empty() {
                    self.download_visible = true;
                }
                Applied::Success
            }
            Err(err) => {
                log::error!("Generating comments failed (request #{}): {}", ticket.0, err);
                self.code_output = GENERATE_FAILED_MESSAGE.to_owned();
                Applied::Failure
            }
        }
    }

    /// File holding exactly the documentation currently on screen.
    pub fn documentation_file(&self) -> DownloadFile {
        DownloadFile::documentation(&self.doc_output)
    }

    /// File holding exactly the commented code currently on screen.
    pub fn commented_code_file(&self) -> DownloadFile {
        DownloadFile::commented_code(&self.code_output)
    }
}
