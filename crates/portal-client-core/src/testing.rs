//! In-memory transport, token store, and surface for exercising page
//! controllers without a browser or a backend.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;

use crate::api::{PortalEndpoint, PortalRequest, PortalResponse, PortalTransport, TransportError};
use crate::auth::TokenStore;
use crate::surface::{ContentCard, Destination, Input, PageSurface, Region, TranscriptLine};

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
    read_only: bool,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_string())),
            read_only: false,
        }
    }

    /// A store whose writes fail, for storage-error paths.
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            token: RefCell::new(None),
            read_only: true,
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    type Error = String;

    fn load_token(&self) -> Result<Option<String>, Self::Error> {
        Ok(self.token.borrow().clone())
    }

    fn persist_token(&self, token: &str) -> Result<(), Self::Error> {
        if self.read_only {
            return Err("token store is read-only".to_string());
        }
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) -> Result<(), Self::Error> {
        if self.read_only {
            return Err("token store is read-only".to_string());
        }
        *self.token.borrow_mut() = None;
        Ok(())
    }
}

/// Canned responses per endpoint, served in registration order.
#[derive(Debug, Default)]
pub struct StubTransport {
    responses: RefCell<HashMap<PortalEndpoint, VecDeque<Result<PortalResponse, TransportError>>>>,
    requests: RefCell<Vec<PortalRequest>>,
}

impl StubTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn respond_json(self, endpoint: PortalEndpoint, status: u16, body: serde_json::Value) -> Self {
        self.respond_raw(endpoint, status, &body.to_string())
    }

    #[must_use]
    pub fn respond_raw(self, endpoint: PortalEndpoint, status: u16, body: &str) -> Self {
        self.push(endpoint, Ok(PortalResponse::new(status, body)));
        self
    }

    #[must_use]
    pub fn fail(self, endpoint: PortalEndpoint, message: &str) -> Self {
        self.push(endpoint, Err(TransportError::new(message)));
        self
    }

    #[must_use]
    pub fn requests(&self) -> Vec<PortalRequest> {
        self.requests.borrow().clone()
    }

    fn push(&self, endpoint: PortalEndpoint, response: Result<PortalResponse, TransportError>) {
        self.responses
            .borrow_mut()
            .entry(endpoint)
            .or_default()
            .push_back(response);
    }
}

#[async_trait(?Send)]
impl PortalTransport for StubTransport {
    async fn execute(&self, request: PortalRequest) -> Result<PortalResponse, TransportError> {
        let endpoint = request.endpoint;
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(TransportError::new(format!(
                    "no stub response for {} {}",
                    endpoint.method().as_str(),
                    endpoint.path()
                )))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    Alert(String),
    Navigate(Destination),
    SetText(Region, String),
    ReplaceList(Region, Vec<String>),
    ReplaceCards(Region, Vec<ContentCard>),
    ReplaceTranscript(Vec<TranscriptLine>),
    AppendTranscript(TranscriptLine),
    ClearInput(Input),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    inputs: HashMap<Input, String>,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    #[must_use]
    pub fn with_input(mut self, input: Input, value: &str) -> Self {
        self.inputs.insert(input, value.to_string());
        self
    }

    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Alert(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn navigations(&self) -> Vec<Destination> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Navigate(destination) => Some(*destination),
                _ => None,
            })
            .collect()
    }

    /// Latest text written to `region`.
    #[must_use]
    pub fn text(&self, region: Region) -> Option<String> {
        self.ops.iter().rev().find_map(|op| match op {
            SurfaceOp::SetText(target, text) if *target == region => Some(text.clone()),
            _ => None,
        })
    }

    #[must_use]
    pub fn list(&self, region: Region) -> Option<Vec<String>> {
        self.ops.iter().rev().find_map(|op| match op {
            SurfaceOp::ReplaceList(target, items) if *target == region => Some(items.clone()),
            _ => None,
        })
    }

    #[must_use]
    pub fn cards(&self, region: Region) -> Option<Vec<ContentCard>> {
        self.ops.iter().rev().find_map(|op| match op {
            SurfaceOp::ReplaceCards(target, cards) if *target == region => Some(cards.clone()),
            _ => None,
        })
    }

    /// Transcript as currently shown, folding replaces and appends.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptLine> {
        let mut lines = Vec::new();
        for op in &self.ops {
            match op {
                SurfaceOp::ReplaceTranscript(replacement) => lines.clone_from(replacement),
                SurfaceOp::AppendTranscript(line) => lines.push(line.clone()),
                _ => {}
            }
        }
        lines
    }
}

impl PageSurface for RecordingSurface {
    fn alert(&mut self, message: &str) {
        self.ops.push(SurfaceOp::Alert(message.to_string()));
    }

    fn navigate(&mut self, destination: Destination) {
        self.ops.push(SurfaceOp::Navigate(destination));
    }

    fn set_text(&mut self, region: Region, text: &str) {
        self.ops.push(SurfaceOp::SetText(region, text.to_string()));
    }

    fn replace_list(&mut self, region: Region, items: &[String]) {
        self.ops.push(SurfaceOp::ReplaceList(region, items.to_vec()));
    }

    fn replace_cards(&mut self, region: Region, cards: &[ContentCard]) {
        self.ops.push(SurfaceOp::ReplaceCards(region, cards.to_vec()));
    }

    fn replace_transcript(&mut self, lines: &[TranscriptLine]) {
        self.ops.push(SurfaceOp::ReplaceTranscript(lines.to_vec()));
    }

    fn append_transcript(&mut self, line: &TranscriptLine) {
        self.ops.push(SurfaceOp::AppendTranscript(line.clone()));
    }

    fn read_input(&self, input: Input) -> String {
        self.inputs.get(&input).cloned().unwrap_or_default()
    }

    fn clear_input(&mut self, input: Input) {
        self.inputs.insert(input, String::new());
        self.ops.push(SurfaceOp::ClearInput(input));
    }
}
