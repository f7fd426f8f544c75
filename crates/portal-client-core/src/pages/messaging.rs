use tracing::{debug, info};

use crate::api::{PortalEndpoint, PortalTransport};
use crate::auth::TokenStore;
use crate::error::{PageError, PageMessages};
use crate::models::{ConversationList, OutgoingMessage};
use crate::session::{PortalSession, report_page_failure};
use crate::surface::{Input, PageSurface, Region, TranscriptLine};

pub const MESSAGES_PAGE: PageMessages = PageMessages {
    login_required: "You must be logged in to view this page.",
    action_failed: "Unable to load messages.",
};

pub const SEND_MESSAGE: PageMessages = PageMessages {
    login_required: "You must be logged in to view this page.",
    action_failed: "Could not send the message.",
};

const SELF_SPEAKER: &str = "You";

pub async fn load_messages_page<T, S, V>(
    transport: &T,
    store: &S,
    surface: &mut V,
) -> Result<Vec<String>, PageError>
where
    T: PortalTransport + ?Sized,
    S: TokenStore + ?Sized,
    V: PageSurface + ?Sized,
{
    let result = match PortalSession::open(transport, store) {
        Ok(session) => session
            .get_json::<ConversationList>(PortalEndpoint::MemberMessages)
            .await
            .map(|list| list.conversations),
        Err(error) => Err(error),
    };
    match &result {
        Ok(conversations) => {
            debug!(count = conversations.len(), "conversations loaded");
            surface.replace_list(Region::ConversationList, conversations);
        }
        Err(error) => {
            report_page_failure(surface, error, &MESSAGES_PAGE);
        }
    }
    result
}

/// Clears the stored token. No server call; the current view keeps its state.
pub fn logout<S: TokenStore + ?Sized>(store: &S) -> Result<(), PageError> {
    store.clear_token().map_err(PageError::storage)?;
    info!("session token cleared");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Empty input or no partner selected; nothing happened.
    Skipped,
    Sent,
    Failed,
}

/// State of one chat view: the selected partner and what the transcript
/// currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatView {
    partner: Option<String>,
    transcript: Vec<TranscriptLine>,
}

impl ChatView {
    #[must_use]
    pub fn partner(&self) -> Option<&str> {
        self.partner.as_deref()
    }

    #[must_use]
    pub fn transcript(&self) -> &[TranscriptLine] {
        &self.transcript
    }

    /// History is not fetched; the panel shows a fixed greeting exchange.
    pub fn select_conversation<V: PageSurface + ?Sized>(&mut self, name: &str, surface: &mut V) {
        self.partner = Some(name.to_string());
        self.transcript = vec![
            TranscriptLine::new(name, "Hi there!"),
            TranscriptLine::new(SELF_SPEAKER, "Hello! 👋"),
        ];
        surface.set_text(Region::ChatWith, &format!("Chat with {name}"));
        surface.replace_transcript(&self.transcript);
    }

    /// Sends the message input to the selected partner and appends it to the
    /// transcript once the backend accepts it.
    pub async fn send_message<T, S, V>(
        &mut self,
        transport: &T,
        store: &S,
        surface: &mut V,
    ) -> SendOutcome
    where
        T: PortalTransport + ?Sized,
        S: TokenStore + ?Sized,
        V: PageSurface + ?Sized,
    {
        let text = surface.read_input(Input::Message).trim().to_string();
        let Some(partner) = self.partner.clone() else {
            return SendOutcome::Skipped;
        };
        if text.is_empty() {
            return SendOutcome::Skipped;
        }

        let message = OutgoingMessage {
            to: partner,
            text: text.clone(),
        };
        let result = match PortalSession::open(transport, store) {
            Ok(session) => {
                session
                    .post_json(PortalEndpoint::SendMessage, &message)
                    .await
            }
            Err(error) => Err(error),
        };

        match result {
            Ok(()) => {
                let line = TranscriptLine::new(SELF_SPEAKER, text);
                surface.append_transcript(&line);
                self.transcript.push(line);
                surface.clear_input(Input::Message);
                SendOutcome::Sent
            }
            Err(error) => {
                report_page_failure(surface, &error, &SEND_MESSAGE);
                SendOutcome::Failed
            }
        }
    }
}
