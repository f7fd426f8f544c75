//! The view side of a page: named regions, form inputs, alerts, navigation.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Login,
    MemberDashboard,
    AdminDashboard,
}

impl Destination {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "login.html",
            Self::MemberDashboard => "member-dashboard.html",
            Self::AdminDashboard => "admin-dashboard.html",
        }
    }
}

/// Bindable regions, each addressed by a stable element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    MessageArea,
    ContentGrid,
    UpcomingEvents,
    RecommendedEvents,
    UnreadMessages,
    Courses,
    RegisteredEvents,
    PastEvents,
    ConversationList,
    ChatWith,
    ChatBox,
    ActiveMembers,
    SignupsThisMonth,
    EventsThisMonth,
    MemberList,
}

impl Region {
    #[must_use]
    pub fn dom_id(self) -> &'static str {
        match self {
            Self::MessageArea => "messageArea",
            Self::ContentGrid => "contentGrid",
            Self::UpcomingEvents => "upcomingEvents",
            Self::RecommendedEvents => "recommendedEvents",
            Self::UnreadMessages => "unreadMessages",
            Self::Courses => "courses",
            Self::RegisteredEvents => "registeredEvents",
            Self::PastEvents => "pastEvents",
            Self::ConversationList => "conversationList",
            Self::ChatWith => "chatWith",
            Self::ChatBox => "chatBox",
            Self::ActiveMembers => "activeMembers",
            Self::SignupsThisMonth => "signupsThisMonth",
            Self::EventsThisMonth => "eventsThisMonth",
            Self::MemberList => "memberList",
        }
    }

    /// Index of the `.card` element this region occupied in the older
    /// positional templates. Only consulted when no element carries the id.
    #[must_use]
    pub fn legacy_card_slot(self) -> Option<usize> {
        match self {
            Self::UpcomingEvents => Some(0),
            Self::RecommendedEvents | Self::RegisteredEvents => Some(1),
            Self::UnreadMessages | Self::PastEvents => Some(2),
            Self::Courses => Some(3),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    Email,
    Password,
    Name,
    Message,
}

impl Input {
    #[must_use]
    pub fn dom_id(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::Name => "name",
            Self::Message => "messageInput",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentCard {
    pub heading: String,
    pub description: String,
    pub action_label: &'static str,
    /// Alert shown when the action button is pressed.
    pub action_alert: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub speaker: String,
    pub text: String,
}

impl TranscriptLine {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn display(&self) -> String {
        format!("{}: {}", self.speaker, self.text)
    }
}

/// Everything a page controller may do to its view.
///
/// List and card updates replace the region's children entirely.
pub trait PageSurface {
    fn alert(&mut self, message: &str);
    fn navigate(&mut self, destination: Destination);
    fn set_text(&mut self, region: Region, text: &str);
    fn replace_list(&mut self, region: Region, items: &[String]);
    fn replace_cards(&mut self, region: Region, cards: &[ContentCard]);
    fn replace_transcript(&mut self, lines: &[TranscriptLine]);
    fn append_transcript(&mut self, line: &TranscriptLine);
    fn read_input(&self, input: Input) -> String;
    fn clear_input(&mut self, input: Input);
}
