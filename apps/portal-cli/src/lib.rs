//! `portal` command line client. Each subcommand drives the same page
//! controller the browser shell uses, rendering onto the terminal.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use portal_client_core::models::Identity;
use portal_client_core::pages::{
    ChatView, LoginOutcome, SendOutcome, SignupOutcome, load_admin_page, load_content_page,
    load_dashboard_page, load_events_page, load_messages_page, logout, submit_login,
    submit_signup,
};
use portal_client_core::{
    Input, PageMessages, PageSurface, PortalEndpoint, PortalSession, PortalTransport, Region,
    TokenStore, report_page_failure,
};
use portal_http_client::{FileTokenStore, HttpTransport, HttpTransportConfig};
use tracing::debug;

pub mod config;
pub mod terminal;

pub use config::{Config, ConfigError, ConfigOverrides};
pub use terminal::TerminalSurface;

const PROFILE_PAGE: PageMessages = PageMessages {
    login_required: "You must be logged in to view this page.",
    action_failed: "Unable to load your profile.",
};

const LOGGED_OUT: &str = "Logged out.";
const NOTHING_TO_SEND: &str = "Nothing to send: --text is blank.";

#[derive(Debug, Parser)]
#[command(name = "portal")]
#[command(about = "Membership portal command line client")]
pub struct PortalCli {
    /// Backend origin, overrides PORTAL_API_BASE_URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Token file, overrides PORTAL_TOKEN_PATH
    #[arg(long, global = true)]
    pub token_path: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in and store the session token
    Login(LoginArgs),
    /// Create a member account
    Signup(SignupArgs),
    /// Show the signed-in identity
    Whoami,
    /// List the content library
    Content,
    /// Member dashboard summary
    Dashboard,
    /// Upcoming, registered, and past events
    Events,
    /// Admin statistics and member list
    Admin,
    /// Conversations and sending messages
    Messages(MessagesArgs),
    /// Forget the stored session token
    Logout,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct MessagesArgs {
    #[command(subcommand)]
    pub command: MessagesCommand,
}

#[derive(Debug, Subcommand)]
pub enum MessagesCommand {
    /// List conversation partners
    List,
    /// Send a message to a conversation partner
    Send {
        #[arg(long)]
        to: String,
        #[arg(long)]
        text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Succeeded,
    Failed,
}

impl CommandStatus {
    fn from_success(success: bool) -> Self {
        if success { Self::Succeeded } else { Self::Failed }
    }
}

impl From<CommandStatus> for ExitCode {
    fn from(status: CommandStatus) -> Self {
        match status {
            CommandStatus::Succeeded => ExitCode::SUCCESS,
            CommandStatus::Failed => ExitCode::FAILURE,
        }
    }
}

pub fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn run<W: Write>(
    command: Commands,
    config: &Config,
    out: W,
) -> anyhow::Result<CommandStatus> {
    let transport = HttpTransport::new(HttpTransportConfig {
        base_url: config.base_url.clone(),
        timeout_ms: config.request_timeout_ms,
    })
    .context("failed to build portal transport")?;
    let store = FileTokenStore::new(config.token_path.clone());
    debug!(
        base_url = transport.base_url(),
        token_path = %store.path().display(),
        "portal cli configured"
    );
    run_with(command, &transport, &store, out).await
}

pub async fn run_with<T, S, W>(
    command: Commands,
    transport: &T,
    store: &S,
    out: W,
) -> anyhow::Result<CommandStatus>
where
    T: PortalTransport + ?Sized,
    S: TokenStore + ?Sized,
    W: Write,
{
    let mut surface = TerminalSurface::new(out);
    let success = match command {
        Commands::Login(args) => {
            surface = surface
                .with_input(Input::Email, args.email)
                .with_input(Input::Password, args.password);
            matches!(
                submit_login(transport, store, &mut surface).await,
                LoginOutcome::Redirected { .. }
            )
        }
        Commands::Signup(args) => {
            surface = surface
                .with_input(Input::Name, args.name)
                .with_input(Input::Email, args.email)
                .with_input(Input::Password, args.password);
            submit_signup(transport, &mut surface).await == SignupOutcome::Created
        }
        Commands::Whoami => show_identity(transport, store, &mut surface).await,
        Commands::Content => load_content_page(transport, store, &mut surface)
            .await
            .is_ok(),
        Commands::Dashboard => load_dashboard_page(transport, store, &mut surface)
            .await
            .is_ok(),
        Commands::Events => load_events_page(transport, store, &mut surface)
            .await
            .is_ok(),
        Commands::Admin => load_admin_page(transport, store, &mut surface)
            .await
            .is_ok(),
        Commands::Messages(MessagesArgs {
            command: MessagesCommand::List,
        }) => load_messages_page(transport, store, &mut surface)
            .await
            .is_ok(),
        Commands::Messages(MessagesArgs {
            command: MessagesCommand::Send { to, text },
        }) => {
            let mut view = ChatView::default();
            view.select_conversation(&to, &mut surface);
            surface = surface.with_input(Input::Message, text);
            match view.send_message(transport, store, &mut surface).await {
                SendOutcome::Sent => true,
                SendOutcome::Skipped => {
                    surface.set_text(Region::MessageArea, NOTHING_TO_SEND);
                    false
                }
                SendOutcome::Failed => false,
            }
        }
        Commands::Logout => {
            logout(store)?;
            surface.set_text(Region::MessageArea, LOGGED_OUT);
            true
        }
    };
    surface.finish().context("failed to write output")?;
    Ok(CommandStatus::from_success(success))
}

async fn show_identity<T, S, V>(transport: &T, store: &S, surface: &mut V) -> bool
where
    T: PortalTransport + ?Sized,
    S: TokenStore + ?Sized,
    V: PageSurface + ?Sized,
{
    let result = match PortalSession::open(transport, store) {
        Ok(session) => session.get_json::<Identity>(PortalEndpoint::Me).await,
        Err(error) => Err(error),
    };
    match result {
        Ok(identity) => {
            for line in identity_lines(&identity) {
                surface.set_text(Region::MessageArea, &line);
            }
            true
        }
        Err(error) => {
            report_page_failure(surface, &error, &PROFILE_PAGE);
            false
        }
    }
}

fn identity_lines(identity: &Identity) -> Vec<String> {
    let role = if identity.is_admin { "admin" } else { "member" };
    let mut lines = vec![
        format!("name: {}", identity.name.as_deref().unwrap_or("-")),
        format!("email: {}", identity.email.as_deref().unwrap_or("-")),
        format!("role: {role}"),
    ];
    if let Some(status) = identity.status.as_deref() {
        lines.push(format!("status: {status}"));
    }
    if !identity.registered_events.is_empty() {
        lines.push(format!(
            "registered events: {}",
            identity.registered_events.join(", ")
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use clap::error::ErrorKind;
    use portal_client_core::testing::{MemoryTokenStore, StubTransport};
    use serde_json::json;

    use super::*;

    fn output(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).expect("utf8")
    }

    #[test]
    fn cli_requires_subcommand() {
        let err = match PortalCli::try_parse_from(["portal"]) {
            Ok(_) => panic!("expected missing subcommand parse error"),
            Err(err) => err,
        };
        assert_eq!(
            err.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }

    #[test]
    fn cli_rejects_unknown_subcommand() {
        let err = match PortalCli::try_parse_from(["portal", "unknown-subcommand"]) {
            Ok(_) => panic!("expected invalid subcommand parse error"),
            Err(err) => err,
        };
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = PortalCli::try_parse_from([
            "portal",
            "events",
            "--base-url",
            "http://10.0.0.2:9000",
            "--token-path",
            "/tmp/portal-token",
        ])
        .expect("parse");
        assert!(matches!(cli.command, Commands::Events));
        assert_eq!(cli.base_url.as_deref(), Some("http://10.0.0.2:9000"));
        assert_eq!(cli.token_path, Some(PathBuf::from("/tmp/portal-token")));
    }

    #[test]
    fn messages_send_requires_partner_and_text() {
        let cli = PortalCli::try_parse_from([
            "portal", "messages", "send", "--to", "ada@example.org", "--text", "hi",
        ])
        .expect("parse");
        assert!(matches!(
            cli.command,
            Commands::Messages(MessagesArgs {
                command: MessagesCommand::Send { ref to, ref text }
            }) if to == "ada@example.org" && text == "hi"
        ));

        let err = PortalCli::try_parse_from(["portal", "messages", "send", "--text", "hi"])
            .expect_err("missing --to");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[tokio::test]
    async fn login_without_password_fails_locally() {
        let transport = StubTransport::new();
        let store = MemoryTokenStore::default();
        let mut out = Vec::new();

        let status = run_with(
            Commands::Login(LoginArgs {
                email: "a@b.com".to_string(),
                password: String::new(),
            }),
            &transport,
            &store,
            &mut out,
        )
        .await
        .expect("run");

        assert_eq!(status, CommandStatus::Failed);
        assert!(transport.requests().is_empty());
        assert_eq!(output(out), "Please enter both email and password.\n");
    }

    #[tokio::test]
    async fn guarded_command_without_session_points_to_login() {
        let transport = StubTransport::new();
        let store = MemoryTokenStore::default();
        let mut out = Vec::new();

        let status = run_with(Commands::Content, &transport, &store, &mut out)
            .await
            .expect("run");

        assert_eq!(status, CommandStatus::Failed);
        let output = output(out);
        assert!(output.starts_with("! Please login to view content.\n"));
        assert!(output.contains("portal login"));
    }

    #[tokio::test]
    async fn whoami_prints_identity() {
        let transport = StubTransport::new().respond_json(
            PortalEndpoint::Me,
            200,
            json!({
                "email": "ada@example.org",
                "name": "Ada",
                "is_admin": false,
                "status": "Active",
                "registered_events": ["Open Studio"]
            }),
        );
        let store = MemoryTokenStore::with_token("t1");
        let mut out = Vec::new();

        let status = run_with(Commands::Whoami, &transport, &store, &mut out)
            .await
            .expect("run");

        assert_eq!(status, CommandStatus::Succeeded);
        assert_eq!(
            output(out),
            "name: Ada\nemail: ada@example.org\nrole: member\nstatus: Active\nregistered events: Open Studio\n"
        );
    }

    #[tokio::test]
    async fn blank_message_text_explains_why_nothing_was_sent() {
        let transport = StubTransport::new();
        let store = MemoryTokenStore::with_token("t1");
        let mut out = Vec::new();

        let status = run_with(
            Commands::Messages(MessagesArgs {
                command: MessagesCommand::Send {
                    to: "ada@example.org".to_string(),
                    text: "   ".to_string(),
                },
            }),
            &transport,
            &store,
            &mut out,
        )
        .await
        .expect("run");

        assert_eq!(status, CommandStatus::Failed);
        assert!(transport.requests().is_empty());
        assert!(output(out).ends_with("Nothing to send: --text is blank.\n"));
    }

    #[tokio::test]
    async fn logout_clears_store() {
        let transport = StubTransport::new();
        let store = MemoryTokenStore::with_token("t1");
        let mut out = Vec::new();

        let status = run_with(Commands::Logout, &transport, &store, &mut out)
            .await
            .expect("run");

        assert_eq!(status, CommandStatus::Succeeded);
        assert_eq!(store.token(), None);
        assert!(transport.requests().is_empty());
        assert_eq!(output(out), "Logged out.\n");
    }
}
