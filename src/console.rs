//! Console front-end
//!
//! Line commands standing in for pointer gestures:
//!
//! ```text
//! drag <card> <category|outside>   drag a card and drop it
//! open <card>                      click a card
//! add                              open the "add new dish" form
//! couple|dish|diet <text>          fill a form field
//! category <id>                    choose the form's category
//! save | cancel                    submit or close the form
//! retry | refresh | dismiss        health check, fetch, close notice
//! show | help | quit
//! ```
//!
//! Cards are addressed by any unique prefix of their id.

use std::str::FromStr;
use thiserror::Error;

use crate::board::ModalField;
use crate::session::{BoardSession, SessionError};

pub const HELP: &str = "\
Commands:
  drag <card> <category>   move a card (or `outside` to drop nowhere)
  open <card>              pick a dish for a couple, or edit a card
  add                      add a new dish by hand
  couple <text>            set the form's couple name
  dish <text>              set the form's dish name
  diet <text>              set the form's dietary note
  category <id>            choose the form's category
  save | cancel            submit or close the form
  retry                    check the backend again
  refresh                  reload categories now
  dismiss                  close the error notice
  show | help | quit";

/// Console failures
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Type a command, or `help`")]
    Empty,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("No card matches `{0}`")]
    UnknownCard(String),

    #[error("`{0}` matches more than one card")]
    AmbiguousCard(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// A parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `target` is `None` for a drop outside every category
    Drag { card: String, target: Option<String> },
    Open(String),
    Add,
    Set(ModalField, String),
    Category(String),
    Save,
    Cancel,
    Retry,
    Refresh,
    Dismiss,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ConsoleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Err(ConsoleError::Empty),
            "drag" | "d" => {
                let mut args = rest.split_whitespace();
                let card = args.next().ok_or(ConsoleError::MissingArgument {
                    command: "drag",
                    argument: "a card",
                })?;
                let target = args.next().ok_or(ConsoleError::MissingArgument {
                    command: "drag",
                    argument: "a category",
                })?;
                Command::Drag {
                    card: card.to_string(),
                    target: match target {
                        "outside" | "-" => None,
                        id => Some(id.to_string()),
                    },
                }
            }
            "open" | "o" => Command::Open(required(rest, "open", "a card")?),
            "add" => Command::Add,
            "couple" => Command::Set(ModalField::Couple, rest.to_string()),
            "dish" => Command::Set(ModalField::Dish, rest.to_string()),
            "diet" | "dietary" => Command::Set(ModalField::Dietary, rest.to_string()),
            "category" | "cat" => Command::Category(required(rest, "category", "a category id")?),
            "save" => Command::Save,
            "cancel" => Command::Cancel,
            "retry" => Command::Retry,
            "refresh" => Command::Refresh,
            "dismiss" | "ok" => Command::Dismiss,
            "show" | "ls" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(ConsoleError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

fn required(
    rest: &str,
    command: &'static str,
    argument: &'static str,
) -> Result<String, ConsoleError> {
    if rest.is_empty() {
        Err(ConsoleError::MissingArgument { command, argument })
    } else {
        Ok(rest.to_string())
    }
}

/// What the console should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Redraw the board
    Redraw,
    /// Redraw, then print this line
    Message(String),
    Help,
    Quit,
}

/// Runs console commands against a session
pub struct Console {
    session: BoardSession,
}

impl Console {
    pub fn new(session: BoardSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &BoardSession {
        &self.session
    }

    /// Full card id for an exact id or unique id prefix
    pub fn resolve_card(&self, handle: &str) -> Result<String, ConsoleError> {
        let board = self.session.snapshot();
        let ids: Vec<&str> = self
            .session
            .placeholders()
            .iter()
            .chain(board.categories().iter().flat_map(|c| c.cards.iter()))
            .map(|card| card.id.as_str())
            .collect();

        if let Some(id) = ids.iter().find(|id| **id == handle) {
            return Ok(id.to_string());
        }

        let mut matches = ids.iter().filter(|id| id.starts_with(handle));
        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(id.to_string()),
            (Some(_), Some(_)) => Err(ConsoleError::AmbiguousCard(handle.to_string())),
            (None, _) => Err(ConsoleError::UnknownCard(handle.to_string())),
        }
    }

    pub async fn execute(&self, command: Command) -> Result<Reply, ConsoleError> {
        tracing::debug!(?command, "Console command");

        let reply = match command {
            Command::Drag { card, target } => {
                let card_id = self.resolve_card(&card)?;
                let payload = self.session.drag_start(&card_id);
                match self.session.drop_card(payload, target.as_deref()).await? {
                    Some(saved) => Reply::Message(format!(
                        "{} is bringing {} to {}",
                        saved.couple_name, saved.dish_name, saved.category_id
                    )),
                    None => Reply::Message("Nothing to do".to_string()),
                }
            }
            Command::Open(card) => {
                let card_id = self.resolve_card(&card)?;
                self.session.activate(&card_id)?;
                Reply::Redraw
            }
            Command::Add => {
                self.session.open_add_dish()?;
                Reply::Redraw
            }
            Command::Set(field, value) => {
                self.session.set_modal_field(field, &value)?;
                Reply::Redraw
            }
            Command::Category(id) => {
                self.session.select_modal_category(&id)?;
                Reply::Redraw
            }
            Command::Save => {
                let saved = self.session.submit_modal().await?;
                Reply::Message(format!("Saved {}'s {}", saved.couple_name, saved.dish_name))
            }
            Command::Cancel => {
                self.session.cancel_modal();
                Reply::Redraw
            }
            Command::Retry => {
                if self.session.retry().await? {
                    Reply::Redraw
                } else {
                    Reply::Message("Backend still unavailable".to_string())
                }
            }
            Command::Refresh => {
                self.session.refresh().await?;
                Reply::Redraw
            }
            Command::Dismiss => {
                self.session.dismiss_notice();
                Reply::Redraw
            }
            Command::Show => Reply::Redraw,
            Command::Help => Reply::Help,
            Command::Quit => Reply::Quit,
        };
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{Call, MockBackend};
    use crate::board::{NewCard, ValidationError};
    use crate::session::SessionConfig;
    use std::sync::Arc;

    fn parse(line: &str) -> Command {
        line.parse().unwrap()
    }

    async fn console(backend: &Arc<MockBackend>) -> Console {
        let session = BoardSession::new(
            backend.clone(),
            SessionConfig {
                poll_interval: None,
                keep_modal_on_failure: true,
            },
        );
        assert!(session.check_health().await);
        backend.clear_calls();
        Console::new(session)
    }

    async fn seed(backend: &MockBackend, couple: &str) -> String {
        backend
            .store
            .insert_card(NewCard {
                couple_name: couple.to_string(),
                dish_name: "Salsa".to_string(),
                dietary_restrictions: String::new(),
                category_id: "appetizers".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse("drag pre-krass main"),
            Command::Drag {
                card: "pre-krass".into(),
                target: Some("main".into())
            }
        );
        assert_eq!(
            parse("d abc outside"),
            Command::Drag {
                card: "abc".into(),
                target: None
            }
        );
        assert_eq!(
            parse("dish   Seven Layer Dip "),
            Command::Set(ModalField::Dish, "Seven Layer Dip".into())
        );
        assert_eq!(parse("diet"), Command::Set(ModalField::Dietary, String::new()));
        assert_eq!(parse("QUIT"), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<Command>(), Err(ConsoleError::Empty)));
        assert!(matches!(
            "dance".parse::<Command>(),
            Err(ConsoleError::UnknownCommand(_))
        ));
        assert!(matches!(
            "drag pre-krass".parse::<Command>(),
            Err(ConsoleError::MissingArgument { .. })
        ));
        assert!(matches!(
            "open".parse::<Command>(),
            Err(ConsoleError::MissingArgument { .. })
        ));
    }

    #[tokio::test]
    async fn test_resolve_card_prefix() {
        let backend = Arc::new(MockBackend::with_default_categories(3));
        let id = seed(&backend, "Krass").await;
        let console = console(&backend).await;

        assert_eq!(console.resolve_card("pre-jj").unwrap(), "pre-jj");
        assert_eq!(console.resolve_card(&id[..8]).unwrap(), id);
        assert!(matches!(
            console.resolve_card("pre-"),
            Err(ConsoleError::AmbiguousCard(_))
        ));
        assert!(matches!(
            console.resolve_card("zzz"),
            Err(ConsoleError::UnknownCard(_))
        ));
    }

    #[tokio::test]
    async fn test_drag_command() {
        let backend = Arc::new(MockBackend::with_default_categories(3));
        let id = seed(&backend, "Krass").await;
        let console = console(&backend).await;

        let reply = console.execute(parse(&format!("drag {} outside", &id[..8]))).await.unwrap();
        assert_eq!(reply, Reply::Message("Nothing to do".into()));
        assert!(backend.calls().is_empty());

        let reply = console.execute(parse(&format!("drag {} desserts", id))).await.unwrap();
        assert_eq!(reply, Reply::Message("Krass is bringing Salsa to desserts".into()));
        assert_eq!(backend.count(|c| matches!(c, Call::Move { .. })), 1);
    }

    #[tokio::test]
    async fn test_form_commands() {
        let backend = Arc::new(MockBackend::with_default_categories(3));
        let console = console(&backend).await;

        console.execute(parse("open pre-eod")).await.unwrap();
        let err = console.execute(parse("save")).await.unwrap_err();
        assert!(matches!(
            err,
            ConsoleError::Session(SessionError::Validation(ValidationError::MissingCategory))
        ));

        console.execute(parse("category sides")).await.unwrap();
        console.execute(parse("dish Coleslaw")).await.unwrap();
        let reply = console.execute(parse("save")).await.unwrap();

        assert_eq!(reply, Reply::Message("Saved EOD's Coleslaw".into()));
        assert!(console.session().snapshot().modal().is_none());
    }

    #[tokio::test]
    async fn test_quit_and_help() {
        let backend = Arc::new(MockBackend::with_default_categories(3));
        let console = console(&backend).await;

        assert_eq!(console.execute(Command::Help).await.unwrap(), Reply::Help);
        assert_eq!(console.execute(Command::Quit).await.unwrap(), Reply::Quit);
    }

    #[tokio::test]
    async fn test_retry_rejected_while_connected() {
        let backend = Arc::new(MockBackend::with_default_categories(3));
        let console = console(&backend).await;
        console.execute(parse("open pre-eod")).await.unwrap();

        let err = console.execute(Command::Retry).await.unwrap_err();
        assert!(matches!(
            err,
            ConsoleError::Session(SessionError::AlreadyConnected)
        ));
        assert!(console.session().snapshot().modal().is_some());
        assert!(backend.calls().is_empty());
    }
}
