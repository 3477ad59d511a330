use anyhow::Result;
use tokio::sync::mpsc;

use super::charts;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::ChatReply;
use crate::domain::models::ChatTurn;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::infrastructure::transports::TransportManager;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /save (/s) [TITLE?] - Saves the last chart as a dashboard, with an optional title.
- /dashboards (/d) - Lists your saved dashboards.
- /clear - Clears the conversation and its saved history.
- /quit /exit (/q) - Exit Alfred.
- /help (/h) - Provides this help menu.

Anything else you type is sent to the assistant. While a reply is in
flight, input is paused until the turn completes.
        "#;

    return text.trim().to_string();
}

fn build_turn(reply: ChatReply) -> ChatTurn {
    let text = reply.message_text();
    let mut chart = None;

    if let ChatReply::Structured(payload) = reply {
        if let Some(chart_payload) = payload.chart {
            match charts::normalize(chart_payload) {
                Ok(spec) => chart = Some(spec),
                Err(err) => {
                    tracing::warn!(err = ?err, "Dropping malformed chart payload");
                }
            }
        }
    }

    return ChatTurn {
        message: Message::new(Author::Assistant, &text),
        chart,
    };
}

fn error_turn(err: &anyhow::Error) -> ChatTurn {
    return ChatTurn {
        message: Message::new_with_type(Author::Assistant, MessageType::Error, &err.to_string()),
        chart: None,
    };
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        transports: TransportManager,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        loop {
            let action = rx.recv().await;
            if action.is_none() {
                // The sender is gone, the conversation is over.
                return Ok(());
            }

            match action.unwrap() {
                Action::ChatRequest(request) => {
                    let turn = match transports.send(&request).await {
                        Ok(reply) => build_turn(reply),
                        Err(err) => {
                            tracing::error!(err = ?err, "Every transport failed for chat request");
                            error_turn(&err)
                        }
                    };

                    tx.send(Event::ChatTurn(turn))?;
                }
            }
        }
    }
}
