use std::io::Write;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::ChartSpec;
use crate::domain::models::ChatRequest;
use crate::domain::models::Dashboard;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::SlashCommand;
use crate::domain::services::actions::help_text;
use crate::domain::services::formatter;
use crate::domain::services::formatter::Segment;
use crate::domain::services::formatter::Span;
use crate::domain::services::DashboardStore;
use crate::domain::services::HistoryStore;
use crate::domain::services::Storage;
use crate::domain::services::StorageKey;
use crate::infrastructure::api::auth::AuthClient;

fn prompt_marker() {
    print!("\n{} ", Paint::cyan(">"));
    let _ = std::io::stdout().flush();
}

fn render_message(message: &Message) {
    println!("\n{}", Paint::magenta(message.author.to_string()).bold());

    if message.message_type() == MessageType::Error {
        println!("{}", Paint::red(&message.text));
        return;
    }

    for segment in formatter::segments(&message.text) {
        match segment {
            Segment::Paragraph(spans) => {
                let mut line = String::new();
                for span in spans {
                    match span {
                        Span::Text(text) => line += &text,
                        Span::Bold(text) => line += &Paint::new(text).bold().to_string(),
                        Span::Break => line += "\n",
                    }
                }
                println!("{line}");
            }
            Segment::Code { language, body } => {
                let tag = if language.is_empty() {
                    "code".to_string()
                } else {
                    language
                };
                println!("{}", Paint::new(format!("--- {tag} ---")).dimmed());
                println!("{body}");
                println!("{}", Paint::new("---").dimmed());
            }
        }
    }
}

/// Checks any stored session against the API before chatting. An invalid
/// token is cleared rather than surfaced as an error.
async fn verify_session() -> Result<()> {
    let storage = Storage::default();
    let token: Option<String> = storage.read(StorageKey::AuthToken).await?;
    if token.is_none() {
        return Ok(());
    }

    let client = AuthClient::new(&Config::get(ConfigKey::ApiUrl), token);
    match client.session().await {
        Ok(user) => println!("Logged in as {name}.", name = user.name),
        Err(err) => {
            tracing::warn!(err = ?err, "Stored session is no longer valid");
            storage.remove(StorageKey::AuthToken).await?;
            println!("Your stored session expired. Run `alfred login` to sign in again.");
        }
    }

    return Ok(());
}

fn print_dashboards(dashboards: &DashboardStore) {
    if dashboards.list().is_empty() {
        println!("There are no saved dashboards yet. Ask for a chart and run /save.");
        return;
    }

    for dashboard in dashboards.list() {
        println!(
            "- (ID: {id}) {title}, saved {created}",
            id = dashboard.id,
            title = dashboard.title,
            created = dashboard.created
        );
    }
}

async fn save_dashboard(
    dashboards: &mut DashboardStore,
    messages: &mut [Message],
    history: &HistoryStore,
    last_chart: &Option<ChartSpec>,
    last_query: &str,
    args: &[String],
) -> Result<()> {
    let chart = match last_chart {
        Some(chart) => chart.clone(),
        None => {
            println!("There is no chart to save yet. Ask for one first.");
            return Ok(());
        }
    };

    let mut title = args.join(" ").trim().to_string();
    if title.is_empty() {
        title = chart
            .title()
            .unwrap_or_else(|| return "Untitled Dashboard".to_string());
    }

    let dashboard = Dashboard::new(&title, chart, last_query);
    let id = dashboards.save(dashboard).await?;

    if let Some(message) = messages
        .iter_mut()
        .rev()
        .find(|e| return e.author == Author::Assistant)
    {
        message.attach_chart(&id);
    }
    history.save(messages).await?;

    println!("Saved dashboard {id} ({title}).");
    return Ok(());
}

pub async fn start(
    action_tx: mpsc::UnboundedSender<Action>,
    mut event_rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let history = HistoryStore::new(Storage::default());
    let mut dashboards = DashboardStore::load(Storage::default()).await?;

    println!(
        "{}",
        Paint::new("Alfred, your restaurant analytics assistant.").bold()
    );
    println!("Type a question, or /help for commands.");

    verify_session().await?;

    let mut messages = history.load().await?;
    for message in messages.iter() {
        render_message(message);
    }

    let mut last_chart: Option<ChartSpec> = None;
    let mut last_query = "".to_string();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt_marker();
        let line = lines.next_line().await?;
        if line.is_none() {
            break;
        }

        let input = line.unwrap().trim().to_string();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = SlashCommand::parse(&input) {
            if command.is_quit() {
                break;
            }
            if command.is_help() {
                println!("{}", help_text());
                continue;
            }
            if command.is_clear() {
                messages.clear();
                history.clear().await?;
                last_chart = None;
                println!("Cleared chat history.");
                continue;
            }
            if command.is_dashboards() {
                print_dashboards(&dashboards);
                continue;
            }
            if command.is_save() {
                save_dashboard(
                    &mut dashboards,
                    &mut messages,
                    &history,
                    &last_chart,
                    &last_query,
                    &command.args,
                )
                .await?;
                continue;
            }
        }

        messages.push(Message::new(Author::User, &input));
        history.save(&messages).await?;
        last_query = input.to_string();

        action_tx.send(Action::ChatRequest(ChatRequest::new(&input)))?;
        println!("{}", Paint::new("Thinking...").dimmed());

        // One turn at a time: no further input is read until the reply, or
        // the error standing in for it, has landed.
        let event = event_rx.recv().await;
        if event.is_none() {
            break;
        }

        match event.unwrap() {
            Event::ChatTurn(turn) => {
                render_message(&turn.message);
                if let Some(chart) = turn.chart {
                    println!(
                        "{}",
                        Paint::new("A chart is ready. Run /save [title] to keep it as a dashboard.")
                            .dimmed()
                    );
                    last_chart = Some(chart);
                }
                messages.push(turn.message);
                history.save(&messages).await?;
            }
        }
    }

    return Ok(());
}
