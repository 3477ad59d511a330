use super::ChartSpec;
use super::Message;

/// One completed conversation turn. The chart rides alongside the message
/// until the user promotes it to a dashboard.
pub struct ChatTurn {
    pub message: Message,
    pub chart: Option<ChartSpec>,
}

pub enum Event {
    ChatTurn(ChatTurn),
}
