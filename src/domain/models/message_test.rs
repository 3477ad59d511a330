use super::Author;
use super::Message;
use super::MessageType;

#[test]
fn it_executes_new() {
    let msg = Message::new(Author::Assistant, "Hi there!");
    assert_eq!(msg.author, Author::Assistant);
    assert_eq!(msg.author.to_string(), "Alfred");
    assert_eq!(msg.text, "Hi there!".to_string());
    assert_eq!(msg.mtype, MessageType::Normal);
    assert!(msg.chart_id.is_none());
}

#[test]
fn it_executes_new_with_type() {
    let msg = Message::new_with_type(Author::Assistant, MessageType::Error, "It broke!");
    assert_eq!(msg.author, Author::Assistant);
    assert_eq!(msg.text, "It broke!".to_string());
    assert_eq!(msg.mtype, MessageType::Error);
}

#[test]
fn it_executes_message_type() {
    let msg = Message::new_with_type(Author::Assistant, MessageType::Error, "It broke!");
    assert_eq!(msg.message_type(), MessageType::Error);
}

#[test]
fn it_executes_attach_chart() {
    let mut msg = Message::new(Author::Assistant, "Here is your chart.");
    msg.attach_chart("dashboard-51a0b105-93d0");
    assert_eq!(msg.chart_id, Some("dashboard-51a0b105-93d0".to_string()));
}

#[test]
fn it_serializes_roles_as_lowercase() {
    let user = serde_json::to_string(&Message::new(Author::User, "Hello")).unwrap();
    let assistant = serde_json::to_string(&Message::new(Author::Assistant, "Hi")).unwrap();

    assert!(user.contains("\"author\":\"user\""));
    assert!(assistant.contains("\"author\":\"assistant\""));
}

#[test]
fn it_deserializes_history_without_chart_id() {
    let payload = r#"{"author":"assistant","text":"Hi","mtype":"Normal"}"#;
    let msg: Message = serde_json::from_str(payload).unwrap();

    assert_eq!(msg.author, Author::Assistant);
    assert!(msg.chart_id.is_none());
}
