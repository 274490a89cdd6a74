use serde::Deserialize;
use crate::structs::ai::chat_message::ChatMessage;

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}
