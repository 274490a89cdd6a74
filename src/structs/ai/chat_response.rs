use serde::Deserialize;
use crate::structs::ai::chat_choice::ChatChoice;

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}
