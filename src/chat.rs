use std::sync::Arc;

use crate::error::ChatError;
use crate::model::ChatModel;
use crate::web::models::{ChatRequest, ChatResponse, HistoryRole, PromptMessage, Role};

/// Persona prepended to every conversation.
pub const SYSTEM_PROMPT: &str = "\
Tu es un assistant du centre commercial \"Mall of Sousse\".
Tu réponds aux questions sur les magasins, horaires, promotions,
parking et événements du mall.

Règles :
- Réponds en français.
- Réponds en 3 à 6 phrases maximum.
- Si la question n'est pas liée au centre commercial, précise que
  tu es limité au service client du mall.
";

/// Builds the message list sent to the model: the system prompt, then the
/// caller-supplied history in order, then the new user message.
///
/// Rejects a message that is empty after trimming; the message itself is
/// forwarded untrimmed.
pub fn build_prompt_sequence(request: &ChatRequest) -> Result<Vec<PromptMessage>, ChatError> {
    if request.message.trim().is_empty() {
        return Err(ChatError::EmptyMessage);
    }

    let history = request.history.as_deref().unwrap_or(&[]);

    let mut messages = Vec::with_capacity(2 + history.len());
    messages.push(PromptMessage {
        role: Role::System,
        content: SYSTEM_PROMPT.to_string(),
    });

    for msg in history {
        let role = match msg.from_role {
            HistoryRole::User => Role::User,
            HistoryRole::Bot => Role::Assistant,
        };
        messages.push(PromptMessage {
            role,
            content: msg.text.clone(),
        });
    }

    messages.push(PromptMessage {
        role: Role::User,
        content: request.message.clone(),
    });

    Ok(messages)
}

/// The whole service in one struct: validate, assemble the prompt, call the
/// provider once, wrap the reply. No retries, no state across requests.
pub struct ChatGateway {
    model: Arc<dyn ChatModel>,
}

impl ChatGateway {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub async fn handle(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        let messages = build_prompt_sequence(request)?;
        let reply = self.model.generate(&messages).await?;
        Ok(ChatResponse { reply })
    }
}
