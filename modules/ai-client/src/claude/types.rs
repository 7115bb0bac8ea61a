use serde::{Deserialize, Serialize};

// =============================================================================
// Messages
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Role {
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct WireMessage {
    pub role: Role,
    pub content: String,
}

impl WireMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

// =============================================================================
// Tool Specification
// =============================================================================

/// Server-side tool enabled for a request. The only tool this client asks
/// for is the provider-hosted web search; it runs on the server and its
/// results come back as extra content blocks.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ToolSpec {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub name: String,
}

impl ToolSpec {
    pub fn web_search() -> Self {
        Self {
            tool_type: "web_search_20250305".to_string(),
            name: "web_search".to_string(),
        }
    }
}

// =============================================================================
// Chat Request
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolSpec>>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens: 4096,
            messages: Vec::new(),
            tools: None,
        }
    }

    pub fn message(mut self, message: WireMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn tool(mut self, tool: ToolSpec) -> Self {
        self.tools.get_or_insert_with(Vec::new).push(tool);
        self
    }
}

// =============================================================================
// Chat Response
// =============================================================================

/// Response content block. Search-enabled requests interleave `text` blocks
/// with server tool blocks (`server_tool_use`, `web_search_tool_result`);
/// only the text blocks carry generated prose, the rest are skipped.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub(crate) enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatResponse {
    pub content: Vec<ContentBlock>,
}

impl ChatResponse {
    /// Concatenate all text blocks in order.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_text_concatenates_blocks_in_order() {
        let json = r#"{
            "content": [
                {"type": "server_tool_use", "id": "tu_1", "name": "web_search", "input": {"query": "UAE investors"}},
                {"type": "web_search_tool_result", "tool_use_id": "tu_1", "content": []},
                {"type": "text", "text": "Based on the search, "},
                {"type": "text", "text": "here are the investors."}
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), "Based on the search, here are the investors.");
    }

    #[test]
    fn response_with_only_tool_blocks_has_empty_text() {
        let json = r#"{"content": [{"type": "server_tool_use", "id": "tu_1", "name": "web_search", "input": {}}]}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), "");
    }

    #[test]
    fn request_with_web_search_tool_serializes_wire_shape() {
        let request = ChatRequest::new("claude-sonnet-4-20250514")
            .message(WireMessage::user("find investors"))
            .max_tokens(4000)
            .tool(ToolSpec::web_search());
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["max_tokens"], 4000);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["tools"][0]["type"], "web_search_20250305");
        assert_eq!(value["tools"][0]["name"], "web_search");
    }

    #[test]
    fn request_without_tools_omits_the_field() {
        let request = ChatRequest::new("claude-sonnet-4-20250514")
            .message(WireMessage::user("hello"));
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tools").is_none());
    }
}
