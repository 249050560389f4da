//! Per-layer record types.
//!
//! Every record carries the layer's caption, an optional illustrative code
//! snippet and a payload whose shape depends on the layer.

use serde::Serialize;

use crate::layers::LayerId;

/// One layer's worth of illustrative output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerRecord {
    pub layer: LayerId,
    pub title: String,
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    pub data: LayerData,
}

impl LayerRecord {
    /// Build a record; the layer is taken from the payload variant.
    pub fn new(data: LayerData, snippet: Option<String>) -> Self {
        let layer = data.layer();
        Self {
            layer,
            title: layer.title().to_string(),
            caption: layer.caption().to_string(),
            snippet,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerData {
    RawInput(RawInput),
    Tokenization(Tokenization),
    Embedding(Embedding),
    Retrieval(Retrieval),
    ContextInjection(ContextInjection),
    Orchestration(Orchestration),
    Attention(Attention),
    Prediction(Prediction),
    Decoding(Decoding),
    PostProcessing(PostProcessing),
}

impl LayerData {
    pub fn layer(&self) -> LayerId {
        match self {
            LayerData::RawInput(_) => LayerId::RawInput,
            LayerData::Tokenization(_) => LayerId::Tokenization,
            LayerData::Embedding(_) => LayerId::Embedding,
            LayerData::Retrieval(_) => LayerId::SemanticSearch,
            LayerData::ContextInjection(_) => LayerId::ContextInjection,
            LayerData::Orchestration(_) => LayerId::TaskDecomposition,
            LayerData::Attention(_) => LayerId::Attention,
            LayerData::Prediction(_) => LayerId::Prediction,
            LayerData::Decoding(_) => LayerId::Detokenization,
            LayerData::PostProcessing(_) => LayerId::PostProcessing,
        }
    }
}

/// Layer 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawInput {
    pub user_message: String,
    /// RFC 3339 timestamp of when the prompt was received
    pub timestamp: String,
    pub session_id: Option<String>,
}

/// Layer 2.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tokenization {
    pub input_text: String,
    pub token_ids: Vec<u64>,
    pub tokens: Vec<String>,
    pub encoding_method: String,
    pub vocab_size: u32,
}

/// Layer 3.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embedding {
    pub token_ids: Vec<u64>,
    pub embedding_dim: usize,
    pub sample_embedding: Vec<SampleVector>,
    pub explanation: String,
    /// `[token_count, embedding_dim]`
    pub shape: [usize; 2],
}

/// A few leading components of a fabricated embedding vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleVector {
    /// `token_<id>_<token>`
    pub label: String,
    pub values: Vec<f64>,
    /// Components not shown
    pub elided: usize,
}

/// Layer 4.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Retrieval {
    pub query_embedding: String,
    pub search_method: String,
    pub top_k: usize,
    pub retrieved_docs: Vec<RetrievedDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedDoc {
    pub id: String,
    pub similarity: f64,
    pub snippet: String,
}

/// Layer 5.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextInjection {
    pub retrieved_context: Vec<String>,
    pub injected_into_prompt: bool,
    pub source: String,
    pub mcp_structure: McpStructure,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct McpStructure {
    pub user_input: String,
    pub system_state: String,
    pub memory_objects: Vec<String>,
    pub tool_use: Option<String>,
    pub context_graph: String,
}

/// Layer 6.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Orchestration {
    pub orchestrator: String,
    pub steps: Vec<String>,
    pub chain_type: String,
}

/// Layer 7.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attention {
    pub mechanism: String,
    pub num_heads: u32,
    pub num_layers: u32,
    pub context_window: u32,
    pub attention_pattern: String,
    pub explanation: String,
}

/// Layer 8.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub vocab_size: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub sample_tokens: Vec<TokenCandidate>,
    pub selected_tokens: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenCandidate {
    pub token: String,
    pub logit: f64,
    pub probability: f64,
}

/// Layer 9.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decoding {
    pub token_ids: Vec<u64>,
    pub decoded_text: String,
    pub decoding_method: String,
}

/// Layer 10.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostProcessing {
    pub raw_output: String,
    pub formatted_output: String,
    pub formatting_rules: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_takes_layer_from_payload() {
        let record = LayerRecord::new(
            LayerData::Orchestration(Orchestration {
                orchestrator: "LangChain".into(),
                steps: vec![],
                chain_type: "SequentialChain".into(),
            }),
            None,
        );
        assert_eq!(record.layer, LayerId::TaskDecomposition);
        assert_eq!(record.title, "Task Decomposition (LangChain)");
        assert_eq!(record.caption, LayerId::TaskDecomposition.caption());
    }

    #[test]
    fn test_record_json_shape() {
        let record = LayerRecord::new(
            LayerData::RawInput(RawInput {
                user_message: "hi".into(),
                timestamp: "2024-01-15T10:30:00Z".into(),
                session_id: None,
            }),
            None,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["layer"], 1);
        assert_eq!(json["data"]["kind"], "raw_input");
        assert_eq!(json["data"]["user_message"], "hi");
        assert!(json["data"]["session_id"].is_null());
        assert!(json.get("snippet").is_none());
    }
}
