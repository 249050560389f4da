//! Prompt simulator.
//!
//! Turns any prompt into the ten illustrative layer records by a fixed chain
//! of text heuristics. The output is deterministic for a given prompt apart
//! from the wall-clock timestamp shown in layers 1 and 5; use [`simulate_at`]
//! to pin it.
//!
//! ```text
//! prompt ─► tokens ─► keywords ─┬─► retrieval hits / context / steps
//!                               └─► response template ─► numbered sentences
//! ```

pub mod example;
pub mod heuristics;
pub mod records;
mod snippets;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::layers::{EnabledLayers, LayerId};

use heuristics::{format_response, keyword_or, keywords, preview, token_ids, tokenize};
use records::*;

pub use example::DEFAULT_PROMPT;
pub use heuristics::ResponseTemplate;
pub use records::{LayerData, LayerRecord};

/// Declared embedding width.
pub const EMBEDDING_DIM: usize = 12_288;

/// Components listed per sample vector before eliding the rest.
const SAMPLE_COMPONENTS: usize = 3;

const ENCODING_METHOD: &str = "tiktoken (cl100k_base)";
const VOCAB_SIZE: u32 = 100_000;
const EMBEDDING_EXPLANATION: &str =
    "Each token ID is converted to a 12,288-dimensional vector that captures semantic meaning";

const FIRST_SAMPLE: [f64; SAMPLE_COMPONENTS] = [0.123, -0.245, 0.089];
const LAST_SAMPLE: [f64; SAMPLE_COMPONENTS] = [0.267, -0.134, 0.201];

const CANDIDATE_POOL: [&str; 6] = ["I", "The", "This", "Here", "Based", "To"];
const CANDIDATE_COUNT: usize = 4;
const SELECTED_TOKENS: [u64; 5] = [12410, 352, 25, 7437, 1938];
const DECODED_TOKEN_IDS: [u64; 10] = [12410, 352, 25, 7437, 1938, 40000, 9656, 329, 4713, 17032];

const FORMATTING_RULES: [&str; 5] = [
    "Capitalize sentences",
    "Add structure and numbering",
    "Ensure proper punctuation",
    "Add markdown formatting",
    "Clean up spacing",
];

/// The ten layer records for one prompt, plus the formatted final response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulation {
    records: [LayerRecord; LayerId::COUNT],
    final_response: String,
}

impl Simulation {
    pub(crate) fn new(records: [LayerRecord; LayerId::COUNT], final_response: String) -> Self {
        debug_assert!(records
            .iter()
            .zip(LayerId::ALL)
            .all(|(record, layer)| record.layer == layer));
        Self {
            records,
            final_response,
        }
    }

    /// All ten records, in layer order.
    pub fn records(&self) -> &[LayerRecord] {
        &self.records
    }

    pub fn record(&self, layer: LayerId) -> &LayerRecord {
        &self.records[layer.index()]
    }

    /// Records whose layer is enabled. Filtering is the caller's decision; the
    /// simulation itself always holds all ten.
    pub fn visible<'a>(
        &'a self,
        enabled: &'a EnabledLayers,
    ) -> impl Iterator<Item = &'a LayerRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| enabled.is_enabled(r.layer))
    }

    pub fn final_response(&self) -> &str {
        &self.final_response
    }
}

/// Run the simulated pipeline on `prompt`, stamped with the current time.
pub fn simulate(prompt: &str) -> Simulation {
    simulate_at(prompt, Utc::now())
}

/// Run the simulated pipeline with an explicit timestamp.
pub fn simulate_at(prompt: &str, now: DateTime<Utc>) -> Simulation {
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let tokens = tokenize(prompt);
    let ids = token_ids(tokens.len());
    let kws = keywords(&tokens);

    tracing::debug!(
        tokens = tokens.len(),
        keywords = kws.len(),
        "Simulating prompt"
    );

    let raw_input = LayerRecord::new(
        LayerData::RawInput(RawInput {
            user_message: prompt.to_string(),
            timestamp: timestamp.clone(),
            session_id: None,
        }),
        None,
    );

    let tokenization = LayerRecord::new(
        LayerData::Tokenization(Tokenization {
            input_text: prompt.to_string(),
            token_ids: ids.clone(),
            tokens: tokens.clone(),
            encoding_method: ENCODING_METHOD.to_string(),
            vocab_size: VOCAB_SIZE,
        }),
        Some(snippets::tokenization(prompt, &ids)),
    );

    let embedding = LayerRecord::new(
        LayerData::Embedding(Embedding {
            token_ids: ids.clone(),
            embedding_dim: EMBEDDING_DIM,
            sample_embedding: sample_vectors(&tokens, &ids),
            explanation: EMBEDDING_EXPLANATION.to_string(),
            shape: [tokens.len(), EMBEDDING_DIM],
        }),
        Some(snippets::embedding(tokens.len())),
    );

    let retrieval = LayerRecord::new(
        LayerData::Retrieval(Retrieval {
            query_embedding: format!("embedding_of('{}...')", preview(prompt, 30)),
            search_method: "cosine_similarity".to_string(),
            top_k: 5,
            retrieved_docs: retrieved_docs(&kws),
        }),
        Some(snippets::retrieval(prompt)),
    );

    let context_injection = LayerRecord::new(
        LayerData::ContextInjection(ContextInjection {
            retrieved_context: vec![
                format!("User query: {}", prompt),
                format!("Related context: {}", kws.join(", ")),
                "User preferences: detailed, technical responses".to_string(),
                "Session state: active".to_string(),
            ],
            injected_into_prompt: true,
            source: "Model Context Protocol (MCP)".to_string(),
            mcp_structure: McpStructure {
                user_input: prompt.to_string(),
                system_state: "conversation_turn_1".to_string(),
                memory_objects: vec!["user_preferences".into(), "query_history".into()],
                tool_use: None,
                context_graph: "query_nodes → response_generation".to_string(),
            },
        }),
        Some(snippets::context_injection(prompt, &timestamp)),
    );

    let orchestration = LayerRecord::new(
        LayerData::Orchestration(Orchestration {
            orchestrator: "LangChain".to_string(),
            steps: vec![
                "understand_user_intent".to_string(),
                format!("retrieve_{}_information", keyword_or(&kws, 0, "relevant")),
                format!("create_{}_response", keyword_or(&kws, 1, "structured")),
                "format_output".to_string(),
            ],
            chain_type: "SequentialChain".to_string(),
        }),
        Some(snippets::orchestration(prompt)),
    );

    let attention = LayerRecord::new(
        LayerData::Attention(Attention {
            mechanism: "Multi-Head Self-Attention".to_string(),
            num_heads: 96,
            num_layers: 96,
            context_window: 128_000,
            attention_pattern: format!("Each of {} tokens attends to all others", tokens.len()),
            explanation:
                "The transformer calculates attention scores between tokens to understand relationships"
                    .to_string(),
        }),
        Some(snippets::ATTENTION.to_string()),
    );

    let prediction = LayerRecord::new(
        LayerData::Prediction(Prediction {
            vocab_size: VOCAB_SIZE,
            temperature: 0.7,
            top_p: 0.9,
            sample_tokens: candidates(),
            selected_tokens: SELECTED_TOKENS.to_vec(),
        }),
        Some(snippets::PREDICTION.to_string()),
    );

    let raw_response = ResponseTemplate::select(prompt).render(&kws);
    let formatted = format_response(&raw_response);

    let decoding = LayerRecord::new(
        LayerData::Decoding(Decoding {
            token_ids: DECODED_TOKEN_IDS.to_vec(),
            decoded_text: raw_response.clone(),
            decoding_method: ENCODING_METHOD.to_string(),
        }),
        Some(snippets::decoding(&raw_response)),
    );

    let post_processing = LayerRecord::new(
        LayerData::PostProcessing(PostProcessing {
            raw_output: raw_response,
            formatted_output: formatted.clone(),
            formatting_rules: FORMATTING_RULES.iter().map(|r| r.to_string()).collect(),
        }),
        Some(snippets::POST_PROCESSING.to_string()),
    );

    Simulation::new(
        [
            raw_input,
            tokenization,
            embedding,
            retrieval,
            context_injection,
            orchestration,
            attention,
            prediction,
            decoding,
            post_processing,
        ],
        formatted,
    )
}

/// Sample vectors for the first and last token. A single token yields one
/// sample carrying the last-token values; no tokens yield none.
fn sample_vectors(tokens: &[String], ids: &[u64]) -> Vec<SampleVector> {
    let sample = |i: usize, values: [f64; SAMPLE_COMPONENTS]| SampleVector {
        label: format!("token_{}_{}", ids[i], tokens[i]),
        values: values.to_vec(),
        elided: EMBEDDING_DIM - SAMPLE_COMPONENTS,
    };

    match tokens.len() {
        0 => Vec::new(),
        1 => vec![sample(0, LAST_SAMPLE)],
        n => vec![sample(0, FIRST_SAMPLE), sample(n - 1, LAST_SAMPLE)],
    }
}

fn retrieved_docs(kws: &[String]) -> Vec<RetrievedDoc> {
    let doc = |id: &str, similarity: f64, snippet: String| RetrievedDoc {
        id: id.to_string(),
        similarity,
        snippet,
    };

    vec![
        doc(
            "doc_47",
            0.89,
            format!("User previously asked about: {}", keyword_or(kws, 0, "similar topics")),
        ),
        doc(
            "doc_23",
            0.82,
            format!("Related context: {}", keyword_or(kws, 1, "relevant information")),
        ),
        doc(
            "doc_91",
            0.78,
            format!("Previous queries mention: {}", keyword_or(kws, 2, "associated terms")),
        ),
        doc("doc_15", 0.71, "User preferences: detailed responses".to_string()),
        doc("doc_62", 0.68, "Timezone: GMT+1".to_string()),
    ]
}

fn candidates() -> Vec<TokenCandidate> {
    CANDIDATE_POOL
        .iter()
        .take(CANDIDATE_COUNT)
        .enumerate()
        .map(|(i, word)| TokenCandidate {
            token: word.to_string(),
            logit: 8.5 - i as f64 * 0.4,
            probability: 0.12 - i as f64 * 0.02,
        })
        .collect()
}
