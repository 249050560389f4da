//! The hand-authored "Tokyo trip" walk-through.
//!
//! Shown whenever no custom prompt is active, so the default prompt always
//! tells the curated story instead of the simulator's generic one.

use super::records::*;
use super::Simulation;

/// Prompt the presentation opens with.
pub const DEFAULT_PROMPT: &str = "Plan a 3-day trip to Tokyo";

const TIMESTAMP: &str = "2024-01-15T10:30:00Z";
const TOKEN_IDS: [u64; 8] = [21119, 257, 513, 12, 820, 5296, 284, 11790];
const TOKENS: [&str; 8] = ["Plan", " a", " 3", "-", "day", " trip", " to", " Tokyo"];

const PREFERENCES: [&str; 4] = [
    "User previously mentioned: likes museums and traditional food",
    "Travel preferences: morning activities, cultural sites",
    "Previous trip to Kyoto, enjoyed temples",
    "Timezone: GMT+1",
];

const RAW_OUTPUT: &str = "day one could start early with tsukiji market for fresh sushi breakfast then visit the tokyo national museum in ueno park afternoon explore asakusa sensoji temple";

const FORMATTED_OUTPUT: &str = "**Day 1: Traditional Tokyo**
- Morning: Tsukiji Market for fresh sushi breakfast
- Midday: Tokyo National Museum in Ueno Park
- Afternoon: Asakusa and Sensoji Temple";

/// The full three-day itinerary the chat demo "answers" with.
pub const FINAL_RESPONSE: &str = "**Day 1: Traditional Tokyo**
- Morning: Tsukiji Market for fresh sushi breakfast
- Midday: Tokyo National Museum in Ueno Park
- Afternoon: Asakusa and Sensoji Temple

**Day 2: Modern Tokyo**
- Morning: Shibuya and Harajuku
- Midday: Meiji Shrine
- Afternoon: teamLab Borderless Digital Art Museum

**Day 3: Cultural Deep Dive**
- Morning: Imperial Palace Gardens
- Afternoon: Akihabara electronics and anime district
- Evening: Dinner in Shinjuku's Omoide Yokocho alley";

const TOKENIZATION_SNIPPET: &str = r#"# Tokenization using tiktoken
import tiktoken

encoder = tiktoken.get_encoding("cl100k_base")
text = "Plan a 3-day trip to Tokyo"
token_ids = encoder.encode(text)
# Output: [21119, 257, 513, 12, 820, 5296, 284, 11790]"#;

const EMBEDDING_SNIPPET: &str = r#"# Embedding layer
embeddings = model.embed_tokens(token_ids)
# Shape: [8 tokens, 12288 dimensions]
# Each token becomes a dense vector representation"#;

const RETRIEVAL_SNIPPET: &str = r#"# Vector similarity search
from numpy import dot
from numpy.linalg import norm

def cosine_similarity(a, b):
    return dot(a, b) / (norm(a) * norm(b))

query_vec = embed("Tokyo trip")
results = []
for doc in vector_db:
    sim = cosine_similarity(query_vec, doc.embedding)
    results.append((doc, sim))

top_5 = sorted(results, key=lambda x: x[1], reverse=True)[:5]"#;

const CONTEXT_SNIPPET: &str = r#"# MCP Context Assembly
context = {
    "user_input": user_message,
    "memory": retrieve_from_vector_db(query_embedding),
    "system_state": session.state,
    "timestamp": session.timestamp
}
enriched_prompt = assemble_prompt(context)"#;

const ORCHESTRATION_SNIPPET: &str = r#"# LangChain Orchestration
from langchain.chains import SequentialChain

tasks = [
    ("understand_intent", IntentChain()),
    ("retrieve_data", RetrievalChain()),
    ("plan_itinerary", PlanningChain()),
    ("format_output", FormattingChain())
]

chain = SequentialChain(chains=tasks)
result = chain.run(user_input=enriched_prompt)"#;

const DECODING_SNIPPET: &str = r#"# Detokenization
import tiktoken

decoder = tiktoken.get_encoding("cl100k_base")
token_ids = [12410, 352, 25, 7437, ...]
text = decoder.decode(token_ids)
# Output: "day one could start early with...""#;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Build the curated record sequence.
pub fn tokyo_trip() -> Simulation {
    let raw_input = LayerRecord::new(
        LayerData::RawInput(RawInput {
            user_message: DEFAULT_PROMPT.to_string(),
            timestamp: TIMESTAMP.to_string(),
            session_id: None,
        }),
        None,
    );

    let tokenization = LayerRecord::new(
        LayerData::Tokenization(Tokenization {
            input_text: DEFAULT_PROMPT.to_string(),
            token_ids: TOKEN_IDS.to_vec(),
            tokens: strings(&TOKENS),
            encoding_method: "tiktoken (cl100k_base)".to_string(),
            vocab_size: 100_000,
        }),
        Some(TOKENIZATION_SNIPPET.to_string()),
    );

    let embedding = LayerRecord::new(
        LayerData::Embedding(Embedding {
            token_ids: TOKEN_IDS.to_vec(),
            embedding_dim: super::EMBEDDING_DIM,
            sample_embedding: vec![
                SampleVector {
                    label: "token_21119_Plan".to_string(),
                    values: vec![0.023, -0.145, 0.089],
                    elided: 12_285,
                },
                SampleVector {
                    label: "token_11790_Tokyo".to_string(),
                    values: vec![0.167, -0.034, 0.201],
                    elided: 12_285,
                },
            ],
            explanation: "Each token ID is converted to a 12,288-dimensional vector that captures semantic meaning".to_string(),
            shape: [TOKEN_IDS.len(), super::EMBEDDING_DIM],
        }),
        Some(EMBEDDING_SNIPPET.to_string()),
    );

    let doc = |id: &str, similarity: f64, snippet: &str| RetrievedDoc {
        id: id.to_string(),
        similarity,
        snippet: snippet.to_string(),
    };
    let retrieval = LayerRecord::new(
        LayerData::Retrieval(Retrieval {
            query_embedding: "embedding_of('Tokyo trip')".to_string(),
            search_method: "cosine_similarity".to_string(),
            top_k: 5,
            retrieved_docs: vec![
                doc("doc_47", 0.89, PREFERENCES[0]),
                doc("doc_23", 0.82, PREFERENCES[1]),
                doc("doc_91", 0.78, PREFERENCES[2]),
                doc("doc_15", 0.71, "Budget range: moderate"),
                doc("doc_62", 0.68, PREFERENCES[3]),
            ],
        }),
        Some(RETRIEVAL_SNIPPET.to_string()),
    );

    let context_injection = LayerRecord::new(
        LayerData::ContextInjection(ContextInjection {
            retrieved_context: strings(&PREFERENCES),
            injected_into_prompt: true,
            source: "Model Context Protocol (MCP)".to_string(),
            mcp_structure: McpStructure {
                user_input: DEFAULT_PROMPT.to_string(),
                system_state: "conversation_turn_3".to_string(),
                memory_objects: strings(&["user_preferences", "travel_history"]),
                tool_use: None,
                context_graph: "preference_nodes → travel_query".to_string(),
            },
        }),
        Some(CONTEXT_SNIPPET.to_string()),
    );

    let orchestration = LayerRecord::new(
        LayerData::Orchestration(Orchestration {
            orchestrator: "LangChain".to_string(),
            steps: strings(&[
                "understand_user_intent",
                "retrieve_tokyo_attractions",
                "create_daily_itinerary",
                "format_response",
            ]),
            chain_type: "SequentialChain".to_string(),
        }),
        Some(ORCHESTRATION_SNIPPET.to_string()),
    );

    let attention = LayerRecord::new(
        LayerData::Attention(Attention {
            mechanism: "Multi-Head Self-Attention".to_string(),
            num_heads: 96,
            num_layers: 96,
            context_window: 128_000,
            attention_pattern: "Each token attends to all previous tokens in context".to_string(),
            explanation: "The transformer calculates attention scores between tokens to understand relationships and dependencies".to_string(),
        }),
        Some(super::snippets::ATTENTION.to_string()),
    );

    let candidate = |token: &str, logit: f64, probability: f64| TokenCandidate {
        token: token.to_string(),
        logit,
        probability,
    };
    let prediction = LayerRecord::new(
        LayerData::Prediction(Prediction {
            vocab_size: 100_000,
            temperature: 0.7,
            top_p: 0.9,
            sample_tokens: vec![
                candidate("Day", 8.23, 0.1205),
                candidate("Here", 7.91, 0.0891),
                candidate("I", 7.54, 0.0623),
                candidate("**", 7.12, 0.0445),
            ],
            selected_tokens: vec![12410, 352, 25, 7437, 1938, 40000, 9656, 329],
        }),
        Some(super::snippets::PREDICTION.to_string()),
    );

    let decoding = LayerRecord::new(
        LayerData::Decoding(Decoding {
            token_ids: super::DECODED_TOKEN_IDS.to_vec(),
            decoded_text: "day one could start early with tsukiji market for fresh sushi breakfast then visit the tokyo national museum".to_string(),
            decoding_method: "tiktoken (cl100k_base)".to_string(),
        }),
        Some(DECODING_SNIPPET.to_string()),
    );

    let post_processing = LayerRecord::new(
        LayerData::PostProcessing(PostProcessing {
            raw_output: RAW_OUTPUT.to_string(),
            formatted_output: FORMATTED_OUTPUT.to_string(),
            formatting_rules: strings(&[
                "Capitalize proper nouns",
                "Add markdown formatting",
                "Structure with bullet points",
                "Add descriptive headers",
                "Ensure consistent tense",
            ]),
        }),
        Some(super::snippets::POST_PROCESSING.to_string()),
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
        FINAL_RESPONSE.to_string(),
    )
}
