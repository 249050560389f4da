//! Illustrative Python snippets shown next to each simulated layer.

use super::heuristics::preview;

pub(super) fn tokenization(prompt: &str, token_ids: &[u64]) -> String {
    let head = token_ids
        .iter()
        .take(5)
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"# Tokenization using tiktoken
import tiktoken

encoder = tiktoken.get_encoding("cl100k_base")
text = "{prompt}"
token_ids = encoder.encode(text)
# Output: [{head}...]"#
    )
}

pub(super) fn embedding(token_count: usize) -> String {
    format!(
        r#"# Embedding layer
embeddings = model.embed_tokens(token_ids)
# Shape: [{token_count} tokens, 12288 dimensions]
# Each token becomes a dense vector representation"#
    )
}

pub(super) fn retrieval(prompt: &str) -> String {
    format!(
        r#"# Vector similarity search
from numpy import dot
from numpy.linalg import norm

def cosine_similarity(a, b):
    return dot(a, b) / (norm(a) * norm(b))

query_vec = embed("{}...")
results = sorted(db.search(query_vec), key=lambda x: x.similarity)[:5]"#,
        preview(prompt, 20)
    )
}

pub(super) fn context_injection(prompt: &str, timestamp: &str) -> String {
    format!(
        r#"# MCP Context Assembly
context = {{
    "user_input": "{prompt}",
    "memory": retrieve_from_vector_db(query_embedding),
    "system_state": session.state,
    "timestamp": "{timestamp}"
}}
enriched_prompt = assemble_prompt(context)"#
    )
}

pub(super) fn orchestration(prompt: &str) -> String {
    format!(
        r#"# LangChain Orchestration
from langchain.chains import SequentialChain

tasks = [
    ("understand_intent", IntentChain()),
    ("retrieve_data", RetrievalChain()),
    ("generate_response", GenerationChain()),
    ("format_output", FormattingChain())
]

chain = SequentialChain(chains=tasks)
result = chain.run(user_input="{}...")"#,
        preview(prompt, 30)
    )
}

pub(super) const ATTENTION: &str = r#"# Simplified Attention Mechanism
Q = embeddings @ W_query  # Query matrix
K = embeddings @ W_key    # Key matrix
V = embeddings @ W_value  # Value matrix

attention_scores = (Q @ K.T) / sqrt(d_k)
attention_weights = softmax(attention_scores)
output = attention_weights @ V

# This happens 96 times (num_heads) per layer
# Across 96 layers in GPT-4"#;

pub(super) const PREDICTION: &str = r#"# Next-Token Prediction
logits = transformer_output  # [vocab_size] probabilities
probs = softmax(logits / temperature)

# Top-p (nucleus) sampling
sorted_probs = sort(probs, descending=True)
cumsum = cumulative_sum(sorted_probs)
top_p_mask = cumsum <= 0.9

# Sample from top-p tokens
next_token = sample(probs[top_p_mask])"#;

pub(super) fn decoding(raw_response: &str) -> String {
    format!(
        r#"# Detokenization
import tiktoken

decoder = tiktoken.get_encoding("cl100k_base")
token_ids = [12410, 352, 25, 7437, ...]
text = decoder.decode(token_ids)
# Output: "{}...""#,
        preview(raw_response, 40)
    )
}

pub(super) const POST_PROCESSING: &str = r#"# Post-processing
def format_response(raw_text):
    # Capitalize sentences
    formatted = capitalize_sentences(raw_text)

    # Add structure
    formatted = add_markdown_headers(formatted)
    formatted = create_bullet_points(formatted)

    # Clean up
    formatted = fix_spacing(formatted)
    formatted = ensure_consistency(formatted)

    return formatted"#;
