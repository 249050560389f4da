//! Display text for each layer, indexed by `LayerId::index()`.

pub(super) const TITLES: [&str; 10] = [
    "Raw Input",
    "Tokenization (Encode)",
    "Embedding Layer",
    "Semantic Search (Vector Similarity)",
    "Context Injection (MCP)",
    "Task Decomposition (LangChain)",
    "Attention Mechanism & Transformer",
    "Next-Token Prediction",
    "Detokenization (Decode)",
    "Post-Processing & Formatting",
];

pub(super) const CAPTIONS: [&str; 10] = [
    "This is what you typed. No context, no memory, no goals. Just text.",
    "Text is converted to token IDs. The LLM doesn't understand words, it processes numbers.",
    "Each token ID becomes a 12,288-dimensional vector. This is how the LLM represents meaning mathematically.",
    "Your query is compared against a database using cosine similarity to find relevant context. The LLM doesn't 'remember', the system retrieves and injects memories.",
    "LLM has NO memory. This context is retrieved from external storage and ADDED to the prompt via Model Context Protocol.",
    "LLM has NO planning ability. These steps are imposed by an orchestration framework that chains multiple LLM calls together.",
    "96 layers of multi-head attention. Each token 'attends' to other tokens to understand context. This is pattern matching, not reasoning.",
    "This is ALL the LLM does: predict the next token based on probability. No reasoning, no truth, no intent. Just statistical prediction.",
    "Token IDs are converted back to text. The LLM outputs numbers, not words.",
    "Even the 'professional' formatting is added by a separate layer. The raw LLM output is unstructured lowercase text.",
];

pub(super) const QUOTES: [&str; 10] = [
    "Every prompt is a fresh invocation, every answer contextually isolated.",
    "Trained on vast corpora, they learn token-level probabilities that allow them to generate text that appears fluent, coherent, even thoughtful.",
    "While transformer architectures attend over a sliding context window, they do not preserve memory across interactions. They simulate continuity through token co-occurrence, not through persistent internal state.",
    "To fake memory, developers bolt on retrieval systems: embedding stores, vector databases, session logs. But this is not memory in the cognitive sense. It is record look-up dressed as recollection.",
    "MCP is an open protocol for communicating between an LLM and its external scaffolding... It formalises how context is packaged and passed back into the model.",
    "LangChain exists because LLMs, on their own, forget everything and understand nothing. LangChain is not a mind. It is not reasoning. It is a library: a Python wrapper that gives structure to the illusion of cognition by chaining LLM outputs through pre-defined workflows.",
    "LLMs optimise locally. They predict the next token based on what came before, nothing more. They do not hold a map. They do not backtrack. They do not know what the paragraph is 'about.'",
    "The transformer does not pursue a goal, it optimizes a probability distribution. Your prompt is parsed into tokens, mapped through attention layers, and decoded into the next most likely token. There is no telos, no 'why,' just next.",
    "What feels like reasoning is really surface-level alignment between your input and high-probability continuations, modulated by context windows and reinforcement learning post-processing (RLHF).",
    "The illusion of reasoning arises from the symmetry of structure, not the presence of thought. The model has no preference. It has no epistemology. It does not 'believe' what it says.",
];
