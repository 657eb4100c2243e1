use std::sync::Arc;

use crate::application::ports::{
    Embedder, EmbedderError, LlmClient, MmrParams, SearchResult, VectorStore, VectorStoreError,
};
use crate::domain::{QaQuery, SourcedAnswer};

pub const SAFETY_REFUSAL: &str = "I cannot answer this question as it violates safety guidelines.";
pub const EMPTY_INDEX_ANSWER: &str =
    "I cannot find any relevant information in the uploaded documents.";
pub const NOT_FOUND_ANSWER: &str = "I cannot find the answer in the provided documents.";
pub const GENERATION_ERROR_ANSWER: &str = "An error occurred while generating the answer.";

const UNSAFE_KEYWORDS: [&str; 6] = ["bomb", "kill", "suicide", "hack", "exploit", "weapon"];
const HEDGING_PHRASES: [&str; 6] = [
    "generally",
    "usually",
    "in most cases",
    "best practice",
    "typically",
    "commonly",
];

const BASE_CONFIDENCE: f32 = 0.85;
const REFUSAL_CONFIDENCE: f32 = 0.05;
const SHORT_ANSWER_CHARS: usize = 30;

const QA_SYSTEM_PROMPT: &str = r#"You are an AI assistant specialized in Logistics and Transportation Management Systems (TMS).

You MUST answer ONLY using the information explicitly present in the provided context.
The context contains official logistics documents such as SOPs, user manuals, API guides, rate cards, shipment workflows, compliance policies, and configuration guides.

STRICT RULES:
- Do NOT use outside knowledge.
- Do NOT infer missing details.
- Do NOT assume workflows or configurations.
- Do NOT generate examples unless present in context.
- If the answer is not explicitly stated, respond EXACTLY with:
"I cannot find the answer in the provided documents."
- Accuracy is more important than completeness.
- Preserve terminology exactly as written."#;

/// Answers questions grounded in the indexed chunks.
pub struct QaService<L, V>
where
    L: LlmClient,
    V: VectorStore,
{
    embedder: Arc<dyn Embedder>,
    llm_client: Arc<L>,
    vector_store: Arc<V>,
    mmr: MmrParams,
}

impl<L, V> QaService<L, V>
where
    L: LlmClient,
    V: VectorStore,
{
    pub fn new(
        embedder: Arc<dyn Embedder>,
        llm_client: Arc<L>,
        vector_store: Arc<V>,
        mmr: MmrParams,
    ) -> Self {
        Self {
            embedder,
            llm_client,
            vector_store,
            mmr,
        }
    }

    /// Always produces an answer; failures degrade to a fixed message with
    /// zero confidence.
    #[tracing::instrument(skip_all, fields(history = query.chat_history.len()))]
    pub async fn answer(&self, query: &QaQuery) -> SourcedAnswer {
        if is_unsafe(&query.question) {
            tracing::warn!("Question rejected by safety filter");
            return SourcedAnswer::unsourced(SAFETY_REFUSAL, 1.0);
        }

        match self.vector_store.is_empty().await {
            Ok(true) => return SourcedAnswer::unsourced(EMPTY_INDEX_ANSWER, 0.0),
            Ok(false) => {}
            Err(e) => {
                tracing::error!(error = %e, "Vector index unavailable");
                return SourcedAnswer::unsourced(GENERATION_ERROR_ANSWER, 0.0);
            }
        }

        let results = match self.retrieve(&query.question).await {
            Ok(results) => results,
            Err(e) => {
                tracing::error!(error = %e, "Retrieval failed");
                return SourcedAnswer::unsourced(GENERATION_ERROR_ANSWER, 0.0);
            }
        };

        if results.is_empty() {
            return SourcedAnswer::unsourced(NOT_FOUND_ANSWER, 0.0);
        }
        tracing::info!(retrieved = results.len(), "Context retrieved");

        let user_prompt = build_user_prompt(query, &results);
        let answer = match self
            .llm_client
            .complete(QA_SYSTEM_PROMPT, &user_prompt)
            .await
        {
            Ok(answer) => answer.trim().to_string(),
            Err(e) => {
                tracing::error!(error = %e, "Answer generation failed");
                return SourcedAnswer::unsourced(GENERATION_ERROR_ANSWER, 0.0);
            }
        };

        let confidence_score = confidence_score(&answer, results.len());
        tracing::info!(confidence = confidence_score, "Answer generated");

        SourcedAnswer {
            answer,
            confidence_score,
            sources: results.into_iter().map(|r| r.chunk).collect(),
        }
    }

    async fn retrieve(&self, question: &str) -> Result<Vec<SearchResult>, RetrievalError> {
        let query_embedding = self.embedder.embed(question).await?;
        Ok(self
            .vector_store
            .search_mmr(&query_embedding, self.mmr)
            .await?)
    }
}

#[derive(Debug, thiserror::Error)]
enum RetrievalError {
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("search: {0}")]
    Search(#[from] VectorStoreError),
}

pub fn is_unsafe(question: &str) -> bool {
    let lowered = question.to_lowercase();
    UNSAFE_KEYWORDS.iter().any(|k| lowered.contains(k))
}

/// Heuristic confidence in `[0, 1]` for a generated answer.
pub fn confidence_score(answer: &str, source_count: usize) -> f32 {
    if answer.is_empty() {
        return 0.0;
    }

    let lowered = answer.to_lowercase();
    if lowered.contains("cannot find the answer") {
        return REFUSAL_CONFIDENCE;
    }

    let mut confidence = BASE_CONFIDENCE;
    if answer.trim().chars().count() < SHORT_ANSWER_CHARS {
        confidence -= 0.3;
    }
    if source_count < 2 {
        confidence -= 0.15;
    }
    if HEDGING_PHRASES.iter().any(|p| lowered.contains(p)) {
        confidence -= 0.3;
    }

    confidence.clamp(0.0, 1.0)
}

/// Numbered context blocks with provenance, separated by blank lines.
pub fn format_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let metadata = &result.chunk.metadata;
            let page = metadata
                .page_number
                .map_or_else(|| "N/A".to_string(), |p| p.to_string());
            format!(
                "[Document {}]\nSource: {} | Page: {} | Section: {}\n{}",
                i + 1,
                metadata.source,
                page,
                metadata.section(),
                result.chunk.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn build_user_prompt(query: &QaQuery, results: &[SearchResult]) -> String {
    let mut prompt = format!("CONTEXT:\n{}\n\n", format_context(results));

    if !query.chat_history.is_empty() {
        prompt.push_str("CHAT HISTORY:\n");
        for turn in &query.chat_history {
            prompt.push_str(&format!("{}: {}\n", turn.role, turn.content));
        }
        prompt.push('\n');
    }

    prompt.push_str(&format!(
        "QUESTION:\n{}\n\nFINAL ANSWER (With proper english sentence matching the question):",
        query.question
    ));
    prompt
}
