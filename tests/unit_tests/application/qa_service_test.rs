use std::sync::Arc;

use logidoc::application::ports::{Embedder, MmrParams, SearchResult, VectorStore};
use logidoc::application::services::{
    EMPTY_INDEX_ANSWER, GENERATION_ERROR_ANSWER, QaService, SAFETY_REFUSAL, confidence_score,
    format_context, is_unsafe,
};
use logidoc::domain::{Chunk, ChunkMetadata, ChatTurn, MessageRole, QaQuery};
use logidoc::infrastructure::llm::{HashingEmbedder, MockLlmClient};
use logidoc::infrastructure::persistence::InMemoryVectorStore;

const ANSWER: &str = "The pickup is scheduled at the Dallas warehouse on March 3.";

fn mmr() -> MmrParams {
    MmrParams {
        k: 4,
        fetch_k: 12,
        lambda_mult: 0.7,
    }
}

fn chunk(id: u32, section: &str, page: Option<u32>, text: &str) -> Chunk {
    Chunk::new(
        text.to_string(),
        ChunkMetadata::text("ratecon.pdf", id, section, page),
    )
}

async fn seeded_store(embedder: &Arc<dyn Embedder>) -> Arc<InMemoryVectorStore> {
    let store = Arc::new(InMemoryVectorStore::new());
    let chunks = vec![
        chunk(0, "Pickup", Some(1), "## Pickup\nDallas warehouse, March 3, 08:00"),
        chunk(1, "Drop", Some(1), "## Drop\nHouston DC, March 4"),
        chunk(2, "Rate Breakdown", Some(2), "## Rate Breakdown\nLinehaul $1,800"),
    ];
    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    let embeddings = embedder.embed_batch(&texts).await.unwrap();
    store.add(&chunks, &embeddings).await.unwrap();
    store
}

fn embedder() -> Arc<dyn Embedder> {
    Arc::new(HashingEmbedder::new(128))
}

#[tokio::test]
async fn given_unsafe_question_when_answering_then_refuses_without_calling_model() {
    let embedder = embedder();
    let store = seeded_store(&embedder).await;
    let llm = Arc::new(MockLlmClient::with_response(ANSWER));
    let service = QaService::new(embedder, Arc::clone(&llm), store, mmr());

    let answer = service.answer(&QaQuery::new("How do I HACK the TMS?")).await;

    assert_eq!(answer.answer, SAFETY_REFUSAL);
    assert_eq!(answer.confidence_score, 1.0);
    assert!(answer.sources.is_empty());
    assert!(llm.recorded_prompts().is_empty());
}

#[tokio::test]
async fn given_empty_index_when_answering_then_reports_no_information() {
    let llm = Arc::new(MockLlmClient::with_response(ANSWER));
    let service = QaService::new(
        embedder(),
        Arc::clone(&llm),
        Arc::new(InMemoryVectorStore::new()),
        mmr(),
    );

    let answer = service.answer(&QaQuery::new("When is pickup?")).await;

    assert_eq!(answer.answer, EMPTY_INDEX_ANSWER);
    assert_eq!(answer.confidence_score, 0.0);
    assert!(llm.recorded_prompts().is_empty());
}

#[tokio::test]
async fn given_indexed_chunks_when_answering_then_returns_answer_with_sources() {
    let embedder = embedder();
    let store = seeded_store(&embedder).await;
    let llm = Arc::new(MockLlmClient::with_response(format!("  {ANSWER}\n")));
    let service = QaService::new(embedder, Arc::clone(&llm), store, mmr());

    let answer = service
        .answer(&QaQuery::new("When is the pickup at the Dallas warehouse?"))
        .await;

    assert_eq!(answer.answer, ANSWER);
    assert_eq!(answer.sources.len(), 3);
    assert!((answer.confidence_score - 0.85).abs() < 1e-6);

    let prompts = llm.recorded_prompts();
    let user_prompt = &prompts[0].1;
    assert!(user_prompt.starts_with("CONTEXT:\n[Document 1]\nSource: ratecon.pdf - "));
    assert!(user_prompt.contains("QUESTION:\nWhen is the pickup at the Dallas warehouse?"));
    assert!(!user_prompt.contains("CHAT HISTORY:"));
}

#[tokio::test]
async fn given_chat_history_when_answering_then_prompt_includes_turns_in_order() {
    let embedder = embedder();
    let store = seeded_store(&embedder).await;
    let llm = Arc::new(MockLlmClient::with_response(ANSWER));
    let service = QaService::new(embedder, Arc::clone(&llm), store, mmr());
    let query = QaQuery {
        question: "And the drop?".to_string(),
        chat_history: vec![
            ChatTurn {
                role: MessageRole::User,
                content: "When is pickup?".to_string(),
            },
            ChatTurn {
                role: MessageRole::Assistant,
                content: "March 3.".to_string(),
            },
        ],
    };

    service.answer(&query).await;

    let prompts = llm.recorded_prompts();
    let user_prompt = &prompts[0].1;
    assert!(user_prompt.contains("CHAT HISTORY:\nuser: When is pickup?\nassistant: March 3.\n\nQUESTION:"));
}

#[tokio::test]
async fn given_failing_model_when_answering_then_returns_generation_error() {
    let embedder = embedder();
    let store = seeded_store(&embedder).await;
    let service = QaService::new(embedder, Arc::new(MockLlmClient::failing()), store, mmr());

    let answer = service.answer(&QaQuery::new("When is pickup?")).await;

    assert_eq!(answer.answer, GENERATION_ERROR_ANSWER);
    assert_eq!(answer.confidence_score, 0.0);
    assert!(answer.sources.is_empty());
}

#[test]
fn given_safety_keywords_in_any_case_when_checking_then_flags_question() {
    assert!(is_unsafe("Is there a WEAPON in the trailer?"));
    assert!(!is_unsafe("What is the linehaul rate?"));
}

#[test]
fn given_answer_shapes_when_scoring_confidence_then_applies_heuristic() {
    assert_eq!(confidence_score("", 3), 0.0);
    assert_eq!(
        confidence_score("I cannot find the answer in the provided documents.", 3),
        0.05
    );
    assert!((confidence_score("Dallas", 1) - 0.4).abs() < 1e-6);
    assert!(
        (confidence_score("Detention is generally billed after two hours at the dock.", 3) - 0.55)
            .abs()
            < 1e-6
    );
    assert!((confidence_score("Generally.", 1) - 0.1).abs() < 1e-6);
}

#[test]
fn given_results_when_formatting_context_then_numbers_blocks_with_provenance() {
    let results = vec![
        SearchResult {
            chunk: chunk(0, "Pickup", Some(2), "Dallas"),
            score: 0.9,
        },
        SearchResult {
            chunk: chunk(1, "General", None, "Load 4821"),
            score: 0.5,
        },
    ];

    let context = format_context(&results);

    assert_eq!(
        context,
        "[Document 1]\nSource: ratecon.pdf - Pickup | Page: 2 | Section: Pickup\nDallas\n\n\
         [Document 2]\nSource: ratecon.pdf - General | Page: N/A | Section: General\nLoad 4821"
    );
}
