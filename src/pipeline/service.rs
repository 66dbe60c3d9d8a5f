//! Orchestration of the question-answering pipeline.

use crate::{
    config::get_config,
    document::{DocumentStoreClient, extract_text},
    generation::{
        GenerationClient, GenerationError,
        retry::{spawn_with_timeout, with_retry},
    },
    metrics::{MetricsSnapshot, QaMetrics},
    pipeline::{
        aggregate::aggregate,
        chunking::chunk_text,
        normalize::normalize,
        parse::parse_answers,
        prompt::build_prompt,
        relevance::{DEFAULT_VOCABULARY, filter_relevant},
        types::{Chunk, ChunkAnswerSet, QaError},
    },
};
use async_trait::async_trait;
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;

/// Tunables applied to every run request.
///
/// Every threshold the pipeline uses lives here so tests can exercise small documents
/// and production picks the values up from configuration.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Maximum characters per chunk submitted to the backend.
    pub max_chunk_size: usize,
    /// Characters of overlap between consecutive chunks.
    pub chunk_overlap: usize,
    /// Upper bound on the number of chunks per request.
    pub max_chunks: usize,
    /// Minimum filtered-text length before the prefix fallback kicks in.
    pub min_relevant_len: usize,
    /// Character cap applied to the fallback prefix of the raw document text.
    pub fallback_prefix_len: usize,
    /// Character cap applied to the filtered text before chunking.
    pub max_text_len: usize,
    /// Deadline for each generation call.
    pub llm_timeout: Duration,
    /// Additional attempts after a failed generation call.
    pub llm_retries: usize,
    /// Domain vocabulary driving the relevance filter.
    pub vocabulary: Vec<String>,
}

impl PipelineSettings {
    /// Build settings from the loaded configuration, using the insurance default
    /// vocabulary unless `RELEVANCE_VOCABULARY` overrides it.
    pub fn from_config() -> Self {
        let config = get_config();
        Self {
            max_chunk_size: config.max_chunk_size,
            chunk_overlap: config.chunk_overlap,
            max_chunks: config.max_chunks,
            min_relevant_len: config.min_relevant_len,
            fallback_prefix_len: config.fallback_prefix_len,
            max_text_len: config.max_text_len,
            llm_timeout: Duration::from_secs(config.llm_timeout_secs),
            llm_retries: config.llm_retries,
            vocabulary: config.relevance_vocabulary.clone().unwrap_or_else(|| {
                DEFAULT_VOCABULARY
                    .iter()
                    .map(|term| term.to_string())
                    .collect()
            }),
        }
    }
}

/// Abstraction over the pipeline used by the HTTP surface.
#[async_trait]
pub trait QaApi: Send + Sync {
    /// Answer every question against the document behind `document_address`.
    ///
    /// The result always has one entry per question, in question order.
    async fn answer_questions(
        &self,
        document_address: &str,
        questions: &[String],
    ) -> Result<Vec<String>, QaError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

/// Coordinates the full pipeline: retrieval, extraction, filtering, chunking, fan-out
/// generation, parsing, and aggregation.
///
/// The service owns long-lived handles to the document store and the generation backend.
/// Construct it once near process start and share it through an `Arc`. No per-request
/// state survives the request that created it.
pub struct QaService {
    store: DocumentStoreClient,
    generation: Arc<dyn GenerationClient>,
    settings: PipelineSettings,
    metrics: Arc<QaMetrics>,
}

impl QaService {
    /// Build a new service around the supplied collaborators.
    pub fn new(
        store: DocumentStoreClient,
        generation: Arc<dyn GenerationClient>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            store,
            generation,
            settings,
            metrics: Arc::new(QaMetrics::new()),
        }
    }

    /// Query one chunk, absorbing every failure into an empty answer set.
    ///
    /// Each call races against the configured deadline and is retried after a failure.
    /// A chunk that still fails contributes no answers; it never aborts its siblings.
    async fn query_chunk(&self, chunk: &Chunk, questions: &[String]) -> ChunkAnswerSet {
        let prompt = build_prompt(&chunk.text, questions);
        let attempts = self.settings.llm_retries + 1;
        let timeout = self.settings.llm_timeout;

        let outcome = with_retry(attempts, || {
            let client = Arc::clone(&self.generation);
            let prompt = prompt.clone();
            async move {
                match spawn_with_timeout(timeout, async move { client.generate(prompt).await })
                    .await
                {
                    Some(result) => result,
                    None => Err(GenerationError::Timeout(timeout.as_secs())),
                }
            }
        })
        .await;

        match outcome {
            Ok(response) => parse_answers(&response, questions.len()),
            Err(error) => {
                tracing::warn!(
                    chunk = chunk.index,
                    error = %error,
                    "Chunk invocation failed; continuing without its answers"
                );
                vec![None; questions.len()]
            }
        }
    }
}

#[async_trait]
impl QaApi for QaService {
    async fn answer_questions(
        &self,
        document_address: &str,
        questions: &[String],
    ) -> Result<Vec<String>, QaError> {
        if questions.is_empty() {
            return Ok(Vec::new());
        }

        let blob = self.store.fetch(document_address).await?;
        let text = extract_text(blob).await?;
        let relevant = filter_relevant(
            &text,
            questions,
            &self.settings.vocabulary,
            self.settings.min_relevant_len,
            self.settings.fallback_prefix_len,
        );
        let prepared = normalize(&relevant, Some(self.settings.max_text_len));
        let chunks = chunk_text(
            &prepared,
            self.settings.max_chunk_size,
            self.settings.chunk_overlap,
            self.settings.max_chunks,
        );
        tracing::debug!(
            questions = questions.len(),
            chunks = chunks.len(),
            prepared_chars = prepared.len(),
            "Prepared document for querying"
        );

        // Fan out one invocation per chunk; join_all is the fan-in barrier and preserves
        // chunk order regardless of completion order.
        let invocations = chunks.iter().map(|chunk| self.query_chunk(chunk, questions));
        let chunk_answers: Vec<ChunkAnswerSet> = join_all(invocations).await;

        let answers = aggregate(&chunk_answers, questions.len());
        self.metrics
            .record_request(questions.len() as u64, chunks.len() as u64);
        Ok(answers)
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::aggregate::SENTINEL_ANSWER;
    use httpmock::{Method::GET, MockServer};

    fn test_settings() -> PipelineSettings {
        PipelineSettings {
            max_chunk_size: 60,
            chunk_overlap: 10,
            max_chunks: 3,
            min_relevant_len: 1,
            fallback_prefix_len: 500,
            max_text_len: 10_000,
            llm_timeout: Duration::from_secs(1),
            llm_retries: 0,
            vocabulary: vec!["grace period".to_string()],
        }
    }

    /// Scripted backend keyed on markers embedded in the chunk text.
    struct ScriptedClient;

    #[async_trait]
    impl GenerationClient for ScriptedClient {
        async fn generate(&self, prompt: String) -> Result<String, GenerationError> {
            if prompt.contains("SECONDMARK") {
                return Err(GenerationError::Failed("scripted failure".into()));
            }
            if prompt.contains("FIRSTMARK") {
                return Ok("1. Grace period is thirty days.\n\
                           2. No information found in this section."
                    .to_string());
            }
            Ok("1. No information found in this section.\n\
                2. Maternity is covered after two years."
                .to_string())
        }
    }

    fn marked_document() -> String {
        // Positions chosen so each of the three chunks carries exactly one marker.
        format!(
            "grace period FIRSTMARK {} SECONDMARK {} THIRDMARK end",
            "x".repeat(45),
            "y".repeat(40)
        )
    }

    fn service_with(client: Arc<dyn GenerationClient>) -> QaService {
        QaService::new(
            DocumentStoreClient::new().expect("store client"),
            client,
            test_settings(),
        )
    }

    #[tokio::test]
    async fn failed_chunk_does_not_abort_its_siblings() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/policy.txt");
                then.status(200).body(marked_document());
            })
            .await;

        let service = service_with(Arc::new(ScriptedClient));
        let questions = vec![
            "What is the grace period?".to_string(),
            "Is maternity covered?".to_string(),
        ];
        let answers = service
            .answer_questions(&format!("{}/policy.txt", server.base_url()), &questions)
            .await
            .expect("run succeeds");

        assert_eq!(
            answers,
            vec![
                "Grace period is thirty days.".to_string(),
                "Maternity is covered after two years.".to_string(),
            ]
        );

        let snapshot = service.metrics_snapshot();
        assert_eq!(snapshot.requests_processed, 1);
        assert_eq!(snapshot.questions_answered, 2);
        assert_eq!(snapshot.last_chunk_count, Some(3));
    }

    struct AlwaysFailingClient;

    #[async_trait]
    impl GenerationClient for AlwaysFailingClient {
        async fn generate(&self, _prompt: String) -> Result<String, GenerationError> {
            Err(GenerationError::Failed("backend down".into()))
        }
    }

    #[tokio::test]
    async fn all_chunks_failing_yields_sentinels_not_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/policy.txt");
                then.status(200).body("grace period of thirty days applies here");
            })
            .await;

        let service = service_with(Arc::new(AlwaysFailingClient));
        let questions = vec!["What is the grace period?".to_string()];
        let answers = service
            .answer_questions(&format!("{}/policy.txt", server.base_url()), &questions)
            .await
            .expect("run succeeds despite backend failures");

        assert_eq!(answers, vec![SENTINEL_ANSWER.to_string()]);
    }

    #[tokio::test]
    async fn retrieval_failure_is_fatal() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/policy.txt");
                then.status(502).body("bad gateway");
            })
            .await;

        let service = service_with(Arc::new(AlwaysFailingClient));
        let error = service
            .answer_questions(
                &format!("{}/policy.txt", server.base_url()),
                &["What is covered?".to_string()],
            )
            .await
            .expect_err("run fails");

        assert!(matches!(error, QaError::Retrieval(_)));
    }

    #[tokio::test]
    async fn empty_question_list_short_circuits() {
        let server = MockServer::start_async().await;
        let document_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/policy.txt");
                then.status(200).body("unused");
            })
            .await;

        let service = service_with(Arc::new(AlwaysFailingClient));
        let answers = service
            .answer_questions(&format!("{}/policy.txt", server.base_url()), &[])
            .await
            .expect("run succeeds");

        assert!(answers.is_empty());
        document_mock.assert_hits(0);
    }
}
