use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::constants::DEFAULT_COVERAGE_TOP_K;
use crate::context::build_context;
use crate::embedding::TextEmbedder;
use crate::generation::{
    CvQuestionsPromptInput, FollowupGenerator, RecapPromptInput, compose_call_context,
};
use crate::retrieval::{
    ReliabilityThresholds, ScoredChunk, ScoredQuestion, best_reliable, filter_chunks, rank,
};
use crate::scoring::{RiskAssessment, assess_distance, coverage_from_distance, round_decimals};
use crate::store::{
    CopilotStore, CvChunkRecord, CvRecord, JobDescriptionRecord, QuestionRecord, QuestionScope,
    SessionRecord, StoreError, StoreResult,
};
use crate::vector::cosine_distance;

use super::error::{CopilotError, CopilotResult, Entity};
use super::types::{
    CoverageReport, CvQuestionPlan, LiveSuggestion, LiveSuggestionRequest, NextQuestionDecision,
    NextQuestionRequest, NoteEntry, QuestionEntry, QuestionPoolScope, SessionInfo,
    SessionQuestions, SessionRecap, SessionSummary, SessionTimeline, Signals, TimelineEntry,
    TimelineKind,
};

const UNKNOWN_CANDIDATE: &str = "unknown";

/// Retrieval, risk scoring and question suggestion over a [`CopilotStore`].
///
/// Every call reads what it needs from the store, computes, and returns. Nothing is
/// cached between calls and the store is never written.
pub struct CopilotEngine<S: CopilotStore> {
    store: Arc<S>,
    embedder: Arc<dyn TextEmbedder>,
    generator: FollowupGenerator,
    thresholds: ReliabilityThresholds,
}

impl<S: CopilotStore> std::fmt::Debug for CopilotEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopilotEngine")
            .field("generator", &self.generator)
            .field("thresholds", &self.thresholds)
            .finish_non_exhaustive()
    }
}

/// Reliability-gated view of one ranking pass.
struct Gated {
    best: Option<ScoredQuestion>,
    chunks: Vec<ScoredChunk>,
    signals: Signals,
}

impl<S: CopilotStore> CopilotEngine<S> {
    pub fn new(
        store: Arc<S>,
        embedder: Arc<dyn TextEmbedder>,
        generator: FollowupGenerator,
        thresholds: ReliabilityThresholds,
    ) -> Self {
        Self {
            store,
            embedder,
            generator,
            thresholds,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn thresholds(&self) -> ReliabilityThresholds {
        self.thresholds
    }

    pub fn generator(&self) -> &FollowupGenerator {
        &self.generator
    }

    /// Recommends what to ask next in a live session.
    #[instrument(skip(self), fields(session_id = %request.session_id))]
    pub async fn compute_next_question(
        &self,
        request: NextQuestionRequest,
    ) -> CopilotResult<NextQuestionDecision> {
        request.validate()?;

        let session = self
            .store
            .fetch_session(request.session_id)
            .await?
            .ok_or_else(|| CopilotError::not_found(Entity::Session, request.session_id))?;

        let cv = self
            .store
            .fetch_active_cv(session.candidate_id)
            .await?
            .ok_or_else(|| CopilotError::not_found(Entity::ActiveCv, session.candidate_id))?;

        let (job, notes) = tokio::join!(
            self.store.fetch_job_description(session.job_description_id),
            self.store
                .fetch_recent_notes(session.id, request.notes_window)
        );
        let job = job?.ok_or_else(|| {
            CopilotError::not_found(Entity::JobDescription, session.job_description_id)
        })?;
        let notes = notes?;

        let context = build_context(&notes, request.notes_window, &job, self.embedder.as_ref())?;
        let risk = assess_risk(&context.vector, job.vector.as_deref())?;

        let (pool, chunks) = tokio::join!(
            self.question_pool(session.id, job.id),
            self.store.fetch_cv_chunks(cv.id)
        );
        let (question_pool, questions) = pool?;
        let chunks = chunks?;

        let suggested = rank(
            &context.vector,
            questions.into_iter().map(QuestionRecord::into_pool_item),
            request.top_k_questions,
        )?;
        let ranked_chunks = rank(
            &context.vector,
            chunks.into_iter().map(CvChunkRecord::into_pool_item),
            request.top_k_chunks,
        )?;
        let gated = self.gate(&suggested, ranked_chunks);

        let suggested_texts: Vec<&str> = suggested
            .iter()
            .map(|q| q.payload.question_text.as_str())
            .collect();
        let call_context = compose_call_context(
            &context.note_texts,
            gated.best.as_ref().map(|q| q.payload.question_text.as_str()),
            &suggested_texts,
        );
        let generated = self
            .generator
            .generate(&job.description_text, &call_context, risk.level)
            .await;

        info!(
            risk = %risk.level,
            pool = ?question_pool,
            suggested = suggested.len(),
            evidence = gated.chunks.len(),
            fallback = generated.is_fallback(),
            "Next question computed"
        );

        Ok(NextQuestionDecision {
            session_id: session.id,
            candidate_id: session.candidate_id,
            cv_id: cv.id,
            job_description_id: job.id,
            jd_similarity: round_decimals(risk.similarity, 4),
            risk_level: risk.level,
            context_notes: context.note_texts,
            context_source: context.source,
            best_preloaded_question: gated.best,
            suggested_preloaded_questions: suggested,
            question_pool,
            evidence_chunks: gated.chunks,
            signals: gated.signals,
            generated_next_question: generated,
        })
    }

    /// Suggests follow-ups for a single note, outside any session window.
    #[instrument(
        skip(self, request),
        fields(cv_id = %request.cv_id, job_id = %request.job_description_id)
    )]
    pub async fn compute_live_suggestion(
        &self,
        request: LiveSuggestionRequest,
    ) -> CopilotResult<LiveSuggestion> {
        request.validate()?;

        let (cv, job) = tokio::join!(
            self.store.fetch_cv(request.cv_id),
            self.store.fetch_job_description(request.job_description_id)
        );
        let cv = cv?.ok_or_else(|| CopilotError::not_found(Entity::Cv, request.cv_id))?;
        let job = job?.ok_or_else(|| {
            CopilotError::not_found(Entity::JobDescription, request.job_description_id)
        })?;

        let note_vector = self.embedder.embed(&request.note_text)?;
        let risk = assess_risk(&note_vector, job.vector.as_deref())?;

        let (questions, chunks) = tokio::join!(
            self.store
                .fetch_question_pool(QuestionScope::JobDescription(job.id), false),
            self.store.fetch_cv_chunks(cv.id)
        );

        let suggested = rank(
            &note_vector,
            questions?.into_iter().map(QuestionRecord::into_pool_item),
            request.top_k,
        )?;
        let ranked_chunks = rank(
            &note_vector,
            chunks?.into_iter().map(CvChunkRecord::into_pool_item),
            request.top_k,
        )?;
        let gated = self.gate(&suggested, ranked_chunks);

        let suggested_texts: Vec<&str> = suggested
            .iter()
            .map(|q| q.payload.question_text.as_str())
            .collect();
        let call_context = compose_call_context(
            &[request.note_text.as_str()],
            gated.best.as_ref().map(|q| q.payload.question_text.as_str()),
            &suggested_texts,
        );
        let generated = self
            .generator
            .generate(&job.description_text, &call_context, risk.level)
            .await;

        info!(risk = %risk.level, fallback = generated.is_fallback(), "Live suggestion computed");

        Ok(LiveSuggestion {
            cv_id: cv.id,
            job_description_id: job.id,
            note: request.note_text,
            jd_similarity: round_decimals(risk.similarity, 4),
            risk_level: risk.level,
            best_preloaded_question: gated.best,
            suggested_preloaded_questions: suggested,
            related_cv_chunks: gated.chunks,
            signals: gated.signals,
            generated_followup_question: generated,
        })
    }

    /// Scores how well a CV matches a job, with the chunks closest to the job vector.
    #[instrument(skip(self))]
    pub async fn compute_coverage(
        &self,
        cv_id: Uuid,
        job_description_id: Uuid,
        top_k: usize,
    ) -> CopilotResult<CoverageReport> {
        let (cv, job) = tokio::join!(
            self.store.fetch_cv(cv_id),
            self.store.fetch_job_description(job_description_id)
        );
        let cv = cv?.ok_or_else(|| CopilotError::not_found(Entity::Cv, cv_id))?;
        let job = job?
            .ok_or_else(|| CopilotError::not_found(Entity::JobDescription, job_description_id))?;

        self.coverage(&cv, &job, top_k).await
    }

    /// Semantic search over CV chunks, within one CV or across all of them.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn search_chunks(
        &self,
        query: &str,
        cv_id: Option<Uuid>,
        top_k: usize,
    ) -> CopilotResult<Vec<ScoredChunk>> {
        let query_vector = self.embedder.embed(query)?;

        let chunks = match cv_id {
            Some(id) => {
                if self.store.fetch_cv(id).await?.is_none() {
                    return Err(CopilotError::not_found(Entity::Cv, id));
                }
                self.store.fetch_cv_chunks(id).await?
            }
            None => self.store.fetch_all_cv_chunks().await?,
        };

        let results = rank(
            &query_vector,
            chunks.into_iter().map(CvChunkRecord::into_pool_item),
            top_k,
        )?;
        debug!(results = results.len(), "Chunk search done");
        Ok(results)
    }

    /// Summarizes a session: coverage, notes timeline, questions and a model recap.
    #[instrument(skip(self))]
    pub async fn compute_session_recap(&self, session_id: Uuid) -> CopilotResult<SessionRecap> {
        let session = self
            .store
            .fetch_session(session_id)
            .await?
            .ok_or_else(|| CopilotError::not_found(Entity::Session, session_id))?;

        let candidate_name = self
            .store
            .fetch_candidate(session.candidate_id)
            .await?
            .map(|c| c.full_name)
            .unwrap_or_else(|| UNKNOWN_CANDIDATE.to_string());

        let cv = self
            .store
            .fetch_active_cv(session.candidate_id)
            .await?
            .ok_or_else(|| CopilotError::not_found(Entity::ActiveCv, session.candidate_id))?;
        let job = self
            .store
            .fetch_job_description(session.job_description_id)
            .await?
            .ok_or_else(|| {
                CopilotError::not_found(Entity::JobDescription, session.job_description_id)
            })?;

        let coverage = self.coverage(&cv, &job, DEFAULT_COVERAGE_TOP_K).await?;

        let (notes, questions) = tokio::join!(
            self.store.fetch_session_notes(session.id),
            self.session_questions(session.id)
        );
        let notes: Vec<NoteEntry> = notes?
            .into_iter()
            .map(|n| NoteEntry {
                author: n.author,
                note_text: n.note_text,
                created_at: n.created_at,
            })
            .collect();
        let questions = partition_questions(questions?);

        let prompt_input = RecapPromptInput {
            job_title: &job.title,
            coverage_score: Some(coverage.score.coverage_score),
            notes: notes.iter().map(|n| n.note_text.as_str()).collect(),
            asked: questions
                .asked
                .iter()
                .map(|q| q.question_text.as_str())
                .collect(),
            unasked: questions
                .unasked
                .iter()
                .map(|q| q.question_text.as_str())
                .collect(),
        };
        let llm_recap = self.generator.summarize_session(&prompt_input).await;

        info!(
            notes = notes.len(),
            asked = questions.asked.len(),
            coverage = coverage.score.coverage_score,
            "Session recap computed"
        );

        Ok(SessionRecap {
            session: SessionInfo {
                session_id: session.id,
                status: session.status,
                started_at: session.started_at,
                ended_at: session.ended_at,
                candidate_id: session.candidate_id,
                candidate_name,
                cv_id: cv.id,
                job_description_id: job.id,
                jd_title: job.title.clone(),
            },
            coverage,
            notes,
            questions,
            llm_recap,
        })
    }

    /// Notes and asked questions of a session merged into one chronological feed.
    #[instrument(skip(self))]
    pub async fn compute_session_timeline(
        &self,
        session_id: Uuid,
    ) -> CopilotResult<SessionTimeline> {
        let session = self
            .store
            .fetch_session(session_id)
            .await?
            .ok_or_else(|| CopilotError::not_found(Entity::Session, session_id))?;

        let (notes, questions) = tokio::join!(
            self.store.fetch_session_notes(session.id),
            self.session_questions(session.id)
        );

        let mut timeline: Vec<TimelineEntry> = notes?
            .into_iter()
            .map(|n| TimelineEntry {
                id: n.id,
                kind: TimelineKind::Note,
                author: n.author,
                text: n.note_text,
                asked_by: None,
                created_at: n.created_at,
            })
            .collect();
        timeline.extend(
            questions?
                .into_iter()
                .filter(QuestionRecord::is_asked)
                .map(|q| TimelineEntry {
                    id: q.id,
                    kind: TimelineKind::Question,
                    author: q.asked_by.clone(),
                    text: q.question_text,
                    asked_by: q.asked_by,
                    created_at: q.asked_at,
                }),
        );
        // Stable: on equal timestamps notes stay ahead of questions.
        timeline.sort_by_key(|e| (e.created_at.is_none(), e.created_at));

        debug!(entries = timeline.len(), "Session timeline computed");
        Ok(SessionTimeline {
            session_id: session.id,
            timeline,
        })
    }

    /// Every session with its coverage score and activity counts.
    #[instrument(skip(self))]
    pub async fn list_sessions(&self) -> CopilotResult<Vec<SessionSummary>> {
        let sessions = self.store.fetch_sessions().await?;

        let mut summaries = Vec::with_capacity(sessions.len());
        for session in sessions {
            summaries.push(self.summarize(session).await?);
        }

        info!(sessions = summaries.len(), "Sessions listed");
        Ok(summaries)
    }

    /// Drafts technical questions from the candidate's active CV before the interview.
    #[instrument(skip(self))]
    pub async fn generate_questions_from_cv(
        &self,
        candidate_id: Uuid,
        job_description_id: Uuid,
    ) -> CopilotResult<CvQuestionPlan> {
        let (cv, job) = tokio::join!(
            self.store.fetch_active_cv(candidate_id),
            self.store.fetch_job_description(job_description_id)
        );
        let cv = cv?.ok_or_else(|| CopilotError::not_found(Entity::ActiveCv, candidate_id))?;
        let job = job?
            .ok_or_else(|| CopilotError::not_found(Entity::JobDescription, job_description_id))?;

        let mut chunks = self.store.fetch_cv_chunks(cv.id).await?;
        chunks.sort_by_key(|c| c.chunk_index);
        let cv_text = chunks
            .iter()
            .map(|c| c.content.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        if cv_text.is_empty() {
            return Err(CopilotError::EmptyCv { cv_id: cv.id });
        }

        let generated = self
            .generator
            .questions_from_cv(&CvQuestionsPromptInput {
                job_title: &job.title,
                job_text: &job.description_text,
                cv_text: &cv_text,
            })
            .await;

        info!(
            questions = generated.questions.len(),
            fallback = generated.is_fallback(),
            "CV questions generated"
        );

        Ok(CvQuestionPlan {
            candidate_id,
            cv_id: cv.id,
            job_description_id: job.id,
            generated,
        })
    }

    async fn summarize(&self, session: SessionRecord) -> CopilotResult<SessionSummary> {
        let (candidate, cv, job) = tokio::join!(
            self.store.fetch_candidate(session.candidate_id),
            self.store.fetch_active_cv(session.candidate_id),
            self.store.fetch_job_description(session.job_description_id)
        );
        let (candidate, cv, job) = (candidate?, cv?, job?);

        let (notes, questions) = tokio::join!(
            self.store.fetch_session_notes(session.id),
            self.session_questions(session.id)
        );

        let cv_vector = cv.as_ref().and_then(|cv| cv.vector.as_deref());
        let job_vector = job.as_ref().and_then(|job| job.vector.as_deref());
        let coverage_score = match (cv_vector, job_vector) {
            (Some(cv_vector), Some(job_vector)) => Some(
                coverage_from_distance(cosine_distance(cv_vector, job_vector)?).coverage_score,
            ),
            _ => None,
        };

        Ok(SessionSummary {
            session_id: session.id,
            status: session.status,
            started_at: session.started_at,
            ended_at: session.ended_at,
            candidate_id: session.candidate_id,
            candidate_name: candidate
                .map(|c| c.full_name)
                .unwrap_or_else(|| UNKNOWN_CANDIDATE.to_string()),
            job_description_id: session.job_description_id,
            jd_title: job.map(|job| job.title),
            coverage_score,
            notes_count: notes?.len(),
            questions_asked_count: questions?.iter().filter(|q| q.is_asked()).count(),
        })
    }

    /// Every question tied to the session; empty when the store cannot scope by session.
    async fn session_questions(&self, session_id: Uuid) -> StoreResult<Vec<QuestionRecord>> {
        match self.store.fetch_session_questions(session_id).await {
            Err(e @ StoreError::UnsupportedScope { .. }) => {
                warn!(error = %e, "Session questions unavailable");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Session-scoped unasked questions, or the job's when that pool is unusable.
    async fn question_pool(
        &self,
        session_id: Uuid,
        job_description_id: Uuid,
    ) -> StoreResult<(QuestionPoolScope, Vec<QuestionRecord>)> {
        match self
            .store
            .fetch_question_pool(QuestionScope::Session(session_id), true)
            .await
        {
            Ok(questions) if questions.iter().any(|q| q.vector.is_some()) => {
                return Ok((QuestionPoolScope::Session, questions));
            }
            Ok(_) => debug!("No rankable session questions; using job pool"),
            Err(e) => warn!(error = %e, "Session question lookup failed; using job pool"),
        }

        let questions = self
            .store
            .fetch_question_pool(QuestionScope::JobDescription(job_description_id), true)
            .await?;
        Ok((QuestionPoolScope::JobDescription, questions))
    }

    async fn coverage(
        &self,
        cv: &CvRecord,
        job: &JobDescriptionRecord,
        top_k: usize,
    ) -> CopilotResult<CoverageReport> {
        let cv_vector = cv.vector.as_deref().ok_or(CopilotError::MissingEmbedding {
            entity: Entity::Cv,
            id: cv.id,
        })?;
        let job_vector = job.vector.as_deref().ok_or(CopilotError::MissingEmbedding {
            entity: Entity::JobDescription,
            id: job.id,
        })?;

        let score = coverage_from_distance(cosine_distance(cv_vector, job_vector)?);
        let chunks = self.store.fetch_cv_chunks(cv.id).await?;
        let top_chunks = rank(
            job_vector,
            chunks.into_iter().map(CvChunkRecord::into_pool_item),
            top_k,
        )?;

        Ok(CoverageReport {
            cv_id: cv.id,
            job_description_id: job.id,
            score,
            top_chunks,
        })
    }

    fn gate(&self, suggested: &[ScoredQuestion], ranked_chunks: Vec<ScoredChunk>) -> Gated {
        let chunks = filter_chunks(ranked_chunks, self.thresholds.chunk_max_distance);
        let best = best_reliable(suggested, self.thresholds.question_max_distance);

        Gated {
            signals: Signals {
                chunks_are_reliable: !chunks.is_empty(),
                best_preloaded_is_reliable: best.is_some(),
                chunk_max_distance: self.thresholds.chunk_max_distance,
                question_max_distance: self.thresholds.question_max_distance,
            },
            best,
            chunks,
        }
    }
}

/// Risk of a context against the job vector; no job vector counts as distance 1.0.
fn assess_risk(context: &[f32], job_vector: Option<&[f32]>) -> CopilotResult<RiskAssessment> {
    let distance = match job_vector {
        Some(job) => cosine_distance(context, job)?,
        None => {
            warn!("No job vector to score against; assuming distance 1.0");
            1.0
        }
    };
    Ok(assess_distance(distance))
}

fn partition_questions(questions: Vec<QuestionRecord>) -> SessionQuestions {
    let mut out = SessionQuestions::default();
    for q in questions {
        let entry = QuestionEntry {
            question_id: q.id,
            question_text: q.question_text,
            asked_at: q.asked_at,
            asked_by: q.asked_by,
            created_at: q.created_at,
        };
        if entry.asked_at.is_some() {
            out.asked.push(entry);
        } else {
            out.unasked.push(entry);
        }
    }
    out
}
