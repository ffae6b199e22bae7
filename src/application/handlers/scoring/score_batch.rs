//! ScoreBatchHandler - Scores and classifies every entity of one batch.

use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

use super::granularity::Granularity;
use crate::domain::classification::Classification;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::report::{BatchSummary, PatternRecord};
use crate::domain::scoring::{RubricScorer, ScoreVector};
use crate::domain::transcript::{ExtractionStats, MessageExtractor, UserTranscript};
use crate::ports::{PatternModel, RecordSink, TranscriptSource};

/// Command to score one batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreBatchCommand {
    pub granularity: Granularity,
}

/// Result of a scored batch.
#[derive(Debug, Clone)]
pub struct ScoreBatchResult {
    /// In first-seen entity order.
    pub records: Vec<PatternRecord>,
    pub summary: BatchSummary,
    pub extraction: ExtractionStats,
}

/// Handler for scoring batches.
pub struct ScoreBatchHandler {
    source: Arc<dyn TranscriptSource>,
    sink: Arc<dyn RecordSink>,
    scorer: Arc<RubricScorer>,
    model: Arc<dyn PatternModel>,
}

impl ScoreBatchHandler {
    pub fn new(
        source: Arc<dyn TranscriptSource>,
        sink: Arc<dyn RecordSink>,
        scorer: Arc<RubricScorer>,
        model: Arc<dyn PatternModel>,
    ) -> Self {
        Self {
            source,
            sink,
            scorer,
            model,
        }
    }

    pub fn handle(&self, cmd: ScoreBatchCommand) -> Result<ScoreBatchResult, DomainError> {
        // 1. Load and group records
        let raw = self.source.load()?;
        let extraction = MessageExtractor::new().extract(&raw);

        // 2. Score and classify every entity
        let records = self.score_transcripts(&extraction.transcripts, cmd.granularity)?;

        // 3. Persist
        let written = self.sink.write_all(&records)?;

        // 4. Summarise
        let summary = BatchSummary::from_records(&records);
        info!(
            granularity = %cmd.granularity,
            model = self.model.name(),
            records_seen = extraction.stats.records_seen,
            records_dropped = extraction.stats.records_dropped,
            entities = summary.entity_count,
            written,
            mean_total = summary.mean_total,
            critical_share = summary.critical_share,
            "Batch scored"
        );

        Ok(ScoreBatchResult {
            records,
            summary,
            extraction: extraction.stats,
        })
    }

    /// Scores transcripts in parallel, one task per user.
    ///
    /// Output order follows `transcripts`, and within a user the order of its
    /// conversations.
    pub fn score_transcripts(
        &self,
        transcripts: &[UserTranscript],
        granularity: Granularity,
    ) -> Result<Vec<PatternRecord>, DomainError> {
        let per_user = transcripts
            .par_iter()
            .map(|transcript| self.score_user(transcript, granularity))
            .collect::<Result<Vec<Vec<PatternRecord>>, DomainError>>()?;
        Ok(per_user.into_iter().flatten().collect())
    }

    fn score_user(
        &self,
        transcript: &UserTranscript,
        granularity: Granularity,
    ) -> Result<Vec<PatternRecord>, DomainError> {
        let user = transcript.user_id().as_str();
        match granularity {
            Granularity::User => {
                let scores = self.scorer.score(&transcript.human_texts());
                Ok(vec![self.record(user.to_string(), scores)?])
            }
            Granularity::Conversation => transcript
                .conversations()
                .iter()
                .map(|conversation| {
                    let scores = self.scorer.score(&conversation.human_texts());
                    self.record(format!("{}/{}", user, conversation.id()), scores)
                })
                .collect(),
            Granularity::ConversationMean => {
                let vectors: Vec<ScoreVector> = transcript
                    .conversations()
                    .iter()
                    .map(|conversation| conversation.human_texts())
                    .filter(|texts| !texts.is_empty())
                    .map(|texts| self.scorer.score(&texts))
                    .collect();
                let scores = ScoreVector::rounded_mean(&vectors);
                Ok(vec![self.record(user.to_string(), scores)?])
            }
        }
    }

    fn record(&self, id: String, scores: ScoreVector) -> Result<PatternRecord, DomainError> {
        let classification = self.model.classify(&scores)?;
        check_confidence(self.model.name(), &classification)?;
        debug!(
            id = %id,
            pattern = %classification.pattern,
            confidence = classification.confidence,
            total = scores.total(),
            "Entity classified"
        );
        Ok(PatternRecord::new(id, scores, classification))
    }
}

fn check_confidence(model: &str, classification: &Classification) -> Result<(), DomainError> {
    let c = classification.confidence;
    if c > 0.0 && c <= 1.0 {
        return Ok(());
    }
    Err(DomainError::new(
        ErrorCode::OutOfRange,
        format!("Model '{}' returned confidence {} outside (0, 1]", model, c),
    )
    .with_detail("model", model))
}
