use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::followup::{FollowupGenerator, GenerationSource};
use super::prompt::{CV_QUESTION_COUNT, CvQuestionsPromptInput, cv_questions_prompt};

/// Interview plan drafted from a CV and a job description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuestionSet {
    pub questions: Vec<String>,
    pub source: GenerationSource,
}

impl GeneratedQuestionSet {
    pub fn is_fallback(&self) -> bool {
        self.source == GenerationSource::Fallback
    }
}

/// Splits model output into questions, one per non-blank line.
///
/// Leading list markers (`1.`, `2)`, `-`, `*`, `•`) are dropped and at most
/// [`CV_QUESTION_COUNT`] questions are kept.
pub fn parse_question_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .take(CV_QUESTION_COUNT)
        .map(str::to_string)
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();
    let unnumbered = line.trim_start_matches(|c: char| c.is_ascii_digit());
    let line = if unnumbered.len() < line.len() {
        match unnumbered.strip_prefix(['.', ')']) {
            Some(rest) => rest,
            None => line,
        }
    } else {
        line
    };
    line.trim_start_matches(['-', '*', '•']).trim()
}

impl FollowupGenerator {
    /// Asks the model for technical questions tailored to a CV.
    ///
    /// Failures, timeouts and answers with no usable line yield the canned plan.
    pub async fn questions_from_cv(
        &self,
        input: &CvQuestionsPromptInput<'_>,
    ) -> GeneratedQuestionSet {
        let mut prompt = cv_questions_prompt(&self.settings().language, input);
        prompt.temperature = Some(self.settings().temperature);

        let questions = match self.complete(&prompt).await {
            Ok(text) => parse_question_lines(&text),
            Err(e) => {
                warn!(error = %e, "CV question generation failed; using canned plan");
                return self.canned_cv_questions();
            }
        };

        if questions.is_empty() {
            warn!("Model returned no usable CV questions; using canned plan");
            return self.canned_cv_questions();
        }
        debug!(count = questions.len(), "Generated CV questions");
        GeneratedQuestionSet {
            questions,
            source: GenerationSource::Model,
        }
    }

    fn canned_cv_questions(&self) -> GeneratedQuestionSet {
        GeneratedQuestionSet {
            questions: self.fallbacks().cv_questions.clone(),
            source: GenerationSource::Fallback,
        }
    }
}
