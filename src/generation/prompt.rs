use crate::scoring::RiskLevel;

/// A single chat request: system instruction plus user message.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    /// Overrides the backend's default temperature when set.
    pub temperature: Option<f64>,
}

pub const RECAP_TEMPERATURE: f64 = 0.3;

/// Questions requested when drafting an interview plan from a CV.
pub const CV_QUESTION_COUNT: usize = 5;

const CV_EXCERPT_CHARS: usize = 3000;
const JOB_EXCERPT_CHARS: usize = 1500;

const NO_NOTES: &str = "- (no notes yet)";
const NONE_ITEM: &str = "- (none)";

fn bullet_list<S: AsRef<str>>(items: &[S], empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    items
        .iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// At most `max_chars` characters of `text`, cut on a char boundary.
fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Builds the call-context block handed to the model as "notes".
///
/// `suggested` lists questions already on screen so the model does not repeat them.
pub fn compose_call_context<N, Q>(
    note_texts: &[N],
    best_preloaded: Option<&str>,
    suggested: &[Q],
) -> String
where
    N: AsRef<str>,
    Q: AsRef<str>,
{
    format!(
        "Call context (latest notes):\n{notes}\n\n\
         Closest preloaded question (if useful):\n{best}\n\n\
         Already suggested or preloaded questions (avoid duplicates):\n{suggested}\n",
        notes = bullet_list(note_texts, NO_NOTES),
        best = best_preloaded.unwrap_or("(none)"),
        suggested = bullet_list(suggested, NONE_ITEM),
    )
}

/// Prompt asking for one follow-up question.
pub fn followup_prompt(
    language: &str,
    job_text: &str,
    call_context: &str,
    risk: RiskLevel,
) -> Prompt {
    let system =
        format!("You are a senior technical interviewer. Always answer only in {language}.");
    let user = format!(
        "You are an AI interview copilot for recruiters.\n\n\
         JOB DESCRIPTION (excerpt):\n{job_text}\n\n\
         CALL CONTEXT (notes / signals):\n{call_context}\n\n\
         RISK LEVEL: {risk}\n\n\
         Generate ONE follow-up question in {language}, ready to be asked out loud.\n\
         Requirements:\n\
         - It must be TECHNICAL and incisive.\n\
         - If the risk is MEDIUM or HIGH, verify production-grade skills \
         (CI/CD, deploy, monitoring, rollback, incidents, best practices).\n\
         - If the risk is LOW, go for a more advanced technical deep dive.\n\
         - At most one sentence, no preamble, no explanation.\n\n\
         Reply ONLY with the question.",
        risk = risk.as_str(),
    );
    Prompt {
        system,
        user,
        temperature: None,
    }
}

/// Inputs of the end-of-session recap.
#[derive(Debug, Clone, Default)]
pub struct RecapPromptInput<'a> {
    pub job_title: &'a str,
    pub coverage_score: Option<f32>,
    pub notes: Vec<&'a str>,
    pub asked: Vec<&'a str>,
    pub unasked: Vec<&'a str>,
}

/// Prompt asking for a JSON recap of a finished session.
pub fn recap_prompt(language: &str, input: &RecapPromptInput<'_>) -> Prompt {
    let coverage = input
        .coverage_score
        .map(|c| format!("{c}%"))
        .unwrap_or_else(|| "n/a".to_string());
    let system = format!(
        "You are a senior technical recruiter. Always answer only in {language}. \
         Output valid JSON only."
    );
    let user = format!(
        "SESSION RECAP REQUEST\n\n\
         Job title: {title}\n\n\
         Coverage score: {coverage}\n\n\
         NOTES (timeline):\n{notes}\n\n\
         QUESTIONS ASKED:\n{asked}\n\n\
         QUESTIONS NOT ASKED:\n{unasked}\n\n\
         Produce a recap in {language} with this JSON format (JSON only, no extra text):\n\
         {{\n  \"summary\": \"...\",\n  \"strengths\": [\"...\", \"...\", \"...\"],\n  \
         \"gaps_or_risks\": [\"...\", \"...\", \"...\"],\n  \
         \"recommended_next_steps\": [\"...\", \"...\"]\n}}",
        title = input.job_title,
        notes = bullet_list(&input.notes, NO_NOTES),
        asked = bullet_list(&input.asked, NONE_ITEM),
        unasked = bullet_list(&input.unasked, NONE_ITEM),
    );
    Prompt {
        system,
        user,
        temperature: Some(RECAP_TEMPERATURE),
    }
}

/// Inputs of an interview plan drafted from a CV.
#[derive(Debug, Clone, Copy, Default)]
pub struct CvQuestionsPromptInput<'a> {
    pub job_title: &'a str,
    pub job_text: &'a str,
    pub cv_text: &'a str,
}

/// Prompt asking for [`CV_QUESTION_COUNT`] technical questions, one per line.
///
/// The CV and job text are cut to fixed excerpts to bound the prompt size.
pub fn cv_questions_prompt(language: &str, input: &CvQuestionsPromptInput<'_>) -> Prompt {
    let system =
        format!("You are a senior technical recruiter. Always answer only in {language}.");
    let user = format!(
        "Analyze the CV and the job description and write {count} targeted technical \
         questions.\n\n\
         JOB DESCRIPTION ({title}):\n{job}\n\n\
         CV (excerpt):\n{cv}\n\n\
         Write exactly {count} technical questions in {language}, one per line, without \
         numbering and without preamble.\n\
         The questions must check whether the candidate fits this specific role.",
        count = CV_QUESTION_COUNT,
        title = input.job_title,
        job = excerpt(input.job_text, JOB_EXCERPT_CHARS),
        cv = excerpt(input.cv_text, CV_EXCERPT_CHARS),
    );
    Prompt {
        system,
        user,
        temperature: None,
    }
}
