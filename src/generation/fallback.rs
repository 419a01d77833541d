use serde::{Deserialize, Serialize};

use crate::scoring::RiskLevel;

/// Canned follow-up questions served when the model cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackQuestions {
    pub low: String,
    pub medium: String,
    pub high: String,
    /// Used when the model answered but produced nothing usable.
    pub default: String,
    /// Interview plan served when questions cannot be generated from a CV.
    #[serde(default)]
    pub cv_questions: Vec<String>,
}

impl FallbackQuestions {
    pub fn italian() -> Self {
        Self {
            low: "Qual è stata la decisione tecnica più complessa del tuo ultimo progetto e quali \
                  alternative hai scartato?"
                .to_string(),
            medium: "Come hai gestito deploy, monitoring e rollback di un servizio che hai portato \
                     in produzione?"
                .to_string(),
            high: "Puoi descrivere un progetto recente in cui hai usato in produzione le \
                   competenze principali richieste da questo ruolo?"
                .to_string(),
            default: "Puoi approfondire l'ultimo punto con un esempio concreto tratto dalla tua \
                      esperienza?"
                .to_string(),
            cv_questions: to_strings(&[
                "Descrivi un progetto complesso che hai gestito dall'architettura al deploy.",
                "Come hai gestito un bug critico in produzione?",
                "Quale stack tecnologico preferisci e perché?",
                "Come approcci il code review nel tuo team?",
                "Descrivi la tua esperienza con sistemi distribuiti.",
            ]),
        }
    }

    pub fn english() -> Self {
        Self {
            low: "What was the hardest technical decision in your last project, and which \
                  alternatives did you rule out?"
                .to_string(),
            medium: "How did you handle deployment, monitoring and rollback for a service you \
                     took to production?"
                .to_string(),
            high: "Can you walk me through a recent project where you used the core skills this \
                   role requires in production?"
                .to_string(),
            default: "Can you expand on that last point with a concrete example from your \
                      experience?"
                .to_string(),
            cv_questions: to_strings(&[
                "Describe a complex project you owned from architecture to deployment.",
                "How did you handle a critical bug in production?",
                "Which technology stack do you prefer, and why?",
                "How do you approach code review in your team?",
                "Describe your experience with distributed systems.",
            ]),
        }
    }

    /// Italian for "italian"/"it" (any case), English otherwise.
    pub fn for_language(language: &str) -> Self {
        let language = language.trim();
        if language.eq_ignore_ascii_case("italian")
            || language.eq_ignore_ascii_case("italiano")
            || language.eq_ignore_ascii_case("it")
        {
            Self::italian()
        } else {
            Self::english()
        }
    }

    pub fn for_risk(&self, risk: RiskLevel) -> &str {
        match risk {
            RiskLevel::Low => &self.low,
            RiskLevel::Medium => &self.medium,
            RiskLevel::High => &self.high,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for FallbackQuestions {
    fn default() -> Self {
        Self::italian()
    }
}
