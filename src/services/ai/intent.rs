use crate::models::{Route, ServiceTopic};

const SCHEDULE_KEYWORDS: &[&str] = &[
    "schedule",
    "book",
    "meeting",
    "appointment",
    "time slot",
    "event",
    "session",
    "booking",
];

const SERVICES_KEYWORDS: &[&str] = &[
    "healthtech",
    "femtech",
    "longevity",
    "agetech",
    "services",
    "solutions",
    "ai",
    "automation",
];

const AFFIRMATIVE: &[&str] = &["yes", "yeah", "yep", "sure"];

/// Keywords this short only count as whole words, so "ai" does not fire on "email".
const WHOLE_WORD_MAX_LEN: usize = 2;

fn contains_keyword(text: &str, keyword: &str) -> bool {
    if keyword.len() > WHOLE_WORD_MAX_LEN {
        return text.contains(keyword);
    }
    text.split(|c: char| !c.is_alphanumeric())
        .any(|word| word == keyword)
}

fn matches_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| contains_keyword(text, k))
}

/// Routes one user message. Scheduling wins over services, which wins over
/// plain conversation.
pub fn classify(text: &str) -> Route {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return Route::Conversation;
    }

    if matches_any(&normalized, SCHEDULE_KEYWORDS) {
        Route::Schedule
    } else if matches_any(&normalized, SERVICES_KEYWORDS) {
        Route::Services
    } else {
        Route::Conversation
    }
}

pub fn service_topic(text: &str) -> ServiceTopic {
    let normalized = text.to_lowercase();
    if normalized.contains("healthtech") {
        ServiceTopic::HealthTech
    } else if normalized.contains("femtech") {
        ServiceTopic::FemTech
    } else if normalized.contains("agetech") || normalized.contains("longevity") {
        ServiceTopic::AgeTech
    } else {
        ServiceTopic::General
    }
}

/// Exact (case-insensitive) yes-like answer to the scheduling offer.
pub fn is_affirmative(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    AFFIRMATIVE.contains(&normalized.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_keywords_any_case() {
        for text in [
            "I'd like to book a meeting",
            "SCHEDULE something",
            "Can we set an Appointment?",
            "is there a free time slot",
            "Booking please",
            "what EVENTS do you run",
        ] {
            assert_eq!(classify(text), Route::Schedule, "{text}");
        }
    }

    #[test]
    fn test_schedule_takes_precedence_over_services() {
        assert_eq!(classify("book a healthtech consultation"), Route::Schedule);
        assert_eq!(classify("AI session"), Route::Schedule);
    }

    #[test]
    fn test_services_keywords() {
        assert_eq!(classify("Tell me about FemTech"), Route::Services);
        assert_eq!(classify("what solutions do you offer"), Route::Services);
        assert_eq!(classify("how does your AI work?"), Route::Services);
        assert_eq!(classify("longevity"), Route::Services);
    }

    #[test]
    fn test_short_keywords_need_word_boundaries() {
        assert_eq!(classify("what's your email address"), Route::Conversation);
        assert_eq!(classify("please explain photosynthesis"), Route::Conversation);
        assert_eq!(classify("ai."), Route::Services);
    }

    #[test]
    fn test_no_match_is_conversation() {
        assert_eq!(classify("hello there"), Route::Conversation);
        assert_eq!(classify("what is the capital of France"), Route::Conversation);
    }

    #[test]
    fn test_empty_input_is_conversation() {
        assert_eq!(classify(""), Route::Conversation);
        assert_eq!(classify("   \n\t"), Route::Conversation);
    }

    #[test]
    fn test_service_topic() {
        assert_eq!(service_topic("HealthTech please"), ServiceTopic::HealthTech);
        assert_eq!(service_topic("femtech"), ServiceTopic::FemTech);
        assert_eq!(service_topic("AgeTech"), ServiceTopic::AgeTech);
        assert_eq!(service_topic("longevity research"), ServiceTopic::AgeTech);
        assert_eq!(service_topic("your services"), ServiceTopic::General);
    }

    #[test]
    fn test_affirmative_is_exact_match() {
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("YES"));
        assert!(is_affirmative(" Sure "));
        assert!(is_affirmative("yep"));
        assert!(!is_affirmative("yes please"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("eyes"));
        assert!(!is_affirmative(""));
    }
}
