//! Canned reply tables
//!
//! Fixed candidate lists per category. Selection is uniform-random with
//! the RNG injected by the caller so tests can pin the pick.

use super::classifier::ResponseCategory;
use rand::Rng;

const GREETING_REPLIES: &[&str] = &[
    "Hello! I'm your AI English assistant. How can I help you practice today?",
    "Hi there! I'm here to help you improve your English. What would you like to talk about?",
    "Welcome! Let's practice English together. What's on your mind?",
];

const HELP_REPLIES: &[&str] = &[
    "I can help you practice English conversation, improve pronunciation, and learn new vocabulary. Just start talking!",
    "You can ask me questions, practice conversations, or request help with specific English topics. I'm here to assist!",
    "I'm designed to help with English learning through natural conversation. Feel free to speak or type anything!",
];

const WEATHER_REPLIES: &[&str] = &[
    "That's a great topic for conversation! Weather talk is very common in English. Can you describe the weather where you are?",
    "Weather is a perfect conversation starter! Try using descriptive words like 'sunny', 'cloudy', 'rainy', or 'windy'.",
    "Talking about weather is great practice! You could say 'It's a beautiful day' or 'The weather is terrible today'.",
];

const PRONUNCIATION_REPLIES: &[&str] = &[
    "Pronunciation practice is excellent! Try speaking slowly and clearly. I can help you with specific sounds or words.",
    "Great focus on pronunciation! Remember to practice the 'th' sound, 'r' and 'l' sounds, and word stress patterns.",
    "Pronunciation improves with practice! Try reading aloud and focus on connecting words smoothly in sentences.",
];

const DEFAULT_REPLIES: &[&str] = &[
    "That's interesting! Can you tell me more about that? I'd love to continue this conversation.",
    "Great point! How do you feel about that topic? Practice expressing your opinions in English.",
    "I understand. Can you explain that in different words? It's good practice to rephrase ideas.",
    "That's a good topic for discussion! What are your thoughts on this matter?",
    "Excellent! Try to expand on that idea. Use more descriptive words and detailed explanations.",
];

/// Candidate list for a category; never empty
pub fn candidates(category: ResponseCategory) -> &'static [&'static str] {
    match category {
        ResponseCategory::Greeting => GREETING_REPLIES,
        ResponseCategory::Help => HELP_REPLIES,
        ResponseCategory::Weather => WEATHER_REPLIES,
        ResponseCategory::Pronunciation => PRONUNCIATION_REPLIES,
        ResponseCategory::Default => DEFAULT_REPLIES,
    }
}

/// Uniform-random pick from the category's table
pub fn pick<R: Rng + ?Sized>(category: ResponseCategory, rng: &mut R) -> &'static str {
    let table = candidates(category);
    table[rng.gen_range(0..table.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ALL_CATEGORIES: &[ResponseCategory] = &[
        ResponseCategory::Greeting,
        ResponseCategory::Help,
        ResponseCategory::Weather,
        ResponseCategory::Pronunciation,
        ResponseCategory::Default,
    ];

    #[test]
    fn test_no_table_is_empty() {
        for &category in ALL_CATEGORIES {
            assert!(!candidates(category).is_empty(), "{:?}", category);
        }
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(candidates(ResponseCategory::Greeting).len(), 3);
        assert_eq!(candidates(ResponseCategory::Help).len(), 3);
        assert_eq!(candidates(ResponseCategory::Weather).len(), 3);
        assert_eq!(candidates(ResponseCategory::Pronunciation).len(), 3);
        assert_eq!(candidates(ResponseCategory::Default).len(), 5);
    }

    #[test]
    fn test_pick_stays_inside_table() {
        let mut rng = StdRng::seed_from_u64(7);
        for &category in ALL_CATEGORIES {
            for _ in 0..20 {
                let reply = pick(category, &mut rng);
                assert!(candidates(category).contains(&reply));
            }
        }
    }

    #[test]
    fn test_pick_is_reproducible_with_same_seed() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(
                pick(ResponseCategory::Default, &mut a),
                pick(ResponseCategory::Default, &mut b)
            );
        }
    }

    #[test]
    fn test_greeting_table_content() {
        assert_eq!(
            candidates(ResponseCategory::Greeting)[0],
            "Hello! I'm your AI English assistant. How can I help you practice today?"
        );
    }
}
