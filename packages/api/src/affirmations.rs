//! The built-in affirmations library.

use rand::Rng;

/// Affirmations shown in the library, in display order.
pub const AFFIRMATIONS: [&str; 16] = [
    "You are enough, just as you are.",
    "Every day is a fresh start.",
    "Your feelings are valid and important.",
    "You deserve peace and happiness.",
    "Progress, not perfection.",
    "You are worthy of love and kindness.",
    "Take it one breath at a time.",
    "You are stronger than you think.",
    "It's okay to ask for help.",
    "You are doing the best you can.",
    "Your mental health matters.",
    "You have the power to create change.",
    "Rest is productive.",
    "You are not alone in this journey.",
    "Small steps lead to big changes.",
    "You deserve compassion, especially from yourself.",
];

/// All affirmations in display order.
pub fn all() -> &'static [&'static str] {
    &AFFIRMATIONS
}

/// A uniformly random featured affirmation.
pub fn featured() -> &'static str {
    let idx = rand::thread_rng().gen_range(0..AFFIRMATIONS.len());
    AFFIRMATIONS[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_featured_comes_from_the_library() {
        for _ in 0..32 {
            assert!(all().contains(&featured()));
        }
    }
}
