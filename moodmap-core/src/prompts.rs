use rand::Rng;
use rand::seq::SliceRandom;

pub const JOURNALING_PROMPTS: [&str; 5] = [
    "What are three things you're grateful for today?",
    "Describe a challenge you overcame recently.",
    "What's a goal you're working towards? How are you progressing?",
    "Write about a person who has positively influenced your life.",
    "Describe your ideal day. What would you do?",
];

/// Picks one of [`JOURNALING_PROMPTS`] at random.
pub fn random_prompt<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    JOURNALING_PROMPTS
        .choose(rng)
        .copied()
        .unwrap_or(JOURNALING_PROMPTS[0])
}

/// [`random_prompt`] with the thread-local generator.
pub fn any_prompt() -> &'static str {
    random_prompt(&mut rand::thread_rng())
}
