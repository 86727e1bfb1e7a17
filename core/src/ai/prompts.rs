//! Prompt builders and fallback copy
//!
//! The exact strings the product ships. Wording changes here change
//! user-visible output, so tests pin the important ones.

use wellness_companion_shared::{DailyMetrics, MoodEntry, MoodType};

use super::client::ChatMessage;

// ============================================================================
// Motivation
// ============================================================================

pub const MOTIVATION_SYSTEM: &str =
    "You are a compassionate wellness coach who provides personalized motivational messages.";

/// Shown when the completion call fails
pub const MOTIVATION_FALLBACK: &str = "You are stronger than you think, braver than you feel, and more loved than you know. Today is a new opportunity to grow and shine.";

/// Build the motivation request, personalized by current mood when set
pub fn motivation_messages(mood: Option<MoodType>) -> Vec<ChatMessage> {
    let prompt = match mood {
        Some(mood) => format!(
            "Generate a personalized, uplifting motivational message for someone feeling {mood}. Make it warm, encouraging, and actionable. Keep it under 100 words."
        ),
        None => "Generate an inspiring daily affirmation for mental wellness and personal growth. Make it positive and empowering. Keep it under 100 words.".to_string(),
    };
    vec![
        ChatMessage::system(MOTIVATION_SYSTEM),
        ChatMessage::user(prompt),
    ]
}

// ============================================================================
// Mood Insight
// ============================================================================

pub const INSIGHT_SYSTEM: &str =
    "You are a mental wellness expert providing personalized insights based on mood patterns.";

/// Shown when the completion call fails
pub const INSIGHT_FALLBACK: &str = "Remember that every small step counts in your wellness journey. Consistency in self-care, even for just a few minutes daily, can create meaningful positive changes over time.";

/// Build the insight request from recent mood entries (oldest first)
pub fn insight_messages(recent: &[MoodEntry]) -> Vec<ChatMessage> {
    let moods = recent
        .iter()
        .map(|entry| entry.mood.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let prompt = format!(
        "Based on these recent mood entries: {moods}, provide a brief, encouraging wellness insight or tip. Focus on patterns and actionable advice. Keep it under 80 words."
    );
    vec![
        ChatMessage::system(INSIGHT_SYSTEM),
        ChatMessage::user(prompt),
    ]
}

// ============================================================================
// Coach
// ============================================================================

/// Shown in place of a coach reply when the completion call fails
pub const COACH_FALLBACK: &str = "I'm sorry, I'm having trouble connecting right now. Please try again in a moment. In the meantime, remember that you're doing great by taking care of your mental health!";

/// Build the coach system prompt, grounded in today's wellness data
pub fn coach_system(mood: Option<MoodType>, metrics: &DailyMetrics) -> ChatMessage {
    let mood_text = mood.map_or("not set".to_string(), |m| m.to_string());
    let context = format!(
        "Current wellness data: Mood: {}, Water: {} glasses, Sleep: {} hours, Exercise: {} minutes, Meals: {}, Stress: {}/5, Energy: {}/5",
        mood_text,
        metrics.water,
        metrics.sleep,
        metrics.exercise,
        metrics.meals,
        metrics.stress,
        metrics.energy,
    );
    ChatMessage::system(format!(
        "You are an AI wellness and motivation coach. You provide personalized, empathetic, and actionable advice to help users improve their mental and physical wellbeing. Keep responses concise but meaningful (2-3 sentences max). Use encouraging language and provide specific, actionable suggestions. {context}"
    ))
}

/// Greeting that opens a coaching session
pub fn coach_welcome(mood: Option<MoodType>) -> String {
    let mood_text = mood.map_or("working on your wellness journey".to_string(), |m| {
        format!("feeling {m}")
    });
    format!(
        "Hi! I'm your AI wellness coach. I can see you're {mood_text} today. How can I help you stay motivated and reach your goals?"
    )
}
