//! Built-in habit templates.

use serde::Serialize;

use crate::error::ValidationError;
use crate::habit::NewHabit;
use crate::period::GoalPeriod;
use crate::streak::Frequency;

/// A predefined habit blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
    pub tags: &'static [&'static str],
    pub frequency: Frequency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_target: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_period: Option<GoalPeriod>,
}

impl HabitTemplate {
    /// Draft a new habit from this template.
    pub fn new_habit(&self) -> NewHabit {
        NewHabit {
            title: self.title.to_string(),
            description: Some(self.description.to_string()),
            category: Some(self.category.to_string()),
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            frequency: self.frequency,
            goal_target: self.goal_target.map(i64::from),
            goal_period: self.goal_period,
        }
    }
}

pub const HABIT_TEMPLATES: &[HabitTemplate] = &[
    HabitTemplate {
        id: "morning-exercise",
        title: "Morning Exercise",
        description: "Start your day with energizing physical activity",
        icon: "🏃",
        category: "Fitness",
        tags: &["health", "morning-routine", "exercise"],
        frequency: Frequency::Daily,
        goal_target: Some(5),
        goal_period: Some(GoalPeriod::Week),
    },
    HabitTemplate {
        id: "meditation",
        title: "Daily Meditation",
        description: "Practice mindfulness and reduce stress",
        icon: "🧘",
        category: "Mindfulness",
        tags: &["mental-health", "wellness", "mindfulness"],
        frequency: Frequency::Daily,
        goal_target: Some(1),
        goal_period: Some(GoalPeriod::Day),
    },
    HabitTemplate {
        id: "reading",
        title: "Reading Time",
        description: "Read books to expand knowledge and imagination",
        icon: "📚",
        category: "Learning",
        tags: &["education", "personal-development", "reading"],
        frequency: Frequency::Daily,
        goal_target: Some(30),
        goal_period: Some(GoalPeriod::Week),
    },
    HabitTemplate {
        id: "water-intake",
        title: "Stay Hydrated",
        description: "Drink water regularly throughout the day",
        icon: "💧",
        category: "Health",
        tags: &["health", "wellness", "hydration"],
        frequency: Frequency::Daily,
        goal_target: Some(8),
        goal_period: Some(GoalPeriod::Day),
    },
    HabitTemplate {
        id: "gratitude-journal",
        title: "Gratitude Journal",
        description: "Write down things you are grateful for",
        icon: "📔",
        category: "Personal Development",
        tags: &["mindfulness", "journaling", "mental-health"],
        frequency: Frequency::Daily,
        goal_target: Some(1),
        goal_period: Some(GoalPeriod::Day),
    },
    HabitTemplate {
        id: "coding-practice",
        title: "Coding Practice",
        description: "Improve programming skills with regular practice",
        icon: "💻",
        category: "Learning",
        tags: &["education", "programming", "skills"],
        frequency: Frequency::Daily,
        goal_target: Some(5),
        goal_period: Some(GoalPeriod::Week),
    },
];

pub fn template_by_id(id: &str) -> Option<&'static HabitTemplate> {
    HABIT_TEMPLATES.iter().find(|t| t.id == id)
}

pub fn templates_by_category(category: &str) -> Vec<&'static HabitTemplate> {
    HABIT_TEMPLATES.iter().filter(|t| t.category == category).collect()
}

/// Distinct categories in catalogue order.
pub fn template_categories() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for template in HABIT_TEMPLATES {
        if !seen.contains(&template.category) {
            seen.push(template.category);
        }
    }
    seen
}

/// # Errors
///
/// Returns [`ValidationError::UnknownTemplate`] for an unknown id.
pub fn new_habit_from_template(id: &str) -> Result<NewHabit, ValidationError> {
    template_by_id(id)
        .map(HabitTemplate::new_habit)
        .ok_or_else(|| ValidationError::UnknownTemplate(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<_> = HABIT_TEMPLATES.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), HABIT_TEMPLATES.len());
    }

    #[test]
    fn lookup_by_category() {
        let learning = templates_by_category("Learning");
        assert_eq!(learning.len(), 2);
        assert!(templates_by_category("Cooking").is_empty());
    }

    #[test]
    fn categories_keep_catalogue_order() {
        assert_eq!(
            template_categories(),
            vec!["Fitness", "Mindfulness", "Learning", "Health", "Personal Development"]
        );
    }

    #[test]
    fn new_habit_copies_goal() {
        let habit = new_habit_from_template("water-intake").unwrap();
        assert_eq!(habit.title, "Stay Hydrated");
        assert_eq!(habit.goal_target, Some(8));
        assert_eq!(habit.goal_period, Some(GoalPeriod::Day));
        assert_eq!(habit.tags.len(), 3);
    }

    #[test]
    fn unknown_template_is_an_error() {
        assert_eq!(
            new_habit_from_template("skydiving"),
            Err(ValidationError::UnknownTemplate("skydiving".into()))
        );
    }
}
