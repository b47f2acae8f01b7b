//! Built-in habit template commands for CLI.

use clap::Subcommand;
use habitrack_core::templates::{new_habit_from_template, template_categories, templates_by_category};
use habitrack_core::HABIT_TEMPLATES;

#[derive(Subcommand)]
pub enum TemplateAction {
    /// List templates
    List {
        /// Only templates in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Show the habit draft a template produces
    Show {
        /// Template id (e.g. "meditation")
        id: String,
    },
    /// List template categories
    Categories,
}

pub fn run(action: TemplateAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TemplateAction::List { category } => {
            let templates = match category {
                Some(category) => templates_by_category(&category),
                None => HABIT_TEMPLATES.iter().collect(),
            };
            println!("{}", serde_json::to_string_pretty(&templates)?);
        }
        TemplateAction::Show { id } => {
            let draft = new_habit_from_template(&id)?;
            println!("{}", serde_json::to_string_pretty(&draft)?);
        }
        TemplateAction::Categories => {
            println!("{}", serde_json::to_string_pretty(&template_categories())?);
        }
    }
    Ok(())
}
