// src/models/subject.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::{html::clean_text, slug::slugify};

/// Icons an admin can pick for a subject card.
pub const ICON_OPTIONS: &[&str] = &["Calculator", "Atom", "Globe", "BookOpen", "Zap", "Flask"];

/// Tailwind color tokens an admin can pick for a subject card.
pub const COLOR_OPTIONS: &[&str] = &[
    "bg-blue-500",
    "bg-green-500",
    "bg-orange-500",
    "bg-purple-500",
    "bg-red-500",
    "bg-pink-500",
];

/// A subject shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Subject {
    /// Slug derived from the name. Not guaranteed unique.
    pub id: String,
    pub name: String,
    /// Icon token, rendered by the client.
    pub icon: String,
    /// Color token, rendered by the client.
    pub color: String,
}

impl Subject {
    pub fn new(name: &str, icon: &str, color: &str) -> Self {
        Self {
            id: slugify(name),
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
        }
    }

    /// Subjects present before any admin edits.
    pub fn defaults() -> Vec<Subject> {
        vec![
            Subject::new("Maths", "Calculator", "bg-blue-500"),
            Subject::new("Biology", "Atom", "bg-green-500"),
            Subject::new("Physics", "Zap", "bg-purple-500"),
            Subject::new("Chemistry", "Flask", "bg-orange-500"),
        ]
    }
}

/// DTO for the add-subject form.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubjectRequest {
    #[validate(length(min = 1, max = 50), custom(function = validate_not_blank))]
    pub name: String,
    #[validate(custom(function = validate_icon))]
    pub icon: String,
    #[validate(custom(function = validate_color))]
    pub color: String,
}

impl CreateSubjectRequest {
    /// Builds the subject from an already validated form. The id is slugged
    /// from the name as typed; only the display name is sanitized.
    pub fn into_subject(self) -> Subject {
        let name = self.name.trim();
        Subject {
            id: slugify(name),
            name: clean_text(name),
            icon: self.icon,
            color: self.color,
        }
    }
}

/// Selectable values for the add-subject form.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectOptions {
    pub icons: Vec<String>,
    pub colors: Vec<String>,
}

impl SubjectOptions {
    pub fn all() -> Self {
        Self {
            icons: ICON_OPTIONS.iter().map(|s| s.to_string()).collect(),
            colors: COLOR_OPTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub(crate) fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("must_not_be_blank"));
    }
    Ok(())
}

fn validate_icon(icon: &str) -> Result<(), validator::ValidationError> {
    if !ICON_OPTIONS.contains(&icon) {
        return Err(validator::ValidationError::new("unknown_icon"));
    }
    Ok(())
}

fn validate_color(color: &str) -> Result<(), validator::ValidationError> {
    if !COLOR_OPTIONS.contains(&color) {
        return Err(validator::ValidationError::new("unknown_color"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, icon: &str, color: &str) -> CreateSubjectRequest {
        CreateSubjectRequest {
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
        }
    }

    #[test]
    fn test_defaults_have_slug_ids() {
        let ids: Vec<String> = Subject::defaults().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["maths", "biology", "physics", "chemistry"]);
    }

    #[test]
    fn test_create_subject_derives_id() {
        let req = request("Computer Science", "Globe", "bg-red-500");
        assert!(req.validate().is_ok());
        let subject = req.into_subject();
        assert_eq!(subject.id, "computer-science");
        assert_eq!(subject.name, "Computer Science");
    }

    #[test]
    fn test_create_subject_keeps_symbols_in_id_and_name() {
        let subject = request(" Art & Design ", "Globe", "bg-pink-500").into_subject();
        assert_eq!(subject.id, "art-&-design");
        assert_eq!(subject.name, "Art & Design");

        let subject = request("<b>Latin</b>", "Globe", "bg-pink-500").into_subject();
        assert_eq!(subject.name, "Latin");
    }

    #[test]
    fn test_create_subject_rejects_blank_name() {
        assert!(request("   ", "Globe", "bg-red-500").validate().is_err());
        assert!(request("", "Globe", "bg-red-500").validate().is_err());
    }

    #[test]
    fn test_create_subject_rejects_unknown_tokens() {
        assert!(request("Art", "Rocket", "bg-red-500").validate().is_err());
        assert!(request("Art", "Globe", "bg-black").validate().is_err());
    }
}
