//! The user-editable summary configuration: subjects plus language direction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed list of languages offered for source and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Chinese,
    Japanese,
    Korean,
    Arabic,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Chinese,
        Language::Japanese,
        Language::Korean,
        Language::Arabic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Chinese => "Chinese",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
            Language::Arabic => "Arabic",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Language::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let names: Vec<_> = Language::ALL.iter().map(|l| l.name()).collect();
                format!("unknown language '{wanted}', expected one of: {}", names.join(", "))
            })
    }
}

/// Subjects to focus on and the language direction of the resume.
/// Duplicated subjects are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequestConfig {
    pub subjects: Vec<String>,
    pub source_language: Language,
    pub target_language: Language,
}

impl SummaryRequestConfig {
    /// Appends the trimmed subject. Blank input is ignored; returns whether
    /// anything was added.
    pub fn add_subject(&mut self, subject: &str) -> bool {
        let subject = subject.trim();
        if subject.is_empty() {
            return false;
        }
        self.subjects.push(subject.to_string());
        true
    }

    /// Removes the subject at `index`; out-of-range indexes change nothing.
    pub fn remove_subject(&mut self, index: usize) -> Option<String> {
        (index < self.subjects.len()).then(|| self.subjects.remove(index))
    }

    pub fn set_source_language(&mut self, language: Language) {
        self.source_language = language;
    }

    pub fn set_target_language(&mut self, language: Language) {
        self.target_language = language;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_english_without_subjects() {
        let config = SummaryRequestConfig::default();
        assert!(config.subjects.is_empty());
        assert_eq!(config.source_language, Language::English);
        assert_eq!(config.target_language, Language::English);
    }

    #[test]
    fn test_add_subject_trims_and_ignores_blank() {
        let mut config = SummaryRequestConfig::default();
        assert!(config.add_subject("  Thermodynamics "));
        assert!(!config.add_subject("   "));
        assert_eq!(config.subjects, vec!["Thermodynamics"]);
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut config = SummaryRequestConfig::default();
        config.add_subject("Optics");
        config.add_subject("Optics");
        assert_eq!(config.subjects.len(), 2);
    }

    #[test]
    fn test_remove_subject_by_index() {
        let mut config = SummaryRequestConfig::default();
        config.add_subject("A");
        config.add_subject("B");
        config.add_subject("C");
        assert_eq!(config.remove_subject(1), Some("B".to_string()));
        assert_eq!(config.subjects, vec!["A", "C"]);
        assert_eq!(config.remove_subject(7), None);
        assert_eq!(config.subjects.len(), 2);
    }

    #[test]
    fn test_language_parse_case_insensitive() {
        assert_eq!("japanese".parse::<Language>().unwrap(), Language::Japanese);
        assert_eq!(" ARABIC ".parse::<Language>().unwrap(), Language::Arabic);
        let err = "Klingon".parse::<Language>().unwrap_err();
        assert!(err.contains("Klingon"));
    }

    #[test]
    fn test_serializes_camel_case_with_language_names() {
        let mut config = SummaryRequestConfig::default();
        config.set_target_language(Language::German);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["sourceLanguage"], "English");
        assert_eq!(value["targetLanguage"], "German");
    }
}
