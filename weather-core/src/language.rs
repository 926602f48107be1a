use std::convert::TryFrom;

/// Options offered by the language selector.
///
/// Selection is display-only: every label stays in English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Hindi,
    Chinese,
    Arabic,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Hindi => "Hindi",
            Language::Chinese => "Chinese",
            Language::Arabic => "Arabic",
        }
    }

    pub const fn all() -> &'static [Language] {
        &[
            Language::English,
            Language::Spanish,
            Language::French,
            Language::German,
            Language::Hindi,
            Language::Chinese,
            Language::Arabic,
        ]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Language {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Language::all()
            .iter()
            .copied()
            .find(|l| l.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| {
                let names: Vec<_> = Language::all().iter().map(Language::as_str).collect();
                anyhow::anyhow!(
                    "Unknown language '{value}'. Supported languages: {}.",
                    names.join(", ")
                )
            })
    }
}
