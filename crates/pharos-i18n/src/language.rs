use serde::Serialize;

/// A language the site publishes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    De,
    Fr,
    Es,
    #[serde(rename = "zh-CN")]
    ZhCn,
    Ar,
}

impl Language {
    /// Every language, in the order alternate links are emitted.
    pub const ALL: [Language; 6] = [
        Language::En,
        Language::De,
        Language::Fr,
        Language::Es,
        Language::ZhCn,
        Language::Ar,
    ];

    /// BCP 47 code used in hreflang attributes and path prefixes.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
            Language::Fr => "fr",
            Language::Es => "es",
            Language::ZhCn => "zh-CN",
            Language::Ar => "ar",
        }
    }

    /// Parse a code, case-insensitively. `zh` alone maps to Simplified Chinese.
    pub fn from_code(code: &str) -> Option<Language> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "de" => Some(Language::De),
            "fr" => Some(Language::Fr),
            "es" => Some(Language::Es),
            "zh" | "zh-cn" | "zh_cn" => Some(Language::ZhCn),
            "ar" => Some(Language::Ar),
            _ => None,
        }
    }

    /// Right-to-left script.
    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Ar)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
