/// A supported language with display metadata and a speech voice id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 code
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
    /// Prebuilt voice used for speech synthesis
    pub voice: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English", flag: "\u{1F1EC}\u{1F1E7}", voice: "Puck" },
    Language { code: "zh", name: "Chinese", flag: "\u{1F1E8}\u{1F1F3}", voice: "Kore" },
    Language { code: "es", name: "Spanish", flag: "\u{1F1EA}\u{1F1F8}", voice: "Fenrir" },
    Language { code: "fr", name: "French", flag: "\u{1F1EB}\u{1F1F7}", voice: "Charon" },
    Language { code: "de", name: "German", flag: "\u{1F1E9}\u{1F1EA}", voice: "Puck" },
    Language { code: "ja", name: "Japanese", flag: "\u{1F1EF}\u{1F1F5}", voice: "Kore" },
    Language { code: "ko", name: "Korean", flag: "\u{1F1F0}\u{1F1F7}", voice: "Kore" },
    Language { code: "it", name: "Italian", flag: "\u{1F1EE}\u{1F1F9}", voice: "Fenrir" },
    Language { code: "pt", name: "Portuguese", flag: "\u{1F1E7}\u{1F1F7}", voice: "Fenrir" },
    Language { code: "ru", name: "Russian", flag: "\u{1F1F7}\u{1F1FA}", voice: "Charon" },
];

pub fn all() -> &'static [Language] {
    LANGUAGES
}

pub fn get(code: &str) -> Option<Language> {
    LANGUAGES.iter().copied().find(|l| l.code == code)
}

pub fn default_native() -> Language {
    LANGUAGES[0]
}

pub fn default_target() -> Language {
    LANGUAGES[1]
}
