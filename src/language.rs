//! ISO 639-1 two-letter language codes.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};
use thiserror::Error;

/// Error returned when a string is not a known two-letter code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown language code: '{0}'")]
pub struct UnknownLanguageError(pub String);

/// Defines [`Language`] together with its code and name tables.
macro_rules! languages {
    ($($variant:ident => $code:literal, $name:literal;)*) => {
        /// A language of the two-letter code catalog.
        ///
        /// A few entries keep their legacy codes (`iw`, `in`, `ji`, `jw`, `mo`, `sh`).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Language {
            $(
                #[doc = $name]
                $variant,
            )*
        }

        impl Language {
            /// Every language of the catalog, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Two-letter code, e.g. `"en"`.
            #[must_use]
            pub const fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)*
                }
            }

            /// English name, e.g. `"English"`.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// Looks up an exact two-letter code. Returns `None` for unknown codes.
            #[must_use]
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

languages! {
    Abkhazian => "ab", "Abkhazian";
    Afar => "aa", "Afar";
    Afrikaans => "af", "Afrikaans";
    Albanian => "sq", "Albanian";
    Amharic => "am", "Amharic";
    Arabic => "ar", "Arabic";
    Armenian => "hy", "Armenian";
    Assamese => "as", "Assamese";
    Aymara => "ay", "Aymara";
    Azerbaijani => "az", "Azerbaijani";
    Bashkir => "ba", "Bashkir";
    Basque => "eu", "Basque";
    Bengali => "bn", "Bengali";
    Bhutani => "dz", "Bhutani";
    Bihari => "bh", "Bihari";
    Bislama => "bi", "Bislama";
    Breton => "br", "Breton";
    Bulgarian => "bg", "Bulgarian";
    Burmese => "my", "Burmese";
    Byelorussian => "be", "Byelorussian";
    Cambodian => "km", "Cambodian";
    Catalan => "ca", "Catalan";
    Chinese => "zh", "Chinese";
    Corsican => "co", "Corsican";
    Croatian => "hr", "Croatian";
    Czech => "cs", "Czech";
    Danish => "da", "Danish";
    Dutch => "nl", "Dutch";
    English => "en", "English";
    Esperanto => "eo", "Esperanto";
    Estonian => "et", "Estonian";
    Faeroese => "fo", "Faeroese";
    Fiji => "fj", "Fiji";
    Finnish => "fi", "Finnish";
    French => "fr", "French";
    Frisian => "fy", "Frisian";
    Gaelic => "gd", "Gaelic";
    Galician => "gl", "Galician";
    Georgian => "ka", "Georgian";
    German => "de", "German";
    Greek => "el", "Greek";
    Greenlandic => "kl", "Greenlandic";
    Guarani => "gn", "Guarani";
    Gujarati => "gu", "Gujarati";
    Hausa => "ha", "Hausa";
    Hebrew => "iw", "Hebrew";
    Hindi => "hi", "Hindi";
    Hungarian => "hu", "Hungarian";
    Icelandic => "is", "Icelandic";
    Indonesian => "in", "Indonesian";
    Interlingua => "ia", "Interlingua";
    Interlingue => "ie", "Interlingue";
    Inupiak => "ik", "Inupiak";
    Irish => "ga", "Irish";
    Italian => "it", "Italian";
    Japanese => "ja", "Japanese";
    Javanese => "jw", "Javanese";
    Kannada => "kn", "Kannada";
    Kashmiri => "ks", "Kashmiri";
    Kazakh => "kk", "Kazakh";
    Kinyarwanda => "rw", "Kinyarwanda";
    Kirghiz => "ky", "Kirghiz";
    Kirundi => "rn", "Kirundi";
    Korean => "ko", "Korean";
    Kurdish => "ku", "Kurdish";
    Laothian => "lo", "Laothian";
    Latin => "la", "Latin";
    Latvian => "lv", "Latvian";
    Lingala => "ln", "Lingala";
    Lithuanian => "lt", "Lithuanian";
    Macedonian => "mk", "Macedonian";
    Malagasy => "mg", "Malagasy";
    Malay => "ms", "Malay";
    Malayalam => "ml", "Malayalam";
    Maltese => "mt", "Maltese";
    Maori => "mi", "Maori";
    Marathi => "mr", "Marathi";
    Moldavian => "mo", "Moldavian";
    Mongolian => "mn", "Mongolian";
    Nauru => "na", "Nauru";
    Nepali => "ne", "Nepali";
    Norwegian => "no", "Norwegian";
    Occitan => "oc", "Occitan";
    Oriya => "or", "Oriya";
    Oromo => "om", "Oromo";
    Pashto => "ps", "Pashto";
    Persian => "fa", "Persian";
    Polish => "pl", "Polish";
    Portuguese => "pt", "Portuguese";
    Punjabi => "pa", "Punjabi";
    Quechua => "qu", "Quechua";
    RhaetoRomance => "rm", "Rhaeto-Romance";
    Romanian => "ro", "Romanian";
    Russian => "ru", "Russian";
    Samoan => "sm", "Samoan";
    Sango => "sg", "Sango";
    Sanskrit => "sa", "Sanskrit";
    Serbian => "sr", "Serbian";
    SerboCroatian => "sh", "Serbo-Croatian";
    Sesotho => "st", "Sesotho";
    Setswana => "tn", "Setswana";
    Shona => "sn", "Shona";
    Sindhi => "sd", "Sindhi";
    Singhalese => "si", "Singhalese";
    Siswati => "ss", "Siswati";
    Slovak => "sk", "Slovak";
    Slovenian => "sl", "Slovenian";
    Somali => "so", "Somali";
    Spanish => "es", "Spanish";
    Sundanese => "su", "Sundanese";
    Swahili => "sw", "Swahili";
    Swedish => "sv", "Swedish";
    Tagalog => "tl", "Tagalog";
    Tajik => "tg", "Tajik";
    Tamil => "ta", "Tamil";
    Tatar => "tt", "Tatar";
    Telugu => "te", "Telugu";
    Thai => "th", "Thai";
    Tibetan => "bo", "Tibetan";
    Tigrinya => "ti", "Tigrinya";
    Tonga => "to", "Tonga";
    Tsonga => "ts", "Tsonga";
    Turkish => "tr", "Turkish";
    Turkmen => "tk", "Turkmen";
    Twi => "tw", "Twi";
    Ukrainian => "uk", "Ukrainian";
    Urdu => "ur", "Urdu";
    Uzbek => "uz", "Uzbek";
    Vietnamese => "vi", "Vietnamese";
    Volapuk => "vo", "Volapuk";
    Welsh => "cy", "Welsh";
    Wolof => "wo", "Wolof";
    Xhosa => "xh", "Xhosa";
    Yiddish => "ji", "Yiddish";
    Yoruba => "yo", "Yoruba";
    Zulu => "zu", "Zulu";
}

impl Language {
    /// Resolves the primary subtag of a language tag such as `en-US` or `pt_BR`.
    ///
    /// Matching is case-insensitive.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next()?;
        Self::from_code(&primary.to_lowercase())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownLanguageError(s.to_string()))
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case(Language::English, "en", "English")]
    #[case(Language::French, "fr", "French")]
    #[case(Language::Irish, "ga", "Irish")]
    #[case(Language::RhaetoRomance, "rm", "Rhaeto-Romance")]
    #[case(Language::SerboCroatian, "sh", "Serbo-Croatian")]
    #[case(Language::Hebrew, "iw", "Hebrew")]
    fn code_and_name(#[case] language: Language, #[case] code: &str, #[case] name: &str) {
        assert_that!(language.code(), eq(code));
        assert_that!(language.name(), eq(name));
        assert_that!(language.to_string(), eq(name));
        assert_eq!(Language::from_code(code), Some(language));
    }

    #[rstest]
    #[case::unknown("xx")]
    #[case::upper_case("EN")]
    #[case::empty("")]
    #[case::three_letters("eng")]
    fn from_code_rejects_unrecognized(#[case] code: &str) {
        assert_eq!(Language::from_code(code), None);
        let error = code.parse::<Language>().unwrap_err();
        assert_that!(error.to_string(), contains_substring("Unknown language code"));
    }

    #[rstest]
    #[case("en-US", Some(Language::English))]
    #[case("pt_BR", Some(Language::Portuguese))]
    #[case("DE", Some(Language::German))]
    #[case("zz-ZZ", None)]
    fn from_tag_uses_primary_subtag(#[case] tag: &str, #[case] expected: Option<Language>) {
        assert_eq!(Language::from_tag(tag), expected);
    }

    #[rstest]
    fn catalog_codes_are_unique_and_round_trip() {
        let codes: HashSet<&str> = Language::ALL.iter().map(|language| language.code()).collect();

        assert_that!(Language::ALL.len(), eq(136));
        assert_that!(codes.len(), eq(Language::ALL.len()));
        for language in Language::ALL {
            assert_eq!(Language::from_code(language.code()), Some(*language));
        }
    }

    #[rstest]
    fn serde_uses_two_letter_code() {
        let json = serde_json::to_string(&Language::Japanese).unwrap();
        let decoded: Language = serde_json::from_str("\"cy\"").unwrap();

        assert_that!(json, eq("\"ja\""));
        assert_eq!(decoded, Language::Welsh);
        assert!(serde_json::from_str::<Language>("\"??\"").is_err());
    }
}
