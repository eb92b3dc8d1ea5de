//! User-facing message catalogue.

use std::str::FromStr;

use crate::error::{ErrorKind, QueryError};

/// Language of user-facing messages. Arabic is the product default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    Ar,
    En,
}

impl Locale {
    /// Fixed message for an error kind that carries no detail.
    ///
    /// For [`ErrorKind::Parse`] and [`ErrorKind::Generic`] this is the
    /// fallback used when the underlying failure has no text.
    #[must_use]
    pub fn message(self, kind: ErrorKind) -> &'static str {
        match (self, kind) {
            (Locale::Ar, ErrorKind::Configuration) => {
                "مفتاح API مفقود. يرجى إضافة GEMINI_API_KEY في إعدادات البيئة (Environment Variables) في Netlify وإعادة بناء المشروع (Trigger Deploy)."
            }
            (Locale::Ar, ErrorKind::Credential) => {
                "مفتاح API غير صالح. يرجى التأكد من صحة المفتاح في إعدادات Netlify."
            }
            (Locale::Ar, ErrorKind::Quota) => {
                "تم تجاوز حصة الاستخدام (Quota). يرجى الانتظار قليلاً ثم المحاولة مرة أخرى."
            }
            (Locale::Ar, ErrorKind::Region) => "خدمة Gemini غير متوفرة في منطقتك الحالية حالياً.",
            (Locale::Ar, ErrorKind::EmptyResult) => "لم يتم إرجاع أي نتيجة. حاول مرة أخرى.",
            (Locale::Ar, ErrorKind::Parse | ErrorKind::Generic) => {
                "حدث خطأ أثناء إنشاء التلميحات. يرجى المحاولة مرة أخرى."
            }
            (Locale::En, ErrorKind::Configuration) => {
                "API key is missing. Set GEMINI_API_KEY in the environment and restart."
            }
            (Locale::En, ErrorKind::Credential) => {
                "The API key is invalid. Check the key configured in the environment."
            }
            (Locale::En, ErrorKind::Quota) => {
                "Usage quota exceeded. Please wait a moment and try again."
            }
            (Locale::En, ErrorKind::Region) => "Gemini is not available in your current region.",
            (Locale::En, ErrorKind::EmptyResult) => "No result was returned. Please try again.",
            (Locale::En, ErrorKind::Parse | ErrorKind::Generic) => {
                "Something went wrong while generating clues. Please try again."
            }
        }
    }

    /// Prefix put in front of raw failure text.
    #[must_use]
    pub fn error_prefix(self) -> &'static str {
        match self {
            Locale::Ar => "خطأ",
            Locale::En => "Error",
        }
    }
}

impl FromStr for Locale {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" | "arabic" => Ok(Locale::Ar),
            "en" | "english" => Ok(Locale::En),
            _ => Err(QueryError::UnknownLocale(s.to_string())),
        }
    }
}
