// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

const DEFAULT_LANG: &str = "en";

// Extrator de idioma (só a língua principal: "pt-BR" -> "pt")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Locale {
    pub fn from_header(header_str: &str) -> Self {
        let lang = accept_language::parse(header_str)
            .first() // Pega o idioma de maior prioridade
            .map(|tag| tag.split('-').next().unwrap_or(tag).to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_LANG.to_string());

        Locale(lang)
    }

    pub fn is_portuguese(&self) -> bool {
        self.0 == "pt"
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANG.to_string())
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .map(Locale::from_header)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_primary_language_of_the_best_tag() {
        assert_eq!(Locale::from_header("pt-BR,pt;q=0.9,en;q=0.8"), Locale("pt".into()));
        assert_eq!(Locale::from_header("en-US"), Locale("en".into()));
        assert_eq!(Locale::from_header("de;q=0.5,pt;q=0.9"), Locale("pt".into()));
        assert_eq!(Locale::from_header(""), Locale::default());
    }
}
