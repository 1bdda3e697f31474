use crate::error::{ConvertError, Result};
use reqwest::Url;
use std::sync::mpsc::Receiver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    About,
    Privacy,
    Contact,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Home, Route::About, Route::Privacy, Route::Contact];

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::About => "About",
            Route::Privacy => "Privacy",
            Route::Contact => "Contact",
        }
    }
}

/// Suggestions computed for the selection with the given generation.
#[derive(Debug, Clone)]
pub struct SuggestionBatch {
    pub generation: u64,
    pub formats: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && self.email.contains('@')
            && !self.message.trim().is_empty()
    }

    /// A `mailto:` link that opens the user's mail client with the form
    /// filled in.
    pub fn mailto(&self, to: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("mailto:{}", to))
            .map_err(|e| ConvertError::Config(format!("invalid contact address: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("subject", &format!("Message from {}", self.name.trim()))
            .append_pair(
                "body",
                &format!(
                    "{}\n\n{} <{}>",
                    self.message.trim(),
                    self.name.trim(),
                    self.email.trim()
                ),
            );
        Ok(url)
    }
}

/// UI-side bookkeeping that is not part of the conversion workflow.
#[derive(Default)]
pub struct UiState {
    pub route: Route,
    /// Generation of the in-flight submission and where its outcome arrives.
    pub conversion: Option<(u64, Receiver<Result<String>>)>,
    pub suggestions: Option<Receiver<SuggestionBatch>>,
    pub notice: Option<String>,
    pub contact: ContactForm,
}

impl UiState {
    pub fn suggestions_pending(&self) -> bool {
        self.suggestions.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_have_titles() {
        let titles: Vec<_> = Route::ALL.iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["Home", "About", "Privacy", "Contact"]);
        assert_eq!(Route::default(), Route::Home);
    }

    #[test]
    fn contact_form_builds_mailto() {
        let form = ContactForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello".to_string(),
        };
        assert!(form.is_complete());

        let url = form.mailto("support@example.com").unwrap();
        assert_eq!(url.scheme(), "mailto");
        assert_eq!(url.path(), "support@example.com");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(pairs[0], ("subject".to_string(), "Message from Ada".to_string()));
        assert_eq!(
            pairs[1],
            ("body".to_string(), "Hello\n\nAda <ada@example.com>".to_string())
        );
    }

    #[test]
    fn incomplete_contact_form() {
        let form = ContactForm {
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
            message: "Hi".to_string(),
        };
        assert!(!form.is_complete());
    }
}
