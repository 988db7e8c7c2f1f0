use std::sync::Arc;

use tracing::info;

use crate::catalog::{CatalogSource, FileCatalogSource};
use crate::config::Config;
use crate::errors::AppError;
use crate::matching::match_clubs;
use crate::models::{Catalog, EligibilityCode, MatchResult};
use crate::quiz::{QuizEngine, Questionnaire, SearchRequest};
use crate::resume::{KeywordTagExtractor, ResumeDocument, TagExtractor};
use crate::taxonomy::Taxonomy;

/// Shared session host handed to the popup's presentation layer.
/// The catalog and taxonomy are loaded once; quiz sessions are created per user flow.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub taxonomy: Arc<Taxonomy>,
    pub catalog: Arc<Catalog>,
    /// Pluggable tag extractor. Default: KeywordTagExtractor over the taxonomy's dictionary.
    pub extractor: Arc<dyn TagExtractor>,
}

impl AppState {
    /// Loads taxonomy (file or built-in) and the catalog file named by `config`.
    pub async fn load(config: Config) -> Result<Self, AppError> {
        let source = FileCatalogSource::new(config.catalog_path.clone());
        Self::load_with_source(config, &source).await
    }

    pub async fn load_with_source(
        config: Config,
        source: &dyn CatalogSource,
    ) -> Result<Self, AppError> {
        let taxonomy = match &config.taxonomy_path {
            Some(path) => Taxonomy::load(path).await?,
            None => {
                let builtin = Taxonomy::builtin();
                builtin.validate()?;
                info!("Using built-in taxonomy");
                builtin
            }
        };
        let catalog = source.load().await?;
        Ok(Self::new(config, taxonomy, catalog))
    }

    pub fn new(config: Config, taxonomy: Taxonomy, catalog: Catalog) -> Self {
        let extractor = KeywordTagExtractor::with_limits(
            &taxonomy.keywords,
            config.max_resume_tags,
            config.min_resume_score,
        );
        Self {
            config,
            taxonomy: Arc::new(taxonomy),
            catalog: Arc::new(catalog),
            extractor: Arc::new(extractor),
        }
    }

    pub fn start_quiz(&self) -> QuizEngine {
        QuizEngine::new(Arc::clone(&self.taxonomy))
    }

    pub fn start_questionnaire(&self) -> Questionnaire {
        Questionnaire::new(Arc::clone(&self.taxonomy))
    }

    pub fn extract_resume_tags(&self, text: &str) -> Vec<String> {
        self.extractor.extract_tags(text)
    }

    /// Decodes an uploaded resume and turns it into a search request.
    /// An empty tag list means the UI should fall back to the quiz.
    pub async fn resume_search_request(
        &self,
        document: ResumeDocument,
        eligibility: Option<EligibilityCode>,
    ) -> Result<SearchRequest, AppError> {
        let text = document.decode().await?;
        Ok(SearchRequest {
            tags: self.extract_resume_tags(&text),
            eligibility,
        })
    }

    /// Checks the search preconditions, then runs the matcher against the session catalog.
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<MatchResult>, AppError> {
        let eligibility = request.eligibility.ok_or(AppError::MissingEligibility)?;
        if request.tags.is_empty() {
            return Err(AppError::EmptyTagSet);
        }
        Ok(match_clubs(&self.catalog, &request.tags, eligibility))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::JsonCatalogSource;
    use serde_json::json;
    use std::io::Write;

    fn sample_source() -> JsonCatalogSource {
        JsonCatalogSource(json!([
            {"mentorship": [
                ["Peer Mentors", "@peers", "Tutor first-years", "peers@uni.edu"],
                ["Big Sisters", "@bigsis", "Mentoring circle", "", "**"]
            ]},
            {"volunteering": [
                ["Helpers", "@helpers", "Help out", "", ""],
                ["Peer Mentors", "@peers", "Also volunteers", ""]
            ]},
            {"music": [["Band", "@band"]]}
        ]))
    }

    async fn state() -> AppState {
        AppState::load_with_source(Config::default(), &sample_source())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_quiz_to_results() {
        let state = state().await;
        let mut quiz = state.start_quiz();
        for value in ["Male", "purpose", "impact", "#11"] {
            quiz.advance(value).unwrap();
        }
        let results = state.search(&quiz.search_request()).unwrap();
        let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
        // Big Sisters is restricted to "**"; Peer Mentors is deduplicated
        assert_eq!(names, vec!["Peer Mentors", "Helpers"]);
        assert_eq!(results[0].description, "Tutor first-years");
    }

    #[tokio::test]
    async fn test_same_quiz_path_for_group_b_sees_restricted_club() {
        let state = state().await;
        let mut quiz = state.start_quiz();
        for value in ["Female", "purpose", "impact", "#11"] {
            quiz.advance(value).unwrap();
        }
        let results = state.search(&quiz.search_request()).unwrap();
        assert!(results.iter().any(|r| r.name == "Big Sisters"));
    }

    #[tokio::test]
    async fn test_questionnaire_to_results() {
        let state = state().await;
        let mut sheet = state.start_questionnaire();
        sheet.answer("gender", &["LGBTQ+"]).unwrap();
        sheet
            .answer("goal", &["Volunteering or making an impact"])
            .unwrap();
        let results = state.search(&sheet.collect()).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_search_requires_eligibility_first() {
        let state = state().await;
        let err = state.search(&SearchRequest::default()).unwrap_err();
        assert!(matches!(err, AppError::MissingEligibility));
    }

    #[tokio::test]
    async fn test_search_requires_tags() {
        let state = state().await;
        let request = SearchRequest {
            tags: vec![],
            eligibility: Some(EligibilityCode::Other),
        };
        assert!(matches!(state.search(&request), Err(AppError::EmptyTagSet)));
    }

    #[tokio::test]
    async fn test_resume_flow() {
        let state = state().await;
        let document = ResumeDocument::PlainText(
            "Volunteer tutor. Volunteered at shelters, volunteer lead. Peer mentor.".to_string(),
        );
        let request = state
            .resume_search_request(document, Some(EligibilityCode::Other))
            .await
            .unwrap();
        assert_eq!(request.tags, vec!["volunteering", "mentorship"]);
        let results = state.search(&request).unwrap();
        let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
        // catalog order wins over tag order
        assert_eq!(names, vec!["Peer Mentors", "Helpers"]);
    }

    #[tokio::test]
    async fn test_resume_without_keywords_falls_back() {
        let state = state().await;
        let request = state
            .resume_search_request(
                ResumeDocument::PlainText("Barista".to_string()),
                Some(EligibilityCode::Other),
            )
            .await
            .unwrap();
        assert!(request.tags.is_empty());
        assert!(matches!(state.search(&request), Err(AppError::EmptyTagSet)));
    }

    #[tokio::test]
    async fn test_config_limits_reach_extractor() {
        let config = Config {
            max_resume_tags: 1,
            ..Config::default()
        };
        let state = AppState::load_with_source(config, &sample_source())
            .await
            .unwrap();
        let tags = state.extract_resume_tags("volunteer volunteer mentor");
        assert_eq!(tags, vec!["volunteering"]);
    }

    #[tokio::test]
    async fn test_load_from_files() {
        let mut catalog_file = tempfile::NamedTempFile::new().unwrap();
        write!(catalog_file, r#"[{{"running": [["Run Club", "@run"]]}}]"#).unwrap();

        let mut taxonomy_file = tempfile::NamedTempFile::new().unwrap();
        write!(
            taxonomy_file,
            r#"{{"tree": {{"root": "q", "steps": {{
                "q": {{"kind": "question", "id": "q", "title": "Run?", "on_select": "set_eligibility",
                       "options": [{{"label": "Yes", "value": "Male", "next": "done"}}]}},
                "done": {{"kind": "leaf", "tags": ["running"]}}
            }}}}}}"#
        )
        .unwrap();

        let config = Config {
            catalog_path: catalog_file.path().to_path_buf(),
            taxonomy_path: Some(taxonomy_file.path().to_path_buf()),
            ..Config::default()
        };
        let state = AppState::load(config).await.unwrap();
        let mut quiz = state.start_quiz();
        quiz.advance("Male").unwrap();
        let results = state.search(&quiz.search_request()).unwrap();
        assert_eq!(results[0].name, "Run Club");
    }

    #[tokio::test]
    async fn test_invalid_taxonomy_file_fails_load() {
        let mut taxonomy_file = tempfile::NamedTempFile::new().unwrap();
        write!(
            taxonomy_file,
            r#"{{"tree": {{"root": "missing", "steps": {{}}}}}}"#
        )
        .unwrap();
        let config = Config {
            taxonomy_path: Some(taxonomy_file.path().to_path_buf()),
            ..Config::default()
        };
        let err = AppState::load_with_source(config, &sample_source())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Taxonomy(_)));
    }
}
