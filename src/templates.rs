use tera::Tera;

use crate::config::TemplateConfig;
use crate::error::AppError;

/// Initialize the Tera template engine from the configured template directory.
///
/// Fails if the directory holds no `index.html`, since the index route would
/// otherwise error on every request.
pub fn init_templates(config: &TemplateConfig) -> Result<Tera, AppError> {
    let tera = Tera::new(&config.glob())?;

    if !tera.get_template_names().any(|name| name == "index.html") {
        return Err(AppError::Internal(format!(
            "index.html not found in template directory '{}'",
            config.dir
        )));
    }

    Ok(tera)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(dir: &std::path::Path) -> TemplateConfig {
        TemplateConfig {
            dir: dir.display().to_string(),
            static_dir: "static".to_string(),
        }
    }

    #[test]
    fn test_init_templates_loads_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("index.html"),
            "<h1>{{ config.site_name }}</h1>",
        )
        .unwrap();

        let tera = init_templates(&config_for(dir.path())).unwrap();
        assert!(tera.get_template_names().any(|n| n == "index.html"));
    }

    #[test]
    fn test_init_templates_requires_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("other.html"), "hello").unwrap();

        let result = init_templates(&config_for(dir.path()));
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn test_init_templates_reports_syntax_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "{% if %}").unwrap();

        let result = init_templates(&config_for(dir.path()));
        assert!(matches!(result, Err(AppError::Template(_))));
    }
}
