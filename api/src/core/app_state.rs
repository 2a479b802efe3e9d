use std::path::Path;

use ai_llm_service::{ChatCompletion, LlmService, config_from_lookup};
use story_generator::GeneratorConfig;
use story_validator::{ComponentInventory, Validator, ValidatorConfig};
use tracing::{info, warn};

use crate::error_handler::AppResult;

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Discovery snapshot; replaced only by restarting the process.
    pub inventory: ComponentInventory,
    /// Validator built from `STORY_*` variables.
    pub validator: Validator,
    /// `None` when `LLM_KIND` is unset; `/story/generate` then answers 503.
    pub llm: Option<LlmService>,
    pub generator: GeneratorConfig,
}

impl AppState {
    pub fn new(
        inventory: ComponentInventory,
        validator: Validator,
        llm: Option<LlmService>,
        generator: GeneratorConfig,
    ) -> Self {
        Self {
            inventory,
            validator,
            llm,
            generator,
        }
    }

    /// Load shared state from environment variables.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// # Errors
    /// `AppError::Config` for unreadable inventories, bad numbers or an
    /// unsupported provider.
    pub fn from_lookup<F>(get: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let inventory = match get("COMPONENT_INVENTORY_PATH").filter(|p| !p.trim().is_empty()) {
            Some(path) => ComponentInventory::load(Path::new(path.trim()))?,
            None => {
                warn!("COMPONENT_INVENTORY_PATH not set, every named import will be rejected");
                ComponentInventory::default()
            }
        };

        let validator = Validator::new(ValidatorConfig::from_lookup(&get)?)?;
        let generator = GeneratorConfig::from_lookup(&get)?;
        let llm = config_from_lookup(&get)?.map(LlmService::new).transpose()?;

        match &llm {
            Some(svc) => info!(provider = %svc.provider(), model = svc.model_name(), "generation enabled"),
            None => info!("LLM_KIND not set, generation disabled"),
        }
        info!(
            components = inventory.len(),
            primary = %validator.config().primary_import_path,
            "app state ready"
        );

        Ok(Self::new(inventory, validator, llm, generator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: Vec<(&'static str, String)>) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<&str, String> = pairs.into_iter().collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let state = AppState::from_lookup(lookup(Vec::new())).unwrap();
        assert!(state.inventory.is_empty());
        assert!(state.llm.is_none());
        assert_eq!(state.validator.config().primary_import_path, "@mantine/core");
    }

    #[test]
    fn loads_inventory_and_llm() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "Button", "importPath": "@mantine/core"}}]"#).unwrap();

        let state = AppState::from_lookup(lookup(vec![
            ("COMPONENT_INVENTORY_PATH", file.path().display().to_string()),
            ("LLM_KIND", "ollama".into()),
            ("LLM_MODEL", "qwen2.5-coder".into()),
            ("STORY_MAX_ATTEMPTS", "2".into()),
        ]))
        .unwrap();
        assert!(state.inventory.contains("Button"));
        assert_eq!(state.llm.as_ref().map(|l| l.model_name()), Some("qwen2.5-coder"));
        assert_eq!(state.generator.max_attempts, 2);
    }

    #[test]
    fn missing_inventory_file_is_config_error() {
        let res = AppState::from_lookup(lookup(vec![(
            "COMPONENT_INVENTORY_PATH",
            "/definitely/not/here.json".into(),
        )]));
        assert!(matches!(res, Err(crate::error_handler::AppError::Config(_))));
    }
}
