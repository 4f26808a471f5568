use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context as _;
use tracing::warn;

use crate::prompts::TemplateVersion;
use crate::validator::ValidatorConfig;

pub const DEFAULT_PERPLEXITY_URL: &str = "https://api.perplexity.ai/chat/completions";

/// Vendor keys. A missing key disables that vendor; calls to it answer with
/// `<Provider> API key not configured`.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    pub openai: Option<String>,
    pub anthropic: Option<String>,
    pub google: Option<String>,
    pub perplexity: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ModelIds {
    pub gpt: String,
    pub gemini: String,
    pub claude: String,
    pub perplexity: String,
}

impl Default for ModelIds {
    fn default() -> Self {
        Self {
            gpt: "gpt-4o".to_string(),
            gemini: "gemini-1.5-pro".to_string(),
            claude: "claude-3-5-sonnet-20241022".to_string(),
            perplexity: "llama-3.1-sonar-small-128k-online".to_string(),
        }
    }
}

/// Sampling and size limits applied to every model call.
#[derive(Debug, Clone)]
pub struct CallSettings {
    pub temperature: f64,
    pub specialist_max_tokens: u64,
    pub synthesis_max_tokens: u64,
    pub dialogue_max_tokens: u64,
    pub timeout: Duration,
}

impl Default for CallSettings {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            specialist_max_tokens: 2000,
            synthesis_max_tokens: 2500,
            dialogue_max_tokens: 1000,
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub api_keys: ApiKeys,
    pub models: ModelIds,
    pub perplexity_url: String,
    pub calls: CallSettings,
    pub template_version: TemplateVersion,
    pub validator: ValidatorConfig,
    /// Idle time after which a review session is dropped.
    pub session_ttl: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            api_keys: ApiKeys::default(),
            models: ModelIds::default(),
            perplexity_url: DEFAULT_PERPLEXITY_URL.to_string(),
            calls: CallSettings::default(),
            template_version: TemplateVersion::default(),
            validator: ValidatorConfig::default(),
            session_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Blank values count as
    /// unset; malformed numbers are errors.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let api_keys = ApiKeys {
            openai: get("OPENAI_API_KEY"),
            anthropic: get("ANTHROPIC_API_KEY"),
            google: get("GOOGLE_API_KEY").or_else(|| get("GEMINI_API_KEY")),
            perplexity: get("PERPLEXITY_API_KEY"),
        };

        let models = ModelIds {
            gpt: get("MECCA_GPT_MODEL").unwrap_or(defaults.models.gpt),
            gemini: get("MECCA_GEMINI_MODEL").unwrap_or(defaults.models.gemini),
            claude: get("MECCA_CLAUDE_MODEL").unwrap_or(defaults.models.claude),
            perplexity: get("MECCA_PERPLEXITY_MODEL").unwrap_or(defaults.models.perplexity),
        };

        let calls = CallSettings {
            temperature: parse_or(&get, "MECCA_TEMPERATURE", defaults.calls.temperature)?,
            timeout: Duration::from_secs(parse_or(
                &get,
                "MECCA_CALL_TIMEOUT_SECS",
                defaults.calls.timeout.as_secs(),
            )?),
            ..defaults.calls
        };

        let validator = ValidatorConfig {
            similarity_threshold: parse_or(
                &get,
                "MECCA_SIMILARITY_THRESHOLD",
                defaults.validator.similarity_threshold,
            )?,
            min_quote_words: parse_or(
                &get,
                "MECCA_MIN_QUOTE_WORDS",
                defaults.validator.min_quote_words,
            )?,
            forbidden_phrases: match get("MECCA_FORBIDDEN_PHRASES") {
                Some(raw) => raw
                    .split('|')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect(),
                None => defaults.validator.forbidden_phrases,
            },
        };
        anyhow::ensure!(
            (0.0..=1.0).contains(&validator.similarity_threshold),
            "MECCA_SIMILARITY_THRESHOLD must be between 0 and 1"
        );

        let session_ttl = Duration::from_secs(parse_or(
            &get,
            "MECCA_SESSION_TTL_SECS",
            defaults.session_ttl.as_secs(),
        )?);
        anyhow::ensure!(
            !session_ttl.is_zero(),
            "MECCA_SESSION_TTL_SECS must be greater than 0"
        );

        Ok(Self {
            port: parse_or(&get, "PORT", defaults.port)?,
            api_keys,
            models,
            perplexity_url: get("MECCA_PERPLEXITY_URL").unwrap_or(defaults.perplexity_url),
            calls,
            template_version: parse_or(
                &get,
                "MECCA_TEMPLATE_VERSION",
                defaults.template_version,
            )?,
            validator,
            session_ttl,
        })
    }

    /// Log a warning for every vendor that has no key.
    pub fn warn_missing_keys(&self) {
        let keys = [
            ("OPENAI_API_KEY", &self.api_keys.openai),
            ("ANTHROPIC_API_KEY", &self.api_keys.anthropic),
            ("GOOGLE_API_KEY", &self.api_keys.google),
            ("PERPLEXITY_API_KEY", &self.api_keys.perplexity),
        ];
        for (name, value) in keys {
            if value.is_none() {
                warn!(variable = name, "API key not set; that model will be skipped");
            }
        }
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}
