use serde::Deserialize;
use std::env;
use std::time::Duration;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io/v1/text-to-speech";
const DEFAULT_ELEVENLABS_MODEL: &str = "eleven_multilingual_v2";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub db_connect_attempts: u32,
    // Dialog generation
    pub llm_provider: LlmProvider,
    pub llm_api_key: String,
    pub llm_model: String,
    pub llm_base_url: String,
    pub llm_timeout_secs: u64,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    // Speech synthesis
    pub tts_provider: TtsProvider,
    pub elevenlabs_api_key: String,
    pub elevenlabs_voice_id: String,
    pub elevenlabs_model_id: String,
    pub elevenlabs_base_url: String,
    pub openai_tts_model: String,
    pub openai_tts_voice: String,
    pub tts_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    OpenAi,
    Stub,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    ElevenLabs,
    OpenAi,
    Stub,
}

/// Settings handed to the OpenAI-compatible chat completion client
#[derive(Debug, Clone)]
pub struct OpenAiLlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Settings handed to the ElevenLabs text-to-speech client
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    pub api_key: String,
    pub voice_id: String,
    pub model_id: String,
    pub base_url: String,
    pub timeout: Duration,
}

/// Settings handed to the OpenAI speech client
#[derive(Debug, Clone)]
pub struct OpenAiTtsConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub voice: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env_or("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env_or("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            db_connect_attempts: env_or("DB_CONNECT_ATTEMPTS", "10").parse()?,
            llm_provider: parse_llm_provider(&env_or("LLM_PROVIDER", "stub"))?,
            llm_api_key: env_or("LLM_API_KEY", ""),
            llm_model: env_or("LLM_MODEL", "gpt-4o-mini"),
            llm_base_url: env_or("LLM_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            llm_timeout_secs: env_or("LLM_TIMEOUT_SECS", "45").parse()?,
            llm_temperature: env_or("LLM_TEMPERATURE", "0.6").parse()?,
            llm_max_tokens: env_or("LLM_MAX_TOKENS", "800").parse()?,
            tts_provider: parse_tts_provider(&env_or("TTS_PROVIDER", "stub"))?,
            elevenlabs_api_key: env_or("ELEVENLABS_API_KEY", ""),
            elevenlabs_voice_id: env_or("ELEVENLABS_VOICE_ID", ""),
            elevenlabs_model_id: env_or("ELEVENLABS_MODEL_ID", DEFAULT_ELEVENLABS_MODEL),
            elevenlabs_base_url: env_or("ELEVENLABS_BASE_URL", DEFAULT_ELEVENLABS_BASE_URL),
            openai_tts_model: env_or("OPENAI_TTS_MODEL", "tts-1"),
            openai_tts_voice: env_or("OPENAI_TTS_VOICE", ""),
            tts_timeout_secs: env_or("TTS_TIMEOUT_SECS", "30").parse()?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Reject provider selections that are missing their credentials
    pub fn validate(&self) -> Result<(), String> {
        if self.llm_provider == LlmProvider::OpenAi && self.llm_api_key.is_empty() {
            return Err("LLM_API_KEY is required when LLM_PROVIDER=openai".to_string());
        }
        match self.tts_provider {
            TtsProvider::ElevenLabs
                if self.elevenlabs_api_key.is_empty() || self.elevenlabs_voice_id.is_empty() =>
            {
                Err(
                    "ELEVENLABS_API_KEY and ELEVENLABS_VOICE_ID are required when TTS_PROVIDER=elevenlabs"
                        .to_string(),
                )
            }
            TtsProvider::OpenAi if self.llm_api_key.is_empty() => {
                Err("LLM_API_KEY is required when TTS_PROVIDER=openai".to_string())
            }
            _ => Ok(()),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn openai_llm(&self) -> OpenAiLlmConfig {
        OpenAiLlmConfig {
            api_key: self.llm_api_key.clone(),
            model: self.llm_model.clone(),
            base_url: self.llm_base_url.clone(),
            timeout: Duration::from_secs(self.llm_timeout_secs),
            temperature: self.llm_temperature,
            max_tokens: self.llm_max_tokens,
        }
    }

    pub fn elevenlabs(&self) -> ElevenLabsConfig {
        ElevenLabsConfig {
            api_key: self.elevenlabs_api_key.clone(),
            voice_id: self.elevenlabs_voice_id.clone(),
            model_id: self.elevenlabs_model_id.clone(),
            base_url: self.elevenlabs_base_url.clone(),
            timeout: Duration::from_secs(self.tts_timeout_secs),
        }
    }

    pub fn openai_tts(&self) -> OpenAiTtsConfig {
        OpenAiTtsConfig {
            api_key: self.llm_api_key.clone(),
            base_url: self.llm_base_url.clone(),
            model: self.openai_tts_model.clone(),
            voice: self.openai_tts_voice.clone(),
            timeout: Duration::from_secs(self.tts_timeout_secs),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_llm_provider(value: &str) -> Result<LlmProvider, String> {
    match value.to_lowercase().as_str() {
        "openai" => Ok(LlmProvider::OpenAi),
        "stub" => Ok(LlmProvider::Stub),
        other => Err(format!("unknown LLM_PROVIDER: {}", other)),
    }
}

fn parse_tts_provider(value: &str) -> Result<TtsProvider, String> {
    match value.to_lowercase().as_str() {
        "elevenlabs" => Ok(TtsProvider::ElevenLabs),
        "openai" => Ok(TtsProvider::OpenAi),
        "stub" => Ok(TtsProvider::Stub),
        other => Err(format!("unknown TTS_PROVIDER: {}", other)),
    }
}
