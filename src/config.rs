//! Configuração do resume-tailor carregada a partir de `tailor.toml`.
//!
//! A struct [`TailorConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `HF_TOKEN` tem precedência sobre o arquivo, e as
//! flags da CLI têm precedência sobre ambos.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::capability::WriteMode;
use crate::cli::{Cli, Command};
use crate::error::TailorError;
use crate::inference::GenerationParameters;
use crate::pipeline::PipelinePaths;

const CONFIG_FILE: &str = "tailor.toml";
const TOKEN_ENV: &str = "HF_TOKEN";

/// Configuração de nível superior carregada de `tailor.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TailorConfig {
    /// Token da API do Hugging Face.
    #[serde(default)]
    pub api_token: String,

    /// Modelo usado na geração.
    #[serde(default = "default_model")]
    pub model: String,

    /// URL base do endpoint; o modelo é anexado ao final.
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Temperatura de amostragem.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Limite máximo de tokens gerados.
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,

    /// Timeout total da requisição HTTP, em segundos.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_resume_path")]
    pub resume_path: PathBuf,

    #[serde(default = "default_description_path")]
    pub description_path: PathBuf,

    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Comportamento quando o arquivo de saída já existe.
    #[serde(default)]
    pub write_mode: WriteMode,
}

// Modelo padrão: Qwen2.5 72B Instruct.
fn default_model() -> String {
    "Qwen/Qwen2.5-72B-Instruct".to_string()
}

// Rota do provedor hf-inference no roteador do Hugging Face.
fn default_endpoint_url() -> String {
    "https://router.huggingface.co/hf-inference/models".to_string()
}

fn default_temperature() -> f32 {
    0.5
}

fn default_max_new_tokens() -> u32 {
    1024
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_resume_path() -> PathBuf {
    PathBuf::from("resume.txt")
}

fn default_description_path() -> PathBuf {
    PathBuf::from("description.txt")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("new_resume.txt")
}

impl Default for TailorConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            model: default_model(),
            endpoint_url: default_endpoint_url(),
            temperature: default_temperature(),
            max_new_tokens: default_max_new_tokens(),
            timeout_secs: default_timeout_secs(),
            resume_path: default_resume_path(),
            description_path: default_description_path(),
            output_path: default_output_path(),
            write_mode: WriteMode::default(),
        }
    }
}

impl TailorConfig {
    /// Carrega a configuração de `tailor.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE), std::env::var(TOKEN_ENV).ok())
    }

    /// Carrega de `path`, aplicando `env_token` por cima do arquivo quando não vazio.
    pub fn load_from(path: &Path, env_token: Option<String>) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str::<TailorConfig>(&contents)
                .with_context(|| format!("invalid config in {}", path.display()))?
        } else {
            Self::default()
        };

        // Variável de ambiente tem precedência sobre o arquivo para o token.
        if let Some(token) = env_token
            && !token.is_empty()
        {
            config.api_token = token;
        }

        Ok(config)
    }

    /// Aplica as flags da CLI sobre os valores carregados.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(model) = &cli.model {
            self.model = model.clone();
        }
        if let Some(temperature) = cli.temperature {
            self.temperature = temperature;
        }
        if let Some(max_new_tokens) = cli.max_new_tokens {
            self.max_new_tokens = max_new_tokens;
        }

        let inputs = cli.command.inputs();
        if let Some(resume) = &inputs.resume {
            self.resume_path = resume.clone();
        }
        if let Some(description) = &inputs.description {
            self.description_path = description.clone();
        }

        if let Command::Run {
            output, no_clobber, ..
        } = &cli.command
        {
            if let Some(output) = output {
                self.output_path = output.clone();
            }
            if *no_clobber {
                self.write_mode = WriteMode::CreateNew;
            }
        }
    }

    /// Rejeita parâmetros que o endpoint recusaria.
    pub fn validate(&self) -> Result<(), TailorError> {
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(TailorError::Config(format!(
                "temperature must be greater than 0, got {}",
                self.temperature
            )));
        }
        if self.max_new_tokens == 0 {
            return Err(TailorError::Config(
                "max_new_tokens must be greater than 0".into(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(TailorError::Config("model must not be empty".into()));
        }
        if self.endpoint_url.trim().is_empty() {
            return Err(TailorError::Config("endpoint_url must not be empty".into()));
        }
        Ok(())
    }

    pub fn generation_parameters(&self) -> GenerationParameters {
        GenerationParameters::new(self.temperature, self.max_new_tokens)
    }

    pub fn pipeline_paths(&self) -> PipelinePaths {
        PipelinePaths {
            resume: self.resume_path.clone(),
            description: self.description_path.clone(),
            output: self.output_path.clone(),
        }
    }
}
