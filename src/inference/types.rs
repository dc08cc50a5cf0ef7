//! Tipos de dados para requisições e respostas da API de geração de texto
//! do Hugging Face Inference.
//!
//! A requisição segue o formato `{"inputs": ..., "parameters": {...}}`.
//! A resposta normalmente é `[{"generated_text": "..."}]`, mas o endpoint
//! pode devolver outros formatos; [`normalize_output`] reduz qualquer um
//! deles a texto simples.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Corpo da requisição para `POST {endpoint}/{model}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Prompt completo enviado ao modelo.
    pub inputs: String,
    /// Parâmetros de decodificação.
    pub parameters: GenerationParameters,
}

/// Parâmetros de decodificação fixos para toda a execução.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    /// Temperatura de amostragem (deve ser > 0 para este endpoint).
    pub temperature: f32,
    /// Limite máximo de tokens gerados.
    pub max_new_tokens: u32,
    /// Quando `false`, o endpoint não repete o prompt no início da resposta.
    pub return_full_text: bool,
}

impl GenerationParameters {
    pub fn new(temperature: f32, max_new_tokens: u32) -> Self {
        Self {
            temperature,
            max_new_tokens,
            return_full_text: false,
        }
    }
}

/// Corpo de erro devolvido pelo endpoint, ex.: `{"error": "Model is loading"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Reduz a resposta bruta do endpoint a texto simples, sem espaços nas bordas.
///
/// Texto é usado como está. Objetos (ou listas de objetos) com o campo
/// `generated_text` usam esse campo. Qualquer outro valor é convertido para
/// sua representação textual JSON.
pub fn normalize_output(raw: &Value) -> String {
    let text = match raw {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .first()
            .and_then(generated_text)
            .map(str::to_string)
            .unwrap_or_else(|| raw.to_string()),
        Value::Object(_) => generated_text(raw)
            .map(str::to_string)
            .unwrap_or_else(|| raw.to_string()),
        other => other.to_string(),
    };
    text.trim().to_string()
}

fn generated_text(value: &Value) -> Option<&str> {
    value.get("generated_text")?.as_str()
}
