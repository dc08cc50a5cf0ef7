//! Tipos de erro para o cliente do endpoint de inferência (Hugging Face).
//!
//! Define [`EndpointError`] com variantes para erros HTTP retornados pelo
//! endpoint, falhas de rede e respostas que não puderam ser interpretadas.
//! Nenhuma dessas falhas é tratada localmente: todas abortam a execução.

use thiserror::Error;

/// Erros que podem ocorrer ao chamar o endpoint de geração de texto.
///
/// - [`ApiError`](EndpointError::ApiError): o endpoint respondeu com 4xx/5xx
///   (token inválido, modelo indisponível, limite de uso)
/// - [`NetworkError`](EndpointError::NetworkError): falha na camada de transporte
/// - [`ParseError`](EndpointError::ParseError): o corpo da resposta não é JSON válido
#[derive(Debug, Error)]
pub enum EndpointError {
    /// Erro retornado pelo endpoint (ex.: 401 token inválido, 503 modelo carregando).
    /// A mensagem vem do campo `error` do corpo quando presente.
    #[error("endpoint error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Falha de rede subjacente (DNS, conexão recusada, timeout do transporte).
    #[error("network error")]
    NetworkError(#[from] reqwest::Error),

    /// O corpo da resposta não pôde ser decodificado.
    #[error("failed to parse endpoint response: {0}")]
    ParseError(String),
}

impl EndpointError {
    /// Indica falha de autenticação (401/403).
    pub fn is_auth(&self) -> bool {
        matches!(self, EndpointError::ApiError { status: 401 | 403, .. })
    }
}
