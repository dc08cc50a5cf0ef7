//! Interface de linha de comando do resume-tailor baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (run, prompt)
//! e flags globais (--model, --temperature, --max-new-tokens, --verbose).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// resume-tailor: adapta um currículo em texto a uma vaga com uma chamada ao LLM.
#[derive(Debug, Parser)]
#[command(name = "resume-tailor", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Identificador do modelo no endpoint (ex.: Qwen/Qwen2.5-72B-Instruct).
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Temperatura de amostragem usada na geração.
    #[arg(long, global = true)]
    pub temperature: Option<f32>,

    /// Limite máximo de tokens gerados.
    #[arg(long, global = true)]
    pub max_new_tokens: Option<u32>,

    /// Habilita saída detalhada (logs de debug e relatório JSON).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Caminhos dos arquivos de entrada.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Currículo em texto simples (padrão: resume.txt).
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// Descrição da vaga em texto simples (padrão: description.txt).
    #[arg(long)]
    pub description: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Executa o pipeline completo e grava o currículo adaptado.
    Run {
        #[command(flatten)]
        inputs: InputArgs,

        /// Arquivo de saída (padrão: new_resume.txt).
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Não sobrescreve o arquivo de saída se ele já existir.
        #[arg(long, default_value_t = false)]
        no_clobber: bool,
    },

    /// Lê as entradas e imprime o prompt sem chamar o modelo.
    Prompt {
        #[command(flatten)]
        inputs: InputArgs,
    },
}

impl Command {
    pub fn inputs(&self) -> &InputArgs {
        match self {
            Command::Run { inputs, .. } | Command::Prompt { inputs } => inputs,
        }
    }
}
