//! Interface de terminal do resume-tailor: spinner e saída colorida.
//!
//! Usa as crates `indicatif` para o spinner de progresso e `console` para
//! estilização com cores. O [`RunProgress`] acompanha visualmente
//! a execução do pipeline no terminal, e o [`SpinnerAwareWriter`] faz os
//! logs do `tracing` pausarem o spinner enquanto são escritos.

use std::cell::Cell;
use std::io::{self, Write};

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::fmt::MakeWriter;

use crate::pipeline::{RunReport, Stage};

/// Indicador visual de progresso para uma execução do pipeline.
///
/// Exibe um spinner durante o processamento e mensagens coloridas para
/// sucesso (verde), escrita não realizada (amarelo) e falha (vermelho).
pub struct RunProgress {
    pb: ProgressBar,
    // Último estágio iniciado, usado na mensagem de falha.
    current: Cell<Option<Stage>>,
    green: Style,
    yellow: Style,
    red: Style,
}

impl RunProgress {
    /// Inicia o spinner `pb` e retorna a instância de progresso.
    ///
    /// `pb` deve ser o mesmo spinner entregue ao [`SpinnerAwareWriter`].
    pub fn start(pb: ProgressBar) -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message("START");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            current: Cell::new(None),
            green: Style::new().green().bold(),
            yellow: Style::new().yellow().bold(),
            red: Style::new().red().bold(),
        }
    }

    /// Atualiza a mensagem do spinner para o estágio atual.
    pub fn stage(&self, stage: Stage) {
        let detail = match stage {
            Stage::ReadResume => "reading resume",
            Stage::ReadDescription => "reading job description",
            Stage::TailorResume => "waiting for the model",
            Stage::SaveResume => "saving tailored resume",
        };
        self.current.set(Some(stage));
        self.pb.set_message(format!("{stage}: {detail}"));
    }

    /// Finaliza o spinner e exibe o resultado da execução.
    ///
    /// A execução termina normalmente mesmo quando a escrita falha; nesse
    /// caso o status da escrita é mostrado em amarelo.
    pub fn complete(&self, report: &RunReport) {
        self.pb.finish_and_clear();
        if report.persisted() {
            println!(
                "  {} {} ({} chars, {}ms)",
                self.green.apply_to("✓"),
                report.write_status,
                report.tailored_chars,
                report.duration_ms
            );
        } else {
            println!(
                "  {} Run finished but the resume was not saved: {}",
                self.yellow.apply_to("!"),
                report.write_status
            );
        }
    }

    /// Finaliza o spinner indicando em qual estágio a execução foi abortada.
    pub fn fail(&self) {
        self.pb.finish_and_clear();
        match self.current.get() {
            Some(stage) => eprintln!("  {} Run aborted during {stage}", self.red.apply_to("✗")),
            None => eprintln!("  {} Run aborted", self.red.apply_to("✗")),
        }
    }

    /// Imprime o relatório da execução formatado em JSON.
    pub fn print_report(&self, report: &RunReport) {
        let style = if report.persisted() {
            &self.green
        } else {
            &self.yellow
        };
        println!();
        println!("{}", style.apply_to("─── Run Report ───"));
        println!(
            "{}",
            serde_json::to_string_pretty(report).unwrap_or_default()
        );
    }
}

/// Imprime um erro fatal em vermelho no stderr.
pub fn report_error(err: &anyhow::Error) {
    eprintln!(
        "{} {}",
        Style::new().red().bold().apply_to("error:"),
        describe_error(err)
    );
}

// Cadeia completa de causas, cada uma uma única vez: "contexto: causa: ...".
fn describe_error(err: &anyhow::Error) -> String {
    format!("{err:#}")
}

/// `MakeWriter` que entrega cada evento do `tracing` ao destino `inner`
/// com o spinner suspenso, para que logs e spinner não se misturem na
/// mesma linha do terminal.
pub struct SpinnerAwareWriter<M> {
    pb: ProgressBar,
    inner: M,
}

impl<M> SpinnerAwareWriter<M> {
    pub fn new(pb: ProgressBar, inner: M) -> Self {
        Self { pb, inner }
    }
}

impl<'a, M> MakeWriter<'a> for SpinnerAwareWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SuspendedLine<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SuspendedLine {
            pb: self.pb.clone(),
            buf: Vec::new(),
            out: self.inner.make_writer(),
        }
    }
}

/// Acumula um evento formatado e o escreve de uma vez ao ser descartado.
pub struct SuspendedLine<W: Write> {
    pb: ProgressBar,
    buf: Vec<u8>,
    out: W,
}

impl<W: Write> Write for SuspendedLine<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<W: Write> Drop for SuspendedLine<W> {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let buf = std::mem::take(&mut self.buf);
        let out = &mut self.out;
        self.pb.suspend(|| {
            // Falha ao escrever um log não deve derrubar a execução.
            let _ = out.write_all(&buf);
            let _ = out.flush();
        });
    }
}
