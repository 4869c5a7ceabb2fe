//! Runs one already-classified WhatsApp message object through the inbound
//! normalizer and prints the canonical record as JSON.
//!
//! ```text
//! inbound-normalize --kind text --input message.json
//! cat reply.json | inbound-normalize --kind interactive --sequential --id-prefix wa
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gsm_inbound::{IdMode, InboundPayload, NormalizerConfig, PayloadKind, PayloadNormalizer};
use tracing::{info, warn};

mod telemetry;

#[derive(Parser, Debug)]
#[command(author, version, about = "Normalize an inbound WhatsApp message", long_about = None)]
struct Opts {
    /// Message kind, as classified by the webhook dispatcher
    #[arg(long, value_enum)]
    kind: Kind,

    /// Payload file; reads stdin when omitted
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Prefix for generated ids (overrides INBOUND_MSG_ID_PREFIX)
    #[arg(long, value_name = "PREFIX")]
    id_prefix: Option<String>,

    /// Generate sequential ids instead of UUIDs
    #[arg(long)]
    sequential: bool,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Text,
    Interactive,
    Location,
    Image,
}

impl From<Kind> for PayloadKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Text => PayloadKind::Text,
            Kind::Interactive => PayloadKind::Interactive,
            Kind::Location => PayloadKind::Location,
            Kind::Image => PayloadKind::Image,
        }
    }
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    telemetry::init_tracing(telemetry::json_logs_from_env());

    let cfg = resolve_config(NormalizerConfig::from_env(), &opts);
    let kind = PayloadKind::from(opts.kind);
    let bytes = read_input(opts.input.as_ref())?;

    let payload = InboundPayload::from_slice(kind, &bytes)
        .with_context(|| format!("decode {kind} payload"))?;
    let normalizer = PayloadNormalizer::from_config(&cfg);
    let message = match normalizer.normalize(payload) {
        Ok(message) => message,
        Err(err) => {
            warn!(code = err.code(), field = err.field(), %kind, "payload rejected");
            return Err(err).context("normalize payload");
        }
    };
    info!(
        id = %message.id(),
        message_type = message.message_type().as_str(),
        "normalized inbound message"
    );

    let rendered = if opts.compact {
        serde_json::to_string(&message)?
    } else {
        serde_json::to_string_pretty(&message)?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}").context("write stdout")?;
    Ok(())
}

fn resolve_config(mut cfg: NormalizerConfig, opts: &Opts) -> NormalizerConfig {
    if let Some(prefix) = opts.id_prefix.as_deref() {
        let prefix = prefix.trim();
        cfg.id_prefix = (!prefix.is_empty()).then(|| prefix.to_string());
    }
    if opts.sequential {
        cfg.id_mode = IdMode::Sequential;
    }
    cfg
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path).with_context(|| format!("read {}", path.display())),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("read payload from stdin")?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_environment() {
        let opts = Opts::parse_from([
            "inbound-normalize",
            "--kind",
            "image",
            "--id-prefix",
            "wa",
            "--sequential",
        ]);
        let cfg = resolve_config(NormalizerConfig::default(), &opts);
        assert_eq!(cfg.id_prefix.as_deref(), Some("wa"));
        assert_eq!(cfg.id_mode, IdMode::Sequential);
        assert_eq!(PayloadKind::from(opts.kind), PayloadKind::Image);
    }

    #[test]
    fn blank_prefix_flag_clears_prefix() {
        let opts = Opts::parse_from(["inbound-normalize", "--kind", "text", "--id-prefix", ""]);
        let env_cfg = NormalizerConfig {
            id_prefix: Some("env".into()),
            ..Default::default()
        };
        assert_eq!(resolve_config(env_cfg, &opts).id_prefix, None);
    }

    #[test]
    fn opts_are_well_formed() {
        use clap::CommandFactory;
        Opts::command().debug_assert();
    }
}
