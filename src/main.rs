use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
mod auth;
use passeal::crypto::ITERATIONS;
use passeal::{Envelope, KdfParams};
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use zeroize::Zeroizing;

#[derive(Debug, clap::Args)]
struct InputArgs {
    /// Data given directly on the command line
    text: Option<String>,

    /// Read data from a file
    #[arg(short, long, value_name = "PATH", conflicts_with_all = ["text", "clipboard"])]
    input: Option<PathBuf>,

    /// Read data from the clipboard; encrypt and decrypt also write their result back to it
    #[arg(long, conflicts_with = "text")]
    clipboard: bool,
}

impl InputArgs {
    fn read(&self) -> Result<Zeroizing<Vec<u8>>> {
        if let Some(text) = &self.text {
            return Ok(Zeroizing::new(text.as_bytes().to_vec()));
        }

        if let Some(path) = &self.input {
            let data = std::fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            return Ok(Zeroizing::new(data));
        }

        if self.clipboard {
            let text = arboard::Clipboard::new()
                .and_then(|mut cb| cb.get_text())
                .context("failed to read clipboard")?;
            if text.is_empty() {
                bail!("clipboard is empty");
            }
            return Ok(Zeroizing::new(text.into_bytes()));
        }

        if io::stdin().is_terminal() {
            bail!("no input given; pass TEXT, --input, --clipboard or pipe data on stdin");
        }

        let mut data = Zeroizing::new(Vec::new());
        io::stdin().read_to_end(&mut data)?;
        Ok(data)
    }
}

#[derive(Debug, Parser)]
#[command(name = "passeal")]
#[command(
    version,
    about = "Encrypt and decrypt text with a passphrase (PBKDF2-SHA256 + AES-256-GCM)."
)]
struct Cli {
    /// Read the passphrase from a file instead of prompting
    #[arg(long, global = true, value_name = "PATH", env = "PASSEAL_PASSPHRASE_FILE")]
    passphrase_file: Option<PathBuf>,

    /// PBKDF2 iteration count; decrypt must use the value encrypt used
    #[arg(
        long,
        global = true,
        env = "PASSEAL_ITERATIONS",
        default_value_t = ITERATIONS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    iterations: u32,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Encrypts data and prints the envelope as base64
    Encrypt {
        #[command(flatten)]
        input: InputArgs,

        /// Write raw envelope bytes instead of base64
        #[arg(long, conflicts_with = "clipboard")]
        raw: bool,
    },

    /// Decrypts a base64 envelope
    Decrypt {
        #[command(flatten)]
        input: InputArgs,

        /// Input is raw envelope bytes; plaintext is written unmodified
        #[arg(long, conflicts_with = "clipboard")]
        raw: bool,
    },

    /// Shows the layout of an envelope as JSON
    Inspect {
        #[command(flatten)]
        input: InputArgs,

        /// Input is raw envelope bytes
        #[arg(long)]
        raw: bool,
    },
}

fn envelope_bytes(data: &[u8], raw: bool) -> Result<Vec<u8>> {
    if raw {
        return Ok(data.to_vec());
    }

    let text = std::str::from_utf8(data).context("base64 input is not valid text")?;
    Ok(passeal::base64_decode(text.trim_ascii())?)
}

fn write_clipboard(text: &str) -> Result<()> {
    arboard::Clipboard::new()
        .and_then(|mut cb| cb.set_text(text.to_owned()))
        .context("failed to write clipboard")
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let kdf = KdfParams::new(args.iterations)?;
    if kdf != KdfParams::default() {
        tracing::warn!(
            iterations = kdf.iterations(),
            "non-default iteration count; envelopes need the same value to decrypt"
        );
    }

    match args.command {
        Commands::Encrypt { input, raw } => {
            passeal::init()?;
            let data = input.read()?;
            let passphrase = auth::read_new_passphrase(args.passphrase_file.as_deref())?;

            let envelope = passeal::encrypt_with(&data, passphrase.as_bytes(), kdf)?;
            tracing::info!(envelope_len = envelope.len(), "encrypted");

            if raw {
                io::stdout().write_all(envelope.as_bytes())?;
                return Ok(());
            }

            let text = passeal::base64_encode(envelope.as_bytes());
            if input.clipboard {
                write_clipboard(&text)?;
                println!("encrypted text copied to clipboard");
            } else {
                println!("{text}");
            }
        }
        Commands::Decrypt { input, raw } => {
            passeal::init()?;
            let data = input.read()?;
            let envelope = envelope_bytes(&data, raw)?;
            let passphrase = auth::read_passphrase(args.passphrase_file.as_deref())?;

            let plaintext = passeal::decrypt_with(&envelope, passphrase.as_bytes(), kdf)?;
            tracing::info!(plaintext_len = plaintext.len(), "decrypted");

            if raw {
                io::stdout().write_all(&plaintext)?;
                return Ok(());
            }

            let text = std::str::from_utf8(&plaintext)
                .context("plaintext is not UTF-8 text; use --raw")?;
            if input.clipboard {
                write_clipboard(text)?;
                println!("decrypted text copied to clipboard");
            } else {
                println!("{text}");
            }
        }
        Commands::Inspect { input, raw } => {
            let data = input.read()?;
            let envelope = envelope_bytes(&data, raw)?;
            let summary = Envelope::parse(&envelope)?.summary();
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
