use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
mod input;
use nip44::{
    ConversationKey, EncryptOptions, MAX_PLAINTEXT_SIZE, SALT_LEN, calc_padding, decrypt,
    encrypt, generate_conversation_key, x_only_public_key,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, clap::Args)]
#[group(required = true, multiple = false)]
struct KeySource {
    /// Peer public key (hex, x-only or SEC1); the local secret key is read from NIP44_SECRET_KEY, stdin or a prompt
    #[arg(long, value_name = "HEX", env = "NIP44_PEER")]
    peer: Option<String>,

    /// Conversation key (hex), skips key agreement
    #[arg(long = "conversation-key", value_name = "HEX", env = "NIP44_CONVERSATION_KEY")]
    conversation_key: Option<String>,
}

impl KeySource {
    fn resolve(&self) -> Result<ConversationKey> {
        match (&self.conversation_key, &self.peer) {
            (Some(key), _) => {
                ConversationKey::from_hex(key.trim()).context("invalid conversation key")
            }
            (None, Some(peer)) => derive_with_peer(peer),
            (None, None) => bail!("either --peer or --conversation-key is required"),
        }
    }
}

fn derive_with_peer(peer: &str) -> Result<ConversationKey> {
    let secret = input::read_secret_key()?;
    let public_key = hex::decode(peer.trim()).context("peer public key must be hex")?;
    let key = generate_conversation_key(&secret, &public_key)
        .context("failed to derive conversation key")?;
    info!(peer = peer.trim(), "derived conversation key");
    Ok(key)
}

#[derive(Debug, Parser)]
#[command(name = "nip44")]
#[command(
    version,
    about = "Encrypt and decrypt direct messages between secp256k1 key pairs."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Prints the x-only public key of the local secret key
    Pubkey,

    /// Derives the conversation key with a peer
    ConversationKey {
        /// Peer public key (hex, x-only or SEC1)
        #[arg(long, value_name = "HEX", env = "NIP44_PEER")]
        peer: String,
    },

    /// Encrypts a message into a base64 payload
    #[command(arg_required_else_help = true)]
    Encrypt {
        #[command(flatten)]
        key: KeySource,

        /// Fixed 32-byte salt (hex); random when omitted
        #[arg(long, value_name = "HEX")]
        salt: Option<String>,

        plaintext: String,
    },

    /// Decrypts a base64 payload
    #[command(arg_required_else_help = true)]
    Decrypt {
        #[command(flatten)]
        key: KeySource,

        payload: String,
    },

    /// Prints the padded length for a plaintext length
    #[command(arg_required_else_help = true)]
    Padding { len: usize },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Pubkey => {
            let secret = input::read_secret_key()?;
            let public_key = x_only_public_key(&secret).context("invalid secret key")?;
            println!("{}", hex::encode(public_key));
        }
        Commands::ConversationKey { peer } => {
            let key = derive_with_peer(&peer)?;
            println!("{}", key.to_hex());
        }
        Commands::Encrypt {
            key,
            salt,
            plaintext,
        } => {
            let conversation_key = key.resolve()?;
            let mut options = EncryptOptions::new();
            if let Some(salt) = salt {
                options = options.with_salt(input::parse_hex_array::<SALT_LEN>("salt", &salt)?);
            }
            let payload = encrypt(&conversation_key, &plaintext, &options)
                .context("failed to encrypt message")?;
            println!("{payload}");
        }
        Commands::Decrypt { key, payload } => {
            let conversation_key = key.resolve()?;
            let plaintext = decrypt(&conversation_key, payload.trim())
                .context("failed to decrypt payload")?;
            println!("{plaintext}");
        }
        Commands::Padding { len } => {
            if !(1..MAX_PLAINTEXT_SIZE).contains(&len) {
                bail!("length must be between 1 and {}", MAX_PLAINTEXT_SIZE - 1);
            }
            println!("{}", calc_padding(len));
        }
    }

    Ok(())
}
