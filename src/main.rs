use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
mod passphrase;
mod telemetry;
use vaultcore::codec::{self, bits_to_utf8};
use vaultcore::{
    CcmProvider, CipherParams, CryptoProvider, DEFAULT_KEY_BITS, Encoded, KeyDerivationParams,
};

#[derive(Debug, clap::Args)]
struct CipherArgs {
    /// Symmetric key, base64
    #[arg(long, env = "VAULTCORE_KEY", hide_env_values = true)]
    key: Encoded,

    /// Cipher parameters as JSON ({"cipherType", "algorithm", "iv", "additionalData", "tagSize"})
    #[arg(long, value_name = "JSON")]
    params: String,
}

impl CipherArgs {
    fn cipher_params(&self) -> Result<CipherParams> {
        serde_json::from_str(&self.params).context("malformed cipher parameters")
    }
}

#[derive(Debug, Parser)]
#[command(name = "vaultcore")]
#[command(
    version,
    about = "Key derivation and authenticated encryption for credential vaults."
)]
struct Cli {
    /// Log level used when RUST_LOG is unset
    #[arg(long, global = true, env = "VAULTCORE_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Prints N secure random bytes (N must be a multiple of 4)
    #[command(arg_required_else_help = true)]
    RandomBytes { n: usize },

    /// Prints a random symmetric key
    RandomKey {
        #[arg(long, default_value_t = DEFAULT_KEY_BITS)]
        bits: usize,
    },

    /// Prints key derivation parameters with a fresh salt
    Salt {
        #[arg(long)]
        iterations: Option<u32>,
        /// Output key size in bits
        #[arg(long)]
        key_size: Option<u32>,
    },

    /// Prints cipher parameters with a fresh IV
    Iv {
        /// Authentication tag size in bits
        #[arg(long)]
        tag_size: Option<u32>,
        /// Additional authenticated data, as text
        #[arg(long)]
        aad: Option<String>,
    },

    /// Derives a key from the passphrase
    DeriveKey {
        /// Key derivation parameters as JSON ({"algorithm", "salt", "iterations", "keySize"})
        #[arg(long, value_name = "JSON")]
        params: String,
    },

    /// Encrypts a text value
    #[command(arg_required_else_help = true)]
    Encrypt {
        #[command(flatten)]
        cipher: CipherArgs,
        plaintext: String,
    },

    /// Decrypts a ciphertext back to text
    #[command(arg_required_else_help = true)]
    Decrypt {
        #[command(flatten)]
        cipher: CipherArgs,
        ciphertext: Encoded,
    },

    /// Generates an asymmetric key pair
    Keypair,

    /// Shows information about the provider
    Info,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    telemetry::init(&args.log_level)?;

    let provider = CcmProvider::new();
    match args.command {
        Commands::RandomBytes { n } => {
            println!("{}", provider.random_bytes(n)?);
        }
        Commands::RandomKey { bits } => {
            println!("{}", provider.random_key(bits)?);
        }
        Commands::Salt {
            iterations,
            key_size,
        } => {
            let mut params = KeyDerivationParams::with_random_salt(&provider)?;
            if let Some(iterations) = iterations {
                params.iterations = iterations;
            }
            if let Some(key_size) = key_size {
                params.key_size = key_size;
            }
            println!("{}", serde_json::to_string(&params)?);
        }
        Commands::Iv { tag_size, aad } => {
            let mut params = CipherParams::with_random_iv(&provider)?;
            if let Some(tag_size) = tag_size {
                params.tag_size = tag_size;
            }
            if let Some(aad) = aad {
                params.additional_data = Some(Encoded::from_utf8(&aad));
            }
            println!("{}", serde_json::to_string(&params)?);
        }
        Commands::DeriveKey { params } => {
            let params: KeyDerivationParams =
                serde_json::from_str(&params).context("malformed key derivation parameters")?;
            let passphrase = passphrase::read_passphrase()?;
            let key = provider.derive_key(&passphrase, &params)?;
            drop(passphrase);
            println!("{key}");
        }
        Commands::Encrypt { cipher, plaintext } => {
            let params = cipher.cipher_params()?;
            let ct = provider.encrypt(&cipher.key, &Encoded::from_utf8(&plaintext), &params)?;
            println!("{ct}");
        }
        Commands::Decrypt { cipher, ciphertext } => {
            let params = cipher.cipher_params()?;
            let pt = provider.decrypt(&cipher.key, &ciphertext, &params)?;
            println!("{}", bits_to_utf8(codec::decode(pt.as_str())?)?);
        }
        Commands::Keypair => {
            let pair = provider.generate_key_pair()?;
            println!("{}\n{}", pair.private_key, pair.public_key);
        }
        Commands::Info => {
            println!("provider: {}", provider.name());
            println!("available: {}", provider.is_available());
        }
    }

    Ok(())
}
