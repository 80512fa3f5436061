//! Command-line interface for the toy SPN cipher.

#![forbid(unsafe_code)]

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use spn_core::{HexTrace, MasterKey, Permutation, SpnCipher, SpnInstance, KEY_LEN, MIN_ROUNDS};

/// Toy SPN cipher CLI.
#[derive(Parser)]
#[command(
    name = "spn",
    version,
    author,
    about = "Didactic substitution-permutation network cipher (not secure)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a cipher instance and write it to a file.
    Gen {
        /// Number of rounds (values below 4 are clamped up).
        #[arg(long, default_value_t = MIN_ROUNDS)]
        rounds: usize,
        /// Master key as 32 hex characters; drawn at random when omitted.
        #[arg(long, value_name = "HEX")]
        key_hex: Option<String>,
        /// Output path for the serialized instance.
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
        /// Optional RNG seed for reproducible generation.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Encrypt a file in ECB mode. Output is zero-padded to whole blocks.
    Enc {
        /// Path to the serialized instance.
        #[arg(long, value_name = "FILE")]
        instance: PathBuf,
        /// Input plaintext file (any length).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output ciphertext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Decrypt a file in ECB mode. Input length must be a multiple of 8.
    Dec {
        /// Path to the serialized instance.
        #[arg(long, value_name = "FILE")]
        instance: PathBuf,
        /// Input ciphertext file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output plaintext path (padding from encryption is kept).
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Round-trip random samples through an instance and fail on mismatch.
    Check {
        /// Path to the serialized instance.
        #[arg(long, value_name = "FILE")]
        instance: PathBuf,
        /// Number of random samples to test.
        #[arg(long, default_value_t = 8)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Generate a throwaway instance, run a message through it, print hex.
    Demo {
        /// Number of rounds (values below 4 are clamped up).
        #[arg(long, default_value_t = MIN_ROUNDS)]
        rounds: usize,
        /// Message to encrypt.
        #[arg(long, default_value = "linear cryptanalysis awaits")]
        message: String,
        /// Dump every intermediate round state as hex.
        #[arg(long, default_value_t = false)]
        trace: bool,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Gen {
            rounds,
            key_hex,
            out,
            seed,
        } => cmd_gen(rounds, key_hex.as_deref(), &out, seed),
        Commands::Enc {
            instance,
            input,
            output,
        } => cmd_enc(&instance, &input, &output),
        Commands::Dec {
            instance,
            input,
            output,
        } => cmd_dec(&instance, &input, &output),
        Commands::Check {
            instance,
            samples,
            seed,
        } => cmd_check(&instance, samples, seed),
        Commands::Demo {
            rounds,
            message,
            trace,
            seed,
        } => cmd_demo(rounds, &message, trace, seed),
    }
}

fn cmd_gen(rounds: usize, key_hex: Option<&str>, out: &PathBuf, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let key = match key_hex {
        Some(hex_str) => parse_key_hex(hex_str)?,
        None => MasterKey::random(&mut rng),
    };
    let permutation = Permutation::random(&mut rng);
    let cipher = SpnCipher::from_parts(key, permutation, rounds);
    if cipher.rounds() != rounds {
        eprintln!("note: rounds clamped to {}", cipher.rounds());
    }
    let bytes = cipher.instance().to_bytes().context("serialize instance")?;
    fs::write(out, bytes).with_context(|| format!("write {}", out.display()))?;
    Ok(())
}

fn cmd_enc(instance_path: &PathBuf, input_path: &PathBuf, output_path: &PathBuf) -> Result<()> {
    let cipher = load_cipher(instance_path)?;
    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    let ciphertext = cipher.encrypt(&data);
    fs::write(output_path, ciphertext)
        .with_context(|| format!("write {}", output_path.display()))?;
    Ok(())
}

fn cmd_dec(instance_path: &PathBuf, input_path: &PathBuf, output_path: &PathBuf) -> Result<()> {
    let cipher = load_cipher(instance_path)?;
    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    let plaintext = cipher
        .decrypt(&data)
        .with_context(|| format!("decrypt {}", input_path.display()))?;
    fs::write(output_path, plaintext)
        .with_context(|| format!("write {}", output_path.display()))?;
    Ok(())
}

fn cmd_check(instance_path: &PathBuf, samples: usize, seed: Option<u64>) -> Result<()> {
    let cipher = load_cipher(instance_path)?;
    let mut rng = seeded_rng(seed);

    for sample in 0..samples {
        let len = rng.next_u32() as usize % 64 + 1;
        let mut plaintext = vec![0u8; len];
        rng.fill_bytes(&mut plaintext);

        let ciphertext = cipher.encrypt(&plaintext);
        let decrypted = cipher.decrypt(&ciphertext).context("decrypt sample")?;
        if decrypted[..len] != plaintext[..] || decrypted[len..].iter().any(|&b| b != 0) {
            bail!("round-trip mismatch on sample {sample} (length {len})");
        }
    }
    println!("{samples} samples round-tripped");
    Ok(())
}

fn cmd_demo(rounds: usize, message: &str, trace: bool, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let cipher = SpnCipher::generate(rounds, &mut rng);
    if cipher.rounds() != rounds {
        eprintln!("note: rounds clamped to {}", cipher.rounds());
    }

    println!("key: {}", hex::encode(cipher.key().0));
    println!("plaintext: {}", hex::encode(message.as_bytes()));

    let ciphertext = if trace {
        println!("-- encryption --");
        let mut sink = HexTrace::new(io::stdout());
        cipher.encrypt_traced(message.as_bytes(), &mut sink)
    } else {
        cipher.encrypt(message.as_bytes())
    };
    println!("ciphertext: {}", hex::encode(&ciphertext));

    let decrypted = if trace {
        println!("-- decryption --");
        let mut sink = HexTrace::new(io::stdout());
        cipher.decrypt_traced(&ciphertext, &mut sink)?
    } else {
        cipher.decrypt(&ciphertext)?
    };
    println!("decrypted: {}", hex::encode(&decrypted));

    if &decrypted[..message.len()] != message.as_bytes() {
        bail!("demo round trip failed");
    }
    Ok(())
}

fn parse_key_hex(hex_str: &str) -> Result<MasterKey> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    if bytes.len() != KEY_LEN {
        bail!("master key must be {KEY_LEN} bytes ({} hex characters)", KEY_LEN * 2);
    }
    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&bytes);
    Ok(MasterKey::from(key))
}

fn load_cipher(path: &PathBuf) -> Result<SpnCipher> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let instance = SpnInstance::from_bytes(&bytes).context("deserialize instance")?;
    Ok(instance.into_cipher())
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
