//! Command-line demonstration of the lattice reduction and knapsack cryptosystem paths

use clap::Parser;

use knapsack_crypto::algebra::format_matrix;
use knapsack_crypto::cryptanalysis::{CryptanalysisParams, attempt_cryptanalysis_with};
use knapsack_crypto::knapsack::codec::ciphertext_to_base64;
use knapsack_crypto::knapsack::keys::{decrypt, encrypt, generate_keys};
use knapsack_crypto::knapsack::params::KeyGenParams;
use knapsack_crypto::lattice::generators::NetworkKind;
use knapsack_crypto::lattice::lll::{ReductionParams, reduce_with_params};
use knapsack_crypto::lattice::metrics::{Preference, compare_networks, verify_reduction};

use num_bigint::BigInt;
use num_rational::BigRational;

use rand::SeedableRng;
use rand::rngs::StdRng;

use log::{error, info};

/// Exact LLL reduction and the Merkle-Hellman knapsack cryptosystem
#[derive(Parser, Debug)]
#[command(name = "knapsack-demo")]
#[command(version)]
struct Args {
    /// Dimension of the generated test lattices
    #[arg(long, default_value = "4")]
    dimension: usize,

    /// Knapsack key size in bytes
    #[arg(long, default_value = "64")]
    byte_size: usize,

    /// Number of modular transform rounds
    #[arg(long, default_value = "3")]
    iterations: usize,

    /// Message to encrypt (characters up to U+00FF)
    #[arg(long, default_value = "AB")]
    message: String,

    /// Numerator of the Lovász parameter
    #[arg(long, default_value = "3")]
    delta_num: i64,

    /// Denominator of the Lovász parameter
    #[arg(long, default_value = "4")]
    delta_den: i64,

    /// LLL iteration bound
    #[arg(long, default_value = "1000")]
    max_iterations: usize,

    /// Seed for reproducible key generation
    #[arg(long)]
    seed: Option<u64>,

    /// Run the lattice attack against the generated key
    #[arg(long)]
    attack: bool,

    /// Print the public key as JSON
    #[arg(long)]
    dump_public_key: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.delta_den == 0 {
        return Err("Lovász parameter denominator must not be 0".into());
    }
    let delta = BigRational::new(BigInt::from(args.delta_num), BigInt::from(args.delta_den));
    let params = ReductionParams::try_with(delta, args.max_iterations)?;

    run_lattices(args.dimension, &params)?;
    run_knapsack(args, &params)
}

fn run_lattices(
    dimension: usize,
    params: &ReductionParams,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reduced = Vec::new();

    for kind in [NetworkKind::LagariasOdlyzko, NetworkKind::JouxStern] {
        let initial = kind.generate(dimension);
        let mut basis = initial.clone();
        let report = reduce_with_params(&mut basis, params)?;

        println!("{} network ({}x{}):", kind, dimension, dimension);
        println!("{}", format_matrix(&initial));
        println!("Reduced in {} iterations ({} swaps):", report.iterations, report.swaps);
        println!("{}", format_matrix(&basis));
        if report.exhausted {
            println!("Iteration bound reached, result is only partially reduced");
        }

        let check = verify_reduction(&initial, &basis)?;
        println!(
            "Determinant proxy preserved: {}, shorter: {}, more orthogonal: {}",
            check.determinant_preserved, check.vectors_shorter, check.more_orthogonal
        );
        if let Some(preserved) = check.volume_preserved {
            println!("Exact volume preserved: {}", preserved);
        }
        println!();

        reduced.push((kind, basis));
    }

    if let [(first_kind, first), (second_kind, second)] = reduced.as_slice() {
        let comparison = compare_networks(first, second)?;
        println!(
            "Efficiency: {} = {:.4}, {} = {:.4}",
            first_kind, comparison.first_score, second_kind, comparison.second_score
        );
        match comparison.preferred {
            Preference::First => println!("{} reduces better", first_kind),
            Preference::Second => println!("{} reduces better", second_kind),
            Preference::Tie => println!("Both networks score the same"),
        }
        println!();
    }

    Ok(())
}

fn run_knapsack(
    args: &Args,
    reduction: &ReductionParams,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = KeyGenParams::try_with(args.byte_size, args.iterations)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let (private_key, public_key) = generate_keys(&params, &mut rng)?;
    info!(
        "Key holds {} elements, room for {} characters",
        public_key.dimension(),
        params.max_message_len()
    );

    if args.dump_public_key {
        println!("{}", serde_json::to_string_pretty(&public_key)?);
    }

    let ciphertext = encrypt(&public_key, &args.message)?;
    println!("Ciphertext: {}", ciphertext);
    println!("Ciphertext (base64): {}", ciphertext_to_base64(&ciphertext));

    let decrypted = decrypt(&private_key, &ciphertext)?;
    println!("Decrypted: {:?}", decrypted);

    if args.attack {
        let attack_params = CryptanalysisParams {
            reduction: reduction.clone(),
        };
        match attempt_cryptanalysis_with(&ciphertext, &public_key, &private_key, &attack_params) {
            Ok(plaintext) if plaintext == args.message => {
                println!("Attack recovered the message: {:?}", plaintext)
            }
            Ok(plaintext) => println!("Attack produced {:?}, not the message", plaintext),
            Err(e) => println!("Attack failed: {}", e),
        }
    }

    Ok(())
}
