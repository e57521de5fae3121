// crates/zkfft-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};
use ark_bn254::{g1::Config as G1Config, Fr, G1Projective};
use ark_ec::Group;
use ark_ff::BigInteger;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zkfft::{
    Direction, EngineConfig, FftEngine, FieldDomain, Goldilocks, PointBuffer, Repr,
    TransformOptions,
};

#[derive(Parser, Debug)]
#[command(
    name = "zkfft-cli",
    about = "FFT/IFFT over prime fields and BN254 G1",
    long_about = "FFT/IFFT over prime fields and BN254 G1.\n\nTransform JSON vectors of field elements, or run exactness round trips on synthetic inputs.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Transform a JSON array of field elements (decimal strings or integers).
    Fft {
        /// Input JSON path
        #[arg(long)]
        input: PathBuf,

        /// Output JSON path (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Run the inverse transform
        #[arg(long, default_value_t = false)]
        inverse: bool,

        /// Scalar field
        #[arg(long, value_enum, default_value_t = FieldOpt::Bn254)]
        field: FieldOpt,

        /// Largest root order for the standard path; longer inputs use the four-step path
        #[arg(long)]
        max_order: Option<u32>,

        /// Engine configuration (TOML); env overrides still apply
        #[arg(long)]
        config: Option<PathBuf>,

        /// Apply the opposite transform and fail unless the input comes back
        #[arg(long, default_value_t = false)]
        check: bool,
    },

    /// Forward + inverse of 1..N; fails unless exact.
    Roundtrip {
        /// log2 of the transform length
        #[arg(long, default_value_t = 17, value_parser = clap::value_parser!(u32).range(0..=28))]
        log_n: u32,

        /// Scalar field
        #[arg(long, value_enum, default_value_t = FieldOpt::Bn254)]
        field: FieldOpt,

        /// Largest root order for the standard path
        #[arg(long)]
        max_order: Option<u32>,
    },

    /// BN254 G1 round trip of i·G plus the scalar-homomorphism check.
    GroupRoundtrip {
        /// log2 of the transform length
        #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(u32).range(0..=16))]
        log_n: u32,

        /// Representation of the input points
        #[arg(long, value_enum, default_value_t = ReprOpt::Jacobian)]
        in_repr: ReprOpt,

        /// Representation of the transformed points
        #[arg(long, value_enum, default_value_t = ReprOpt::Affine)]
        out_repr: ReprOpt,
    },
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum FieldOpt {
    /// BN254 scalar field (2-adicity 28)
    Bn254,
    /// Goldilocks, p = 2^64 - 2^32 + 1 (2-adicity 32)
    Goldilocks,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum ReprOpt {
    Affine,
    Jacobian,
}

impl From<ReprOpt> for Repr {
    fn from(r: ReprOpt) -> Self {
        match r {
            ReprOpt::Affine => Self::Affine,
            ReprOpt::Jacobian => Self::Jacobian,
        }
    }
}

/// JSON input entry: integers or decimal strings.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum Scalar {
    Int(u64),
    Dec(String),
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Fft {
            input,
            output,
            inverse,
            field,
            max_order,
            config,
            check,
        } => {
            let cfg = load_config(config.as_deref())?;
            let direction = if inverse {
                Direction::Inverse
            } else {
                Direction::Forward
            };
            let opts = TransformOptions { max_order };
            let out = output.as_deref();
            match field {
                FieldOpt::Bn254 => fft_file::<Fr>(cfg, &input, out, direction, opts, check),
                FieldOpt::Goldilocks => {
                    fft_file::<Goldilocks>(cfg, &input, out, direction, opts, check)
                }
            }
        }

        Cmd::Roundtrip {
            log_n,
            field,
            max_order,
        } => {
            let opts = TransformOptions { max_order };
            match field {
                FieldOpt::Bn254 => roundtrip::<Fr>(log_n, opts),
                FieldOpt::Goldilocks => roundtrip::<Goldilocks>(log_n, opts),
            }
        }

        Cmd::GroupRoundtrip {
            log_n,
            in_repr,
            out_repr,
        } => group_roundtrip(log_n, in_repr.into(), out_repr.into()),
    }
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(p) => EngineConfig::load(p),
        None => Ok(EngineConfig::default().with_env_overrides()),
    }
}

/// Ensure the parent directory for a file exists.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating parent directory {}", dir.display()))?;
        }
    }
    Ok(())
}

/// Decimal digits to a field element; `None` unless the value is `< p`.
fn parse_canonical<F: FieldDomain>(dec: &str) -> Option<F> {
    if dec.is_empty() || !dec.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut acc = F::BigInt::from(0u64);
    for b in dec.bytes() {
        // acc = 10·acc + digit, rejecting limb overflow.
        let mut twice = acc;
        if twice.mul2() {
            return None;
        }
        let mut ten = twice;
        if ten.mul2() || ten.mul2() || ten.add_with_carry(&twice) {
            return None;
        }
        if ten.add_with_carry(&F::BigInt::from(u64::from(b - b'0'))) {
            return None;
        }
        acc = ten;
    }
    F::from_bigint(acc)
}

fn parse_scalars<F: FieldDomain>(raw: Vec<Scalar>) -> Result<Vec<F>> {
    raw.into_iter()
        .enumerate()
        .map(|(i, s)| match s {
            Scalar::Int(v) => parse_canonical(&v.to_string())
                .ok_or_else(|| anyhow!("entry {i}: {v} is not a canonical field element")),
            Scalar::Dec(d) => parse_canonical(d.trim())
                .ok_or_else(|| anyhow!("entry {i}: {d:?} is not a canonical field element")),
        })
        .collect()
}

fn fft_file<F: FieldDomain>(
    cfg: EngineConfig,
    input: &Path,
    output: Option<&Path>,
    direction: Direction,
    opts: TransformOptions,
    check: bool,
) -> Result<()> {
    let f = File::open(input).with_context(|| format!("open {}", input.display()))?;
    let raw: Vec<Scalar> = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse JSON array from {}", input.display()))?;
    let values = parse_scalars::<F>(raw)?;

    let engine = FftEngine::<F>::new(cfg).context("start engine")?;
    info!(n = values.len(), ?direction, input = %input.display(), "transforming");

    let mut out = values.clone();
    let t0 = Instant::now();
    engine
        .transform_field(&mut out, direction, opts)
        .context("transform")?;
    let elapsed = t0.elapsed();

    if check {
        let mut back = out.clone();
        engine
            .transform_field(&mut back, direction.flip(), opts)
            .context("check transform")?;
        if back != values {
            bail!("check failed: opposite transform did not reproduce the input");
        }
        info!("check passed");
    }
    engine.close();

    let rendered: Vec<String> = out.iter().map(ToString::to_string).collect();
    match output {
        Some(path) => {
            ensure_parent_dir(path)?;
            let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, &rendered).context("serialize output")?;
            w.write_all(b"\n")?;
            w.flush()?;
            println!(
                "{:?} transform of {} elements in {:.3?} → {}",
                direction,
                out.len(),
                elapsed,
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, &rendered).context("serialize output")?;
            w.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn roundtrip<F: FieldDomain>(log_n: u32, opts: TransformOptions) -> Result<()> {
    let engine = FftEngine::<F>::new(load_config(None)?).context("start engine")?;
    let n = 1u64 << log_n;
    let ramp: Vec<F> = (1..=n).map(F::from).collect();

    let t0 = Instant::now();
    let mut v = ramp.clone();
    engine.transform_field(&mut v, Direction::Forward, opts)?;
    let t_fwd = t0.elapsed();
    engine.transform_field(&mut v, Direction::Inverse, opts)?;
    let t_total = t0.elapsed();
    engine.close();

    if v != ramp {
        bail!("round trip of 2^{log_n} elements was not exact");
    }
    println!(
        "Round trip OK: N=2^{log_n}, usable order {}, forward {:.3?}, total {:.3?}",
        opts.usable_order::<F>(),
        t_fwd,
        t_total
    );
    Ok(())
}

fn group_roundtrip(log_n: u32, in_repr: Repr, out_repr: Repr) -> Result<()> {
    let engine = FftEngine::<Fr>::new(load_config(None)?).context("start engine")?;
    let n = 1u64 << log_n;
    let g = G1Projective::generator();
    let scalars: Vec<Fr> = (1..=n).map(Fr::from).collect();
    let input =
        PointBuffer::<G1Config>::Jacobian(scalars.iter().map(|s| g * s).collect()).into_repr(in_repr);

    let t0 = Instant::now();
    let evals = engine.forward_group(input.clone(), out_repr)?;
    let t_fwd = t0.elapsed();

    // Scalar homomorphism: FFT(a_i·G) == FFT(a)_j·G.
    let field_evals = engine.forward_field(&scalars)?;
    let expected = PointBuffer::<G1Config>::Jacobian(field_evals.iter().map(|y| g * y).collect());
    if evals != expected {
        bail!("group transform disagrees with the field transform times G");
    }

    let back = engine.inverse_group(evals, in_repr)?;
    let t_total = t0.elapsed();
    engine.close();

    if back != input {
        bail!("group round trip of 2^{log_n} points was not exact");
    }
    if back.repr() != in_repr {
        bail!("round trip returned {:?}, expected {in_repr:?}", back.repr());
    }
    println!(
        "Group round trip OK: N=2^{log_n}, {in_repr:?} → {out_repr:?} → {in_repr:?}, forward {t_fwd:.3?}, total {t_total:.3?}"
    );
    Ok(())
}
