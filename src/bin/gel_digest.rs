use anyhow::{Context, Result, anyhow, bail};
use gel_digest::{
    config::DigestConfig,
    digest::digest_all,
    dna_sequence::DnaSequence,
    enzymes::EnzymeSet,
    gel_render::{export_gel_svg, render_ascii_gel, write_bands_csv},
    report::RunReport,
};
use std::{env, io};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Svg,
    Csv,
}

impl OutputFormat {
    fn parse(text: &str) -> Result<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "svg" => Ok(Self::Svg),
            "csv" => Ok(Self::Csv),
            other => Err(anyhow!(
                "Unknown output format '{other}', expected text, json, svg or csv"
            )),
        }
    }
}

struct Args {
    config_path: Option<String>,
    format: OutputFormat,
    sequence_path: String,
    enzymes_path: String,
}

fn usage() {
    eprintln!(
        "Usage:\n  \
  gel_digest [--config PATH] [--format text|json|svg|csv] SEQUENCE.fasta ENZYMES.json\n\n  \
  Set RUST_LOG=debug for diagnostics on stderr"
    );
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut config_path = None;
    let mut format = OutputFormat::Text;
    let mut positional = vec![];
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().context("Missing path after --config")?;
                config_path = Some(path.clone());
            }
            "--format" => {
                let value = iter.next().context("Missing value after --format")?;
                format = OutputFormat::parse(value)?;
            }
            flag if flag.starts_with("--") => bail!("Unknown option '{flag}'"),
            _ => positional.push(arg.clone()),
        }
    }
    let [sequence_path, enzymes_path] = <[String; 2]>::try_from(positional)
        .map_err(|p| anyhow!("Expected SEQUENCE.fasta and ENZYMES.json, got {} argument(s)", p.len()))?;
    Ok(Args {
        config_path,
        format,
        sequence_path,
        enzymes_path,
    })
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() <= 1 || args.iter().any(|a| a == "--help" || a == "-h") {
        usage();
        if args.len() <= 1 {
            bail!("Missing arguments");
        }
        return Ok(());
    }
    let args = parse_args(&args).inspect_err(|_| usage())?;

    let config = match &args.config_path {
        Some(path) => DigestConfig::load_from_path(path)?,
        None => DigestConfig::default(),
    };
    let model = config.migration_model()?;

    let seq = DnaSequence::from_fasta_file(&args.sequence_path)?;
    let enzymes = EnzymeSet::from_path(&args.enzymes_path, &config.alphabet)?;
    info!(
        sequence = seq.name().unwrap_or("-"),
        length = seq.len(),
        enzymes = enzymes.len(),
        "starting digest"
    );

    let run = digest_all(&seq, enzymes.restriction_enzymes())?;
    let bands = model.migrate(&run.gel_lanes())?;

    match args.format {
        OutputFormat::Text => {
            let report = RunReport::new(seq.name(), &run, enzymes.restriction_enzymes(), vec![]);
            print!("{report}");
            print!("{}", render_ascii_gel(&bands, &config.ascii));
        }
        OutputFormat::Json => {
            let report = RunReport::new(seq.name(), &run, enzymes.restriction_enzymes(), bands);
            let text = serde_json::to_string_pretty(&report)
                .context("Could not serialize JSON output")?;
            println!("{text}");
        }
        OutputFormat::Svg => println!("{}", export_gel_svg(&bands, &config.canvas)),
        OutputFormat::Csv => write_bands_csv(&bands, io::stdout().lock())?,
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
