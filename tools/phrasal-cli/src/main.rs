use anyhow::Context;
use clap::{Parser, Subcommand};
use phrasal_finder::{highlight, language_name, FinderConfig, PhraseFinder};
use phrasal_protocol::Lexicon;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Finds phrases in text regardless of inflection")]
struct Cli {
    /// Config file (TOML). Defaults to the built-in en/ru setup.
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log more (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a JSON lexicon to the rkyv binary format
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Locate phrases in a text and print them as JSON
    Find {
        #[arg(short, long)]
        text: String,

        #[arg(short, long = "phrase", required = true)]
        phrases: Vec<String>,

        /// Detected from the text when omitted
        #[arg(short, long)]
        language: Option<String>,

        /// Print the text with matches wrapped in <mark> tags instead
        #[arg(long)]
        highlight: bool,
    },
    /// Print the lemmas of a text, one per line
    Lemmatize {
        #[arg(short, long)]
        text: String,

        #[arg(short, long)]
        language: String,
    },
    /// Print the detected language of a text
    Detect {
        #[arg(short, long)]
        text: String,
    },
    /// List the configured languages
    Languages,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<FinderConfig> {
    match path {
        Some(path) => FinderConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(FinderConfig::default()),
    }
}

fn compile_lexicon(input: &Path, output: &Path) -> anyhow::Result<usize> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let lexicon: Lexicon = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a valid lexicon", input.display()))?;

    info!(
        language = %lexicon.language,
        version = lexicon.version,
        forms = lexicon.forms.len(),
        rules = lexicon.rules.len(),
        "compiling lexicon"
    );

    let bytes = phrasal_morph::compile(&lexicon)?;
    fs::write(output, bytes.as_slice())
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(bytes.len())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::Compile { input, output } = &cli.command {
        let size = compile_lexicon(input, output)?;
        println!("{} ({} bytes)", output.display(), size);
        return Ok(());
    }

    let config = load_config(cli.config.as_deref())?;
    let finder = PhraseFinder::from_config(&config)?;

    match cli.command {
        Command::Compile { .. } => {}
        Command::Find {
            text,
            phrases,
            language,
            highlight: as_markup,
        } => {
            let matches = finder.find_phrases(&text, phrases.as_slice(), language.as_deref())?;
            if as_markup {
                println!("{}", highlight(&text, &matches, "mark"));
            } else {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            }
        }
        Command::Lemmatize { text, language } => {
            for lemma in finder.lemmatize(&text, &language)? {
                println!("{}", lemma);
            }
        }
        Command::Detect { text } => {
            let code = finder.detect_language(&text);
            println!("{}\t{}", code, language_name(&code));
        }
        Command::Languages => {
            let resources = finder.resources();
            for code in resources.languages() {
                let marker = if code == resources.default_language() { "*" } else { " " };
                println!("{} {}\t{}", marker, code, language_name(&code));
            }
        }
    }

    Ok(())
}
