use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use itertools::Itertools;
use log::{error, info};

use smt::config::Config;
use smt::corpus::{convert, file::load};
use smt::ibm_model_1::file::{load_summary, save_summary, summary_to_json};
use smt::ibm_model_1::summary::summarize;
use smt::ibm_model_1::train_model;
use smt::translate::Translator;

#[derive(Parser, Debug)]
#[command(author, version, about = "IBM Model 1 word translation trainer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train a translation table on a json corpus
    Train(TrainArgs),
    /// Translate a sentence word by word with a trained summary
    Translate {
        #[arg(short = 'm', long = "model", default_value = "data/output.json")]
        model: String,
        #[arg(required = true)]
        sentence: Vec<String>,
    },
    /// Convert a two-column csv into a json corpus
    Convert {
        #[arg(short = 'i', long = "input")]
        input: String,
        #[arg(short = 'o', long = "output")]
        output: String,
    },
}

#[derive(Args, Debug)]
struct TrainArgs {
    /// Corpus file, `-` for stdin
    #[arg(short = 'c', long = "corpus", default_value = "data/sentences.json")]
    corpus: String,
    /// Best translation per word; printed to stdout when omitted
    #[arg(short = 'o', long = "output")]
    output: Option<String>,
    /// Full probability table
    #[arg(long = "model-output")]
    model_output: Option<String>,
    #[arg(long = "config")]
    config: Option<String>,
    #[arg(short = 'e', long = "epsilon")]
    epsilon: Option<f64>,
    /// 0 trains until convergence
    #[arg(short = 'n', long = "max-iterations")]
    max_iterations: Option<usize>,
    #[arg(long = "target-field")]
    target_field: Option<String>,
    #[arg(long = "source-field")]
    source_field: Option<String>,
    #[arg(short = 'v', long = "verbose", default_value_t = false)]
    verbose: bool,
}

fn read_config(args: &TrainArgs) -> smt::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::read(path)?,
        None => Config::default(),
    };
    if let Some(epsilon) = args.epsilon {
        config.training.epsilon = epsilon;
    }
    if let Some(max_iterations) = args.max_iterations {
        config.training.max_iterations = if max_iterations == 0 { None } else { Some(max_iterations) };
    }
    if let Some(field) = &args.target_field {
        config.corpus.target_field = field.clone();
    }
    if let Some(field) = &args.source_field {
        config.corpus.source_field = field.clone();
    }
    config.training.verbose |= args.verbose;
    Ok(config)
}

fn train(args: TrainArgs) -> smt::Result<()> {
    let config = read_config(&args)?;
    let corpus = load(&args.corpus, &config.corpus)?;

    let trained = train_model(&corpus, config.training)?;
    if let Some(path) = &args.model_output {
        trained.save(path)?;
    }

    let summary = summarize(&trained);
    match &args.output {
        Some(path) => save_summary(&summary, path)?,
        None => println!("{}", summary_to_json(&summary)?.dump()),
    }
    Ok(())
}

fn run(cli: Cli) -> smt::Result<()> {
    match cli.command {
        Command::Train(args) => train(args),
        Command::Translate { model, sentence } => {
            let translator = Translator::new(load_summary(&model)?)?;
            println!("{}", translator.translate(&sentence.iter().join(" ")));
            Ok(())
        }
        Command::Convert { input, output } => {
            let n = convert::convert_file(&input, &output)?;
            info!("Converted {} sentence pairs", n);
            Ok(())
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        error!("{}", e);
        std::process::exit(1);
    }
}
