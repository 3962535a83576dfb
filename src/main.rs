use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use grammar_helper::{
    grammar::interactive, CollisionPolicy, FactoringKind, Grammar, TransformOptions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Action {
    /// Eliminate left recursion
    Elr,
    /// Left factoring
    Lf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Plain,
    Latex,
    Json,
}

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Transformations to run on the input grammar (default: both)
    #[arg(value_enum)]
    actions: Vec<Action>,

    /// File containing the grammar, `A -> x | y` per line (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Prompt for each non-terminal and its productions
    #[arg(short, long, conflicts_with = "file")]
    interactive: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// What to do when A' already exists in the input
    #[arg(long, value_enum, default_value_t = CollisionPolicy::Fail)]
    on_collision: CollisionPolicy,

    #[arg(long, value_enum, default_value_t = FactoringKind::Shared)]
    factoring: FactoringKind,
}

fn render(g: &Grammar, format: OutputFormat) -> anyhow::Result<String> {
    let t = g.to_production_output_vec();
    Ok(match format {
        OutputFormat::Plain => t.to_plaintext(),
        OutputFormat::Latex => t.to_latex(),
        OutputFormat::Json => t.to_json()?,
    })
}

fn load(cli: &Cli) -> anyhow::Result<Grammar> {
    if cli.interactive {
        let stdin = io::stdin();
        return Ok(interactive::read_grammar(stdin.lock(), io::stdout())?);
    }

    let input = match &cli.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            input
        }
    };
    Ok(Grammar::parse(&input)?)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let options = TransformOptions::default()
        .with_collision(cli.on_collision)
        .with_factoring(cli.factoring);
    let actions = if cli.actions.is_empty() {
        vec![Action::Elr, Action::Lf]
    } else {
        cli.actions.clone()
    };

    let g = load(&cli)?;
    log::info!("loaded {} non-terminal(s)", g.len());

    let plain = cli.format == OutputFormat::Plain;
    if plain {
        println!("\nOriginal Grammar:");
        println!("{}", render(&g.sorted(), cli.format)?);
    }

    for action in actions {
        let (title, result) = match action {
            Action::Elr => (
                "Grammar after Left Recursion Removal:",
                g.eliminate_left_recursion_with(&options),
            ),
            Action::Lf => (
                "Grammar after Left Factoring:",
                g.left_factor_with(&options),
            ),
        };
        let transformed = result.with_context(|| format!("{:?} failed", action))?;
        if plain {
            println!("\n{}", title);
        }
        println!("{}", render(&transformed, cli.format)?);
    }

    Ok(())
}
