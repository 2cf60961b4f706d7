use std::fs;

use clap::Parser;
use lazex::Expression;
use tracing_subscriber::EnvFilter;

/// lazex evaluates expressions in an embeddable, lazily evaluated expression
/// language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells lazex to read the expression from a file instead of the
    /// command line.
    #[arg(short, long)]
    file: bool,

    /// Pre-binds a variable before evaluation, e.g. `-D x=5`. Numeric text
    /// binds as a number, `null` as null, anything else as text. May be
    /// repeated.
    #[arg(short = 'D', long = "define", value_name = "NAME=VALUE")]
    defines: Vec<String>,

    contents: String,
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env())
                             .init();

    let args = Args::parse();

    let source = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let mut expression = Expression::new(source);

    for define in &args.defines {
        match define.split_once('=') {
            Some((name, value)) => {
                expression.set_variable_text(name.trim(), value);
            },
            None => {
                eprintln!("Invalid definition '{define}'. Expected NAME=VALUE.");
                std::process::exit(1);
            },
        }
    }

    expression.set_log_output(|line| println!("{line}"));

    match expression.eval() {
        Ok(value) => println!("{value}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}
