//! CLI companion for the OTTL playground.
//!
//! Usage:
//!   ottl-link encode <config.yaml> <payload.json> [-e filter_processor] [--base-url URL]
//!   ottl-link decode <token-or-url>
//!   ottl-link examples [-e transform_processor] [--json]
//!   ottl-link classify <payload.json>
//!   ottl-link sample <logs|traces|metrics>

use clap::{Parser, Subcommand};
use ottl_playground::{
    DEFAULT_EVALUATOR, OtlpType, PlaygroundState, classify_payload, evaluator_ids, examples_for,
    payload_example_for, pretty_json, share_url, token_from_link,
};
use std::fs;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Build, inspect and decode OTTL playground share links.
#[derive(Parser)]
#[command(name = "ottl-link")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pack a config and payload into a share-link token
    Encode {
        /// Processor config file
        config: String,
        /// OTLP JSON payload file (or /dev/stdin)
        payload: String,
        /// Evaluator id
        #[arg(short, long, default_value = DEFAULT_EVALUATOR)]
        evaluator: String,
        /// Print a full URL on this page instead of a bare token
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Print the state stored in a token or share URL
    Decode {
        /// Token, `#token`, or a URL whose fragment is the token
        link: String,
    },
    /// List the built-in config examples
    Examples {
        /// Only list examples for this evaluator
        #[arg(short, long)]
        evaluator: Option<String>,
        /// Print the examples, configs included, as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print which OTLP signal a payload file carries
    Classify {
        /// OTLP JSON payload file (or /dev/stdin)
        payload: String,
    },
    /// Print the built-in sample payload for a signal
    Sample {
        /// logs, traces or metrics
        otlp_type: OtlpType,
    },
}

fn read_file(path: &str, what: &str) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {what} file '{path}': {e}");
            process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Encode {
            config,
            payload,
            evaluator,
            base_url,
        } => {
            let state = PlaygroundState {
                config: read_file(&config, "config"),
                payload: read_file(&payload, "payload"),
                evaluator,
            };
            let token = state.encode();
            debug!(len = token.len(), "encoded share link");
            match base_url {
                Some(base) => println!("{}", share_url(&base, &token)),
                None => println!("{token}"),
            }
        }
        Command::Decode { link } => match PlaygroundState::parse_token(token_from_link(&link)) {
            Ok(state) => {
                println!("evaluator: {}", state.evaluator);
                println!("--- config");
                println!("{}", state.config);
                println!("--- payload");
                println!("{}", state.payload);
            }
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        },
        Command::Examples { evaluator, json } => {
            let ids: Vec<&str> = match evaluator.as_deref() {
                Some(id) => vec![id],
                None => evaluator_ids().collect(),
            };
            if json {
                let catalog: serde_json::Map<String, serde_json::Value> = ids
                    .iter()
                    .map(|id| {
                        let examples = serde_json::to_value(examples_for(id))
                            .unwrap_or(serde_json::Value::Null);
                        (id.to_string(), examples)
                    })
                    .collect();
                match serde_json::to_string_pretty(&catalog) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        process::exit(1);
                    }
                }
                return;
            }
            for id in ids {
                println!("{id}:");
                for example in examples_for(id) {
                    println!("  {:<40} {}", example.name, example.otlp_type);
                }
            }
        }
        Command::Classify { payload } => {
            match classify_payload(&read_file(&payload, "payload")) {
                Ok(otlp_type) => println!("{otlp_type}"),
                Err(e) => {
                    eprintln!("Invalid OTLP JSON payload: {e}");
                    process::exit(1);
                }
            }
        }
        Command::Sample { otlp_type } => {
            let sample = payload_example_for(otlp_type);
            println!("{}", pretty_json(sample).unwrap_or_else(|_| sample.to_string()));
        }
    }
}
