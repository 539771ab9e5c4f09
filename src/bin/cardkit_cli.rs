//! cardkit CLI - Bridge interface for host tooling
//!
//! Commands: layouts, validate, sanitize, vcard, render, defaults
//! Outputs JSON to stdout
//! Returns non-zero on validation failure

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use cardkit_core::{
    validate_card_json, CardController, CardData, LayoutRegistry, NoIslands, RecordedActions,
    SourceAttributes,
};

#[derive(Parser)]
#[command(name = "cardkit-cli")]
#[command(about = "cardkit CLI - Digital Business Card Components")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available layouts
    Layouts,

    /// Validate card data
    Validate {
        /// JSON payload (CardData)
        #[arg(short, long)]
        payload: String,
    },

    /// Sanitize card data and print the clean record
    Sanitize {
        /// JSON payload (CardData)
        #[arg(short, long)]
        payload: String,
    },

    /// Generate vCard text for card data
    Vcard {
        /// JSON payload (CardData)
        #[arg(short, long)]
        payload: String,
    },

    /// Render a layout to markup
    Render {
        /// Layout id
        #[arg(short, long, default_value = "classic")]
        layout: String,

        /// JSON payload (CardData)
        #[arg(short, long)]
        payload: String,

        /// JSON config overrides
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Print the default card data skeleton
    Defaults,
}

fn parse_card(payload: &str) -> Result<CardData, String> {
    serde_json::from_str(payload).map_err(|e| format!("Invalid payload: {}", e))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = LayoutRegistry::with_builtin_layouts();

    match cli.command {
        Commands::Layouts => {
            let layouts: Vec<_> = registry
                .ids()
                .iter()
                .map(|id| serde_json::json!({ "id": id }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&layouts).unwrap());
            ExitCode::SUCCESS
        }

        Commands::Validate { payload } => {
            let value: serde_json::Value = match serde_json::from_str(&payload) {
                Ok(v) => v,
                Err(e) => {
                    println!(r#"{{"valid": false, "error": "Invalid payload: {}"}}"#, e);
                    return ExitCode::FAILURE;
                }
            };
            let report = validate_card_json(&value);
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
            if report.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2) // Validation failure
            }
        }

        Commands::Sanitize { payload } => match parse_card(&payload) {
            Ok(card) => {
                let clean = cardkit_core::sanitize_card_data(&card);
                println!("{}", serde_json::to_string_pretty(&clean).unwrap());
                ExitCode::SUCCESS
            }
            Err(e) => {
                println!(r#"{{"error": "{}"}}"#, e);
                ExitCode::FAILURE
            }
        },

        Commands::Vcard { payload } => match parse_card(&payload) {
            Ok(card) => {
                let output = serde_json::json!({
                    "filename": cardkit_core::vcard_filename(&card),
                    "media_type": cardkit_core::VCARD_MEDIA_TYPE,
                    "vcard": cardkit_core::generate_vcard(&card),
                });
                println!("{}", serde_json::to_string_pretty(&output).unwrap());
                ExitCode::SUCCESS
            }
            Err(e) => {
                println!(r#"{{"error": "{}"}}"#, e);
                ExitCode::FAILURE
            }
        },

        Commands::Render {
            layout,
            payload,
            config,
        } => {
            let Some(renderer) = registry.create(&layout) else {
                println!(r#"{{"error": "Layout not found: {}"}}"#, layout);
                return ExitCode::FAILURE;
            };

            let attrs = SourceAttributes {
                card_data: Some(payload),
                config,
                ..SourceAttributes::default()
            };
            let mut controller =
                CardController::new(renderer, Box::<RecordedActions>::default());
            controller.mount(&attrs, &NoIslands);

            let output = serde_json::json!({
                "layout": layout,
                "markup": controller.output(),
                "skeleton": controller.skeleton(),
            });
            println!("{}", serde_json::to_string_pretty(&output).unwrap());
            ExitCode::SUCCESS
        }

        Commands::Defaults => {
            println!(
                "{}",
                serde_json::to_string_pretty(&CardData::default()).unwrap()
            );
            ExitCode::SUCCESS
        }
    }
}
