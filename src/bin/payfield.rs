//! CLI tool for trying out the payfield widget logic.
//!
//! # Usage
//!
//! ```bash
//! # Detect the vendor of a (partial) number
//! payfield detect 4111
//!
//! # Replay keystrokes into a field, '<' is a backspace
//! payfield type 4111111111111111
//! payfield type 1225<<<< --field expiry
//!
//! # Format digits for display
//! payfield format 4111111111111111
//!
//! # Use a custom vendor table
//! payfield --config payfield.json detect 3530
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use payfield::{FieldEvent, FieldKind, PayForm, PayfieldConfig};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "payfield")]
#[command(author, version, about = "Credit card field formatting and vendor detection")]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the card vendor from a (partial) number
    Detect {
        /// Card number or prefix
        card_number: String,
    },

    /// Replay keystrokes into a field and show every displayed value
    Type {
        /// Keys to type; '<' is a backspace
        keys: String,

        /// Field to type into
        #[arg(short, long, default_value = "card")]
        field: FieldArg,
    },

    /// Format digits the way a field displays them
    Format {
        /// Digits to format
        input: String,

        /// Field whose geometry to use
        #[arg(short, long, default_value = "card")]
        field: FieldArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum FieldArg {
    Card,
    Expiry,
    Cvv,
}

impl From<FieldArg> for FieldKind {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Card => FieldKind::CardNumber,
            FieldArg::Expiry => FieldKind::Expiry,
            FieldArg::Cvv => FieldKind::Cvv,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match PayfieldConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => PayfieldConfig::default(),
    };

    let form = match PayForm::new(config) {
        Ok(form) => form,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Detect { card_number } => cmd_detect(form, &card_number, cli.output),
        Commands::Type { keys, field } => cmd_type(form, &keys, field.into(), cli.output),
        Commands::Format { input, field } => cmd_format(&form, &input, field.into(), cli.output),
    }
}

fn cmd_detect(mut form: PayForm, card_number: &str, output: OutputFormat) -> ExitCode {
    let digits = payfield::format::strip_formatting(card_number);
    if digits.is_empty() {
        eprintln!("Error: No digits provided");
        return ExitCode::FAILURE;
    }

    let update = form.input(FieldKind::CardNumber, &digits);
    match output {
        OutputFormat::Text => {
            println!("Vendor: {}", update.vendor);
            println!("Icon: {}", update.icon_class);
        }
        OutputFormat::Json => {
            println!(
                "{}",
                json!({ "vendor": update.vendor, "icon_class": update.icon_class })
            );
        }
    }
    ExitCode::SUCCESS
}

fn cmd_type(mut form: PayForm, keys: &str, kind: FieldKind, output: OutputFormat) -> ExitCode {
    let mut steps = Vec::new();

    for key in keys.chars() {
        let mut edited = form.field(kind).value().to_string();
        if key == '<' {
            edited.pop();
        } else {
            edited.push(key);
        }
        let update = form.input(kind, &edited);
        let events: Vec<String> = update.events.iter().map(describe_event).collect();

        match output {
            OutputFormat::Text => {
                let shown = format!("{:?}", update.value);
                if events.is_empty() {
                    println!("{:<24} {}", shown, update.icon_class);
                } else {
                    println!("{:<24} {} [{}]", shown, update.icon_class, events.join(", "));
                }
            }
            OutputFormat::Json => steps.push(json!({
                "key": key.to_string(),
                "value": update.value,
                "vendor": update.vendor,
                "icon_class": update.icon_class,
                "events": events,
                "auxiliary_visible": update.auxiliary_visible,
            })),
        }
    }

    if let OutputFormat::Json = output {
        println!("{}", serde_json::Value::Array(steps));
    }
    ExitCode::SUCCESS
}

fn cmd_format(form: &PayForm, input: &str, kind: FieldKind, output: OutputFormat) -> ExitCode {
    let formatted = form.spec_for(kind).format(input);
    match output {
        OutputFormat::Text => println!("{}", formatted),
        OutputFormat::Json => println!("{}", json!({ "formatted": formatted })),
    }
    ExitCode::SUCCESS
}

fn describe_event(event: &FieldEvent) -> String {
    match event {
        FieldEvent::Completed => "completed".to_string(),
        FieldEvent::Reopened => "reopened".to_string(),
        FieldEvent::VendorChanged { from, to } => format!("vendor {} -> {}", from, to),
    }
}
