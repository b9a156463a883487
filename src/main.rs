use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::path::PathBuf;
use systempay::application::gateway::PaymentGateway;
use systempay::config::GatewayConfig;
use systempay::domain::fields::FieldSet;
use systempay::interfaces::form::{hidden_inputs, parse_field};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the gateway configuration (JSON)
    #[arg(long)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the signed payment form for a set of name=value fields
    Sign {
        /// Render hidden HTML inputs instead of name=value lines
        #[arg(long)]
        html: bool,

        /// Unprefixed field values, e.g. amount=1000 currency=978
        fields: Vec<String>,
    },
    /// Verify a gateway callback given as prefixed name=value pairs
    Verify {
        /// Response fields as sent by the gateway, including the signature
        fields: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file = File::open(&cli.config).into_diagnostic()?;
    let config: GatewayConfig = serde_json::from_reader(file).into_diagnostic()?;
    let gateway = PaymentGateway::from_config(&config).into_diagnostic()?;

    match cli.command {
        Command::Sign { html, fields } => {
            let mut set = config.default_fields();
            for arg in &fields {
                let (name, value) = parse_field(arg).into_diagnostic()?;
                set.set(name, value);
            }

            let form = gateway.build_form_fields(&set);
            if html {
                println!("{}", hidden_inputs(&form));
            } else {
                for (name, value) in form.iter() {
                    println!("{name}={value}");
                }
            }
        }
        Command::Verify { fields } => {
            let mut set = FieldSet::new();
            for arg in &fields {
                let (name, value) = parse_field(arg).into_diagnostic()?;
                set.set(name, value);
            }

            let verified = gateway.verify_response(&set).into_diagnostic()?;
            println!("signature valid, status: {}", verified.status);
        }
    }

    Ok(())
}
