//! Command-line interface for schema-bridge
//!
//! # Usage Examples
//!
//! ## Synthesize a message type
//! ```bash
//! # Print UserMessage as .proto source
//! schema-bridge --schema schema.yaml synthesize --table User
//!
//! # Include the UserMessageCollection wrapper, without the password column
//! schema-bridge --schema schema.yaml synthesize --table User \
//!   --exclude password --collection
//! ```
//!
//! ## Compose
//! ```bash
//! schema-bridge --schema schema.yaml compose --table User --table Address
//! ```
//!
//! ## Translate instances
//! ```bash
//! # Record JSON -> message JSON
//! echo '{"id": 1, "born": "1990-04-01"}' | \
//!   schema-bridge --schema schema.yaml to-message --table User
//!
//! # Message JSON -> record JSON, treating Geometry columns as bytes
//! schema-bridge --schema schema.yaml to-entity --table Place \
//!   --converter Geometry=bytes --input place.json
//! ```

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use message_types::{message_from_json, message_to_json, render_proto, MessageType};
use record_core::{record_from_json, record_to_json, RecordSchema, SchemaCatalog};
use schema_bridge::config::{self, ConverterRule};
use schema_bridge::{
    collection_message, compose, model_message, to_entity, to_message, ConversionOptions,
};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "schema-bridge")]
#[command(about = "Translate between record schemas and RPC message schemas")]
#[command(long_about = None)]
struct Cli {
    /// Path to the YAML schema catalog
    #[arg(long, global = true, env = "SCHEMA_BRIDGE_SCHEMA")]
    schema: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the message type synthesized from a table as .proto source
    Synthesize {
        #[command(flatten)]
        translate: TranslateArgs,

        /// Also emit the <Name>Collection wrapper
        #[arg(long)]
        collection: bool,
    },

    /// Compose the synthesized message types of several tables
    Compose {
        /// Tables to compose, in order
        #[arg(long = "table", required = true)]
        tables: Vec<String>,

        /// Converter override (format: KIND=VARIANT, repeatable)
        #[arg(long = "converter", value_name = "RULE", value_parser = config::parse_converter_rule)]
        converters: Vec<ConverterRule>,
    },

    /// Translate a record (JSON) into a message (JSON)
    ToMessage {
        #[command(flatten)]
        translate: TranslateArgs,

        /// Input JSON file (default: stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Translate a message (JSON) into a record (JSON)
    ToEntity {
        #[command(flatten)]
        translate: TranslateArgs,

        /// Input JSON file (default: stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[derive(Args)]
struct TranslateArgs {
    /// Table (record schema) name
    #[arg(long)]
    table: String,

    /// Only these fields (comma-separated)
    #[arg(long, value_delimiter = ',')]
    only: Vec<String>,

    /// Skip these fields (comma-separated)
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Converter override (format: KIND=VARIANT, repeatable)
    #[arg(long = "converter", value_name = "RULE", value_parser = config::parse_converter_rule)]
    converters: Vec<ConverterRule>,
}

impl TranslateArgs {
    fn options(&self) -> ConversionOptions {
        ConversionOptions::new()
            .only(self.only.iter().cloned())
            .exclude(self.exclude.iter().cloned())
            .converters(config::overrides_from_rules(&self.converters))
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = match &cli.schema {
        Some(path) => config::load_catalog(path)?,
        None => anyhow::bail!("No schema catalog given (use --schema or SCHEMA_BRIDGE_SCHEMA)"),
    };
    tracing::debug!("Loaded {} tables", catalog.table_names().len());

    match cli.command {
        Commands::Synthesize {
            translate,
            collection,
        } => run_synthesize(&catalog, &translate, collection),
        Commands::Compose { tables, converters } => run_compose(&catalog, &tables, &converters),
        Commands::ToMessage { translate, input } => {
            run_to_message(&catalog, &translate, input.as_ref())
        }
        Commands::ToEntity { translate, input } => {
            run_to_entity(&catalog, &translate, input.as_ref())
        }
    }
}

fn table(catalog: &SchemaCatalog, name: &str) -> anyhow::Result<Arc<RecordSchema>> {
    catalog
        .table(name)
        .with_context(|| format!("Unknown table '{name}'"))
}

fn synthesize(schema: &RecordSchema, options: &ConversionOptions) -> anyhow::Result<MessageType> {
    model_message(schema, options)
        .with_context(|| format!("Failed to synthesize message type for '{}'", schema.name))
}

fn read_input(input: Option<&PathBuf>) -> anyhow::Result<serde_json::Value> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    serde_json::from_str(&text).context("Input is not valid JSON")
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_synthesize(
    catalog: &SchemaCatalog,
    args: &TranslateArgs,
    collection: bool,
) -> anyhow::Result<()> {
    let schema = table(catalog, &args.table)?;
    let message_type = synthesize(&schema, &args.options())?;
    tracing::info!(
        "Synthesized {} with {} fields",
        message_type.name(),
        message_type.all_fields().len()
    );

    let mut types = vec![message_type.clone()];
    if collection {
        types.push(collection_message(&message_type)?);
    }
    print!("{}", render_proto(&types));
    Ok(())
}

fn run_compose(
    catalog: &SchemaCatalog,
    tables: &[String],
    converters: &[ConverterRule],
) -> anyhow::Result<()> {
    let options = ConversionOptions::new().converters(config::overrides_from_rules(converters));
    let types = tables
        .iter()
        .map(|name| synthesize(&*table(catalog, name)?, &options))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let composed = compose(&types).context("Failed to compose message types")?;
    print!("{}", render_proto(&[composed]));
    Ok(())
}

fn run_to_message(
    catalog: &SchemaCatalog,
    args: &TranslateArgs,
    input: Option<&PathBuf>,
) -> anyhow::Result<()> {
    let schema = table(catalog, &args.table)?;
    let options = args.options();
    let message_type = synthesize(&schema, &options)?;

    let json = read_input(input)?;
    let record = record_from_json(schema.clone(), &json)
        .with_context(|| format!("Invalid record for table '{}'", schema.name))?;
    let message = to_message(&record, message_type.into(), &options)
        .with_context(|| format!("Failed to translate '{}' record", schema.name))?;

    print_json(&message_to_json(&message))
}

fn run_to_entity(
    catalog: &SchemaCatalog,
    args: &TranslateArgs,
    input: Option<&PathBuf>,
) -> anyhow::Result<()> {
    let schema = table(catalog, &args.table)?;
    let options = args.options();
    let message_type = synthesize(&schema, &options)?;

    let json = read_input(input)?;
    let message = message_from_json(&message_type, &json)
        .with_context(|| format!("Invalid message for type '{}'", message_type.name()))?;
    let record = to_entity(&message, schema.clone().into(), &options)
        .with_context(|| format!("Failed to translate '{}' message", message_type.name()))?;

    print_json(&record_to_json(&record))
}
