//! # LDAP Schema Inspector
//!
//! A command-line utility for inspecting the object classes of an LDAP
//! subschema dump: inheritance chains and the MUST/MAY attributes an entry
//! of a class has to carry.
//!
//! ## Usage
//!
//! ### Summarize a Schema Dump
//!
//! ```bash
//! cargo run --bin schema-inspector subschema.ldif
//! ```
//!
//! ### Inspect Classes
//!
//! ```bash
//! cargo run --bin schema-inspector subschema.ldif organization inetOrgPerson
//! ```
//!
//! ### Export as JSON
//!
//! ```bash
//! cargo run --bin schema-inspector subschema.ldif --json
//! ```
//!
//! ## Output Example
//!
//! ```text
//! Loading schema dump: subschema.ldif
//! ✓ Loaded 42 object classes (47 names)
//!
//! organization (2.5.6.4, STRUCTURAL)
//!   Chain: organization -> top
//!   MUST: o, objectClass
//!   MAY: userPassword, searchGuide, seeAlso, ...
//! ```
//!
//! The dump may be an LDIF export of the subschema subentry (values of
//! `objectClasses`) or plain text with one `( ... )` definition per line.
//! Unparsable definitions are reported and skipped.
//!
//! ## Exit Codes
//!
//! - `0`: Schema loaded and all requested classes found
//! - `1`: Load failure or unknown class
//!
//! Set `RUST_LOG=debug` for ingestion details.

use ldap_schema::{IngestConfig, IngestPolicy, LdifSchemaSource, LoadedSchema, ingest::load_schema};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <schema-dump> [class...] [--json]", args[0]);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} subschema.ldif", args[0]);
        eprintln!("  {} subschema.ldif organization person", args[0]);
        eprintln!("  {} subschema.ldif --json", args[0]);
        process::exit(1);
    }

    let path = &args[1];
    let json = args[2..].iter().any(|arg| arg == "--json");
    let classes: Vec<&str> = args[2..]
        .iter()
        .filter(|arg| !arg.starts_with("--"))
        .map(String::as_str)
        .collect();

    let config = IngestConfig::default().with_policy(IngestPolicy::SkipInvalid);
    let source = LdifSchemaSource::new(path);

    if !json {
        println!("Loading schema dump: {}", path);
    }
    let schema = match load_schema(&source, &config).await {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("❌ Failed to load schema: {}", e);
            process::exit(1);
        }
    };

    if json {
        match schema.to_json().and_then(|value| serde_json::to_string_pretty(&value)) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("❌ Failed to export schema: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    print_summary(&schema);

    let mut missing = 0;
    for class in classes {
        if !print_class(&schema, class) {
            missing += 1;
        }
    }
    if missing > 0 {
        process::exit(1);
    }
}

fn print_summary(schema: &LoadedSchema) {
    let registry = &schema.registry;
    println!(
        "✓ Loaded {} object classes ({} names)",
        registry.len(),
        registry.names().len()
    );
    println!("  Fingerprint: {}", schema.fingerprint);

    for skipped in &schema.report.skipped {
        eprintln!("  ❌ Skipped definition #{}: {}", skipped.index, skipped.error);
    }
}

fn print_class(schema: &LoadedSchema, name: &str) -> bool {
    let registry = &schema.registry;
    let Some(class) = registry.get(name) else {
        eprintln!("\n❌ Unknown object class '{}'", name);
        return false;
    };

    println!();
    println!("{} ({}, {})", class.primary_name(), class.oid, class.kind);
    if !class.description.is_empty() {
        println!("  Description: {}", class.description);
    }
    if class.names.len() > 1 {
        println!("  Aliases: {}", class.names[1..].join(", "));
    }

    let (must, may) = registry.aggregated_attributes(name);
    println!("  Chain: {}", registry.inheritance_chain(name).join(" -> "));
    println!("  MUST: {}", must.join(", "));
    println!("  MAY: {}", may.join(", "));
    true
}
