use std::path::PathBuf;
use std::process;

use ansi_nist::nist::codec::check_digit;
use ansi_nist::{Field, NistFile, NistReader, NistWriter, ReadOptions};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "nist", version, about = "Inspect and rewrite ANSI/NIST-ITL transaction files")]
struct Cli {
    /// Fail on record types outside 1-17 instead of skipping them.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the table of contents and every record's fields.
    Dump { file: PathBuf },
    /// Read a file and write it back out.
    Roundtrip { input: PathBuf, output: PathBuf },
    /// Append the check character to a ten-digit control number.
    CheckDigit { digits: String },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("\nERROR: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let reader = NistReader::with_options(ReadOptions {
        skip_unknown_types: !cli.strict,
    });

    match cli.cmd {
        Cmd::Dump { file } => {
            let nist = reader
                .open(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            print_file(&nist)?;
        }
        Cmd::Roundtrip { input, output } => {
            let nist = reader
                .open(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            NistWriter::new()
                .write_to_path(&nist, &output)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!(
                "Wrote {} records from {} to {}",
                nist.record_count(),
                input.display(),
                output.display()
            );
        }
        Cmd::CheckDigit { digits } => {
            println!("{}", check_digit::with_check_digit(&digits)?);
        }
    }
    Ok(())
}

fn print_file(nist: &NistFile) -> Result<()> {
    let contents = nist.table_of_contents()?;
    println!("{}", "=".repeat(60));
    println!("Records declared: {}", contents.declared_count().unwrap_or_default());
    for entry in contents.body_entries() {
        println!("  type {:>2}  IDC {}", entry.record_type, entry.idc);
    }
    println!("{}", "=".repeat(60));

    for record in nist.iter() {
        println!("\nType-{} {}", record.record_type(), record.label());
        for (field_id, field) in record.fields() {
            match field {
                Field::Text(value) => println!(
                    "  {}.{:03}: {}",
                    record.record_type(),
                    field_id,
                    value.replace(['\u{1e}', '\u{1f}'], " | ")
                ),
                Field::Binary(bytes) => println!(
                    "  {}.{:03}: <{} bytes>",
                    record.record_type(),
                    field_id,
                    bytes.len()
                ),
            }
        }
    }
    Ok(())
}
