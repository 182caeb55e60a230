use std::{env, fs};

use anyhow::{bail, Context, Result};
use ethernity_asm::{decode_input, disassemble_records, to_json, write_disassembled, DisassemblyConfig};
use ethernity_core::evm_table;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <BYTECODE_HEX|@file> [--json] [--config file.json]", args[0]);
        std::process::exit(1);
    }

    let mut json = false;
    let mut config = DisassemblyConfig::default();
    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--config" => {
                let path = rest.next().context("--config requires a path")?;
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {path}"))?;
                config = DisassemblyConfig::from_json(&raw)?;
            }
            other => bail!("unknown argument: {other}"),
        }
    }

    let input = match args[1].strip_prefix('@') {
        Some(path) => fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?,
        None => args[1].clone(),
    };
    let input = input.trim();
    info!(chars = input.len(), "disassembling bytecode");

    if json {
        let code = decode_input(input, &config)?;
        let records = disassemble_records(&code, evm_table())?;
        println!("{}", to_json(&records)?);
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        write_disassembled(&mut handle, input, &config)?;
    }
    Ok(())
}
