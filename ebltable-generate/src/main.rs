mod parsers;

use std::io::Write;
use std::path::{Path, PathBuf};

use ebltable_data::{EblCatalog, ModelRecord, VersionRecord};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use parsers::EnergyUnit;

struct ModelSource {
    name: String,
    path: PathBuf,
    unit: EnergyUnit,
}

/// `name=path[:unit]`, unit defaulting to GeV.
fn parse_source(arg: &str) -> Option<ModelSource> {
    let (name, rest) = arg.split_once('=')?;
    let (path, unit) = match rest.rsplit_once(':') {
        Some((path, unit)) => match EnergyUnit::parse(unit) {
            Some(unit) => (path, unit),
            None => (rest, EnergyUnit::Gev),
        },
        None => (rest, EnergyUnit::Gev),
    };
    Some(ModelSource {
        name: name.to_string(),
        path: PathBuf::from(path),
        unit,
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!(
            "usage: ebltable-generate <out.bin.zst> <name>=<path>[:gev|tev|mev|log10gev] ..."
        );
        std::process::exit(2);
    }
    let out_path = Path::new(&args[0]);

    let mut models = Vec::new();
    for arg in &args[1..] {
        let Some(source) = parse_source(arg) else {
            error!(%arg, "expected <name>=<path>[:unit]");
            std::process::exit(2);
        };
        let table = parsers::parse_tau_table(&source.path, source.unit);
        info!(
            model = %source.name,
            energies = table.energy_gev.len(),
            redshifts = table.redshift.len(),
            "parsed {}",
            source.path.display()
        );
        models.push(ModelRecord {
            name: source.name,
            reference: source.path.display().to_string(),
            table,
        });
    }

    let catalog = EblCatalog {
        version: vec![VersionRecord {
            tag: env!("CARGO_PKG_VERSION").to_string(),
            date: String::new(),
            notes: format!("{} models", models.len()),
        }],
        models,
    };

    info!("serializing with postcard");
    let serialized = postcard::to_allocvec(&catalog).expect("postcard serialization failed");
    info!(bytes = serialized.len(), "serialized");

    info!("compressing with zstd (level 19)");
    let compressed = zstd::encode_all(&serialized[..], 19).expect("zstd compression failed");
    info!(
        bytes = compressed.len(),
        ratio = serialized.len() as f64 / compressed.len() as f64,
        "compressed"
    );

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create output directory");
    }
    let mut f = std::fs::File::create(out_path).expect("failed to create output file");
    f.write_all(&compressed)
        .expect("failed to write compressed data");
    info!("wrote {}", out_path.display());

    // Verify round-trip
    let decompressed = zstd::decode_all(&compressed[..]).expect("zstd decompression failed");
    assert_eq!(decompressed.len(), serialized.len());
    let back: EblCatalog =
        postcard::from_bytes(&decompressed).expect("postcard deserialization failed");
    assert_eq!(back.models.len(), catalog.models.len());
    info!("round-trip OK");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source() {
        let s = parse_source("dominguez=data/tau_dominguez.dat:tev").unwrap();
        assert_eq!(s.name, "dominguez");
        assert_eq!(s.path, PathBuf::from("data/tau_dominguez.dat"));
        assert_eq!(s.unit, EnergyUnit::Tev);

        let s = parse_source("toy=C:/tables/toy.dat").unwrap();
        assert_eq!(s.path, PathBuf::from("C:/tables/toy.dat"));
        assert_eq!(s.unit, EnergyUnit::Gev);

        assert!(parse_source("no-equals-sign").is_none());
    }
}
