use std::path::Path;

use ebltable_data::TauTable;

/// Unit of the energy column of an ASCII tau table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyUnit {
    Gev,
    Tev,
    Mev,
    /// log10 of the energy in GeV.
    Log10Gev,
}

impl EnergyUnit {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gev" => Some(Self::Gev),
            "tev" => Some(Self::Tev),
            "mev" => Some(Self::Mev),
            "log10gev" => Some(Self::Log10Gev),
            _ => None,
        }
    }

    pub fn to_gev(self, value: f64) -> f64 {
        match self {
            Self::Gev => value,
            Self::Tev => value * 1e3,
            Self::Mev => value / 1e3,
            Self::Log10Gev => 10f64.powf(value),
        }
    }
}

/// Parse an `(n + 1) x (m + 1)` tau table.
///
/// Format: the first row holds the m redshifts (its first entry is
/// ignored), every following row an energy followed by m optical depths.
/// Lines starting with `#` and blank lines are skipped.
pub fn parse_tau_table(path: &Path, unit: EnergyUnit) -> TauTable {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    parse_tau_table_str(&content, unit)
        .unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

pub fn parse_tau_table_str(content: &str, unit: EnergyUnit) -> Result<TauTable, String> {
    let mut rows = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.starts_with('#') && !line.trim().is_empty())
        .map(|(lineno, line)| {
            line.split_whitespace()
                .map(|w| {
                    w.parse::<f64>()
                        .map_err(|_| format!("line {}: not a number: {w}", lineno + 1))
                })
                .collect::<Result<Vec<f64>, String>>()
        });

    let header = rows.next().ok_or("empty table")??;
    if header.len() < 2 {
        return Err("header row has no redshifts".to_string());
    }
    let redshift = header[1..].to_vec();

    let mut energy_gev = Vec::new();
    let mut tau = Vec::new();
    for row in rows {
        let row = row?;
        if row.len() != redshift.len() + 1 {
            return Err(format!(
                "row for energy {} has {} values, expected {}",
                row[0],
                row.len() - 1,
                redshift.len()
            ));
        }
        energy_gev.push(unit.to_gev(row[0]));
        tau.push(row[1..].to_vec());
    }

    Ok(TauTable {
        redshift,
        energy_gev,
        tau,
    })
}
