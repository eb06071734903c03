//! JSON output.

use serde::Serialize;

use mfdump_core::display::hex;
use mfdump_core::report::TaggedRange;
use mfdump_core::{BlockRole, Condition, Report, SectorKind};

use crate::CliError;

#[derive(Serialize)]
struct JsonReport {
    size: usize,
    card_type: &'static str,
    sectors: usize,
    card: JsonCard,
    invalid_blocks: usize,
    rows: Vec<JsonRow>,
}

#[derive(Serialize)]
struct JsonCard {
    uid: String,
    bcc: String,
    bcc_valid: bool,
    sak: String,
    sak_description: Option<&'static str>,
    atqa: String,
}

#[derive(Serialize)]
struct JsonRow {
    sector: usize,
    sector_kind: SectorKind,
    block: usize,
    role: BlockRole,
    slot: usize,
    data: String,
    tags: &'static [TaggedRange],
    /// `C1C2C3` bits, absent when the access bits fail their check
    condition: Option<&'static str>,
    error: Option<String>,
    permissions: &'static str,
}

fn to_json_report(report: &Report<'_>) -> JsonReport {
    let geometry = report.geometry();
    let card = report.card();

    let rows = report
        .rows()
        .map(|row| JsonRow {
            sector: row.sector,
            sector_kind: row.sector_kind,
            block: row.block,
            role: row.role,
            slot: row.slot,
            data: hex(row.data),
            tags: row.tags,
            condition: row.condition.access_condition().map(|c| c.bits()),
            error: match row.condition {
                Condition::Valid(_) => None,
                Condition::Invalid(e) => Some(e.to_string()),
            },
            permissions: row.permissions,
        })
        .collect::<Vec<_>>();

    JsonReport {
        size: geometry.size(),
        card_type: geometry.card_type().display_name(),
        sectors: geometry.sector_count(),
        card: JsonCard {
            uid: hex(&card.uid),
            bcc: format!("{:02x}", card.bcc),
            bcc_valid: card.bcc_valid(),
            sak: format!("{:02x}", card.sak),
            sak_description: card.sak_description(),
            atqa: hex(&card.atqa),
        },
        invalid_blocks: rows.iter().filter(|r| r.condition.is_none()).count(),
        rows,
    }
}

/// Serialize the report as pretty-printed JSON.
pub(crate) fn render(report: &Report<'_>) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(&to_json_report(report))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mfdump_core::ReportOptions;

    fn make_mini(access: [u8; 4]) -> Vec<u8> {
        let mut dump = vec![0u8; 320];
        for sector in 0..5 {
            let trailer = sector * 64 + 48;
            dump[trailer + 6..trailer + 10].copy_from_slice(&access);
        }
        dump
    }

    #[test]
    fn test_json_document() {
        let dump = make_mini([0xFF, 0x07, 0x80, 0x69]);
        let report = Report::build(&dump, &ReportOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&render(&report).unwrap()).unwrap();

        assert_eq!(value["size"], 320);
        assert_eq!(value["sectors"], 5);
        assert_eq!(value["card_type"], "Mifare Mini");
        assert_eq!(value["invalid_blocks"], 0);
        assert_eq!(value["rows"].as_array().unwrap().len(), 20);

        let first = &value["rows"][0];
        assert_eq!(first["role"], "manufacturer");
        assert_eq!(first["condition"], "000");
        assert_eq!(first["permissions"], "-");

        let trailer = &value["rows"][3];
        assert_eq!(trailer["role"], "trailer");
        assert_eq!(trailer["condition"], "001");
        assert_eq!(trailer["tags"][1]["tag"], "access_bits");
        assert_eq!(trailer["tags"][1]["range"]["start"], 6);
        assert_eq!(trailer["data"], "000000000000ff078069000000000000");
    }

    #[test]
    fn test_json_invalid_rows() {
        let dump = make_mini([0x00; 4]);
        let report = Report::build(&dump, &ReportOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&render(&report).unwrap()).unwrap();

        assert_eq!(value["invalid_blocks"], 20);
        let row = &value["rows"][5];
        assert!(row["condition"].is_null());
        assert_eq!(row["permissions"], "");
        assert!(row["error"].as_str().unwrap().contains("slot 1"));
    }
}
