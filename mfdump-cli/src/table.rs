//! Fixed-width table output.
//!
//! Every block gets one line: sector label, block number, hex data,
//! access condition bits, permissions and the printable ASCII of data
//! blocks. Trailer bytes are colored by field (Key A red, access bits
//! green, Key B blue).

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use owo_colors::Style;

use mfdump_core::display::{ascii, hex};
use mfdump_core::{BlockRole, ByteTag, Condition, PermissionRow, Report};

const RULE: &str = "====================================================================================================";

fn key_a(text: &str) -> String {
    format!("{}", text.if_supports_color(Stdout, |t| t.red()))
}

fn access_bits(text: &str) -> String {
    format!("{}", text.if_supports_color(Stdout, |t| t.green()))
}

fn key_b(text: &str) -> String {
    format!("{}", text.if_supports_color(Stdout, |t| t.blue()))
}

fn warning(text: &str) -> String {
    let style = Style::new().bright_yellow().bold();
    format!("{}", text.if_supports_color(Stdout, |t| t.style(style)))
}

/// File size, sector count and the card preamble.
pub(crate) fn summary_lines(report: &Report<'_>) -> Vec<String> {
    let geometry = report.geometry();
    let card = report.card();

    let mut lines = vec![
        format!(
            "File size: {} bytes. Expected {} sectors ({})",
            geometry.size(),
            geometry.sector_count(),
            geometry.card_type().display_name(),
        ),
        format!("    UID:  {}", hex(&card.uid)),
    ];

    if card.bcc_valid() {
        lines.push(format!("    BCC:  {:02x}", card.bcc));
    } else {
        lines.push(format!(
            "    BCC:  {:02x} {}",
            card.bcc,
            warning(&format!("(mismatch, expected {:02x})", card.expected_bcc())),
        ));
    }

    match card.sak_description() {
        Some(desc) => lines.push(format!("    SAK:  {:02x} ({})", card.sak, desc)),
        None => lines.push(format!("    SAK:  {:02x}", card.sak)),
    }
    lines.push(format!("    ATQA: {}", hex(&card.atqa)));
    lines
}

/// Column headers.
pub(crate) fn header_lines() -> Vec<String> {
    vec![
        RULE.to_string(),
        "| Sect | Blck |            Data                  | Access |  r  |  w    |  i  | d/t/r [info]       |".to_string(),
        "|      |      |                                  |  cond. |   A | Acc.  | B                        |".to_string(),
        format!(
            "|      |      | {}      {}     {} |        | r w | r   w | r w                      |",
            key_a("Key A"),
            access_bits("Access Bits"),
            key_b("Key B"),
        ),
    ]
}

fn data_column(row: &PermissionRow<'_>) -> String {
    row.segments()
        .into_iter()
        .map(|(tag, bytes)| {
            let text = hex(bytes);
            match tag {
                Some(ByteTag::KeyA) => key_a(&text),
                Some(ByteTag::AccessBits) => access_bits(&text),
                Some(ByteTag::KeyB) => key_b(&text),
                None => text,
            }
        })
        .collect()
}

fn condition_column(condition: &Condition) -> String {
    match condition {
        Condition::Valid(_) => access_bits(condition.label()),
        Condition::Invalid(_) => warning(condition.label()),
    }
}

/// One table line for a block.
pub(crate) fn row_line(row: &PermissionRow<'_>) -> String {
    let sector = if row.show_sector_label {
        row.sector.to_string()
    } else {
        String::new()
    };
    let text = match row.role {
        BlockRole::Trailer => String::new(),
        BlockRole::Manufacturer | BlockRole::Data => ascii(row.data),
    };

    let line = format!(
        "| {:<5}|  {:<3} | {} |  {}   | {:<38} | {}",
        sector,
        row.block,
        data_column(row),
        condition_column(&row.condition),
        row.permissions,
        text,
    );
    line.trim_end().to_string()
}

/// The whole report as printable lines.
pub(crate) fn render(report: &Report<'_>) -> Vec<String> {
    let mut lines = summary_lines(report);
    lines.extend(header_lines());
    for row in report.rows() {
        if row.block == 0 {
            lines.push(RULE.to_string());
        }
        lines.push(row_line(&row));
    }
    lines.push(RULE.to_string());
    lines
}
