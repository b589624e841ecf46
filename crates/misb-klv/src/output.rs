use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use misb_klv_decode::{FieldSpec, Packet, PacketBatch, Value};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line.
    Json,
    /// Bordered tables.
    Table,
    /// Plain `key=value` lines.
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn print_batch(batch: &PacketBatch, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(batch).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            if !batch.packets.is_empty() {
                println!("{}", batch_table(batch));
            }
            if batch.dropped_count > 0 {
                println!("dropped: {}", batch.dropped_count);
            }
        }
        OutputFormat::Pretty => {
            for packet in &batch.packets {
                print_packet_lines(packet);
            }
            if batch.dropped_count > 0 {
                println!("dropped={}", batch.dropped_count);
            }
        }
    }
}

fn batch_table(batch: &PacketBatch) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["PACKET", "TAG", "NAME", "VALUE"]);

    for (index, packet) in batch.packets.iter().enumerate() {
        for field in packet.fields() {
            table.add_row(vec![
                index.to_string(),
                field.tag.to_string(),
                field.name.to_string(),
                value_text(field.value.as_ref()),
            ]);
        }
        table.add_row(vec![
            index.to_string(),
            "1".to_string(),
            "checksum".to_string(),
            checksum_text(packet),
        ]);
    }
    table
}

fn print_packet_lines(packet: &Packet) {
    println!("packet fields={} checksum={}", packet.len(), checksum_text(packet));
    for field in packet.fields() {
        println!(
            "  tag={} {}={}",
            field.tag,
            field.name,
            value_text(field.value.as_ref())
        );
    }
}

fn checksum_text(packet: &Packet) -> String {
    let status = if packet.checksum_valid { "ok" } else { "mismatch" };
    format!("0x{:04X} ({status})", packet.checksum)
}

fn value_text(value: Option<&Value>) -> String {
    value.map_or_else(|| "-".to_string(), Value::to_string)
}

#[derive(Serialize)]
struct TagOutput<'a> {
    tag: u8,
    name: &'a str,
    label: &'a str,
    rule: String,
}

pub fn print_tags(fields: &[FieldSpec], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out: Vec<TagOutput<'_>> = fields
                .iter()
                .map(|field| TagOutput {
                    tag: field.tag,
                    name: field.name,
                    label: field.label,
                    rule: field.rule.to_string(),
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["TAG", "NAME", "LABEL", "RULE"]);
            for field in fields {
                table.add_row(vec![
                    field.tag.to_string(),
                    field.name.to_string(),
                    field.label.to_string(),
                    field.rule.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for field in fields {
                println!(
                    "{:>3} {} ({}): {}",
                    field.tag, field.name, field.label, field.rule
                );
            }
        }
    }
}
