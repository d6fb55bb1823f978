use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use pfpforge::collection::CollectionDefinition;
use pfpforge::error::ForgeResult;
use pfpforge::record::GenerationRecord;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DistributionRow {
    pub trait_name: String,
    pub variant: String,
    pub configured: f64,
    pub count: usize,
    pub realized: f64,
}

pub fn distribution(def: &CollectionDefinition, record: &GenerationRecord) -> Vec<DistributionRow> {
    let total = record.pfps.len();
    let mut rows = Vec::new();

    for (t, tr) in def.traits.iter().enumerate() {
        let counts = record.variant_counts(t, tr.variants.len());
        for (v, variant) in tr.variants.iter().enumerate() {
            let realized = if total > 0 {
                counts[v] as f64 * 100.0 / total as f64
            } else {
                0.0
            };
            rows.push(DistributionRow {
                trait_name: tr.name.clone(),
                variant: variant.name.clone(),
                configured: variant.rarity,
                count: counts[v],
                realized,
            });
        }
    }
    rows
}

pub fn print_distribution(def: &CollectionDefinition, record: &GenerationRecord) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Trait").add_attribute(Attribute::Bold),
        Cell::new("Variant"),
        Cell::new("Config %").fg(Color::Cyan),
        Cell::new("Count"),
        Cell::new("Real %").fg(Color::Green),
        Cell::new("Delta"),
    ]);

    for i in 2..=5 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for row in distribution(def, record) {
        let delta = row.realized - row.configured;
        let delta_cell = Cell::new(format!("{:+.2}", delta));
        let delta_cell = if delta.abs() >= 1.0 {
            delta_cell.fg(Color::Red)
        } else {
            delta_cell
        };

        table.add_row(vec![
            Cell::new(&row.trait_name).add_attribute(Attribute::Bold),
            Cell::new(&row.variant),
            Cell::new(format!("{:.2}", row.configured)).fg(Color::Cyan),
            Cell::new(row.count),
            Cell::new(format!("{:.2}", row.realized)).fg(Color::Green),
            delta_cell,
        ]);
    }
    println!("\n{}", table);
}

pub fn print_top_scores(record: &GenerationRecord, limit: usize) {
    let mut ranked: Vec<_> = record.pfps.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Identifier"),
        Cell::new("Score").fg(Color::Cyan),
    ]);

    for (rank, pfp) in ranked.into_iter().take(limit).enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&pfp.unique_id),
            Cell::new(format!("{:.1}", pfp.score)).fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);
}

pub fn write_distribution_csv(
    def: &CollectionDefinition,
    record: &GenerationRecord,
    path: &str,
) -> ForgeResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in distribution(def, record) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
