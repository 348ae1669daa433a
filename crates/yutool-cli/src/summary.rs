use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use yutool_cli::types::{ExportResult, InspectReport};

pub fn print_summary(result: &ExportResult) {
    println!("Method: {}", result.identity);
    println!("Output: {}", result.target_dir.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Variant"),
        header_cell("Export"),
        header_cell("File"),
        header_cell("Lines"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for export in &result.exports {
        for file in &export.files {
            table.add_row(vec![
                variant_cell(export.variant.as_deref()),
                Cell::new(file.category.stem()).fg(Color::Blue),
                Cell::new(file_name(&file.path)),
                count_cell(file.lines),
            ]);
        }
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(result.total_lines()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if !result.documents.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Variant"),
            header_cell("Template"),
            header_cell("Document"),
            header_cell("Config version"),
            header_cell("Items"),
            header_cell("Updated"),
        ]);
        apply_summary_table_style(&mut table);
        align_column(&mut table, 4, CellAlignment::Right);
        align_column(&mut table, 5, CellAlignment::Center);
        for document in &result.documents {
            table.add_row(vec![
                variant_cell(document.variant.as_deref()),
                Cell::new(file_name(&document.template)),
                Cell::new(file_name(&document.output)),
                Cell::new(&document.config_version),
                count_cell(document.items),
                if document.template_updated {
                    Cell::new("✓")
                        .fg(Color::Green)
                        .add_attribute(Attribute::Bold)
                } else {
                    dim_cell("-")
                },
            ]);
        }
        println!();
        println!("{table}");
    }
    print_warnings(&result.warnings);
}

pub fn print_inspect(report: &InspectReport) {
    println!("Method: {}", report.identity);
    if report.files_extracted > 0 {
        println!("Files extracted: {}", report.files_extracted);
    }
    if !report.variants.is_empty() {
        println!("Variants: {}", report.variants.join(", "));
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Variant"),
        header_cell("Dictionary"),
        header_cell("Resolved file"),
        header_cell("Source"),
    ]);
    apply_summary_table_style(&mut table);
    for status in &report.dictionaries {
        let (file, source) = match &status.resolved {
            Some(resolved) => {
                let source = if resolved.is_fallback(status.variant.as_deref()) {
                    Cell::new("base (fallback)").fg(Color::Yellow)
                } else if resolved.variant.is_some() {
                    Cell::new("variant").fg(Color::Green)
                } else {
                    Cell::new("base")
                };
                (Cell::new(file_name(&resolved.path)), source)
            }
            None if status.kind.is_optional() => {
                (dim_cell("-"), Cell::new("missing (optional)").fg(Color::Yellow))
            }
            None => (
                dim_cell("-"),
                Cell::new("missing")
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold),
            ),
        };
        table.add_row(vec![
            variant_cell(status.variant.as_deref()),
            Cell::new(status.kind.as_str()).fg(Color::Blue),
            file,
            source,
        ]);
    }
    println!("{table}");
}

fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    eprintln!("Warnings:");
    for warning in warnings {
        eprintln!("- {warning}");
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn variant_cell(variant: Option<&str>) -> Cell {
    match variant {
        Some(variant) => Cell::new(variant)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        None => dim_cell("(base)"),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
