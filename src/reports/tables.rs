use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use slad_ambe::hist::livetime::CutStage;
use slad_ambe::selector::cuts::Cut;
use slad_ambe::selector::AnalysisResults;
use strum::IntoEnumIterator;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn percent(part: f64, whole: f64) -> String {
    if whole > 0.0 {
        format!("{:.2}", part / whole * 100.0)
    } else {
        "-".to_string()
    }
}

pub fn summary(r: &AnalysisResults) {
    let t = &r.tally;
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Processed").add_attribute(Attribute::Bold),
        Cell::new("Accepted").fg(Color::Green),
        Cell::new("Prescaled"),
        Cell::new("Acc %"),
        Cell::new("Livetime [s]").fg(Color::Cyan),
    ]);
    align_right(&mut table, 0..=4);
    table.add_row(vec![
        Cell::new(t.processed),
        Cell::new(t.accepted).fg(Color::Green),
        Cell::new(t.prescaled),
        Cell::new(percent(t.accepted as f64, t.processed as f64)),
        Cell::new(format!("{:.3}", r.total_livetime)).fg(Color::Cyan),
    ]);
    println!("\n{}", table);
}

pub fn cut_flow(r: &AnalysisResults) {
    let t = &r.tally;
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Cut").add_attribute(Attribute::Bold),
        Cell::new("Group"),
        Cell::new("Passed"),
        Cell::new("Pass %"),
    ]);
    align_right(&mut table, 2..=3);

    for cut in Cut::iter() {
        let group = if !cut.is_selection() {
            Cell::new("audit").fg(Color::DarkGrey)
        } else if cut.is_basic() {
            Cell::new("basic")
        } else {
            Cell::new("analysis")
        };
        let passed = t.passed(cut);
        table.add_row(vec![
            Cell::new(cut.to_string()).add_attribute(Attribute::Bold),
            group,
            Cell::new(passed),
            Cell::new(percent(passed as f64, t.processed as f64)),
        ]);
    }
    println!("\n{}", table);
}

pub fn livetime(r: &AnalysisResults) {
    let lt = &r.livetime;
    let total = lt.total();
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Stage").add_attribute(Attribute::Bold),
        Cell::new("Livetime [s]").fg(Color::Cyan),
        Cell::new("% of total"),
    ]);
    align_right(&mut table, 1..=2);

    for stage in CutStage::iter() {
        let value = lt.get(stage);
        table.add_row(vec![
            Cell::new(stage.to_string()).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.3}", value)),
            Cell::new(percent(value, total)),
        ]);
    }
    println!("\n{}", table);
}

pub fn histograms(r: &AnalysisResults) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Histogram").add_attribute(Attribute::Bold),
        Cell::new("Entries"),
        Cell::new("Integral"),
        Cell::new("Mean"),
        Cell::new("Under"),
        Cell::new("Over"),
    ]);
    align_right(&mut table, 1..=5);

    for h in r.hists.hists_1d() {
        table.add_row(vec![
            Cell::new(&h.name).add_attribute(Attribute::Bold),
            Cell::new(h.entries()),
            Cell::new(format!("{:.1}", h.integral())),
            Cell::new(
                h.mean()
                    .map(|m| format!("{:.2}", m))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(format!("{:.1}", h.underflow())),
            Cell::new(format!("{:.1}", h.overflow())),
        ]);
    }
    for h in r.hists.hists_2d() {
        table.add_row(vec![
            Cell::new(&h.name).add_attribute(Attribute::Bold),
            Cell::new(h.entries()),
            Cell::new(format!("{:.1}", h.integral())),
            Cell::new("-"),
            Cell::new("-"),
            Cell::new("-"),
        ]);
    }
    println!("\n{}", table);
}
