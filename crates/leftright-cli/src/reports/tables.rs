use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use leftright_core::community::CommunityStat;
use leftright_core::layouts::{KeyboardLayout, TextDistribution};
use leftright_core::metrics::{assess_balance, BalanceVerdict, ReferenceRatio, ReferenceSource};
use leftright_core::session::{HandReport, SessionReport};
use leftright_protocol::RatioResponse;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn right_align(table: &mut Table, from: usize, to: usize) {
    for i in from..=to {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn hand_row(name: &str, h: &HandReport) -> Vec<Cell> {
    vec![
        Cell::new(name).add_attribute(Attribute::Bold),
        Cell::new(h.wpm).fg(Color::Cyan),
        Cell::new(format!("{}%", h.accuracy)),
        Cell::new(format!("{}/{}", h.correct, h.total)),
    ]
}

pub fn session(r: &SessionReport) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Hand").add_attribute(Attribute::Bold),
        Cell::new("WPM").fg(Color::Cyan),
        Cell::new("Accuracy"),
        Cell::new("Correct"),
    ]);
    table.add_row(hand_row("Left", &r.left));
    table.add_row(hand_row("Right", &r.right));
    table.add_row(vec![
        Cell::new("Overall").add_attribute(Attribute::Bold),
        Cell::new(r.wpm).fg(Color::Cyan),
        Cell::new(format!("{}%", r.accuracy)),
        Cell::new(format!("{:.1}s", r.elapsed_ms as f64 / 1000.0)),
    ]);
    right_align(&mut table, 1, 3);

    println!("\n⌨️  === RUN ON {} === ⌨️", r.layout);
    println!("{}", table);

    match r.ratio {
        Some(ratio) => println!("Right/left ratio: {:.2}", ratio),
        None => println!("Right/left ratio: n/a (one hand has no measurable speed)"),
    }
}

pub fn community(user_ratio: Option<f64>, stat: Option<CommunityStat>, reference: ReferenceRatio) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Reference").add_attribute(Attribute::Bold),
        Cell::new("Ratio").fg(Color::Cyan),
        Cell::new("Samples"),
    ]);

    let source = match reference.source {
        ReferenceSource::Community => "community",
        ReferenceSource::Research => "research",
    };
    let samples = stat.map_or_else(|| "-".to_string(), |s| s.count.to_string());
    table.add_row(vec![
        Cell::new(source),
        Cell::new(format!("{:.2}", reference.value)).fg(Color::Cyan),
        Cell::new(samples),
    ]);
    right_align(&mut table, 1, 2);
    println!("{}", table);

    if let Some(ratio) = user_ratio {
        let verdict = match assess_balance(ratio, reference) {
            BalanceVerdict::Typical => "within the typical range".to_string(),
            BalanceVerdict::RightFaster => format!(
                "right hand {:.0}% faster than typical",
                (ratio / reference.value - 1.0) * 100.0
            ),
            BalanceVerdict::LeftFaster => format!(
                "left hand {:.0}% faster than typical",
                (reference.value / ratio - 1.0) * 100.0
            ),
        };
        println!("Balance: {}", verdict);
    }
}

pub fn layouts(layouts: &[&KeyboardLayout], ratios: &[RatioResponse]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Id").add_attribute(Attribute::Bold),
        Cell::new("Name"),
        Cell::new("Left keys"),
        Cell::new("Right keys"),
        Cell::new("Baseline L/R"),
        Cell::new("Community").fg(Color::Cyan),
    ]);

    for l in layouts {
        let baseline = l
            .baseline
            .map_or_else(|| "-".to_string(), |b| format!("{}/{}", b.left, b.right));
        let community = ratios
            .iter()
            .find(|r| r.layout == l.id)
            .map_or_else(
                || "-".to_string(),
                |r| format!("{:.2} (n={})", r.average, r.count),
            );
        table.add_row(vec![
            Cell::new(&l.id).add_attribute(Attribute::Bold),
            Cell::new(&l.name),
            Cell::new(l.left_hand.len()),
            Cell::new(l.right_hand.len()),
            Cell::new(baseline),
            Cell::new(community).fg(Color::Cyan),
        ]);
    }
    right_align(&mut table, 2, 5);
    println!("{}", table);
}

pub fn distribution(layout: &KeyboardLayout, d: &TextDistribution) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new(&layout.name).add_attribute(Attribute::Bold),
        Cell::new("Chars"),
        Cell::new("Share"),
        Cell::new("Baseline"),
    ]);

    let (base_left, base_right) = match layout.baseline {
        Some(b) => (format!("{}%", b.left), format!("{}%", b.right)),
        None => ("-".to_string(), "-".to_string()),
    };
    table.add_row(vec![
        Cell::new("Left"),
        Cell::new(d.left),
        Cell::new(format!("{}%", d.left_percent)),
        Cell::new(base_left),
    ]);
    table.add_row(vec![
        Cell::new("Right"),
        Cell::new(d.right),
        Cell::new(format!("{}%", d.right_percent)),
        Cell::new(base_right),
    ]);
    table.add_row(vec![
        Cell::new("Neutral"),
        Cell::new(d.neutral),
        Cell::new("-"),
        Cell::new("-"),
    ]);
    right_align(&mut table, 1, 3);
    println!("{}", table);
}
