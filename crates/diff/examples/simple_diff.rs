use anyhow::Result;
use compare_diff::{AlignmentMode, ChangeKind, DiffConfig, LineRecord};

fn print_records(records: &[LineRecord]) {
    for record in records {
        let old_line = record.old_line.map_or(String::from("-"), |n| n.to_string());
        let new_line = record.new_line.map_or(String::from("-"), |n| n.to_string());
        let marker = match record.kind {
            ChangeKind::Unchanged => "  ",
            ChangeKind::Added => "\x1b[32m+ \x1b[0m",
            ChangeKind::Removed => "\x1b[31m- \x1b[0m",
        };

        let mut line = String::new();
        for span in &record.spans {
            match span.kind {
                ChangeKind::Unchanged => line.push_str(&span.value),
                ChangeKind::Added => line.push_str(&format!("\x1b[42m{}\x1b[0m", span.value)),
                ChangeKind::Removed => line.push_str(&format!("\x1b[41m{}\x1b[0m", span.value)),
            }
        }
        println!("{:>4} {:>4} {:>4} {}{}", record.line_number, old_line, new_line, marker, line);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    // Two sample texts to compare
    let text1 = "This is the first line.\nHere is the second line.\nAnd the third line.";
    let text2 = "Inserted at the top.\nThis is the first line.\nHere is a different second line.\nAnd the third line.";

    println!("Positional alignment:");
    let config = DiffConfig::default();
    let alignment = config.align(text1, text2);
    print_records(&alignment.records);

    println!("\nLCS alignment:");
    let config = config.alignment(AlignmentMode::Lcs);
    let alignment = config.align(text1, text2);
    print_records(&alignment.records);

    let result = config.recompute(text1, text2);
    if let Some(stats) = result.line_stats() {
        println!("\nDiff statistics:");
        println!("  Unchanged lines: {}", stats.unchanged);
        println!("  Added lines: {}", stats.added);
        println!("  Removed lines: {}", stats.removed);
    }

    Ok(())
}
