use anyhow::Result;
use compare_diff::{markup, DiffConfig, Granularity, ViewMode};

fn main() -> Result<()> {
    env_logger::init();

    // Sample texts with word-level differences
    let text1 = "This is the first paragraph with some words.\nHere is another line with minor changes.\nThis line is unchanged.";
    let text2 = "This is the first paragraph with different words.\nHere is another sentence with major changes.\nThis line is unchanged.";

    let config = DiffConfig::default().view(ViewMode::Inline);

    println!("=== Word-level diff ===");
    let result = config.clone().granularity(Granularity::Word).recompute(text1, text2);
    println!("{}", markup(result.spans().unwrap_or_default()));

    println!("\n=== Character-level diff ===");
    let result = config.granularity(Granularity::Character).recompute(text1, text2);
    println!("{}", markup(result.spans().unwrap_or_default()));

    // Oversized inputs degrade instead of failing
    let code1 = "function calculateTotal(items) {\n    let sum = 0;\n    return sum;\n}";
    let code2 = "function calculateTotal(items) {\n    let sum = 1;\n    return sum * 2;\n}";
    let tight = DiffConfig::default().max_tokens(16);
    let diff = tight.diff_tokens(code1, code2, Granularity::Character);

    println!("\n=== Code diff with a token limit of 16 ===");
    println!("{}", markup(&diff.spans));
    if let Some(degradation) = diff.degradation {
        println!("(degraded: {})", degradation);
    }

    Ok(())
}
