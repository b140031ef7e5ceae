//! Output formatting for CLI results

use colorful::Colorful;

use crate::demos::DemoOutput;

/// Human-readable summary of the rendered demos
pub fn format_summary(outputs: &[DemoOutput]) -> String {
    let mut output = String::new();
    for demo in outputs {
        output.push_str(&format!(
            "{} {} ({})\n",
            "✓".green(),
            demo.kind.name().bold(),
            demo.kind.description()
        ));
        for note in &demo.notes {
            output.push_str(&format!("    {}\n", note));
        }
        for file in &demo.files {
            output.push_str(&format!("    → {}\n", file.display().to_string().cyan()));
        }
    }
    output
}

pub fn print_summary(outputs: &[DemoOutput]) {
    print!("{}", format_summary(outputs));
}

/// JSON summary of the rendered demos
pub fn format_json(outputs: &[DemoOutput]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outputs)
}

pub fn print_json(outputs: &[DemoOutput]) -> serde_json::Result<()> {
    println!("{}", format_json(outputs)?);
    Ok(())
}
