//! The `quizbank init` command.

use std::path::Path;

use anyhow::{Context, Result};

/// Starter files, written only where nothing exists yet.
const STARTER_FILES: [(&str, &str); 2] = [
    ("quizbank.toml", SAMPLE_CONFIG),
    ("banks/example.toml", EXAMPLE_BANK),
];

pub fn execute() -> Result<()> {
    for (path, contents) in STARTER_FILES {
        let path = Path::new(path);
        if path.exists() {
            println!("{} already exists, skipping.", path.display());
            continue;
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }

    println!("\nTry it:");
    println!("  quizbank ask --bank banks --choice A");
    println!("  quizbank ask --bank banks --missed --choice 240 --record");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizbank configuration

# "first": nearest answers + rounded fillers, 4 shuffled options
# "second": step-based range around the answer, ascending
default_generation = "first"

[engine]
option_count = 4
max_candidates = 4
epsilon = 0.1
offset_catalog = [-20, -10, 10, 20, 30]
fallback_catalog = [50, 100, 150, 200]
label_catalog = ["10", "20", "30", "trace amount", "small amount"]
filler_attempts = 8
below = { min = 2, max = 4 }
above = { min = 3, max = 5 }
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Bank"
description = "A few drink builds to get started"

[[items]]
id = "latte-m-milk"
category = "coffee"
item_name = "Latte (M)"
attribute = "milk"
template = "A medium latte needs [NUM] ml of milk."
answer = "240"
unit = "ml"

[[items]]
id = "latte-m-espresso"
category = "coffee"
item_name = "Latte (M)"
attribute = "espresso"
template = "A medium latte needs [NUM] ml of espresso."
answer = "60"
unit = "ml"

[[items]]
id = "mocha-m-syrup"
category = "coffee"
item_name = "Mocha (M)"
attribute = "syrup"
template = "A medium mocha needs [NUM] ml of chocolate syrup."
answer = "30"
unit = "ml"
"#;
