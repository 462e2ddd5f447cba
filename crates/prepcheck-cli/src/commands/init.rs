//! The `prepcheck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    std::fs::create_dir_all("chapters")?;
    let example_path = std::path::Path::new("chapters/example.toml");
    if example_path.exists() {
        println!("chapters/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CHAPTER)?;
        println!("Created chapters/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit chapters/example.toml with your chapter content");
    println!("  2. Run: prepcheck validate --chapter chapters/example.toml");
    println!("  3. Run: prepcheck progress --chapter chapters/example.toml");

    Ok(())
}

const EXAMPLE_CHAPTER: &str = r#"[chapter]
id = "statistics"
name = "Statistics"
number = 14
description = "Descriptive statistics: medians, spread, and quick comparisons"

[[topics]]
id = "medians-from-tables"
title = "Reading medians from tables"
status = "done"

[[topics]]
id = "spread"
title = "Comparing standard deviations"
status = "in-progress"

[[topics.subtopics]]
title = "Equal-sized sets"
status = "done"

[[topics.subtopics]]
title = "Range reasoning"
status = "todo"

[[datasets]]
id = "annual-sales"
name = "Annual candy sales (millions)"

[[datasets.observations]]
value = 1.1
tags = { year = "2001", market = "Down" }

[[datasets.observations]]
value = 2.3
tags = { year = "2002", market = "Down" }

[[datasets.observations]]
value = 4.0
tags = { year = "2003", market = "Up" }

[[datasets.observations]]
value = 3.2
tags = { year = "2004", market = "Up" }

[[datasets.observations]]
value = 1.9
tags = { year = "2005", market = "Down" }

[[datasets.observations]]
value = 2.2
tags = { year = "2006", market = "Up" }

[[datasets.observations]]
value = 2.8
tags = { year = "2007", market = "Up" }

[[datasets.observations]]
value = 3.0
tags = { year = "2008", market = "Down" }

[[datasets.observations]]
value = 2.6
tags = { year = "2009", market = "Up" }

[[datasets.observations]]
value = 1.9
tags = { year = "2010", market = "Up" }

[[datasets.observations]]
value = 3.0
tags = { year = "2011", market = "Up" }

[[quizzes]]
id = "east-west"
prompt = "Based on the monthly revenue chart:"

[[quizzes.fields]]
id = "below_five"
label = "Months with East revenue below 5 million dollars"
options = ["3", "4", "5", "6", "7", "8", "9"]
correct = "6"

[[quizzes.fields]]
id = "east_beats_west"
label = "Months East revenue is higher than West revenue"
options = ["3", "4", "5", "6", "7", "8", "9"]
correct = "6"
"#;
