//! Flag tables loaded from a configuration file.
//!
//! Writes a YAML flag configuration to a temporary directory, builds a
//! [`Parser`](tinyopt_core::Parser) from it, parses either the process
//! arguments or a built-in sample, and dumps the result as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p tinyopt-demos --example flag_config
//! cargo run -p tinyopt-demos --example flag_config -- report.csv -vo out.json --limit 10
//! ```

use std::error::Error;

use tinyopt_core::{FlagConfig, FlagLookup};

const CONFIG_YAML: &str = "\
short_flags:
  v: verbose
  o: output
  n: limit
value_flags:
  - output
  - limit
";

const SAMPLE_TOKENS: [&str; 6] = [
    "input.csv",
    "-vn",
    "25",
    "--output",
    "report.json",
    "extra",
];

fn main() {
    let dir = std::env::temp_dir().join("tinyopt_flag_config_example");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("flags.yaml");
    std::fs::write(&path, CONFIG_YAML).unwrap();

    let config = FlagConfig::load(&path).unwrap();
    println!(
        "Loaded {} short flags from {}",
        config.short_flags.len(),
        path.display()
    );
    for (short, long) in &config.short_flags {
        let takes_value = config.value_flags.contains(long);
        let suffix = if takes_value { " <value>" } else { "" };
        println!("  -{short}  --{long}{suffix}");
    }
    println!();

    let parser = config.parser().unwrap();
    let args = if std::env::args_os().len() > 1 {
        parser.parse_env()
    } else {
        parser.parse(SAMPLE_TOKENS)
    };

    let args = match args {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}");
            std::fs::remove_dir_all(&dir).ok();
            std::process::exit(2);
        }
    };

    println!("{}", serde_json::to_string_pretty(&args).unwrap());
    println!();

    for name in ["verbose", "output", "limit"] {
        match args.lookup(name) {
            FlagLookup::Absent => println!("  --{name}: not given"),
            FlagLookup::NoValue => println!("  --{name}: set"),
            FlagLookup::Value(value) => println!("  --{name}: {value}"),
        }
    }

    let limit: Option<usize> = args
        .get_optional_with("limit", |s| Ok::<_, Box<dyn Error>>(s.parse()?))
        .unwrap_or_else(|err| {
            eprintln!("error: --limit: {err}");
            None
        });
    println!("  effective limit: {}", limit.unwrap_or(usize::MAX));

    // Cleanup
    std::fs::remove_dir_all(&dir).ok();
}
