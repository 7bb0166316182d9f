//! Charsets command implementation
//!
//! Lists the code-set presets and the JIS ranges each one walks.

use anyhow::Result;
use colored::Colorize;
use kanjifont_backend::charset::{named_ranges, AllowList};
use kanjifont_spec::CodeSet;
use std::process::ExitCode;

use crate::commands::json_output::{hex_code, CharsetInfo, CharsetsOutput, RangeInfo};

/// Run the charsets command
///
/// # Returns
/// Exit code: always 0
pub fn run(json_output: bool) -> Result<ExitCode> {
    let output = CharsetsOutput {
        code_sets: CodeSet::ALL.into_iter().map(charset_info).collect(),
    };
    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_human(&output);
    }
    Ok(ExitCode::SUCCESS)
}

fn charset_info(code_set: CodeSet) -> CharsetInfo {
    let filter = match code_set {
        CodeSet::Kyoiku => Some(format!(
            "compulsory-education kanji ({} characters)",
            AllowList::kyoiku().len()
        )),
        CodeSet::Custom => Some("characters listed in charlist_path".to_string()),
        CodeSet::Full | CodeSet::Level1 | CodeSet::Minimal => None,
    };
    CharsetInfo {
        name: code_set.to_string(),
        ranges: named_ranges(code_set)
            .into_iter()
            .map(|r| RangeInfo {
                name: r.name.to_string(),
                start: hex_code(*r.range.start()),
                end: hex_code(*r.range.end()),
            })
            .collect(),
        filter,
    }
}

fn print_human(output: &CharsetsOutput) {
    for set in &output.code_sets {
        println!("{}", set.name.cyan().bold());
        for range in &set.ranges {
            println!("  {:<12} {}..={}", range.name, range.start, range.end);
        }
        if let Some(ref filter) = set.filter {
            println!("  {} {}", "filter:".dimmed(), filter);
        }
    }
}
