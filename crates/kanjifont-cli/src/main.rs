//! kanjifont CLI - Command-line interface for bitmap font table generation
//!
//! This binary builds JIS/Shift-JIS/UTF-8 keyed bitmap font tables from an
//! outline font and writes them as C data, raw binary, Python, FONTX2 or BDF.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;

use cli_args::{Cli, Commands};
use kanjifont_cli::commands;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            config,
            overrides,
            verbose,
            json,
            report,
        } => commands::generate::run(config.as_deref(), &overrides, verbose, json, report),
        Commands::Preview {
            text,
            config,
            overrides,
            png,
            columns,
            json,
        } => commands::preview::run(
            config.as_deref(),
            &overrides,
            &text,
            png.as_deref(),
            columns,
            json,
        ),
        Commands::Inspect { file, code, json } => {
            commands::inspect::run(&file, code.as_deref(), json)
        }
        Commands::Charsets { json } => commands::charsets::run(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "kanjifont",
            "generate",
            "--font",
            "shinonome12.ttf",
            "--format",
            "fontx",
            "--encoding",
            "sjis",
            "--offset-y",
            "-2",
            "--name",
            "shino12",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                config,
                overrides,
                verbose,
                json,
                report,
            } => {
                assert!(config.is_none());
                assert_eq!(overrides.font.unwrap().to_str(), Some("shinonome12.ttf"));
                assert_eq!(overrides.format.as_deref(), Some("fontx"));
                assert_eq!(overrides.encoding.as_deref(), Some("sjis"));
                assert_eq!(overrides.offset_y, Some(-2));
                assert_eq!(overrides.name.as_deref(), Some("shino12"));
                assert!(!verbose && !json && !report);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let err = Cli::try_parse_from(["kanjifont", "generate", "--format", "ttf"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("ttf"));
    }

    #[test]
    fn test_cli_parses_preview() {
        let cli = Cli::try_parse_from([
            "kanjifont",
            "preview",
            "--text",
            "亜あA",
            "--font",
            "a.ttf",
            "--png",
            "sheet.png",
        ])
        .unwrap();
        match cli.command {
            Commands::Preview {
                text, png, columns, ..
            } => {
                assert_eq!(text, "亜あA");
                assert_eq!(png.as_deref(), Some("sheet.png"));
                assert_eq!(columns, 16);
            }
            _ => panic!("expected preview command"),
        }
    }

    #[test]
    fn test_cli_requires_file_for_inspect() {
        let err = Cli::try_parse_from(["kanjifont", "inspect"]).err().unwrap();
        assert!(err.to_string().contains("--file"));
    }

    #[test]
    fn test_cli_parses_charsets_json() {
        let cli = Cli::try_parse_from(["kanjifont", "charsets", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Charsets { json: true }));
    }
}
