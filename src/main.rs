use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use extract_code::config::{load_config_file, ExtractConfig};
use extract_code::logging;
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("extract-code")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extracts tagged fenced code blocks from a markdown document into namespaced snippet files.")
        .arg(
            Arg::new("source")
                .short('s')
                .long("source")
                .value_name("FILE")
                .help("Markdown document to scan (default: ./union-types/slides-source.md)"),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .help("Existing directory receiving the snippets (default: ./union-types/snippets)"),
        )
        .arg(
            Arg::new("lang")
                .short('l')
                .long("lang")
                .value_name("TAG")
                .help("Language tag following the opening fence (default: typescript)"),
        )
        .arg(
            Arg::new("extension")
                .short('e')
                .long("extension")
                .value_name("EXT")
                .help("Extension of the generated files (default: ts)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("YAML config file (default: extract-code.yml if present)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print a JSON report of the run to stdout")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output")
                .action(ArgAction::SetTrue),
        )
}

/// Defaults, then the config file, then flags
fn resolve_config(matches: &ArgMatches) -> Result<ExtractConfig> {
    let explicit_config = matches.get_one::<String>("config").map(PathBuf::from);
    let mut config = ExtractConfig::default();
    if let Some(file) = load_config_file(explicit_config.as_deref())? {
        config = config.merge_file(file);
    }
    if let Some(source) = matches.get_one::<String>("source") {
        config.source = PathBuf::from(source);
    }
    if let Some(out_dir) = matches.get_one::<String>("out-dir") {
        config.out_dir = PathBuf::from(out_dir);
    }
    if let Some(lang) = matches.get_one::<String>("lang") {
        config.lang = lang.clone();
    }
    if let Some(extension) = matches.get_one::<String>("extension") {
        config.extension = extension.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    logging::init_logging(logging::level_for(matches.get_flag("debug")));

    let config = resolve_config(&matches)?;

    let report = extract_code::run(&config)
        .with_context(|| format!("extraction from {} failed", config.source.display()))?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn no_arguments_is_accepted() {
        let matches = cli().try_get_matches_from(["extract-code"]).unwrap();
        assert!(matches.get_one::<String>("source").is_none());
        assert!(!matches.get_flag("json"));
    }

    #[test]
    fn flags_are_parsed() {
        let matches = cli()
            .try_get_matches_from(["extract-code", "-l", "rust", "--out-dir", "gen", "--json"])
            .unwrap();
        assert_eq!(matches.get_one::<String>("lang").map(String::as_str), Some("rust"));
        assert_eq!(matches.get_one::<String>("out-dir").map(String::as_str), Some("gen"));
        assert!(matches.get_flag("json"));
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "lang: rust\nextension: rs\nplaceholder: .gitkeep").unwrap();
        let config_path = file.path().to_string_lossy().into_owned();

        let matches = cli()
            .try_get_matches_from(["extract-code", "--config", config_path.as_str(), "--lang", "go"])
            .unwrap();
        let config = resolve_config(&matches).unwrap();

        assert_eq!(config.lang, "go");
        assert_eq!(config.extension, "rs");
        assert_eq!(config.placeholder, ".gitkeep");
        assert_eq!(config.out_dir, PathBuf::from("./union-types/snippets"));
    }

    #[test]
    fn unreadable_config_fails_resolution() {
        let matches = cli()
            .try_get_matches_from(["extract-code", "--config", "/nonexistent/extract-code.yml"])
            .unwrap();
        assert!(resolve_config(&matches).is_err());
    }
}
