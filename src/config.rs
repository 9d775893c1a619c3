use log::LevelFilter;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::models::Config;

pub const CONFIG_FILE: &str = "icongen.conf";

/// Candidate config files, first match wins: working directory, then the
/// per-user config directory.
fn config_file_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(dirs) = directories::ProjectDirs::from("com", "plateicons", "PlateIcons") {
        paths.push(dirs.config_dir().join(CONFIG_FILE));
    }
    paths
}

fn parse_flag(v: &str, default: bool) -> bool {
    v.parse::<u8>().map(|n| n != 0).unwrap_or(default)
}

/// Parse `key=value` lines. Unknown keys are ignored and malformed values
/// keep their defaults.
pub fn parse_config(content: &str) -> Config {
    let mut cfg = Config::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            let v = v.trim();
            match k.trim() {
                "output_dir" => {
                    if !v.is_empty() {
                        cfg.output_dir = PathBuf::from(v);
                    }
                }
                "font_path" => cfg.font_path = (!v.is_empty()).then(|| PathBuf::from(v)),
                "decoration" => cfg.decoration = parse_flag(v, true),
                "write_manifest" => cfg.write_manifest = parse_flag(v, true),
                "manifest_prefix" => cfg.manifest_prefix = v.to_string(),
                "log_level" => cfg.log_level = v.parse::<LevelFilter>().unwrap_or(LevelFilter::Info),
                _ => {}
            }
        }
    }
    cfg
}

/// Load the first config file found, or defaults if there is none.
/// Returns the path the settings came from.
pub fn read_config() -> Result<(Config, Option<PathBuf>), io::Error> {
    for path in config_file_paths() {
        match fs::read_to_string(&path) {
            Ok(content) => return Ok((parse_config(&content), Some(path))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(e),
        }
    }
    Ok((Config::default(), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::FontSource;

    #[test]
    fn empty_config_is_default() {
        let cfg = parse_config("");
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.output_dir, PathBuf::from("icons"));
        assert_eq!(cfg.font_source(), FontSource::System);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = parse_config(
            "# icon settings\n\
             output_dir = public/icons\n\
             font_path=/usr/share/fonts/NotoEmoji-Regular.ttf\n\
             write_manifest=0\n\
             manifest_prefix=/icons/\n\
             log_level=debug\n",
        );
        assert_eq!(cfg.output_dir, PathBuf::from("public/icons"));
        assert_eq!(
            cfg.font_source(),
            FontSource::Path(PathBuf::from("/usr/share/fonts/NotoEmoji-Regular.ttf"))
        );
        assert!(!cfg.write_manifest);
        assert_eq!(cfg.manifest_prefix, "/icons/");
        assert_eq!(cfg.log_level, LevelFilter::Debug);
    }

    #[test]
    fn decoration_off_wins_over_font_path() {
        let cfg = parse_config("font_path=/tmp/a.ttf\ndecoration=0\n");
        assert_eq!(cfg.font_source(), FontSource::Disabled);
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let cfg = parse_config("decoration=yes\nwrite_manifest=\nlog_level=loud\noutput_dir=\nunknown=1\nnoequals\n");
        assert!(cfg.decoration);
        assert!(cfg.write_manifest);
        assert_eq!(cfg.log_level, LevelFilter::Info);
        assert_eq!(cfg.output_dir, PathBuf::from("icons"));
    }

    #[test]
    fn empty_font_path_means_discovery() {
        let cfg = parse_config("font_path=/tmp/a.ttf\nfont_path=\n");
        assert_eq!(cfg.font_path, None);
    }
}
