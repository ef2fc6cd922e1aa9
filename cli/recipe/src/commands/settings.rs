//! `recipe settings`: show the settings a resolution would use.

use anyhow::{bail, Result};
use recipe_settings::{settings_to_toml, Settings};

/// Print settings as `key=value` lines (`text`) or as a complete settings
/// file (`toml`) that `--settings-file` accepts.
pub fn run(settings: &Settings, format: Option<&str>) -> Result<()> {
    match format.unwrap_or("text") {
        "text" => println!("{}", render(settings)),
        "toml" => print!("{}", settings_to_toml(settings)?),
        other => bail!("unknown format '{other}' (expected text or toml)"),
    }
    Ok(())
}

fn render(settings: &Settings) -> String {
    settings
        .entries()
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_settings::{Arch, BuildType, Compiler, CompilerVersion, Os};

    fn linux_gcc11() -> Settings {
        Settings::new(
            Os::Linux,
            Compiler::Gcc,
            CompilerVersion::from_major(11),
            BuildType::Release,
            Arch::X86_64,
        )
    }

    #[test]
    fn toml_output_loads_back() {
        let mut s = linux_gcc11();
        s.cppstd = Some("gnu17".parse().unwrap());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, settings_to_toml(&s).unwrap()).unwrap();
        assert_eq!(recipe_settings::load_settings_toml(&path).unwrap(), s);
    }

    #[test]
    fn unknown_format_rejected() {
        assert!(run(&linux_gcc11(), Some("yaml")).is_err());
    }

    #[test]
    fn renders_key_value_lines() {
        let s = linux_gcc11();
        assert_eq!(
            render(&s),
            "os=Linux\ncompiler=gcc\ncompiler.version=11\nbuild_type=Release\narch=x86_64"
        );
    }
}
