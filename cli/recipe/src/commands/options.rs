//! `recipe options`: list declared options and their applicability.

use anyhow::Result;
use recipe_core::OptionModel;
use recipe_settings::Settings;

/// Print every declared option with its domain, default, and whether it
/// applies under `settings`.
pub fn run(settings: &Settings) -> Result<()> {
    print!("{}", render(settings));
    Ok(())
}

fn render(settings: &Settings) -> String {
    let model = OptionModel::libbase();
    let available = model.prune(settings);

    let mut out = format!("Options for os={}:\n\n", settings.os);
    for d in model.descriptors() {
        let marker = if available.contains(d.id) { " " } else { "-" };
        out.push_str(&format!(
            "{marker} {:<12} {:<8} {:<14} {}\n",
            d.id.as_str(),
            d.default.to_string(),
            d.domain.describe(),
            d.help
        ));
    }
    if available.len() < model.descriptors().len() {
        out.push_str("\nOptions marked '-' are not available on this platform.\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_settings::{Arch, BuildType, Compiler, CompilerVersion, Os};

    fn settings(os: Os) -> Settings {
        Settings::new(
            os,
            Compiler::Gcc,
            CompilerVersion::from_major(11),
            BuildType::Release,
            Arch::X86_64,
        )
    }

    #[test]
    fn linux_marks_windows_module_unavailable() {
        let out = render(&settings(Os::Linux));
        let line = out.lines().find(|l| l.contains("module_win")).unwrap();
        assert!(line.starts_with('-'));
        assert!(out.contains("not available"));
    }

    #[test]
    fn windows_lists_everything_as_available() {
        let out = render(&settings(Os::Windows));
        assert!(out.lines().filter(|l| l.starts_with('-')).count() == 0);
        assert!(out.contains("with_tsan"));
    }
}
