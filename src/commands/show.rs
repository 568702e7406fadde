//! Show command implementation

use console::Style;

use crate::cli::ShowArgs;
use crate::commands::helpers::{assemble_model, project_information};
use crate::config::Settings;
use crate::domain::{ApplicationClassLoaderModel, Artifact, ClassLoaderModel};
use crate::error::Result;

pub fn run(args: ShowArgs) -> Result<()> {
    let settings = Settings::resolve(args.input.repository.clone(), None)?;
    let project = project_information(&args.input, &settings)?;
    let model = assemble_model(&args.input, &settings, &project)?;
    print!("{}", format_model(&model));
    Ok(())
}

/// Plain-text tree of an application model
fn format_model(application: &ApplicationClassLoaderModel) -> String {
    let mut out = String::new();
    let model = application.class_loader_model();

    out.push_str(&format!(
        "{}\n",
        Style::new().bold().yellow().apply_to(model.coordinates())
    ));
    out.push_str(&format!(
        "  {} {}\n",
        Style::new().bold().apply_to("Version:"),
        model.version()
    ));
    if let Some(domain) = application.domain() {
        out.push_str(&format!(
            "  {} {}\n",
            Style::new().bold().apply_to("Domain:"),
            domain.coordinates()
        ));
    }
    push_artifacts(&mut out, "  ", "Dependencies:", model.dependencies());
    push_exports(&mut out, "  ", model);

    let plugins: Vec<_> = application.plugin_models().collect();
    if plugins.is_empty() {
        out.push_str(&format!(
            "  {} {}\n",
            Style::new().bold().apply_to("Plugins:"),
            Style::new().dim().apply_to("None")
        ));
        return out;
    }

    out.push_str(&format!("  {}\n", Style::new().bold().apply_to("Plugins:")));
    for (artifact, plugin_model) in plugins {
        out.push_str(&format!(
            "    {}\n",
            Style::new().cyan().apply_to(artifact.coordinates())
        ));
        push_artifacts(&mut out, "      ", "Dependencies:", plugin_model.dependencies());
        push_exports(&mut out, "      ", plugin_model);
        for resolved in model
            .additional_plugin_dependencies()
            .iter()
            .filter(|resolved| resolved.matches(artifact.coordinates()))
        {
            push_artifacts(
                &mut out,
                "      ",
                "Additional:",
                &resolved.additional_dependencies,
            );
        }
    }
    out
}

fn push_artifacts(out: &mut String, indent: &str, label: &str, artifacts: &[Artifact]) {
    if artifacts.is_empty() {
        out.push_str(&format!(
            "{indent}{} {}\n",
            Style::new().bold().apply_to(label),
            Style::new().dim().apply_to("None")
        ));
        return;
    }
    out.push_str(&format!("{indent}{}\n", Style::new().bold().apply_to(label)));
    for artifact in artifacts {
        let shared = if artifact.is_shared() { " (shared)" } else { "" };
        out.push_str(&format!(
            "{indent}  - {}{}\n",
            artifact.coordinates(),
            Style::new().dim().apply_to(shared)
        ));
    }
}

fn push_exports(out: &mut String, indent: &str, model: &ClassLoaderModel) {
    if !model.packages().is_empty() {
        out.push_str(&format!(
            "{indent}{} {}\n",
            Style::new().bold().apply_to("Packages:"),
            model.packages().join(", ")
        ));
    }
    if !model.resources().is_empty() {
        out.push_str(&format!(
            "{indent}{} {}\n",
            Style::new().bold().apply_to("Resources:"),
            model.resources().join(", ")
        ));
    }
}
