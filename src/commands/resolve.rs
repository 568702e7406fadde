//! Resolve command implementation

use console::Style;

use crate::cli::ResolveArgs;
use crate::commands::helpers::{assemble_model, project_information};
use crate::config::Settings;
use crate::error::Result;
use crate::serialization::{ModelWriter, render, to_json};

pub fn run(args: ResolveArgs) -> Result<()> {
    let settings = Settings::resolve(args.input.repository.clone(), args.output.clone())?;
    let project = project_information(&args.input, &settings)?;
    let model = assemble_model(&args.input, &settings, &project)?;

    if args.dry_run {
        println!(
            "{}",
            to_json(&render(model.class_loader_model(), args.view))?
        );
        return Ok(());
    }

    let written = ModelWriter::new(&project.build_directory, args.view).write(&model)?;

    println!(
        "{} {}",
        Style::new().bold().green().apply_to("Resolved"),
        model.class_loader_model().coordinates()
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Dependencies:"),
        model.class_loader_model().dependencies().len()
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Plugins:"),
        model.plugin_models().count()
    );
    if let Some(domain) = model.domain() {
        println!(
            "  {} {}",
            Style::new().bold().apply_to("Domain:"),
            domain.coordinates()
        );
    }
    println!("  {}", Style::new().bold().apply_to("Written:"));
    for path in &written {
        println!("    {}", Style::new().cyan().apply_to(path.display()));
    }

    Ok(())
}
