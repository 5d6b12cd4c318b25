//! Charm-style CLI prompts using cliclack

use crate::config::{discover_snapshots, load_snapshot, OutputSettings};
use crate::generator::generate;
use crate::output::{setup_steps, write_artifacts};
use crate::spec::{
    is_class_list, is_hex_color, is_identifier, ButtonSpec, ButtonVariant, FieldSpec, FieldType,
    FormSpec, HorizontalAlign, LayoutStyle, LinkSpec, PersistenceTarget, RoutingStyle,
    ThemeColors, VerticalAlign, DEFAULT_ERROR_MESSAGE, DEFAULT_SUCCESS_MESSAGE, DEFAULT_WIDTH,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Saved configuration to load instead of prompting
    pub config: Option<PathBuf>,

    /// Directory to write the generated files to
    pub output: Option<PathBuf>,

    /// Show what would be written without writing
    pub dry_run: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("formgen")?;

    // Step 1: Load a saved configuration or ask for a new one
    let spec = match select_snapshot(&args)? {
        Some(path) => load_spec(&path)?,
        None if args.yes => {
            anyhow::bail!("--yes needs a saved configuration; pass one with --config <path>")
        }
        None => prompt_spec()?,
    };

    if let Err(e) = spec.validate() {
        cliclack::log::error(format!("{}", e))?;
        anyhow::bail!("The form configuration is invalid.");
    }

    // Step 2: Resolve and check the output directory
    let settings = OutputSettings::resolve(args.output.clone(), args.dry_run);
    confirm_output_dir(&settings, &args)?;

    // Step 3: Generate and write
    let spinner = cliclack::spinner();
    spinner.start("Generating form...");

    let artifacts = match generate(&spec) {
        Ok(artifacts) => artifacts,
        Err(e) => {
            spinner.stop("Generation failed");
            return Err(e).with_context(|| format!("Failed to generate form '{}'", spec.name));
        }
    };

    let written = write_artifacts(&artifacts, &settings)
        .await
        .context("Failed to write generated files")?;

    if settings.dry_run {
        spinner.stop(format!(
            "Dry run: {} files would be written to {}",
            written.len(),
            settings.output_dir.display()
        ));
        for file in &written {
            cliclack::log::info(format!(
                "{} ({}, {} bytes)",
                file.path.display(),
                file.role,
                file.bytes
            ))?;
        }
    } else {
        spinner.stop(format!(
            "Created {} files in {}",
            written.len(),
            settings.output_dir.display()
        ));
    }

    // Step 4: Show next steps
    print_next_steps(&spec)?;

    Ok(())
}

fn select_snapshot(args: &CreateArgs) -> Result<Option<PathBuf>> {
    if let Some(path) = &args.config {
        cliclack::log::info(format!("Using configuration: {}", path.display()))?;
        return Ok(Some(path.clone()));
    }

    if args.yes {
        return Ok(None);
    }

    let load: bool = cliclack::confirm("Load a previously saved form configuration?")
        .initial_value(false)
        .interact()?;
    if !load {
        return Ok(None);
    }

    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let found = discover_snapshots(&current_dir);

    if !found.is_empty() {
        let mut select = cliclack::select("Select a configuration");
        for (idx, path) in found.iter().enumerate() {
            let label = path
                .strip_prefix(&current_dir)
                .unwrap_or(path)
                .display()
                .to_string();
            select = select.item(Some(idx), label, "");
        }
        select = select.item(None, "Enter a path", "");

        let choice: Option<usize> = select.interact()?;
        if let Some(path) = choice.and_then(|idx| found.get(idx)) {
            return Ok(Some(path.clone()));
        }
    }

    let input: String = cliclack::input("Path to the configuration file")
        .placeholder("generated-form/ContactConfig.json")
        .validate(|input: &String| {
            if Path::new(input.trim()).is_file() {
                Ok(())
            } else {
                Err("File does not exist or is not accessible")
            }
        })
        .interact()?;

    Ok(Some(PathBuf::from(input.trim())))
}

fn load_spec(path: &Path) -> Result<FormSpec> {
    let loaded = load_snapshot(path)?;

    if let Some(warning) = loaded.compatibility_warning() {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }

    cliclack::log::success(format!(
        "Loaded {} ({} fields, {} buttons)",
        loaded.spec.name,
        loaded.spec.fields.len(),
        loaded.spec.buttons.len()
    ))?;

    Ok(loaded.spec)
}

fn prompt_spec() -> Result<FormSpec> {
    let name: String = cliclack::input("What is the name of your form?")
        .placeholder("Contact")
        .validate(|input: &String| {
            if is_identifier(input.trim()) {
                Ok(())
            } else {
                Err("Form name must be a valid identifier")
            }
        })
        .interact()?;
    let mut spec = FormSpec::new(name.trim());

    let field_count = prompt_count("How many input fields do you want in your form?")?;
    let button_count = prompt_count("How many buttons do you want in your form?")?;

    let submit_index: String = cliclack::input("Which button should be the submit button?")
        .default_input("1")
        .validate(move |input: &String| match parse_count(input) {
            Ok(n) if n <= button_count => Ok(()),
            _ => Err("Please enter a valid button index"),
        })
        .interact()?;
    spec.submit_index = parse_count(&submit_index).unwrap_or(1);

    let add_link: bool = cliclack::confirm("Do you want to add a link to another page?")
        .initial_value(false)
        .interact()?;
    if add_link {
        spec.link = Some(LinkSpec {
            text: prompt_required("Link text", "Link text cannot be empty")?,
            href: prompt_required("Link target", "Link target cannot be empty")?,
        });
    }

    spec.routing = cliclack::select("Which router do you want to use?")
        .item(RoutingStyle::App, "app", "App Router")
        .item(RoutingStyle::Pages, "pages", "Pages Router")
        .initial_value(RoutingStyle::App)
        .interact()?;

    if spec.routing == RoutingStyle::App {
        spec.delegated_submission = cliclack::confirm("Do you want to use Server Actions?")
            .initial_value(true)
            .interact()?;
    }
    if spec.routing == RoutingStyle::Pages || !spec.delegated_submission {
        spec.create_endpoint = cliclack::confirm("Do you want to create an API route for this form?")
            .initial_value(true)
            .interact()?;
    }

    spec.layout = cliclack::select("Choose a form style")
        .item(LayoutStyle::Default, "Default", "")
        .item(LayoutStyle::Card, "Card", "")
        .item(LayoutStyle::Inline, "Inline", "")
        .initial_value(LayoutStyle::Default)
        .interact()?;

    spec.horizontal = Some(
        cliclack::select("Horizontal alignment")
            .item(HorizontalAlign::Left, "Left", "")
            .item(HorizontalAlign::Center, "Center", "")
            .item(HorizontalAlign::Right, "Right", "")
            .initial_value(HorizontalAlign::Center)
            .interact()?,
    );
    spec.vertical = Some(
        cliclack::select("Vertical alignment")
            .item(VerticalAlign::Top, "Top", "")
            .item(VerticalAlign::Center, "Center", "")
            .item(VerticalAlign::Bottom, "Bottom", "")
            .initial_value(VerticalAlign::Center)
            .interact()?,
    );

    spec.width = cliclack::input("Responsive width classes")
        .placeholder(DEFAULT_WIDTH)
        .default_input(DEFAULT_WIDTH)
        .validate(|input: &String| {
            if is_class_list(input) {
                Ok(())
            } else {
                Err("Width must be plain class names")
            }
        })
        .interact()?;

    let custom_colors: bool = cliclack::confirm("Do you want to use custom colors?")
        .initial_value(false)
        .interact()?;
    if custom_colors {
        spec.theme = Some(ThemeColors {
            primary: prompt_color("Primary color (e.g. #000000)")?,
            secondary: prompt_color("Secondary color (e.g. #ffffff)")?,
        });
    }

    spec.loading_state = cliclack::confirm("Do you want to add a loading state to the form?")
        .initial_value(true)
        .interact()?;
    spec.error_display = cliclack::confirm("Do you want to add error handling to the form?")
        .initial_value(true)
        .interact()?;

    spec.success_message = cliclack::input("Success message")
        .default_input(DEFAULT_SUCCESS_MESSAGE)
        .interact()?;
    spec.error_message = cliclack::input("Error message")
        .default_input(DEFAULT_ERROR_MESSAGE)
        .interact()?;

    let include_database: bool =
        cliclack::confirm("Do you want to include MongoDB database integration?")
            .initial_value(false)
            .interact()?;
    if include_database {
        spec.persistence = Some(PersistenceTarget {
            database: prompt_required("Database name", "Database name cannot be empty")?,
            collection: prompt_required("Collection name", "Collection name cannot be empty")?,
        });

        if !spec.delegated_submission && !spec.create_endpoint {
            cliclack::log::info("The form saves through its API route, so the route will be created")?;
            spec.create_endpoint = true;
        }
    }

    for i in 1..=field_count {
        let field = prompt_field(i, &spec.fields)?;
        spec.fields.push(field);
    }
    for i in 1..=button_count {
        let button = prompt_button(i)?;
        spec.buttons.push(button);
    }

    Ok(spec)
}

fn prompt_field(position: usize, existing: &[FieldSpec]) -> Result<FieldSpec> {
    cliclack::log::step(format!("Input field {}", position))?;

    let taken: Vec<String> = existing.iter().map(|f| f.name.clone()).collect();
    let name: String = cliclack::input("Name")
        .validate(move |input: &String| {
            let input = input.trim();
            if !is_identifier(input) {
                Err("Field name must be a valid identifier")
            } else if taken.iter().any(|t| t == input) {
                Err("Another field already uses this name")
            } else {
                Ok(())
            }
        })
        .interact()?;

    let label = prompt_required("Label", "Field label cannot be empty")?;
    let placeholder: String = cliclack::input("Placeholder")
        .required(false)
        .interact()?;

    let mut select = cliclack::select("Type");
    for field_type in FieldType::ALL {
        select = select.item(field_type, field_type.as_str(), "");
    }
    let field_type: FieldType = select.initial_value(FieldType::Text).interact()?;

    let validation: String = cliclack::input("Validation rules")
        .placeholder("required,min:3,max:50")
        .required(false)
        .interact()?;
    let error_message: String = cliclack::input("Custom error message (blank for default)")
        .required(false)
        .interact()?;

    let mut field = FieldSpec::new(name.trim(), field_type).with_validation(validation.trim());
    field.label = label;
    field.placeholder = placeholder;
    if !error_message.trim().is_empty() {
        field = field.with_error_message(error_message.trim());
    }
    Ok(field)
}

fn prompt_button(position: usize) -> Result<ButtonSpec> {
    cliclack::log::step(format!("Button {}", position))?;

    let name = prompt_required("Text", "Button text cannot be empty")?;

    let mut select = cliclack::select("Variant");
    for variant in ButtonVariant::ALL {
        select = select.item(variant, variant.as_str(), "");
    }
    let variant: ButtonVariant = select.initial_value(ButtonVariant::Default).interact()?;

    Ok(ButtonSpec::new(name, variant))
}

fn prompt_count(prompt: &str) -> Result<usize> {
    let input: String = cliclack::input(prompt)
        .default_input("1")
        .validate(|input: &String| parse_count(input).map(|_| ()))
        .interact()?;
    Ok(parse_count(&input).unwrap_or(1))
}

fn prompt_required(prompt: &str, empty_message: &'static str) -> Result<String> {
    let input: String = cliclack::input(prompt)
        .validate(move |input: &String| {
            if input.trim().is_empty() {
                Err(empty_message)
            } else {
                Ok(())
            }
        })
        .interact()?;
    Ok(input.trim().to_string())
}

fn prompt_color(prompt: &str) -> Result<String> {
    let input: String = cliclack::input(prompt)
        .validate(|input: &String| {
            if is_hex_color(input.trim()) {
                Ok(())
            } else {
                Err("Please enter a valid hex color code")
            }
        })
        .interact()?;
    Ok(input.trim().to_string())
}

/// Parse a positive count typed at a prompt
fn parse_count(input: &str) -> std::result::Result<usize, &'static str> {
    match input.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err("Please enter a number greater than 0"),
    }
}

fn confirm_output_dir(settings: &OutputSettings, args: &CreateArgs) -> Result<()> {
    let dir = &settings.output_dir;
    if settings.dry_run || !dir.is_dir() {
        return Ok(());
    }

    if let Ok(entries) = std::fs::read_dir(dir) {
        let count = entries.count();
        if count > 0 {
            cliclack::log::warning(format!(
                "{} has {} existing items; generated files will be overwritten",
                dir.display(),
                count
            ))?;

            // Auto-confirm with --yes flag
            let confirm = if args.yes {
                true
            } else {
                cliclack::confirm("Continue anyway?")
                    .initial_value(true)
                    .interact()?
            };

            if !confirm {
                anyhow::bail!("Generation cancelled.");
            }
        }
    }

    Ok(())
}

fn print_next_steps(spec: &FormSpec) -> Result<()> {
    let steps = setup_steps(spec);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro(format!("{} form ready", spec.name))?;

    Ok(())
}
