//! Saved theme commands.

use crate::cli::common::{open_repository, print_json, CliError, CliResult};
use crate::models::{Color, ColorRole, ThemeCustomizations, ThemeUpdate, WebsiteTemplate};
use crate::services::template_query::find_by_id;
use crate::services::theme_compiler::{to_css_variables, StylesheetWriter};
use crate::services::{scheme, ThemeRepository};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Manage saved themes
#[derive(Debug, Clone, Args)]
pub struct ThemeArgs {
    /// Theme subcommand
    #[command(subcommand)]
    pub command: ThemeCommand,
}

/// Theme subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ThemeCommand {
    /// List saved themes
    List(JsonArgs),
    /// Show one theme
    Show(IdArgs),
    /// Create a theme
    Create(CreateArgs),
    /// Change parts of a theme
    Update(UpdateArgs),
    /// Delete a theme
    Delete(IdArgs),
    /// Mark a theme as active
    Activate(IdArgs),
    /// Show the active theme
    Active(JsonArgs),
    /// Copy a theme under a new name
    Duplicate(DuplicateArgs),
    /// Print a theme as JSON for sharing
    Export(ExportArgs),
    /// Import a theme from a JSON file
    Import(ImportArgs),
    /// Compile a theme to a stylesheet
    Css(CssArgs),
    /// Print a theme's CSS custom properties
    Variables(IdArgs),
}

/// Flags shared by commands that only print
#[derive(Debug, Clone, Args)]
pub struct JsonArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Commands addressing one theme
#[derive(Debug, Clone, Args)]
pub struct IdArgs {
    /// Theme id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Create a theme
#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    /// Theme name (defaults to "<template> Theme" with --template)
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Seed from a catalog template
    #[arg(short, long, value_name = "TEMPLATE_ID")]
    pub template: Option<String>,

    /// Derive colors from a base color
    #[arg(short, long, value_name = "COLOR", conflicts_with = "template")]
    pub base: Option<String>,

    /// Mark the new theme as active
    #[arg(long)]
    pub activate: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Change parts of a theme
#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    /// Theme id
    #[arg(value_name = "ID")]
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// Role color as ROLE=COLOR (repeatable), e.g. primary=#0ea5e9
    #[arg(long = "color", value_name = "ROLE=COLOR")]
    pub colors: Vec<String>,

    /// Re-derive the whole scheme from a base color
    #[arg(long, value_name = "COLOR")]
    pub base: Option<String>,

    /// Heading font family
    #[arg(long)]
    pub heading_font: Option<String>,

    /// Body font family
    #[arg(long)]
    pub body_font: Option<String>,

    /// Base font size in px
    #[arg(long, value_name = "PX")]
    pub base_size: Option<f64>,

    /// Spacing scale multiplier
    #[arg(long, value_name = "SCALE")]
    pub spacing_scale: Option<f64>,

    /// Enable or disable transitions
    #[arg(long, value_name = "BOOL")]
    pub animations: Option<bool>,

    /// Maximum content width in px
    #[arg(long, value_name = "PX")]
    pub max_width: Option<u32>,

    /// Read custom CSS from a file
    #[arg(long, value_name = "FILE", conflicts_with = "clear_custom_css")]
    pub custom_css: Option<PathBuf>,

    /// Remove custom CSS
    #[arg(long)]
    pub clear_custom_css: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Copy a theme
#[derive(Debug, Clone, Args)]
pub struct DuplicateArgs {
    /// Theme id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Name of the copy
    #[arg(short, long, value_name = "NAME")]
    pub name: String,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Export a theme
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Theme id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Import a theme
#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// JSON file produced by `theme export`
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Compile a theme
#[derive(Debug, Clone, Args)]
pub struct CssArgs {
    /// Theme id (defaults to the active theme)
    #[arg(value_name = "ID")]
    pub id: Option<String>,

    /// Write to a file (with a web font import) instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Delete response for JSON output
#[derive(Debug, Clone, Serialize)]
struct DeleteResponse {
    id: String,
    deleted: bool,
}

impl ThemeArgs {
    /// Execute the theme command against the store in `data_dir`
    pub fn execute(&self, data_dir: Option<&Path>) -> CliResult<()> {
        let repo = open_repository(data_dir)?;

        match &self.command {
            ThemeCommand::List(args) => list(&repo, args),
            ThemeCommand::Show(args) => show(&repo, args),
            ThemeCommand::Create(args) => args.execute(&repo),
            ThemeCommand::Update(args) => args.execute(&repo),
            ThemeCommand::Delete(args) => delete(&repo, args),
            ThemeCommand::Activate(args) => activate(&repo, args),
            ThemeCommand::Active(args) => active(&repo, args),
            ThemeCommand::Duplicate(args) => args.execute(&repo),
            ThemeCommand::Export(args) => args.execute(&repo),
            ThemeCommand::Import(args) => args.execute(&repo),
            ThemeCommand::Css(args) => args.execute(&repo),
            ThemeCommand::Variables(args) => variables(&repo, args),
        }
    }
}

fn find(repo: &ThemeRepository, id: &str) -> CliResult<ThemeCustomizations> {
    repo.get(id)
        .ok_or_else(|| CliError::not_found(format!("Theme '{id}' not found")))
}

fn print_theme(theme: &ThemeCustomizations, json: bool) -> CliResult<()> {
    if json {
        return print_json(theme);
    }

    println!("{} ({})", theme.name, theme.id);
    if let Some(template_id) = &theme.template_id {
        println!("  Template:   {template_id}");
    }
    println!("  Primary:    {}", theme.colors.primary);
    println!("  Secondary:  {}", theme.colors.secondary);
    println!("  Accent:     {}", theme.colors.accent);
    println!(
        "  Fonts:      {} / {} at {}px",
        theme.typography.heading_font, theme.typography.body_font, theme.typography.base_size
    );
    println!("  Updated:    {}", theme.updated_at.to_rfc3339());
    Ok(())
}

fn list(repo: &ThemeRepository, args: &JsonArgs) -> CliResult<()> {
    let themes = repo.list();
    if args.json {
        return print_json(&themes);
    }

    if themes.is_empty() {
        println!("No saved themes.");
        return Ok(());
    }

    let active_id = repo.active().map(|t| t.id);
    println!("Saved themes ({}):\n", themes.len());
    for theme in &themes {
        let marker = if active_id.as_deref() == Some(theme.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{marker} {} ({})", theme.name, theme.id);
    }
    Ok(())
}

fn show(repo: &ThemeRepository, args: &IdArgs) -> CliResult<()> {
    print_theme(&find(repo, &args.id)?, args.json)
}

fn delete(repo: &ThemeRepository, args: &IdArgs) -> CliResult<()> {
    let deleted = repo
        .delete(&args.id)
        .map_err(|e| CliError::io(format!("Failed to delete theme: {e:#}")))?;
    if !deleted {
        return Err(CliError::not_found(format!("Theme '{}' not found", args.id)));
    }

    if args.json {
        return print_json(&DeleteResponse {
            id: args.id.clone(),
            deleted,
        });
    }
    println!("Deleted theme {}", args.id);
    Ok(())
}

fn activate(repo: &ThemeRepository, args: &IdArgs) -> CliResult<()> {
    let theme = find(repo, &args.id)?;
    repo.set_active(&theme.id)
        .map_err(|e| CliError::io(format!("Failed to set active theme: {e:#}")))?;

    if args.json {
        return print_json(&theme);
    }
    println!("Active theme: {} ({})", theme.name, theme.id);
    Ok(())
}

fn active(repo: &ThemeRepository, args: &JsonArgs) -> CliResult<()> {
    match repo.active() {
        Some(theme) => print_theme(&theme, args.json),
        None if args.json => print_json(&serde_json::Value::Null),
        None => {
            println!("No active theme.");
            Ok(())
        }
    }
}

fn variables(repo: &ThemeRepository, args: &IdArgs) -> CliResult<()> {
    let vars = to_css_variables(&find(repo, &args.id)?);
    if args.json {
        return print_json(&vars);
    }
    for (name, value) in &vars {
        println!("{name}: {value};");
    }
    Ok(())
}

impl CreateArgs {
    /// Execute the create command
    pub fn execute(&self, repo: &ThemeRepository) -> CliResult<()> {
        let theme = if let Some(template_id) = &self.template {
            let catalog = WebsiteTemplate::samples()
                .map_err(|e| CliError::io(format!("Failed to load template catalog: {e}")))?;
            let template = find_by_id(&catalog, template_id)
                .ok_or_else(|| CliError::not_found(format!("Template '{template_id}' not found")))?;

            match &self.name {
                Some(name) => repo.create(name, Some(&template.id), Some(template.color_scheme)),
                None => repo.create_from_template(template),
            }
        } else {
            let name = self
                .name
                .as_deref()
                .ok_or_else(|| CliError::validation("--name is required without --template"))?;
            let colors = self.base.as_deref().map(|base| scheme::build(base, name).colors);
            repo.create(name, None, colors)
        }
        .map_err(|e| CliError::validation(format!("Failed to create theme: {e:#}")))?;

        if self.activate {
            repo.set_active(&theme.id)
                .map_err(|e| CliError::io(format!("Failed to set active theme: {e:#}")))?;
        }

        if self.json {
            return print_json(&theme);
        }
        println!("Created theme {} ({})", theme.name, theme.id);
        Ok(())
    }
}

impl UpdateArgs {
    fn updates(&self, current: &ThemeCustomizations) -> CliResult<Vec<ThemeUpdate>> {
        let mut updates = Vec::new();

        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(CliError::validation("Theme name cannot be empty"));
            }
            updates.push(ThemeUpdate::Name(name.trim().to_string()));
        }

        if let Some(base) = &self.base {
            let color = Color::parse(base)
                .map_err(|e| CliError::validation(format!("Invalid base color: {e:#}")))?;
            updates.push(ThemeUpdate::Colors(scheme::from_color(color)));
        }

        for entry in &self.colors {
            let (role, value) = entry.split_once('=').ok_or_else(|| {
                CliError::validation(format!("Expected ROLE=COLOR, got '{entry}'"))
            })?;
            let role: ColorRole = role
                .parse()
                .map_err(|e| CliError::validation(format!("{e:#}")))?;
            let value = Color::parse(value)
                .map_err(|e| CliError::validation(format!("Invalid color for {role}: {e:#}")))?;
            updates.push(ThemeUpdate::Color { role, value });
        }

        if self.heading_font.is_some() || self.body_font.is_some() || self.base_size.is_some() {
            let mut typography = current.typography.clone();
            if let Some(font) = &self.heading_font {
                typography.heading_font.clone_from(font);
            }
            if let Some(font) = &self.body_font {
                typography.body_font.clone_from(font);
            }
            if let Some(size) = self.base_size {
                if size.is_nan() || size <= 0.0 {
                    return Err(CliError::validation("--base-size must be positive"));
                }
                typography.base_size = size;
            }
            updates.push(ThemeUpdate::Typography(typography));
        }

        if let Some(scale) = self.spacing_scale {
            if scale.is_nan() || scale <= 0.0 {
                return Err(CliError::validation("--spacing-scale must be positive"));
            }
            let mut spacing = current.spacing.clone();
            spacing.scale = scale;
            updates.push(ThemeUpdate::Spacing(spacing));
        }

        if let Some(enabled) = self.animations {
            let mut animations = current.animations.clone();
            animations.enabled = enabled;
            updates.push(ThemeUpdate::Animations(animations));
        }

        if let Some(max_width) = self.max_width {
            let mut layout = current.layout.clone();
            layout.max_width = max_width;
            updates.push(ThemeUpdate::Layout(layout));
        }

        if let Some(path) = &self.custom_css {
            let css = fs::read_to_string(path).map_err(|e| {
                CliError::io(format!("Failed to read {}: {e}", path.display()))
            })?;
            updates.push(ThemeUpdate::CustomCss(Some(css)));
        } else if self.clear_custom_css {
            updates.push(ThemeUpdate::CustomCss(None));
        }

        Ok(updates)
    }

    /// Execute the update command
    pub fn execute(&self, repo: &ThemeRepository) -> CliResult<()> {
        let current = find(repo, &self.id)?;
        let updates = self.updates(&current)?;
        if updates.is_empty() {
            return Err(CliError::validation("Nothing to update; pass at least one option"));
        }

        let theme = repo
            .update_many(&self.id, updates)
            .map_err(|e| CliError::io(format!("Failed to update theme: {e:#}")))?;

        if self.json {
            return print_json(&theme);
        }
        println!("Updated theme {} ({})", theme.name, theme.id);
        Ok(())
    }
}

impl DuplicateArgs {
    /// Execute the duplicate command
    pub fn execute(&self, repo: &ThemeRepository) -> CliResult<()> {
        find(repo, &self.id)?;
        let copy = repo
            .duplicate(&self.id, &self.name)
            .map_err(|e| CliError::validation(format!("Failed to duplicate theme: {e:#}")))?;

        if self.json {
            return print_json(&copy);
        }
        println!("Created theme {} ({})", copy.name, copy.id);
        Ok(())
    }
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, repo: &ThemeRepository) -> CliResult<()> {
        find(repo, &self.id)?;
        let json = repo
            .export(&self.id)
            .map_err(|e| CliError::io(format!("Failed to export theme: {e:#}")))?;

        match &self.out {
            Some(path) => {
                fs::write(path, json).map_err(|e| {
                    CliError::io(format!("Failed to write {}: {e}", path.display()))
                })?;
                println!("Exported theme to {}", path.display());
            }
            None => println!("{json}"),
        }
        Ok(())
    }
}

impl ImportArgs {
    /// Execute the import command
    pub fn execute(&self, repo: &ThemeRepository) -> CliResult<()> {
        let json = fs::read_to_string(&self.file).map_err(|e| {
            CliError::io(format!("Failed to read {}: {e}", self.file.display()))
        })?;
        let theme = repo
            .import(&json)
            .map_err(|e| CliError::validation(format!("Failed to import theme: {e:#}")))?;

        if self.json {
            return print_json(&theme);
        }
        println!("Imported theme {} ({})", theme.name, theme.id);
        Ok(())
    }
}

impl CssArgs {
    /// Execute the css command
    pub fn execute(&self, repo: &ThemeRepository) -> CliResult<()> {
        let theme = match &self.id {
            Some(id) => find(repo, id)?,
            None => repo
                .active()
                .ok_or_else(|| CliError::not_found("No theme id given and no active theme"))?,
        };

        match &self.out {
            Some(path) => {
                StylesheetWriter::write(&theme, path)
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
                println!("Wrote {}", path.display());
            }
            None => print!("{}", StylesheetWriter::render(&theme)),
        }
        Ok(())
    }
}
