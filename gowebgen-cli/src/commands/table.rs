//! Table slice command
//!
//! Adds a model, DAO, service and handler for one table to an existing
//! project and registers the handler provider.
//!
//! # Example
//!
//! ```bash
//! gowebgen create-table --table orders \
//!   --field "amount float64" \
//!   --field 'status int8 `json:"status"` Order status' \
//!   --project-root ./shop --yes
//! ```

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use console::style;
use similar::{ChangeTag, TextDiff};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use gowebgen::config::{GeneratorSettings, ModelConfig, SUPPORTED_DB_TYPES};
use gowebgen::scaffold::field::{parse_fields, read_fields, Field};
use gowebgen::scaffold::table::PlannedChange;
use gowebgen::scaffold::{Registration, TableGenerator, TableReport, TemplateHelpers};
use gowebgen::template::{TemplateLoader, TemplateRenderer};
use gowebgen::wire::RegistryStrategy;

use crate::prompt::{resolve, AcceptDefaults, Prompt, TerminalPrompt};

/// Registration strategy as accepted on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RegistryArg {
    /// Patch pkg/wire/provider.go in place
    #[default]
    Patch,
    /// Record in pkg/wire/providers.toml and regenerate registry_gen.go
    Manifest,
}

impl From<RegistryArg> for RegistryStrategy {
    fn from(arg: RegistryArg) -> Self {
        match arg {
            RegistryArg::Patch => Self::Patch,
            RegistryArg::Manifest => Self::Manifest,
        }
    }
}

/// Flags of `gowebgen create-table`; anything left out is asked for
#[derive(Debug, Default, Args)]
pub struct TableArgs {
    /// Go module path of the target project
    #[arg(long)]
    pub project_import: Option<String>,
    /// Database type of the target project
    #[arg(long)]
    pub db_type: Option<String>,
    /// Table name, e.g. `orders`
    #[arg(long)]
    pub table: Option<String>,
    /// Go model name (default: table name, capitalised, one trailing `s` removed)
    #[arg(long)]
    pub model: Option<String>,
    /// Module name used for file names (default: model name, first letter lowered)
    #[arg(long)]
    pub module: Option<String>,
    /// Root of the target project
    #[arg(long)]
    pub project_root: Option<PathBuf>,
    /// Field definition `name type [tag] [comment]`, repeatable
    #[arg(long = "field", value_name = "FIELD")]
    pub fields: Vec<String>,
    /// How to register the new provider
    #[arg(long, value_enum, default_value_t = RegistryArg::Patch)]
    pub registry: RegistryArg,
    /// Show the changes as a diff without writing anything
    #[arg(long)]
    pub dry_run: bool,
    /// Accept defaults for everything not given as a flag
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Generate a CRUD slice for one table
pub struct TableCommand {
    args: TableArgs,
    settings: GeneratorSettings,
}

impl TableCommand {
    /// Create a new command instance
    pub const fn new(args: TableArgs, settings: GeneratorSettings) -> Self {
        Self { args, settings }
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        println!("{}", style("=== Table code generator ===").cyan().bold());
        println!();

        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();

        let (config, project_root) = if self.args.yes {
            self.resolve_config(&AcceptDefaults, &mut input, &mut output)?
        } else {
            self.resolve_config(&TerminalPrompt, &mut input, &mut output)?
        };

        let loader = TemplateLoader::with_standard_dirs(
            &self.settings.templates.search_dirs,
            Some(&project_root),
        );
        let renderer = TemplateRenderer::new(loader);
        let generator = TableGenerator::new(&config, &renderer, &project_root);
        let strategy = RegistryStrategy::from(self.args.registry);

        if self.args.dry_run {
            let changes = generator
                .plan(strategy)
                .context("Failed to plan table generation")?;
            print_plan(&changes);
            return Ok(());
        }

        let files = generator
            .generate()
            .context("Failed to generate table files")?;
        let registration = generator
            .register(strategy)
            .context("Failed to register provider")?;

        print_success(&config, &TableReport { files, registration });
        Ok(())
    }

    /// Collect the table configuration
    ///
    /// Field lines are read from `input` when no `--field` is given and the
    /// prompt is interactive.
    pub fn resolve_config(
        &self,
        prompt: &dyn Prompt,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<(ModelConfig, PathBuf)> {
        let args = &self.args;
        let defaults = &self.settings.table;

        let project_import = resolve(
            prompt,
            args.project_import.as_deref(),
            "Project import path",
            &defaults.project_import,
        )?;
        let db_question = format!("Database type ({})", SUPPORTED_DB_TYPES.join(", "));
        let db_type = resolve(prompt, args.db_type.as_deref(), &db_question, &defaults.db_type)?;
        let table = resolve(prompt, args.table.as_deref(), "Table name", "users")?;

        let fields = self.collect_fields(prompt, input, output)?;

        let model = resolve(
            prompt,
            args.model.as_deref(),
            "Model name",
            &TemplateHelpers::default_model_name(table.trim()),
        )?;
        let module = resolve(
            prompt,
            args.module.as_deref(),
            "Module name",
            &TemplateHelpers::default_module_name(model.trim()),
        )?;

        let root_flag = args.project_root.as_ref().map(|p| p.display().to_string());
        let project_root = resolve(
            prompt,
            root_flag.as_deref(),
            "Project root",
            &defaults.project_root.display().to_string(),
        )?;

        let config = ModelConfig::new(&table, Some(&model), Some(&module))
            .context("Invalid table configuration")?
            .with_fields(fields)
            .with_project_import(project_import)
            .with_db_type(db_type);

        Ok((config, PathBuf::from(project_root)))
    }

    fn collect_fields(
        &self,
        prompt: &dyn Prompt,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<Vec<Field>> {
        if !self.args.fields.is_empty() {
            return parse_fields(&self.args.fields).context("Invalid --field definition");
        }
        if !prompt.is_interactive() {
            return Ok(Vec::new());
        }

        writeln!(
            output,
            "\nEnter fields one per line as `name type [tag] [comment]`, blank line to finish:"
        )?;
        writeln!(
            output,
            "e.g. name string `gorm:\"type:varchar(100)\" json:\"name\"` Display name"
        )?;
        read_fields(input, output).context("Failed to read field definitions")
    }
}

/// Print planned changes as colored diffs
fn print_plan(changes: &[PlannedChange]) {
    println!("{}", style("Dry run, nothing was written").yellow().bold());
    for change in changes {
        println!();
        let label = if change.before.is_empty() { "new" } else { "modified" };
        println!(
            "{} {}",
            style(change.path.display()).bold(),
            style(format!("({label})")).dim()
        );

        let diff = TextDiff::from_lines(&change.before, &change.after);
        for group in diff.grouped_ops(3) {
            for op in group {
                for line in diff.iter_changes(&op) {
                    match line.tag() {
                        ChangeTag::Delete => print!("{}", style(format!("-{line}")).red()),
                        ChangeTag::Insert => print!("{}", style(format!("+{line}")).green()),
                        ChangeTag::Equal => print!(" {line}"),
                    }
                }
            }
        }
    }
    println!();
}

fn print_success(config: &ModelConfig, report: &TableReport) {
    println!();
    println!(
        "{} {} files:",
        style("Generated").green().bold(),
        report.files.len()
    );
    for path in &report.files {
        println!("  {} {}", style("✓").green(), style(path.display()).dim());
    }

    println!();
    match &report.registration {
        Registration::Patched { path, strategy } => println!(
            "{} {} in {} ({strategy})",
            style("Registered").green().bold(),
            style(&config.model_name).cyan(),
            path.display()
        ),
        Registration::Manifest(outcome) if outcome.added => println!(
            "{} {} in {}, regenerated {}",
            style("Registered").green().bold(),
            style(&config.model_name).cyan(),
            outcome.manifest_path.display(),
            outcome.registry_path.display()
        ),
        Registration::Manifest(outcome) => println!(
            "{} {} already listed in {}",
            style("Skipped").yellow().bold(),
            style(&config.model_name).cyan(),
            outcome.manifest_path.display()
        ),
    }

    println!();
    println!("{}", style("Next steps:").cyan().bold());
    println!(
        "  1. Mount the routes: {}",
        style(format!(
            "api.Register{}Routes(r, api.New{}Handler(db))",
            config.model_name, config.model_name
        ))
        .yellow()
    );
    println!("  2. Regenerate the injector: {}", style("wire ./pkg/wire").yellow());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompt;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn command(args: TableArgs) -> TableCommand {
        TableCommand::new(args, GeneratorSettings::default())
    }

    #[test]
    fn test_defaults_with_yes() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let (config, root) = command(TableArgs::default())
            .resolve_config(&AcceptDefaults, &mut input, &mut output)
            .unwrap();

        assert_eq!(config.table_name, "users");
        assert_eq!(config.model_name, "User");
        assert_eq!(config.module_name, "user");
        assert_eq!(config.db_type, "mysql");
        assert!(config.fields.is_empty());
        assert_eq!(root, PathBuf::from("."));
        assert!(output.is_empty());
    }

    #[test]
    fn test_flags_fill_everything() {
        let args = TableArgs {
            project_import: Some("github.com/acme/shop".to_string()),
            db_type: Some("oracle".to_string()),
            table: Some("orders".to_string()),
            project_root: Some(PathBuf::from("shop")),
            fields: vec!["amount float64".to_string()],
            ..TableArgs::default()
        };
        let prompt = ScriptedPrompt::new(["", ""]);
        let (config, root) = command(args)
            .resolve_config(&prompt, &mut Cursor::new(""), &mut Vec::new())
            .unwrap();

        // only model and module were asked for
        assert_eq!(prompt.asked(), vec!["Model name", "Module name"]);
        assert_eq!(config.model_name, "Order");
        assert_eq!(config.id_type(), "int64");
        assert_eq!(config.fields.len(), 1);
        assert_eq!(root, PathBuf::from("shop"));
    }

    #[test]
    fn test_interactive_fields() {
        let prompt = ScriptedPrompt::new([
            "github.com/acme/shop",
            "postgres",
            "orders",
            "",
            "",
            "",
        ]);
        let mut input = Cursor::new("amount float64\nbroken\nnote string\n\n");
        let mut output = Vec::new();
        let (config, _) = command(TableArgs::default())
            .resolve_config(&prompt, &mut input, &mut output)
            .unwrap();

        let names: Vec<_> = config.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["amount", "note"]);
        assert!(String::from_utf8(output).unwrap().contains("skipped"));
    }

    #[test]
    fn test_invalid_field_flag_is_error() {
        let args = TableArgs {
            fields: vec!["amount".to_string()],
            ..TableArgs::default()
        };
        let result =
            command(args).resolve_config(&AcceptDefaults, &mut Cursor::new(""), &mut Vec::new());
        assert!(result.is_err());
    }

    fn manifest_args(root: &TempDir, dry_run: bool) -> TableArgs {
        TableArgs {
            table: Some("orders".to_string()),
            project_root: Some(root.path().to_path_buf()),
            fields: vec!["amount float64".to_string()],
            registry: RegistryArg::Manifest,
            dry_run,
            yes: true,
            ..TableArgs::default()
        }
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let root = TempDir::new().unwrap();
        command(manifest_args(&root, true)).execute().unwrap();
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_execute_with_manifest() {
        let root = TempDir::new().unwrap();
        command(manifest_args(&root, false)).execute().unwrap();

        assert!(root.path().join("internal/model/order.go").is_file());
        assert!(root.path().join("internal/api/order_handler.go").is_file());
        assert!(root.path().join("pkg/wire/providers.toml").is_file());
        assert!(root.path().join("pkg/wire/registry_gen.go").is_file());
    }

    #[test]
    fn test_registry_arg_maps_to_strategy() {
        assert_eq!(
            RegistryStrategy::from(RegistryArg::Patch),
            RegistryStrategy::Patch
        );
        assert_eq!(
            RegistryStrategy::from(RegistryArg::Manifest),
            RegistryStrategy::Manifest
        );
    }
}
