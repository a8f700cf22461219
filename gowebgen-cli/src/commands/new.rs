//! Project scaffolding command

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use gowebgen::config::{GeneratorSettings, ProjectConfig, SUPPORTED_DB_TYPES};
use gowebgen::scaffold::{ProjectGenerator, ProjectReport, TemplateHelpers};
use gowebgen::template::{TemplateLoader, TemplateRenderer};

use crate::prompt::{resolve, AcceptDefaults, Prompt, TerminalPrompt};

/// Flags of `gowebgen new`; anything left out is asked for
#[derive(Debug, Default, Args)]
pub struct NewArgs {
    /// Go module path, e.g. `github.com/acme/shop`
    #[arg(long)]
    pub name: Option<String>,
    /// Directory to generate into
    #[arg(long)]
    pub path: Option<PathBuf>,
    /// Database type (mysql, postgres, sqlite, sqlserver, oracle)
    #[arg(long)]
    pub db_type: Option<String>,
    /// Database host
    #[arg(long)]
    pub db_host: Option<String>,
    /// Database port
    #[arg(long)]
    pub db_port: Option<String>,
    /// Database user
    #[arg(long)]
    pub db_user: Option<String>,
    /// Database password
    #[arg(long)]
    pub db_password: Option<String>,
    /// Database name
    #[arg(long)]
    pub db_name: Option<String>,
    /// Redis host
    #[arg(long)]
    pub redis_host: Option<String>,
    /// Redis port
    #[arg(long)]
    pub redis_port: Option<String>,
    /// Redis password
    #[arg(long)]
    pub redis_password: Option<String>,
    /// Redis database number
    #[arg(long)]
    pub redis_db: Option<String>,
    /// HTTP port of the generated server
    #[arg(long)]
    pub server_port: Option<String>,
    /// Accept defaults for everything not given as a flag
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Create a new Go web project
pub struct NewCommand {
    args: NewArgs,
    settings: GeneratorSettings,
}

impl NewCommand {
    /// Create a new command instance
    pub const fn new(args: NewArgs, settings: GeneratorSettings) -> Self {
        Self { args, settings }
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        println!(
            "{}",
            style("=== Go Web Quick Start project generator ===").cyan().bold()
        );
        println!();

        let config = if self.args.yes {
            self.resolve_config(&AcceptDefaults)?
        } else {
            self.resolve_config(&TerminalPrompt)?
        };

        let loader = TemplateLoader::with_standard_dirs(&self.settings.templates.search_dirs, None);
        let renderer = TemplateRenderer::new(loader);

        println!();
        println!(
            "{} {} {}",
            style("Creating").green().bold(),
            style("project:").bold(),
            style(&config.project_name).cyan().bold()
        );

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Failed to set progress style")?,
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner.set_message("Generating project files...");

        let result = ProjectGenerator::new(&config, &renderer).generate();
        spinner.finish_and_clear();
        let report = result.context("Failed to generate project")?;

        print_success(&report);
        Ok(())
    }

    /// Collect the project configuration from flags, settings and `prompt`
    pub fn resolve_config(&self, prompt: &dyn Prompt) -> Result<ProjectConfig> {
        let args = &self.args;
        let defaults = &self.settings.project;

        let raw_name = resolve(
            prompt,
            args.name.as_deref(),
            "Project name (Go module path)",
            &defaults.project_name,
        )?;
        let project_name = ProjectConfig::normalize_project_name(&raw_name);
        if project_name != raw_name {
            println!(
                "{} project name should be a full module path such as \
                 github.com/user/project, using {}",
                style("warning:").yellow().bold(),
                project_name
            );
        }

        let path_flag = args.path.as_ref().map(|p| p.display().to_string());
        let project_path = resolve(
            prompt,
            path_flag.as_deref(),
            "Project path",
            &defaults.project_path,
        )?;

        let db_question = format!("Database type ({})", SUPPORTED_DB_TYPES.join(", "));
        let db_type = resolve(prompt, args.db_type.as_deref(), &db_question, &defaults.db_type)?;

        // The settings port only applies to the settings database type
        let port_default = if db_type == defaults.db_type {
            defaults.db_port.clone()
        } else {
            TemplateHelpers::default_db_port(&db_type).to_string()
        };

        Ok(ProjectConfig {
            project_name,
            project_path,
            db_host: resolve(prompt, args.db_host.as_deref(), "Database host", &defaults.db_host)?,
            db_port: resolve(prompt, args.db_port.as_deref(), "Database port", &port_default)?,
            db_user: resolve(prompt, args.db_user.as_deref(), "Database user", &defaults.db_user)?,
            db_password: resolve(
                prompt,
                args.db_password.as_deref(),
                "Database password",
                &defaults.db_password,
            )?,
            db_name: resolve(prompt, args.db_name.as_deref(), "Database name", &defaults.db_name)?,
            redis_host: resolve(
                prompt,
                args.redis_host.as_deref(),
                "Redis host",
                &defaults.redis_host,
            )?,
            redis_port: resolve(
                prompt,
                args.redis_port.as_deref(),
                "Redis port",
                &defaults.redis_port,
            )?,
            redis_password: resolve(
                prompt,
                args.redis_password.as_deref(),
                "Redis password",
                &defaults.redis_password,
            )?,
            redis_db: resolve(
                prompt,
                args.redis_db.as_deref(),
                "Redis database",
                &defaults.redis_db,
            )?,
            server_port: resolve(
                prompt,
                args.server_port.as_deref(),
                "Server port",
                &defaults.server_port,
            )?,
            db_type,
        })
    }
}

/// Print success message with next steps
fn print_success(report: &ProjectReport) {
    println!("{}", style("✓ Project created successfully!").green().bold());
    println!();
    println!("  {} {} files", style("wrote").dim(), report.files.len());
    if !report.templates.is_empty() {
        println!(
            "  {} {} table templates",
            style("seeded").dim(),
            report.templates.len()
        );
    }
    println!();
    println!("{}", style("Next steps:").bold());
    println!();
    println!("  {} Navigate to project:", style("1.").cyan());
    println!(
        "     {} {}",
        style("$").dim(),
        style(format!("cd {}", report.root.display())).cyan()
    );
    println!();
    println!("  {} Fetch dependencies:", style("2.").cyan());
    println!("     {} {}", style("$").dim(), style("go mod tidy").cyan());
    println!();
    println!("  {} Start the server:", style("3.").cyan());
    println!("     {} {}", style("$").dim(), style("go run cmd/main.go").cyan());
    println!();
    println!("  {} Add a table:", style("4.").cyan());
    println!("     {} {}", style("$").dim(), style("gowebgen create-table").cyan());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompt;

    #[test]
    fn test_defaults_with_yes() {
        let cmd = NewCommand::new(NewArgs::default(), GeneratorSettings::default());
        let config = cmd.resolve_config(&AcceptDefaults).unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn test_flags_override_settings() {
        let mut settings = GeneratorSettings::default();
        settings.project.server_port = "9000".to_string();
        let args = NewArgs {
            name: Some("github.com/acme/shop".to_string()),
            db_type: Some("postgres".to_string()),
            ..NewArgs::default()
        };

        let config = NewCommand::new(args, settings).resolve_config(&AcceptDefaults).unwrap();
        assert_eq!(config.project_name, "github.com/acme/shop");
        assert_eq!(config.db_type, "postgres");
        assert_eq!(config.db_port, "5432");
        assert_eq!(config.server_port, "9000");
    }

    #[test]
    fn test_bare_name_gets_host_prefix() {
        let args = NewArgs {
            name: Some("shop".to_string()),
            ..NewArgs::default()
        };
        let config = NewCommand::new(args, GeneratorSettings::default())
            .resolve_config(&AcceptDefaults)
            .unwrap();
        assert_eq!(config.project_name, "github.com/shop");
    }

    #[test]
    fn test_prompts_in_order() {
        let prompt = ScriptedPrompt::new([
            "github.com/acme/shop",
            "./shop",
            "sqlite",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "8081",
        ]);
        let cmd = NewCommand::new(NewArgs::default(), GeneratorSettings::default());
        let config = cmd.resolve_config(&prompt).unwrap();

        assert_eq!(prompt.asked().len(), 13);
        assert_eq!(prompt.asked()[0], "Project name (Go module path)");
        assert_eq!(config.project_path, "./shop");
        assert_eq!(config.db_type, "sqlite");
        assert_eq!(config.db_port, "");
        assert_eq!(config.server_port, "8081");
    }
}
