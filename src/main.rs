use clap::{Parser, Subcommand};
use newsletter_gen::generate::{GenerateRequest, Workspace};
use newsletter_gen::{output, settings};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "newsletter-gen")]
#[command(about = "Generate newsletter emails from templates and configs")]
#[command(long_about = "\
Generate newsletter emails from templates and configs

Templates are MJML files with mustache markers; configs are JSON documents
that fill them in.

Install root layout:

  .
  ├── newsletter-gen.toml          # Optional settings (see gen-settings)
  ├── templates/
  │   └── newsletter.template      # {{subject}}, {{#articles}}…{{/articles}}
  ├── config/
  │   ├── email-config-example.json
  │   └── march.json
  └── output/                      # Created on first generate
      └── newsletter_20250314_091500.mjml

Typical session:

  newsletter-gen new-config --name march
  $EDITOR config/march.json
  newsletter-gen generate --config march")]
#[command(version)]
struct Cli {
    /// Install root containing templates/, config/ and output/
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a template with a config and write the email to output/
    Generate {
        /// Configuration name (with or without .json)
        #[arg(short, long)]
        config: String,
        /// Template name; defaults to the configured default template
        #[arg(short, long)]
        template: Option<String>,
        /// Output file name; defaults to a timestamped name
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Create a new config by copying the example config
    NewConfig {
        /// Name of the new configuration
        #[arg(short, long)]
        name: String,
        /// Copy this configuration instead of the example
        #[arg(long)]
        from: Option<String>,
    },
    /// List available configurations
    ListConfigs,
    /// List available templates
    ListTemplates,
    /// Print a stock newsletter-gen.toml with all options documented
    GenSettings,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Generate {
            config,
            template,
            output: output_name,
        } => {
            let workspace = Workspace::open(&cli.root)?;
            let request = GenerateRequest {
                config,
                template,
                output: output_name,
            };
            let generated = workspace.generate(&request)?;
            output::print_generate_output(&generated, &cli.root);
        }
        Command::NewConfig { name, from } => {
            let workspace = Workspace::open(&cli.root)?;
            let path = workspace.new_config(&name, from.as_deref())?;
            output::print_new_config_output(&path, &cli.root);
        }
        Command::ListConfigs => {
            let workspace = Workspace::open(&cli.root)?;
            output::print_config_list(&workspace.configs().list()?);
        }
        Command::ListTemplates => {
            let workspace = Workspace::open(&cli.root)?;
            output::print_template_list(&workspace.templates().list()?);
        }
        Command::GenSettings => {
            print!("{}", settings::stock_settings_toml());
        }
    }

    Ok(())
}
