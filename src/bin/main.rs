use clap::{Parser, Subcommand};
use katachi::config::{load_settings, load_user_settings};
use katachi::traits::{AmbientableNode, ExportableNode};
use katachi::{
    AstNode, Diagnostic, Fill, MorphError, MorphResult, Settings, SourceFile, SyntaxKind,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Query and reshape TypeScript declarations from the command line
#[derive(Parser)]
#[command(name = "katachi")]
#[command(version)]
#[command(about = "Query and reshape TypeScript declarations")]
struct Cli {
    /// Settings file to use instead of the user configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the top-level declarations of a file as JSON
    Inspect {
        /// The TypeScript file to inspect
        file: PathBuf,
    },
    /// Apply a JSON structure to a named top-level declaration
    Fill {
        /// The TypeScript file to edit
        file: PathBuf,

        /// Name of the class, function, interface, enum, type alias or variable
        name: String,

        /// Structure, e.g. '{"isExported": true}'
        structure: String,

        /// Write the result back instead of printing it
        #[arg(long)]
        write: bool,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeclarationSummary {
    kind: String,
    name: Option<String>,
    modifiers: Vec<String>,
    is_named_export: bool,
    is_default_export: bool,
    is_ambient: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileSummary<'a> {
    file: &'a str,
    declarations: Vec<DeclarationSummary>,
    diagnostics: &'a [Diagnostic],
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> MorphResult<()> {
    let settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => load_user_settings()?,
    };

    match cli.command {
        Commands::Inspect { file } => {
            let source = open(&file, settings)?;
            let summary = FileSummary {
                file: source.name(),
                declarations: summarize(&source)?,
                diagnostics: source.diagnostics(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Fill {
            file,
            name,
            structure,
            write,
        } => {
            let mut source = open(&file, settings)?;
            fill_declaration(&mut source, &name, &structure)?;
            if write {
                std::fs::write(&file, source.text())?;
                eprintln!("Updated {} ({} edits)", file.display(), source.edit_count());
            } else {
                print!("{}", source.text());
            }
        }
    }
    Ok(())
}

fn open(path: &Path, settings: Settings) -> MorphResult<SourceFile> {
    let text = std::fs::read_to_string(path)?;
    SourceFile::new(path.display().to_string(), text, settings)
}

fn summary_of<T>(file: &SourceFile, node: T) -> MorphResult<DeclarationSummary>
where
    T: ExportableNode + AmbientableNode,
{
    Ok(DeclarationSummary {
        kind: format!("{:?}", node.kind(file)?),
        name: file.name_of(node.id())?,
        modifiers: file
            .modifier_kinds(node.id())?
            .iter()
            .map(|kind| kind.to_string())
            .collect(),
        is_named_export: node.is_named_export(file)?,
        is_default_export: node.is_default_export(file)?,
        is_ambient: node.is_ambient(file)?,
    })
}

fn summarize(file: &SourceFile) -> MorphResult<Vec<DeclarationSummary>> {
    use katachi::{
        ClassDeclaration, EnumDeclaration, FunctionDeclaration, InterfaceDeclaration,
        TypeAliasDeclaration, VariableStatement,
    };

    let mut summaries = Vec::new();
    for statement in file.statements()? {
        let id = statement.id();
        let summary = match statement.kind(file)? {
            SyntaxKind::ClassDeclaration => summary_of(file, ClassDeclaration::from_id(id))?,
            SyntaxKind::FunctionDeclaration => summary_of(file, FunctionDeclaration::from_id(id))?,
            SyntaxKind::InterfaceDeclaration => {
                summary_of(file, InterfaceDeclaration::from_id(id))?
            }
            SyntaxKind::EnumDeclaration => summary_of(file, EnumDeclaration::from_id(id))?,
            SyntaxKind::TypeAliasDeclaration => {
                summary_of(file, TypeAliasDeclaration::from_id(id))?
            }
            SyntaxKind::VariableStatement => {
                let statement = VariableStatement::from_id(id);
                let mut summary = summary_of(file, statement)?;
                let names = statement
                    .declarations(file)?
                    .iter()
                    .filter_map(|declaration| file.name_of(declaration.id()).transpose())
                    .collect::<MorphResult<Vec<_>>>()?;
                summary.name = Some(names.join(", "));
                summary
            }
            _ => continue,
        };
        summaries.push(summary);
    }
    Ok(summaries)
}

fn fill_declaration(file: &mut SourceFile, name: &str, structure: &str) -> MorphResult<()> {
    if let Some(node) = file.class(name)? {
        node.fill(file, &serde_json::from_str(structure)?)?;
    } else if let Some(node) = file.function(name)? {
        node.fill(file, &serde_json::from_str(structure)?)?;
    } else if let Some(node) = file.interface(name)? {
        node.fill(file, &serde_json::from_str(structure)?)?;
    } else if let Some(node) = file.enum_(name)? {
        node.fill(file, &serde_json::from_str(structure)?)?;
    } else if let Some(node) = file.type_alias(name)? {
        node.fill(file, &serde_json::from_str(structure)?)?;
    } else if let Some(node) = file.variable_declaration(name)? {
        // Export and declare state live on the statement
        let statement = node.variable_statement(file)?;
        statement.fill(file, &serde_json::from_str(structure)?)?;
        node.fill(file, &serde_json::from_str(structure)?)?;
    } else {
        return Err(MorphError::not_found(format!(
            "no top-level declaration named `{name}`"
        )));
    }
    Ok(())
}
