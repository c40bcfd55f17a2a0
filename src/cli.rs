//! Minimal CLI: extract → schema document | generate → Rust modules
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::codegen::{GeneratedUnit, UndeclaredTypes};
use crate::schema::Prototype;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// turn a prototype overview document into a schema document and generated Rust type definitions
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// parse the overview document's prototype table into the schema JSON
    Extract(ExtractArgs),
    /// generate Rust type definitions from a schema JSON
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug)]
struct ExtractArgs {
    /// prototype overview document (HTML)
    #[arg(short, long)]
    input: PathBuf,

    /// output schema .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// companion listing of distinct bare type names, one per line
    #[arg(long)]
    types_out: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// schema .json produced by `extract`
    #[arg(short, long)]
    schema: PathBuf,

    /// directory receiving the generated module set (mod.rs, stubs.rs, one file per prototype)
    #[arg(short, long)]
    out_dir: PathBuf,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Extract(args) => args.run(),
            Command::Generate(args) => args.run(),
        }
    }
}

impl ExtractArgs {
    fn run(&self) -> anyhow::Result<()> {
        let source = std::fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;

        let rows = crate::html::rows(&source)?;
        let prototypes = crate::extract::extract(&rows)?;

        let schema_src = serde_json::to_string_pretty(&prototypes)?;
        write_or_stdout(self.out.as_deref(), &schema_src)?;

        if let Some(types_out) = self.types_out.as_deref() {
            let mut listing = String::new();
            for name in crate::schema::referenced_names(&prototypes) {
                listing.push_str(&name);
                listing.push('\n');
            }
            write_file(types_out, &listing)?;
        }

        eprintln!(
            "{} {} prototypes",
            "extracted".green().bold(),
            prototypes.len()
        );
        Ok(())
    }
}

impl GenerateArgs {
    fn run(&self) -> anyhow::Result<()> {
        let source = std::fs::read_to_string(&self.schema)
            .with_context(|| format!("failed to read {}", self.schema.display()))?;
        let prototypes: Vec<Prototype> = crate::path_de::from_str_with_path(&source)
            .map_err(anyhow::Error::msg)
            .context("failed to parse schema document")?;

        // unique class names; this is also the table `extends` refers into
        crate::schema::by_class_name(&prototypes)?;

        let mut undeclared = UndeclaredTypes::new();
        let units: Vec<GeneratedUnit> = prototypes
            .iter()
            .map(|proto| crate::codegen::generate(proto, &mut undeclared))
            .collect();
        let set = crate::aggregate::aggregate(&units, undeclared);

        // generation fully succeeded; only now touch the filesystem
        std::fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("failed to create {}", self.out_dir.display()))?;
        for (file_name, contents) in &set.units {
            write_file(&self.out_dir.join(file_name), contents)?;
        }
        write_file(&self.out_dir.join("stubs.rs"), &set.stubs)?;
        write_file(&self.out_dir.join("mod.rs"), &set.manifest)?;

        if !set.stub_names.is_empty() {
            eprintln!(
                "{} {} referenced types have no prototype or primitive; stubs emitted: {}",
                "note:".yellow().bold(),
                set.stub_names.len(),
                set.stub_names.join(", ")
            );
        }
        eprintln!(
            "{} {} units into {}",
            "generated".green().bold(),
            set.units.len(),
            self.out_dir.display()
        );
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_or_stdout(out: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => write_file(path, contents),
        None => {
            println!("{contents}");
            Ok(())
        }
    }
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
