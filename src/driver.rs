pub mod config;
pub mod files;

use self::{
    config::{Args, CliArgs, DriverUntil},
    files::{TmFilepath, TreeFilepath},
};
use crate::{
    common::symbol_table::GlobalSymbolTable,
    stage1_tree::{self, annotated_ast::Program},
    stage2_codegen::{CodeGenerator, GeneratedCode, emitter::TmCode, tm_ast::TmProgram},
    stage3_emit::write::TmCodeWriter,
};
use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::PathBuf,
};

pub fn driver_main() -> Result<()> {
    env_logger::init();

    let cli_args = CliArgs::parse();
    log::info!("{cli_args:?}");

    let driver = Driver::from(Args::try_from(cli_args)?);
    driver.run()
}

#[derive(Debug)]
pub enum CompilationResult {
    Tree(Program),
    TmCode(TmProgram),
    TmFile(TmFilepath),
}

pub struct Driver {
    args: Args,
}
impl From<Args> for Driver {
    fn from(args: Args) -> Self {
        Self { args }
    }
}
impl Driver {
    pub fn run(&self) -> Result<()> {
        for tree_filepath in self.args.tree_filepaths.iter() {
            let f = File::open(tree_filepath as &PathBuf)
                .with_context(|| format!("Failed to open {tree_filepath:?}"))?;

            let compil_res = self.compile(tree_filepath, BufReader::new(f))?;

            match compil_res {
                CompilationResult::Tree(prog) => println!("{prog:#?}"),
                CompilationResult::TmCode(tm_prog) => {
                    TmCodeWriter::new(io::stdout()).write_program(&tm_prog)?;
                }
                CompilationResult::TmFile(tm_filepath) => {
                    log::info!("Compiler done -> {tm_filepath:?}");
                }
            }
        }
        Ok(())
    }

    pub fn compile<R: Read>(
        &self,
        tree_filepath: &TreeFilepath,
        tree_reader: R,
    ) -> Result<CompilationResult> {
        let prog = stage1_tree::read_program(tree_reader)
            .with_context(|| format!("Failed to load {tree_filepath:?}"))?;
        log::info!("Loaded tree -> {} top-level declarations", prog.decls.len());
        if self.args.until == DriverUntil::Tree {
            return Ok(CompilationResult::Tree(prog));
        }

        let symtab = GlobalSymbolTable::from(&prog);
        log::debug!("Global bindings: {}", symtab.len());
        let generator = CodeGenerator::new(TmCode::default(), self.args.entry_ident.clone());
        let generated: GeneratedCode<TmCode> = generator
            .gen_program(&prog, &symtab)
            .with_context(|| format!("Code generation failed for {tree_filepath:?}"))?;
        match generated.entry_addr() {
            Some(entry_addr) => log::debug!(
                "Entry {} at {entry_addr:?}; {} functions.",
                self.args.entry_ident,
                generated.fun_addrs().len()
            ),
            None => log::debug!("No entry {}.", self.args.entry_ident),
        }
        let tm_prog = generated.into_code().into_program()?;
        log::info!("Generated -> {} instructions", tm_prog.instrs.len());
        if self.args.until == DriverUntil::Codegen {
            return Ok(CompilationResult::TmCode(tm_prog));
        }

        let tm_filepath = match &self.args.out_filepath {
            Some(out_filepath) => out_filepath.clone(),
            None => TmFilepath::from(tree_filepath),
        };
        TmCodeWriter::try_from(&tm_filepath)?
            .write_program(&tm_prog)
            .with_context(|| format!("Failed to write {tm_filepath:?}"))?;

        Ok(CompilationResult::TmFile(tm_filepath))
    }
}
