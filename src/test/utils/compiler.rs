use super::{Machine, Output};
use crate::{
    common::{identifier::RawIdentifier, symbol_table::GlobalSymbolTable},
    driver::{
        CompilationResult, Driver,
        config::{Args, DriverUntil},
        files::TreeFilepath,
    },
    stage1_tree::annotated_ast::Program,
    stage2_codegen::{CodeGenerator, GeneratedCode, emitter::TmCode, tm_ast::TmProgram},
};
use anyhow::{Result, anyhow};
use std::{
    io::{BufReader, Cursor},
    path::PathBuf,
};

pub fn generate_with_entry(prog: &Program, entry: &str) -> Result<GeneratedCode<TmCode>> {
    let symtab = GlobalSymbolTable::from(prog);
    let generator = CodeGenerator::new(TmCode::default(), RawIdentifier::from(entry));
    generator.gen_program(prog, &symtab)
}
pub fn generate(prog: &Program) -> Result<GeneratedCode<TmCode>> {
    generate_with_entry(prog, "main")
}

pub fn compile_tm(prog: &Program) -> Result<TmProgram> {
    generate(prog)?.into_code().into_program()
}

pub fn compile_and_run(prog: &Program, input: Vec<i32>) -> Result<Vec<Output>> {
    let tm_prog = compile_tm(prog)?;
    Machine::new(&tm_prog, input).run()
}

/// Run the serialized tree through the driver, as the binary would.
pub fn compile_json(json: &str, until: DriverUntil) -> Result<CompilationResult> {
    let args = Args {
        tree_filepaths: Vec::with_capacity(0),
        until,
        entry_ident: RawIdentifier::from("main"),
        out_filepath: None,
    };
    let driver = Driver::from(args);

    let mock_tree_filepath = TreeFilepath::try_from(PathBuf::from("/tmp/mock.json"))?;
    let tree_reader = BufReader::new(Cursor::new(json));
    driver.compile(&mock_tree_filepath, tree_reader)
}

pub fn compile_json_until_codegen(json: &str) -> Result<TmProgram> {
    match compile_json(json, DriverUntil::Codegen)? {
        CompilationResult::TmCode(tm_prog) => Ok(tm_prog),
        actual => Err(anyhow!("{actual:#?}")),
    }
}

/// Indices of the instructions whose comment is exactly `comment`.
pub fn find_by_comment(tm_prog: &TmProgram, comment: &str) -> Vec<usize> {
    tm_prog
        .instrs
        .iter()
        .enumerate()
        .filter(|(_, a_instr)| a_instr.comment == comment)
        .map(|(i, _)| i)
        .collect()
}
