use crate::{
    driver::files::TmFilepath,
    stage2_codegen::tm_ast::{AnnotatedInstruction, Instruction, TmProgram},
};
use anyhow::Result;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

const TAB: &str = "\t";

pub struct TmCodeWriter<W: Write> {
    bw: BufWriter<W>,
}
impl<'a> TryFrom<&'a TmFilepath> for TmCodeWriter<File> {
    type Error = anyhow::Error;
    fn try_from(tm_filepath: &'a TmFilepath) -> Result<Self> {
        let f = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(tm_filepath as &PathBuf)?;
        Ok(Self::new(f))
    }
}
impl<W: Write> TmCodeWriter<W> {
    pub fn new(w: W) -> Self {
        Self { bw: BufWriter::new(w) }
    }

    /// Comments precede the instruction at whose address they were emitted.
    /// Comments emitted after the last instruction trail the listing.
    pub fn write_program(mut self, TmProgram { instrs, comments }: &TmProgram) -> Result<W> {
        let mut comments = comments.iter().peekable();

        for (addr, instr) in instrs.iter().enumerate() {
            while let Some((_, comment)) = comments.next_if(|(c_addr, _)| **c_addr <= addr) {
                self.write_comment(comment)?;
            }
            self.write_instr(addr, instr)?;
        }
        for (_, comment) in comments {
            self.write_comment(comment)?;
        }

        self.bw.flush()?;
        let w = self.bw.into_inner().map_err(|e| e.into_error())?;
        Ok(w)
    }

    fn write_comment(&mut self, comment: &str) -> Result<()> {
        writeln!(&mut self.bw, "* {comment}")?;
        Ok(())
    }

    fn write_instr(
        &mut self,
        addr: usize,
        AnnotatedInstruction { instr, comment }: &AnnotatedInstruction,
    ) -> Result<()> {
        match instr {
            Instruction::RegisterOnly { op, r, s, t } => {
                writeln!(
                    &mut self.bw,
                    "{addr:>3}:  {:>5}  {},{},{} {TAB}{comment}",
                    op.mnemonic(),
                    r.number(),
                    s.number(),
                    t.number(),
                )?;
            }
            Instruction::RegisterMemory { op, r, d, s } => {
                writeln!(
                    &mut self.bw,
                    "{addr:>3}:  {:>5}  {},{d}({}) {TAB}{comment}",
                    op.mnemonic(),
                    r.number(),
                    s.number(),
                )?;
            }
        }
        Ok(())
    }
}
