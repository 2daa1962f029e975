//! Disassembler: compiled program → readable listing.
//!
//! One instruction per line with its index, since jump and call
//! operands are absolute indices. The function table is appended so
//! call operands can be read back to names.

use nib_common::Program;

/// Render a program as a flat instruction listing.
pub fn disassemble(program: &Program) -> String {
    let mut out = String::new();

    for (i, instr) in program.instructions.iter().enumerate() {
        out.push_str(&format!("{i:>4}  {}\n", instr.op));
    }

    if !program.functions.is_empty() {
        out.push('\n');
        out.push_str("functions:\n");
        for (i, func) in program.functions.iter().enumerate() {
            out.push_str(&format!(
                "{i:>4}  {}({})  entry {}\n",
                func.name,
                func.params.join(" "),
                func.entry
            ));
        }
    }

    out
}
