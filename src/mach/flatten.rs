use crate::lang::ast::{Block, Inst, Procedure};
use crate::lang::{Diagnostic, Loc};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Diagnostic>;

/// Inline every `call` site of the procedure named `entry`, producing a block
/// free of `Call` instructions. Procedure bodies are deep-copied per call
/// site; conditions stay shared. A procedure that is still being expanded
/// when it is called again is a recursion, which the transition table cannot
/// express.
pub fn flatten(entry: &str, procedures: &HashMap<String, Procedure>) -> Result<Block> {
    let mut call_stack = HashSet::new();
    flatten_procedure(entry, procedures, &mut call_stack, Loc::default())
}

fn flatten_procedure(
    name: &str,
    procedures: &HashMap<String, Procedure>,
    call_stack: &mut HashSet<String>,
    call_loc: Loc,
) -> Result<Block> {
    if call_stack.contains(name) {
        return Err(Diagnostic::error(
            call_loc,
            format!(
                "recursion is not supported (procedure '{}' calls itself)",
                name
            ),
        ));
    }
    let procedure = match procedures.get(name) {
        Some(procedure) => procedure,
        None => {
            return Err(Diagnostic::error(
                call_loc,
                format!("procedure '{}' is not defined", name),
            ));
        }
    };
    call_stack.insert(name.to_string());
    let flat = flatten_block(&procedure.body, procedures, call_stack);
    call_stack.remove(name);
    flat
}

fn flatten_block(
    block: &Block,
    procedures: &HashMap<String, Procedure>,
    call_stack: &mut HashSet<String>,
) -> Result<Block> {
    let mut output = Block::new();
    for inst in block {
        match inst {
            Inst::Call(loc, name) => {
                let mut body = flatten_procedure(name, procedures, call_stack, *loc)?;
                output.append(&mut body);
            }
            Inst::IfElse(loc, cond, then_block, else_block) => {
                let flat_then = flatten_block(then_block, procedures, call_stack)?;
                let flat_else = flatten_block(else_block, procedures, call_stack)?;
                output.push(Inst::IfElse(*loc, Rc::clone(cond), flat_then, flat_else));
            }
            Inst::While(loc, cond, body) => {
                let flat_body = flatten_block(body, procedures, call_stack)?;
                output.push(Inst::While(*loc, Rc::clone(cond), flat_body));
            }
            other => output.push(other.clone()),
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc(name: &str, body: Block) -> (String, Procedure) {
        (
            name.to_string(),
            Procedure {
                name: name.to_string(),
                body,
                loc: Loc::default(),
            },
        )
    }

    #[test]
    fn test_call_inlined_per_site() {
        let mut procedures = HashMap::new();
        procedures.extend(vec![
            proc("step", vec![Inst::MoveRight(Loc::default())]),
            proc(
                "main",
                vec![
                    Inst::Call(Loc::default(), "step".to_string()),
                    Inst::Call(Loc::default(), "step".to_string()),
                ],
            ),
        ]);
        let flat = flatten("main", &procedures).unwrap();
        assert_eq!(flat.len(), 2);
        assert!(flat.iter().all(|inst| matches!(inst, Inst::MoveRight(_))));
    }

    #[test]
    fn test_recursion_detected() {
        let mut procedures = HashMap::new();
        procedures.extend(vec![
            proc("a", vec![Inst::Call(Loc::new(2, 5), "a".to_string())]),
            proc("main", vec![Inst::Call(Loc::default(), "a".to_string())]),
        ]);
        let err = flatten("main", &procedures).unwrap_err();
        assert!(err.message.contains("recursion"));
        assert_eq!((err.line, err.column), (2, 5));
    }

    #[test]
    fn test_unknown_procedure() {
        let mut procedures = HashMap::new();
        procedures.extend(vec![proc(
            "main",
            vec![Inst::Call(Loc::default(), "ghost".to_string())],
        )]);
        let err = flatten("main", &procedures).unwrap_err();
        assert!(err.message.contains("not defined"));
    }
}
