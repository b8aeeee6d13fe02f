use std::rc::Rc;
use turing::lang::ast::{Cond, Inst};
use turing::lang::{parse, Level};

fn main_body(source: &str) -> Vec<Inst> {
    let parsed = parse(source);
    assert!(parsed.ok, "unexpected diagnostics: {:?}", parsed.diagnostics);
    parsed.procedures.get("main").expect("main").body.clone()
}

#[test]
fn test_simple_statements() {
    let body = main_body(
        "Set_alphabet \"a\";
         proc main() { move_left; move_right; write \"a\"; x = -7; x++; x--; }",
    );
    assert!(matches!(body[0], Inst::MoveLeft(_)));
    assert!(matches!(body[1], Inst::MoveRight(_)));
    assert!(matches!(body[2], Inst::Write(_, ref s) if s.as_ref() == "a"));
    assert!(matches!(body[3], Inst::VarSet(_, -7)));
    assert!(matches!(body[4], Inst::VarInc(_)));
    assert!(matches!(body[5], Inst::VarDec(_)));
}

#[test]
fn test_write_blank_resolves() {
    let body = main_body(
        "Set_alphabet \"a\";
         proc main() { write \"blank\"; }",
    );
    assert!(matches!(body[0], Inst::Write(_, ref s) if s.as_ref() == " "));
}

#[test]
fn test_setup_content() {
    let parsed = parse("Set_alphabet \"a b\"; Setup \"a blank b\";");
    assert!(parsed.ok);
    let names: Vec<&str> = parsed.setup.iter().map(|s| s.as_ref()).collect();
    assert_eq!(names, vec!["a", " ", "b"]);
}

#[test]
fn test_condition_precedence() {
    // or is loosest, then xor, then and; not binds tightest
    let body = main_body(
        "Set_alphabet \"a b c d\";
         proc main() {
             if (read == \"a\" and not read == \"b\" xor read == \"c\" or read == \"d\") { }
         }",
    );
    let cond = match &body[0] {
        Inst::IfElse(_, cond, ..) => Rc::clone(cond),
        other => panic!("expected if, got {:?}", other),
    };
    let (xor, d) = match cond.as_ref() {
        Cond::Or(_, left, right) => (Rc::clone(left), Rc::clone(right)),
        other => panic!("expected or at the top, got {:?}", other),
    };
    assert!(matches!(d.as_ref(), Cond::ReadEq(_, s) if s.as_ref() == "d"));
    let (and, c) = match xor.as_ref() {
        Cond::Xor(_, left, right) => (Rc::clone(left), Rc::clone(right)),
        other => panic!("expected xor below or, got {:?}", other),
    };
    assert!(matches!(c.as_ref(), Cond::ReadEq(_, s) if s.as_ref() == "c"));
    match and.as_ref() {
        Cond::And(_, left, right) => {
            assert!(matches!(left.as_ref(), Cond::ReadEq(_, s) if s.as_ref() == "a"));
            assert!(matches!(right.as_ref(), Cond::Not(..)));
        }
        other => panic!("expected and below xor, got {:?}", other),
    }
}

#[test]
fn test_parenthesized_condition() {
    let body = main_body(
        "Set_alphabet \"a b\";
         proc main() { while (not (read == \"a\" or read == \"b\")) { } }",
    );
    let cond = match &body[0] {
        Inst::While(_, cond, _) => Rc::clone(cond),
        other => panic!("expected while, got {:?}", other),
    };
    match cond.as_ref() {
        Cond::Not(_, inner) => assert!(matches!(inner.as_ref(), Cond::Or(..))),
        other => panic!("expected not, got {:?}", other),
    }
}

#[test]
fn test_else_if_desugars_to_nested_if() {
    let body = main_body(
        "Set_alphabet \"a b\";
         proc main() {
             if (read == \"a\") { write \"a\"; }
             else if (read == \"b\") { write \"b\"; }
             else { move_right; }
         }",
    );
    let (then_block, else_block) = match &body[0] {
        Inst::IfElse(_, _, then_block, else_block) => (then_block, else_block),
        other => panic!("expected if, got {:?}", other),
    };
    assert_eq!(then_block.len(), 1);
    assert_eq!(else_block.len(), 1);
    match &else_block[0] {
        Inst::IfElse(_, _, inner_then, inner_else) => {
            assert_eq!(inner_then.len(), 1);
            assert!(matches!(inner_else[0], Inst::MoveRight(_)));
        }
        other => panic!("expected nested if in else, got {:?}", other),
    }
}

#[test]
fn test_var_condition_ranges() {
    let body = main_body(
        "Set_alphabet \"a\";
         proc main() { if (x < -128 or x > 127) { } }",
    );
    let cond = match &body[0] {
        Inst::IfElse(_, cond, ..) => Rc::clone(cond),
        other => panic!("expected if, got {:?}", other),
    };
    match cond.as_ref() {
        Cond::Or(_, left, right) => {
            assert!(matches!(left.as_ref(), Cond::VarLt(_, -128)));
            assert!(matches!(right.as_ref(), Cond::VarGt(_, 127)));
        }
        other => panic!("expected or, got {:?}", other),
    }
}

#[test]
fn test_locations_recorded() {
    let parsed = parse("Set_alphabet \"a\";\nproc main() {\n    move_left;\n}");
    assert!(parsed.ok);
    let body = &parsed.procedures["main"].body;
    let loc = body[0].loc();
    assert_eq!((loc.line, loc.column), (3, 5));
}

#[test]
fn test_condition_locations_recorded() {
    let parsed = parse("Set_alphabet \"a\";\nproc main() { if (read == \"a\") { } }");
    assert!(parsed.ok);
    let body = &parsed.procedures["main"].body;
    match &body[0] {
        Inst::IfElse(_, cond, ..) => {
            let loc = cond.loc();
            assert_eq!((loc.line, loc.column), (2, 19));
        }
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_warning_levels() {
    let parsed = parse("Set_alphabet \"a\";");
    assert!(parsed.ok);
    assert!(parsed
        .diagnostics
        .iter()
        .all(|d| d.level == Level::Warning));
    assert!(!parsed.diagnostics.is_empty());
}
