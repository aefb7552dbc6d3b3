use moonbite_codegen::{compile, Instruction, Module, Opcode, Value};
use moonbite_parser::{parse, ErrorKind};

fn compile_source(source: &str) -> Module {
    let ast = parse(source, "main.mb").expect("parsing should succeed");
    compile(&ast).expect("compilation should succeed")
}

/// The function object bound by the first top-level definition.
fn first_function(module: &Module) -> &[Instruction] {
    for index in 0..module.constants.len() {
        if let Some(Value::Function(function)) = module.constants.get(index as u32) {
            return &function.instructions;
        }
    }
    panic!("expected a function constant in the pool");
}

/// Every forward jump operand must equal the encoded size of a contiguous
/// run of following instructions.
fn assert_jumps_land_on_boundaries(instructions: &[Instruction]) {
    for (position, instruction) in instructions.iter().enumerate() {
        let forward = matches!(instruction.opcode, Opcode::Jump | Opcode::JumpIfFalse)
            && instruction.operands.len() == 1;
        if !forward {
            continue;
        }
        let distance = instruction.operands[0];
        let mut skipped = 0;
        let mut rest = instructions[position + 1..].iter();
        while skipped < distance {
            let next = rest.next().expect("jump must stay inside the stream");
            skipped += next.get_size();
        }
        assert_eq!(
            skipped, distance,
            "jump at {} must land on an instruction boundary",
            position
        );
    }
}

#[test]
fn an_empty_if_compiles_to_three_instructions() {
    let module = compile_source("package main\nfun main() {\nif (true) {\n}\n}");
    assert_eq!(
        first_function(&module),
        &[
            Instruction::new(Opcode::True),
            Instruction::with_operand(Opcode::JumpIfFalse, 5),
            Instruction::with_operand(Opcode::Jump, 0),
        ]
    );
}

#[test]
fn else_if_chains_size_their_jumps_exactly() {
    let module = compile_source(
        "package main\nfun main() {\nif (true) {\n1\n} else if (false) {\n2\n} else {\n3\n}\n}",
    );
    let instructions = first_function(&module);
    assert_eq!(
        instructions,
        &[
            Instruction::new(Opcode::True),
            Instruction::with_operand(Opcode::JumpIfFalse, 11),
            Instruction::with_operand(Opcode::Constant, 0),
            Instruction::new(Opcode::Pop),
            Instruction::with_operand(Opcode::Jump, 12),
            Instruction::new(Opcode::False),
            Instruction::with_operand(Opcode::JumpIfFalse, 6),
            Instruction::with_operand(Opcode::Constant, 1),
            Instruction::new(Opcode::Pop),
            Instruction::with_operand(Opcode::Jump, 6),
            Instruction::with_operand(Opcode::Constant, 2),
            Instruction::new(Opcode::Pop),
        ]
    );
    assert_jumps_land_on_boundaries(instructions);
}

#[test]
fn loops_jump_backwards_over_body_and_predicate() {
    let module = compile_source("package main\nfun main() {\nfor (true) {\n}\n}");
    assert_eq!(
        first_function(&module),
        &[
            Instruction::new(Opcode::True),
            Instruction::with_operand(Opcode::JumpIfFalse, 9),
            Instruction::backward_jump(1),
        ]
    );
}

#[test]
fn constant_indices_follow_encounter_order() {
    let module = compile_source("package main\nconst a = 1\nconst b = \"two\"\nconst c = 3");
    assert_eq!(module.constants.get(0), Some(&Value::Integer(1)));
    assert_eq!(module.constants.get(1), Some(&Value::Str("two".to_string())));
    assert_eq!(module.constants.get(2), Some(&Value::Integer(3)));
    assert_eq!(
        module.instructions,
        vec![
            Instruction::with_operand(Opcode::Constant, 0),
            Instruction::with_operand(Opcode::Set, 0),
            Instruction::with_operand(Opcode::Constant, 1),
            Instruction::with_operand(Opcode::Set, 1),
            Instruction::with_operand(Opcode::Constant, 2),
            Instruction::with_operand(Opcode::Set, 2),
        ]
    );
}

#[test]
fn less_than_swaps_operands() {
    let module = compile_source("package main\nconst smaller = 1 < 2");
    assert_eq!(module.constants.get(0), Some(&Value::Integer(2)));
    assert_eq!(module.constants.get(1), Some(&Value::Integer(1)));
    assert_eq!(
        module.instructions,
        vec![
            Instruction::with_operand(Opcode::Constant, 0),
            Instruction::with_operand(Opcode::Constant, 1),
            Instruction::new(Opcode::GreaterThan),
            Instruction::with_operand(Opcode::Set, 0),
        ]
    );
}

#[test]
fn less_than_or_equal_swaps_operands_too() {
    let module = compile_source("package main\nconst smaller = 1 <= 2");
    assert_eq!(
        module.instructions[2],
        Instruction::new(Opcode::GreaterThanOrEqual)
    );
}

#[test]
fn the_main_package_is_the_entry_module() {
    assert!(compile_source("package main").entry);
    assert!(!compile_source("package util").entry);
}

#[test]
fn locals_get_their_own_slots() {
    let module = compile_source("package main\nfun main() {\nvar x = 1\nx += 2\n}");
    assert_eq!(
        first_function(&module),
        &[
            Instruction::with_operand(Opcode::Constant, 0),
            Instruction::with_operand(Opcode::SetLocal, 0),
            Instruction::with_operand(Opcode::GetLocal, 0),
            Instruction::with_operand(Opcode::Constant, 1),
            Instruction::new(Opcode::Add),
            Instruction::with_operand(Opcode::SetLocal, 0),
        ]
    );
}

#[test]
fn calls_push_arguments_before_the_callee() {
    let module = compile_source("package main\nfun greet() {\n}\nfun main() {\ngreet()\n}");
    let main = match module.constants.get(1) {
        Some(Value::Function(function)) => &function.instructions,
        other => panic!("expected main's function constant, found {:?}", other),
    };
    assert_eq!(
        main,
        &[
            Instruction::with_operand(Opcode::Get, 0),
            Instruction::with_operand(Opcode::Call, 0),
            Instruction::new(Opcode::Pop),
        ]
    );
}

#[test]
fn member_access_compiles_to_an_index_by_name() {
    let module = compile_source("package main\nconst point = {\"x\": 1}\nconst x = point.x");
    // the member name is pushed as a string and never deduplicated
    assert_eq!(module.constants.get(0), Some(&Value::Str("x".to_string())));
    assert_eq!(module.constants.get(2), Some(&Value::Str("x".to_string())));
    // the map literal takes the first four instructions
    assert_eq!(
        module.instructions[4..],
        [
            Instruction::with_operand(Opcode::Get, 0),
            Instruction::with_operand(Opcode::Constant, 2),
            Instruction::new(Opcode::Index),
            Instruction::with_operand(Opcode::Set, 1),
        ]
    );
}

#[test]
fn unresolved_symbols_fail_compilation() {
    let ast = parse("package main\nconst x = y", "main.mb").expect("parsing should succeed");
    let error = compile(&ast).expect_err("unresolved symbol should fail");
    assert_eq!(error.kind, ErrorKind::CompileError);
    assert!(error.reason.contains("y"));
}

#[test]
fn a_bare_yield_is_rejected() {
    let ast = parse(
        "package main\nconst g = gen fun() {\nyield\n}",
        "main.mb",
    )
    .expect("parsing should succeed");
    let error = compile(&ast).expect_err("bare yield should fail");
    assert_eq!(error.kind, ErrorKind::CompileError);
    assert!(error.reason.contains("yield"));
}

#[test]
fn instanceof_reports_its_missing_lowering() {
    let ast = parse(
        "package main\nconst x = 1\nconst check = x instanceof int32",
        "main.mb",
    )
    .expect("parsing should succeed");
    let error = compile(&ast).expect_err("instanceof should fail");
    assert_eq!(error.kind, ErrorKind::CompileError);
    assert!(error.reason.contains("instanceof"));
}

#[test]
fn modules_serialize_for_debug_dumps() {
    let module = compile_source("package main\nconst a = 1");
    let json = serde_json::to_string(&module).expect("serialization should succeed");
    assert!(json.contains("\"name\":\"main\""));
    assert!(json.contains("\"entry\":true"));
}

#[test]
fn declared_defaults_match_the_declared_type() {
    let module = compile_source(
        "package main\nvar flag bool\nvar name string\nvar ratio float64\nvar count int32",
    );
    assert_eq!(module.constants.get(0), Some(&Value::Bool(false)));
    assert_eq!(module.constants.get(1), Some(&Value::Str(String::new())));
    assert_eq!(module.constants.get(2), Some(&Value::Float(0.0)));
    assert_eq!(module.constants.get(3), Some(&Value::Integer(0)));
}
