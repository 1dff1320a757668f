use crate::error::{ErrorKind, OperandKind};
use crate::expression::Expr;
use crate::operands::{any_operand, Operand};
use crate::ParserSettings;
use emu68::DataSize;

fn parse_operand(input: &str) -> Operand {
    parse_operand_sized(input, DataSize::Word)
}

fn parse_operand_sized(input: &str, size: DataSize) -> Operand {
    let (res, operand) = any_operand(input, size, &ParserSettings::default());
    assert!(res.ok, "{:?} did not parse: {:?}", input, res.error);
    operand.expect("success always carries an operand")
}

#[test]
fn registers() {
    assert_eq!(parse_operand("d0"), Operand::DataRegister(0));
    assert_eq!(parse_operand("d7"), Operand::DataRegister(7));
    assert_eq!(parse_operand("a3"), Operand::AddressRegister(3));
    assert_eq!(parse_operand("a7"), Operand::AddressRegister(7));
}

#[test]
fn out_of_range_register_digits_become_labels() {
    // d9 is not a register, so it falls through to a label reference.
    assert_eq!(
        parse_operand("d9"),
        Operand::AbsoluteShort(Expr::Label(crate::hash_label("d9")))
    );
}

#[test]
fn immediates() {
    assert_eq!(
        parse_operand("#42"),
        Operand::Immediate(Expr::Number(42))
    );
    assert_eq!(
        parse_operand("#-5"),
        Operand::Immediate(Expr::Number(-5))
    );
    assert_eq!(
        parse_operand("#$1F"),
        Operand::Immediate(Expr::Number(0x1F))
    );
    assert_eq!(
        parse_operand("#start"),
        Operand::Immediate(Expr::Label(crate::hash_label("start")))
    );
}

#[test]
fn indirect_forms() {
    assert_eq!(parse_operand("(a2)"), Operand::Address(2));
    assert_eq!(parse_operand("(a2)+"), Operand::AddressPost(2));
    assert_eq!(parse_operand("-(a2)"), Operand::AddressPre(2));
    assert_eq!(parse_operand("- (a2)"), Operand::AddressPre(2));
    assert_eq!(parse_operand("( a2 )"), Operand::Address(2));
}

#[test]
fn displacement_form() {
    assert_eq!(
        parse_operand("16(a3)"),
        Operand::AddressOffset {
            register: 3,
            offset: Expr::Number(16),
        }
    );
    assert_eq!(
        parse_operand("-4(a7)"),
        Operand::AddressOffset {
            register: 7,
            offset: Expr::Number(-4),
        }
    );
}

#[test]
fn indexed_forms() {
    assert_eq!(
        parse_operand("(a1, d4)"),
        Operand::AddressIndex {
            register: 1,
            index: 4,
            offset: None,
        }
    );
    // Address registers index as 8-15.
    assert_eq!(
        parse_operand("(a1, a2)"),
        Operand::AddressIndex {
            register: 1,
            index: 10,
            offset: None,
        }
    );
    assert_eq!(
        parse_operand("(8, a1, d0)"),
        Operand::AddressIndex {
            register: 1,
            index: 0,
            offset: Some(Expr::Number(8)),
        }
    );
}

#[test]
fn absolute_width_follows_the_data_size() {
    assert_eq!(
        parse_operand_sized("$100", DataSize::Byte),
        Operand::AbsoluteShort(Expr::Number(0x100))
    );
    assert_eq!(
        parse_operand_sized("$100", DataSize::Word),
        Operand::AbsoluteShort(Expr::Number(0x100))
    );
    assert_eq!(
        parse_operand_sized("$100", DataSize::Long),
        Operand::AbsoluteLong(Expr::Number(0x100))
    );
}

#[test]
fn bare_labels_are_absolute_addresses() {
    assert_eq!(
        parse_operand("loop"),
        Operand::AbsoluteShort(Expr::Label(crate::hash_label("loop")))
    );
}

#[test]
fn labels_are_case_sensitive_by_default() {
    assert_ne!(crate::hash_label("Loop"), crate::hash_label("loop"));
    let settings = ParserSettings {
        case_insensitive_labels: true,
    };
    let (res, operand) = any_operand("Loop", DataSize::Word, &settings);
    assert!(res.ok);
    assert_eq!(
        operand,
        Some(Operand::AbsoluteShort(Expr::Label(crate::hash_label(
            "loop"
        ))))
    );
}

#[test]
fn expressions_in_operands() {
    assert_eq!(
        parse_operand("#2+3*4"),
        Operand::Immediate(Expr::BinOp {
            op: crate::BinOp::Add,
            lhs: Box::new(Expr::Number(2)),
            rhs: Box::new(Expr::BinOp {
                op: crate::BinOp::Mul,
                lhs: Box::new(Expr::Number(3)),
                rhs: Box::new(Expr::Number(4)),
            }),
        })
    );
}

#[test]
fn garbage_reports_unknown_operand() {
    let (res, operand) = any_operand("!?", DataSize::Word, &ParserSettings::default());
    assert!(!res.ok);
    assert_eq!(operand, None);
    assert_eq!(res.error, ErrorKind::UnknownOperand);
}

#[test]
fn operand_kinds() {
    assert_eq!(parse_operand("d1").kind(), OperandKind::DataRegister);
    assert_eq!(parse_operand("(a1)+").kind(), OperandKind::AddressPost);
    assert_eq!(parse_operand("#1").kind(), OperandKind::Immediate);
    assert_eq!(parse_operand("$10").kind(), OperandKind::AbsoluteShort);
}
