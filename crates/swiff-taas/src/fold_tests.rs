use super::*;
use crate::bytecode::{BinaryOp, Conversion, UnaryOp};

fn any(index: u32) -> TaasValue {
    TaasValue::local(index, TaasType::Any)
}

fn folded(value: TaasValue) -> TaasValue {
    let result = fold_constants(&value);
    assert_eq!(result.ty(), value.ty(), "fold changed type of {value:?}");
    result
}

#[test]
fn arithmetic_folds_to_number() {
    let value = TaasValue::binary(
        BinaryOp::Multiply,
        TaasValue::int(6),
        TaasValue::binary(BinaryOp::Add, TaasValue::int(3), TaasValue::number(4.0)),
    );
    assert_eq!(folded(value), TaasValue::number(42.0));
}

#[test]
fn string_concatenation() {
    let value = TaasValue::binary(
        BinaryOp::Add,
        TaasValue::binary(BinaryOp::Add, TaasValue::string("n="), TaasValue::int(-3)),
        TaasValue::boolean(true),
    );
    assert_eq!(folded(value), TaasValue::string("n=-3true"));
}

#[test]
fn number_to_string_only_when_exact() {
    let integral = TaasValue::binary(BinaryOp::Add, TaasValue::string(""), TaasValue::number(-0.0));
    assert_eq!(folded(integral), TaasValue::string("0"));

    let fraction = TaasValue::binary(BinaryOp::Add, TaasValue::string(""), TaasValue::number(0.1));
    assert_eq!(folded(fraction.clone()), fraction);
}

#[test]
fn mixed_add_is_left_alone() {
    // Boolean + int has static type *, folding would narrow it.
    let value = TaasValue::binary(BinaryOp::Add, TaasValue::boolean(true), TaasValue::int(1));
    assert_eq!(folded(value.clone()), value);
}

#[test]
fn bitwise_uses_int32_semantics() {
    let shifted = TaasValue::binary(BinaryOp::LShift, TaasValue::int(1), TaasValue::int(33));
    assert_eq!(folded(shifted), TaasValue::int(2));

    let unsigned = TaasValue::binary(BinaryOp::URShift, TaasValue::int(-1), TaasValue::int(28));
    assert_eq!(folded(unsigned), TaasValue::uint(15));

    let signed = TaasValue::binary(BinaryOp::RShift, TaasValue::int(-16), TaasValue::int(2));
    assert_eq!(folded(signed), TaasValue::int(-4));

    let wrapped = TaasValue::binary(
        BinaryOp::BitOr,
        TaasValue::number(4_294_967_297.0),
        TaasValue::int(0),
    );
    assert_eq!(folded(wrapped), TaasValue::int(1));

    assert_eq!(folded(TaasValue::unary(UnaryOp::BitNot, TaasValue::int(0))), TaasValue::int(-1));
}

#[test]
fn comparisons() {
    let lt = TaasValue::binary(BinaryOp::LessThan, TaasValue::int(1), TaasValue::uint(2));
    assert_eq!(folded(lt), TaasValue::boolean(true));

    let nan = TaasValue::binary(
        BinaryOp::GreaterEquals,
        TaasValue::number(f64::NAN),
        TaasValue::int(0),
    );
    assert_eq!(folded(nan), TaasValue::boolean(false));

    let strings = TaasValue::binary(BinaryOp::StrictEquals, TaasValue::string("a"), TaasValue::string("a"));
    assert_eq!(folded(strings), TaasValue::boolean(true));

    let loose = TaasValue::binary(
        BinaryOp::Equals,
        TaasValue::Constant(TaasConstant::Null),
        TaasValue::Constant(TaasConstant::Undefined),
    );
    assert_eq!(folded(loose), TaasValue::boolean(true));

    let strict = TaasValue::binary(
        BinaryOp::StrictEquals,
        TaasValue::Constant(TaasConstant::Null),
        TaasValue::Constant(TaasConstant::Undefined),
    );
    assert_eq!(folded(strict), TaasValue::boolean(false));

    let ordered_strings = TaasValue::binary(BinaryOp::LessThan, TaasValue::string("a"), TaasValue::string("b"));
    assert_eq!(folded(ordered_strings.clone()), ordered_strings);
}

#[test]
fn conversions_of_constants() {
    let cases = [
        (TaasValue::convert(TaasValue::string(" 42 "), Conversion::ToInt), TaasValue::int(42)),
        (TaasValue::convert(TaasValue::number(-1.0), Conversion::ToUInt), TaasValue::uint(u32::MAX)),
        (TaasValue::convert(TaasValue::string(""), Conversion::ToBoolean), TaasValue::boolean(false)),
        (TaasValue::convert(TaasValue::int(7), Conversion::ToString), TaasValue::string("7")),
        (
            TaasValue::convert(TaasValue::Constant(TaasConstant::Null), Conversion::ToString),
            TaasValue::string("null"),
        ),
        (TaasValue::convert(TaasValue::boolean(true), Conversion::ToNumber), TaasValue::number(1.0)),
    ];
    for (value, expected) in cases {
        assert_eq!(folded(value), expected);
    }
}

#[test]
fn inexact_conversions_are_kept() {
    let hex = TaasValue::convert(TaasValue::string("0x10"), Conversion::ToNumber);
    assert_eq!(folded(hex.clone()), hex);

    let coerced_null = TaasValue::convert(TaasValue::Constant(TaasConstant::Null), Conversion::CoerceString);
    assert_eq!(folded(coerced_null.clone()), coerced_null);

    let to_any = TaasValue::convert(TaasValue::int(1), Conversion::ToAny);
    assert_eq!(folded(to_any.clone()), to_any);
}

#[test]
fn redundant_conversion_is_removed() {
    let int_local = TaasValue::local(1, TaasType::Int);
    assert_eq!(folded(TaasValue::convert(int_local.clone(), Conversion::ToInt)), int_local);

    // convert_s of a String-typed value still maps null to "null".
    let string_local = TaasValue::local(2, TaasType::String);
    let to_string = TaasValue::convert(string_local, Conversion::ToString);
    assert_eq!(folded(to_string.clone()), to_string);
}

#[test]
fn partial_folding_keeps_computed_parts() {
    let value = TaasValue::binary(
        BinaryOp::Subtract,
        any(1),
        TaasValue::unary(UnaryOp::Negate, TaasValue::int(5)),
    );
    assert_eq!(
        folded(value),
        TaasValue::binary(BinaryOp::Subtract, any(1), TaasValue::number(-5.0))
    );
}

#[test]
fn typeof_constants() {
    let value = TaasValue::unary(UnaryOp::TypeOf, TaasValue::Constant(TaasConstant::Null));
    assert_eq!(folded(value), TaasValue::string("object"));
}

#[test]
fn fold_block_folds_everything() {
    let block = LiftedBlock {
        statements: vec![
            Statement::SetLocal {
                index: 1,
                value: TaasValue::binary(BinaryOp::Add, TaasValue::int(1), TaasValue::int(2)),
            },
            Statement::Return(Some(TaasValue::unary(UnaryOp::Not, TaasValue::boolean(false)))),
        ],
        stack: vec![TaasValue::unary(UnaryOp::Increment, TaasValue::int(1))],
    };
    let folded = fold_block(&block);

    assert_eq!(
        folded.statements,
        vec![
            Statement::SetLocal {
                index: 1,
                value: TaasValue::number(3.0)
            },
            Statement::Return(Some(TaasValue::boolean(true))),
        ]
    );
    assert_eq!(folded.stack, vec![TaasValue::number(2.0)]);
}
