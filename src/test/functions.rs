use crate::{
    target::Function,
    value::{Signature, Value, ValueKind},
    Error,
};

/// Signature shared by the arithmetic helpers: `(i32, i32) -> i32`
pub fn binary_i32() -> Signature {
    Signature::new(vec![ValueKind::I32, ValueKind::I32], ValueKind::I32)
}

fn binary(name: &str, op: fn(i32, i32) -> i32) -> Function {
    Function::new(name, binary_i32(), move |args| match args {
        [Value::I32(a), Value::I32(b)] => Ok(Value::I32(op(*a, *b))),
        _ => Err(Error::Error("expected two i32 arguments".into())),
    })
}

// Helper function to create an `a + b` function
pub fn add_function(name: &str) -> Function {
    binary(name, i32::wrapping_add)
}

// Helper function to create an `a * b` function
pub fn mul_function(name: &str) -> Function {
    binary(name, i32::wrapping_mul)
}

// Helper function to create an `a - b` function
pub fn sub_function(name: &str) -> Function {
    binary(name, i32::wrapping_sub)
}
