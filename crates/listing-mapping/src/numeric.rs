use listing_ir::{Value, float_to_integer};

/// Coerce a seller cell to a number.
///
/// Every character other than an ASCII digit, `.` or `-` is removed before
/// parsing, so `"₹1,299.00"` becomes `1299`. Integral results are integers,
/// anything unparseable is null.
pub fn coerce_numeric(value: &Value) -> Value {
    if is_missing(value) {
        return Value::Null;
    }

    let cleaned: String = value
        .to_text()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return Value::Null;
    }

    if let Ok(i) = cleaned.parse::<i64>() {
        return Value::Integer(i);
    }
    match cleaned.parse::<f64>() {
        Ok(f) if f.is_finite() => float_to_integer(f).map_or(Value::Float(f), Value::Integer),
        _ => Value::Null,
    }
}

/// Null or a NaN float: the cells a seller left empty.
pub(crate) fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Float(f) => f.is_nan(),
        _ => false,
    }
}
