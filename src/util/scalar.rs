//! JS primitive values lifted into Rust.
//!
//! Page scripts hand back loosely typed values (ids as numbers, header
//! values as booleans). [`Scalar`] keeps JS's stringification and
//! truthiness rules in one testable place.

#[cfg(test)]
#[path = "scalar_test.rs"]
mod scalar_test;

/// A value returned by page code.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Bool(bool),
    /// `null` or `undefined`.
    Nullish,
    /// Any object, already rendered with JS `String(value)`.
    Object(String),
}

impl Scalar {
    /// JS truthiness.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Bool(b) => *b,
            Self::Nullish => false,
            Self::Object(_) => true,
        }
    }

    /// `String(value)`, or `None` for `null`/`undefined`.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Text(text) | Self::Object(text) => Some(text.clone()),
            Self::Number(n) => Some(number_text(*n)),
            Self::Bool(b) => Some(b.to_string()),
            Self::Nullish => None,
        }
    }

    /// Text of a truthy value; falsy values mean "no identity".
    #[must_use]
    pub fn into_identity(self) -> Option<String> {
        if self.is_truthy() { self.to_text() } else { None }
    }
}

fn number_text(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity".to_owned() } else { "-Infinity".to_owned() }
    } else if n == 0.0 {
        "0".to_owned()
    } else {
        n.to_string()
    }
}

/// Lift a `JsValue`. Objects go through the global `String` function.
#[cfg(feature = "hydrate")]
#[must_use]
pub fn from_js(value: &wasm_bindgen::JsValue) -> Scalar {
    use wasm_bindgen::JsCast;

    use crate::util::js;

    if value.is_undefined() || value.is_null() {
        return Scalar::Nullish;
    }
    if let Some(text) = value.as_string() {
        return Scalar::Text(text);
    }
    if let Some(n) = value.as_f64() {
        return Scalar::Number(n);
    }
    if let Some(b) = value.as_bool() {
        return Scalar::Bool(b);
    }
    let rendered = js::property(&js_sys::global(), "String")
        .and_then(|f| f.dyn_ref::<js_sys::Function>().cloned())
        .and_then(|f| match f.call1(&wasm_bindgen::JsValue::UNDEFINED, value) {
            Ok(text) => text.as_string(),
            Err(err) => {
                log::debug!("String() threw: {}", js::describe(&err));
                None
            }
        });
    rendered.map_or(Scalar::Nullish, Scalar::Object)
}
