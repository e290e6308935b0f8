//! Cell value types

use std::fmt;

/// Represents the value stored in a cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Empty,

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Numeric value
    Number(f64),

    /// String value
    String(String),
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    /// Interpret user-entered text the way a spreadsheet does on entry.
    ///
    /// Blank text is [`CellValue::Empty`], `TRUE`/`FALSE` become booleans and
    /// text becomes a number only when the number displays back as the same
    /// text. Anything else (`007`, `10:00`, `2024/01/01`) stays a string, so
    /// `parse_display(s).to_string() == s.trim()` holds for every input.
    ///
    /// Surrounding whitespace is not kept: a string cell never starts or
    /// ends with spaces.
    ///
    /// # Examples
    /// ```
    /// use tripsheet_core::CellValue;
    ///
    /// assert_eq!(CellValue::parse_display("20"), CellValue::Number(20.0));
    /// assert_eq!(CellValue::parse_display("FALSE"), CellValue::Boolean(false));
    /// assert_eq!(CellValue::parse_display("007"), CellValue::string("007"));
    /// assert_eq!(CellValue::parse_display("  "), CellValue::Empty);
    /// ```
    pub fn parse_display(text: &str) -> Self {
        let text = text.trim();

        match text {
            "" => return CellValue::Empty,
            "TRUE" => return CellValue::Boolean(true),
            "FALSE" => return CellValue::Boolean(false),
            _ => {}
        }

        if let Ok(n) = text.parse::<f64>() {
            if n.is_finite() && format_number(n) == text {
                return CellValue::Number(n);
            }
        }

        CellValue::string(text)
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Boolean(true) => Some(1.0),
            CellValue::Boolean(false) => Some(0.0),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            CellValue::Number(n) => Some(*n != 0.0),
            _ => None,
        }
    }

    /// Try to get the value as a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Boolean(_) => "boolean",
            CellValue::Number(_) => "number",
            CellValue::String(_) => "string",
        }
    }
}

/// Render a number the way it is displayed in a cell with the general format.
fn format_number(n: f64) -> String {
    if n == n.trunc() && n.abs() < 1e15 {
        // -0 displays as 0
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, ""),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::string(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_conversions() {
        assert_eq!(CellValue::from(42), CellValue::Number(42.0));
        assert_eq!(CellValue::from(3.14), CellValue::Number(3.14));
        assert_eq!(CellValue::from(true), CellValue::Boolean(true));

        let s = CellValue::from("hello");
        assert_eq!(s.as_string(), Some("hello"));
    }

    #[test]
    fn test_cell_value_as_number() {
        assert_eq!(CellValue::Number(42.0).as_number(), Some(42.0));
        assert_eq!(CellValue::Boolean(true).as_number(), Some(1.0));
        assert_eq!(CellValue::Boolean(false).as_number(), Some(0.0));
        assert_eq!(CellValue::string("hello").as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
    }

    #[test]
    fn test_display_values() {
        assert_eq!(CellValue::Number(20.0).to_string(), "20");
        assert_eq!(CellValue::Number(-0.0).to_string(), "0");
        assert_eq!(CellValue::Number(3.25).to_string(), "3.25");
        assert_eq!(CellValue::Boolean(true).to_string(), "TRUE");
        assert_eq!(CellValue::Boolean(false).to_string(), "FALSE");
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::string("10:00").to_string(), "10:00");
    }

    #[test]
    fn test_parse_display_keeps_text_that_would_reformat() {
        assert_eq!(CellValue::parse_display("1.50"), CellValue::string("1.50"));
        assert_eq!(CellValue::parse_display("+5"), CellValue::string("+5"));
        assert_eq!(CellValue::parse_display("true"), CellValue::string("true"));
        assert_eq!(CellValue::parse_display("inf"), CellValue::string("inf"));
        assert_eq!(CellValue::parse_display("NaN"), CellValue::string("NaN"));
        assert_eq!(CellValue::parse_display("-12.5"), CellValue::Number(-12.5));
    }

    #[test]
    fn test_parse_display_round_trips() {
        for text in ["1", "TRUE", "FALSE", "2024/01/01", "Visit museum", "0.1", "CA123", "是"] {
            assert_eq!(CellValue::parse_display(text).to_string(), text);
        }
    }
}
