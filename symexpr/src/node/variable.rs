use crate::error::{
    kind::{EmptyVariableName, InvalidVariableName},
    Error,
};
use std::{fmt::{self, Display, Formatter}, hash::Hasher};
use rustc_hash::FxHasher;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named variable. Every character of the name is an ASCII letter or an underscore, and the name
/// is never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Variable(String);

impl Variable {
    /// Validates the name and creates a variable from it.
    ///
    /// ```
    /// use symexpr::node::Variable;
    ///
    /// assert_eq!(Variable::new("x_n")?.name(), "x_n");
    /// assert!(Variable::new("x-y").is_err());
    /// assert!(Variable::new("").is_err());
    /// # Ok::<(), symexpr::Error>(())
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::new("\"\"", vec![0..2], EmptyVariableName));
        }

        let invalid = name
            .chars()
            .enumerate()
            .find(|(_, c)| !(c.is_ascii_alphabetic() || *c == '_'));
        if let Some((position, found)) = invalid {
            // the source is the quoted name, so every span is shifted by the opening quote
            let src = format!("\"{}\"", name);
            return Err(Error::new(
                src,
                vec![position + 1..position + 2],
                InvalidVariableName { name, position, found },
            ));
        }

        Ok(Self(name))
    }

    /// The name of the variable.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// A deterministic hash of the name.
    pub fn hash_code(&self) -> u64 {
        let mut hasher = FxHasher::default();
        hasher.write(self.0.as_bytes());
        hasher.finish()
    }
}

impl TryFrom<String> for Variable {
    type Error = Error;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl From<Variable> for String {
    fn from(var: Variable) -> Self {
        var.0
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Category;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn accepts_letters_and_underscores() {
        for name in ["x", "alpha", "_", "x_n_", "Theta_B"] {
            assert_eq!(Variable::new(name).unwrap().name(), name);
        }
    }

    #[test]
    fn rejects_other_characters() {
        let err = Variable::new("x-y").unwrap_err();
        assert_eq!(err.category(), Category::Construction);
        assert_eq!(
            err.downcast_ref::<InvalidVariableName>(),
            Some(&InvalidVariableName { name: "x-y".to_string(), position: 1, found: '-' }),
        );
        assert_eq!(err.src, "\"x-y\"");
        assert_eq!(err.spans, vec![2..3]);

        assert!(Variable::new("x1").is_err());
        assert!(Variable::new("é").is_err());
        assert!(Variable::new("a b").is_err());
    }

    #[test]
    fn rejects_empty_name() {
        let err = Variable::new("").unwrap_err();
        assert!(err.is::<EmptyVariableName>());
    }

    #[test]
    fn report_points_at_character() {
        let err = Variable::new("ab$c").unwrap_err();
        let report = String::from_utf8(strip_ansi_escapes::strip(err.report("variable"))).unwrap();
        assert!(report.contains("invalid variable name: `ab$c`"));
        assert!(report.contains("`$` is not allowed in a variable name"));
    }

    #[test]
    fn hash_is_deterministic() {
        let a = Variable::new("x").unwrap();
        let b = Variable::new("x").unwrap();
        assert_eq!(a.hash_code(), b.hash_code());
        assert_ne!(a.hash_code(), Variable::new("y").unwrap().hash_code());
    }
}
