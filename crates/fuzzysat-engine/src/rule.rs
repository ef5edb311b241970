//! Rule premises as expression trees, and rules mapping them to conclusions.

use crate::variable::Fuzzified;

/// A `(variable, label)` pair, e.g. `sentiment[positive]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    pub variable: String,
    pub label: String,
}

impl Term {
    #[must_use]
    pub fn new(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            label: label.into(),
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.variable, self.label)
    }
}

/// Fuzzy-logic premise. AND is `min`, OR is `max`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Is(Term),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    #[must_use]
    pub fn is(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Is(Term::new(variable, label))
    }

    #[must_use]
    pub fn and(self, other: Expr) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn or(self, other: Expr) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// Left-folded conjunction. `None` for an empty iterator.
    pub fn all(parts: impl IntoIterator<Item = Expr>) -> Option<Self> {
        parts.into_iter().reduce(Expr::and)
    }

    /// Left-folded disjunction. `None` for an empty iterator.
    pub fn any(parts: impl IntoIterator<Item = Expr>) -> Option<Self> {
        parts.into_iter().reduce(Expr::or)
    }

    /// Truth value of the premise for the given fuzzified inputs.
    ///
    /// A term whose variable or label is absent from `fuzzified` has degree
    /// 0. Systems validate references at construction, so this only happens
    /// when evaluating a rule outside its system.
    #[must_use]
    pub fn strength(&self, fuzzified: &Fuzzified) -> f64 {
        match self {
            Expr::Is(term) => fuzzified
                .get(&term.variable)
                .and_then(|m| m.get(&term.label))
                .copied()
                .unwrap_or(0.0),
            Expr::And(lhs, rhs) => lhs.strength(fuzzified).min(rhs.strength(fuzzified)),
            Expr::Or(lhs, rhs) => lhs.strength(fuzzified).max(rhs.strength(fuzzified)),
        }
    }

    /// Every leaf term, left to right.
    #[must_use]
    pub fn terms(&self) -> Vec<&Term> {
        let mut out = Vec::new();
        self.collect_terms(&mut out);
        out
    }

    fn collect_terms<'a>(&'a self, out: &mut Vec<&'a Term>) {
        match self {
            Expr::Is(term) => out.push(term),
            Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                lhs.collect_terms(out);
                rhs.collect_terms(out);
            }
        }
    }

    fn fmt_nested(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        parent_is_and: Option<bool>,
    ) -> std::fmt::Result {
        match self {
            Expr::Is(term) => write!(f, "{term}"),
            Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                let is_and = matches!(self, Expr::And(..));
                let parens = parent_is_and.is_some_and(|p| p != is_and);
                if parens {
                    write!(f, "(")?;
                }
                lhs.fmt_nested(f, Some(is_and))?;
                write!(f, "{}", if is_and { " AND " } else { " OR " })?;
                rhs.fmt_nested(f, Some(is_and))?;
                if parens {
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_nested(f, None)
    }
}

/// `IF antecedent THEN consequent(s)`. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    antecedent: Expr,
    consequents: Vec<Term>,
}

impl Rule {
    #[must_use]
    pub fn new(antecedent: Expr, consequent: Term) -> Self {
        Self {
            antecedent,
            consequents: vec![consequent],
        }
    }

    /// Rule concluding several consequent terms at once. An empty list is
    /// rejected when the rule is added to a system.
    #[must_use]
    pub fn with_consequents(antecedent: Expr, consequents: Vec<Term>) -> Self {
        Self {
            antecedent,
            consequents,
        }
    }

    #[must_use]
    pub fn antecedent(&self) -> &Expr {
        &self.antecedent
    }

    #[must_use]
    pub fn consequents(&self) -> &[Term] {
        &self.consequents
    }

    /// Firing strength: the truth value of the antecedent.
    #[must_use]
    pub fn strength(&self, fuzzified: &Fuzzified) -> f64 {
        self.antecedent.strength(fuzzified)
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IF {} THEN ", self.antecedent)?;
        for (i, term) in self.consequents.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}
