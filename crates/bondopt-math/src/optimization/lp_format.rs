//! CPLEX LP-format rendering of an [`LpModel`].
//!
//! The output is meant for inspection and for replaying a model in an
//! external solver; it is not parsed back.

use std::collections::HashSet;
use std::fmt::Write;

use super::model::{LinearExpr, LpModel, Sense};

impl LpModel {
    /// Renders the model in CPLEX LP format.
    ///
    /// Names are sanitised to the LP identifier alphabet; unnamed
    /// constraints are numbered `_C1`, `_C2`, ... Names that coincide after
    /// sanitising get `_2`, `_3`, ... suffixes so every rendered name is
    /// unique.
    #[must_use]
    pub fn to_lp_format(&self) -> String {
        let names = unique_names(self.variables().iter().map(|v| sanitize(&v.name)));
        let mut unnamed = 0;
        let row_names = unique_names(self.constraints().iter().map(|c| match &c.name {
            Some(n) => sanitize(n),
            None => {
                unnamed += 1;
                format!("_C{unnamed}")
            }
        }));
        let mut out = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(out, "\\* {} *\\", self.name());
        let _ = writeln!(
            out,
            "{}",
            match self.sense() {
                Sense::Maximize => "Maximize",
                Sense::Minimize => "Minimize",
            }
        );
        let _ = writeln!(out, "OBJ: {}", render_expr(self.objective(), &names));

        let _ = writeln!(out, "Subject To");
        for (c, name) in self.constraints().iter().zip(&row_names) {
            // Constants move to the right-hand side.
            let rhs = c.rhs - c.expr.constant();
            let lhs = LinearExpr::from_terms(c.expr.terms().iter().copied());
            let _ = writeln!(
                out,
                "{name}: {} {} {}",
                render_expr(&lhs, &names),
                c.comparison.symbol(),
                format_number(rhs)
            );
        }

        let _ = writeln!(out, "Bounds");
        for (v, name) in self.variables().iter().zip(&names) {
            if v.upper.is_finite() {
                let _ = writeln!(
                    out,
                    "{} <= {name} <= {}",
                    format_number(v.lower),
                    format_number(v.upper)
                );
            } else {
                let _ = writeln!(out, "{name} >= {}", format_number(v.lower));
            }
        }
        let _ = writeln!(out, "End");
        out
    }
}

fn render_expr(expr: &LinearExpr, names: &[String]) -> String {
    let mut out = String::new();
    for (i, &(var, coef)) in expr.terms().iter().enumerate() {
        let name = &names[var.index()];
        if i == 0 {
            if coef < 0.0 {
                out.push_str("- ");
            }
        } else if coef < 0.0 {
            out.push_str(" - ");
        } else {
            out.push_str(" + ");
        }
        let magnitude = coef.abs();
        if (magnitude - 1.0).abs() > f64::EPSILON {
            out.push_str(&format_number(magnitude));
            out.push(' ');
        }
        out.push_str(name);
    }

    let constant = expr.constant();
    if out.is_empty() {
        out.push_str(&format_number(constant));
    } else if constant != 0.0 {
        let sign = if constant < 0.0 { '-' } else { '+' };
        let _ = write!(out, " {sign} {}", format_number(constant.abs()));
    }
    out
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

fn unique_names(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut taken = HashSet::new();
    names
        .into_iter()
        .map(|name| {
            let mut candidate = name.clone();
            let mut n = 1;
            while !taken.insert(candidate.clone()) {
                n += 1;
                candidate = format!("{name}_{n}");
            }
            candidate
        })
        .collect()
}

fn sanitize(name: &str) -> String {
    const ALLOWED: &str = "!\"#$%&()/,.;?@_`'{}|~";
    let mut out: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || ALLOWED.contains(c) {
                c
            } else {
                '_'
            }
        })
        .collect();
    if out.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        out.insert(0, '_');
    }
    out
}
