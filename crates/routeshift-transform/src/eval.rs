//! Constant string evaluation
//!
//! Resolves string literals, template literals and `+` concatenations to
//! their value when every part is known. Used to fold `className`
//! expressions after font references have been replaced.

use swc_core::ecma::ast::*;

/// Outcome of evaluating an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub is_constant: bool,
    /// The resolved string; empty when not constant
    pub value: String,
}

impl Evaluation {
    fn constant(value: String) -> Evaluation {
        Evaluation {
            is_constant: true,
            value,
        }
    }

    fn unknown() -> Evaluation {
        Evaluation {
            is_constant: false,
            value: String::new(),
        }
    }
}

/// Evaluate `expr` to a constant string if possible
pub fn evaluate(expr: &Expr) -> Evaluation {
    match try_eval(expr) {
        Some(value) => Evaluation::constant(value),
        None => Evaluation::unknown(),
    }
}

fn try_eval(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(Lit::Str(s)) => Some(s.value.to_string()),
        Expr::Tpl(tpl) => eval_template(tpl),
        Expr::Bin(BinExpr {
            op: BinaryOp::Add,
            left,
            right,
            ..
        }) => {
            let mut value = try_eval(left)?;
            value.push_str(&try_eval(right)?);
            Some(value)
        }
        Expr::Paren(ParenExpr { expr, .. }) => try_eval(expr),
        _ => None,
    }
}

/// Interleave quasis with embedded values: q0 e0 q1 e1 ... qn
fn eval_template(tpl: &Tpl) -> Option<String> {
    let mut value = String::new();
    for (index, quasi) in tpl.quasis.iter().enumerate() {
        match &quasi.cooked {
            Some(cooked) => value.push_str(cooked),
            None => value.push_str(&quasi.raw),
        }
        if let Some(expr) = tpl.exprs.get(index) {
            value.push_str(&try_eval(expr)?);
        }
    }
    Some(value)
}

/// Trim and collapse runs of whitespace into single spaces
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use routeshift_syntax::{parse, Dialect};

    fn eval_source(source: &str) -> Evaluation {
        let module = parse(&format!("({});", source), Dialect::Tsx).unwrap().module;
        let ModuleItem::Stmt(Stmt::Expr(stmt)) = &module.body[0] else {
            panic!("expected expression statement");
        };
        evaluate(&stmt.expr)
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(eval_source("\"flex\"").value, "flex");
        assert!(eval_source("'a b'").is_constant);
    }

    #[test]
    fn test_template_literal() {
        let result = eval_source("`${\"\"} flex ${\"gap-2\"}`");
        assert!(result.is_constant);
        assert_eq!(result.value, " flex gap-2");
    }

    #[test]
    fn test_concatenation() {
        let result = eval_source("\"a\" + ` b` + (\"c\")");
        assert!(result.is_constant);
        assert_eq!(result.value, "a bc");
    }

    #[test]
    fn test_non_constant_parts() {
        assert!(!eval_source("`${inter.className} flex`").is_constant);
        assert!(!eval_source("\"a\" + b").is_constant);
        assert!(!eval_source("cn(\"a\")").is_constant);
        assert!(!eval_source("1 + 2").is_constant);
        assert_eq!(eval_source("x").value, "");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  flex   gap-2 \n"), "flex gap-2");
        assert_eq!(collapse_whitespace("   "), "");
    }
}
