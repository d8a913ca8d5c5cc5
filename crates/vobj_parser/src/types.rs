//! Contract type expressions used in schema files.
//!
//! ```text
//! type   := base | comb "[" type ("," type)* "]"
//! base   := Any | Null | Bool | Int | Nat | Pos | Neg | Float | Num
//!         | String | Str | Symbol | Timestamp
//! comb   := Maybe | ListOf | MapOf | Or | And
//! ```

use crate::{ParserError, Result};
use vobj_core::Contract;

/// Parses a contract type expression such as `Maybe[ListOf[Nat]]`.
///
/// # Example
///
/// ```rust
/// use vobj_parser::parse_contract;
///
/// let contract = parse_contract("Maybe[String]").unwrap();
/// assert_eq!(contract.to_string(), "String or null");
/// ```
pub fn parse_contract(expr: &str) -> Result<Contract> {
    let expr = expr.trim();

    let Some(open) = expr.find('[') else {
        return parse_base(expr);
    };
    if !expr.ends_with(']') {
        return Err(ParserError::UnknownType(expr.to_string()));
    }

    let head = expr[..open].trim();
    let args = split_args(&expr[open + 1..expr.len() - 1])
        .ok_or_else(|| ParserError::UnknownType(expr.to_string()))?;
    let mut contracts = args
        .into_iter()
        .map(parse_contract)
        .collect::<Result<Vec<_>>>()?;

    match (head, contracts.len()) {
        ("Maybe", 1) => Ok(Contract::maybe(contracts.remove(0))),
        ("ListOf", 1) => Ok(Contract::list_of(contracts.remove(0))),
        ("MapOf", 1) => Ok(Contract::map_of(contracts.remove(0))),
        ("Or", n) if n >= 2 => Ok(Contract::or(contracts)),
        ("And", n) if n >= 2 => Ok(Contract::and(contracts)),
        _ => Err(ParserError::UnknownType(expr.to_string())),
    }
}

fn parse_base(name: &str) -> Result<Contract> {
    let contract = match name {
        "Any" => Contract::Any,
        "Null" => Contract::Null,
        "Bool" => Contract::Bool,
        "Int" => Contract::Int,
        "Nat" => Contract::Nat,
        "Pos" => Contract::Pos,
        "Neg" => Contract::Neg,
        "Float" => Contract::Float,
        "Num" => Contract::Num,
        "String" | "Str" => Contract::Str,
        "Symbol" => Contract::Symbol,
        "Timestamp" => Contract::Timestamp,
        other => return Err(ParserError::UnknownType(other.to_string())),
    };
    Ok(contract)
}

/// Splits on commas that are not nested inside brackets.
///
/// Returns `None` on unbalanced brackets or an empty argument.
fn split_args(args: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in args.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(args[start..].trim());

    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some(parts)
}
